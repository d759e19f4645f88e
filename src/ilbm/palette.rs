//! Palette fix-up for Extended-Half-Bright and Hold-And-Modify modes.

use alloc::vec::Vec;
use rgb::RGBA8;

use super::camg::DisplayMode;
use super::cmap::ColorMap;

/// Palettes larger than this were already written with the half-bright copies.
const EHB_BASE_COLORS: usize = 32;

/// Bits of a HAM code taken by the modify-control field.
const HAM_CONTROL_BITS: u32 = 2;

/// Double the palette with half-intensity copies of every entry.
///
/// Palettes with more than 32 entries are returned unchanged.
pub fn extend_half_bright(palette: &ColorMap) -> ColorMap {
    if palette.len() > EHB_BASE_COLORS {
        tracing::debug!(
            colors = palette.len(),
            "EHB set but palette already holds the half-bright entries"
        );
        return palette.clone();
    }
    let mut entries = Vec::with_capacity(palette.len() * 2);
    entries.extend_from_slice(palette.entries());
    entries.extend(
        palette
            .entries()
            .iter()
            .map(|c| RGBA8::new(c.r >> 1, c.g >> 1, c.b >> 1, 255)),
    );
    ColorMap::new(entries)
}

/// Cull a palette saved larger than the HAM base-colour space.
///
/// Some paint programs store a 256-colour map for HAM6 images. When the
/// palette's address width exceeds the plane count, the width is reset to
/// `plane_count - 2` and the palette truncated to `len >> bits` entries,
/// never more than `2^bits`.
pub fn reduce_ham_palette(palette: &ColorMap, plane_count: u8) -> ColorMap {
    let bits = palette.address_bits();
    let planes = u32::from(plane_count);
    if bits <= planes {
        return palette.clone();
    }
    let reduced_bits = bits - ((bits - planes) + HAM_CONTROL_BITS).min(bits);
    // Bounded so the new address width still covers every kept entry.
    let keep = (palette.len() >> reduced_bits).min(1 << reduced_bits);
    tracing::debug!(
        from = palette.len(),
        to = keep,
        bits = reduced_bits,
        "culling oversized HAM palette"
    );
    ColorMap::with_address_bits(palette.entries()[..keep].to_vec(), reduced_bits)
}

/// Apply the mode-dependent palette fix-up. EHB takes precedence over HAM.
pub fn fix_palette(palette: &ColorMap, mode: DisplayMode, plane_count: u8) -> ColorMap {
    if mode.extended_half_bright {
        extend_half_bright(palette)
    } else if mode.hold_and_modify {
        reduce_ham_palette(palette, plane_count)
    } else {
        palette.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> ColorMap {
        ColorMap::new(
            (0..n)
                .map(|i| RGBA8::new((i as u8).wrapping_mul(8), 255 - i as u8, 100, 255))
                .collect(),
        )
    }

    #[test]
    fn ehb_doubles_small_palettes() {
        let base = ramp(16);
        let ext = extend_half_bright(&base);
        assert_eq!(ext.len(), 32);
        for i in 0..16 {
            let c = base.entries()[i];
            assert_eq!(ext.entries()[i], c);
            assert_eq!(ext.entries()[16 + i], RGBA8::new(c.r >> 1, c.g >> 1, c.b >> 1, 255));
        }
    }

    #[test]
    fn ehb_leaves_large_palettes() {
        let base = ramp(40);
        assert_eq!(extend_half_bright(&base), base);
    }

    #[test]
    fn ham6_with_256_colour_map_is_culled_to_16() {
        let base = ramp(256);
        assert_eq!(base.address_bits(), 8);
        let culled = reduce_ham_palette(&base, 6);
        assert_eq!(culled.len(), 16);
        assert_eq!(culled.address_bits(), 4);
        assert_eq!(culled.entries(), &base.entries()[..16]);
    }

    #[test]
    fn ham_palette_within_plane_budget_is_kept() {
        let base = ramp(16);
        assert_eq!(reduce_ham_palette(&base, 6), base);
        let ham8 = ramp(64);
        assert_eq!(reduce_ham_palette(&ham8, 8), ham8);
    }

    #[test]
    fn ham_cull_keeps_address_width_covering_palette() {
        for planes in 0..=8u8 {
            let culled = reduce_ham_palette(&ramp(256), planes);
            assert!(
                culled.len() <= 1 << culled.address_bits(),
                "{planes} planes: {} entries, {} bits",
                culled.len(),
                culled.address_bits()
            );
        }
        let culled = reduce_ham_palette(&ramp(256), 1);
        assert_eq!((culled.len(), culled.address_bits()), (1, 0));
    }

    #[test]
    fn ehb_wins_when_both_flags_are_set() {
        let mode = DisplayMode {
            hold_and_modify: true,
            extended_half_bright: true,
        };
        assert_eq!(fix_palette(&ramp(32), mode, 6).len(), 64);
        assert_eq!(fix_palette(&ramp(4), DisplayMode::default(), 2).len(), 4);
    }
}
