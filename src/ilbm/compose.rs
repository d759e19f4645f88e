//! Chunky indices to RGBA, including Hold-And-Modify reconstruction.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;
use rgb::RGBA8;

use super::camg::DisplayMode;
use super::cmap::ColorMap;
use crate::error::IlbmError;

/// Reference colour at the start of every HAM scanline. Real hardware uses
/// the border colour, which a file does not carry.
const HAM_ROW_START: RGBA8 = RGBA8 { r: 0, g: 0, b: 0, a: 255 };

/// Colour for indices past the end of the palette.
const OUT_OF_RANGE: RGBA8 = RGBA8 { r: 0, g: 0, b: 0, a: 255 };

/// Apply one HAM modify code to the previous pixel.
///
/// The two bits above the palette's address width select the channel
/// (1 = blue, 2 = red, 0 or 3 = green); the low `address_bits` bits become the
/// new channel value, left-aligned to 8 bits.
pub fn hold_and_modify(previous: RGBA8, code: u8, address_bits: u32) -> RGBA8 {
    let bits = address_bits.min(8);
    let code = u32::from(code);
    let control = (code >> bits) & 0x3;
    let value = ((code & ((1 << bits) - 1)) << (8 - bits)) as u8;

    let mut out = previous;
    match control {
        1 => out.b = value,
        2 => out.r = value,
        _ => out.g = value,
    }
    out
}

fn push(out: &mut [u8], c: RGBA8) {
    out.copy_from_slice(&[c.r, c.g, c.b, c.a]);
}

/// Turn a chunky index buffer into RGBA8 bytes.
///
/// Without HAM this is a palette lookup. With HAM, indices inside the palette
/// are base colours and everything else is a modify code applied to the
/// pixel to its left.
pub fn compose_indexed(
    indices: &[u8],
    width: usize,
    palette: &ColorMap,
    mode: DisplayMode,
    stop: &dyn Stop,
) -> Result<Vec<u8>, IlbmError> {
    let mut rgba = vec![0u8; indices.len() * 4];
    if width == 0 {
        return Ok(rgba);
    }
    let entries = palette.entries();

    for (y, (row_in, row_out)) in indices
        .chunks_exact(width)
        .zip(rgba.chunks_exact_mut(width * 4))
        .enumerate()
    {
        if y % 16 == 0 {
            stop.check()?;
        }
        if mode.hold_and_modify {
            let mut previous = HAM_ROW_START;
            for (&code, px) in row_in.iter().zip(row_out.chunks_exact_mut(4)) {
                let color = match entries.get(code as usize) {
                    Some(&base) => base,
                    None => hold_and_modify(previous, code, palette.address_bits()),
                };
                push(px, color);
                previous = color;
            }
        } else {
            for (&index, px) in row_in.iter().zip(row_out.chunks_exact_mut(4)) {
                push(px, entries.get(index as usize).copied().unwrap_or(OUT_OF_RANGE));
            }
        }
    }

    Ok(rgba)
}

/// Clear alpha wherever the chunky index equals `transparent`.
pub(crate) fn key_transparent_color(rgba: &mut [u8], indices: &[u8], transparent: u16) {
    for (px, &index) in rgba.chunks_exact_mut(4).zip(indices) {
        if u16::from(index) == transparent {
            px[3] = 0;
        }
    }
}

/// Clear alpha wherever the mask plane bit is zero.
pub(crate) fn apply_mask(rgba: &mut [u8], mask: &[u8]) {
    for (px, &m) in rgba.chunks_exact_mut(4).zip(mask) {
        if m == 0 {
            px[3] = 0;
        }
    }
}
