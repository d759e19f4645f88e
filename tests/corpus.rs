//! Synthetic files covering each display mode and body layout.

use enough::Unstoppable;
use zenilbm::ilbm::{Chunk, ColorRange, Masking};
use zenilbm::*;

const OPAQUE_BLACK: RGBA8 = RGBA8 { r: 0, g: 0, b: 0, a: 255 };

fn chunk(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(id);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        out.push(0);
    }
    out
}

fn form(kind: &[u8; 4], chunks: &[Vec<u8>]) -> Vec<u8> {
    let body: Vec<u8> = chunks.concat();
    let mut out = Vec::new();
    out.extend_from_slice(b"FORM");
    out.extend_from_slice(&((body.len() + 4) as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(&body);
    out
}

struct Header {
    width: u16,
    height: u16,
    planes: u8,
    masking: u8,
    compression: u8,
    transparent: u16,
}

impl Header {
    fn new(width: u16, height: u16, planes: u8) -> Self {
        Self {
            width,
            height,
            planes,
            masking: 0,
            compression: 0,
            transparent: 0,
        }
    }

    fn chunk(&self) -> Vec<u8> {
        let mut p = Vec::new();
        p.extend_from_slice(&self.width.to_be_bytes());
        p.extend_from_slice(&self.height.to_be_bytes());
        p.extend_from_slice(&[0, 0, 0, 0]);
        p.extend_from_slice(&[self.planes, self.masking, self.compression, 0]);
        p.extend_from_slice(&self.transparent.to_be_bytes());
        p.extend_from_slice(&[1, 1]);
        p.extend_from_slice(&(self.width as i16).to_be_bytes());
        p.extend_from_slice(&(self.height as i16).to_be_bytes());
        chunk(b"BMHD", &p)
    }
}

fn cmap(colors: &[RGBA8]) -> Vec<u8> {
    let bytes: Vec<u8> = colors.iter().flat_map(|c| [c.r, c.g, c.b]).collect();
    chunk(b"CMAP", &bytes)
}

fn camg(mode: u32) -> Vec<u8> {
    chunk(b"CAMG", &mode.to_be_bytes())
}

fn crng(rate: u16, flags: u16, low: u8, high: u8) -> Vec<u8> {
    let mut p = vec![0, 0];
    p.extend_from_slice(&rate.to_be_bytes());
    p.extend_from_slice(&flags.to_be_bytes());
    p.extend_from_slice(&[low, high]);
    chunk(b"CRNG", &p)
}

/// Pack per-pixel values into interleaved bitplanes, optionally followed by
/// a mask plane per row.
fn interleave(
    width: usize,
    planes: usize,
    rows: &[Vec<u32>],
    mask: Option<&[Vec<bool>]>,
) -> Vec<u8> {
    let pitch = width.div_ceil(16) * 2;
    let mut out = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        for p in 0..planes {
            let mut plane = vec![0u8; pitch];
            for (x, &v) in row.iter().enumerate() {
                if v & (1 << p) != 0 {
                    plane[x / 8] |= 0x80 >> (x % 8);
                }
            }
            out.extend_from_slice(&plane);
        }
        if let Some(mask) = mask {
            let mut plane = vec![0u8; pitch];
            for (x, &opaque) in mask[y].iter().enumerate() {
                if opaque {
                    plane[x / 8] |= 0x80 >> (x % 8);
                }
            }
            out.extend_from_slice(&plane);
        }
    }
    out
}

fn ramp(n: usize) -> Vec<RGBA8> {
    (0..n)
        .map(|i| RGBA8::new(i as u8, (i as u8).wrapping_mul(3), 255 - i as u8, 255))
        .collect()
}

#[test]
fn indexed_four_plane_image() {
    let palette = ramp(16);
    let rows = vec![(0..16u32).collect::<Vec<_>>(), (0..16u32).rev().collect()];
    let data = form(
        b"ILBM",
        &[
            Header::new(16, 2, 4).chunk(),
            cmap(&palette),
            chunk(b"BODY", &interleave(16, 4, &rows, None)),
        ],
    );
    let image = decode_image(&data, Unstoppable).unwrap();
    let px = image.as_pixels();
    for x in 0..16 {
        assert_eq!(px[x], palette[x]);
        assert_eq!(px[16 + x], palette[15 - x]);
    }
}

#[test]
fn odd_width_ignores_pad_columns() {
    let palette = ramp(2);
    // 17 pixels need 4 bytes per plane row; the pad bits are set but ignored.
    let body = [0xFF, 0xFF, 0xFF, 0xFF];
    let data = form(
        b"ILBM",
        &[Header::new(17, 1, 1).chunk(), cmap(&palette), chunk(b"BODY", &body)],
    );
    let image = decode_image(&data, Unstoppable).unwrap();
    assert_eq!(image.as_pixels().len(), 17);
    assert!(image.as_pixels().iter().all(|&p| p == palette[1]));
}

#[test]
fn index_past_palette_is_black() {
    let palette = [RGBA8::new(9, 9, 9, 255), RGBA8::new(200, 0, 0, 255)];
    let rows = vec![vec![0, 1, 2, 3]];
    let data = form(
        b"ILBM",
        &[
            Header::new(4, 1, 2).chunk(),
            cmap(&palette),
            chunk(b"BODY", &interleave(4, 2, &rows, None)),
        ],
    );
    let image = decode_image(&data, Unstoppable).unwrap();
    assert_eq!(
        image.as_pixels(),
        &[palette[0], palette[1], OPAQUE_BLACK, OPAQUE_BLACK]
    );
}

#[test]
fn byterun1_body() {
    let palette = [OPAQUE_BLACK, RGBA8::new(255, 255, 255, 255)];
    let mut header = Header::new(16, 2, 1);
    header.compression = 1;
    // Row 0: repeat 0xFF twice. Row 1: two literal bytes.
    let body = [0xFF, 0xFF, 0x01, 0x00, 0x0F];
    let data = form(
        b"ILBM",
        &[header.chunk(), cmap(&palette), chunk(b"BODY", &body)],
    );
    let image = decode_image(&data, Unstoppable).unwrap();
    let px = image.as_pixels();
    assert!(px[..16].iter().all(|&p| p == palette[1]));
    assert!(px[16..28].iter().all(|&p| p == palette[0]));
    assert!(px[28..].iter().all(|&p| p == palette[1]));
}

#[test]
fn truncated_byterun1_body_zero_fills() {
    let palette = [RGBA8::new(1, 2, 3, 255), RGBA8::new(255, 255, 255, 255)];
    let mut header = Header::new(16, 2, 1);
    header.compression = 1;
    let data = form(
        b"ILBM",
        &[header.chunk(), cmap(&palette), chunk(b"BODY", &[0xFF, 0xFF])],
    );
    let image = decode_image(&data, Unstoppable).unwrap();
    let px = image.as_pixels();
    assert!(px[..16].iter().all(|&p| p == palette[1]));
    assert!(px[16..].iter().all(|&p| p == palette[0]));
}

#[test]
fn extra_half_brite_doubles_palette() {
    let mut palette = ramp(32);
    palette[1] = RGBA8::new(200, 100, 50, 255);
    let rows = vec![vec![1, 33, 63]];
    let data = form(
        b"ILBM",
        &[
            Header::new(3, 1, 6).chunk(),
            cmap(&palette),
            camg(0x80),
            chunk(b"BODY", &interleave(3, 6, &rows, None)),
        ],
    );
    let file = decode(&data, Unstoppable).unwrap();
    assert!(file.display_mode().extended_half_bright);
    assert_eq!(file.palette().unwrap().len(), 64);
    // The chunk list keeps the stored map.
    assert!(file
        .chunks()
        .iter()
        .any(|c| matches!(c, Chunk::ColorMap(m) if m.len() == 32)));

    let px = file.image().unwrap().as_pixels();
    assert_eq!(px[0], RGBA8::new(200, 100, 50, 255));
    assert_eq!(px[1], RGBA8::new(100, 50, 25, 255));
    let last = palette[31];
    assert_eq!(px[2], RGBA8::new(last.r >> 1, last.g >> 1, last.b >> 1, 255));
}

#[test]
fn ham6_reconstructs_modified_channels() {
    let mut palette = ramp(16);
    palette[3] = RGBA8::new(0x10, 0x20, 0x30, 255);
    // base 3, modify red to 0x80, modify blue to 0xF0, modify green to 0x40
    let rows = vec![vec![3, (2 << 4) | 0x8, (1 << 4) | 0xF, (3 << 4) | 0x4]];
    let data = form(
        b"ILBM",
        &[
            Header::new(4, 1, 6).chunk(),
            cmap(&palette),
            camg(0x800),
            chunk(b"BODY", &interleave(4, 6, &rows, None)),
        ],
    );
    let image = decode_image(&data, Unstoppable).unwrap();
    assert_eq!(
        image.as_pixels(),
        &[
            RGBA8::new(0x10, 0x20, 0x30, 255),
            RGBA8::new(0x80, 0x20, 0x30, 255),
            RGBA8::new(0x80, 0x20, 0xF0, 255),
            RGBA8::new(0x80, 0x40, 0xF0, 255),
        ]
    );
}

#[test]
fn ham6_rows_start_from_black() {
    let palette = ramp(16);
    let rows = vec![vec![(2 << 4) | 0xF], vec![(1 << 4) | 0x1]];
    let data = form(
        b"ILBM",
        &[
            Header::new(1, 2, 6).chunk(),
            cmap(&palette),
            camg(0x800),
            chunk(b"BODY", &interleave(1, 6, &rows, None)),
        ],
    );
    let image = decode_image(&data, Unstoppable).unwrap();
    assert_eq!(
        image.as_pixels(),
        &[RGBA8::new(0xF0, 0, 0, 255), RGBA8::new(0, 0, 0x10, 255)]
    );
}

#[test]
fn ham6_with_oversized_palette_is_culled() {
    let palette = ramp(256);
    // Base colour 5; 0x15 would be an index in the stored 256-colour map but
    // is a blue modify code once the map is culled to 16 entries.
    let rows = vec![vec![5, (1 << 4) | 0x5]];
    let data = form(
        b"ILBM",
        &[
            Header::new(2, 1, 6).chunk(),
            cmap(&palette),
            camg(0x800),
            chunk(b"BODY", &interleave(2, 6, &rows, None)),
        ],
    );
    let file = decode(&data, Unstoppable).unwrap();
    let fixed = file.palette().unwrap();
    assert_eq!(fixed.len(), 16);
    assert_eq!(fixed.address_bits(), 4);

    let px = file.image().unwrap().as_pixels();
    assert_eq!(px[0], palette[5]);
    assert_eq!(px[1], RGBA8::new(palette[5].r, palette[5].g, 0x50, 255));
}

#[test]
fn ham8_uses_six_bit_values() {
    let palette = ramp(64);
    let rows = vec![vec![7, (2 << 6) | 0x3F]];
    let data = form(
        b"ILBM",
        &[
            Header::new(2, 1, 8).chunk(),
            cmap(&palette),
            camg(0x800),
            chunk(b"BODY", &interleave(2, 8, &rows, None)),
        ],
    );
    let px = decode_image(&data, Unstoppable).unwrap();
    let px = px.as_pixels();
    assert_eq!(px[0], palette[7]);
    assert_eq!(px[1], RGBA8::new(0xFC, palette[7].g, palette[7].b, 255));
}

#[test]
fn mask_plane_sets_alpha_when_requested() {
    let palette = [RGBA8::new(10, 10, 10, 255), RGBA8::new(250, 250, 250, 255)];
    let mut header = Header::new(4, 1, 1);
    header.masking = 1;
    let rows = vec![vec![1, 1, 0, 0]];
    let mask = vec![vec![true, false, true, false]];
    let data = form(
        b"ILBM",
        &[
            header.chunk(),
            cmap(&palette),
            chunk(b"BODY", &interleave(4, 1, &rows, Some(mask.as_slice()))),
        ],
    );

    let opaque = decode_image(&data, Unstoppable).unwrap();
    assert!(opaque.as_pixels().iter().all(|p| p.a == 255));
    assert_eq!(opaque.pixel(1, 0), Some(palette[1]));

    let keyed = DecodeRequest::new(&data)
        .with_transparency(true)
        .decode_image(Unstoppable)
        .unwrap();
    let alpha: Vec<u8> = keyed.as_pixels().iter().map(|p| p.a).collect();
    assert_eq!(alpha, [255, 0, 255, 0]);
    assert_eq!(keyed.pixel(0, 0), Some(palette[1]));
}

#[test]
fn transparent_colour_keys_alpha() {
    let palette = ramp(4);
    let mut header = Header::new(4, 1, 2);
    header.masking = 2;
    header.transparent = 2;
    let rows = vec![vec![0, 1, 2, 3]];
    let data = form(
        b"ILBM",
        &[
            header.chunk(),
            cmap(&palette),
            chunk(b"BODY", &interleave(4, 2, &rows, None)),
        ],
    );
    let file = decode(&data, Unstoppable).unwrap();
    assert_eq!(file.bitmap_header().unwrap().masking, Masking::HasTransparentColor);

    let keyed = DecodeRequest::new(&data)
        .with_transparency(true)
        .decode_image(Unstoppable)
        .unwrap();
    let alpha: Vec<u8> = keyed.as_pixels().iter().map(|p| p.a).collect();
    assert_eq!(alpha, [255, 255, 0, 255]);
}

#[test]
fn pbm_chunky_body() {
    let palette = ramp(256);
    let mut header = Header::new(3, 2, 8);
    header.compression = 1;
    // Rows are padded to 4 bytes; 0x03 = 4 literals, 0xFD = repeat 4 times.
    let body = [0x03, 200, 1, 2, 0xEE, 0xFD, 7];
    let data = form(
        b"PBM ",
        &[header.chunk(), cmap(&palette), chunk(b"BODY", &body)],
    );
    let file = decode(&data, Unstoppable).unwrap();
    assert_eq!(file.container().unwrap().format, FormatTag::Pbm);
    let px = file.image().unwrap().as_pixels();
    assert_eq!(
        px,
        &[palette[200], palette[1], palette[2], palette[7], palette[7], palette[7]]
    );
}

#[test]
fn deep_ilbm_needs_no_palette() {
    let colors = [0x12_34_56u32, 0xFF_00_80];
    // Planes 0-7 red, 8-15 green, 16-23 blue, each LSB first.
    let value = |c: u32| {
        let (r, g, b) = (c >> 16, (c >> 8) & 0xFF, c & 0xFF);
        r | (g << 8) | (b << 16)
    };
    let rows = vec![colors.iter().map(|&c| value(c)).collect::<Vec<_>>()];
    let data = form(
        b"ILBM",
        &[
            Header::new(2, 1, 24).chunk(),
            chunk(b"BODY", &interleave(2, 24, &rows, None)),
        ],
    );
    let image = decode_image(&data, Unstoppable).unwrap();
    assert_eq!(
        image.as_pixels(),
        &[RGBA8::new(0x12, 0x34, 0x56, 255), RGBA8::new(0xFF, 0x00, 0x80, 255)]
    );
}

#[test]
fn colour_ranges_are_extracted() {
    let palette = ramp(2);
    let data = form(
        b"ILBM",
        &[
            Header::new(8, 1, 1).chunk(),
            cmap(&palette),
            crng(0x4000, 1, 4, 12),
            crng(0, 1, 0, 3),
            crng(0x2000, 3, 20, 31),
            chunk(b"BODY", &[0, 0]),
        ],
    );
    let file = decode(&data, Unstoppable).unwrap();
    let ranges: Vec<ColorRange> = file.color_ranges().copied().collect();
    assert_eq!(
        ranges,
        [
            ColorRange {
                rate: 0x4000,
                active: true,
                reverse: false,
                low: 4,
                high: 12
            },
            ColorRange {
                rate: 0,
                active: false,
                reverse: false,
                low: 0,
                high: 3
            },
            ColorRange {
                rate: 0x2000,
                active: true,
                reverse: true,
                low: 20,
                high: 31
            },
        ]
    );
    assert!(file.diagnostics().is_empty());
}

#[test]
fn colour_map_may_precede_header() {
    let palette = [OPAQUE_BLACK, RGBA8::new(0, 255, 0, 255)];
    let data = form(
        b"ILBM",
        &[
            cmap(&palette),
            Header::new(8, 1, 1).chunk(),
            chunk(b"BODY", &[0xF0, 0]),
        ],
    );
    let image = decode_image(&data, Unstoppable).unwrap();
    assert_eq!(image.pixel(3, 0), Some(palette[1]));
    assert_eq!(image.pixel(4, 0), Some(palette[0]));
}

#[test]
fn missing_final_pad_byte_is_tolerated() {
    let palette = ramp(2);
    let mut data = form(
        b"ILBM",
        &[
            Header::new(8, 1, 1).chunk(),
            cmap(&palette),
            chunk(b"BODY", &[0x80, 0x00]),
            chunk(b"ANNO", b"abc"),
        ],
    );
    data.pop();
    let file = decode(&data, Unstoppable).unwrap();
    assert_eq!(file.chunks().len(), 4);
    assert_eq!(file.image().unwrap().pixel(0, 0), Some(palette[1]));
}

#[test]
fn image_info_matches_decode() {
    let mut header = Header::new(40, 3, 5);
    header.compression = 1;
    let data = form(
        b"ILBM",
        &[header.chunk(), cmap(&ramp(32)), camg(0x80), chunk(b"BODY", &[])],
    );
    let info = ImageInfo::from_bytes(&data).unwrap();
    assert_eq!((info.width, info.height, info.plane_count), (40, 3, 5));
    assert!(info.mode.extended_half_bright);

    let image = decode_image(&data, Unstoppable).unwrap();
    assert_eq!((image.width, image.height), (info.width, info.height));
}

#[cfg(feature = "imgref")]
#[test]
fn imgref_view() {
    let palette = ramp(2);
    let data = form(
        b"ILBM",
        &[Header::new(8, 2, 1).chunk(), cmap(&palette), chunk(b"BODY", &[0x01, 0, 0x80, 0])],
    );
    let image = decode_image(&data, Unstoppable).unwrap();
    let view = image.as_imgref();
    assert_eq!((view.width(), view.height()), (8, 2));
    assert_eq!(view.buf()[7], palette[1]);
    assert_eq!(image.to_imgvec().buf()[8], palette[1]);
}
