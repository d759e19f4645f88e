//! Bitplane to chunky conversion.
//!
//! ILBM scanlines store each plane as a `pitch`-byte run, planes in order,
//! followed by the mask plane when `masking == HasMask`:
//!
//! ```text
//! row y: [plane 0: pitch bytes][plane 1: pitch bytes]...[mask: pitch bytes]
//! ```

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use super::bmhd::{BitmapHeader, Masking};
use crate::error::IlbmError;
use crate::iff::ChunkId;

/// `a * b`, or `DimensionsTooLarge` for `header` when it overflows `usize`.
fn area(a: usize, b: usize, header: &BitmapHeader) -> Result<usize, IlbmError> {
    a.checked_mul(b).ok_or(IlbmError::DimensionsTooLarge {
        width: u32::from(header.width),
        height: u32::from(header.height),
    })
}

/// Number of bytes a BODY must decode to for this header.
pub(crate) fn planar_body_len(header: &BitmapHeader) -> Result<usize, IlbmError> {
    let row_stride = area(header.pitch(), header.stored_planes(), header)?;
    area(row_stride, header.height as usize, header)
}

fn check_len(bitplanes: &[u8], needed: usize) -> Result<(), IlbmError> {
    if bitplanes.len() < needed {
        return Err(IlbmError::malformed(
            ChunkId::BODY,
            alloc::format!("{} bytes of bitplane data, need {needed}", bitplanes.len()),
        ));
    }
    Ok(())
}

/// OR the set bits of one plane row into `row_out` as `bit`.
#[inline]
fn scatter_plane_row<T>(plane_row: &[u8], row_out: &mut [T], bit: T)
where
    T: Copy + core::ops::BitOrAssign,
{
    let width = row_out.len();
    for (i, &byte) in plane_row.iter().enumerate() {
        if byte == 0 {
            continue;
        }
        for b in 0..8 {
            if byte & (0x80 >> b) != 0 {
                let x = i * 8 + b;
                if x < width {
                    row_out[x] |= bit;
                }
            }
        }
    }
}

/// Convert interleaved bitplanes to one palette index (or HAM code) per pixel.
///
/// Supports up to 8 colour planes. Plane `p` contributes bit `1 << p`.
pub fn planar_to_chunky(
    bitplanes: &[u8],
    header: &BitmapHeader,
    stop: &dyn Stop,
) -> Result<Vec<u8>, IlbmError> {
    if header.plane_count > 8 {
        return Err(IlbmError::UnsupportedPlaneCount(header.plane_count));
    }
    let width = header.width as usize;
    let height = header.height as usize;
    let pitch = header.pitch();
    let row_stride = pitch * header.stored_planes();
    let mut chunky = vec![0u8; area(width, height, header)?];
    if width == 0 || row_stride == 0 {
        return Ok(chunky);
    }
    check_len(bitplanes, area(row_stride, height, header)?)?;

    for (y, (row_out, row_in)) in chunky
        .chunks_exact_mut(width)
        .zip(bitplanes.chunks_exact(row_stride))
        .enumerate()
    {
        if y % 16 == 0 {
            stop.check()?;
        }
        for p in 0..header.plane_count as usize {
            scatter_plane_row(&row_in[p * pitch..(p + 1) * pitch], row_out, 1u8 << p);
        }
    }

    Ok(chunky)
}

/// Extract the mask plane as one byte per pixel (1 = opaque, 0 = background).
///
/// Returns `None` unless the header declares `Masking::HasMask`.
pub fn mask_plane(
    bitplanes: &[u8],
    header: &BitmapHeader,
) -> Result<Option<Vec<u8>>, IlbmError> {
    if header.masking != Masking::HasMask {
        return Ok(None);
    }
    let width = header.width as usize;
    let height = header.height as usize;
    let pitch = header.pitch();
    let row_stride = pitch * header.stored_planes();
    let mut mask = vec![0u8; area(width, height, header)?];
    if width == 0 {
        return Ok(Some(mask));
    }
    check_len(bitplanes, area(row_stride, height, header)?)?;

    let offset = header.plane_count as usize * pitch;
    for (row_out, row_in) in mask
        .chunks_exact_mut(width)
        .zip(bitplanes.chunks_exact(row_stride))
    {
        scatter_plane_row(&row_in[offset..offset + pitch], row_out, 1u8);
    }
    Ok(Some(mask))
}

/// Convert a 24-plane "deep" ILBM straight to RGBA8 bytes.
///
/// Planes 0-7 hold red (LSB first), 8-15 green, 16-23 blue.
pub fn planar_to_rgb24(
    bitplanes: &[u8],
    header: &BitmapHeader,
    stop: &dyn Stop,
) -> Result<Vec<u8>, IlbmError> {
    if header.plane_count != 24 {
        return Err(IlbmError::UnsupportedPlaneCount(header.plane_count));
    }
    let width = header.width as usize;
    let height = header.height as usize;
    let pitch = header.pitch();
    let row_stride = pitch * header.stored_planes();
    let mut rgba = vec![0u8; area(area(width, height, header)?, 4, header)?];
    if width == 0 {
        return Ok(rgba);
    }
    check_len(bitplanes, area(row_stride, height, header)?)?;

    let mut row_acc = vec![0u32; width];
    for (y, (row_out, row_in)) in rgba
        .chunks_exact_mut(width * 4)
        .zip(bitplanes.chunks_exact(row_stride))
        .enumerate()
    {
        if y % 16 == 0 {
            stop.check()?;
        }
        row_acc.fill(0);
        for p in 0..24 {
            scatter_plane_row(&row_in[p * pitch..(p + 1) * pitch], &mut row_acc, 1u32 << p);
        }
        for (px, &v) in row_out.chunks_exact_mut(4).zip(row_acc.iter()) {
            px.copy_from_slice(&[v as u8, (v >> 8) as u8, (v >> 16) as u8, 255]);
        }
    }
    Ok(rgba)
}

/// Byte width of one `PBM ` body row: `width` rounded up to even.
pub(crate) fn pbm_row_bytes(header: &BitmapHeader) -> usize {
    (header.width as usize + 1) & !1
}

/// Number of bytes a `PBM ` BODY must decode to for this header.
pub(crate) fn pbm_body_len(header: &BitmapHeader) -> Result<usize, IlbmError> {
    area(pbm_row_bytes(header), header.height as usize, header)
}

/// Strip row padding from a `PBM ` body, which is already one byte per pixel.
pub fn pbm_rows_to_chunky(body: &[u8], header: &BitmapHeader) -> Result<Vec<u8>, IlbmError> {
    if header.plane_count != 8 {
        return Err(IlbmError::UnsupportedPlaneCount(header.plane_count));
    }
    let width = header.width as usize;
    let height = header.height as usize;
    let row_bytes = pbm_row_bytes(header);
    if width == 0 {
        return Ok(Vec::new());
    }
    check_len(body, pbm_body_len(header)?)?;

    let mut chunky = Vec::with_capacity(area(width, height, header)?);
    for row in body.chunks_exact(row_bytes).take(height) {
        chunky.extend_from_slice(&row[..width]);
    }
    Ok(chunky)
}
