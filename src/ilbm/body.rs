//! `BODY` pipeline: decompress → planar to chunky → palette fix-up → compose.

use alloc::borrow::Cow;

use super::DecodeSession;
use super::bmhd::{Compression, Masking};
use super::compose::{apply_mask, compose_indexed, key_transparent_color};
use super::planar::{
    mask_plane, pbm_body_len, pbm_rows_to_chunky, planar_body_len, planar_to_chunky,
    planar_to_rgb24,
};
use super::rle::unpack_byterun1;
use crate::decode::DecodedImage;
use crate::error::IlbmError;
use crate::iff::{ChunkId, FormatTag};

/// Plane count of a true-colour ("deep") ILBM.
const DEEP_PLANES: u8 = 24;

pub(crate) fn decode_body(
    session: &mut DecodeSession<'_>,
    payload: &[u8],
) -> Result<DecodedImage, IlbmError> {
    let header = session.header.ok_or(IlbmError::MissingDependency {
        chunk: ChunkId::BODY,
        requires: ChunkId::BMHD,
    })?;
    let stop = session.stop;
    let mode = session.mode;
    let transparency = session.options.transparency;
    let format = session.format;
    let width = u32::from(header.width);
    let height = u32::from(header.height);

    let deep = format == FormatTag::Ilbm && header.plane_count == DEEP_PLANES;
    if header.plane_count > 8 && !deep {
        return Err(IlbmError::UnsupportedPlaneCount(header.plane_count));
    }

    let expected = match format {
        FormatTag::Ilbm => planar_body_len(&header)?,
        FormatTag::Pbm => pbm_body_len(&header)?,
    };
    let out_bytes = (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(4))
        .ok_or(IlbmError::DimensionsTooLarge { width, height })?;
    if let Some(limits) = session.options.limits {
        limits.check(width, height)?;
        limits.check_memory(expected)?;
        limits.check_memory(out_bytes)?;
    }
    stop.check()?;

    let data: Cow<'_, [u8]> = match header.compression {
        Compression::None if payload.len() >= expected => Cow::Borrowed(payload),
        Compression::None => {
            // Short raw bodies read as zero past the end, like an exhausted ByteRun1 stream.
            let mut padded = payload.to_vec();
            padded.resize(expected, 0);
            Cow::Owned(padded)
        }
        Compression::ByteRun1 => Cow::Owned(unpack_byterun1(payload, expected, stop)?),
        other => return Err(IlbmError::UnsupportedCompression(other.to_u8())),
    };
    tracing::trace!(
        payload = payload.len(),
        expected,
        compression = ?header.compression,
        "BODY bitplanes ready"
    );

    if deep {
        let mut rgba = planar_to_rgb24(&data, &header, stop)?;
        if transparency {
            if let Some(mask) = mask_plane(&data, &header)? {
                apply_mask(&mut rgba, &mask);
            }
        }
        return Ok(DecodedImage::new(rgba, width, height));
    }

    let indices = match format {
        FormatTag::Ilbm => planar_to_chunky(&data, &header, stop)?,
        FormatTag::Pbm => pbm_rows_to_chunky(&data, &header)?,
    };
    let palette = session.fixed_palette(header.plane_count)?;
    let mut rgba = compose_indexed(&indices, width as usize, palette, mode, stop)?;

    if transparency {
        match header.masking {
            Masking::HasTransparentColor if !mode.hold_and_modify => {
                key_transparent_color(&mut rgba, &indices, header.transparent_color);
            }
            Masking::HasMask if format == FormatTag::Ilbm => {
                if let Some(mask) = mask_plane(&data, &header)? {
                    apply_mask(&mut rgba, &mask);
                }
            }
            _ => {}
        }
    }

    Ok(DecodedImage::new(rgba, width, height))
}
