//! `BMHD` bitmap header.

use crate::cursor::ByteCursor;
use crate::error::IlbmError;
use crate::iff::ChunkId;

/// How the `BODY` encodes transparency.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Masking {
    None,
    /// An extra mask plane follows the colour planes of every scanline.
    HasMask,
    /// Pixels equal to `transparent_color` are background.
    HasTransparentColor,
    /// MacPaint-style lasso; rendered as `None`.
    Lasso,
    /// Any other value found in the header.
    Other(u8),
}

impl From<u8> for Masking {
    fn from(v: u8) -> Self {
        match v {
            0 => Self::None,
            1 => Self::HasMask,
            2 => Self::HasTransparentColor,
            3 => Self::Lasso,
            other => Self::Other(other),
        }
    }
}

/// `BODY` compression scheme.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compression {
    None,
    /// Packbits-style run-length coding.
    ByteRun1,
    /// Atari vertical RLE (`VDAT`). Detected but not decoded.
    VerticalRle,
    Other(u8),
}

impl From<u8> for Compression {
    fn from(v: u8) -> Self {
        match v {
            0 => Self::None,
            1 => Self::ByteRun1,
            2 => Self::VerticalRle,
            other => Self::Other(other),
        }
    }
}

impl Compression {
    pub(crate) fn to_u8(self) -> u8 {
        match self {
            Self::None => 0,
            Self::ByteRun1 => 1,
            Self::VerticalRle => 2,
            Self::Other(v) => v,
        }
    }
}

/// Parsed `BMHD` chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapHeader {
    pub width: u16,
    pub height: u16,
    pub x: i16,
    pub y: i16,
    pub plane_count: u8,
    pub masking: Masking,
    pub compression: Compression,
    pub transparent_color: u16,
    pub x_aspect: u8,
    pub y_aspect: u8,
    pub page_width: i16,
    pub page_height: i16,
}

/// Byte width of one bitplane row: `width` rounded up to a 16-bit word.
pub fn pitch_for_width(width: u16) -> usize {
    (width as usize).div_ceil(16) * 2
}

impl BitmapHeader {
    pub const SIZE: usize = 20;

    pub(crate) fn read(payload: &[u8]) -> Result<Self, IlbmError> {
        if payload.len() < Self::SIZE {
            return Err(IlbmError::malformed(
                ChunkId::BMHD,
                alloc::format!("{} bytes, need {}", payload.len(), Self::SIZE),
            ));
        }
        let mut c = ByteCursor::new(payload);
        let width = c.read_u16_be()?;
        let height = c.read_u16_be()?;
        let x = c.read_i16_be()?;
        let y = c.read_i16_be()?;
        let plane_count = c.read_u8()?;
        let masking = Masking::from(c.read_u8()?);
        let compression = Compression::from(c.read_u8()?);
        let _pad1 = c.read_u8()?;
        let transparent_color = c.read_u16_be()?;
        let x_aspect = c.read_u8()?;
        let y_aspect = c.read_u8()?;
        let page_width = c.read_i16_be()?;
        let page_height = c.read_i16_be()?;

        Ok(Self {
            width,
            height,
            x,
            y,
            plane_count,
            masking,
            compression,
            transparent_color,
            x_aspect,
            y_aspect,
            page_width,
            page_height,
        })
    }

    /// Byte width of one bitplane row, word-aligned.
    pub fn pitch(&self) -> usize {
        pitch_for_width(self.width)
    }

    /// Planes physically stored per scanline, including the mask plane.
    pub fn stored_planes(&self) -> usize {
        self.plane_count as usize + usize::from(self.masking == Masking::HasMask)
    }
}
