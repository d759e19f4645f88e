use enough::Unstoppable;

use crate::error::IlbmError;
use crate::iff::{ChunkId, FormatTag};
use crate::ilbm::{self, BitmapHeader, Compression, DecodeOptions, DisplayMode, Masking};

/// Image properties read from the chunks before `BODY`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub plane_count: u8,
    pub format: FormatTag,
    pub compression: Compression,
    pub masking: Masking,
    pub mode: DisplayMode,
}

impl ImageInfo {
    /// Probe an ILBM/PBM file without decoding pixel data.
    pub fn from_bytes(data: &[u8]) -> Result<Self, IlbmError> {
        let options = DecodeOptions {
            headers_only: true,
            ..DecodeOptions::default()
        };
        let file = ilbm::decode_file(data, &options, &Unstoppable)?;
        let container = file.container().ok_or(IlbmError::NotAContainer)?;
        let header: &BitmapHeader = file
            .bitmap_header()
            .ok_or(IlbmError::MissingChunk(ChunkId::BMHD))?;
        Ok(Self {
            width: u32::from(header.width),
            height: u32::from(header.height),
            plane_count: header.plane_count,
            format: container.format,
            compression: header.compression,
            masking: header.masking,
            mode: file.display_mode(),
        })
    }
}
