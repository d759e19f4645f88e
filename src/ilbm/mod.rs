//! ILBM / PBM chunk decoders and the decode session that ties them together.
//!
//! The individual stages (ByteRun1 unpacking, planar conversion, palette
//! fix-up, HAM composition) are exported for callers that want to run them
//! on their own data.

mod bmhd;
mod body;
mod camg;
mod cmap;
mod compose;
mod crng;
mod palette;
mod planar;
mod rle;

pub use bmhd::{BitmapHeader, Compression, Masking, pitch_for_width};
pub use camg::DisplayMode;
pub use cmap::{ColorMap, address_bits_for};
pub use compose::{compose_indexed, hold_and_modify};
pub use crng::ColorRange;
pub use palette::{extend_half_bright, fix_palette, reduce_ham_palette};
pub use planar::{mask_plane, pbm_rows_to_chunky, planar_to_chunky, planar_to_rgb24};
pub use rle::{unpack_byterun1, unpack_byterun1_into};

use alloc::vec::Vec;

use enough::Stop;

use crate::cursor::ByteCursor;
use crate::decode::DecodedImage;
use crate::error::IlbmError;
use crate::iff::{ChunkId, Chunks, ContainerHeader, FormatTag, RawChunk};
use crate::limits::Limits;

/// One decoded chunk, in file order.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Chunk {
    BitmapHeader(BitmapHeader),
    /// The colour map as stored, before any EHB/HAM fix-up.
    ColorMap(ColorMap),
    DisplayMode(DisplayMode),
    ColorRange(ColorRange),
    Body(DecodedImage),
    /// A chunk type this decoder does not interpret.
    Skipped { id: ChunkId, length: u32 },
}

/// A recoverable anomaly found while decoding.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// The input is not an ILBM/PBM `FORM`; nothing was decoded.
    NotAContainer,
    /// A chunk was skipped without decoding.
    UnsupportedChunk {
        id: ChunkId,
        length: u32,
        offset: usize,
    },
}

/// Everything decoded from one IFF file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IlbmFile {
    container: Option<ContainerHeader>,
    chunks: Vec<Chunk>,
    palette: Option<ColorMap>,
    mode: DisplayMode,
    diagnostics: Vec<Diagnostic>,
}

impl IlbmFile {
    /// The `FORM` header, or `None` when the input was not a container.
    pub fn container(&self) -> Option<&ContainerHeader> {
        self.container.as_ref()
    }

    pub fn is_container(&self) -> bool {
        self.container.is_some()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The last `BMHD` seen.
    pub fn bitmap_header(&self) -> Option<&BitmapHeader> {
        self.chunks.iter().rev().find_map(|c| match c {
            Chunk::BitmapHeader(h) => Some(h),
            _ => None,
        })
    }

    /// The palette in effect after decoding, including EHB/HAM fix-up when a
    /// `BODY` was decoded.
    pub fn palette(&self) -> Option<&ColorMap> {
        self.palette.as_ref()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn color_ranges(&self) -> impl Iterator<Item = &ColorRange> {
        self.chunks.iter().filter_map(|c| match c {
            Chunk::ColorRange(r) => Some(r),
            _ => None,
        })
    }

    /// The first decoded image.
    pub fn image(&self) -> Option<&DecodedImage> {
        self.chunks.iter().find_map(|c| match c {
            Chunk::Body(img) => Some(img),
            _ => None,
        })
    }

    /// Take the first decoded image.
    pub fn into_image(self) -> Option<DecodedImage> {
        self.chunks.into_iter().find_map(|c| match c {
            Chunk::Body(img) => Some(img),
            _ => None,
        })
    }
}

/// Per-request settings threaded through a session.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DecodeOptions<'a> {
    pub limits: Option<&'a Limits>,
    /// Apply `BMHD` masking (mask plane or transparent colour) to alpha.
    pub transparency: bool,
    /// Stop at the first `BODY` without decoding it.
    pub headers_only: bool,
}

/// Mutable state shared by the chunk decoders of one file.
pub(crate) struct DecodeSession<'a> {
    pub format: FormatTag,
    pub header: Option<BitmapHeader>,
    pub palette: Option<ColorMap>,
    /// Whether `palette` already went through EHB/HAM fix-up.
    pub palette_fixed: bool,
    pub mode: DisplayMode,
    pub options: &'a DecodeOptions<'a>,
    pub stop: &'a dyn Stop,
}

impl<'a> DecodeSession<'a> {
    fn new(format: FormatTag, options: &'a DecodeOptions<'a>, stop: &'a dyn Stop) -> Self {
        Self {
            format,
            header: None,
            palette: None,
            palette_fixed: false,
            mode: DisplayMode::default(),
            options,
            stop,
        }
    }

    /// The palette after mode fix-up, fixing it on first use.
    pub(crate) fn fixed_palette(&mut self, plane_count: u8) -> Result<&ColorMap, IlbmError> {
        let palette = self.palette.take().ok_or(IlbmError::MissingDependency {
            chunk: ChunkId::BODY,
            requires: ChunkId::CMAP,
        })?;
        let palette = if self.palette_fixed {
            palette
        } else {
            self.palette_fixed = true;
            fix_palette(&palette, self.mode, plane_count)
        };
        Ok(self.palette.insert(palette))
    }

    fn dispatch(&mut self, chunk: RawChunk<'_>) -> Result<Chunk, IlbmError> {
        tracing::debug!(id = %chunk.id, length = chunk.payload.len(), "decoding chunk");
        Ok(match chunk.id {
            ChunkId::BMHD => {
                let header = BitmapHeader::read(chunk.payload)?;
                self.header = Some(header);
                Chunk::BitmapHeader(header)
            }
            ChunkId::CMAP => {
                let palette = ColorMap::read(chunk.payload);
                self.palette = Some(palette.clone());
                self.palette_fixed = false;
                Chunk::ColorMap(palette)
            }
            ChunkId::CAMG => {
                let mode = DisplayMode::read(chunk.payload)?;
                self.mode = mode;
                Chunk::DisplayMode(mode)
            }
            ChunkId::CRNG => Chunk::ColorRange(ColorRange::read(chunk.payload)?),
            ChunkId::BODY => Chunk::Body(body::decode_body(self, chunk.payload)?),
            id => Chunk::Skipped {
                id,
                length: chunk.declared_length(),
            },
        })
    }
}

/// Decode a whole IFF file.
pub(crate) fn decode_file(
    data: &[u8],
    options: &DecodeOptions<'_>,
    stop: &dyn Stop,
) -> Result<IlbmFile, IlbmError> {
    let mut cursor = ByteCursor::new(data);
    let Some(container) = ContainerHeader::read(&mut cursor) else {
        tracing::warn!(len = data.len(), "input is not an ILBM/PBM FORM, nothing decoded");
        return Ok(IlbmFile {
            container: None,
            chunks: Vec::new(),
            palette: None,
            mode: DisplayMode::default(),
            diagnostics: alloc::vec![Diagnostic::NotAContainer],
        });
    };

    let mut session = DecodeSession::new(container.format, options, stop);
    let mut chunks = Vec::new();
    let mut diagnostics = Vec::new();

    for raw in Chunks::new(&mut cursor) {
        let raw = raw?;
        if options.headers_only && raw.id == ChunkId::BODY {
            break;
        }
        let chunk = session.dispatch(raw)?;
        if let Chunk::Skipped { id, length } = chunk {
            tracing::warn!(id = %id, length, offset = raw.offset, "skipping unsupported chunk");
            diagnostics.push(Diagnostic::UnsupportedChunk {
                id,
                length,
                offset: raw.offset,
            });
        }
        chunks.push(chunk);
    }

    Ok(IlbmFile {
        container: Some(container),
        chunks,
        palette: session.palette,
        mode: session.mode,
        diagnostics,
    })
}
