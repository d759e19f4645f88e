//! # zenilbm
//!
//! Decoder for IFF `ILBM` and `PBM ` images, the interleaved-bitmap format of
//! Amiga paint programs (Deluxe Paint and friends).
//!
//! ## Supported
//!
//! - `ILBM` with 1-8 bitplanes, uncompressed or ByteRun1 (packbits)
//! - Extended-Half-Bright (EHB) palette expansion
//! - Hold-And-Modify (HAM6, HAM8) colour reconstruction, including culling of
//!   oversized HAM colour maps
//! - 24-plane "deep" ILBM (true colour, no palette)
//! - `PBM ` chunky 8-bit bodies
//! - Mask planes and transparent colour keys (opt-in, see
//!   [`DecodeRequest::with_transparency`])
//! - `CRNG` colour ranges, extracted for the caller
//!
//! ## Non-Goals
//!
//! - Encoding
//! - Atari vertical RLE (detected, reported as
//!   [`IlbmError::UnsupportedCompression`])
//! - Colour cycling playback
//! - Chunks other than `BMHD`, `CMAP`, `CAMG`, `BODY`, `CRNG` (skipped and
//!   reported as [`ilbm::Diagnostic::UnsupportedChunk`])
//!
//! ## Leniency
//!
//! Input that is not an ILBM/PBM `FORM` decodes to an empty [`IlbmFile`]
//! carrying [`ilbm::Diagnostic::NotAContainer`]. Corrupt containers (chunks
//! running past the end of input, reserved ByteRun1 opcodes, `BODY` before
//! `BMHD`) fail with an [`IlbmError`]; no partial image is returned.
//!
//! ## Usage
//!
//! ```no_run
//! use zenilbm::{ImageInfo, Unstoppable};
//!
//! let data: &[u8] = &[]; // your ILBM bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {} planes, HAM: {}", info.width, info.height,
//!          info.plane_count, info.mode.hold_and_modify);
//!
//! // Decode to RGBA8
//! let image = zenilbm::decode_image(data, Unstoppable)?;
//! assert_eq!(image.pixels().len(), image.width as usize * image.height as usize * 4);
//! # Ok::<(), zenilbm::IlbmError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod cursor;
mod decode;
mod error;
mod iff;
mod info;
mod limits;

pub mod ilbm;

// Re-exports
pub use decode::{DecodeRequest, DecodedImage};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::IlbmError;
pub use iff::{ChunkId, ContainerHeader, FormatTag};
pub use ilbm::IlbmFile;
pub use info::ImageInfo;
pub use limits::Limits;
pub use rgb::RGBA8;

/// Decode all chunks of an ILBM/PBM file.
///
/// Non-IFF input yields an empty [`IlbmFile`] rather than an error.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<IlbmFile, IlbmError> {
    DecodeRequest::new(data).decode(stop)
}

/// Decode the first image of an ILBM/PBM file to RGBA8.
///
/// Fails with [`IlbmError::NotAContainer`] for non-IFF input and
/// [`IlbmError::MissingChunk`] when there is no `BODY`.
pub fn decode_image(data: &[u8], stop: impl Stop) -> Result<DecodedImage, IlbmError> {
    DecodeRequest::new(data).decode_image(stop)
}
