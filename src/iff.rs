//! IFF 85 container framing: `FORM` header and the chunk iterator.
//!
//! A chunk is a four-byte tag, a big-endian u32 length, the payload, and one
//! pad byte when the length is odd. Chunk decoders only ever see their own
//! payload slice, so a decoder that reads less than the declared length
//! leaves the remainder skipped.

use core::fmt;

use crate::cursor::ByteCursor;
use crate::error::IlbmError;

/// A four-character IFF chunk or form identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(pub [u8; 4]);

impl ChunkId {
    pub const FORM: ChunkId = ChunkId(*b"FORM");
    pub const ILBM: ChunkId = ChunkId(*b"ILBM");
    pub const PBM: ChunkId = ChunkId(*b"PBM ");
    pub const BMHD: ChunkId = ChunkId(*b"BMHD");
    pub const CMAP: ChunkId = ChunkId(*b"CMAP");
    pub const CAMG: ChunkId = ChunkId(*b"CAMG");
    pub const BODY: ChunkId = ChunkId(*b"BODY");
    pub const CRNG: ChunkId = ChunkId(*b"CRNG");
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkId(\"{self}\")")
    }
}

/// Form type of the outer `FORM` container.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatTag {
    /// `ILBM`: interleaved bitplanes.
    Ilbm,
    /// `PBM `: chunky 8-bit rows (Deluxe Paint PC).
    Pbm,
}

impl FormatTag {
    fn from_id(id: ChunkId) -> Option<Self> {
        match id {
            ChunkId::ILBM => Some(Self::Ilbm),
            ChunkId::PBM => Some(Self::Pbm),
            _ => None,
        }
    }
}

/// The 12-byte `FORM` header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerHeader {
    pub format: FormatTag,
    /// Length field of the `FORM` chunk. Not validated against the input size.
    pub declared_length: u32,
}

/// Smallest input that can hold a `FORM` header plus anything after it.
const MIN_CONTAINER_LEN: usize = 12;

impl ContainerHeader {
    /// Read the container header.
    ///
    /// Returns `None` for anything that is not an ILBM or PBM form; callers
    /// treat that as an empty decode.
    pub(crate) fn read(cursor: &mut ByteCursor<'_>) -> Option<Self> {
        if cursor.len() <= MIN_CONTAINER_LEN {
            return None;
        }
        if ChunkId(cursor.read_tag().ok()?) != ChunkId::FORM {
            return None;
        }
        let declared_length = cursor.read_u32_be().ok()?;
        let format = FormatTag::from_id(ChunkId(cursor.read_tag().ok()?))?;
        Some(Self {
            format,
            declared_length,
        })
    }
}

/// One framed chunk borrowed from the input.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RawChunk<'a> {
    pub id: ChunkId,
    /// Offset of the chunk tag within the input.
    pub offset: usize,
    pub payload: &'a [u8],
}

impl RawChunk<'_> {
    pub(crate) fn declared_length(&self) -> u32 {
        self.payload.len() as u32
    }
}

/// Iterator over the sibling chunks following a `FORM` header.
///
/// Yields an error and then stops if a chunk's declared span runs past the
/// end of the input.
pub(crate) struct Chunks<'a, 'c> {
    cursor: &'c mut ByteCursor<'a>,
    failed: bool,
}

impl<'a, 'c> Chunks<'a, 'c> {
    pub(crate) fn new(cursor: &'c mut ByteCursor<'a>) -> Self {
        Self {
            cursor,
            failed: false,
        }
    }

    fn next_chunk(&mut self) -> Result<RawChunk<'a>, IlbmError> {
        let offset = self.cursor.position();
        let Ok(tag) = self.cursor.read_tag() else {
            // Fewer than four bytes left: name the chunk after what is there.
            let mut tag = [0u8; 4];
            let rest = self.cursor.read_bytes(self.cursor.remaining())?;
            tag[..rest.len()].copy_from_slice(rest);
            return Err(IlbmError::malformed(ChunkId(tag), "truncated chunk header"));
        };
        let id = ChunkId(tag);
        let length = self
            .cursor
            .read_u32_be()
            .map_err(|_| IlbmError::malformed(id, "truncated chunk length"))?;
        let payload = self.cursor.read_bytes(length as usize).map_err(|_| {
            IlbmError::malformed(
                id,
                alloc::format!(
                    "declared length {length} exceeds the {} bytes remaining",
                    self.cursor.remaining()
                ),
            )
        })?;
        // A writer may drop the final pad byte at the very end of the file.
        if length % 2 == 1 && !self.cursor.eof() {
            self.cursor.skip(1)?;
        }
        Ok(RawChunk {
            id,
            offset,
            payload,
        })
    }
}

impl<'a> Iterator for Chunks<'a, '_> {
    type Item = Result<RawChunk<'a>, IlbmError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor.eof() {
            return None;
        }
        let chunk = self.next_chunk();
        self.failed = chunk.is_err();
        Some(chunk)
    }
}
