use alloc::string::String;
use enough::StopReason;

use crate::iff::ChunkId;

/// Errors from ILBM/PBM decoding.
///
/// Recoverable container-level anomalies (non-IFF input, unsupported chunk
/// types) are not errors; they are reported as
/// [`Diagnostic`](crate::ilbm::Diagnostic)s on the decoded file.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum IlbmError {
    #[error("input is not an IFF ILBM/PBM container")]
    NotAContainer,

    #[error("malformed {id} chunk: {reason}")]
    MalformedChunk { id: ChunkId, reason: String },

    #[error("unexpected end of input at offset {offset} (needed {needed} more bytes)")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("unsupported compression mode {0}")]
    UnsupportedCompression(u8),

    #[error("unsupported bitplane count {0}")]
    UnsupportedPlaneCount(u8),

    #[error("{chunk} chunk requires a preceding {requires} chunk")]
    MissingDependency { chunk: ChunkId, requires: ChunkId },

    #[error("container has no {0} chunk")]
    MissingChunk(ChunkId),

    #[error("reserved ByteRun1 control byte -128 at offset {offset}")]
    ReservedOpcode { offset: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for IlbmError {
    fn from(r: StopReason) -> Self {
        IlbmError::Cancelled(r)
    }
}

impl IlbmError {
    pub(crate) fn malformed(id: ChunkId, reason: impl Into<String>) -> Self {
        IlbmError::MalformedChunk {
            id,
            reason: reason.into(),
        }
    }
}
