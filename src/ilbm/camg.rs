//! `CAMG` Amiga display mode.

use crate::cursor::ByteCursor;
use crate::error::IlbmError;
use crate::iff::ChunkId;

const HAM_FLAG: u32 = 0x800;
const EHB_FLAG: u32 = 0x80;

/// Display-mode flags relevant to decoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DisplayMode {
    pub hold_and_modify: bool,
    pub extended_half_bright: bool,
}

impl DisplayMode {
    pub fn from_mode_word(mode: u32) -> Self {
        Self {
            hold_and_modify: mode & HAM_FLAG != 0,
            extended_half_bright: mode & EHB_FLAG != 0,
        }
    }

    pub(crate) fn read(payload: &[u8]) -> Result<Self, IlbmError> {
        let mode = ByteCursor::new(payload)
            .read_u32_be()
            .map_err(|_| IlbmError::malformed(ChunkId::CAMG, "mode word needs 4 bytes"))?;
        Ok(Self::from_mode_word(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_leading_mode_word() {
        let mode = DisplayMode::read(&[0, 0, 0x08, 0x00, 0xFF, 0xFF]).unwrap();
        assert!(mode.hold_and_modify);
        assert!(!mode.extended_half_bright);
    }

    #[test]
    fn short_payload_is_malformed() {
        assert!(matches!(
            DisplayMode::read(&[0, 0, 0x80]),
            Err(IlbmError::MalformedChunk { id: ChunkId::CAMG, .. })
        ));
    }
}
