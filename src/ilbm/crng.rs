//! `CRNG` colour range (Deluxe Paint colour cycling hint).

use crate::cursor::ByteCursor;
use crate::error::IlbmError;
use crate::iff::ChunkId;

const FLAG_ACTIVE: u16 = 0x1;
const FLAG_REVERSE: u16 = 0x2;

/// One colour-cycling range. Extracted for the caller; the decoder never applies it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorRange {
    /// Steps per second scaled so that 16384 means 60 steps/s.
    pub rate: u16,
    /// Cycling enabled: the flag bit is set and the rate is non-zero.
    pub active: bool,
    /// Colours move towards lower indices.
    pub reverse: bool,
    pub low: u8,
    pub high: u8,
}

impl ColorRange {
    pub const SIZE: usize = 8;

    pub(crate) fn read(payload: &[u8]) -> Result<Self, IlbmError> {
        if payload.len() < Self::SIZE {
            return Err(IlbmError::malformed(
                ChunkId::CRNG,
                alloc::format!("{} bytes, need {}", payload.len(), Self::SIZE),
            ));
        }
        let mut c = ByteCursor::new(payload);
        let _reserved = c.read_u16_be()?;
        let rate = c.read_u16_be()?;
        let flags = c.read_u16_be()?;
        let low = c.read_u8()?;
        let high = c.read_u8()?;
        Ok(Self {
            rate,
            active: rate != 0 && flags & FLAG_ACTIVE != 0,
            reverse: flags & FLAG_REVERSE != 0,
            low,
            high,
        })
    }
}
