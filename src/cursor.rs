//! Big-endian read cursor over a borrowed byte slice.
//!
//! Every read either advances the position by exactly its width or fails with
//! [`IlbmError::UnexpectedEof`] and leaves the position untouched.

use crate::error::IlbmError;

pub(crate) struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub(crate) fn eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Borrow the next `n` bytes and advance past them.
    pub(crate) fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], IlbmError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(IlbmError::UnexpectedEof {
                offset: self.pos,
                needed: n - self.remaining().min(n),
            })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], IlbmError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_bytes(N)?);
        Ok(buf)
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<(), IlbmError> {
        self.read_bytes(n).map(|_| ())
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, IlbmError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub(crate) fn read_u16_be(&mut self) -> Result<u16, IlbmError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_i16_be(&mut self) -> Result<i16, IlbmError> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    pub(crate) fn read_u32_be(&mut self) -> Result<u32, IlbmError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Read a four-byte IFF tag.
    pub(crate) fn read_tag(&mut self) -> Result<[u8; 4], IlbmError> {
        self.read_array()
    }
}
