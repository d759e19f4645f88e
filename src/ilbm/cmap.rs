//! `CMAP` colour register table.

use alloc::vec::Vec;
use rgb::RGBA8;

/// A palette of opaque RGBA entries plus its address width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorMap {
    entries: Vec<RGBA8>,
    address_bits: u32,
}

/// Smallest `bits` with `2^bits >= count`.
pub fn address_bits_for(count: usize) -> u32 {
    let mut bits = 0u32;
    while bits < usize::BITS && (1usize << bits) < count {
        bits += 1;
    }
    bits
}

impl ColorMap {
    /// Build a palette, deriving the address width from the entry count.
    pub fn new(entries: Vec<RGBA8>) -> Self {
        let address_bits = address_bits_for(entries.len());
        Self {
            entries,
            address_bits,
        }
    }

    /// Build a palette with an explicit address width (used after HAM culling).
    pub(crate) fn with_address_bits(entries: Vec<RGBA8>, address_bits: u32) -> Self {
        Self {
            entries,
            address_bits,
        }
    }

    /// Parse RGB triples; trailing bytes that do not form a full triple are ignored.
    pub(crate) fn read(payload: &[u8]) -> Self {
        let entries = payload
            .chunks_exact(3)
            .map(|rgb| RGBA8::new(rgb[0], rgb[1], rgb[2], 255))
            .collect();
        Self::new(entries)
    }

    pub fn entries(&self) -> &[RGBA8] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of bits needed to index this palette.
    pub fn address_bits(&self) -> u32 {
        self.address_bits
    }

    pub fn get(&self, index: usize) -> Option<RGBA8> {
        self.entries.get(index).copied()
    }
}
