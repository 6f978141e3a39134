//! Auto-growing machine memory.
//!
//! Addresses below [`DENSE_LIMIT`] live in a contiguous vector that grows on
//! write; anything above it goes to a sparse map so that a stray large
//! address cannot force a multi-gigabyte allocation. Cells that were never
//! written read as 0.

use intcode_common::Word;
use std::collections::HashMap;

/// Addresses below this bound are stored densely.
pub const DENSE_LIMIT: usize = 1 << 22;

/// Addressable integer store for one machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memory {
    dense: Vec<Word>,
    sparse: HashMap<usize, Word>,
}

impl Memory {
    /// Create an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory holding `cells` at addresses `0..cells.len()`.
    pub fn with_cells(cells: &[Word]) -> Self {
        let mut memory = Self::new();
        memory.load(cells);
        memory
    }

    /// Bulk-initialize addresses `0..cells.len()`. Cells above the loaded
    /// range keep their current values.
    pub fn load(&mut self, cells: &[Word]) {
        if self.dense.len() < cells.len() {
            self.dense.resize(cells.len(), 0);
        }
        self.dense[..cells.len()].copy_from_slice(cells);
        self.sparse.retain(|&address, _| address >= cells.len());
    }

    /// Read the cell at `address`; 0 if it was never written.
    pub fn read(&self, address: usize) -> Word {
        match self.dense.get(address) {
            Some(&value) => value,
            None => self.sparse.get(&address).copied().unwrap_or(0),
        }
    }

    /// Write `value` at `address`, growing the address space as needed.
    pub fn write(&mut self, address: usize, value: Word) {
        if address < self.dense.len() {
            self.dense[address] = value;
        } else if address < DENSE_LIMIT {
            self.dense.resize(address + 1, 0);
            self.dense[address] = value;
        } else {
            self.sparse.insert(address, value);
        }
    }

    /// Extent of the dense region: one past the highest densely held address.
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Returns true if nothing has been loaded or written.
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty() && self.sparse.is_empty()
    }

    /// Number of cells held outside the dense region.
    pub fn sparse_len(&self) -> usize {
        self.sparse.len()
    }

    /// The dense region as a slice.
    pub fn as_slice(&self) -> &[Word] {
        &self.dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritten_cells_read_zero() {
        let memory = Memory::new();
        assert_eq!(memory.read(0), 0);
        assert_eq!(memory.read(123_456), 0);
        assert!(memory.is_empty());
    }

    #[test]
    fn load_places_program_at_zero() {
        let memory = Memory::with_cells(&[1, 2, 3]);
        assert_eq!(memory.as_slice(), &[1, 2, 3]);
        assert_eq!(memory.read(3), 0);
    }

    #[test]
    fn write_past_end_grows_and_zero_fills() {
        let mut memory = Memory::with_cells(&[7]);
        memory.write(4, 9);
        assert_eq!(memory.len(), 5);
        assert_eq!(memory.as_slice(), &[7, 0, 0, 0, 9]);
    }

    #[test]
    fn large_addresses_go_sparse() {
        let mut memory = Memory::new();
        let far = DENSE_LIMIT + 10;
        memory.write(far, -5);
        assert_eq!(memory.read(far), -5);
        assert_eq!(memory.len(), 0);
        assert_eq!(memory.sparse_len(), 1);
        assert!(!memory.is_empty());
    }

    #[test]
    fn load_overwrites_prefix_only() {
        let mut memory = Memory::with_cells(&[1, 1, 1, 1]);
        memory.load(&[2, 2]);
        assert_eq!(memory.as_slice(), &[2, 2, 1, 1]);
    }

    #[test]
    fn values_wider_than_32_bits_survive() {
        let mut memory = Memory::new();
        memory.write(0, 1_125_899_906_842_624);
        assert_eq!(memory.read(0), 1_125_899_906_842_624);
    }
}
