//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from a
//! specific memory implementation, plus `FlatMemory`, the 64KB address space
//! used to hold routines under test and their fixture values.
//!
//! ## Address Space
//!
//! - `0x0000-0x00FF`: zero page
//! - `0x0100-0x01FF`: stack page (the stack pointer indexes into it)
//! - everything else is plain RAM in `FlatMemory`
//!
//! Addresses are `u16`, so a single read or write can never leave the space.
//! Block loads that would run past `$FFFF` are rejected with
//! [`MemoryError::OutOfRange`] instead of wrapping.

use crate::MemoryError;

/// First address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Number of addressable bytes.
pub const ADDRESS_SPACE: usize = 0x10000;

/// Memory bus trait for the CPU to read/write bytes.
///
/// # Examples
///
/// ```
/// use rom6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a little-endian 16-bit word from `addr` and `addr + 1`.
    ///
    /// The high byte address wraps at `$FFFF`.
    fn read_word(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses are writable RAM initialized to `0x00`. Fixtures are
/// usually built with [`FlatMemory::from_snapshot`] and a routine is placed
/// with [`FlatMemory::load`].
///
/// # Examples
///
/// ```
/// use rom6502::{FlatMemory, MemoryBus};
///
/// // Preload game state: player count at $0727, P2 input at $F6
/// let mut memory = FlatMemory::from_snapshot([(0x0727, 2), (0x00F6, 0x01)]);
/// memory.load(0xFF40, &[0x85, 0xF6, 0x60]).unwrap();
///
/// assert_eq!(memory.read(0x0727), 2);
/// assert_eq!(memory.read(0xFF42), 0x60);
/// ```
#[derive(Clone)]
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; ADDRESS_SPACE]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; ADDRESS_SPACE]),
        }
    }

    /// Creates zeroed memory with a sparse set of `address -> byte` assignments
    /// applied in order. Later assignments to the same address win.
    pub fn from_snapshot<I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = (u16, u8)>,
    {
        let mut memory = Self::new();
        for (addr, value) in assignments {
            memory.write(addr, value);
        }
        memory
    }

    /// Copies `bytes` into memory starting at `start`.
    ///
    /// Fails without writing anything if the block would extend past `$FFFF`.
    pub fn load(&mut self, start: u16, bytes: &[u8]) -> Result<(), MemoryError> {
        let begin = start as usize;
        let end = begin + bytes.len();
        if end > ADDRESS_SPACE {
            return Err(MemoryError::OutOfRange {
                start,
                len: bytes.len(),
            });
        }
        self.data[begin..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Returns a view of `len` bytes starting at `start`, or `None` if the
    /// range runs past `$FFFF`.
    pub fn slice(&self, start: u16, len: usize) -> Option<&[u8]> {
        let begin = start as usize;
        self.data.get(begin..begin.checked_add(len)?)
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlatMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self.data.iter().filter(|&&b| b != 0).count();
        f.debug_struct("FlatMemory")
            .field("nonzero_bytes", &used)
            .finish()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_memory_read_write() {
        let mut mem = FlatMemory::new();

        assert_eq!(mem.read(0x0000), 0x00);
        assert_eq!(mem.read(0xFFFF), 0x00);

        mem.write(0x1234, 0x42);
        assert_eq!(mem.read(0x1234), 0x42);

        // Neighbours untouched
        assert_eq!(mem.read(0x1233), 0x00);
        assert_eq!(mem.read(0x1235), 0x00);
    }

    #[test]
    fn test_snapshot_later_assignment_wins() {
        let mem = FlatMemory::from_snapshot([(0x00F6, 0x01), (0x0400, 0xFF), (0x00F6, 0x02)]);
        assert_eq!(mem.read(0x00F6), 0x02);
        assert_eq!(mem.read(0x0400), 0xFF);
    }

    #[test]
    fn test_load_fits_exactly_at_top() {
        let mut mem = FlatMemory::new();
        mem.load(0xFFFD, &[0x01, 0x02, 0x03]).unwrap();
        assert_eq!(mem.read(0xFFFF), 0x03);
        assert_eq!(mem.slice(0xFFFD, 3), Some(&[0x01, 0x02, 0x03][..]));
    }

    #[test]
    fn test_load_past_end_is_rejected() {
        let mut mem = FlatMemory::new();
        let err = mem.load(0xFFFE, &[0xAA, 0xBB, 0xCC]).unwrap_err();
        assert_eq!(err, MemoryError::OutOfRange { start: 0xFFFE, len: 3 });

        // Nothing was written, not even the bytes that would have fit
        assert_eq!(mem.read(0xFFFE), 0x00);
        assert_eq!(mem.read(0x0000), 0x00);
    }

    #[test]
    fn test_read_word_little_endian() {
        let mem = FlatMemory::from_snapshot([(0x0010, 0x34), (0x0011, 0x12)]);
        assert_eq!(mem.read_word(0x0010), 0x1234);
    }

    #[test]
    fn test_slice_out_of_range() {
        let mem = FlatMemory::new();
        assert!(mem.slice(0xFFFF, 2).is_none());
    }
}
