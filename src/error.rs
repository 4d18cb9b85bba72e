//! Error types for routine execution and memory snapshot loading.

use thiserror::Error;

/// Errors that end an execution run.
///
/// Both variants are fatal to the run: the executor never skips an opcode it
/// cannot model and never reports success for a routine that did not return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The byte at `address` is not one of the opcodes the executor models.
    ///
    /// This includes documented instructions outside the supported subset.
    #[error("unsupported opcode 0x{opcode:02X} at ${address:04X}")]
    UnsupportedOpcode { opcode: u8, address: u16 },

    /// The routine executed `budget` instructions without returning.
    #[error("step budget of {budget} exhausted at ${pc:04X}")]
    BudgetExceeded { budget: u64, pc: u16 },
}

/// Errors raised while loading bytes into memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// A block of `len` bytes starting at `start` runs past `$FFFF`.
    #[error("{len} bytes at ${start:04X} run past the end of the address space")]
    OutOfRange { start: u16, len: usize },
}
