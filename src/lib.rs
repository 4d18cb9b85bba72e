//! # 6502 Decode and Execute Engine
//!
//! A small 6502 engine for ROM reverse-engineering and patch verification. It
//! serves two consumers:
//!
//! - the **disassembler** turns program-memory bytes into listing records
//!   (address, cross-reference offset, raw bytes, mnemonic, operand, and an
//!   annotation for well-known hardware registers)
//! - the **executor** runs a hand-assembled routine against an explicit
//!   register/memory snapshot so its effects can be asserted before the bytes
//!   are written into a ROM image
//!
//! The two do not share an instruction table. [`OPCODE_TABLE`] describes the
//! shape of all documented opcodes; the executor maps only the opcodes it
//! models to their side effects (see [`operation_for`]) and refuses anything
//! else.
//!
//! ## Quick Start
//!
//! ```rust
//! use rom6502::{CPU, FlatMemory, MemoryBus, DEFAULT_STEP_BUDGET};
//!
//! // LDA $F8 / STA $F6 / RTS with $F8 preloaded
//! let mut memory = FlatMemory::from_snapshot([(0x00F8, 0x02)]);
//! memory.load(0xFF40, &[0xA5, 0xF8, 0x85, 0xF6, 0x60]).unwrap();
//!
//! let mut cpu = CPU::new(memory);
//! cpu.run(0xFF40, DEFAULT_STEP_BUDGET).unwrap();
//!
//! assert_eq!(cpu.memory().read(0x00F6), 0x02);
//! assert_eq!(cpu.a(), 0x02);
//! ```
//!
//! ## Modules
//!
//! - `addressing` - Addressing mode enumeration
//! - `opcodes` - Opcode metadata table
//! - `disassembler` - Lazy decoder and listing formatter
//! - `memory` - MemoryBus trait and flat 64KB memory
//! - `cpu` - Register state and the execution loop
//!
//! ## Scope
//!
//! No interrupts, illegal opcodes, cycle timing, decimal mode, overflow flag
//! or indirect JMP execution.

pub mod addressing;
pub mod cpu;
pub mod disassembler;
pub mod error;
pub mod memory;
pub mod opcodes;

// Instruction semantics (only the opcode mapping is public)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::{branch_target, RunSummary, StatusFlags, StepOutcome, CPU, DEFAULT_STEP_BUDGET};
pub use disassembler::{disassemble, listing, Disassembly, DisassemblyOptions, Instruction};
pub use error::{ExecutionError, MemoryError};
pub use instructions::{is_supported, operation_for, Condition, Operation};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{OpcodeMetadata, OPCODE_TABLE};
