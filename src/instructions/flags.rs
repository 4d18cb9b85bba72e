//! # Status Flag Instructions
//!
//! CLC and SEC. Only the carry flag has explicit set/clear instructions in
//! the modeled subset.

use crate::{MemoryBus, CPU};

/// Executes CLC (Clear Carry Flag).
pub(crate) fn execute_clc<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.set_carry(false);
    cpu.pc = cpu.pc.wrapping_add(1);
}

/// Executes SEC (Set Carry Flag).
pub(crate) fn execute_sec<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.set_carry(true);
    cpu.pc = cpu.pc.wrapping_add(1);
}
