//! # Load and Store Instructions
//!
//! This module implements load and store operations:
//! - LDA, LDX, LDY: load a register, updating Z and N
//! - STA, STX, STY: store a register, no flags affected

use crate::{AddressingMode, MemoryBus, CPU};

/// Executes the LDA (Load Accumulator) instruction.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if A = 0
/// - Negative (N): Set if bit 7 of A is set
/// - Carry: Not affected
pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.a = cpu.read_operand(mode);
    cpu.set_zn(cpu.a);
    cpu.pc = cpu.pc.wrapping_add(mode.size_bytes() as u16);
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.x = cpu.read_operand(mode);
    cpu.set_zn(cpu.x);
    cpu.pc = cpu.pc.wrapping_add(mode.size_bytes() as u16);
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.y = cpu.read_operand(mode);
    cpu.set_zn(cpu.y);
    cpu.pc = cpu.pc.wrapping_add(mode.size_bytes() as u16);
}

/// Executes STA, STX or STY by writing `register` to the effective address.
pub(crate) fn execute_store<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, register: u8) {
    let addr = cpu.effective_address(mode);
    cpu.memory.write(addr, register);
    cpu.pc = cpu.pc.wrapping_add(mode.size_bytes() as u16);
}
