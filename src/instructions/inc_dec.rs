//! # Increment and Decrement Instructions
//!
//! This module implements increment and decrement operations:
//! - INC, DEC: memory
//! - INX, INY, DEX, DEY: index registers
//!
//! All wrap at 8 bits and update Z and N from the result.

use crate::{AddressingMode, MemoryBus, CPU};

/// Executes INC (Increment Memory).
pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    modify_memory(cpu, mode, |value| value.wrapping_add(1));
}

/// Executes DEC (Decrement Memory).
pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    modify_memory(cpu, mode, |value| value.wrapping_sub(1));
}

fn modify_memory<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, op: impl Fn(u8) -> u8) {
    let addr = cpu.effective_address(mode);
    let result = op(cpu.memory.read(addr));

    cpu.memory.write(addr, result);
    cpu.set_zn(result);

    cpu.pc = cpu.pc.wrapping_add(mode.size_bytes() as u16);
}

/// Executes INX (Increment X Register).
pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.set_zn(cpu.x);
    cpu.pc = cpu.pc.wrapping_add(1);
}

/// Executes INY (Increment Y Register).
pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.set_zn(cpu.y);
    cpu.pc = cpu.pc.wrapping_add(1);
}

/// Executes DEX (Decrement X Register).
pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.set_zn(cpu.x);
    cpu.pc = cpu.pc.wrapping_add(1);
}

/// Executes DEY (Decrement Y Register).
pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.set_zn(cpu.y);
    cpu.pc = cpu.pc.wrapping_add(1);
}
