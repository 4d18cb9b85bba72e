//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA. Each copies one register into another and updates
//! Z and N from the copied value.

use crate::{MemoryBus, CPU};

/// Executes TAX (Transfer Accumulator to X).
pub(crate) fn execute_tax<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.a;
    cpu.set_zn(cpu.x);
    cpu.pc = cpu.pc.wrapping_add(1);
}

/// Executes TAY (Transfer Accumulator to Y).
pub(crate) fn execute_tay<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.a;
    cpu.set_zn(cpu.y);
    cpu.pc = cpu.pc.wrapping_add(1);
}

/// Executes TXA (Transfer X to Accumulator).
pub(crate) fn execute_txa<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.a = cpu.x;
    cpu.set_zn(cpu.a);
    cpu.pc = cpu.pc.wrapping_add(1);
}

/// Executes TYA (Transfer Y to Accumulator).
pub(crate) fn execute_tya<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.a = cpu.y;
    cpu.set_zn(cpu.a);
    cpu.pc = cpu.pc.wrapping_add(1);
}
