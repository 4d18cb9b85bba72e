//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Carry receives the bit shifted out. Z and N follow the result.

use crate::cpu::StatusFlags;
use crate::{AddressingMode, MemoryBus, CPU};

/// Executes ASL. Bit 7 goes to carry, bit 0 becomes 0.
pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    shift(cpu, mode, |value, _| (value << 1, value & 0x80 != 0));
}

/// Executes LSR. Bit 0 goes to carry, bit 7 becomes 0.
pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    shift(cpu, mode, |value, _| (value >> 1, value & 0x01 != 0));
}

/// Executes ROL. Bit 7 goes to carry, old carry enters bit 0.
pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    shift(cpu, mode, |value, carry| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    });
}

/// Executes ROR. Bit 0 goes to carry, old carry enters bit 7.
pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    shift(cpu, mode, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    });
}

/// Applies `op(value, carry_in) -> (result, carry_out)` to the accumulator
/// or to memory, depending on `mode`.
fn shift<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    op: impl Fn(u8, bool) -> (u8, bool),
) {
    let carry_in = cpu.status.contains(StatusFlags::CARRY);

    let result = if mode == AddressingMode::Accumulator {
        let (result, carry_out) = op(cpu.a, carry_in);
        cpu.a = result;
        cpu.set_carry(carry_out);
        result
    } else {
        let addr = cpu.effective_address(mode);
        let (result, carry_out) = op(cpu.memory.read(addr), carry_in);
        cpu.memory.write(addr, result);
        cpu.set_carry(carry_out);
        result
    };

    cpu.set_zn(result);
    cpu.pc = cpu.pc.wrapping_add(mode.size_bytes() as u16);
}
