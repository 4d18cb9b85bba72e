//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND: Logical AND
//! - EOR: Exclusive OR
//! - CMP, CPX, CPY: Compare register with memory
//!
//! Arithmetic is binary only. Decimal mode and the overflow flag are not
//! modeled.

use crate::cpu::StatusFlags;
use crate::{AddressingMode, MemoryBus, CPU};

/// Executes the ADC (Add with Carry) instruction.
///
/// A = A + M + C. Carry is set on unsigned overflow (result > 255).
/// Updates C, Z and N.
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    let carry_in = cpu.status.contains(StatusFlags::CARRY) as u16;

    let result16 = cpu.a as u16 + value as u16 + carry_in;
    let result = result16 as u8;

    cpu.set_carry(result16 > 0xFF);
    cpu.set_zn(result);
    cpu.a = result;

    cpu.pc = cpu.pc.wrapping_add(mode.size_bytes() as u16);
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// A = A - M - (1 - C). Carry is the inverted borrow: set when the
/// subtraction does not go below zero. Updates C, Z and N.
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    let borrow_in = !cpu.status.contains(StatusFlags::CARRY) as i16;

    let difference = cpu.a as i16 - value as i16 - borrow_in;
    let result = difference as u8;

    cpu.set_carry(difference >= 0);
    cpu.set_zn(result);
    cpu.a = result;

    cpu.pc = cpu.pc.wrapping_add(mode.size_bytes() as u16);
}

/// Executes the AND (Logical AND) instruction. Updates Z and N.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let result = cpu.a & cpu.read_operand(mode);

    cpu.set_zn(result);
    cpu.a = result;

    cpu.pc = cpu.pc.wrapping_add(mode.size_bytes() as u16);
}

/// Executes the EOR (Exclusive OR) instruction. Updates Z and N.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let result = cpu.a ^ cpu.read_operand(mode);

    cpu.set_zn(result);
    cpu.a = result;

    cpu.pc = cpu.pc.wrapping_add(mode.size_bytes() as u16);
}

/// Executes CMP, CPX or CPY against `register`.
///
/// Computes `register - M` for the flags only; no register changes.
/// - Carry: set if register >= M (no borrow)
/// - Zero: set if register == M
/// - Negative: bit 7 of the 8-bit difference
pub(crate) fn execute_compare<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    register: u8,
) {
    let value = cpu.read_operand(mode);
    let difference = register.wrapping_sub(value);

    cpu.set_carry(register >= value);
    cpu.set_zn(difference);

    cpu.pc = cpu.pc.wrapping_add(mode.size_bytes() as u16);
}
