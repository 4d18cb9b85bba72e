//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump to absolute address
//! - JSR: Jump to Subroutine
//! - RTS: Return from Subroutine
//! - NOP: No Operation
//!
//! JSR pushes the address of its own last byte (PC + 2), high byte first.
//! RTS pops low then high and resumes one past the popped address. An RTS
//! with no JSR pending inside the current run is the routine's own return
//! and ends the run without touching the stack, since the caller's frame is
//! not part of the snapshot.

use crate::cpu::StepOutcome;
use crate::{AddressingMode, MemoryBus, CPU};

/// Executes JMP absolute (0x4C). No flags or stack affected.
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.pc = cpu.effective_address(AddressingMode::Absolute);
}

/// Executes JSR (0x20).
///
/// 1. Push high byte of PC + 2
/// 2. Push low byte of PC + 2
/// 3. Jump to the absolute target
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>) {
    let target = cpu.effective_address(AddressingMode::Absolute);
    let return_address = cpu.pc.wrapping_add(2);

    let [lo, hi] = return_address.to_le_bytes();
    cpu.push(hi);
    cpu.push(lo);

    cpu.call_depth += 1;
    cpu.pc = target;
}

/// Executes RTS (0x60).
///
/// Returns [`StepOutcome::Returned`] when no JSR is pending; otherwise pops
/// the return address and continues at the byte after it.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>) -> StepOutcome {
    if cpu.call_depth == 0 {
        return StepOutcome::Returned;
    }

    let lo = cpu.pop();
    let hi = cpu.pop();
    cpu.call_depth -= 1;
    cpu.pc = u16::from_le_bytes([lo, hi]).wrapping_add(1);

    StepOutcome::Continue
}

/// Executes NOP (0xEA).
pub(crate) fn execute_nop<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.pc = cpu.pc.wrapping_add(1);
}
