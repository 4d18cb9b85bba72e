//! # Branch Instructions
//!
//! Conditional branches (BPL, BMI, BCC, BCS, BNE, BEQ). All use relative
//! addressing: the signed 8-bit displacement is added to the address of the
//! instruction following the 2-byte branch. No flags are affected.

use super::Condition;
use crate::{AddressingMode, MemoryBus, CPU};

/// Executes a conditional branch.
///
/// When `condition` holds, PC becomes the branch target; otherwise PC
/// advances past the branch.
pub(crate) fn execute_branch<M: MemoryBus>(cpu: &mut CPU<M>, condition: Condition) {
    if condition.holds(cpu.status) {
        cpu.pc = cpu.effective_address(AddressingMode::Relative);
    } else {
        cpu.pc = cpu.pc.wrapping_add(AddressingMode::Relative.size_bytes() as u16);
    }
}
