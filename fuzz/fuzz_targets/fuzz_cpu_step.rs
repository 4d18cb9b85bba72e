//! Fuzz target for routine execution.
//!
//! This target runs arbitrary bytes as a routine against an arbitrary
//! register and zero/stack page snapshot, checking that every run ends in
//! one of the three defined outcomes within its budget.

#![no_main]

use arbitrary::Arbitrary;
use rom6502::{is_supported, ExecutionError, FlatMemory, MemoryBus, CPU};
use libfuzzer_sys::fuzz_target;

const ROUTINE_START: u16 = 0x8000;
const BUDGET: u64 = 256;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    flag_c: bool,
    flag_z: bool,
    flag_n: bool,
}

/// Memory regions for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Routine bytes placed at ROUTINE_START
    routine: [u8; 64],
    /// Zero page contents
    zero_page: [u8; 256],
    /// Stack page contents
    stack_page: [u8; 256],
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    // Fixed-size blocks always fit inside the address space
    memory.load(0x0000, &input.memory.zero_page).unwrap();
    memory.load(0x0100, &input.memory.stack_page).unwrap();
    memory.load(ROUTINE_START, &input.memory.routine).unwrap();

    let mut cpu = CPU::new(memory);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_flag_c(input.cpu_state.flag_c);
    cpu.set_flag_z(input.cpu_state.flag_z);
    cpu.set_flag_n(input.cpu_state.flag_n);

    match cpu.run(ROUTINE_START, BUDGET) {
        Ok(summary) => {
            assert!(summary.steps >= 1 && summary.steps <= BUDGET);
            assert_eq!(cpu.memory().read(summary.pc), 0x60);
            assert_eq!(cpu.call_depth(), 0);
        }
        Err(ExecutionError::UnsupportedOpcode { opcode, address }) => {
            assert!(!is_supported(opcode));
            assert_eq!(cpu.pc(), address);
            assert!(cpu.steps() < BUDGET);
        }
        Err(ExecutionError::BudgetExceeded { budget, .. }) => {
            assert_eq!(budget, BUDGET);
            assert_eq!(cpu.steps(), BUDGET);
        }
    }
});
