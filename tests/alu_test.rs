//! Tests for arithmetic, logic, compare and shift instructions.
//!
//! Carry follows the no-borrow convention for SBC and the compares.

use rom6502::{FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with PC at 0x8000 and `program` loaded there
fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0x8000, program).unwrap();
    let mut cpu = CPU::new(memory);
    cpu.set_pc(0x8000);
    cpu
}

// ========== ADC ==========

#[test]
fn test_adc_without_carry() {
    let mut cpu = setup_cpu(&[0x69, 0x10]);
    cpu.set_a(0x20);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x30);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
}

#[test]
fn test_adc_carry_in_and_out() {
    let mut cpu = setup_cpu(&[0x69, 0x01]);
    cpu.set_a(0xFE);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
}

// ========== SBC ==========

#[test]
fn test_sbc_no_borrow() {
    let mut cpu = setup_cpu(&[0xE9, 0x02]);
    cpu.set_a(0x05);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x03);
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_with_borrow_in() {
    let mut cpu = setup_cpu(&[0xE9, 0x02]);
    cpu.set_a(0x05);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x02);
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_borrow_out() {
    // SBC $0300
    let mut cpu = setup_cpu(&[0xED, 0x00, 0x03]);
    cpu.memory_mut().write(0x0300, 0x01);
    cpu.set_a(0x00);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xFF);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

// ========== AND / EOR ==========

#[test]
fn test_and_masks_frame_counter_bits() {
    let mut cpu = setup_cpu(&[0x29, 0x0F, 0x29, 0xF0]);
    cpu.set_a(0x3C);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x0C);
    assert!(!cpu.flag_z());

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_eor_absolute() {
    let mut cpu = setup_cpu(&[0x4D, 0x00, 0x03]);
    cpu.memory_mut().write(0x0300, 0xFF);
    cpu.set_a(0x0F);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xF0);
    assert!(cpu.flag_n());
}

// ========== Compare ==========

#[test]
fn test_cmp_operand_greater_clears_carry() {
    let mut cpu = setup_cpu(&[0xC9, 0x50]);
    cpu.set_a(0x40);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n()); // 0x40 - 0x50 = 0xF0
    assert_eq!(cpu.a(), 0x40);
}

#[test]
fn test_cmp_equal_sets_carry_and_zero() {
    // CMP $43
    let mut cpu = setup_cpu(&[0xC5, 0x43]);
    cpu.memory_mut().write(0x0043, 0x40);
    cpu.set_a(0x40);

    cpu.step().unwrap();

    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_cmp_register_greater_sets_carry() {
    let mut cpu = setup_cpu(&[0xCD, 0x27, 0x07]);
    cpu.memory_mut().write(0x0727, 0x01);
    cpu.set_a(0x90);

    cpu.step().unwrap();

    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n()); // 0x90 - 0x01 = 0x8F
}

#[test]
fn test_cpx_cpy_leave_registers_unchanged() {
    let mut cpu = setup_cpu(&[0xE0, 0x10, 0xC0, 0x10]);
    cpu.set_x(0x10);
    cpu.set_y(0x0F);

    cpu.step().unwrap();
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert_eq!(cpu.x(), 0x10);

    cpu.step().unwrap();
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
    assert_eq!(cpu.y(), 0x0F);
}

// ========== Shifts ==========

#[test]
fn test_asl_accumulator() {
    let mut cpu = setup_cpu(&[0x0A]);
    cpu.set_a(0x81);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x02);
    assert!(cpu.flag_c());
    assert_eq!(cpu.pc(), 0x8001);
}

#[test]
fn test_lsr_accumulator() {
    let mut cpu = setup_cpu(&[0x4A]);
    cpu.set_a(0x01);
    cpu.set_flag_n(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_rotates_through_carry() {
    // ROL A / ROR A
    let mut cpu = setup_cpu(&[0x2A, 0x6A]);
    cpu.set_a(0x80);
    cpu.set_flag_c(true);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x01);
    assert!(cpu.flag_c());

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_c());
    assert!(cpu.flag_n());
}
