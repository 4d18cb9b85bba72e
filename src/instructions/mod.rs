//! # Instruction Semantics
//!
//! The executor's own opcode mapping. It is kept separate from the
//! disassembler's [`OPCODE_TABLE`](crate::OPCODE_TABLE): that table describes
//! the shape of every documented instruction, this one names the operations
//! whose side effects are actually modeled. Any byte not mapped here stops a
//! run with [`ExecutionError::UnsupportedOpcode`](crate::ExecutionError).
//!
//! ## Categories
//!
//! - **alu**: ADC, SBC, AND, EOR, CMP, CPX, CPY
//! - **branches**: BPL, BMI, BCC, BCS, BNE, BEQ
//! - **control**: JMP, JSR, RTS, NOP
//! - **flags**: CLC, SEC
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **transfer**: TAX, TAY, TXA, TYA

pub(crate) mod alu;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod transfer;

use crate::cpu::{StatusFlags, StepOutcome};
use crate::{AddressingMode, MemoryBus, CPU};

use AddressingMode::*;

/// Branch conditions. Each tests exactly one status flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// BPL: N clear
    Plus,
    /// BMI: N set
    Minus,
    /// BCC: C clear
    CarryClear,
    /// BCS: C set
    CarrySet,
    /// BNE: Z clear
    NotEqual,
    /// BEQ: Z set
    Equal,
}

impl Condition {
    /// Returns whether a branch on this condition is taken under `flags`.
    pub fn holds(self, flags: StatusFlags) -> bool {
        match self {
            Condition::Plus => !flags.contains(StatusFlags::NEGATIVE),
            Condition::Minus => flags.contains(StatusFlags::NEGATIVE),
            Condition::CarryClear => !flags.contains(StatusFlags::CARRY),
            Condition::CarrySet => flags.contains(StatusFlags::CARRY),
            Condition::NotEqual => !flags.contains(StatusFlags::ZERO),
            Condition::Equal => flags.contains(StatusFlags::ZERO),
        }
    }
}

/// An executable operation together with its addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Adc(AddressingMode),
    Sbc(AddressingMode),
    And(AddressingMode),
    Eor(AddressingMode),
    Cmp(AddressingMode),
    Cpx(AddressingMode),
    Cpy(AddressingMode),
    Lda(AddressingMode),
    Ldx(AddressingMode),
    Ldy(AddressingMode),
    Sta(AddressingMode),
    Stx(AddressingMode),
    Sty(AddressingMode),
    Inc(AddressingMode),
    Dec(AddressingMode),
    Asl(AddressingMode),
    Lsr(AddressingMode),
    Rol(AddressingMode),
    Ror(AddressingMode),
    Inx,
    Iny,
    Dex,
    Dey,
    Tax,
    Tay,
    Txa,
    Tya,
    Clc,
    Sec,
    Branch(Condition),
    Jmp,
    Jsr,
    Rts,
    Nop,
}

/// Maps an opcode byte to the operation the executor implements for it.
///
/// Returns `None` for every byte outside the modeled subset, including
/// documented instructions such as BRK, PHA or `JMP ($xxxx)`.
pub fn operation_for(opcode: u8) -> Option<Operation> {
    let operation = match opcode {
        0x69 => Operation::Adc(Immediate),
        0xE9 => Operation::Sbc(Immediate),
        0xED => Operation::Sbc(Absolute),
        0x29 => Operation::And(Immediate),
        0x4D => Operation::Eor(Absolute),
        0xC9 => Operation::Cmp(Immediate),
        0xC5 => Operation::Cmp(ZeroPage),
        0xCD => Operation::Cmp(Absolute),
        0xE0 => Operation::Cpx(Immediate),
        0xC0 => Operation::Cpy(Immediate),

        0xA9 => Operation::Lda(Immediate),
        0xA5 => Operation::Lda(ZeroPage),
        0xAD => Operation::Lda(Absolute),
        0xBD => Operation::Lda(AbsoluteX),
        0xB9 => Operation::Lda(AbsoluteY),
        0xA2 => Operation::Ldx(Immediate),
        0xA0 => Operation::Ldy(Immediate),
        0x85 => Operation::Sta(ZeroPage),
        0x8D => Operation::Sta(Absolute),
        0x86 => Operation::Stx(ZeroPage),
        0x84 => Operation::Sty(ZeroPage),

        0xE6 => Operation::Inc(ZeroPage),
        0xEE => Operation::Inc(Absolute),
        0xC6 => Operation::Dec(ZeroPage),
        0xCE => Operation::Dec(Absolute),
        0xE8 => Operation::Inx,
        0xC8 => Operation::Iny,
        0xCA => Operation::Dex,
        0x88 => Operation::Dey,

        0x0A => Operation::Asl(Accumulator),
        0x4A => Operation::Lsr(Accumulator),
        0x2A => Operation::Rol(Accumulator),
        0x6A => Operation::Ror(Accumulator),

        0xAA => Operation::Tax,
        0xA8 => Operation::Tay,
        0x8A => Operation::Txa,
        0x98 => Operation::Tya,

        0x18 => Operation::Clc,
        0x38 => Operation::Sec,

        0x10 => Operation::Branch(Condition::Plus),
        0x30 => Operation::Branch(Condition::Minus),
        0x90 => Operation::Branch(Condition::CarryClear),
        0xB0 => Operation::Branch(Condition::CarrySet),
        0xD0 => Operation::Branch(Condition::NotEqual),
        0xF0 => Operation::Branch(Condition::Equal),

        0x4C => Operation::Jmp,
        0x20 => Operation::Jsr,
        0x60 => Operation::Rts,
        0xEA => Operation::Nop,

        _ => return None,
    };
    Some(operation)
}

/// Returns whether the executor models `opcode`.
pub fn is_supported(opcode: u8) -> bool {
    operation_for(opcode).is_some()
}

/// Applies `operation` to the CPU. Every operation moves PC itself.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut CPU<M>, operation: Operation) -> StepOutcome {
    match operation {
        Operation::Adc(mode) => alu::execute_adc(cpu, mode),
        Operation::Sbc(mode) => alu::execute_sbc(cpu, mode),
        Operation::And(mode) => alu::execute_and(cpu, mode),
        Operation::Eor(mode) => alu::execute_eor(cpu, mode),
        Operation::Cmp(mode) => {
            let register = cpu.a;
            alu::execute_compare(cpu, mode, register)
        }
        Operation::Cpx(mode) => {
            let register = cpu.x;
            alu::execute_compare(cpu, mode, register)
        }
        Operation::Cpy(mode) => {
            let register = cpu.y;
            alu::execute_compare(cpu, mode, register)
        }
        Operation::Lda(mode) => load_store::execute_lda(cpu, mode),
        Operation::Ldx(mode) => load_store::execute_ldx(cpu, mode),
        Operation::Ldy(mode) => load_store::execute_ldy(cpu, mode),
        Operation::Sta(mode) => {
            let register = cpu.a;
            load_store::execute_store(cpu, mode, register)
        }
        Operation::Stx(mode) => {
            let register = cpu.x;
            load_store::execute_store(cpu, mode, register)
        }
        Operation::Sty(mode) => {
            let register = cpu.y;
            load_store::execute_store(cpu, mode, register)
        }
        Operation::Inc(mode) => inc_dec::execute_inc(cpu, mode),
        Operation::Dec(mode) => inc_dec::execute_dec(cpu, mode),
        Operation::Asl(mode) => shifts::execute_asl(cpu, mode),
        Operation::Lsr(mode) => shifts::execute_lsr(cpu, mode),
        Operation::Rol(mode) => shifts::execute_rol(cpu, mode),
        Operation::Ror(mode) => shifts::execute_ror(cpu, mode),
        Operation::Inx => inc_dec::execute_inx(cpu),
        Operation::Iny => inc_dec::execute_iny(cpu),
        Operation::Dex => inc_dec::execute_dex(cpu),
        Operation::Dey => inc_dec::execute_dey(cpu),
        Operation::Tax => transfer::execute_tax(cpu),
        Operation::Tay => transfer::execute_tay(cpu),
        Operation::Txa => transfer::execute_txa(cpu),
        Operation::Tya => transfer::execute_tya(cpu),
        Operation::Clc => flags::execute_clc(cpu),
        Operation::Sec => flags::execute_sec(cpu),
        Operation::Branch(condition) => branches::execute_branch(cpu, condition),
        Operation::Jmp => control::execute_jmp(cpu),
        Operation::Jsr => control::execute_jsr(cpu),
        Operation::Rts => return control::execute_rts(cpu),
        Operation::Nop => control::execute_nop(cpu),
    }
    StepOutcome::Continue
}
