//! Formatting functions for disassembled instructions

use crate::addressing::AddressingMode;
use crate::cpu::branch_target;
use crate::disassembler::Instruction;

/// Format a single instruction as assembly text, e.g. `"LDA #$42"`.
pub fn format_instruction(instr: &Instruction) -> String {
    if instr.operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, instr.operand)
    }
}

/// Format a full listing line with address, cross-reference offset, raw
/// bytes, mnemonic, operand and annotation.
pub fn format_listing_line(instr: &Instruction) -> String {
    let raw = instr
        .bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ");

    let annotation = instr
        .annotation
        .map(|name| format!(" ; {}", name))
        .unwrap_or_default();

    format!(
        "${:04X} [{:04X}]: {:12} {:4} {}{}",
        instr.address, instr.offset, raw, instr.mnemonic, instr.operand, annotation
    )
}

/// Format an operand from its addressing mode and operand bytes.
///
/// `address` is the address of the instruction itself, needed to resolve
/// relative branches. `operand` must hold exactly `mode.operand_len()` bytes.
pub fn format_operand(mode: AddressingMode, operand: &[u8], address: u16) -> String {
    use AddressingMode::*;

    let byte = || operand.first().copied().unwrap_or_default();
    let word = || resolve_word(operand).unwrap_or_default();

    match mode {
        Implied => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#${:02X}", byte()),
        ZeroPage => format!("${:02X}", byte()),
        ZeroPageX => format!("${:02X},X", byte()),
        ZeroPageY => format!("${:02X},Y", byte()),
        IndirectX => format!("(${:02X},X)", byte()),
        IndirectY => format!("(${:02X}),Y", byte()),
        Relative => format!("${:04X}", branch_target(address, byte() as i8)),
        Absolute => format!("${:04X}", word()),
        AbsoluteX => format!("${:04X},X", word()),
        AbsoluteY => format!("${:04X},Y", word()),
        Indirect => format!("(${:04X})", word()),
    }
}

/// Resolve the 16-bit address an operand refers to.
///
/// - Absolute, AbsoluteX, AbsoluteY, Indirect: the little-endian operand word
///   (the unindexed base for indexed forms)
/// - Relative: the branch target
/// - anything else: `None`
pub fn resolve_target(mode: AddressingMode, operand: &[u8], address: u16) -> Option<u16> {
    match mode {
        AddressingMode::Relative => operand
            .first()
            .map(|&displacement| branch_target(address, displacement as i8)),
        m if m.is_absolute() => resolve_word(operand),
        _ => None,
    }
}

fn resolve_word(operand: &[u8]) -> Option<u16> {
    match operand {
        [lo, hi, ..] => Some(u16::from_le_bytes([*lo, *hi])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instr(address: u16, bytes: &[u8], mnemonic: &'static str, mode: AddressingMode) -> Instruction {
        let target = resolve_target(mode, &bytes[1..], address);
        Instruction {
            address,
            offset: 0,
            opcode: bytes[0],
            mnemonic,
            addressing_mode: mode,
            bytes: bytes.to_vec(),
            size_bytes: bytes.len() as u8,
            operand: format_operand(mode, &bytes[1..], address),
            target,
            annotation: None,
        }
    }

    #[test]
    fn test_format_immediate() {
        let i = instr(0x8000, &[0xA9, 0x42], "LDA", AddressingMode::Immediate);
        assert_eq!(format_instruction(&i), "LDA #$42");
    }

    #[test]
    fn test_format_absolute() {
        let i = instr(0x0000, &[0x8D, 0x00, 0x80], "STA", AddressingMode::Absolute);
        assert_eq!(format_instruction(&i), "STA $8000");
    }

    #[test]
    fn test_format_implied() {
        let i = instr(0x1000, &[0xEA], "NOP", AddressingMode::Implied);
        assert_eq!(format_instruction(&i), "NOP");
    }

    #[test]
    fn test_format_indexed_indirect_forms() {
        let x = instr(0, &[0xA1, 0x40], "LDA", AddressingMode::IndirectX);
        let y = instr(0, &[0xB1, 0x40], "LDA", AddressingMode::IndirectY);
        assert_eq!(format_instruction(&x), "LDA ($40,X)");
        assert_eq!(format_instruction(&y), "LDA ($40),Y");
    }

    #[test]
    fn test_format_accumulator_and_indirect() {
        let lsr = instr(0, &[0x4A], "LSR", AddressingMode::Accumulator);
        let jmp = instr(0, &[0x6C, 0xFC, 0xFF], "JMP", AddressingMode::Indirect);
        assert_eq!(format_instruction(&lsr), "LSR A");
        assert_eq!(format_instruction(&jmp), "JMP ($FFFC)");
    }

    #[test]
    fn test_format_illegal_opcode() {
        let i = Instruction::undefined(0x2000, 0x10, 0xFF);
        assert_eq!(format_instruction(&i), ".byte $FF");
        assert_eq!(i.to_string(), "$2000 [0010]: FF           .byte $FF");
    }

    #[test]
    fn test_listing_line_without_operand_has_no_trailing_space() {
        let i = instr(0xFF42, &[0x60], "RTS", AddressingMode::Implied);
        assert_eq!(i.to_string(), "$FF42 [0000]: 60           RTS");
    }
}
