//! 6502 Disassembler Module
//!
//! Converts program-memory bytes into instruction records for human-readable
//! listings. Decoding is lazy: [`disassemble`] returns an iterator that decodes
//! one instruction per `next()` call, so a caller can stop pulling at any point.
//!
//! Bytes outside the documented instruction set become single-byte `.byte`
//! records so data interleaved with code does not stop the listing. A trailing
//! instruction cut off by the end of the buffer ends the sequence quietly.

pub mod decoder;
pub mod formatter;
pub mod registers;

use std::fmt;
use std::iter::FusedIterator;

use crate::addressing::AddressingMode;
use crate::opcodes::lookup;
use decoder::{decode_instruction, Decoded};

/// Mnemonic used for bytes that are not a documented opcode.
pub const UNDEFINED_MNEMONIC: &str = ".byte";

/// A single disassembled instruction with full metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Logical (CPU) address where this instruction starts
    pub address: u16,

    /// Cross-reference offset, usually the position in the ROM file
    pub offset: usize,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDA", "STA", ".byte")
    pub mnemonic: &'static str,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Raw encoded bytes, opcode first. Length always equals `size_bytes`.
    pub bytes: Vec<u8>,

    /// Total size in bytes (1-3)
    pub size_bytes: u8,

    /// Operand rendered in assembler syntax (e.g., "#$00", "$2001,X")
    pub operand: String,

    /// Resolved 16-bit address for absolute-family and relative operands
    pub target: Option<u16>,

    /// Name of a well-known hardware register at `target`, if any
    pub annotation: Option<&'static str>,
}

impl Instruction {
    /// Builds the placeholder record for a byte with no opcode table entry.
    pub fn undefined(address: u16, offset: usize, opcode: u8) -> Self {
        Self {
            address,
            offset,
            opcode,
            mnemonic: UNDEFINED_MNEMONIC,
            addressing_mode: AddressingMode::Implied,
            bytes: vec![opcode],
            size_bytes: 1,
            operand: format!("${:02X}", opcode),
            target: None,
            annotation: None,
        }
    }

    /// Returns true for `.byte` placeholder records.
    pub fn is_undefined(&self) -> bool {
        lookup(self.opcode).is_none()
    }

    /// Operand bytes following the opcode (empty for placeholders).
    pub fn operand_bytes(&self) -> &[u8] {
        if self.is_undefined() {
            &[]
        } else {
            &self.bytes[1..]
        }
    }
}

/// Renders a listing line:
/// `$8002 [17B2]: 8D 01 20     STA  $2001 ; PPU_MASK`
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(formatter::format_listing_line(self).trim_end())
    }
}

/// Options controlling disassembly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisassemblyOptions {
    /// Logical address of the first byte
    pub start_address: u16,

    /// Cross-reference offset of the first byte. Offsets wrap at `usize::MAX`.
    pub base_offset: usize,
}

/// Lazy instruction sequence over a byte buffer.
///
/// Cloning yields an independent cursor at the same position, so a sequence
/// can be replayed without re-reading the buffer.
#[derive(Debug, Clone)]
pub struct Disassembly<'a> {
    bytes: &'a [u8],
    options: DisassemblyOptions,
    position: usize,
    truncated: bool,
}

impl<'a> Disassembly<'a> {
    /// Creates a sequence positioned at the start of `bytes`.
    pub fn new(bytes: &'a [u8], options: DisassemblyOptions) -> Self {
        Self {
            bytes,
            options,
            position: 0,
            truncated: false,
        }
    }

    /// Byte position of the next instruction within the buffer.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether decoding stopped on an instruction cut off by the buffer end.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Returns a fresh sequence over the same buffer and options.
    pub fn restart(&self) -> Self {
        Self::new(self.bytes, self.options)
    }
}

impl Iterator for Disassembly<'_> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        if self.truncated {
            return None;
        }

        let address = self
            .options
            .start_address
            .wrapping_add(self.position as u16);
        let offset = self.options.base_offset.wrapping_add(self.position);

        let instr = match decode_instruction(self.bytes.get(self.position..)?, address, offset)? {
            Decoded::Instruction(instr) => instr,
            Decoded::Undefined { opcode } => Instruction::undefined(address, offset, opcode),
            Decoded::Truncated { .. } => {
                self.truncated = true;
                return None;
            }
        };

        self.position += instr.size_bytes as usize;
        Some(instr)
    }
}

impl FusedIterator for Disassembly<'_> {}

/// Disassembles a byte slice lazily.
///
/// # Examples
///
/// ```
/// use rom6502::{disassemble, DisassemblyOptions};
///
/// let options = DisassemblyOptions { start_address: 0x8000, base_offset: 0x17B0 };
/// let lines: Vec<String> = disassemble(&[0xA9, 0x00, 0x8D, 0x01, 0x20], options)
///     .map(|instr| instr.to_string())
///     .collect();
///
/// assert_eq!(lines[0], "$8000 [17B0]: A9 00        LDA  #$00");
/// assert_eq!(lines[1], "$8002 [17B2]: 8D 01 20     STA  $2001 ; PPU_MASK");
/// ```
pub fn disassemble(bytes: &[u8], options: DisassemblyOptions) -> Disassembly<'_> {
    Disassembly::new(bytes, options)
}

/// Disassembles a byte slice into rendered listing lines.
pub fn listing(bytes: &[u8], options: DisassemblyOptions) -> Vec<String> {
    disassemble(bytes, options)
        .map(|instr| instr.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassemble_empty() {
        let mut seq = disassemble(&[], DisassemblyOptions::default());
        assert!(seq.next().is_none());
        assert!(!seq.truncated());
    }

    #[test]
    fn test_truncated_tail_is_dropped() {
        let bytes = [0xEA, 0x8D, 0x01];
        let mut seq = disassemble(&bytes, DisassemblyOptions::default());

        assert_eq!(seq.next().map(|i| i.mnemonic), Some("NOP"));
        assert!(seq.next().is_none());
        assert!(seq.truncated());
        assert_eq!(seq.position(), 1);
        assert!(seq.next().is_none());
    }

    #[test]
    fn test_restart_replays() {
        let bytes = [0xA9, 0x01, 0xEA];
        let mut seq = disassemble(&bytes, DisassemblyOptions::default());
        let first: Vec<_> = seq.by_ref().collect();
        let second: Vec<_> = seq.restart().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_offsets_follow_position() {
        let options = DisassemblyOptions {
            start_address: 0xFFFF,
            base_offset: 0x7F4F,
        };
        let instrs: Vec<_> = disassemble(&[0xEA, 0xEA], options).collect();
        assert_eq!(instrs[0].address, 0xFFFF);
        assert_eq!(instrs[1].address, 0x0000);
        assert_eq!(instrs[1].offset, 0x7F50);
    }

    #[test]
    fn test_offsets_wrap_at_usize_max() {
        let options = DisassemblyOptions {
            start_address: 0x8000,
            base_offset: usize::MAX,
        };
        let instrs: Vec<_> = disassemble(&[0xEA, 0xEA], options).collect();
        assert_eq!(instrs.len(), 2);
        assert_eq!(instrs[0].offset, usize::MAX);
        assert_eq!(instrs[1].offset, 0);
    }
}
