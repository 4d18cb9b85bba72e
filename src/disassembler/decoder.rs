//! Instruction decoder for the 6502 disassembler

use crate::disassembler::formatter::{format_operand, resolve_target};
use crate::disassembler::registers::register_name;
use crate::disassembler::Instruction;
use crate::opcodes::lookup;

/// Outcome of decoding one instruction from the front of a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// A complete documented instruction.
    Instruction(Instruction),

    /// The byte has no opcode table entry.
    Undefined { opcode: u8 },

    /// The opcode needs more bytes than the buffer holds.
    Truncated { opcode: u8, needed: u8, available: usize },
}

/// Decode a single instruction from a byte slice
///
/// # Arguments
///
/// * `bytes` - The byte slice starting at the instruction to decode
/// * `address` - The logical address of this instruction
/// * `offset` - The cross-reference offset of this instruction
///
/// # Returns
///
/// `None` for an empty slice, otherwise the decode outcome.
pub fn decode_instruction(bytes: &[u8], address: u16, offset: usize) -> Option<Decoded> {
    let &opcode = bytes.first()?;

    let Some(metadata) = lookup(opcode) else {
        return Some(Decoded::Undefined { opcode });
    };

    let size = metadata.size_bytes as usize;
    if bytes.len() < size {
        return Some(Decoded::Truncated {
            opcode,
            needed: metadata.size_bytes,
            available: bytes.len(),
        });
    }

    let raw = &bytes[..size];
    let mode = metadata.addressing_mode;
    let target = resolve_target(mode, &raw[1..], address);

    Some(Decoded::Instruction(Instruction {
        address,
        offset,
        opcode,
        mnemonic: metadata.mnemonic,
        addressing_mode: mode,
        bytes: raw.to_vec(),
        size_bytes: metadata.size_bytes,
        operand: format_operand(mode, &raw[1..], address),
        target,
        annotation: target.and_then(register_name),
    }))
}
