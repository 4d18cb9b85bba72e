//! Fuzz target for the disassembler.
//!
//! This target feeds arbitrary byte sequences to the disassembler
//! to find edge cases and crashes in instruction decoding.

#![no_main]

use arbitrary::Arbitrary;
use rom6502::{disassemble, DisassemblyOptions};
use libfuzzer_sys::fuzz_target;

/// Disassembly options for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzOptions {
    start_address: u16,
    base_offset: u16,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    options: FuzzOptions,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to prevent OOM
    if input.bytes.len() > 65536 {
        return;
    }

    let options = DisassemblyOptions {
        start_address: input.options.start_address,
        base_offset: input.options.base_offset as usize,
    };

    let mut instructions = disassemble(&input.bytes, options);

    let mut total_size: usize = 0;
    let mut expected_address = input.options.start_address;

    for instr in instructions.by_ref() {
        assert_eq!(instr.address, expected_address);
        assert_eq!(instr.offset, options.base_offset + total_size);

        // Size should be 1-3 bytes and match the raw bytes exactly
        assert!(instr.size_bytes >= 1 && instr.size_bytes <= 3);
        assert_eq!(instr.bytes.len(), instr.size_bytes as usize);
        assert_eq!(instr.bytes[0], instr.opcode);

        // Rendering never panics
        let _ = instr.to_string();

        total_size += instr.size_bytes as usize;
        expected_address = expected_address.wrapping_add(instr.size_bytes as u16);
    }

    // Everything is consumed except a cut-off final instruction
    if instructions.truncated() {
        assert!(input.bytes.len() - total_size < 3);
    } else {
        assert_eq!(total_size, input.bytes.len());
    }
});
