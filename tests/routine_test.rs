//! End-to-end tests of a hand-assembled patch routine.
//!
//! The routine is a frame-throttled controller input replacement of the kind
//! patched into a ROM. It stores the incoming A into $F6, then every 16th
//! frame (frame counter at $43) overrides the input: bit 5 of the frame
//! requests a rotate ($40), otherwise bit 4 selects Left ($02) or Right ($01).

use rom6502::{disassemble, listing, DisassemblyOptions, FlatMemory, MemoryBus, CPU, DEFAULT_STEP_BUDGET};

const ROUTINE_START: u16 = 0xFF40;
const FRAME_COUNTER: u16 = 0x0043;
const INPUT: u16 = 0x00F6;

const ROUTINE: [u8; 33] = [
    0x85, 0xF6, // STA $F6
    0xA5, 0x43, // LDA $43
    0x29, 0x0F, // AND #$0F
    0xD0, 0x18, // BNE done
    0xA5, 0x43, // LDA $43
    0x29, 0x20, // AND #$20
    0xD0, 0x0E, // BNE rotate
    0xA5, 0x43, // LDA $43
    0x29, 0x10, // AND #$10
    0xF0, 0x04, // BEQ right
    0xA9, 0x02, // LDA #$02
    0xD0, 0x06, // BNE store
    0xA9, 0x01, // right: LDA #$01
    0xD0, 0x02, // BNE store
    0xA9, 0x40, // rotate: LDA #$40
    0x85, 0xF6, // store: STA $F6
    0x60, // done: RTS
];

/// Runs the routine with the given frame counter and incoming controller byte.
fn run_routine(frame: u8, input: u8) -> (CPU<FlatMemory>, u64) {
    let mut memory = FlatMemory::from_snapshot([(FRAME_COUNTER, frame)]);
    memory.load(ROUTINE_START, &ROUTINE).unwrap();

    let mut cpu = CPU::new(memory);
    cpu.set_a(input);

    let summary = cpu.run(ROUTINE_START, DEFAULT_STEP_BUDGET).unwrap();
    assert_eq!(summary.pc, 0xFF60);
    (cpu, summary.steps)
}

#[test]
fn test_off_frames_pass_input_through() {
    for frame in [0x01, 0x0F, 0x21, 0x35] {
        let (cpu, steps) = run_routine(frame, 0x80);
        assert_eq!(cpu.memory().read(INPUT), 0x80, "frame {:02X}", frame);
        assert_eq!(steps, 5);
    }
}

#[test]
fn test_rotate_frame() {
    let (cpu, _) = run_routine(0x20, 0x00);
    assert_eq!(cpu.memory().read(INPUT), 0x40);

    let (cpu, _) = run_routine(0x30, 0x00);
    assert_eq!(cpu.memory().read(INPUT), 0x40);
}

#[test]
fn test_left_frame() {
    let (cpu, _) = run_routine(0x10, 0x00);
    assert_eq!(cpu.memory().read(INPUT), 0x02);
}

#[test]
fn test_right_frame() {
    let (cpu, steps) = run_routine(0x00, 0x00);
    assert_eq!(cpu.memory().read(INPUT), 0x01);
    assert_eq!(steps, 14);
}

#[test]
fn test_routine_leaves_frame_counter() {
    for frame in 0..=0xFFu8 {
        let (cpu, _) = run_routine(frame, 0x00);
        assert_eq!(cpu.memory().read(FRAME_COUNTER), frame);
        assert_eq!(cpu.sp(), 0xFF);
    }
}

#[test]
fn test_routine_listing() {
    let options = DisassemblyOptions {
        start_address: ROUTINE_START,
        base_offset: 0x7F50,
    };

    let instructions: Vec<_> = disassemble(&ROUTINE, options).collect();
    assert_eq!(instructions.len(), 17);
    assert!(instructions.iter().all(|i| !i.is_undefined()));

    let lines = listing(&ROUTINE, options);
    assert_eq!(lines[0], "$FF40 [7F50]: 85 F6        STA  $F6");
    assert_eq!(lines[3], "$FF46 [7F56]: D0 18        BNE  $FF60");
    assert_eq!(lines[16], "$FF60 [7F70]: 60           RTS");
}
