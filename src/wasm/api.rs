//! WASM API for the decode-and-execute engine.
//!
//! Provides JavaScript-callable interfaces for disassembly listings and for
//! running a routine against a memory snapshot.

use crate::{disassemble, DisassemblyOptions, ExecutionError, FlatMemory, MemoryBus, CPU};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// One decoded listing line
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    offset: u32,
    bytes: Vec<u8>,
    mnemonic: String,
    operand: String,
    annotation: Option<String>,
    text: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mnemonic(&self) -> String {
        self.mnemonic.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn operand(&self) -> String {
        self.operand.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn annotation(&self) -> Option<String> {
        self.annotation.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// Disassemble `bytes` into an array of `DisassemblyLine`
#[wasm_bindgen]
pub fn disassemble_listing(bytes: &[u8], start_address: u16, base_offset: u32) -> js_sys::Array {
    let options = DisassemblyOptions {
        start_address,
        base_offset: base_offset as usize,
    };

    disassemble(bytes, options)
        .map(|instr| {
            JsValue::from(DisassemblyLine {
                address: instr.address,
                offset: instr.offset as u32,
                text: instr.to_string(),
                bytes: instr.bytes,
                mnemonic: instr.mnemonic.to_string(),
                operand: instr.operand,
                annotation: instr.annotation.map(str::to_string),
            })
        })
        .collect()
}

/// Outcome of a routine run
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct RunReport {
    returned: bool,
    steps: f64,
    pc: u16,
    error_message: Option<String>,
    unsupported_opcode: Option<u8>,
}

#[wasm_bindgen]
impl RunReport {
    #[wasm_bindgen(getter)]
    pub fn returned(&self) -> bool {
        self.returned
    }

    #[wasm_bindgen(getter)]
    pub fn steps(&self) -> f64 {
        self.steps
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.pc
    }

    #[wasm_bindgen(getter)]
    pub fn error_message(&self) -> Option<String> {
        self.error_message.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn unsupported_opcode(&self) -> Option<u8> {
        self.unsupported_opcode
    }
}

/// Routine verification interface for JavaScript
#[wasm_bindgen]
pub struct RoutineRunner {
    cpu: CPU<FlatMemory>,
}

#[wasm_bindgen]
impl RoutineRunner {
    /// Create a runner over zeroed memory
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        RoutineRunner {
            cpu: CPU::new(FlatMemory::new()),
        }
    }

    /// Place routine bytes at `start_addr`
    pub fn load_routine(&mut self, routine: &[u8], start_addr: u16) -> Result<(), JsError> {
        self.cpu
            .memory_mut()
            .load(start_addr, routine)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Run from `start_addr` for at most `budget` instructions
    pub fn run(&mut self, start_addr: u16, budget: u32) -> RunReport {
        let steps_before = self.cpu.steps();
        let result = self.cpu.run(start_addr, budget as u64);
        let steps = (self.cpu.steps() - steps_before) as f64;

        match result {
            Ok(summary) => RunReport {
                returned: true,
                steps,
                pc: summary.pc,
                error_message: None,
                unsupported_opcode: None,
            },
            Err(err) => RunReport {
                returned: false,
                steps,
                pc: self.cpu.pc(),
                error_message: Some(err.to_string()),
                unsupported_opcode: match err {
                    ExecutionError::UnsupportedOpcode { opcode, .. } => Some(opcode),
                    ExecutionError::BudgetExceeded { .. } => None,
                },
            },
        }
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    // Register setters
    pub fn set_a(&mut self, value: u8) {
        self.cpu.set_a(value);
    }

    pub fn set_x(&mut self, value: u8) {
        self.cpu.set_x(value);
    }

    pub fn set_y(&mut self, value: u8) {
        self.cpu.set_y(value);
    }

    pub fn set_sp(&mut self, value: u8) {
        self.cpu.set_sp(value);
    }

    // Memory access methods

    /// Read a single byte from memory
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.memory().read(addr)
    }

    /// Write a single byte to memory
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }
}

impl Default for RoutineRunner {
    fn default() -> Self {
        Self::new()
    }
}
