//! WebAssembly bindings for the rom6502 engine.
//!
//! Exposes listing generation and routine verification to JavaScript tooling.

pub mod api;

pub use api::{disassemble_listing, RoutineRunner};
