//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the register/memory state
//! a routine runs against, and the fetch-decode-execute loop that drives it.
//!
//! ## CPU State
//!
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF), wraps on push/pop
//! - **Status flags**: N, Z, C only. No implemented opcode reads or writes V, D, I or B.
//!
//! ## Execution Model
//!
//! - `step()`: execute one instruction
//! - `run(start, budget)`: execute from `start` until the routine returns, an
//!   unsupported opcode is fetched, or `budget` instructions have run
//!
//! A CPU is meant to be built fresh for every run from an explicit snapshot so
//! results never depend on a previous analysis.

use bitflags::bitflags;
use log::{debug, trace, warn};

use crate::instructions::{self, operation_for};
use crate::memory::STACK_BASE;
use crate::{AddressingMode, ExecutionError, MemoryBus};

/// Step budget used by the patch test harness. Callers still pass it
/// explicitly to every [`CPU::run`].
pub const DEFAULT_STEP_BUDGET: u64 = 10_000;

bitflags! {
    /// Processor status bits modeled by the executor, at their hardware positions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StatusFlags: u8 {
        /// Bit 7 of the last result.
        const NEGATIVE = 0b1000_0000;
        /// Last result was zero.
        const ZERO = 0b0000_0010;
        /// Unsigned carry out of addition, no-borrow for subtraction, shifted-out bit.
        const CARRY = 0b0000_0001;
    }
}

/// Result of executing a single instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Execution continues at the new program counter.
    Continue,
    /// The routine's own RTS executed (no pending JSR inside the run).
    Returned,
}

/// Summary of a run that returned normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Instructions executed, including the final RTS.
    pub steps: u64,
    /// Address of the RTS that ended the run.
    pub pc: u16,
}

/// 6502 CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait.
///
/// # Examples
///
/// ```
/// use rom6502::{CPU, FlatMemory, MemoryBus, DEFAULT_STEP_BUDGET};
///
/// // STA $F6 / RTS
/// let mut memory = FlatMemory::new();
/// memory.load(0xFF40, &[0x85, 0xF6, 0x60]).unwrap();
///
/// let mut cpu = CPU::new(memory);
/// cpu.set_a(0x02);
///
/// let summary = cpu.run(0xFF40, DEFAULT_STEP_BUDGET).unwrap();
/// assert_eq!(summary.steps, 2);
/// assert_eq!(cpu.memory().read(0x00F6), 0x02);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// N, Z and C flags
    pub(crate) status: StatusFlags,

    /// JSRs executed without a matching RTS
    pub(crate) call_depth: u64,

    /// Total instructions executed
    pub(crate) steps: u64,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU over the given memory.
    ///
    /// Initial state matches the patch test harness: A, X, Y and PC are zero,
    /// SP is 0xFF and no flags are set. Registers can be adjusted with the
    /// setters before calling [`CPU::run`].
    pub fn new(memory: M) -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: 0x0000,
            sp: 0xFF,
            status: StatusFlags::empty(),
            call_depth: 0,
            steps: 0,
            memory,
        }
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// 1. Fetch opcode byte at PC
    /// 2. Look up its operation in the executor's own opcode mapping
    /// 3. Apply the operation, which also moves PC
    ///
    /// # Returns
    ///
    /// - `Ok(StepOutcome::Continue)` after an ordinary instruction
    /// - `Ok(StepOutcome::Returned)` when an RTS ends the routine
    /// - `Err(ExecutionError::UnsupportedOpcode { .. })` if the byte is not modeled;
    ///   PC and state are left untouched
    pub fn step(&mut self) -> Result<StepOutcome, ExecutionError> {
        let address = self.pc;
        let opcode = self.memory.read(address);

        let operation = operation_for(opcode)
            .ok_or(ExecutionError::UnsupportedOpcode { opcode, address })?;

        trace!(
            "${:04X}: {:02X} {:?} A={:02X} X={:02X} Y={:02X} SP={:02X} P={:02X}",
            address,
            opcode,
            operation,
            self.a,
            self.x,
            self.y,
            self.sp,
            self.status.bits()
        );

        let outcome = instructions::execute(self, operation);
        self.steps += 1;

        Ok(outcome)
    }

    /// Runs the routine at `start` until it returns.
    ///
    /// `budget` is the maximum number of instructions to execute, the final
    /// RTS included. Running out of budget is an error, never a success.
    ///
    /// # Examples
    ///
    /// ```
    /// use rom6502::{CPU, ExecutionError, FlatMemory};
    ///
    /// // BEQ to itself with Z forced on
    /// let mut memory = FlatMemory::new();
    /// memory.load(0x8000, &[0xA9, 0x00, 0xF0, 0xFE]).unwrap();
    ///
    /// let mut cpu = CPU::new(memory);
    /// assert_eq!(
    ///     cpu.run(0x8000, 100),
    ///     Err(ExecutionError::BudgetExceeded { budget: 100, pc: 0x8002 })
    /// );
    /// ```
    pub fn run(&mut self, start: u16, budget: u64) -> Result<RunSummary, ExecutionError> {
        self.pc = start;
        self.call_depth = 0;

        debug!("run from ${:04X} with a budget of {} steps", start, budget);

        let mut steps = 0u64;
        loop {
            if steps >= budget {
                let err = ExecutionError::BudgetExceeded {
                    budget,
                    pc: self.pc,
                };
                warn!("{}", err);
                return Err(err);
            }

            let outcome = self.step().inspect_err(|err| warn!("{}", err))?;
            steps += 1;

            if outcome == StepOutcome::Returned {
                debug!("returned at ${:04X} after {} steps", self.pc, steps);
                return Ok(RunSummary { steps, pc: self.pc });
            }
        }
    }

    // ========== Operand Resolution ==========

    /// Returns the effective address for the instruction at PC.
    ///
    /// - Immediate: the address of the operand byte itself
    /// - Relative: the branch target
    /// - Indirect: the pointed-to address (page-wrap quirk included)
    /// - Implied/Accumulator: no operand, the opcode address is returned
    pub(crate) fn effective_address(&self, mode: AddressingMode) -> u16 {
        let operand_addr = self.pc.wrapping_add(1);

        match mode {
            AddressingMode::Implied | AddressingMode::Accumulator => self.pc,
            AddressingMode::Immediate => operand_addr,
            AddressingMode::ZeroPage => self.memory.read(operand_addr) as u16,
            AddressingMode::ZeroPageX => self.memory.read(operand_addr).wrapping_add(self.x) as u16,
            AddressingMode::ZeroPageY => self.memory.read(operand_addr).wrapping_add(self.y) as u16,
            AddressingMode::Relative => {
                let displacement = self.memory.read(operand_addr) as i8;
                branch_target(self.pc, displacement)
            }
            AddressingMode::Absolute => self.memory.read_word(operand_addr),
            AddressingMode::AbsoluteX => self
                .memory
                .read_word(operand_addr)
                .wrapping_add(self.x as u16),
            AddressingMode::AbsoluteY => self
                .memory
                .read_word(operand_addr)
                .wrapping_add(self.y as u16),
            AddressingMode::Indirect => {
                let ptr = self.memory.read_word(operand_addr);
                // High byte is fetched from the same page when the pointer ends in $FF
                let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
                u16::from_le_bytes([self.memory.read(ptr), self.memory.read(hi_addr)])
            }
            AddressingMode::IndirectX => {
                let zp = self.memory.read(operand_addr).wrapping_add(self.x);
                self.zero_page_pointer(zp)
            }
            AddressingMode::IndirectY => {
                let zp = self.memory.read(operand_addr);
                self.zero_page_pointer(zp).wrapping_add(self.y as u16)
            }
        }
    }

    /// Reads the value an instruction operates on.
    pub(crate) fn read_operand(&self, mode: AddressingMode) -> u8 {
        match mode {
            AddressingMode::Accumulator => self.a,
            _ => self.memory.read(self.effective_address(mode)),
        }
    }

    fn zero_page_pointer(&self, zp: u8) -> u16 {
        u16::from_le_bytes([
            self.memory.read(zp as u16),
            self.memory.read(zp.wrapping_add(1) as u16),
        ])
    }

    // ========== Flag and Stack Helpers ==========

    /// Sets Z and N from a result byte.
    pub(crate) fn set_zn(&mut self, value: u8) {
        self.status.set(StatusFlags::ZERO, value == 0);
        self.status.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
    }

    pub(crate) fn set_carry(&mut self, carry: bool) {
        self.status.set(StatusFlags::CARRY, carry);
    }

    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.sp as u16)
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the modeled status flags.
    pub fn flags(&self) -> StatusFlags {
        self.status
    }

    /// Returns the status flags packed at their hardware bit positions (N.....ZC).
    pub fn status(&self) -> u8 {
        self.status.bits()
    }

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.status.contains(StatusFlags::NEGATIVE)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.status.contains(StatusFlags::ZERO)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.status.contains(StatusFlags::CARRY)
    }

    /// Returns the number of JSRs still awaiting their RTS.
    pub fn call_depth(&self) -> u64 {
        self.call_depth
    }

    /// Returns the total number of instructions executed by this CPU.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Returns a shared reference to memory.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to memory, for fixtures and assertions.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU and hands back its memory.
    pub fn into_memory(self) -> M {
        self.memory
    }

    // ========== Register Setters ==========

    /// Sets the accumulator.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Replaces all status flags.
    pub fn set_flags(&mut self, flags: StatusFlags) {
        self.status = flags;
    }

    /// Sets or clears the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.status.set(StatusFlags::NEGATIVE, value);
    }

    /// Sets or clears the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.status.set(StatusFlags::ZERO, value);
    }

    /// Sets or clears the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.status.set(StatusFlags::CARRY, value);
    }
}

impl<M: MemoryBus> std::fmt::Debug for CPU<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("a", &self.a)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("pc", &self.pc)
            .field("sp", &self.sp)
            .field("status", &self.status)
            .field("call_depth", &self.call_depth)
            .field("steps", &self.steps)
            .finish()
    }
}

/// Computes a branch destination: the address after the 2-byte branch at
/// `address`, plus the sign-extended displacement. Wraps at 16 bits.
pub fn branch_target(address: u16, displacement: i8) -> u16 {
    address
        .wrapping_add(2)
        .wrapping_add_signed(displacement as i16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    #[test]
    fn test_cpu_initialization() {
        let cpu = CPU::new(FlatMemory::new());

        assert_eq!(cpu.pc(), 0x0000);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.y(), 0x00);
        assert_eq!(cpu.steps(), 0);
        assert_eq!(cpu.call_depth(), 0);
        assert_eq!(cpu.flags(), StatusFlags::empty());
    }

    #[test]
    fn test_status_register_packing() {
        let mut cpu = CPU::new(FlatMemory::new());
        cpu.set_flag_n(true);
        cpu.set_flag_c(true);

        assert_eq!(cpu.status(), 0b1000_0001);

        cpu.set_flag_n(false);
        cpu.set_flag_z(true);
        assert_eq!(cpu.status(), 0b0000_0011);
    }

    #[test]
    fn test_step_unsupported_leaves_state() {
        let mut mem = FlatMemory::new();
        mem.write(0x8000, 0x00); // BRK is documented but not modeled

        let mut cpu = CPU::new(mem);
        cpu.set_pc(0x8000);

        assert_eq!(
            cpu.step(),
            Err(ExecutionError::UnsupportedOpcode {
                opcode: 0x00,
                address: 0x8000
            })
        );
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.steps(), 0);
    }

    #[test]
    fn test_push_pop_wraps_stack_pointer() {
        let mut cpu = CPU::new(FlatMemory::new());
        cpu.set_sp(0x00);

        cpu.push(0xAB);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.memory().read(0x0100), 0xAB);

        assert_eq!(cpu.pop(), 0xAB);
        assert_eq!(cpu.sp(), 0x00);
    }

    #[test]
    fn test_effective_address_zero_page_x_wraps() {
        let mut mem = FlatMemory::new();
        mem.load(0x8000, &[0xB5, 0xF0]).unwrap();
        let mut cpu = CPU::new(mem);
        cpu.set_pc(0x8000);
        cpu.set_x(0x20);

        assert_eq!(cpu.effective_address(AddressingMode::ZeroPageX), 0x0010);
    }

    #[test]
    fn test_effective_address_indirect_page_wrap() {
        let mut mem = FlatMemory::new();
        mem.load(0x8000, &[0x6C, 0xFF, 0x10]).unwrap();
        mem.write(0x10FF, 0x34);
        mem.write(0x1000, 0x12);
        mem.write(0x1100, 0x99);
        let mut cpu = CPU::new(mem);
        cpu.set_pc(0x8000);

        assert_eq!(cpu.effective_address(AddressingMode::Indirect), 0x1234);
    }

    #[test]
    fn test_effective_address_indirect_y() {
        let mut mem = FlatMemory::new();
        mem.load(0x8000, &[0xB1, 0x40]).unwrap();
        mem.write(0x0040, 0x00);
        mem.write(0x0041, 0x30);
        let mut cpu = CPU::new(mem);
        cpu.set_pc(0x8000);
        cpu.set_y(0x05);

        assert_eq!(cpu.effective_address(AddressingMode::IndirectY), 0x3005);
    }

    #[test]
    fn test_branch_target_extremes() {
        assert_eq!(branch_target(0x8000, 127), 0x8081);
        assert_eq!(branch_target(0x8000, -128), 0x7F82);
        assert_eq!(branch_target(0x8000, -2), 0x8000);
        assert_eq!(branch_target(0xFFFE, 0), 0x0000);
    }
}
