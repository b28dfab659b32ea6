//! Instruction execution.
//!
//! One `step` fetches the word at the program counter, decodes it, advances the counter,
//! and applies the operation. The counter moves before the effect, so a program load
//! leaves the counter exactly at its target.

use crate::common::constants::{END_OF_INPUT, MAX_OUTPUT_VALUE};
use crate::common::{Result, VmError};
use crate::io::Console;
use crate::isa::{Instruction, decode};

use super::Machine;

/// What the driver should do after an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Fetch the next instruction.
    Continue,
    /// The machine executed a halt.
    Halt,
}

impl Machine {
    /// Fetches the instruction word at the program counter.
    ///
    /// # Errors
    ///
    /// Returns `VmError::PcOutOfBounds` if the counter is past the end of segment 0.
    #[inline(always)]
    pub fn fetch(&self) -> Result<u32> {
        self.memory.fetch(self.pc)
    }

    /// Executes one instruction.
    ///
    /// Decode faults leave the machine untouched, including the counter.
    ///
    /// # Arguments
    ///
    /// * `console` - Channel used by the input and output operations.
    ///
    /// # Returns
    ///
    /// The decoded instruction and whether execution should continue.
    ///
    /// # Errors
    ///
    /// Any fault raised by fetch, decode or the operation itself.
    #[inline]
    pub fn step<C: Console + ?Sized>(&mut self, console: &mut C) -> Result<(Instruction, Flow)> {
        let inst = decode(self.fetch()?)?;
        self.pc += 1;
        let flow = self.execute(inst, console)?;
        Ok((inst, flow))
    }

    /// Applies a decoded instruction to the machine state.
    ///
    /// The counter is not advanced here; `step` has already done so.
    ///
    /// # Errors
    ///
    /// Memory, arithmetic and I/O faults.
    pub fn execute<C: Console + ?Sized>(
        &mut self,
        inst: Instruction,
        console: &mut C,
    ) -> Result<Flow> {
        let regs = &mut self.regs;
        match inst {
            Instruction::ConditionalMove { a, b, c } => {
                if regs[c] != 0 {
                    regs[a] = regs[b];
                }
            }
            Instruction::SegmentRead { a, b, c } => {
                regs[a] = self.memory.read(regs[b], regs[c])?;
            }
            Instruction::SegmentWrite { a, b, c } => {
                self.memory.write(regs[a], regs[b], regs[c])?;
            }
            Instruction::Add { a, b, c } => regs[a] = regs[b].wrapping_add(regs[c]),
            Instruction::Multiply { a, b, c } => regs[a] = regs[b].wrapping_mul(regs[c]),
            Instruction::Divide { a, b, c } => {
                regs[a] = regs[b]
                    .checked_div(regs[c])
                    .ok_or(VmError::DivisionByZero)?;
            }
            Instruction::Nand { a, b, c } => regs[a] = !(regs[b] & regs[c]),
            Instruction::Halt => {
                console.flush()?;
                return Ok(Flow::Halt);
            }
            Instruction::Allocate { b, c } => {
                regs[b] = self.memory.allocate(regs[c])?;
            }
            Instruction::Free { c } => self.memory.free(regs[c])?,
            Instruction::Output { c } => {
                let value = regs[c];
                if value > MAX_OUTPUT_VALUE {
                    return Err(VmError::OutputOutOfRange(value));
                }
                console.write_byte(value as u8)?;
            }
            Instruction::Input { c } => {
                regs[c] = console.read_byte()?.map_or(END_OF_INPUT, u32::from);
            }
            Instruction::LoadProgram { b, c } => {
                let (source, target) = (regs[b], regs[c]);
                self.memory.replace_program(source)?;
                self.pc = target;
            }
            Instruction::LoadImmediate { a, value } => regs[a] = value,
        }
        Ok(Flow::Continue)
    }
}
