//! Instruction Decoder.
//!
//! This module turns a raw 32-bit word into an `Instruction`. Decoding is a separate
//! step from execution: a reserved opcode is rejected here, before any state changes.

use crate::common::{Reg, Result, VmError};
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes;

/// A decoded instruction.
///
/// Register fields name the operand registers, not their contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `if r[c] != 0 { r[a] = r[b] }`
    ConditionalMove {
        /// Destination.
        a: Reg,
        /// Source.
        b: Reg,
        /// Condition.
        c: Reg,
    },
    /// `r[a] = seg[r[b]][r[c]]`
    SegmentRead {
        /// Destination.
        a: Reg,
        /// Segment handle.
        b: Reg,
        /// Word offset.
        c: Reg,
    },
    /// `seg[r[a]][r[b]] = r[c]`
    SegmentWrite {
        /// Segment handle.
        a: Reg,
        /// Word offset.
        b: Reg,
        /// Value.
        c: Reg,
    },
    /// `r[a] = r[b] + r[c]` (wrapping)
    Add {
        /// Destination.
        a: Reg,
        /// Left operand.
        b: Reg,
        /// Right operand.
        c: Reg,
    },
    /// `r[a] = r[b] * r[c]` (wrapping)
    Multiply {
        /// Destination.
        a: Reg,
        /// Left operand.
        b: Reg,
        /// Right operand.
        c: Reg,
    },
    /// `r[a] = r[b] / r[c]` (unsigned)
    Divide {
        /// Destination.
        a: Reg,
        /// Dividend.
        b: Reg,
        /// Divisor.
        c: Reg,
    },
    /// `r[a] = !(r[b] & r[c])`
    Nand {
        /// Destination.
        a: Reg,
        /// Left operand.
        b: Reg,
        /// Right operand.
        c: Reg,
    },
    /// Stop the machine.
    Halt,
    /// `r[b] = allocate(r[c])`
    Allocate {
        /// Receives the new handle.
        b: Reg,
        /// Requested length in words.
        c: Reg,
    },
    /// `free(r[c])`
    Free {
        /// Handle to release.
        c: Reg,
    },
    /// Write the byte `r[c]` to the output channel.
    Output {
        /// Byte value.
        c: Reg,
    },
    /// Read a byte (or the end-of-stream sentinel) into `r[c]`.
    Input {
        /// Destination.
        c: Reg,
    },
    /// Replace segment 0 with segment `r[b]`, then set the program counter to `r[c]`.
    LoadProgram {
        /// Source segment handle.
        b: Reg,
        /// New program counter.
        c: Reg,
    },
    /// `r[a] = value`
    LoadImmediate {
        /// Destination (bits 27:25).
        a: Reg,
        /// 25-bit literal.
        value: u32,
    },
}

impl Instruction {
    /// Returns the numeric opcode of this instruction.
    pub const fn opcode(&self) -> u32 {
        match self {
            Self::ConditionalMove { .. } => opcodes::CMOV,
            Self::SegmentRead { .. } => opcodes::LOAD,
            Self::SegmentWrite { .. } => opcodes::STORE,
            Self::Add { .. } => opcodes::ADD,
            Self::Multiply { .. } => opcodes::MUL,
            Self::Divide { .. } => opcodes::DIV,
            Self::Nand { .. } => opcodes::NAND,
            Self::Halt => opcodes::HALT,
            Self::Allocate { .. } => opcodes::ALLOC,
            Self::Free { .. } => opcodes::FREE,
            Self::Output { .. } => opcodes::OUTPUT,
            Self::Input { .. } => opcodes::INPUT,
            Self::LoadProgram { .. } => opcodes::LOAD_PROGRAM,
            Self::LoadImmediate { .. } => opcodes::LOAD_IMMEDIATE,
        }
    }
}

/// Decodes a 32-bit instruction word.
///
/// # Arguments
///
/// * `word` - The raw instruction word.
///
/// # Returns
///
/// The decoded `Instruction`.
///
/// # Errors
///
/// Returns `VmError::InvalidOpcode` for opcodes 14 and 15.
pub fn decode(word: u32) -> Result<Instruction> {
    let (a, b, c) = (word.reg_a(), word.reg_b(), word.reg_c());
    let inst = match word.opcode() {
        opcodes::CMOV => Instruction::ConditionalMove { a, b, c },
        opcodes::LOAD => Instruction::SegmentRead { a, b, c },
        opcodes::STORE => Instruction::SegmentWrite { a, b, c },
        opcodes::ADD => Instruction::Add { a, b, c },
        opcodes::MUL => Instruction::Multiply { a, b, c },
        opcodes::DIV => Instruction::Divide { a, b, c },
        opcodes::NAND => Instruction::Nand { a, b, c },
        opcodes::HALT => Instruction::Halt,
        opcodes::ALLOC => Instruction::Allocate { b, c },
        opcodes::FREE => Instruction::Free { c },
        opcodes::OUTPUT => Instruction::Output { c },
        opcodes::INPUT => Instruction::Input { c },
        opcodes::LOAD_PROGRAM => Instruction::LoadProgram { b, c },
        opcodes::LOAD_IMMEDIATE => Instruction::LoadImmediate {
            a: word.imm_reg(),
            value: word.imm_value(),
        },
        opcode => return Err(VmError::InvalidOpcode { opcode, word }),
    };
    Ok(inst)
}
