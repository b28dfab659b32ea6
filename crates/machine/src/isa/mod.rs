//! Instruction Set Architecture.
//!
//! This module defines the machine's 14 operations and how 32-bit words map onto them. It provides:
//! 1. **Opcodes:** Numeric opcode constants and mnemonic names.
//! 2. **Field Extraction:** The `InstructionBits` trait for pulling operand fields out of a word.
//! 3. **Decoding:** Conversion of a word into the closed `Instruction` enum, rejecting reserved opcodes.
//! 4. **Disassembly:** Human-readable rendering for traces and diagnostics.

/// Instruction decoder.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction field extraction.
pub mod instruction;

/// Opcode constants.
pub mod opcodes;

pub use decode::{Instruction, decode};
pub use disasm::disassemble;
pub use instruction::InstructionBits;
