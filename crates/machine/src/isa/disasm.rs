//! Instruction Disassembler.
//!
//! Converts a 32-bit instruction word into a short mnemonic string for
//! debug tracing, logging, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use umvm_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0xD200_0048), "orto r1, 0x48");
//! assert_eq!(disassemble(0x3000_0053), "add r1, r2, r3");
//! ```

use crate::isa::decode::{Instruction, decode};

/// Disassembles a 32-bit instruction word.
///
/// Returns a mnemonic like `"add r1, r2, r3"`, or `"invalid <word>"` for
/// reserved opcodes.
pub fn disassemble(word: u32) -> String {
    match decode(word) {
        Ok(inst) => format_instruction(&inst),
        Err(_) => format!("invalid {word:#010x}"),
    }
}

/// Renders an already-decoded instruction.
pub fn format_instruction(inst: &Instruction) -> String {
    let name = crate::isa::opcodes::mnemonic(inst.opcode());
    match *inst {
        Instruction::ConditionalMove { a, b, c }
        | Instruction::SegmentRead { a, b, c }
        | Instruction::SegmentWrite { a, b, c }
        | Instruction::Add { a, b, c }
        | Instruction::Multiply { a, b, c }
        | Instruction::Divide { a, b, c }
        | Instruction::Nand { a, b, c } => format!("{name} {a}, {b}, {c}"),
        Instruction::Halt => name.to_string(),
        Instruction::Allocate { b, c } | Instruction::LoadProgram { b, c } => {
            format!("{name} {b}, {c}")
        }
        Instruction::Free { c } | Instruction::Output { c } | Instruction::Input { c } => {
            format!("{name} {c}")
        }
        Instruction::LoadImmediate { a, value } => format!("{name} {a}, {value:#x}"),
    }
}
