//! Instruction field extraction.
//!
//! Two layouts share the opcode field in bits 31:28:
//!
//! ```text
//! standard:  | op:4 | unused:19 | A:3 | B:3 | C:3 |
//! immediate: | op:4 | A:3 |          value:25         |
//! ```

use crate::common::Reg;
use crate::common::constants::{
    IMM_REG_SHIFT, IMM_VALUE_MASK, OPCODE_MASK, OPCODE_SHIFT, REG_A_SHIFT, REG_B_SHIFT,
    REG_C_SHIFT,
};

/// Trait for extracting instruction fields from encoded instruction words.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 31:28).
    fn opcode(&self) -> u32;

    /// Extracts operand A of the standard layout (bits 8:6).
    fn reg_a(&self) -> Reg;

    /// Extracts operand B of the standard layout (bits 5:3).
    fn reg_b(&self) -> Reg;

    /// Extracts operand C of the standard layout (bits 2:0).
    fn reg_c(&self) -> Reg;

    /// Extracts the destination register of the immediate layout (bits 27:25).
    fn imm_reg(&self) -> Reg;

    /// Extracts the unsigned 25-bit immediate (bits 24:0).
    fn imm_value(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        (self >> OPCODE_SHIFT) & OPCODE_MASK
    }

    #[inline(always)]
    fn reg_a(&self) -> Reg {
        Reg::from_bits(self >> REG_A_SHIFT)
    }

    #[inline(always)]
    fn reg_b(&self) -> Reg {
        Reg::from_bits(self >> REG_B_SHIFT)
    }

    #[inline(always)]
    fn reg_c(&self) -> Reg {
        Reg::from_bits(self >> REG_C_SHIFT)
    }

    #[inline(always)]
    fn imm_reg(&self) -> Reg {
        Reg::from_bits(self >> IMM_REG_SHIFT)
    }

    #[inline(always)]
    fn imm_value(&self) -> u32 {
        self & IMM_VALUE_MASK
    }
}
