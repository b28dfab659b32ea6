//! Global Machine Constants.
//!
//! This module defines constants used across the machine. It includes:
//! 1. **Memory Constants:** Segment size cap and the reserved program handle.
//! 2. **Instruction Constants:** Field masks and shifts for the two instruction layouts.
//! 3. **I/O Constants:** The end-of-stream sentinel and the largest transferable byte value.

/// Largest number of words a single segment may hold (2^24 - 1).
pub const MAX_SEGMENT_WORDS: u32 = (1 << 24) - 1;

/// Handle of the segment holding the currently executing program.
pub const PROGRAM_HANDLE: u32 = 0;

/// Number of general-purpose registers.
pub const NUM_REGISTERS: usize = 8;

/// Size of one machine word in bytes.
pub const WORD_BYTES: usize = 4;

/// Bit shift for the opcode field (bits 31:28).
pub const OPCODE_SHIFT: u32 = 28;

/// Bit mask for the opcode field after shifting.
pub const OPCODE_MASK: u32 = 0xF;

/// Bit mask for a 3-bit register selector.
pub const REG_MASK: u32 = 0x7;

/// Bit shift for operand A in the standard layout (bits 8:6).
pub const REG_A_SHIFT: u32 = 6;

/// Bit shift for operand B in the standard layout (bits 5:3).
pub const REG_B_SHIFT: u32 = 3;

/// Bit shift for operand C in the standard layout (bits 2:0).
pub const REG_C_SHIFT: u32 = 0;

/// Bit shift for the destination register of the immediate-load layout (bits 27:25).
pub const IMM_REG_SHIFT: u32 = 25;

/// Bit mask for the 25-bit immediate value (bits 24:0).
pub const IMM_VALUE_MASK: u32 = 0x01FF_FFFF;

/// Value placed in the destination register when the input stream is exhausted.
pub const END_OF_INPUT: u32 = u32::MAX;

/// Largest register value the output operation accepts.
pub const MAX_OUTPUT_VALUE: u32 = 0xFF;

/// Program image loaded when no path is supplied.
pub const DEFAULT_PROGRAM: &str = "sandmark.umz";
