//! Opcode values (bits 31:28 of an instruction word).

/// Conditional move: `if r[C] != 0 then r[A] := r[B]`.
pub const CMOV: u32 = 0;
/// Segment read: `r[A] := seg[r[B]][r[C]]`.
pub const LOAD: u32 = 1;
/// Segment write: `seg[r[A]][r[B]] := r[C]`.
pub const STORE: u32 = 2;
/// Addition modulo 2^32.
pub const ADD: u32 = 3;
/// Multiplication modulo 2^32.
pub const MUL: u32 = 4;
/// Unsigned division.
pub const DIV: u32 = 5;
/// Bitwise NOT-AND.
pub const NAND: u32 = 6;
/// Stop the machine.
pub const HALT: u32 = 7;
/// Allocate a zeroed segment of `r[C]` words into `r[B]`.
pub const ALLOC: u32 = 8;
/// Free segment `r[C]`.
pub const FREE: u32 = 9;
/// Write the byte in `r[C]` to the output channel.
pub const OUTPUT: u32 = 10;
/// Read one byte from the input channel into `r[C]`.
pub const INPUT: u32 = 11;
/// Replace segment 0 with a copy of segment `r[B]` and jump to `r[C]`.
pub const LOAD_PROGRAM: u32 = 12;
/// Load a 25-bit immediate into the register in bits 27:25.
pub const LOAD_IMMEDIATE: u32 = 13;

/// Number of defined opcodes; 14 and 15 are reserved.
pub const OPCODE_COUNT: usize = 14;

/// Short mnemonics indexed by opcode.
pub const MNEMONICS: [&str; OPCODE_COUNT] = [
    "mov", "get", "set", "add", "mul", "div", "nand", "halt", "allo", "del", "out", "in", "load",
    "orto",
];

/// Returns the mnemonic for `opcode`, or `"???"` for reserved values.
#[inline]
pub fn mnemonic(opcode: u32) -> &'static str {
    MNEMONICS.get(opcode as usize).copied().unwrap_or("???")
}
