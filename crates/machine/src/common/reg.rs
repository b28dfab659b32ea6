//! Register File.
//!
//! This module provides the eight general-purpose registers of the machine. It performs:
//! 1. **Storage:** Eight independent 32-bit cells, all zero at reset.
//! 2. **Indexing:** A `Reg` selector built from three instruction bits, so every index is in range.
//! 3. **Debugging:** A dump of the complete register state.

use std::fmt;
use std::ops::{Index, IndexMut};

use super::constants::{NUM_REGISTERS, REG_MASK};

/// A register selector decoded from a 3-bit instruction field.
///
/// Construction masks to three bits, which is what lets `RegisterFile` index
/// without a runtime bounds check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Reg(u8);

impl Reg {
    /// Builds a selector from the low three bits of `bits`.
    #[inline(always)]
    pub const fn from_bits(bits: u32) -> Self {
        Self((bits & REG_MASK) as u8)
    }

    /// Returns the register number (0-7).
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// General-purpose register file.
///
/// Contains eight 32-bit registers with no hardwired values and no implicit
/// relationships between them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u32; NUM_REGISTERS],
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    ///
    /// # Returns
    ///
    /// A new `RegisterFile` instance with all registers set to 0.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGISTERS],
        }
    }

    /// Reads a register value.
    ///
    /// # Arguments
    ///
    /// * `reg` - Register selector.
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the register.
    #[inline(always)]
    pub const fn read(&self, reg: Reg) -> u32 {
        self.regs[reg.index()]
    }

    /// Writes a value to a register.
    ///
    /// # Arguments
    ///
    /// * `reg` - Register selector.
    /// * `val` - The 32-bit value to write.
    #[inline(always)]
    pub const fn write(&mut self, reg: Reg, val: u32) {
        self.regs[reg.index()] = val;
    }

    /// Returns all eight register values in order.
    pub const fn as_array(&self) -> &[u32; NUM_REGISTERS] {
        &self.regs
    }

    /// Formats every register as `rN=xxxxxxxx`, four per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (i, pair) in self.regs.chunks(4).enumerate() {
            let base = i * 4;
            let line: Vec<String> = pair
                .iter()
                .enumerate()
                .map(|(j, v)| format!("r{}={:#010x}", base + j, v))
                .collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }
}

impl Index<Reg> for RegisterFile {
    type Output = u32;

    #[inline(always)]
    fn index(&self, reg: Reg) -> &Self::Output {
        &self.regs[reg.index()]
    }
}

impl IndexMut<Reg> for RegisterFile {
    #[inline(always)]
    fn index_mut(&mut self, reg: Reg) -> &mut Self::Output {
        &mut self.regs[reg.index()]
    }
}
