//! Machine core.
//!
//! This module holds the architectural state of the machine and the logic that advances it:
//! 1. **State:** The register file, the program counter, and the segment table.
//! 2. **Execution:** Fetch, decode and apply one instruction at a time (see `execution`).

/// Fetch-decode-execute step and per-operation semantics.
pub mod execution;

pub use execution::Flow;

use crate::common::{RegisterFile, Result};
use crate::config::MemoryConfig;
use crate::memory::SegmentTable;

/// Complete architectural state of one machine.
///
/// Everything the instruction set can observe lives here and is owned by a single
/// execution thread.
#[derive(Debug)]
pub struct Machine {
    /// General-purpose registers.
    pub regs: RegisterFile,
    /// Index into segment 0 of the next instruction to fetch.
    pub pc: u32,
    /// All memory segments, including the program in handle 0.
    pub memory: SegmentTable,
}

impl Machine {
    /// Creates a machine with zeroed registers and an empty program segment.
    pub fn new(config: &MemoryConfig) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: 0,
            memory: SegmentTable::new(config),
        }
    }

    /// Creates a machine with `words` installed as segment 0 and the counter at 0.
    ///
    /// # Errors
    ///
    /// Returns `VmError::SegmentTooLarge` if the program exceeds the segment cap.
    pub fn with_program(words: Vec<u32>, config: &MemoryConfig) -> Result<Self> {
        let mut machine = Self::new(config);
        machine.memory.install_program(words)?;
        Ok(machine)
    }

    /// Formats the program counter, program length and registers for diagnostics.
    pub fn dump_state(&self) -> String {
        format!(
            "pc={:#010x} program_len={:#x} handles={}\n{}",
            self.pc,
            self.memory.program().len(),
            self.memory.handle_count(),
            self.regs.dump()
        )
    }
}
