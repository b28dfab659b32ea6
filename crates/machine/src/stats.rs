//! Execution statistics collection and reporting.
//!
//! This module tracks what a run did. It provides:
//! 1. **Throughput:** Retired instructions, host time, and MIPS.
//! 2. **Instruction mix:** Counts per opcode.
//! 3. **I/O:** Bytes written and input reads.
//! 4. **Memory:** Allocations, frees, table growth, peak live segments, and program loads.

use std::fmt;
use std::time::{Duration, Instant};

use crate::isa::Instruction;
use crate::isa::opcodes::{self, OPCODE_COUNT};
use crate::memory::TableStats;

const RULE: &str = "----------------------------------------------------------";

/// Run statistics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Instructions executed to completion.
    pub instructions_retired: u64,
    /// Retired instructions per opcode.
    pub op_counts: [u64; OPCODE_COUNT],
    /// Snapshot of the segment table counters, refreshed by the driver.
    pub memory: TableStats,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            instructions_retired: 0,
            op_counts: [0; OPCODE_COUNT],
            memory: TableStats::default(),
        }
    }
}

impl SimStats {
    /// Records one retired instruction.
    #[inline(always)]
    pub fn record(&mut self, inst: &Instruction) {
        self.instructions_retired += 1;
        self.op_counts[inst.opcode() as usize] += 1;
    }

    /// Retired count for one opcode.
    pub fn count(&self, opcode: u32) -> u64 {
        self.op_counts.get(opcode as usize).copied().unwrap_or(0)
    }

    /// Bytes written by output instructions.
    pub fn output_bytes(&self) -> u64 {
        self.count(opcodes::OUTPUT)
    }

    /// Input instructions executed, including those that hit end of stream.
    pub fn input_reads(&self) -> u64 {
        self.count(opcodes::INPUT)
    }

    /// Host time since the statistics were created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Millions of instructions per host second.
    pub fn mips(&self) -> f64 {
        let seconds = self.elapsed().as_secs_f64();
        if seconds == 0.0 {
            return 0.0;
        }
        self.instructions_retired as f64 / seconds / 1_000_000.0
    }

    /// Prints the full report to stderr.
    pub fn print(&self) {
        eprintln!("{self}");
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.instructions_retired.max(1) as f64;

        writeln!(f, "\n==========================================================")?;
        writeln!(f, "VIRTUAL MACHINE RUN STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "host_seconds             {:.4} s", self.elapsed().as_secs_f64())?;
        writeln!(f, "sim_insts                {}", self.instructions_retired)?;
        writeln!(f, "sim_mips                 {:.2}", self.mips())?;
        writeln!(f, "{RULE}")?;

        writeln!(f, "INSTRUCTION MIX")?;
        for (op, count) in self.op_counts.iter().enumerate() {
            let name = format!("op.{}", opcodes::MNEMONICS[op]);
            writeln!(
                f,
                "  {name:<22} {count} ({:.2}%)",
                *count as f64 / total * 100.0
            )?;
        }
        writeln!(f, "{RULE}")?;

        writeln!(f, "IO")?;
        writeln!(f, "  io.output_bytes        {}", self.output_bytes())?;
        writeln!(f, "  io.input_reads         {}", self.input_reads())?;
        writeln!(f, "{RULE}")?;

        let m = &self.memory;
        writeln!(f, "MEMORY")?;
        writeln!(f, "  seg.allocations        {}", m.allocations)?;
        writeln!(f, "  seg.frees              {}", m.frees)?;
        writeln!(f, "  seg.live               {}", m.live)?;
        writeln!(f, "  seg.peak_live          {}", m.peak_live)?;
        writeln!(f, "  table.growths          {}", m.growths)?;
        writeln!(f, "  program.loads          {}", m.program_loads)?;
        write!(f, "{RULE}")
    }
}
