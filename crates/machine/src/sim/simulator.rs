//! Simulator: owns the machine, its console and the run statistics side-by-side.

use tracing::{info, trace};

use crate::common::{Result, VmError};
use crate::config::Config;
use crate::core::{Flow, Machine};
use crate::io::Console;
use crate::isa::instruction::InstructionBits;
use crate::isa::{disassemble, opcodes};
use crate::stats::SimStats;

use super::loader;

/// Top-level driver: machine state + I/O channel + statistics.
#[derive(Debug)]
pub struct Simulator<C> {
    /// Architectural state.
    pub machine: Machine,
    /// Channel for the input and output operations.
    pub console: C,
    /// Run statistics.
    pub stats: SimStats,
    trace_instructions: bool,
    max_instructions: Option<u64>,
}

impl<C: Console> Simulator<C> {
    /// Creates a simulator around an already-loaded machine.
    pub fn new(machine: Machine, console: C, config: &Config) -> Self {
        Self {
            machine,
            console,
            stats: SimStats::default(),
            trace_instructions: config.general.trace_instructions,
            max_instructions: config.limits.max_instructions,
        }
    }

    /// Builds a machine from a program image and wraps it in a simulator.
    ///
    /// # Arguments
    ///
    /// * `image` - Big-endian program image.
    /// * `console` - I/O channel.
    /// * `config` - Machine configuration.
    ///
    /// # Errors
    ///
    /// Any load fault; no instruction has run when this fails.
    pub fn from_image(image: &[u8], console: C, config: &Config) -> Result<Self> {
        let mut machine = Machine::new(&config.memory);
        let _ = loader::load_program(&mut machine, image)?;
        Ok(Self::new(machine, console, config))
    }

    /// Executes one instruction.
    ///
    /// # Errors
    ///
    /// Any machine fault, or `VmError::InstructionLimit` once the configured ceiling is hit.
    #[inline]
    pub fn tick(&mut self) -> Result<Flow> {
        let retired = self.stats.instructions_retired;
        if let Some(limit) = self.max_instructions.filter(|&l| retired >= l) {
            return Err(VmError::InstructionLimit(limit));
        }
        if self.trace_instructions {
            self.trace_state();
        }
        let (inst, flow) = self.machine.step(&mut self.console)?;
        self.stats.record(&inst);
        Ok(flow)
    }

    /// Runs until the machine halts or faults.
    ///
    /// Output is flushed in both cases. Memory counters in `stats` are refreshed on exit.
    ///
    /// # Errors
    ///
    /// The first fault raised.
    pub fn run(&mut self) -> Result<()> {
        info!("running");
        let result = loop {
            match self.tick() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Halt) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        self.stats.memory = *self.machine.memory.stats();
        match result {
            Ok(()) => {
                info!(instructions = self.stats.instructions_retired, "halted");
                Ok(())
            }
            Err(e) => {
                // The fault is what gets reported; a failed flush here would only hide it.
                let _ = self.console.flush();
                Err(e)
            }
        }
    }

    /// Consumes the simulator, returning its console.
    pub fn into_console(self) -> C {
        self.console
    }

    /// Emits one trace line describing the instruction about to execute.
    fn trace_state(&self) {
        let m = &self.machine;
        let Ok(word) = m.fetch() else {
            return;
        };
        let r = m.regs.as_array();
        let operands = if word.opcode() == opcodes::LOAD_IMMEDIATE {
            let a = word.imm_reg();
            format!("|{}|{:08x}|{:07x}|", a.index(), m.regs[a], word.imm_value())
        } else {
            let (a, b, c) = (word.reg_a(), word.reg_b(), word.reg_c());
            format!(
                "|{}|{}|{}| |{:08x}|{:08x}|{:08x}|",
                a.index(),
                b.index(),
                c.index(),
                m.regs[a],
                m.regs[b],
                m.regs[c]
            )
        };
        trace!(
            "{:08x} {:08x} {:08x}>{:08x} [{:02}|{:>4}] {:<20} {} |{:08x}|{:08x}|{:08x}|{:08x}|{:08x}|{:08x}|{:08x}|{:08x}|",
            self.stats.instructions_retired,
            m.memory.program().len(),
            m.pc,
            word,
            word.opcode(),
            opcodes::mnemonic(word.opcode()),
            disassemble(word),
            operands,
            r[0],
            r[1],
            r[2],
            r[3],
            r[4],
            r[5],
            r[6],
            r[7]
        );
    }
}
