//! Segmented-memory virtual machine library.
//!
//! This crate implements an interpreter for a word-oriented, 14-operation instruction set with the following:
//! 1. **Memory:** A handle-addressed table of growable word segments with handle reuse and doubling growth.
//! 2. **ISA:** Field extraction, decoding into a closed `Instruction` enum, and disassembly.
//! 3. **Core:** Eight general-purpose registers, a program counter, and the fetch-decode-execute step.
//! 4. **I/O:** A byte-oriented `Console` channel with stdio, in-memory, and echoing implementations.
//! 5. **Simulation:** Program loading, configuration, the run loop, and statistics collection.

/// Common types and constants (errors, registers, machine limits).
pub mod common;
/// Machine configuration (defaults and hierarchical config structures).
pub mod config;
/// Machine core (architectural state and instruction execution).
pub mod core;
/// Byte-stream I/O channel used by the input and output operations.
pub mod io;
/// Instruction set (field extraction, decode, opcodes, disassembly).
pub mod isa;
/// Segment table and segment storage.
pub mod memory;
/// Program loader and the simulation driver.
pub mod sim;
/// Execution statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Library error type covering load, decode, memory, arithmetic and I/O faults.
pub use crate::common::VmError;
/// Architectural machine state; registers, program counter and segments.
pub use crate::core::Machine;
/// Top-level driver owning the machine, its console and statistics.
pub use crate::sim::simulator::Simulator;
