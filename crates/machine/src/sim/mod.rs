//! Simulation utilities and program loading.
//!
//! Provides the loader that turns a program image into segment 0 and the
//! `Simulator` that drives a machine until it halts or faults.

pub mod loader;
pub mod simulator;
