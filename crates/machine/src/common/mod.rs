//! Common utilities and types used throughout the virtual machine.
//!
//! This module provides the building blocks shared by every other component:
//! 1. **Constants:** Machine limits and instruction field layout.
//! 2. **Error Handling:** The `VmError` fault type and the crate-wide `Result` alias.
//! 3. **Register Management:** The eight-entry register file and its 3-bit index type.

/// Machine-wide constants.
pub mod constants;

/// Fault definitions.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{MAX_SEGMENT_WORDS, NUM_REGISTERS, PROGRAM_HANDLE};
pub use error::{Result, VmError};
pub use reg::{Reg, RegisterFile};
