//! Machine fault definitions.
//!
//! Every checked contract violation is a fault, and every fault is fatal to the run. This module provides:
//! 1. **Fault Representation:** One `VmError` variant per load, decode, memory, arithmetic and I/O fault.
//! 2. **Context:** Each variant carries the offending handle, offset, opcode or program counter.
//! 3. **Integration:** Host I/O errors convert via `From`, so `?` works across the crate.

use std::io;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, VmError>;

/// Faults raised while loading or executing a program.
///
/// There is no recovery path: the driver stops at the first fault and the process
/// exits with a failure status.
#[derive(Debug, Error)]
pub enum VmError {
    /// Host I/O failure (reading the program image or transferring a console byte).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The program image contains no bytes.
    #[error("program image is empty")]
    EmptyProgram,

    /// The program image length is not a multiple of the word size.
    #[error("program image is {len} bytes, not a multiple of 4")]
    MisalignedProgram {
        /// Image length in bytes.
        len: usize,
    },

    /// The opcode field holds a value outside the instruction set.
    #[error("invalid opcode {opcode} in word {word:#010x}")]
    InvalidOpcode {
        /// The 4-bit opcode value.
        opcode: u32,
        /// The full instruction word.
        word: u32,
    },

    /// The program counter points past the end of the program segment.
    #[error("program counter {pc:#x} outside program of {len} words")]
    PcOutOfBounds {
        /// Program counter at fetch time.
        pc: u32,
        /// Length of segment 0.
        len: u32,
    },

    /// The handle does not name a segment that is currently in use.
    #[error("segment {0} is not in use")]
    InactiveSegment(u32),

    /// The offset lies at or beyond the segment's logical length.
    #[error("offset {offset} out of bounds for segment {handle} of {len} words")]
    OffsetOutOfBounds {
        /// Segment handle.
        handle: u32,
        /// Requested word offset.
        offset: u32,
        /// Logical length of the segment.
        len: u32,
    },

    /// An attempt was made to free the program segment.
    #[error("segment 0 holds the running program and cannot be freed")]
    FreeProgramSegment,

    /// The requested size exceeds the per-segment cap.
    #[error("segment of {requested} words exceeds the {max}-word limit")]
    SegmentTooLarge {
        /// Requested word count.
        requested: usize,
        /// Configured cap.
        max: u32,
    },

    /// Program replacement was asked to copy from an empty segment.
    #[error("segment {0} is empty and cannot be loaded as a program")]
    EmptySegment(u32),

    /// The handle table cannot double without exceeding the 32-bit handle space.
    #[error("segment handle space exhausted at {0} handles")]
    HandlesExhausted(usize),

    /// Divide operation with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// Output operation given a value that does not fit in one byte.
    #[error("output value {0:#x} exceeds 255")]
    OutputOutOfRange(u32),

    /// The configured instruction ceiling was reached before a halt.
    #[error("instruction limit of {0} reached")]
    InstructionLimit(u64),
}

impl VmError {
    /// Short category name used in diagnostics.
    ///
    /// # Returns
    ///
    /// One of `"load"`, `"decode"`, `"memory"`, `"arithmetic"`, `"io"` or `"limit"`.
    pub const fn category(&self) -> &'static str {
        match self {
            Self::EmptyProgram | Self::MisalignedProgram { .. } => "load",
            Self::InvalidOpcode { .. } => "decode",
            Self::PcOutOfBounds { .. }
            | Self::InactiveSegment(_)
            | Self::OffsetOutOfBounds { .. }
            | Self::FreeProgramSegment
            | Self::SegmentTooLarge { .. }
            | Self::EmptySegment(_)
            | Self::HandlesExhausted(_) => "memory",
            Self::DivisionByZero => "arithmetic",
            Self::Io(_) | Self::OutputOutOfRange(_) => "io",
            Self::InstructionLimit(_) => "limit",
        }
    }
}
