//! Configuration system for the virtual machine.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline limits (segment cap, initial handle table size).
//! 2. **Structures:** Hierarchical config for general options, memory, and resource limits.
//! 3. **Loading:** JSON deserialization with every field optional.
//!
//! The CLI starts from `Config::default()` or a JSON file and layers its flags on top.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{MAX_SEGMENT_WORDS, Result, VmError};

/// Default configuration constants for the machine.
mod defaults {
    use crate::common::MAX_SEGMENT_WORDS;

    /// Per-segment cap in words.
    pub const MAX_SEGMENT: u32 = MAX_SEGMENT_WORDS;

    /// Handle slots present before the first allocation (slot 0 is the program).
    pub const INITIAL_HANDLES: u32 = 1;
}

/// Top-level machine configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// General run options.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Segment table parameters.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Optional resource ceilings.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// Missing sections and fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON file.
    ///
    /// # Errors
    ///
    /// Returns `VmError::Io` if the file cannot be read or does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text).map_err(|e| VmError::Io(e.into()))
    }
}

/// General run options.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Emit a trace line per executed instruction at `TRACE` level.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Copy every consumed input byte to the output channel.
    #[serde(default)]
    pub echo_input: bool,
}

/// Segment table parameters.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MemoryConfig {
    /// Largest segment, in words, that allocate or the loader will accept.
    #[serde(default = "MemoryConfig::default_max_segment_words")]
    pub max_segment_words: u32,

    /// Number of handle slots created at startup. Values below 1 are raised to 1.
    #[serde(default = "MemoryConfig::default_initial_handles")]
    pub initial_handles: u32,
}

impl MemoryConfig {
    /// Returns the default per-segment cap.
    const fn default_max_segment_words() -> u32 {
        defaults::MAX_SEGMENT
    }

    /// Returns the default initial handle count.
    const fn default_initial_handles() -> u32 {
        defaults::INITIAL_HANDLES
    }

    /// Per-segment cap clamped to the architectural maximum.
    pub fn segment_cap(&self) -> u32 {
        self.max_segment_words.min(MAX_SEGMENT_WORDS)
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_segment_words: defaults::MAX_SEGMENT,
            initial_handles: defaults::INITIAL_HANDLES,
        }
    }
}

/// Resource ceilings. All absent by default: the machine runs until halt or fault.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Stop with `VmError::InstructionLimit` after this many instructions.
    #[serde(default)]
    pub max_instructions: Option<u64>,
}
