//! Program Loader.
//!
//! This module turns an external program image into the machine's program segment. It performs:
//! 1. **Binary loading:** Reads the whole image from disk.
//! 2. **Validation:** Rejects empty images and lengths that are not a multiple of 4.
//! 3. **Decoding:** Interprets the bytes as big-endian 32-bit words regardless of host byte order.
//! 4. **Installation:** Stores the words as segment 0 and resets the program counter.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::common::constants::WORD_BYTES;
use crate::common::{Result, VmError};
use crate::core::Machine;

/// Reads a program image from disk.
///
/// # Arguments
///
/// * `path` - Path to the image file.
///
/// # Returns
///
/// The raw bytes of the file.
///
/// # Errors
///
/// Returns `VmError::Io` if the file cannot be read.
pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Decodes a program image into words.
///
/// # Arguments
///
/// * `bytes` - The raw image.
///
/// # Returns
///
/// One word per 4 bytes, most significant byte first.
///
/// # Errors
///
/// Returns `VmError::EmptyProgram` or `VmError::MisalignedProgram`.
pub fn decode_image(bytes: &[u8]) -> Result<Vec<u32>> {
    if bytes.is_empty() {
        return Err(VmError::EmptyProgram);
    }
    if bytes.len() % WORD_BYTES != 0 {
        return Err(VmError::MisalignedProgram { len: bytes.len() });
    }
    Ok(bytes
        .chunks_exact(WORD_BYTES)
        .map(|w| u32::from_be_bytes([w[0], w[1], w[2], w[3]]))
        .collect())
}

/// Installs a program image as segment 0 and points the counter at its first word.
///
/// # Arguments
///
/// * `machine` - Machine to load into.
/// * `bytes` - The raw image.
///
/// # Returns
///
/// The number of words loaded.
///
/// # Errors
///
/// Any error from `decode_image`, or `VmError::SegmentTooLarge`.
pub fn load_program(machine: &mut Machine, bytes: &[u8]) -> Result<usize> {
    let words = decode_image(bytes)?;
    let len = words.len();
    machine.memory.install_program(words)?;
    machine.pc = 0;
    info!(words = len, bytes = bytes.len(), "loaded program");
    Ok(len)
}

/// Reads a program image from disk and installs it as segment 0.
///
/// # Errors
///
/// Any error from `load_binary` or `load_program`.
pub fn load_file(machine: &mut Machine, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading program");
    let bytes = load_binary(path)?;
    load_program(machine, &bytes)
}
