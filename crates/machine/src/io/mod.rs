//! Byte-stream console.
//!
//! The input and output operations move single bytes through a `Console`. This module provides:
//! 1. **Abstraction:** The `Console` trait (read one byte, write one byte, flush).
//! 2. **Host Console:** `StdConsole` over locked stdin and a buffered stdout.
//! 3. **In-Memory Console:** `BufferConsole` for tests and embedding.
//! 4. **Echo:** `Echo`, a wrapper that copies every consumed input byte to the output side.

mod console;

pub use console::{BufferConsole, Echo, StdConsole};

use std::io;

/// Boxes `inner`, wrapping it in `Echo` when `echo` is set.
///
/// Lets a driver pick echoing at runtime while keeping one console type.
pub fn configured<'a, C: Console + 'a>(inner: C, echo: bool) -> Box<dyn Console + 'a> {
    if echo {
        Box::new(Echo::new(inner))
    } else {
        Box::new(inner)
    }
}

/// Byte-oriented input/output channel.
///
/// Reads may block. Implementations decide their own buffering, but everything written
/// must reach the sink once `flush` returns.
pub trait Console {
    /// Reads one byte; `Ok(None)` at end of stream.
    ///
    /// # Errors
    ///
    /// Returns any host I/O error other than end of stream.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Writes one byte.
    ///
    /// # Errors
    ///
    /// Returns any host I/O error.
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    /// Pushes buffered output to the sink.
    ///
    /// # Errors
    ///
    /// Returns any host I/O error.
    fn flush(&mut self) -> io::Result<()>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        (**self).write_byte(byte)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

impl<C: Console + ?Sized> Console for Box<C> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        (**self).write_byte(byte)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}
