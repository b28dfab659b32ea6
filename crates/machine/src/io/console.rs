//! Console implementations.

use std::collections::VecDeque;
use std::io::{self, BufWriter, Read, StdinLock, Stdout, Write};

use super::Console;

/// Threshold for flushing buffered output to stdout (4 KiB).
const TX_BUFFER_CAPACITY: usize = 4096;

/// Console bound to the process's stdin and stdout.
///
/// Output is buffered and flushed when the buffer fills, before each blocking read,
/// on an explicit `flush`, and on drop.
#[derive(Debug)]
pub struct StdConsole {
    input: StdinLock<'static>,
    output: BufWriter<Stdout>,
}

impl StdConsole {
    /// Creates a console over the process's standard streams.
    pub fn new() -> Self {
        Self {
            input: io::stdin().lock(),
            output: BufWriter::with_capacity(TX_BUFFER_CAPACITY, io::stdout()),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        // Prompts must be visible before we block.
        self.output.flush()?;
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.write_all(&[byte])
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

/// In-memory console: input comes from a queue, output collects in a vector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BufferConsole {
    input: VecDeque<u8>,
    output: Vec<u8>,
    flushes: usize,
}

impl BufferConsole {
    /// Creates a console with `input` queued for reading.
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        let input: Vec<u8> = input.into();
        Self {
            input: VecDeque::from(input),
            output: Vec::new(),
            flushes: 0,
        }
    }

    /// Bytes written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Consumes the console, returning the bytes written.
    pub fn into_output(self) -> Vec<u8> {
        self.output
    }

    /// Bytes not yet read.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }

    /// Number of `flush` calls observed.
    pub const fn flushes(&self) -> usize {
        self.flushes
    }
}

impl Console for BufferConsole {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.input.pop_front())
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.push(byte);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Wrapper that writes every byte it reads to its own output.
#[derive(Debug)]
pub struct Echo<C> {
    inner: C,
}

impl<C: Console> Echo<C> {
    /// Wraps `inner`.
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }

    /// Borrows the wrapped console.
    pub const fn get_ref(&self) -> &C {
        &self.inner
    }

    /// Unwraps the console.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Console> Console for Echo<C> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.inner.read_byte()?;
        if let Some(b) = byte {
            self.inner.write_byte(b)?;
        }
        Ok(byte)
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.inner.write_byte(byte)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
