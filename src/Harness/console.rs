//! The serialized console every worker reports through.
//!
//! A single [`parking_lot::Mutex`] guards the output stream. Each call to
//! [`ConsoleSink::write_fmt`] (and so each `write!`/`writeln!` on the sink)
//! holds the lock for the whole formatted write, so lines from concurrent
//! workers never interleave. Ordering between workers is not defined.

use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

pub struct ConsoleSink {
    pub(crate) out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Formats and writes `args` as one critical section.
    ///
    /// The lock is released when the guard drops, including when formatting
    /// or the underlying write fails.
    pub fn write_fmt(&self, args: fmt::Arguments<'_>) -> io::Result<()> {
        let mut out = self.out.lock();
        out.write_fmt(args)?;
        out.flush()
    }

    /// Like [`write_fmt`](Self::write_fmt) for status lines: a failed write
    /// is logged and otherwise ignored.
    pub fn emit(&self, args: fmt::Arguments<'_>) {
        if let Err(e) = self.write_fmt(args) {
            tracing::warn!(error = %e, "console write failed");
        }
    }

    /// Runs `f` with exclusive access to the output, for multi-line blocks
    /// that must appear as one unit.
    pub fn write_block<F>(&self, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        let mut out = self.out.lock();
        f(&mut **out)?;
        out.flush()
    }
}

/// An in-memory writer whose contents can be read back while it is shared
/// with a [`ConsoleSink`].
#[derive(Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
