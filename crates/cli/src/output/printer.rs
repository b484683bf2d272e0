//! Printer for command output
//!
//! Commands write through a [`Printer`] instead of directly to the process
//! streams so the same code can be exercised against in-memory buffers.

use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use s3c_core::{Error, Result};

/// Pair of output streams: regular output and diagnostics
#[derive(Debug)]
pub struct Printer<O, E> {
    out: O,
    err: E,
}

impl Printer<tokio::io::Stdout, tokio::io::Stderr> {
    /// Printer bound to the process's stdout and stderr
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdout(), tokio::io::stderr())
    }
}

impl<O, E> Printer<O, E>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    /// Create a printer over arbitrary writers
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Raw access to the regular output, for streaming object bytes
    pub fn stdout(&mut self) -> &mut O {
        &mut self.out
    }

    /// Write text as-is
    pub async fn text(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        Ok(())
    }

    /// Write one line of regular output
    pub async fn line(&mut self, line: &str) -> Result<()> {
        self.out.write_all(line.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        Ok(())
    }

    /// Write one line of diagnostic output
    pub async fn diag(&mut self, line: &str) -> Result<()> {
        self.err.write_all(line.as_bytes()).await?;
        self.err.write_all(b"\n").await?;
        Ok(())
    }

    /// Pretty-print a value as indented JSON
    pub async fn json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.line(&json).await
    }

    /// Report an error on the diagnostic stream.
    ///
    /// Best effort: a failure to write the error itself is ignored.
    pub async fn error(&mut self, error: &Error) {
        let _ = self.diag(&error.to_string()).await;
        let _ = self.err.flush().await;
    }

    /// Flush both streams
    pub async fn flush(&mut self) -> Result<()> {
        self.out.flush().await?;
        self.err.flush().await?;
        Ok(())
    }

    /// Recover the underlying writers
    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}
