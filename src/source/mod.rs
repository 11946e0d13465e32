//! The input-source contract consumed by parsing engines.
//!
//! This module provides:
//! - `InputSource`: Trait for random-access byte sources with line scanning
//! - `StreamInputSource`: An input source delegating to a shared `StreamHandle`

mod stream;

pub use stream::{DynInputSource, SharedHandle, StreamInputSource};

use crate::error::{InputSourceError, Operation, Result};
use crate::handle::Whence;

/// Whether `byte` is a line terminator (`\r` or `\n`).
pub fn is_eol(byte: u8) -> bool {
    byte == b'\r' || byte == b'\n'
}

/// Trait for random-access byte sources read by a parsing engine.
pub trait InputSource {
    /// Diagnostic name of the source.
    fn name(&self) -> &str;

    /// Offset at which the most recent `read` began.
    ///
    /// After a read that hit the end of the stream this is the end offset.
    fn last_offset(&self) -> u64;

    /// Current absolute byte offset.
    fn tell(&mut self) -> Result<u64>;

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<()>;

    /// Seek back to the start of the source.
    fn rewind(&mut self) -> Result<()> {
        self.seek(0, Whence::Start)
    }

    /// Read up to `buf.len()` bytes. Returns 0 at end of stream.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Undo the last single-byte read. `ch` is not pushed back, only the position moves.
    fn unread_ch(&mut self, ch: u8) -> Result<()>;

    /// Find the next line terminator, skip the run of `\r`/`\n` bytes that
    /// starts there and return the offset of its first byte.
    ///
    /// With no terminator left the end offset is returned.
    fn find_and_skip_next_eol(&mut self) -> Result<u64>;

    /// Override the offset reported by `last_offset`.
    fn set_last_offset(&mut self, offset: u64);

    /// Read the line starting at the current position and move past its
    /// terminator run.
    ///
    /// At most `max_len` bytes of the line are returned, without the
    /// terminator. The source is left after the terminator run even when the
    /// line is longer than `max_len`, and `last_offset` reports where the
    /// line began.
    fn read_line(&mut self, max_len: usize) -> Result<Vec<u8>> {
        let offset = self.tell()?;
        let mut buf = vec![0u8; max_len];
        let n = self.read(&mut buf)?;
        buf.truncate(n);

        let start = absolute_offset(self.name(), offset)?;
        self.seek(start, Whence::Start)?;
        let eol = self.find_and_skip_next_eol()?;
        self.set_last_offset(offset);

        let line_len = eol.saturating_sub(offset);
        if line_len < buf.len() as u64 {
            buf.truncate(line_len as usize);
        }
        Ok(buf)
    }
}

/// Convert an absolute position into a seek offset.
pub(crate) fn absolute_offset(name: &str, pos: u64) -> Result<i64> {
    i64::try_from(pos).map_err(|_| InputSourceError::StreamIo {
        op: Operation::Seek,
        name: name.to_owned(),
        source: std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("offset {pos} out of range"),
        ),
    })
}
