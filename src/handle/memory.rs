//! In-memory stream handle for testing.

use std::io;
use std::sync::Arc;

use super::{StreamHandle, Whence};

/// In-memory stream over shared bytes.
///
/// Capabilities can be switched off to exercise construction failures, and
/// the number of bytes returned per read can be capped to exercise short reads.
#[derive(Debug, Clone)]
pub struct InMemoryStream {
    id: String,
    data: Arc<[u8]>,
    pos: u64,
    readable: bool,
    seekable: bool,
    max_chunk: Option<usize>,
}

impl InMemoryStream {
    /// Create a new in-memory stream with the given data.
    pub fn new(id: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
            pos: 0,
            readable: true,
            seekable: true,
            max_chunk: None,
        }
    }

    /// Create a new in-memory stream from a string.
    pub fn from_string(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(id, data.into().into_bytes())
    }

    /// Set what the `readable` probe reports.
    pub fn with_readable(mut self, readable: bool) -> Self {
        self.readable = readable;
        self
    }

    /// Set what the `seekable` probe reports.
    pub fn with_seekable(mut self, seekable: bool) -> Self {
        self.seekable = seekable;
        self
    }

    /// Return at most `max` bytes from each read.
    pub fn with_max_chunk(mut self, max: usize) -> Self {
        self.max_chunk = Some(max);
        self
    }

    /// Get the underlying bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the current cursor without going through `tell`.
    pub fn position(&self) -> u64 {
        self.pos
    }
}

impl StreamHandle for InMemoryStream {
    fn readable(&self) -> bool {
        self.readable
    }

    fn seekable(&self) -> bool {
        self.seekable
    }

    fn describe(&self) -> String {
        format!("<memory '{}' len={}>", self.id, self.data.len())
    }

    fn tell(&mut self) -> io::Result<u64> {
        Ok(self.pos)
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> io::Result<()> {
        let base = match whence {
            Whence::Start => 0,
            Whence::Current => self.pos as i64,
            Whence::End => self.data.len() as i64,
        };
        let target = base.checked_add(offset).filter(|t| *t >= 0).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid seek to {offset} from {whence:?}"),
            )
        })?;
        self.pos = target as u64;
        Ok(())
    }

    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<Option<usize>> {
        let start = (self.pos as usize).min(self.data.len());
        let mut n = buf.len().min(self.data.len() - start);
        if let Some(max) = self.max_chunk {
            n = n.min(max);
        }
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        self.pos += n as u64;
        Ok(Some(n))
    }
}
