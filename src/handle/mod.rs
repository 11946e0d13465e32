//! Abstractions for the external stream backing an input source.
//!
//! This module provides:
//! - `StreamHandle`: Trait for the tell/seek/read capable stream being wrapped
//! - `Whence`: Origin selector for seeks
//! - Standard implementations for any `Read + Seek` type and for files
//! - An in-memory implementation for testing

mod memory;
mod std_io;

use std::fmt::Debug;
use std::io::{self, SeekFrom};

pub use memory::InMemoryStream;
pub use std_io::{FileStream, ReadSeekHandle};

/// Origin for a seek: from the start, the current position or the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    Start,
    Current,
    End,
}

impl Whence {
    /// Map the conventional `0`/`1`/`2` selector codes.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Whence::Start),
            1 => Some(Whence::Current),
            2 => Some(Whence::End),
            _ => None,
        }
    }

    /// Combine with an offset into a `SeekFrom`.
    ///
    /// Fails with `InvalidInput` for a negative offset from the start.
    pub fn to_seek_from(self, offset: i64) -> io::Result<SeekFrom> {
        match self {
            Whence::Start => u64::try_from(offset).map(SeekFrom::Start).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("negative absolute seek offset {offset}"),
                )
            }),
            Whence::Current => Ok(SeekFrom::Current(offset)),
            Whence::End => Ok(SeekFrom::End(offset)),
        }
    }
}

/// Trait for the external stream an input source delegates to.
///
/// Only the capability probes and the three primitives are relied on. The
/// input source never closes the handle and never buffers its content
/// outside of a single line scan.
pub trait StreamHandle: Send + Debug {
    /// Whether bytes can be read from this stream.
    fn readable(&self) -> bool;

    /// Whether the stream supports random access.
    fn seekable(&self) -> bool;

    /// Textual representation of the stream, used as a diagnostic name.
    fn describe(&self) -> String;

    /// Current absolute byte offset.
    fn tell(&mut self) -> io::Result<u64>;

    /// Move the cursor. Out-of-range handling is up to the implementation.
    fn seek(&mut self, offset: i64, whence: Whence) -> io::Result<()>;

    /// Read up to `buf.len()` bytes into `buf`.
    ///
    /// Returns `Ok(None)` when the stream signals that no data is available,
    /// as opposed to `Ok(Some(0))` for a zero-length read.
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<Option<usize>>;
}

impl<H: StreamHandle + ?Sized> StreamHandle for Box<H> {
    fn readable(&self) -> bool {
        (**self).readable()
    }

    fn seekable(&self) -> bool {
        (**self).seekable()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn tell(&mut self) -> io::Result<u64> {
        (**self).tell()
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> io::Result<()> {
        (**self).seek(offset, whence)
    }

    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<Option<usize>> {
        (**self).read_into(buf)
    }
}
