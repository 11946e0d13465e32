//! Input source backed by an external stream handle.

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};
use std::num::NonZeroUsize;
use std::sync::Arc;

use log::{debug, trace};
use parking_lot::Mutex;

use super::{InputSource, absolute_offset, is_eol};
use crate::config::SourceOptions;
use crate::error::{Capability, InputSourceError, Operation, Result};
use crate::handle::{StreamHandle, Whence};

/// A stream handle shared between its owner and any input sources over it.
pub type SharedHandle<H> = Arc<Mutex<H>>;

/// Input source over a type-erased handle.
pub type DynInputSource = StreamInputSource<dyn StreamHandle>;

/// Input source delegating every primitive to a shared [`StreamHandle`].
///
/// The handle's lock is taken for each individual probe, tell, seek or read
/// and released right after, never across a whole line scan. Other holders of
/// the handle may therefore interleave calls between two primitives.
pub struct StreamInputSource<H: StreamHandle + ?Sized> {
    handle: SharedHandle<H>,
    name: String,
    last_offset: u64,
    scan_buffer_size: NonZeroUsize,
}

impl<H: StreamHandle> StreamInputSource<H> {
    /// Take ownership of `handle` and wrap it with default options.
    pub fn new(handle: H) -> Result<Self> {
        Self::with_options(Arc::new(Mutex::new(handle)), SourceOptions::default())
    }
}

impl<H: StreamHandle + ?Sized> StreamInputSource<H> {
    /// Wrap a shared handle with default options.
    pub fn from_shared(handle: SharedHandle<H>) -> Result<Self> {
        Self::with_options(handle, SourceOptions::default())
    }

    /// Wrap a shared handle after checking that it is readable and seekable.
    pub fn with_options(handle: SharedHandle<H>, options: SourceOptions) -> Result<Self> {
        let description = handle.lock().describe();
        let name = options.name.unwrap_or(description);

        if !handle.lock().readable() {
            debug!("rejecting stream {name}: not readable");
            return Err(InputSourceError::InvalidStream {
                name,
                capability: Capability::Readable,
            });
        }
        if !handle.lock().seekable() {
            debug!("rejecting stream {name}: not seekable");
            return Err(InputSourceError::InvalidStream {
                name,
                capability: Capability::Seekable,
            });
        }

        debug!(
            "opened input source {name} (scan buffer {} bytes)",
            options.scan_buffer_size
        );
        Ok(Self {
            handle,
            name,
            last_offset: 0,
            scan_buffer_size: options.scan_buffer_size,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn last_offset(&self) -> u64 {
        self.last_offset
    }

    pub fn set_last_offset(&mut self, offset: u64) {
        self.last_offset = offset;
    }

    pub fn scan_buffer_size(&self) -> NonZeroUsize {
        self.scan_buffer_size
    }

    /// The shared handle. Access through it is not coordinated with this source.
    pub fn handle(&self) -> &SharedHandle<H> {
        &self.handle
    }

    /// Run `f` against the handle while holding its lock.
    fn delegate<T>(
        &self,
        op: Operation,
        f: impl FnOnce(&mut H) -> io::Result<T>,
    ) -> Result<T> {
        let result = {
            let mut guard = self.handle.lock();
            f(&mut *guard)
        };
        result.map_err(|source| InputSourceError::StreamIo {
            op,
            name: self.name.clone(),
            source,
        })
    }

    pub fn tell(&mut self) -> Result<u64> {
        self.delegate(Operation::Tell, |h| h.tell())
    }

    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<()> {
        self.delegate(Operation::Seek, |h| h.seek(offset, whence))
    }

    pub fn rewind(&mut self) -> Result<()> {
        self.seek(0, Whence::Start)
    }

    fn seek_to(&mut self, pos: u64) -> Result<()> {
        let offset = absolute_offset(&self.name, pos)?;
        self.seek(offset, Whence::Start)
    }

    /// Read up to `buf.len()` bytes, recording where the read began.
    ///
    /// Short reads are returned as is. A zero-length result for a non-empty
    /// buffer is end of stream: the handle is moved to its end and
    /// `last_offset` reports that end.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.last_offset = self.tell()?;
        if buf.is_empty() {
            return Ok(0);
        }

        let capacity = buf.len();
        let Some(n) = self.delegate(Operation::Read, |h| h.read_into(buf))? else {
            return Ok(0);
        };
        if n > capacity {
            return Err(InputSourceError::StreamIo {
                op: Operation::Read,
                name: self.name.clone(),
                source: io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("stream reported {n} bytes read into a {capacity} byte buffer"),
                ),
            });
        }

        if n == 0 {
            self.seek(0, Whence::End)?;
            self.last_offset = self.tell()?;
            trace!("{}: end of stream at {}", self.name, self.last_offset);
        }
        Ok(n)
    }

    /// Step back over the byte returned by the previous single-byte read.
    pub fn unread_ch(&mut self, _ch: u8) -> Result<()> {
        self.seek(-1, Whence::Current)
    }

    pub fn find_and_skip_next_eol(&mut self) -> Result<u64> {
        let mut buf = vec![0u8; self.scan_buffer_size.get()];

        loop {
            let cur = self.tell()?;
            let len = self.read(&mut buf)?;
            if len == 0 {
                return self.tell();
            }

            // Every fill restarts at the handle's real position, so a
            // terminator past this window is found by the next fill.
            let Some(found) = buf[..len].iter().position(|b| is_eol(*b)) else {
                continue;
            };

            let result = cur + found as u64;
            trace!("{}: line terminator at {}", self.name, result);
            self.seek_to(result + 1)?;
            self.skip_eol_run()?;
            return Ok(result);
        }
    }

    /// Consume `\r`/`\n` bytes one at a time, stopping before the first other byte.
    fn skip_eol_run(&mut self) -> Result<()> {
        let mut ch = [0u8; 1];
        loop {
            if self.read(&mut ch)? == 0 {
                return Ok(());
            }
            if !is_eol(ch[0]) {
                return self.unread_ch(ch[0]);
            }
        }
    }
}

impl<H: StreamHandle + ?Sized> fmt::Debug for StreamInputSource<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamInputSource")
            .field("name", &self.name)
            .field("last_offset", &self.last_offset)
            .field("scan_buffer_size", &self.scan_buffer_size)
            .finish_non_exhaustive()
    }
}

impl<H: StreamHandle + ?Sized> InputSource for StreamInputSource<H> {
    fn name(&self) -> &str {
        StreamInputSource::name(self)
    }

    fn last_offset(&self) -> u64 {
        StreamInputSource::last_offset(self)
    }

    fn set_last_offset(&mut self, offset: u64) {
        StreamInputSource::set_last_offset(self, offset)
    }

    fn tell(&mut self) -> Result<u64> {
        StreamInputSource::tell(self)
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<()> {
        StreamInputSource::seek(self, offset, whence)
    }

    fn rewind(&mut self) -> Result<()> {
        StreamInputSource::rewind(self)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        StreamInputSource::read(self, buf)
    }

    fn unread_ch(&mut self, ch: u8) -> Result<()> {
        StreamInputSource::unread_ch(self, ch)
    }

    fn find_and_skip_next_eol(&mut self) -> Result<u64> {
        StreamInputSource::find_and_skip_next_eol(self)
    }
}

impl<H: StreamHandle + ?Sized> Read for StreamInputSource<H> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(StreamInputSource::read(self, buf)?)
    }
}

impl<H: StreamHandle + ?Sized> Seek for StreamInputSource<H> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match pos {
            SeekFrom::Start(offset) => self.seek_to(offset)?,
            SeekFrom::Current(offset) => StreamInputSource::seek(self, offset, Whence::Current)?,
            SeekFrom::End(offset) => StreamInputSource::seek(self, offset, Whence::End)?,
        }
        Ok(StreamInputSource::tell(self)?)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(StreamInputSource::tell(self)?)
    }
}
