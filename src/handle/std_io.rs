//! Standard stream handles for `Read + Seek` types and files.

use std::any::type_name;
use std::fmt;
use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};

use super::{StreamHandle, Whence};

/// Stream handle over any `Read + Seek` value.
///
/// A read failing with `WouldBlock` is reported as "no data available".
pub struct ReadSeekHandle<R> {
    name: String,
    inner: R,
}

impl<R: Read + Seek> ReadSeekHandle<R> {
    /// Wrap a stream, naming it after its type.
    pub fn new(inner: R) -> Self {
        Self {
            name: format!("<{}>", type_name::<R>()),
            inner,
        }
    }

    /// Wrap a stream with an explicit diagnostic name.
    pub fn with_name(inner: R, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    /// Get a reference to the wrapped stream.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwrap the handle.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R> fmt::Debug for ReadSeekHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadSeekHandle")
            .field("name", &self.name)
            .finish()
    }
}

impl<R: Read + Seek + Send> StreamHandle for ReadSeekHandle<R> {
    fn readable(&self) -> bool {
        true
    }

    fn seekable(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        self.name.clone()
    }

    fn tell(&mut self) -> io::Result<u64> {
        self.inner.stream_position()
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> io::Result<()> {
        self.inner.seek(whence.to_seek_from(offset)?)?;
        Ok(())
    }

    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<Option<usize>> {
        match self.inner.read(buf) {
            Ok(n) => Ok(Some(n)),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Stream handle for reading from a file.
#[derive(Debug)]
pub struct FileStream {
    path: PathBuf,
    inner: ReadSeekHandle<File>,
}

impl FileStream {
    /// Open a file read-only.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        Ok(Self::from_file(file, path))
    }

    /// Wrap an already opened file, using `path` for diagnostics.
    pub fn from_file(file: File, path: PathBuf) -> Self {
        let name = format!("<file '{}'>", path.display());
        Self {
            inner: ReadSeekHandle::with_name(file, name),
            path,
        }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StreamHandle for FileStream {
    fn readable(&self) -> bool {
        self.inner.readable()
    }

    fn seekable(&self) -> bool {
        self.inner.seekable()
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }

    fn tell(&mut self) -> io::Result<u64> {
        self.inner.tell()
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> io::Result<()> {
        self.inner.seek(offset, whence)
    }

    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<Option<usize>> {
        self.inner.read_into(buf)
    }
}
