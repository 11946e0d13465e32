//! # streamsource
//!
//! A random-access input source for document parsers, backed by an external
//! seekable byte stream.
//!
//! ## Overview
//!
//! streamsource provides:
//! - **Input-source contract**: `InputSource` with tell/seek/rewind/read,
//!   single-byte unread and line-terminator scanning
//! - **Stream delegation**: `StreamInputSource` forwards every primitive to a
//!   shared `StreamHandle`, locking it for each individual call
//! - **Handles**: adapters for any `Read + Seek` type, files and in-memory data
//! - **Configuration**: scan buffer size and display name via `SourceOptions`
//!   or a serde-deserializable `SourceConfig`
//! - **Error handling**: `InputSourceError` distinguishes unusable streams from
//!   failed stream calls; optional miette diagnostics
//!
//! ## Quick Start
//!
//! ```rust
//! use streamsource::{InMemoryStream, StreamInputSource};
//!
//! fn main() -> Result<(), streamsource::InputSourceError> {
//!     let handle = InMemoryStream::from_string("doc", "AB\r\nCD");
//!     let mut source = StreamInputSource::new(handle)?;
//!
//!     assert_eq!(source.find_and_skip_next_eol()?, 2);
//!     assert_eq!(source.tell()?, 4);
//!     Ok(())
//! }
//! ```
//!
//! ## Position semantics
//!
//! - `read` records the offset where it began in `last_offset`. When a read
//!   of a non-empty buffer returns nothing, the handle is moved to its end and
//!   `last_offset` reports the end offset instead.
//! - End of stream is never an error; short reads are returned as is.
//! - `find_and_skip_next_eol` reads the handle in windows of
//!   `scan_buffer_size` bytes, restarting each window at the handle's real
//!   position. After a match it consumes the following run of `\r`/`\n`
//!   bytes one at a time, so runs split across windows are handled the same
//!   as runs inside one window.
//!
//! ## Features
//!
//! - `miette` - Pretty error reporting with miette

// Core modules
pub mod builder;
pub mod config;
pub mod error;
pub mod handle;
pub mod source;

// Re-exports for convenience
pub use builder::InputSourceBuilder;
pub use config::{DEFAULT_SCAN_BUFFER_SIZE, SourceConfig, SourceOptions};
pub use error::{Capability, InputSourceError, Operation, Result};
pub use handle::{FileStream, InMemoryStream, ReadSeekHandle, StreamHandle, Whence};
pub use source::{DynInputSource, InputSource, SharedHandle, StreamInputSource, is_eol};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::SourceDiagnostic;
