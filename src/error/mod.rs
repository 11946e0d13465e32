//! Error types for input source operations.
//!
//! This module provides:
//! - `Operation`: Indicates which delegated primitive failed
//! - `Capability`: A stream capability checked at construction time
//! - `InputSourceError`: The error returned by every fallible operation

use std::fmt;
use std::io;

use thiserror::Error;

/// A primitive delegated to the external stream handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Tell,
    Seek,
    Read,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Tell => write!(f, "Tell"),
            Operation::Seek => write!(f, "Seek"),
            Operation::Read => write!(f, "Read"),
        }
    }
}

/// A capability the stream handle must report before it can back an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Readable,
    Seekable,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Readable => write!(f, "readable"),
            Capability::Seekable => write!(f, "seekable"),
        }
    }
}

#[derive(Debug, Error)]
pub enum InputSourceError {
    /// The handle failed a capability probe; no input source was produced.
    #[error("{name}: stream is not {capability}")]
    InvalidStream { name: String, capability: Capability },

    /// A delegated call into the handle failed.
    #[error("[{op}] {name}: {source}")]
    StreamIo {
        /// The primitive that failed
        op: Operation,
        /// Display name of the input source
        name: String,
        #[source]
        source: io::Error,
    },
}

impl InputSourceError {
    /// The operation that failed, if this error came from a delegated call.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            InputSourceError::InvalidStream { .. } => None,
            InputSourceError::StreamIo { op, .. } => Some(*op),
        }
    }

    /// Display name of the stream the error refers to.
    pub fn name(&self) -> &str {
        match self {
            InputSourceError::InvalidStream { name, .. } => name,
            InputSourceError::StreamIo { name, .. } => name,
        }
    }
}

impl From<InputSourceError> for io::Error {
    fn from(err: InputSourceError) -> Self {
        match err {
            InputSourceError::StreamIo { source, .. } => source,
            other @ InputSourceError::InvalidStream { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, other)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, InputSourceError>;

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
