//! Configuration types for input sources.
//!
//! This module provides:
//! - `SourceOptions`: Runtime options for a single input source
//! - `SourceConfig`: Deserializable configuration that resolves to `SourceOptions`

mod options;

pub use options::{DEFAULT_SCAN_BUFFER_SIZE, SourceConfig, SourceOptions};
