//! Input source options and their serde configuration form.

use std::num::NonZeroUsize;

use serde::Deserialize;

/// Scan window used when looking for the next line terminator.
pub const DEFAULT_SCAN_BUFFER_SIZE: NonZeroUsize = match NonZeroUsize::new(4096) {
    Some(size) => size,
    None => unreachable!(),
};

/// Options for a single input source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    /// Bytes read per fill while scanning for a line terminator
    pub scan_buffer_size: NonZeroUsize,
    /// Display name overriding the handle's own description
    pub name: Option<String>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            scan_buffer_size: DEFAULT_SCAN_BUFFER_SIZE,
            name: None,
        }
    }
}

impl SourceOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scan buffer size.
    pub fn with_scan_buffer_size(mut self, size: NonZeroUsize) -> Self {
        self.scan_buffer_size = size;
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Configuration for an input source, as read from a config file.
///
/// A `scan_buffer_size` of zero is rejected during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceConfig {
    /// Scan buffer size in bytes
    #[serde(default)]
    pub scan_buffer_size: Option<NonZeroUsize>,
    /// Display name override
    #[serde(default)]
    pub name: Option<String>,
}

impl SourceConfig {
    /// Create a new empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scan buffer size.
    pub fn with_scan_buffer_size(mut self, size: NonZeroUsize) -> Self {
        self.scan_buffer_size = Some(size);
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl From<SourceConfig> for SourceOptions {
    fn from(config: SourceConfig) -> Self {
        Self {
            scan_buffer_size: config.scan_buffer_size.unwrap_or(DEFAULT_SCAN_BUFFER_SIZE),
            name: config.name,
        }
    }
}
