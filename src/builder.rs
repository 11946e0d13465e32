//! Builder for creating StreamInputSource instances.

use std::num::NonZeroUsize;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::{SourceConfig, SourceOptions};
use crate::error::Result;
use crate::handle::StreamHandle;
use crate::source::{SharedHandle, StreamInputSource};

#[derive(Debug, Clone, Default)]
pub struct InputSourceBuilder {
    options: SourceOptions,
}

impl InputSourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a deserialized configuration.
    pub fn from_config(config: SourceConfig) -> Self {
        Self {
            options: config.into(),
        }
    }

    pub fn with_options(mut self, options: SourceOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_scan_buffer_size(mut self, size: NonZeroUsize) -> Self {
        self.options.scan_buffer_size = size;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.options.name = Some(name.into());
        self
    }

    pub fn options(&self) -> &SourceOptions {
        &self.options
    }

    /// Build an input source owning `handle`.
    pub fn build<H: StreamHandle>(self, handle: H) -> Result<StreamInputSource<H>> {
        self.build_shared(Arc::new(Mutex::new(handle)))
    }

    /// Build an input source over a handle shared with other users.
    pub fn build_shared<H: StreamHandle + ?Sized>(
        self,
        handle: SharedHandle<H>,
    ) -> Result<StreamInputSource<H>> {
        StreamInputSource::with_options(handle, self.options)
    }
}
