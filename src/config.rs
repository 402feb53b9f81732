//! Ingestion settings

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Default container file extension, matched case-insensitively
pub const DEFAULT_EXTENSION: &str = "msg";

/// Settings for one ingestion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Extension of candidate files, without the leading dot
    pub extension: String,

    /// Number of worker threads; `1` processes files sequentially
    pub workers: NonZeroUsize,

    /// Directory for intermediate text buffers (OS temp dir when unset)
    pub buffer_dir: Option<PathBuf>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            workers: NonZeroUsize::MIN,
            buffer_dir: None,
        }
    }
}

impl IngestConfig {
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Set the worker count; `0` is treated as `1`
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = NonZeroUsize::new(workers).unwrap_or(NonZeroUsize::MIN);
        self
    }

    #[must_use]
    pub fn with_buffer_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.buffer_dir = Some(dir.into());
        self
    }

    /// Check whether a file name carries the configured extension
    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        let suffix = format!(".{}", self.extension.to_lowercase());
        file_name.to_lowercase().ends_with(&suffix)
    }

    pub(crate) fn buffer_dir(&self) -> Option<&Path> {
        self.buffer_dir.as_deref()
    }
}
