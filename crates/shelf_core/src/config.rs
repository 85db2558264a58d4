//! Store configuration.

use std::path::{Path, PathBuf};

/// Configuration for opening a file-backed store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one `<identity-key>.json` file per record type.
    pub root: PathBuf,

    /// Whether to create the root directory if it doesn't exist.
    pub create_if_missing: bool,

    /// Whether to fsync each file before it replaces the old one (safer but slower).
    pub sync_on_write: bool,
}

impl Config {
    /// Creates a configuration for the given root with default settings.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            create_if_missing: true,
            sync_on_write: true,
        }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sets whether to create the root directory if missing.
    #[must_use]
    pub const fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// Sets whether to fsync on every write.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }
}
