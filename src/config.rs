//! File service configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the background file service.
#[derive(Debug, Clone)]
pub struct FileServiceConfig {
    /// Base directory for category-relative destinations.
    pub base_dir: PathBuf,
    /// How long the worker sleeps between passes over the registry.
    pub poll_interval: Duration,
}

impl Default for FileServiceConfig {
    fn default() -> Self {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skyfile");

        Self {
            base_dir,
            poll_interval: Duration::from_millis(100),
        }
    }
}

impl FileServiceConfig {
    /// Creates a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base directory for category-relative destinations.
    pub fn with_base_dir(mut self, base_dir: PathBuf) -> Self {
        self.base_dir = base_dir;
        self
    }

    /// Sets the worker poll interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}
