//! File categories and destination path resolution.
//!
//! Requesters usually do not name an absolute destination. Instead they tag
//! the file with a [`FileCategory`] and a relative name, and a
//! [`PathResolver`] maps that pair to a concrete location in the virtualized
//! file tree. The write engine consumes only the resolved path.

use std::path::PathBuf;

/// Generalized file categories known to the file service.
///
/// A category selects a default storage location. It is distinct from the
/// `record_kind` tag carried in the file header: the category exists only at
/// runtime and never appears in an output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    /// Placeholder for files with no known category.
    Unknown,
    /// Dynamically loadable modules (e.g. `.so`, `.o`).
    DynamicModule,
    /// Binary log files generated by data dump commands.
    BinaryDataDump,
    /// Text-based log files.
    TextLog,
    /// Text-based script files (e.g. startup scripts).
    Script,
    /// Temporary/ephemeral files.
    Temporary,
}

impl FileCategory {
    /// Returns the default subdirectory name for this category.
    pub fn subdirectory(&self) -> &'static str {
        match self {
            FileCategory::Unknown => "misc",
            FileCategory::DynamicModule => "modules",
            FileCategory::BinaryDataDump => "dumps",
            FileCategory::TextLog => "logs",
            FileCategory::Script => "scripts",
            FileCategory::Temporary => "tmp",
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.subdirectory())
    }
}

/// Maps a file category and relative name to a concrete destination path.
///
/// Implementations must be `Send + Sync` since resolution happens on the
/// background worker thread.
pub trait PathResolver: Send + Sync + 'static {
    /// Resolves a category and relative name to a full destination path.
    fn resolve(&self, category: FileCategory, name: &str) -> PathBuf;
}

/// Default resolver: one subdirectory per category under a base directory.
///
/// ```
/// use skyfile::category::{DefaultPathResolver, FileCategory, PathResolver};
/// use std::path::PathBuf;
///
/// let resolver = DefaultPathResolver::new(PathBuf::from("/data"));
/// let path = resolver.resolve(FileCategory::TextLog, "es_syslog.log");
/// assert_eq!(path, PathBuf::from("/data/logs/es_syslog.log"));
/// ```
#[derive(Debug, Clone)]
pub struct DefaultPathResolver {
    /// Base directory for all categories.
    base_dir: PathBuf,
}

impl DefaultPathResolver {
    /// Creates a resolver rooted at the given base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Returns the base directory.
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }
}

impl Default for DefaultPathResolver {
    fn default() -> Self {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skyfile");
        Self::new(base_dir)
    }
}

impl PathResolver for DefaultPathResolver {
    fn resolve(&self, category: FileCategory, name: &str) -> PathBuf {
        self.base_dir.join(category.subdirectory()).join(name)
    }
}
