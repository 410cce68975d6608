//! Storage capability consumed by the write engine.
//!
//! The engine never touches `std::fs` directly. It drives a [`Storage`]
//! implementation through a minimal open/append/close surface, which keeps
//! the record-write loop testable against in-memory or fault-injecting
//! implementations.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Capability surface for the engine's file I/O.
///
/// `Handle` is whatever the implementation needs to carry between `create`
/// and `close`. The engine holds exactly one handle at a time and always
/// closes it (best effort) before retiring a job.
pub trait Storage: Send + Sync + 'static {
    /// Open-file handle type.
    type Handle: Send;

    /// Creates (or truncates) the destination and opens it for writing.
    fn create_for_write(&self, path: &Path) -> io::Result<Self::Handle>;

    /// Appends a block of bytes to the open file.
    fn append(&self, handle: &mut Self::Handle, data: &[u8]) -> io::Result<()>;

    /// Closes the handle, flushing buffered data.
    fn close(&self, handle: Self::Handle) -> io::Result<()>;
}

/// Production storage backed by `std::fs`.
///
/// Parent directories are created on demand so that category subdirectories
/// (e.g. `dumps/`, `logs/`) do not need to exist ahead of the first write.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdStorage;

impl StdStorage {
    /// Creates a new std filesystem storage.
    pub fn new() -> Self {
        Self
    }
}

impl Storage for StdStorage {
    type Handle = fs::File;

    fn create_for_write(&self, path: &Path) -> io::Result<fs::File> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::File::create(path)
    }

    fn append(&self, handle: &mut fs::File, data: &[u8]) -> io::Result<()> {
        handle.write_all(data)
    }

    fn close(&self, mut handle: fs::File) -> io::Result<()> {
        handle.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_append_close_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.dat");
        let storage = StdStorage::new();

        let mut handle = storage.create_for_write(&path).unwrap();
        storage.append(&mut handle, b"hello ").unwrap();
        storage.append(&mut handle, b"world").unwrap();
        storage.close(handle).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"hello world");
    }

    #[test]
    fn test_create_makes_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dumps").join("deep").join("out.dat");
        let storage = StdStorage::new();

        let handle = storage.create_for_write(&path).unwrap();
        storage.close(handle).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_create_truncates_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.dat");
        fs::write(&path, b"previous contents").unwrap();

        let storage = StdStorage::new();
        let handle = storage.create_for_write(&path).unwrap();
        storage.close(handle).unwrap();

        assert_eq!(fs::read(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_create_fails_on_unwritable_location() {
        let temp = TempDir::new().unwrap();
        // A path component that is a regular file cannot be a directory.
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let path = blocker.join("out.dat");

        let storage = StdStorage::new();
        assert!(storage.create_for_write(&path).is_err());
    }
}
