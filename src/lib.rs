//! Skyfile - background file-write jobs for flight-software file services
//!
//! Flight software components that need to persist data (logs, dumps,
//! generated scripts) do not write files on their own execution thread.
//! They submit a write job on a [`job::JobDescriptor`]; a single shared
//! background worker executes the job later, decoupling file I/O latency
//! from application scheduling.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides a simplified facade:
//!
//! ```ignore
//! use skyfile::config::FileServiceConfig;
//! use skyfile::service::FileService;
//! use skyfile::job::{JobRequest, JobTarget, SliceProducer};
//! use skyfile::category::FileCategory;
//! use std::sync::Arc;
//!
//! let service = FileService::start(FileServiceConfig::default());
//! let descriptor = service.new_descriptor();
//!
//! descriptor.submit(
//!     JobRequest::new(
//!         JobTarget::category(FileCategory::BinaryDataDump, "tbl_reg.dat"),
//!         Arc::new(SliceProducer::new(vec![record_bytes])),
//!         Arc::new(MyNotifier),
//!     )
//!     .with_record_kind(4)
//!     .with_description("table registry"),
//! )?;
//!
//! // Poll descriptor.is_pending() to learn when the slot is free again;
//! // MyNotifier receives the terminal Complete/error event.
//! ```
//!
//! The lower-level pieces — [`job::WriteEngine`], [`storage::Storage`],
//! [`category::PathResolver`] — can be wired manually for custom backends.

pub mod category;
pub mod config;
pub mod header;
pub mod job;
pub mod logging;
pub mod service;
pub mod storage;

/// Version of the skyfile library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version_is_set() {
        assert!(!super::VERSION.is_empty());
    }
}
