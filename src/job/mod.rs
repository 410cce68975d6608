//! Background file-write jobs.
//!
//! Applications never write files on their own execution thread. They fill
//! in a [`JobDescriptor`] and submit it; a shared background worker (the
//! [`FileWriteDaemon`]) later runs the job through the [`WriteEngine`]:
//! open the destination, write the standard header, pull records from the
//! requester's [`RecordProducer`] one at a time, and report lifecycle
//! events through the requester's [`JobNotifier`].
//!
//! # Concurrency protocol
//!
//! The only state shared between requester and worker is the descriptor's
//! `pending` flag plus the request fields frozen underneath it:
//!
//! - the requester sets `pending` false→true on a successful
//!   [`JobDescriptor::submit`];
//! - the engine clears it true→false after delivering exactly one terminal
//!   event ([`WriteEvent::Complete`] or one of the error events);
//! - while pending, the request content is immutable and owned by the
//!   worker; after retirement the descriptor is reusable.
//!
//! `submit` and [`JobDescriptor::is_pending`] never block on the engine, so
//! requesters may poll from time-critical contexts.
//!
//! # Example
//!
//! ```ignore
//! use skyfile::job::{JobDescriptor, JobRequest, JobTarget, SliceProducer};
//! use std::sync::Arc;
//!
//! let descriptor = Arc::new(JobDescriptor::new());
//! let request = JobRequest::new(
//!     JobTarget::path("/data/dumps/tbl_reg.dat"),
//!     Arc::new(SliceProducer::new(vec![record_bytes])),
//!     Arc::new(MyNotifier),
//! )
//! .with_record_kind(4)
//! .with_description("table registry");
//!
//! descriptor.submit(request)?;
//! // ... the daemon runs the job; poll descriptor.is_pending() for reuse.
//! ```

mod daemon;
mod descriptor;
mod engine;
mod events;
mod producer;

pub use daemon::{FileWriteDaemon, JobRegistry};
pub use descriptor::{JobDescriptor, JobRequest, JobTarget, SubmitError, PATH_MAX_LEN};
pub use engine::WriteEngine;
pub use events::{EventInfo, JobNotifier, WriteEvent, STATUS_OK, STATUS_UNKNOWN};
pub use producer::{Record, RecordProducer, SliceProducer};
