//! Job descriptor: the shared metadata block for one write request.

use crate::category::FileCategory;
use crate::header::DESCRIPTION_MAX_LEN;
use crate::job::events::JobNotifier;
use crate::job::producer::RecordProducer;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Maximum length in bytes of a requester-supplied path or relative name.
pub const PATH_MAX_LEN: usize = 64;

/// Destination of a write job.
///
/// Either a literal path, or a file category plus relative name resolved to
/// a concrete location by the engine's [`PathResolver`](crate::category::PathResolver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobTarget {
    /// Literal destination path.
    Path(PathBuf),
    /// Category-relative destination, resolved at execution time.
    Category {
        /// File category selecting the default directory.
        category: FileCategory,
        /// File name relative to the category directory.
        name: String,
    },
}

impl JobTarget {
    /// Target at a literal path.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        JobTarget::Path(path.into())
    }

    /// Target resolved from a category and relative name.
    pub fn category(category: FileCategory, name: impl Into<String>) -> Self {
        JobTarget::Category {
            category,
            name: name.into(),
        }
    }

    fn validate(&self) -> Result<(), SubmitError> {
        let len = match self {
            JobTarget::Path(path) => path.as_os_str().len(),
            JobTarget::Category { name, .. } => name.len(),
        };
        if len == 0 {
            return Err(SubmitError::EmptyPath);
        }
        if len > PATH_MAX_LEN {
            return Err(SubmitError::PathTooLong { len });
        }
        Ok(())
    }
}

/// Submission failures, reported synchronously to the caller of
/// [`JobDescriptor::submit`]. None of these disturb an in-flight job.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// A job is already pending on this descriptor.
    #[error("A write job is already pending on this descriptor")]
    AlreadyPending,

    /// The target path or relative name is empty.
    #[error("Target path is empty")]
    EmptyPath,

    /// The target path or relative name exceeds [`PATH_MAX_LEN`] bytes.
    #[error("Target path too long: {len} bytes (max {max})", max = PATH_MAX_LEN)]
    PathTooLong { len: usize },

    /// The description exceeds [`DESCRIPTION_MAX_LEN`] bytes.
    #[error("Description too long: {len} bytes (max {max})", max = DESCRIPTION_MAX_LEN)]
    DescriptionTooLong { len: usize },
}

/// Content of one write request.
///
/// Built by the requester and handed to [`JobDescriptor::submit`]. The
/// producer and notifier carry the requester's own state behind `&self`,
/// which is how that state crosses the callback boundary.
#[derive(Clone)]
pub struct JobRequest {
    /// Destination of the file.
    pub target: JobTarget,
    /// Application-defined tag carried into the file header.
    pub record_kind: u32,
    /// Human-readable description carried into the file header.
    pub description: String,
    /// Supplies data records on demand.
    pub producer: Arc<dyn RecordProducer>,
    /// Receives lifecycle notifications.
    pub notifier: Arc<dyn JobNotifier>,
}

impl JobRequest {
    /// Creates a request with an empty description and record kind 0.
    pub fn new(
        target: JobTarget,
        producer: Arc<dyn RecordProducer>,
        notifier: Arc<dyn JobNotifier>,
    ) -> Self {
        Self {
            target,
            record_kind: 0,
            description: String::new(),
            producer,
            notifier,
        }
    }

    /// Sets the record kind written into the file header.
    pub fn with_record_kind(mut self, record_kind: u32) -> Self {
        self.record_kind = record_kind;
        self
    }

    /// Sets the description written into the file header.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn validate(&self) -> Result<(), SubmitError> {
        self.target.validate()?;
        if self.description.len() > DESCRIPTION_MAX_LEN {
            return Err(SubmitError::DescriptionTooLong {
                len: self.description.len(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for JobRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobRequest")
            .field("target", &self.target)
            .field("record_kind", &self.record_kind)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Shared metadata block for background file-write jobs.
///
/// Owned by the requester, typically as a long-lived `Arc` reused across
/// many successive jobs. The `pending` flag is the sole synchronization
/// primitive between requester and worker:
///
/// - `submit` populates the request slot, then publishes it by storing
///   `pending = true` with release ordering;
/// - the engine observes the flag with acquire ordering, claims the
///   request, and stores `pending = false` (release) only after delivering
///   the terminal event.
///
/// [`is_pending`](Self::is_pending) is a plain atomic load, safe to poll
/// from time-critical contexts. The request slot's mutex is held only for
/// the population/claim instants, never across I/O, so `submit` never
/// blocks on the engine.
#[derive(Default)]
pub struct JobDescriptor {
    /// Whether a job is pending. See the type-level protocol notes.
    pending: AtomicBool,
    /// Request content, frozen while `pending` is true.
    request: Mutex<Option<JobRequest>>,
}

impl JobDescriptor {
    /// Creates an idle descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits a write job on this descriptor.
    ///
    /// Fails with [`SubmitError::AlreadyPending`] if a job is in flight,
    /// leaving that job untouched. Bounds violations are rejected rather
    /// than truncated. On success the descriptor is pending until the
    /// engine delivers the job's terminal event.
    pub fn submit(&self, request: JobRequest) -> Result<(), SubmitError> {
        // The mutex serializes concurrent submitters; the engine never
        // holds it while a job is pending.
        let mut slot = self.request.lock();

        if self.pending.load(Ordering::Acquire) {
            return Err(SubmitError::AlreadyPending);
        }

        request.validate()?;

        *slot = Some(request);
        self.pending.store(true, Ordering::Release);
        Ok(())
    }

    /// Whether a job is currently pending. Lock-free; never blocks.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Takes the pending request for execution.
    ///
    /// Returns `None` if nothing is pending. The descriptor stays pending
    /// until [`retire`](Self::retire); the engine owns the request in the
    /// meantime.
    pub(crate) fn claim(&self) -> Option<JobRequest> {
        if !self.pending.load(Ordering::Acquire) {
            return None;
        }
        self.request.lock().take()
    }

    /// Clears the pending flag after the terminal event was delivered,
    /// making the descriptor reusable.
    pub(crate) fn retire(&self) {
        self.pending.store(false, Ordering::Release);
    }
}

impl std::fmt::Debug for JobDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobDescriptor")
            .field("pending", &self.is_pending())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::events::{EventInfo, WriteEvent};
    use crate::job::producer::{Record, SliceProducer};

    struct NullNotifier;

    impl JobNotifier for NullNotifier {
        fn on_event(&self, _event: WriteEvent, _info: &EventInfo) {}
    }

    fn request_for(target: JobTarget) -> JobRequest {
        JobRequest::new(
            target,
            Arc::new(SliceProducer::new(vec![vec![1, 2, 3]])),
            Arc::new(NullNotifier),
        )
    }

    #[test]
    fn test_submit_sets_pending() {
        let descriptor = JobDescriptor::new();
        assert!(!descriptor.is_pending());

        descriptor
            .submit(request_for(JobTarget::path("/tmp/a.dat")))
            .unwrap();
        assert!(descriptor.is_pending());
    }

    #[test]
    fn test_second_submit_rejected_while_pending() {
        let descriptor = JobDescriptor::new();
        descriptor
            .submit(request_for(JobTarget::path("/tmp/first.dat")))
            .unwrap();

        let result = descriptor.submit(request_for(JobTarget::path("/tmp/second.dat")));
        assert_eq!(result, Err(SubmitError::AlreadyPending));

        // First job untouched.
        let claimed = descriptor.claim().unwrap();
        assert_eq!(claimed.target, JobTarget::path("/tmp/first.dat"));
    }

    #[test]
    fn test_empty_path_rejected() {
        let descriptor = JobDescriptor::new();
        let result = descriptor.submit(request_for(JobTarget::path("")));
        assert_eq!(result, Err(SubmitError::EmptyPath));
        assert!(!descriptor.is_pending());
    }

    #[test]
    fn test_empty_category_name_rejected() {
        let descriptor = JobDescriptor::new();
        let result =
            descriptor.submit(request_for(JobTarget::category(FileCategory::TextLog, "")));
        assert_eq!(result, Err(SubmitError::EmptyPath));
    }

    #[test]
    fn test_path_too_long_rejected() {
        let descriptor = JobDescriptor::new();
        let long = "x".repeat(PATH_MAX_LEN + 1);
        let result = descriptor.submit(request_for(JobTarget::path(&long)));
        assert_eq!(
            result,
            Err(SubmitError::PathTooLong {
                len: PATH_MAX_LEN + 1
            })
        );
        assert!(!descriptor.is_pending());
    }

    #[test]
    fn test_path_at_max_length_accepted() {
        let descriptor = JobDescriptor::new();
        let exact = "x".repeat(PATH_MAX_LEN);
        descriptor
            .submit(request_for(JobTarget::path(&exact)))
            .unwrap();
        assert!(descriptor.is_pending());
    }

    #[test]
    fn test_description_too_long_rejected() {
        let descriptor = JobDescriptor::new();
        let request = request_for(JobTarget::path("/tmp/a.dat"))
            .with_description("d".repeat(DESCRIPTION_MAX_LEN + 1));
        let result = descriptor.submit(request);
        assert_eq!(
            result,
            Err(SubmitError::DescriptionTooLong {
                len: DESCRIPTION_MAX_LEN + 1
            })
        );
        assert!(!descriptor.is_pending());
    }

    #[test]
    fn test_claim_requires_pending() {
        let descriptor = JobDescriptor::new();
        assert!(descriptor.claim().is_none());
    }

    #[test]
    fn test_descriptor_reusable_after_retirement() {
        let descriptor = JobDescriptor::new();
        descriptor
            .submit(request_for(JobTarget::path("/tmp/first.dat")))
            .unwrap();

        let first = descriptor.claim().unwrap();
        assert_eq!(first.target, JobTarget::path("/tmp/first.dat"));
        descriptor.retire();
        assert!(!descriptor.is_pending());

        // New submission with different content runs independently.
        descriptor
            .submit(
                request_for(JobTarget::path("/tmp/second.dat")).with_record_kind(7),
            )
            .unwrap();
        let second = descriptor.claim().unwrap();
        assert_eq!(second.target, JobTarget::path("/tmp/second.dat"));
        assert_eq!(second.record_kind, 7);
    }

    #[test]
    fn test_claim_leaves_no_prior_request_behind() {
        let descriptor = JobDescriptor::new();
        descriptor
            .submit(request_for(JobTarget::path("/tmp/a.dat")))
            .unwrap();

        assert!(descriptor.claim().is_some());
        // Still pending, but the slot is drained; a second claim finds
        // nothing rather than re-running the same job.
        assert!(descriptor.is_pending());
        assert!(descriptor.claim().is_none());
        descriptor.retire();
    }

    #[test]
    fn test_request_builder() {
        let request = request_for(JobTarget::category(FileCategory::Script, "startup.scr"))
            .with_record_kind(12)
            .with_description("startup script");

        assert_eq!(request.record_kind, 12);
        assert_eq!(request.description, "startup script");
        let first = request.producer.next_record(0);
        assert_eq!(first, Record::last(vec![1, 2, 3]));
    }
}
