//! Event contract: lifecycle notifications delivered to the requester.
//!
//! The engine never formats or transmits messages itself. It invokes the
//! requester's [`JobNotifier`] with a structured [`WriteEvent`]; the
//! requester translates events into its own telemetry, event IDs, or log
//! lines.

/// Status code for successful events.
pub const STATUS_OK: i32 = 0;

/// Status code when the underlying failure carries no OS error code.
pub const STATUS_UNKNOWN: i32 = -1;

/// Abstract events associated with a background file-write job.
///
/// Every submitted job receives exactly one terminal event — `Complete` or
/// one of the error variants — as the last notification before the
/// descriptor retires. A job is never silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteEvent {
    /// File completed successfully.
    Complete,
    /// Destination could not be created/opened; nothing was written.
    CreateError,
    /// Standard header could not be written; no records were attempted.
    HeaderWriteError,
    /// A data record could not be written; a partial file may remain.
    RecordWriteError,
}

impl WriteEvent {
    /// Whether this event reports a failure.
    pub fn is_error(&self) -> bool {
        !matches!(self, WriteEvent::Complete)
    }
}

impl std::fmt::Display for WriteEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WriteEvent::Complete => "complete",
            WriteEvent::CreateError => "create error",
            WriteEvent::HeaderWriteError => "header write error",
            WriteEvent::RecordWriteError => "record write error",
        };
        f.write_str(name)
    }
}

/// Diagnostic detail accompanying a [`WriteEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInfo {
    /// Underlying I/O status: [`STATUS_OK`] on success, the raw OS error
    /// code of the failed operation otherwise ([`STATUS_UNKNOWN`] if the
    /// failure carried none).
    pub status: i32,
    /// Record the event pertains to. For `Complete` this is the total
    /// number of records the producer supplied.
    pub record_index: u32,
    /// Size in bytes of the block involved in the event (the failing
    /// header or record write), 0 where not applicable.
    pub block_size: usize,
    /// Bytes successfully written to the file at the time of the event.
    pub position: u64,
}

/// Receives lifecycle notifications for a background file-write job.
///
/// Invoked from the background worker thread; implementations must be
/// `Send + Sync` and should return promptly — the worker services other
/// descriptors on the same thread.
pub trait JobNotifier: Send + Sync + 'static {
    /// Called at notification points during job execution.
    fn on_event(&self, event: WriteEvent, info: &EventInfo);
}
