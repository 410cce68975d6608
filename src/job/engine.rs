//! Write engine: executes one claimed job from open to retirement.

use crate::category::PathResolver;
use crate::header::{write_header, HEADER_LEN};
use crate::job::descriptor::{JobDescriptor, JobRequest, JobTarget};
use crate::job::events::{EventInfo, WriteEvent, STATUS_OK, STATUS_UNKNOWN};
use crate::storage::Storage;
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Executes background file-write jobs against a [`Storage`] backend.
///
/// The engine is the consumer side of the descriptor protocol. Given a
/// pending [`JobDescriptor`] it runs the full write sequence — open, header,
/// record loop, close — delivering exactly one terminal event through the
/// job's notifier and clearing the pending flag as its final step. All I/O
/// failures are absorbed into events; none escape as errors or panics.
///
/// Intended to run on the shared background worker's thread (see
/// [`FileWriteDaemon`](crate::job::FileWriteDaemon)), never on a
/// requester's.
pub struct WriteEngine<S, R>
where
    S: Storage,
    R: PathResolver,
{
    storage: S,
    resolver: R,
}

impl<S, R> WriteEngine<S, R>
where
    S: Storage,
    R: PathResolver,
{
    /// Creates an engine over the given storage and path resolver.
    pub fn new(storage: S, resolver: R) -> Self {
        Self { storage, resolver }
    }

    /// Services the descriptor if a job is pending.
    ///
    /// Returns `true` if a job was claimed and run to its terminal event,
    /// `false` if the descriptor was idle.
    pub fn service(&self, descriptor: &JobDescriptor) -> bool {
        let Some(request) = descriptor.claim() else {
            return false;
        };

        self.run(&request);
        descriptor.retire();
        true
    }

    fn run(&self, request: &JobRequest) {
        let path = self.resolve_target(&request.target);
        debug!(path = %path.display(), record_kind = request.record_kind, "Starting file write job");

        // Opening
        let mut handle = match self.storage.create_for_write(&path) {
            Ok(handle) => handle,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to create file");
                notify(
                    request,
                    WriteEvent::CreateError,
                    EventInfo {
                        status: status_of(&e),
                        record_index: 0,
                        block_size: 0,
                        position: 0,
                    },
                );
                return;
            }
        };

        // WritingHeader
        let mut position: u64 = match write_header(
            &self.storage,
            &mut handle,
            request.record_kind,
            &request.description,
        ) {
            Ok(written) => written as u64,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to write file header");
                if let Err(close_err) = self.storage.close(handle) {
                    debug!(path = %path.display(), error = %close_err, "Close after header failure also failed");
                }
                notify(
                    request,
                    WriteEvent::HeaderWriteError,
                    EventInfo {
                        status: status_of(&e),
                        record_index: 0,
                        block_size: HEADER_LEN,
                        position: 0,
                    },
                );
                return;
            }
        };

        // WritingRecords
        let mut record_index: u32 = 0;
        loop {
            let record = request.producer.next_record(record_index);

            if !record.data.is_empty() {
                if let Err(e) = self.storage.append(&mut handle, &record.data) {
                    warn!(
                        path = %path.display(),
                        record_index,
                        error = %e,
                        "Failed to write record"
                    );
                    if let Err(close_err) = self.storage.close(handle) {
                        debug!(path = %path.display(), error = %close_err, "Close after record failure also failed");
                    }
                    notify(
                        request,
                        WriteEvent::RecordWriteError,
                        EventInfo {
                            status: status_of(&e),
                            record_index,
                            block_size: record.data.len(),
                            position,
                        },
                    );
                    return;
                }
                position += record.data.len() as u64;
            }

            record_index += 1;
            if record.is_last {
                break;
            }
        }

        // Retiring: close is best-effort and produces no event of its own.
        if let Err(e) = self.storage.close(handle) {
            debug!(path = %path.display(), error = %e, "Close after successful write failed");
        }

        debug!(
            path = %path.display(),
            records = record_index,
            bytes = position,
            "File write job complete"
        );
        notify(
            request,
            WriteEvent::Complete,
            EventInfo {
                status: STATUS_OK,
                record_index,
                block_size: 0,
                position,
            },
        );
    }

    fn resolve_target(&self, target: &JobTarget) -> PathBuf {
        match target {
            JobTarget::Path(path) => path.clone(),
            JobTarget::Category { category, name } => self.resolver.resolve(*category, name),
        }
    }
}

fn notify(request: &JobRequest, event: WriteEvent, info: EventInfo) {
    request.notifier.on_event(event, &info);
}

fn status_of(error: &io::Error) -> i32 {
    error.raw_os_error().unwrap_or(STATUS_UNKNOWN)
}
