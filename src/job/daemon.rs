//! Background worker servicing pending write jobs.
//!
//! One long-lived thread drains a registry of known descriptors: each pass
//! it services every descriptor with a pending job, one job at a time, then
//! sleeps for the poll interval. Service order is registration order; that
//! is a policy of this daemon, not a guarantee of the job protocol, and
//! requesters must not rely on it.

use crate::category::PathResolver;
use crate::job::descriptor::JobDescriptor;
use crate::job::engine::WriteEngine;
use crate::storage::Storage;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Set of descriptors known to the background worker.
///
/// Requesters register each long-lived descriptor once, then submit jobs on
/// it as often as needed. Registration is cheap and may happen while the
/// daemon is running.
#[derive(Default)]
pub struct JobRegistry {
    descriptors: Mutex<Vec<Arc<JobDescriptor>>>,
}

impl JobRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a descriptor to the worker's polling set.
    pub fn register(&self, descriptor: Arc<JobDescriptor>) {
        self.descriptors.lock().push(descriptor);
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.lock().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.descriptors.lock().is_empty()
    }

    fn snapshot(&self) -> Vec<Arc<JobDescriptor>> {
        self.descriptors.lock().clone()
    }
}

/// Background daemon executing file-write jobs.
///
/// Runs in its own thread and can be cleanly shut down by calling
/// [`shutdown`](Self::shutdown) or by dropping the daemon. In-flight jobs
/// always run to their terminal event; shutdown is observed between jobs.
pub struct FileWriteDaemon {
    /// Handle to the daemon thread
    thread_handle: Option<JoinHandle<()>>,
    /// Shutdown signal
    shutdown: Arc<AtomicBool>,
}

impl FileWriteDaemon {
    /// Starts the daemon over the given engine and registry.
    ///
    /// `poll_interval` is how long the worker sleeps between passes over
    /// the registry when no work arrived.
    pub fn start<S, R>(
        engine: WriteEngine<S, R>,
        registry: Arc<JobRegistry>,
        poll_interval: Duration,
    ) -> Self
    where
        S: Storage,
        R: PathResolver,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let thread_handle = thread::Builder::new()
            .name("file-write-daemon".to_string())
            .spawn(move || {
                Self::run_loop(engine, registry, poll_interval, shutdown_clone);
            })
            .expect("Failed to spawn file write daemon thread");

        info!("File write daemon started (poll interval: {:?})", poll_interval);

        Self {
            thread_handle: Some(thread_handle),
            shutdown,
        }
    }

    /// The main daemon loop.
    fn run_loop<S, R>(
        engine: WriteEngine<S, R>,
        registry: Arc<JobRegistry>,
        poll_interval: Duration,
        shutdown: Arc<AtomicBool>,
    ) where
        S: Storage,
        R: PathResolver,
    {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                debug!("File write daemon received shutdown signal");
                break;
            }

            let mut serviced = 0usize;
            for descriptor in registry.snapshot() {
                if shutdown.load(Ordering::Relaxed) {
                    break;
                }
                if engine.service(&descriptor) {
                    serviced += 1;
                }
            }

            if serviced > 0 {
                debug!("File write daemon serviced {} job(s)", serviced);
            }

            thread::sleep(poll_interval);
        }

        debug!("File write daemon stopped");
    }

    /// Signal the daemon to shut down.
    ///
    /// Non-blocking; the daemon stops after its current pass. Call
    /// [`join`](Self::join) afterwards to wait for the thread.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the daemon thread to finish.
    pub fn join(&mut self) {
        if let Some(handle) = self.thread_handle.take() {
            if let Err(e) = handle.join() {
                warn!("File write daemon thread panicked: {:?}", e);
            }
        }
    }

    /// Check if the daemon is still running.
    pub fn is_running(&self) -> bool {
        self.thread_handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for FileWriteDaemon {
    fn drop(&mut self) {
        self.shutdown();
        self.join();
    }
}
