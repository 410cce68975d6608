//! High-level facade wiring the engine, registry, and daemon together.

use crate::category::DefaultPathResolver;
use crate::config::FileServiceConfig;
use crate::job::{FileWriteDaemon, JobDescriptor, JobRegistry, WriteEngine};
use crate::storage::StdStorage;
use std::sync::Arc;

/// Running file service: a write engine over std storage, a descriptor
/// registry, and the background daemon draining it.
///
/// Most applications only need this facade:
///
/// ```ignore
/// use skyfile::service::FileService;
/// use skyfile::config::FileServiceConfig;
///
/// let service = FileService::start(FileServiceConfig::default());
/// let descriptor = service.new_descriptor();
/// descriptor.submit(request)?;
/// ```
///
/// Components can also be wired manually for custom storage backends or
/// path resolvers; see [`WriteEngine`] and [`FileWriteDaemon`].
pub struct FileService {
    registry: Arc<JobRegistry>,
    daemon: FileWriteDaemon,
}

impl FileService {
    /// Starts the service with std filesystem storage and the default
    /// category resolver rooted at the configured base directory.
    pub fn start(config: FileServiceConfig) -> Self {
        let engine = WriteEngine::new(
            StdStorage::new(),
            DefaultPathResolver::new(config.base_dir.clone()),
        );
        let registry = Arc::new(JobRegistry::new());
        let daemon = FileWriteDaemon::start(engine, registry.clone(), config.poll_interval);

        Self { registry, daemon }
    }

    /// Creates a descriptor and registers it with the background worker.
    ///
    /// The returned descriptor is long-lived and reusable across many
    /// successive jobs.
    pub fn new_descriptor(&self) -> Arc<JobDescriptor> {
        let descriptor = Arc::new(JobDescriptor::new());
        self.registry.register(descriptor.clone());
        descriptor
    }

    /// The descriptor registry, for registering descriptors created
    /// elsewhere.
    pub fn registry(&self) -> &Arc<JobRegistry> {
        &self.registry
    }

    /// Whether the background worker is running.
    pub fn is_running(&self) -> bool {
        self.daemon.is_running()
    }

    /// Stops the background worker and waits for it to finish.
    pub fn shutdown(&mut self) {
        self.daemon.shutdown();
        self.daemon.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{EventInfo, JobNotifier, JobRequest, JobTarget, SliceProducer, WriteEvent};
    use parking_lot::Mutex;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    #[derive(Default)]
    struct CountingNotifier {
        events: Mutex<Vec<WriteEvent>>,
    }

    impl JobNotifier for CountingNotifier {
        fn on_event(&self, event: WriteEvent, _info: &EventInfo) {
            self.events.lock().push(event);
        }
    }

    fn test_config(temp: &TempDir) -> FileServiceConfig {
        FileServiceConfig::new()
            .with_base_dir(temp.path().to_path_buf())
            .with_poll_interval(Duration::from_millis(5))
    }

    fn wait_until_idle(descriptor: &JobDescriptor) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while descriptor.is_pending() {
            assert!(Instant::now() < deadline, "job did not retire in time");
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn test_service_lifecycle() {
        let temp = TempDir::new().unwrap();
        let mut service = FileService::start(test_config(&temp));
        assert!(service.is_running());

        service.shutdown();
        assert!(!service.is_running());
    }

    #[test]
    fn test_service_runs_category_job() {
        let temp = TempDir::new().unwrap();
        let service = FileService::start(test_config(&temp));
        let descriptor = service.new_descriptor();
        assert_eq!(service.registry().len(), 1);

        let notifier = Arc::new(CountingNotifier::default());
        descriptor
            .submit(
                JobRequest::new(
                    JobTarget::category(crate::category::FileCategory::TextLog, "sys.log"),
                    Arc::new(SliceProducer::new(vec![b"line one\n".to_vec()])),
                    notifier.clone(),
                )
                .with_description("system log"),
            )
            .unwrap();

        wait_until_idle(&descriptor);

        assert!(temp.path().join("logs").join("sys.log").exists());
        assert_eq!(notifier.events.lock().as_slice(), &[WriteEvent::Complete]);
    }
}
