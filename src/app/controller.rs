use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::adapters::{ConsoleNotifier, HttpRemoteLog, HttpTranscriptionApi};
use crate::app::playback::PlaybackController;
use crate::app::submission::{SubmissionSummary, SubmissionWorkflow};
use crate::domain::view::{render_queue, render_results};
use crate::domain::{
    AppConfig, DomainError, FileItem, FileQueue, RemoteLogEntry, Selection, Source,
    TranscriptionModel, TranscriptionRecord, ViewMode, WorkflowEvent,
};
use crate::ports::{AudioElement, FilePicker, Notifier, RemoteLogSink, TranscriptionApi};

/// Ports the controller talks through.
pub struct Ports {
    pub api: Arc<dyn TranscriptionApi>,
    pub picker: Arc<dyn FilePicker>,
    pub notifier: Arc<dyn Notifier>,
    pub remote_log: Arc<dyn RemoteLogSink>,
}

/// Application controller owning the session state.
///
/// All state is in memory and lives as long as the controller.
pub struct AppController {
    config: AppConfig,
    api: Arc<dyn TranscriptionApi>,
    picker: Arc<dyn FilePicker>,
    remote_log: Arc<dyn RemoteLogSink>,
    workflow: SubmissionWorkflow,
    selection: RwLock<Selection>,
    queue: RwLock<FileQueue>,
    playback: Mutex<PlaybackController>,
    view: RwLock<ViewMode>,
    running: AtomicBool,
}

impl AppController {
    pub fn new(config: AppConfig, ports: Ports) -> Self {
        let workflow = SubmissionWorkflow::new(
            ports.api.clone(),
            ports.notifier,
            ports.remote_log.clone(),
        );

        info!(base_url = %config.api.base_url, "AppController initialized");

        Self {
            config,
            api: ports.api,
            picker: ports.picker,
            remote_log: ports.remote_log,
            workflow,
            selection: RwLock::new(Selection::default()),
            queue: RwLock::new(FileQueue::new()),
            playback: Mutex::new(PlaybackController::new()),
            view: RwLock::new(ViewMode::default()),
            running: AtomicBool::new(false),
        }
    }

    /// Controller wired to the HTTP backend named in `config`.
    pub fn connect(config: AppConfig, picker: Arc<dyn FilePicker>) -> Result<Self, DomainError> {
        let api = Arc::new(HttpTranscriptionApi::new(config.api.clone())?);
        let remote_log = Arc::new(HttpRemoteLog::new(&config.api, config.remote_log.enabled)?);

        Ok(Self::new(
            config,
            Ports {
                api,
                picker,
                notifier: Arc::new(ConsoleNotifier),
                remote_log,
            },
        ))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn selection(&self) -> Selection {
        *self.selection.read()
    }

    // ==================== Source & Model ====================

    /// Toggle a source option and reload the pending list for it.
    ///
    /// Clearing the source clears the list. A failed reload is logged and
    /// leaves the previous list in place. Ignored while a submission runs.
    pub async fn select_source(&self, source: Source) -> Option<Source> {
        if self.is_submitting() {
            warn!(picked = %source, "Submission in progress, source unchanged");
            return self.selection().source;
        }

        let active = self.selection.write().toggle_source(source);
        info!(picked = %source, active = ?active, "Source selection changed");

        let Some(active) = active else {
            self.queue.write().clear_pending();
            self.playback.lock().reset();
            return None;
        };

        match self.load_files(active).await {
            Ok(items) if items.is_empty() && active.is_browse() => {
                info!("No files picked, keeping current list");
            }
            Ok(_) if self.is_submitting() => {
                warn!(source = %active, "Submission started while listing, list discarded");
            }
            Ok(items) => {
                self.replace_pending(items);
            }
            Err(e) => {
                warn!(source = %active, error = %e, "Error fetching files");
                self.remote_log
                    .send(
                        RemoteLogEntry::error("Error fetching files")
                            .with("error", e.to_string())
                            .with("source", active.label()),
                    )
                    .await;
            }
        }

        Some(active)
    }

    /// Fetch the candidate files of a source without touching the session.
    pub async fn load_files(&self, source: Source) -> Result<Vec<FileItem>, DomainError> {
        if source.is_browse() {
            let picked = self.picker.pick().await?;
            return Ok(picked.into_iter().map(FileItem::uploaded).collect());
        }

        let names = self.api.list_files(source).await?;
        Ok(names
            .into_iter()
            .map(|name| FileItem::listed(name, source))
            .collect())
    }

    fn replace_pending(&self, items: Vec<FileItem>) {
        let kept = self.queue.write().replace_pending(items);
        self.playback.lock().reset();
        info!(count = kept, "Pending list replaced");
    }

    /// Toggle a model option. Ignored while a submission runs.
    pub fn select_model(&self, model: TranscriptionModel) -> Option<TranscriptionModel> {
        if self.is_submitting() {
            warn!(picked = %model, "Submission in progress, model unchanged");
            return self.selection().model;
        }

        let active = self.selection.write().toggle_model(model);
        info!(picked = %model, active = ?active, "Model selection changed");
        active
    }

    // ==================== Submission ====================

    /// Submit every pending file, one at a time.
    pub async fn submit(&self) -> Result<SubmissionSummary, DomainError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(DomainError::SubmissionInProgress);
        }
        let _running = RunningGuard(&self.running);

        let selection = self.selection();
        self.workflow.run(selection, &self.queue).await
    }

    /// Subscribe to submission progress.
    pub fn subscribe(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.workflow.subscribe()
    }

    pub fn is_submitting(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn pending(&self) -> Vec<FileItem> {
        self.queue.read().pending().to_vec()
    }

    pub fn processed(&self) -> Vec<String> {
        self.queue.read().processed().to_vec()
    }

    pub fn results(&self) -> Vec<TranscriptionRecord> {
        self.queue.read().results().to_vec()
    }

    /// Stream URL of pending file `index`.
    pub fn stream_url(&self, index: usize) -> Option<String> {
        self.queue
            .read()
            .pending()
            .get(index)
            .and_then(|item| item.stream_url(&self.config.api))
    }

    // ==================== Playback ====================

    /// Play or pause pending file `index`, stopping all others.
    pub fn toggle_playback<E: AudioElement>(&self, elements: &mut [E], index: usize) -> Option<usize> {
        self.playback.lock().toggle(elements, index)
    }

    pub fn playback_ended(&self, index: usize) {
        self.playback.lock().ended(index);
    }

    /// Report a load failure of pending file `index`. The playing marker
    /// is left alone.
    pub async fn playback_error(&self, index: usize, reason: &str) {
        let file = self
            .queue
            .read()
            .pending()
            .get(index)
            .map(|item| item.name().to_string())
            .unwrap_or_default();

        warn!(file = %file, reason, "Error loading audio");
        self.remote_log
            .send(
                RemoteLogEntry::warn(format!("Error loading {}", file))
                    .with("file", file.clone())
                    .with("reason", reason),
            )
            .await;
    }

    pub fn playing(&self) -> Option<usize> {
        self.playback.lock().playing()
    }

    // ==================== View ====================

    pub fn view(&self) -> ViewMode {
        *self.view.read()
    }

    pub fn toggle_view(&self) -> ViewMode {
        self.view.write().toggle()
    }

    pub fn set_view(&self, mode: ViewMode) {
        *self.view.write() = mode;
    }

    /// Render the active view.
    pub fn render(&self) -> String {
        let queue = self.queue.read();
        match self.view() {
            ViewMode::Queue => render_queue(queue.pending(), queue.processed()),
            ViewMode::Results => render_results(queue.results()),
        }
    }
}

/// Clears the submitting flag when the run ends or its future is dropped.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
