use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use crate::domain::{
    records_from_response, DomainError, FileItem, FileQueue, RemoteLogEntry, Selection, Source,
    TranscriptionModel, WorkflowEvent,
};
use crate::ports::{Notifier, ProcessRequest, RemoteLogSink, TranscriptionApi};

pub const SELECT_MODEL_ALERT: &str = "Please select a model first.";
pub const SELECT_FILES_ALERT: &str = "Please select files to process.";
pub const PROCESSING_FAILED_ALERT: &str = "An error occurred while processing audio files.";

const EVENT_CAPACITY: usize = 64;

/// Totals of a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionSummary {
    /// Files moved from pending to processed.
    pub processed: usize,
    /// Transcription records collected.
    pub records: usize,
}

/// Submits pending files to the backend strictly one at a time.
///
/// Each success moves its file to processed before the next request goes
/// out. The first failure ends the run: files before it stay processed,
/// the failed file and everything after it stay pending.
pub struct SubmissionWorkflow {
    api: Arc<dyn TranscriptionApi>,
    notifier: Arc<dyn Notifier>,
    remote_log: Arc<dyn RemoteLogSink>,
    events: broadcast::Sender<WorkflowEvent>,
}

impl SubmissionWorkflow {
    pub fn new(
        api: Arc<dyn TranscriptionApi>,
        notifier: Arc<dyn Notifier>,
        remote_log: Arc<dyn RemoteLogSink>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            api,
            notifier,
            remote_log,
            events,
        }
    }

    /// Subscribe to per-file progress events.
    pub fn subscribe(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: WorkflowEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// Run a submission over the current pending list.
    pub async fn run(
        &self,
        selection: Selection,
        queue: &RwLock<FileQueue>,
    ) -> Result<SubmissionSummary, DomainError> {
        let Some(model) = selection.model else {
            self.notifier.alert(SELECT_MODEL_ALERT);
            return Err(DomainError::ModelNotSelected);
        };

        let batch: Vec<FileItem> = queue.read().pending().to_vec();
        if batch.is_empty() {
            self.notifier.alert(SELECT_FILES_ALERT);
            return Err(DomainError::NoFilesSelected);
        }

        let browse = selection.source.is_some_and(|s| s.is_browse());
        if browse && batch.iter().all(|item| item.upload().is_none()) {
            self.notifier.alert(SELECT_FILES_ALERT);
            return Err(DomainError::NoFilesSelected);
        }

        info!(
            total = batch.len(),
            model = %model,
            source = ?selection.source,
            "Submission started"
        );
        self.emit(WorkflowEvent::Started { total: batch.len() });

        let mut summary = SubmissionSummary::default();

        for item in batch {
            let outcome = if browse {
                let Some(upload) = item.upload() else {
                    warn!(file = item.name(), "Picked file has no content, skipped");
                    continue;
                };
                self.api.process_upload(model, upload).await
            } else {
                let request = ProcessRequest::single(model, item.name(), selection.source);
                self.api.process_named(&request).await
            };

            let body = match outcome {
                Ok(body) => body,
                Err(e) => {
                    return Err(self
                        .abort(&item, e, model, selection.source, summary.processed)
                        .await);
                }
            };

            let records = records_from_response(body);
            if !queue.write().complete(item.name(), records.clone()) {
                warn!(file = item.name(), "File left the pending list during the run, result dropped");
                continue;
            }
            summary.records += records.len();
            summary.processed += 1;

            info!(file = item.name(), records = records.len(), "File processed");
            self.emit(WorkflowEvent::FileProcessed {
                name: item.name().to_string(),
                records,
            });
        }

        info!(
            processed = summary.processed,
            records = summary.records,
            "Submission finished"
        );
        self.emit(WorkflowEvent::Finished {
            processed: summary.processed,
        });

        Ok(summary)
    }

    async fn abort(
        &self,
        item: &FileItem,
        cause: DomainError,
        model: TranscriptionModel,
        source: Option<Source>,
        processed: usize,
    ) -> DomainError {
        let reason = cause.to_string();

        error!(
            file = item.name(),
            error = %reason,
            model = %model,
            source = ?source,
            "Error processing audio files"
        );

        self.emit(WorkflowEvent::Aborted {
            name: item.name().to_string(),
            reason: reason.clone(),
        });
        self.notifier.alert(PROCESSING_FAILED_ALERT);
        self.remote_log
            .send(
                RemoteLogEntry::error("Error processing audio files")
                    .with("error", reason.clone())
                    .with("model", model.wire_name())
                    .with("source", source.map(|s| s.label())),
            )
            .await;

        DomainError::SubmissionAborted {
            file: item.name().to_string(),
            processed,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{ApiCall, RecordingLog, RecordingNotifier, ScriptedApi};
    use crate::domain::{RemoteLogLevel, TranscriptionRecord, UploadedAudio};
    use serde_json::json;

    struct Harness {
        api: Arc<ScriptedApi>,
        notifier: Arc<RecordingNotifier>,
        log: Arc<RecordingLog>,
        workflow: SubmissionWorkflow,
    }

    fn harness(api: ScriptedApi) -> Harness {
        let api = Arc::new(api);
        let notifier = Arc::new(RecordingNotifier::default());
        let log = Arc::new(RecordingLog::default());
        let workflow = SubmissionWorkflow::new(api.clone(), notifier.clone(), log.clone());
        Harness {
            api,
            notifier,
            log,
            workflow,
        }
    }

    fn queue_of(names: &[&str], source: Source) -> RwLock<FileQueue> {
        let mut queue = FileQueue::new();
        queue.replace_pending(names.iter().map(|n| FileItem::listed(*n, source)).collect());
        RwLock::new(queue)
    }

    fn reply_for(name: &str) -> serde_json::Value {
        json!([{"filename": name, "transcription": format!("text of {}", name)}])
    }

    fn selection(source: Source, model: TranscriptionModel) -> Selection {
        Selection::new(Some(source), Some(model))
    }

    #[tokio::test]
    async fn test_all_succeed_moves_every_file_in_order() {
        let h = harness(
            ScriptedApi::new()
                .with_reply(reply_for("a.wav"))
                .with_reply(reply_for("b.wav"))
                .with_reply(reply_for("c.wav")),
        );
        let queue = queue_of(&["a.wav", "b.wav", "c.wav"], Source::LocalFolder);

        let summary = h
            .workflow
            .run(selection(Source::LocalFolder, TranscriptionModel::Whisper), &queue)
            .await
            .unwrap();

        assert_eq!(summary, SubmissionSummary { processed: 3, records: 3 });
        let queue = queue.read();
        assert!(queue.pending().is_empty());
        assert_eq!(queue.processed(), &["a.wav", "b.wav", "c.wav"].map(String::from));
        assert_eq!(queue.results()[1], TranscriptionRecord::new("b.wav", "text of b.wav"));
        assert!(h.notifier.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_failure_at_k_stops_the_run() {
        let h = harness(
            ScriptedApi::new()
                .with_reply(reply_for("a.wav"))
                .with_failure(500)
                .with_reply(reply_for("c.wav")),
        );
        let queue = queue_of(&["a.wav", "b.wav", "c.wav", "d.wav"], Source::Azure);

        let result = h
            .workflow
            .run(selection(Source::Azure, TranscriptionModel::Deepgram), &queue)
            .await;

        match result {
            Err(DomainError::SubmissionAborted { file, processed, .. }) => {
                assert_eq!(file, "b.wav");
                assert_eq!(processed, 1);
            }
            other => panic!("expected abort, got {:?}", other),
        }

        let queue = queue.read();
        assert_eq!(queue.processed(), &["a.wav".to_string()]);
        assert_eq!(queue.pending_names(), vec!["b.wav", "c.wav", "d.wav"]);
        assert_eq!(h.api.process_calls(), 2);
        assert_eq!(h.notifier.alerts(), vec![PROCESSING_FAILED_ALERT.to_string()]);
    }

    #[tokio::test]
    async fn test_failure_on_first_file_moves_nothing() {
        let h = harness(ScriptedApi::new().with_failure(500));
        let queue = queue_of(&["a.wav", "b.wav", "c.wav"], Source::LocalFolder);
        let before = queue.read().pending_names();

        let result = h
            .workflow
            .run(selection(Source::LocalFolder, TranscriptionModel::Whisper), &queue)
            .await;

        assert!(matches!(
            result,
            Err(DomainError::SubmissionAborted { processed: 0, ref file, .. }) if file == "a.wav"
        ));
        let queue = queue.read();
        assert!(queue.processed().is_empty());
        assert!(queue.results().is_empty());
        assert_eq!(queue.pending_names(), before);
        assert_eq!(h.api.process_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_on_last_file_keeps_earlier_ones() {
        let h = harness(
            ScriptedApi::new()
                .with_reply(reply_for("a.wav"))
                .with_reply(reply_for("b.wav"))
                .with_failure(503),
        );
        let queue = queue_of(&["a.wav", "b.wav", "c.wav"], Source::Azure);

        let result = h
            .workflow
            .run(selection(Source::Azure, TranscriptionModel::Azure), &queue)
            .await;

        assert!(matches!(
            result,
            Err(DomainError::SubmissionAborted { processed: 2, ref file, .. }) if file == "c.wav"
        ));
        let queue = queue.read();
        assert_eq!(queue.processed(), &["a.wav", "b.wav"].map(String::from));
        assert_eq!(queue.pending_names(), vec!["c.wav"]);
        assert_eq!(queue.results().len(), 2);
        assert_eq!(h.api.process_calls(), 3);
    }

    #[tokio::test]
    async fn test_browse_without_uploaded_files_alerts() {
        let h = harness(ScriptedApi::new());
        let queue = queue_of(&["a.wav", "b.wav"], Source::LocalFolder);
        let mut events = h.workflow.subscribe();

        let result = h
            .workflow
            .run(selection(Source::BrowseFile, TranscriptionModel::Whisper), &queue)
            .await;

        assert!(matches!(result, Err(DomainError::NoFilesSelected)));
        assert_eq!(h.notifier.alerts(), vec![SELECT_FILES_ALERT.to_string()]);
        assert!(h.api.calls().is_empty());
        assert_eq!(queue.read().pending().len(), 2);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_result_dropped_when_pending_list_replaced_mid_run() {
        let h = harness(
            ScriptedApi::new()
                .with_delay(std::time::Duration::from_millis(50))
                .with_reply(reply_for("a.wav"))
                .with_reply(reply_for("b.wav")),
        );
        let mut events = h.workflow.subscribe();
        let queue = queue_of(&["a.wav", "b.wav"], Source::LocalFolder);

        let (result, _) = tokio::join!(
            h.workflow
                .run(selection(Source::LocalFolder, TranscriptionModel::Whisper), &queue),
            async {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                queue
                    .write()
                    .replace_pending(vec![FileItem::listed("x.wav", Source::Azure)]);
            }
        );

        assert_eq!(result.unwrap(), SubmissionSummary::default());
        let queue = queue.read();
        assert!(queue.processed().is_empty());
        assert!(queue.results().is_empty());
        assert_eq!(queue.pending_names(), vec!["x.wav"]);
        assert_eq!(events.try_recv().unwrap(), WorkflowEvent::Started { total: 2 });
        assert_eq!(events.try_recv().unwrap(), WorkflowEvent::Finished { processed: 0 });
    }

    #[tokio::test]
    async fn test_failure_is_logged_remotely_with_context() {
        let h = harness(ScriptedApi::new().with_failure(502));
        let queue = queue_of(&["a.wav"], Source::Aws);

        let _ = h
            .workflow
            .run(selection(Source::Aws, TranscriptionModel::Aws), &queue)
            .await;

        let entries = h.log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, RemoteLogLevel::Error);
        assert_eq!(entries[0].metadata["model"], "aws");
        assert_eq!(entries[0].metadata["source"], "Aws");
        assert!(entries[0].metadata["error"].as_str().unwrap().contains("502"));
    }

    #[tokio::test]
    async fn test_missing_model_alerts_without_requests() {
        let h = harness(ScriptedApi::new());
        let queue = queue_of(&["a.wav"], Source::LocalFolder);

        let result = h
            .workflow
            .run(Selection::new(Some(Source::LocalFolder), None), &queue)
            .await;

        assert!(matches!(result, Err(DomainError::ModelNotSelected)));
        assert_eq!(h.notifier.alerts(), vec![SELECT_MODEL_ALERT.to_string()]);
        assert!(h.api.calls().is_empty());
        assert_eq!(queue.read().pending().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_pending_alerts_without_requests() {
        let h = harness(ScriptedApi::new());
        let queue = RwLock::new(FileQueue::new());

        let result = h
            .workflow
            .run(selection(Source::Azure, TranscriptionModel::Azure), &queue)
            .await;

        assert!(matches!(result, Err(DomainError::NoFilesSelected)));
        assert_eq!(h.notifier.alerts(), vec![SELECT_FILES_ALERT.to_string()]);
        assert!(h.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_named_request_carries_azure_flag() {
        let h = harness(ScriptedApi::new().with_reply(json!([])));
        let queue = queue_of(&["a.wav"], Source::Azure);

        h.workflow
            .run(selection(Source::Azure, TranscriptionModel::Whisper), &queue)
            .await
            .unwrap();

        assert_eq!(
            h.api.calls(),
            vec![ApiCall::Named(ProcessRequest {
                model: TranscriptionModel::Whisper,
                files: vec!["a.wav".to_string()],
                is_azure: true,
            })]
        );
    }

    #[tokio::test]
    async fn test_non_array_reply_still_moves_file() {
        let h = harness(ScriptedApi::new().with_reply(json!({"status": "queued"})));
        let queue = queue_of(&["a.wav"], Source::LocalFolder);

        let summary = h
            .workflow
            .run(selection(Source::LocalFolder, TranscriptionModel::Whisper), &queue)
            .await
            .unwrap();

        assert_eq!(summary, SubmissionSummary { processed: 1, records: 0 });
        let queue = queue.read();
        assert_eq!(queue.processed(), &["a.wav".to_string()]);
        assert!(queue.results().is_empty());
    }

    #[tokio::test]
    async fn test_browse_source_uploads_bytes() {
        let h = harness(ScriptedApi::new().with_reply(reply_for("clip.mp3")));
        let mut queue = FileQueue::new();
        queue.replace_pending(vec![FileItem::uploaded(UploadedAudio::new("clip.mp3", vec![1; 10]))]);
        let queue = RwLock::new(queue);

        h.workflow
            .run(selection(Source::BrowseFile, TranscriptionModel::Deepgram), &queue)
            .await
            .unwrap();

        assert_eq!(
            h.api.calls(),
            vec![ApiCall::Upload {
                model: TranscriptionModel::Deepgram,
                file: "clip.mp3".to_string(),
                size: 10,
            }]
        );
        assert_eq!(queue.read().results().len(), 1);
    }

    #[tokio::test]
    async fn test_events_follow_each_file() {
        let h = harness(
            ScriptedApi::new()
                .with_reply(reply_for("a.wav"))
                .with_failure(500),
        );
        let mut events = h.workflow.subscribe();
        let queue = queue_of(&["a.wav", "b.wav"], Source::LocalFolder);

        let _ = h
            .workflow
            .run(selection(Source::LocalFolder, TranscriptionModel::Whisper), &queue)
            .await;

        assert_eq!(events.try_recv().unwrap(), WorkflowEvent::Started { total: 2 });
        assert!(matches!(
            events.try_recv().unwrap(),
            WorkflowEvent::FileProcessed { ref name, .. } if name == "a.wav"
        ));
        assert!(matches!(
            events.try_recv().unwrap(),
            WorkflowEvent::Aborted { ref name, .. } if name == "b.wav"
        ));
        assert!(events.try_recv().is_err());
    }
}
