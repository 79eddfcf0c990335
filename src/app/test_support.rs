//! In-memory port fakes shared by the app tests.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::domain::{DomainError, RemoteLogEntry, Source, TranscriptionModel, UploadedAudio};
use crate::ports::{AudioElement, FilePicker, Notifier, ProcessRequest, RemoteLogSink, TranscriptionApi};

/// A call the scripted API received.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List(Source),
    Named(ProcessRequest),
    Upload {
        model: TranscriptionModel,
        file: String,
        size: usize,
    },
}

/// API fake answering from queued replies, in call order.
#[derive(Default)]
pub struct ScriptedApi {
    listings: Mutex<VecDeque<Result<Vec<String>, DomainError>>>,
    replies: Mutex<VecDeque<Result<Value, DomainError>>>,
    calls: Mutex<Vec<ApiCall>>,
    delay: Option<Duration>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(self, names: &[&str]) -> Self {
        self.listings
            .lock()
            .push_back(Ok(names.iter().map(|n| n.to_string()).collect()));
        self
    }

    pub fn with_listing_error(self) -> Self {
        self.listings
            .lock()
            .push_back(Err(DomainError::HttpRequest("connection refused".to_string())));
        self
    }

    pub fn with_reply(self, body: Value) -> Self {
        self.replies.lock().push_back(Ok(body));
        self
    }

    pub fn with_failure(self, status: u16) -> Self {
        self.replies.lock().push_back(Err(DomainError::HttpStatus {
            status,
            url: "http://backend/api/process-audio".to_string(),
        }));
        self
    }

    /// Hold every process request for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    pub fn process_calls(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| !matches!(c, ApiCall::List(_)))
            .count()
    }

    async fn next_reply(&self) -> Result<Value, DomainError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(Value::Array(Vec::new())))
    }
}

#[async_trait]
impl TranscriptionApi for ScriptedApi {
    async fn list_files(&self, source: Source) -> Result<Vec<String>, DomainError> {
        self.calls.lock().push(ApiCall::List(source));
        self.listings.lock().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn process_named(&self, request: &ProcessRequest) -> Result<Value, DomainError> {
        self.calls.lock().push(ApiCall::Named(request.clone()));
        self.next_reply().await
    }

    async fn process_upload(
        &self,
        model: TranscriptionModel,
        upload: &UploadedAudio,
    ) -> Result<Value, DomainError> {
        self.calls.lock().push(ApiCall::Upload {
            model,
            file: upload.file_name().to_string(),
            size: upload.len(),
        });
        self.next_reply().await
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().push(message.to_string());
    }
}

#[derive(Default)]
pub struct RecordingLog {
    entries: Mutex<Vec<RemoteLogEntry>>,
}

impl RecordingLog {
    pub fn entries(&self) -> Vec<RemoteLogEntry> {
        self.entries.lock().clone()
    }
}

#[async_trait]
impl RemoteLogSink for RecordingLog {
    async fn send(&self, entry: RemoteLogEntry) {
        self.entries.lock().push(entry);
    }
}

/// Picker fake returning the same files on every pick.
#[derive(Default)]
pub struct FixedPicker {
    files: Vec<(String, Vec<u8>)>,
}

impl FixedPicker {
    pub fn new(files: &[(&str, &[u8])]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(n, b)| (n.to_string(), b.to_vec()))
                .collect(),
        }
    }
}

#[async_trait]
impl FilePicker for FixedPicker {
    async fn pick(&self) -> Result<Vec<UploadedAudio>, DomainError> {
        Ok(self
            .files
            .iter()
            .map(|(n, b)| UploadedAudio::new(n.clone(), b.clone()))
            .collect())
    }
}

/// Audio element fake tracking play state and position.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FakeElement {
    pub playing: bool,
    pub position: f32,
}

impl FakeElement {
    pub fn at(position: f32, playing: bool) -> Self {
        Self { playing, position }
    }
}

impl AudioElement for FakeElement {
    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn rewind(&mut self) {
        self.position = 0.0;
    }
}
