use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use matcher_logging::{matcher_error, matcher_warn};

use crate::persist::write_atomically;
use crate::{Backend, BackendError, EngineEvent, FailureKind, RequestId};

enum EngineCommand {
    ListResumes {
        request_id: RequestId,
    },
    Upload {
        request_id: RequestId,
        path: PathBuf,
    },
    Analyze {
        request_id: RequestId,
        jd_text: String,
        resume_filename: String,
    },
    WriteReport {
        path: PathBuf,
        html: String,
    },
}

/// Runs backend requests on a background tokio runtime and reports each
/// outcome as exactly one [`EngineEvent`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(backend: Arc<dyn Backend>) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        })
    }

    pub fn list_resumes(&self, request_id: RequestId) {
        self.send(EngineCommand::ListResumes { request_id });
    }

    pub fn upload(&self, request_id: RequestId, path: impl Into<PathBuf>) {
        self.send(EngineCommand::Upload {
            request_id,
            path: path.into(),
        });
    }

    pub fn analyze(
        &self,
        request_id: RequestId,
        jd_text: impl Into<String>,
        resume_filename: impl Into<String>,
    ) {
        self.send(EngineCommand::Analyze {
            request_id,
            jd_text: jd_text.into(),
            resume_filename: resume_filename.into(),
        });
    }

    pub fn write_report(&self, path: impl Into<PathBuf>, html: impl Into<String>) {
        self.send(EngineCommand::WriteReport {
            path: path.into(),
            html: html.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.next_event(timeout).ok()
    }

    /// Like [`EngineHandle::recv_timeout`], but tells a quiet engine apart from
    /// one whose event channel is gone.
    pub fn next_event(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        let event_rx = self
            .event_rx
            .lock()
            .map_err(|_| RecvTimeoutError::Disconnected)?;
        event_rx.recv_timeout(timeout)
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            matcher_error!("Engine worker has stopped; command dropped");
        }
    }
}

/// Sends a fallback event when dropped without [`CompletionGuard::complete`],
/// e.g. when the request task panics or the runtime shuts down mid-request.
struct CompletionGuard {
    event_tx: mpsc::Sender<EngineEvent>,
    fallback: Option<EngineEvent>,
}

impl CompletionGuard {
    fn new(event_tx: mpsc::Sender<EngineEvent>, fallback: EngineEvent) -> Self {
        Self {
            event_tx,
            fallback: Some(fallback),
        }
    }

    fn complete(mut self, event: EngineEvent) {
        self.fallback = None;
        let _ = self.event_tx.send(event);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(event) = self.fallback.take() {
            matcher_warn!("Request ended without an outcome; reporting it as aborted");
            let _ = self.event_tx.send(event);
        }
    }
}

fn aborted() -> BackendError {
    BackendError::new(FailureKind::Aborted, "request aborted before completion")
}

async fn handle_command(
    backend: &dyn Backend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::ListResumes { request_id } => {
            let guard = CompletionGuard::new(
                event_tx,
                EngineEvent::CatalogFetched {
                    request_id,
                    result: Err(aborted()),
                },
            );
            let result = backend.list_resumes().await;
            guard.complete(EngineEvent::CatalogFetched { request_id, result });
        }
        EngineCommand::Upload { request_id, path } => {
            let guard = CompletionGuard::new(
                event_tx,
                EngineEvent::UploadCompleted {
                    request_id,
                    result: Err(aborted()),
                },
            );
            let result = match read_upload(&path).await {
                Ok((file_name, bytes)) => backend.upload_resume(&file_name, bytes).await,
                Err(err) => Err(err),
            };
            guard.complete(EngineEvent::UploadCompleted { request_id, result });
        }
        EngineCommand::Analyze {
            request_id,
            jd_text,
            resume_filename,
        } => {
            let guard = CompletionGuard::new(
                event_tx,
                EngineEvent::AnalysisCompleted {
                    request_id,
                    result: Err(aborted()),
                },
            );
            let result = backend.analyze(&jd_text, &resume_filename).await;
            guard.complete(EngineEvent::AnalysisCompleted { request_id, result });
        }
        EngineCommand::WriteReport { path, html } => {
            let guard = CompletionGuard::new(
                event_tx,
                EngineEvent::ReportWritten {
                    result: Err(aborted().message),
                },
            );
            let result = tokio::task::spawn_blocking(move || write_atomically(&path, &html))
                .await
                .map_err(|err| err.to_string())
                .and_then(|written| written.map_err(|err| err.to_string()));
            guard.complete(EngineEvent::ReportWritten { result });
        }
    }
}

async fn read_upload(path: &Path) -> Result<(String, Vec<u8>), BackendError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            BackendError::new(
                FailureKind::LocalFile,
                format!("{} is not a file", path.display()),
            )
        })?;
    let bytes = tokio::fs::read(path).await.map_err(|err| {
        BackendError::new(
            FailureKind::LocalFile,
            format!("could not read {}: {err}", path.display()),
        )
    })?;
    Ok((file_name, bytes))
}
