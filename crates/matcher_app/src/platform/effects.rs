use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use matcher_core::{AnalysisResult, Effect, InterviewQuestion, Msg};
use matcher_engine::{AnalysisPayload, EngineEvent, EngineHandle};
use matcher_logging::{matcher_info, matcher_warn};

use super::app::AppEvent;

const EVENT_POLL: Duration = Duration::from_millis(250);

pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, events: mpsc::Sender<AppEvent>) -> Self {
        let runner = Self {
            engine: Arc::new(engine),
        };
        runner.spawn_event_loop(events);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadCatalog { request_id } => {
                    matcher_info!("LoadCatalog request_id={}", request_id);
                    self.engine.list_resumes(request_id);
                }
                Effect::UploadResume { request_id, path } => {
                    matcher_info!("UploadResume request_id={} path={:?}", request_id, path);
                    self.engine.upload(request_id, path);
                }
                Effect::Analyze {
                    request_id,
                    request,
                } => {
                    matcher_info!(
                        "Analyze request_id={} resume={} jd_len={}",
                        request_id,
                        request.resume_id,
                        request.job_description.len()
                    );
                    self.engine
                        .analyze(request_id, request.job_description, request.resume_id);
                }
                Effect::WriteReport { path, html } => {
                    matcher_info!("WriteReport path={:?} bytes={}", path, html.len());
                    self.engine.write_report(path, html);
                }
            }
        }
    }

    fn spawn_event_loop(&self, events: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || forward_events(|| engine.next_event(EVENT_POLL), &events));
    }
}

/// Pumps engine events into the app channel until either side goes away.
fn forward_events<F>(mut next_event: F, events: &mpsc::Sender<AppEvent>)
where
    F: FnMut() -> Result<EngineEvent, RecvTimeoutError>,
{
    loop {
        match next_event() {
            Ok(event) => {
                if events.send(AppEvent::Core(map_event(event))).is_err() {
                    return;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                matcher_warn!("Engine event channel closed; no more results will arrive");
                return;
            }
        }
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::CatalogFetched { request_id, result } => Msg::CatalogLoaded {
            request_id,
            result: result.map_err(|err| {
                matcher_warn!("Catalog request {} failed ({}): {}", request_id, err.kind, err);
                err.to_string()
            }),
        },
        EngineEvent::UploadCompleted { request_id, result } => Msg::UploadFinished {
            request_id,
            result: result.map_err(|err| {
                matcher_warn!("Upload request {} failed ({}): {}", request_id, err.kind, err);
                err.to_string()
            }),
        },
        EngineEvent::AnalysisCompleted { request_id, result } => Msg::AnalysisFinished {
            request_id,
            result: result.map(payload_to_result).map_err(|err| {
                matcher_warn!("Analysis request {} failed ({}): {}", request_id, err.kind, err);
                err.to_string()
            }),
        },
        EngineEvent::ReportWritten { result } => Msg::ReportSaved { result },
    }
}

/// Missing sequences become empty and a missing score counts as zero.
fn payload_to_result(payload: AnalysisPayload) -> AnalysisResult {
    AnalysisResult {
        match_score: payload.match_score.unwrap_or(0.0),
        candidate_name: payload.candidate_name,
        summary: payload.summary,
        key_matches: payload.key_matches.unwrap_or_default(),
        missing_skills: payload.missing_skills.unwrap_or_default(),
        interview_questions: payload
            .interview_questions
            .unwrap_or_default()
            .into_iter()
            .map(|item| InterviewQuestion {
                question: item.question.unwrap_or_default(),
                rationale: item.rationale.unwrap_or_default(),
            })
            .collect(),
    }
}
