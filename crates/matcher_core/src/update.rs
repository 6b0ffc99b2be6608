use matcher_logging::{matcher_debug, matcher_info, matcher_warn};

use crate::view_model::{PromptKind, StatusTone};
use crate::{render_result, report_document, AnalysisRequest, AppState, Effect, Msg, UiPhase};

pub(crate) const SELECT_CANDIDATE_PROMPT: &str = "Please select a Candidate from the dropdown.";
pub(crate) const PASTE_JD_PROMPT: &str = "Please paste a Job Description.";
pub(crate) const SELECT_FILE_PROMPT: &str = "Please select a file first.";
pub(crate) const UPLOAD_BUSY_PROMPT: &str = "An upload is already in progress.";
pub(crate) const NOTHING_TO_SAVE_PROMPT: &str = "Nothing to save yet.";

const UPLOADING_STATUS: &str = "Uploading & Ingesting...";
const UPLOADED_STATUS: &str = "Success! Resume added.";
const UPLOAD_FAILED: &str = "Upload failed";
const ANALYSIS_FAILED: &str = "Analysis request failed";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    // An open prompt is modal for user input; engine completions still land.
    if msg.is_user_action() && state.has_prompt() {
        matcher_debug!("Ignoring {:?} while a prompt is open", msg);
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Started | Msg::ReloadCatalogClicked => {
            let request_id = state.begin_catalog_load();
            vec![Effect::LoadCatalog { request_id }]
        }
        Msg::CatalogLoaded { request_id, result } => {
            if !state.is_current_catalog_load(request_id) {
                matcher_debug!("Dropping superseded catalog load {}", request_id);
                return (state, Vec::new());
            }
            match &result {
                Ok(ids) => matcher_info!("Catalog loaded with {} resumes", ids.len()),
                Err(message) => matcher_warn!("Catalog load failed: {}", message),
            }
            if let Some(resume_id) = state.finish_catalog_load(request_id, result) {
                matcher_info!("Auto-selected uploaded resume {}", resume_id);
            }
            Vec::new()
        }
        Msg::ResumeSelected(resume_id) => {
            if !state.select(&resume_id) {
                state.open_prompt(
                    PromptKind::Validation,
                    format!("No candidate named \"{resume_id}\" in the list."),
                );
            }
            Vec::new()
        }
        Msg::JobDescriptionChanged(text) => {
            state.set_job_description(text);
            Vec::new()
        }
        Msg::UploadFileChosen(path) => {
            state.set_upload_file(path);
            Vec::new()
        }
        Msg::UploadClicked => {
            let Some(path) = state.upload_file().map(ToOwned::to_owned) else {
                state.open_prompt(PromptKind::Validation, SELECT_FILE_PROMPT);
                return (state, Vec::new());
            };
            if state.upload_in_flight() {
                state.open_prompt(PromptKind::Validation, UPLOAD_BUSY_PROMPT);
                return (state, Vec::new());
            }
            let request_id = state.begin_upload();
            state.set_status(StatusTone::Info, UPLOADING_STATUS);
            vec![Effect::UploadResume { request_id, path }]
        }
        Msg::UploadFinished { request_id, result } => {
            if !state.finish_upload(request_id) {
                return (state, Vec::new());
            }
            match result {
                Ok(stored_id) => {
                    state.set_upload_file(None);
                    state.set_phase(UiPhase::UploadSuccess);
                    state.set_status(StatusTone::Success, UPLOADED_STATUS);
                    let reload_id = state.begin_catalog_load();
                    match stored_id {
                        Some(resume_id) => state.defer_select(reload_id, resume_id),
                        None => matcher_warn!("Upload succeeded without a stored filename"),
                    }
                    vec![Effect::LoadCatalog {
                        request_id: reload_id,
                    }]
                }
                Err(message) => {
                    state.set_phase(UiPhase::UploadError);
                    state.set_status(
                        StatusTone::Error,
                        format!("Error: {}", or_generic(&message, UPLOAD_FAILED)),
                    );
                    Vec::new()
                }
            }
        }
        Msg::AnalyzeClicked => {
            if state.analysis_in_flight() {
                matcher_info!("Analyze ignored: a request is already in flight");
                return (state, Vec::new());
            }
            let Some(resume_id) = state.selection().map(ToOwned::to_owned) else {
                state.open_prompt(PromptKind::Validation, SELECT_CANDIDATE_PROMPT);
                return (state, Vec::new());
            };
            if state.job_description().trim().is_empty() {
                state.open_prompt(PromptKind::Validation, PASTE_JD_PROMPT);
                return (state, Vec::new());
            }
            let request = AnalysisRequest {
                job_description: state.job_description().to_string(),
                resume_id,
            };
            let request_id = state.begin_analysis();
            vec![Effect::Analyze {
                request_id,
                request,
            }]
        }
        Msg::AnalysisFinished { request_id, result } => {
            if !state.finish_analysis(request_id) {
                matcher_debug!("Dropping stale analysis result {}", request_id);
                return (state, Vec::new());
            }
            match result {
                Ok(analysis) => {
                    state.show_results(render_result(&analysis));
                    state.set_phase(UiPhase::AnalysisRendered);
                }
                Err(message) => {
                    matcher_warn!("Analysis failed: {}", message);
                    state.set_phase(UiPhase::AnalysisError);
                    state.open_prompt(
                        PromptKind::Alert,
                        format!("Analysis Failed: {}", or_generic(&message, ANALYSIS_FAILED)),
                    );
                }
            }
            Vec::new()
        }
        Msg::SaveReportClicked(path) => {
            let Some(fragments) = state.rendered_results() else {
                state.open_prompt(PromptKind::Validation, NOTHING_TO_SAVE_PROMPT);
                return (state, Vec::new());
            };
            let html = report_document(fragments);
            state.set_status(
                StatusTone::Info,
                format!("Saving report to {}...", path.display()),
            );
            vec![Effect::WriteReport { path, html }]
        }
        Msg::ReportSaved { result } => {
            match result {
                Ok(path) => state.set_status(
                    StatusTone::Success,
                    format!("Report saved to {}", path.display()),
                ),
                Err(message) => state.set_status(
                    StatusTone::Error,
                    format!("Error: could not save report: {message}"),
                ),
            }
            Vec::new()
        }
        Msg::PromptDismissed => {
            state.dismiss_prompt();
            Vec::new()
        }
    };

    (state, effects)
}

fn or_generic<'a>(message: &'a str, generic: &'a str) -> &'a str {
    if message.trim().is_empty() {
        generic
    } else {
        message
    }
}
