use std::path::{Path, PathBuf};

use crate::view_model::{
    AppViewModel, CatalogOption, CatalogView, Prompt, PromptKind, ResultsPanel, StatusLine,
    StatusTone,
};
use crate::ResultFragments;

pub type RequestId = u64;

pub(crate) const CATALOG_LOADING: &str = "Loading candidates...";
pub(crate) const CATALOG_CHOOSE: &str = "Select a Candidate...";
pub(crate) const CATALOG_EMPTY: &str = "No resumes found. Upload one!";
pub(crate) const CATALOG_ERROR: &str = "Error loading list";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiPhase {
    #[default]
    Idle,
    LoadingCatalog,
    CatalogError,
    Uploading,
    UploadSuccess,
    UploadError,
    Analyzing,
    AnalysisError,
    AnalysisRendered,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum CatalogState {
    #[default]
    NotLoaded,
    Loaded(Vec<String>),
    Failed,
}

/// Auto-select owed to a finished upload, honoured by the first catalog load
/// issued at or after `after`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingSelect {
    after: RequestId,
    resume_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    phase: UiPhase,
    catalog: CatalogState,
    selection: Option<String>,
    job_description: String,
    upload_file: Option<PathBuf>,
    status: Option<StatusLine>,
    results: ResultsPanel,
    prompt: Option<Prompt>,
    last_request_id: RequestId,
    catalog_request: Option<RequestId>,
    upload_request: Option<RequestId>,
    analysis_request: Option<RequestId>,
    pending_select: Option<PendingSelect>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            catalog: self.catalog_view(),
            upload_file: self
                .upload_file
                .as_ref()
                .map(|path| path.display().to_string()),
            uploading: self.upload_request.is_some(),
            status: self.status.clone(),
            analyze_busy: self.analysis_request.is_some(),
            results: self.results.clone(),
            prompt: self.prompt.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn phase(&self) -> UiPhase {
        self.phase
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Identifiers of the current catalog, in server order.
    pub fn catalog_ids(&self) -> &[String] {
        match &self.catalog {
            CatalogState::Loaded(ids) => ids,
            CatalogState::NotLoaded | CatalogState::Failed => &[],
        }
    }

    pub fn rendered_results(&self) -> Option<&ResultFragments> {
        match &self.results {
            ResultsPanel::Results(fragments) => Some(fragments),
            ResultsPanel::Welcome => None,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn next_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }

    pub(crate) fn set_phase(&mut self, phase: UiPhase) {
        self.phase = phase;
        self.mark_dirty();
    }

    pub fn has_prompt(&self) -> bool {
        self.prompt.is_some()
    }

    pub(crate) fn open_prompt(&mut self, kind: PromptKind, text: impl Into<String>) {
        self.prompt = Some(Prompt {
            kind,
            text: text.into(),
        });
        self.mark_dirty();
    }

    pub(crate) fn dismiss_prompt(&mut self) -> bool {
        let had_prompt = self.prompt.take().is_some();
        if had_prompt {
            self.mark_dirty();
        }
        had_prompt
    }

    pub(crate) fn set_status(&mut self, tone: StatusTone, text: impl Into<String>) {
        self.status = Some(StatusLine {
            tone,
            text: text.into(),
        });
        self.mark_dirty();
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub(crate) fn set_job_description(&mut self, text: String) {
        if self.job_description != text {
            self.job_description = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn upload_file(&self) -> Option<&Path> {
        self.upload_file.as_deref()
    }

    pub(crate) fn set_upload_file(&mut self, path: Option<PathBuf>) {
        if self.upload_file != path {
            self.upload_file = path;
            self.mark_dirty();
        }
    }

    pub(crate) fn select(&mut self, resume_id: &str) -> bool {
        if !self.catalog_ids().iter().any(|id| id == resume_id) {
            return false;
        }
        if self.selection.as_deref() != Some(resume_id) {
            self.selection = Some(resume_id.to_string());
            self.mark_dirty();
        }
        true
    }

    // --- catalog flow ---

    pub(crate) fn begin_catalog_load(&mut self) -> RequestId {
        let request_id = self.next_request_id();
        self.catalog_request = Some(request_id);
        // A retry after a failure shows the loading placeholder again.
        if matches!(self.catalog, CatalogState::NotLoaded | CatalogState::Failed) {
            self.catalog = CatalogState::NotLoaded;
            self.phase = UiPhase::LoadingCatalog;
        }
        self.mark_dirty();
        request_id
    }

    pub(crate) fn is_current_catalog_load(&self, request_id: RequestId) -> bool {
        self.catalog_request == Some(request_id)
    }

    /// Replaces the catalog wholesale, then settles the selection: a pending
    /// auto-select wins if its identifier is present, otherwise the previous
    /// selection survives only if it is still listed.
    pub(crate) fn finish_catalog_load(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<String>, String>,
    ) -> Option<String> {
        self.catalog_request = None;
        let due = matches!(&self.pending_select, Some(pending) if request_id >= pending.after);
        let pending = if due {
            self.pending_select.take()
        } else {
            None
        };

        match result {
            Ok(ids) => {
                self.catalog = CatalogState::Loaded(ids);
                if self.phase == UiPhase::LoadingCatalog || self.phase == UiPhase::CatalogError {
                    self.phase = UiPhase::Idle;
                }
            }
            Err(_) => {
                self.catalog = CatalogState::Failed;
                self.phase = UiPhase::CatalogError;
            }
        }

        let previous = self.selection.take();
        let ids = self.catalog_ids();
        let auto_selected = pending
            .map(|p| p.resume_id)
            .filter(|id| ids.contains(id));
        let kept = previous.filter(|id| ids.contains(id));
        self.selection = auto_selected.clone().or(kept);
        self.mark_dirty();
        auto_selected
    }

    fn catalog_view(&self) -> CatalogView {
        let options = match &self.catalog {
            CatalogState::NotLoaded => vec![CatalogOption::placeholder(CATALOG_LOADING)],
            CatalogState::Failed => vec![CatalogOption::placeholder(CATALOG_ERROR)],
            CatalogState::Loaded(ids) if ids.is_empty() => {
                vec![CatalogOption::placeholder(CATALOG_EMPTY)]
            }
            CatalogState::Loaded(ids) => std::iter::once(CatalogOption::placeholder(CATALOG_CHOOSE))
                .chain(ids.iter().map(|id| CatalogOption::resume(id)))
                .collect(),
        };
        CatalogView {
            options,
            selected: self.selection.clone(),
        }
    }

    // --- upload flow ---

    pub(crate) fn upload_in_flight(&self) -> bool {
        self.upload_request.is_some()
    }

    pub(crate) fn begin_upload(&mut self) -> RequestId {
        let request_id = self.next_request_id();
        self.upload_request = Some(request_id);
        self.phase = UiPhase::Uploading;
        self.mark_dirty();
        request_id
    }

    /// Clears the in-flight marker if `request_id` is the current upload.
    pub(crate) fn finish_upload(&mut self, request_id: RequestId) -> bool {
        if self.upload_request != Some(request_id) {
            return false;
        }
        self.upload_request = None;
        self.mark_dirty();
        true
    }

    pub(crate) fn defer_select(&mut self, after: RequestId, resume_id: String) {
        self.pending_select = Some(PendingSelect { after, resume_id });
    }

    // --- analysis flow ---

    pub(crate) fn analysis_in_flight(&self) -> bool {
        self.analysis_request.is_some()
    }

    pub(crate) fn begin_analysis(&mut self) -> RequestId {
        let request_id = self.next_request_id();
        self.analysis_request = Some(request_id);
        self.phase = UiPhase::Analyzing;
        self.mark_dirty();
        request_id
    }

    /// Re-enables the trigger and hides the busy indicator if `request_id`
    /// is the current analysis.
    pub(crate) fn finish_analysis(&mut self, request_id: RequestId) -> bool {
        if self.analysis_request != Some(request_id) {
            return false;
        }
        self.analysis_request = None;
        self.mark_dirty();
        true
    }

    pub(crate) fn show_results(&mut self, fragments: ResultFragments) {
        self.results = ResultsPanel::Results(fragments);
        self.mark_dirty();
    }
}
