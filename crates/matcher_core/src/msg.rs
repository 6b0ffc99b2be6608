use std::path::PathBuf;

use crate::{AnalysisResult, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Session start; kicks off the first catalog load.
    Started,
    /// User asked for the résumé list to be fetched again.
    ReloadCatalogClicked,
    /// Engine finished a catalog load.
    CatalogLoaded {
        request_id: RequestId,
        result: Result<Vec<String>, String>,
    },
    /// User picked a résumé from the catalog.
    ResumeSelected(String),
    /// User edited the job description (full replacement text).
    JobDescriptionChanged(String),
    /// User chose (or cleared) the file to upload.
    UploadFileChosen(Option<PathBuf>),
    /// User clicked Upload.
    UploadClicked,
    /// Engine finished an upload; `Ok` carries the stored identifier, if reported.
    UploadFinished {
        request_id: RequestId,
        result: Result<Option<String>, String>,
    },
    /// User clicked Analyze.
    AnalyzeClicked,
    /// Engine finished an analysis request.
    AnalysisFinished {
        request_id: RequestId,
        result: Result<AnalysisResult, String>,
    },
    /// User asked to save the rendered results as an HTML report.
    SaveReportClicked(PathBuf),
    /// Engine finished writing a report.
    ReportSaved { result: Result<PathBuf, String> },
    /// User acknowledged the open prompt.
    PromptDismissed,
}

impl Msg {
    /// Messages that originate from user input and are blocked by an open prompt.
    pub fn is_user_action(&self) -> bool {
        matches!(
            self,
            Msg::ReloadCatalogClicked
                | Msg::ResumeSelected(_)
                | Msg::JobDescriptionChanged(_)
                | Msg::UploadFileChosen(_)
                | Msg::UploadClicked
                | Msg::AnalyzeClicked
                | Msg::SaveReportClicked(_)
        )
    }
}
