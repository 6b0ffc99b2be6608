use crate::{ResultFragments, UiPhase};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOption {
    /// Empty for placeholder options.
    pub value: String,
    pub label: String,
    pub selectable: bool,
}

impl CatalogOption {
    pub(crate) fn placeholder(label: &str) -> Self {
        Self {
            value: String::new(),
            label: label.to_string(),
            selectable: false,
        }
    }

    pub(crate) fn resume(id: &str) -> Self {
        Self {
            value: id.to_string(),
            label: id.to_string(),
            selectable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogView {
    pub options: Vec<CatalogOption>,
    /// `None` means the leading placeholder is shown as chosen.
    pub selected: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub tone: StatusTone,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Missing input, raised before any request.
    Validation,
    /// A failed analysis.
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub text: String,
}

/// The welcome view and the results view are never shown together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsPanel {
    #[default]
    Welcome,
    Results(ResultFragments),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: UiPhase,
    pub catalog: CatalogView,
    pub upload_file: Option<String>,
    pub uploading: bool,
    /// Upload and report status region.
    pub status: Option<StatusLine>,
    /// Analyze trigger disabled and busy indicator visible.
    pub analyze_busy: bool,
    pub results: ResultsPanel,
    pub prompt: Option<Prompt>,
    pub dirty: bool,
}
