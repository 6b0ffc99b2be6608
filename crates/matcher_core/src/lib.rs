//! Resume matcher core: pure state machine, result rendering and view-model helpers.
mod analysis;
mod effect;
mod markup;
mod msg;
mod render;
mod state;
mod surface;
mod update;
mod view_model;

pub use analysis::{AnalysisResult, InterviewQuestion};
pub use effect::{AnalysisRequest, Effect};
pub use markup::report_document;
pub use msg::Msg;
pub use render::{
    render_result, score_percent, QuestionList, ResultFragments, ScoreBadge, ScoreTier, Tag,
    TagCategory, TagList, NONE_DETECTED, NO_QUESTIONS, NO_SUMMARY, UNKNOWN_CANDIDATE,
};
pub use state::{AppState, RequestId, UiPhase};
pub use surface::{present, UiSurface};
pub use update::update;
pub use view_model::{
    AppViewModel, CatalogOption, CatalogView, Prompt, PromptKind, ResultsPanel, StatusLine,
    StatusTone,
};
