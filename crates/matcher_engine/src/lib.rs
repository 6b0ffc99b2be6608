//! Resume matcher engine: backend HTTP client and effect execution.
mod backend;
mod engine;
mod persist;
mod types;

pub use backend::{rejection_message, Backend, BackendSettings, ReqwestBackend};
pub use engine::EngineHandle;
pub use persist::{ensure_output_dir, write_atomically, PersistError};
pub use types::{
    AnalysisPayload, AnalyzeBody, BackendError, EngineEvent, FailureKind, QuestionPayload,
    RequestId, ResumeListing, UploadAck,
};
