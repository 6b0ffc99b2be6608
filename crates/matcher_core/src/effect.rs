use std::path::PathBuf;

use crate::RequestId;

/// I/O requested by [`crate::update`]; executed outside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadCatalog {
        request_id: RequestId,
    },
    UploadResume {
        request_id: RequestId,
        path: PathBuf,
    },
    Analyze {
        request_id: RequestId,
        request: AnalysisRequest,
    },
    WriteReport {
        path: PathBuf,
        html: String,
    },
}

/// Both fields are non-empty by construction: `update` validates before emitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub job_description: String,
    pub resume_id: String,
}
