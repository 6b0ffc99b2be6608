use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    CatalogFetched {
        request_id: RequestId,
        result: Result<Vec<String>, BackendError>,
    },
    UploadCompleted {
        request_id: RequestId,
        /// Identifier the server stored the file under, when it reports one.
        result: Result<Option<String>, BackendError>,
    },
    AnalysisCompleted {
        request_id: RequestId,
        result: Result<AnalysisPayload, BackendError>,
    },
    ReportWritten {
        result: Result<PathBuf, String>,
    },
}

/// `GET /api/resumes` response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ResumeListing {
    #[serde(default)]
    pub resumes: Option<Vec<String>>,
}

/// `POST /api/upload` success response; extra fields such as `message` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UploadAck {
    #[serde(default)]
    pub filename: Option<String>,
}

/// `POST /api/analyze` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzeBody<'a> {
    pub jd_text: &'a str,
    pub resume_filename: &'a str,
}

/// `POST /api/analyze` response. Every field is optional on the wire; `null`
/// and absent are treated alike.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AnalysisPayload {
    #[serde(default)]
    pub match_score: Option<f64>,
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub key_matches: Option<Vec<String>>,
    #[serde(default)]
    pub missing_skills: Option<Vec<String>>,
    #[serde(default)]
    pub interview_questions: Option<Vec<QuestionPayload>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct QuestionPayload {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub rationale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    pub kind: FailureKind,
    pub message: String,
}

impl BackendError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    /// Body was not the JSON shape the endpoint promises.
    Decode,
    /// Server answered with an `error` field.
    Rejected,
    LocalFile,
    /// The request task ended without reporting an outcome.
    Aborted,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "invalid response"),
            FailureKind::Rejected => write!(f, "rejected by server"),
            FailureKind::LocalFile => write!(f, "local file error"),
            FailureKind::Aborted => write!(f, "aborted"),
        }
    }
}
