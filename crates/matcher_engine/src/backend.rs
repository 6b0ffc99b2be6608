use std::time::Duration;

use matcher_logging::{matcher_debug, matcher_info};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{AnalysisPayload, AnalyzeBody, BackendError, FailureKind, ResumeListing, UploadAck};

const RESUMES_PATH: &str = "api/resumes";
const UPLOAD_PATH: &str = "api/upload";
const ANALYZE_PATH: &str = "api/analyze";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// `None` lets a slow request run until the server answers.
    pub request_timeout: Option<Duration>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn list_resumes(&self) -> Result<Vec<String>, BackendError>;

    async fn upload_resume(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<String>, BackendError>;

    async fn analyze(
        &self,
        jd_text: &str,
        resume_filename: &str,
    ) -> Result<AnalysisPayload, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    base_url: reqwest::Url,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        // A trailing slash keeps `join` from replacing the last path segment.
        let base = format!("{}/", settings.base_url.trim_end_matches('/'));
        let base_url = reqwest::Url::parse(&base)
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { base_url, client })
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn list_resumes(&self) -> Result<Vec<String>, BackendError> {
        let response = self
            .client
            .get(self.endpoint(RESUMES_PATH)?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let listing: ResumeListing = decode(read_json(response).await?)?;
        Ok(listing.resumes.unwrap_or_default())
    }

    async fn upload_resume(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<String>, BackendError> {
        matcher_info!("Uploading {} ({} bytes)", file_name, bytes.len());
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        let response = self
            .client
            .post(self.endpoint(UPLOAD_PATH)?)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let ack: UploadAck = decode(read_json(response).await?)?;
        Ok(ack.filename)
    }

    async fn analyze(
        &self,
        jd_text: &str,
        resume_filename: &str,
    ) -> Result<AnalysisPayload, BackendError> {
        matcher_info!(
            "Requesting analysis resume={} jd_len={}",
            resume_filename,
            jd_text.len()
        );
        let response = self
            .client
            .post(self.endpoint(ANALYZE_PATH)?)
            .json(&AnalyzeBody {
                jd_text,
                resume_filename,
            })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode(read_json(response).await?)
    }
}

/// Reads a response body as JSON.
///
/// An `error` field wins over the status code, so a 200 carrying an error and
/// a 4xx/5xx carrying one report the same server message. Without one, any
/// non-success status is a failure.
async fn read_json(response: reqwest::Response) -> Result<Value, BackendError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    let parsed = serde_json::from_slice::<Value>(&body);

    if let Ok(value) = &parsed {
        if let Some(message) = rejection_message(value) {
            matcher_debug!("Server rejected request ({}): {}", status, message);
            return Err(BackendError::new(FailureKind::Rejected, message));
        }
    }
    if !status.is_success() {
        return Err(BackendError::new(
            FailureKind::HttpStatus(status.as_u16()),
            format!("server returned {status}"),
        ));
    }
    parsed.map_err(|err| BackendError::new(FailureKind::Decode, format!("invalid response: {err}")))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, BackendError> {
    serde_json::from_value(value)
        .map_err(|err| BackendError::new(FailureKind::Decode, format!("invalid response: {err}")))
}

/// Mirrors a truthiness check: `null`, `false` and `""` are not errors.
pub fn rejection_message(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    BackendError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::rejection_message;

    #[test]
    fn error_field_truthiness() {
        assert_eq!(
            rejection_message(&json!({"error": "rate limited"})),
            Some("rate limited".to_string())
        );
        assert_eq!(
            rejection_message(&json!({"error": {"code": 7}})),
            Some(r#"{"code":7}"#.to_string())
        );
        assert_eq!(rejection_message(&json!({"error": ""})), None);
        assert_eq!(rejection_message(&json!({"error": null})), None);
        assert_eq!(rejection_message(&json!({"error": false})), None);
        assert_eq!(rejection_message(&json!({"match_score": 10})), None);
        assert_eq!(rejection_message(&json!(["error"])), None);
    }
}
