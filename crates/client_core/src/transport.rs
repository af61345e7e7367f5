//! Transport seam for the two backend endpoints: lookup and submit.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use shared::{
    domain::DocumentId,
    error::ErrorBody,
    protocol::{
        LookupRequest, LookupResponse, SubmitRequest, SurveySubmission, LOOKUP_PATH, SUBMIT_PATH,
    },
};

#[derive(Debug, Error)]
pub enum TransportError {
    /// Non-2xx response whose body carried an `error` field; the message
    /// is shown to the user verbatim.
    #[error("{message}")]
    Backend { message: String },
    /// Non-2xx response without a usable error body.
    #[error("backend returned status {status}")]
    Status { status: u16 },
    /// Connection-level failure before any backend answer.
    #[error("request failed: {message}")]
    Network { message: String },
}

impl TransportError {
    /// The backend-provided message, when the backend supplied one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            TransportError::Backend { message } => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Network {
            message: err.to_string(),
        }
    }
}

/// The two remote calls the flow controller can issue. Implemented over
/// HTTP in production and by programmable fakes in tests.
#[async_trait]
pub trait SurveyTransport: Send + Sync {
    /// Fetches the recommendation for a document. `Ok(None)` means the
    /// lookup succeeded but the backend sent no recommendation text.
    async fn lookup(&self, document: &DocumentId) -> Result<Option<String>, TransportError>;

    /// Sends a completed survey. The 2xx response body is ignored.
    async fn submit(&self, submission: &SurveySubmission) -> Result<(), TransportError>;
}

/// HTTP implementation against the fixed endpoint paths under a
/// configured base URL. No request timeout is set; the flow guards keep
/// a hung request from being re-triggered.
pub struct HttpSurveyBackend {
    http: Client,
    base_url: String,
}

impl HttpSurveyBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn rejection(response: reqwest::Response) -> TransportError {
        let status = response.status().as_u16();
        let body: Option<ErrorBody> = response.json().await.ok();
        match body.and_then(|body| body.error) {
            Some(message) => TransportError::Backend { message },
            None => TransportError::Status { status },
        }
    }
}

#[async_trait]
impl SurveyTransport for HttpSurveyBackend {
    async fn lookup(&self, document: &DocumentId) -> Result<Option<String>, TransportError> {
        let response = self
            .http
            .post(self.endpoint(LOOKUP_PATH))
            .json(&LookupRequest::new(document))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let body: LookupResponse = response.json().await?;
        Ok(body.recomendacion)
    }

    async fn submit(&self, submission: &SurveySubmission) -> Result<(), TransportError> {
        let response = self
            .http
            .post(self.endpoint(SUBMIT_PATH))
            .json(&SubmitRequest::from_submission(submission))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
