use serde::{Deserialize, Serialize};

use crate::domain::{DocumentId, SurveyAnswer};

/// Fixed backend endpoint paths, relative to the configured base URL.
pub const LOOKUP_PATH: &str = "/.netlify/functions/recuperarRecuperacion";
pub const SUBMIT_PATH: &str = "/.netlify/functions/enviarEncuesta";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupRequest {
    pub id: String,
}

impl LookupRequest {
    pub fn new(document: &DocumentId) -> Self {
        Self {
            id: document.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse {
    /// Recommendation text for the document; missing or empty means the
    /// document was found but carries no recommendation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recomendacion: Option<String>,
}

/// A completed survey ready for transmission. The comment is expected to
/// be trimmed by the caller; the document id is already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveySubmission {
    pub document: DocumentId,
    pub answer: SurveyAnswer,
    pub comment: String,
}

/// Submit payload: a fixed-order triple, not a keyed object. The answer
/// travels as its decimal index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub values: [String; 3],
}

impl SubmitRequest {
    pub fn from_submission(submission: &SurveySubmission) -> Self {
        Self {
            values: [
                submission.document.as_str().to_string(),
                submission.answer.index().to_string(),
                submission.comment.clone(),
            ],
        }
    }
}
