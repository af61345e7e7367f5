use serde::{Deserialize, Serialize};

/// Body shape the backend uses for non-2xx responses. The `error` field
/// is optional; when present it is shown to the user verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }
}
