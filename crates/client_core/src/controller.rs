//! The survey flow state machine: lookup, optional survey submission,
//! confirmation view, reset. All user-visible wording lives here so the
//! front-end and the tests share one source of truth.

use std::sync::Arc;

use shared::domain::{DocumentId, SurveyAnswer};
use shared::protocol::SurveySubmission;
use tracing::{debug, warn};

use crate::navigation::{Navigator, BASE_PATH, SUBMITTED_PATH};
use crate::transport::{SurveyTransport, TransportError};

/// Hard input cap for the free-text comment, in characters.
pub const COMMENT_MAX_CHARS: usize = 200;

pub const MSG_INVALID_DOCUMENT: &str = "El documento debe contener solo dígitos (máximo 20).";
pub const MSG_NO_RECOMMENDATION: &str = "Sin recomendación";
pub const MSG_LOOKUP_FAILED: &str = "No se pudo consultar la recomendación";
pub const MSG_SELECT_ANSWER: &str = "Selecciona una respuesta antes de enviar.";
pub const MSG_SUBMIT_FAILED: &str = "No se pudo enviar la encuesta";
pub const MSG_SUBMIT_OK: &str = "Encuesta enviada correctamente.";

/// Explicit flow state. One enum instead of a set of loading/success
/// booleans, so invalid combinations (submitting before a successful
/// lookup, overlapping requests) cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Querying,
    QueryFailed,
    SurveyVisible,
    Submitting,
    Submitted,
}

impl FlowState {
    /// Lookup can be (re)triggered from the initial state or after a
    /// failed attempt. After a success the trigger stays disabled until
    /// an explicit reset.
    pub fn lookup_allowed(self) -> bool {
        matches!(self, FlowState::Idle | FlowState::QueryFailed)
    }

    /// Whether the survey step is revealed. It stays visible after a
    /// submission so backing out of the confirmation view shows the
    /// filled form again.
    pub fn survey_visible(self) -> bool {
        matches!(
            self,
            FlowState::SurveyVisible | FlowState::Submitting | FlowState::Submitted
        )
    }

    pub fn is_busy(self) -> bool {
        matches!(self, FlowState::Querying | FlowState::Submitting)
    }
}

/// Which screen is shown. Decoupled from [`FlowState`]: history
/// navigation flips the view without touching the flow fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Form,
    SubmissionComplete,
}

impl ViewState {
    pub fn from_path(path: &str) -> Self {
        if path == SUBMITTED_PATH {
            ViewState::SubmissionComplete
        } else {
            ViewState::Form
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            ViewState::Form => BASE_PATH,
            ViewState::SubmissionComplete => SUBMITTED_PATH,
        }
    }
}

/// Read-only copy of the controller state handed to the rendering side
/// after every command.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSnapshot {
    pub state: FlowState,
    pub view: ViewState,
    pub document_input: String,
    pub recommendation: Option<String>,
    pub error: Option<String>,
    pub survey_notice: Option<String>,
    pub selected_answer: Option<SurveyAnswer>,
    pub comment: String,
}

impl FlowSnapshot {
    /// State shown before the backend worker has reported anything.
    pub fn initial() -> Self {
        Self {
            state: FlowState::Idle,
            view: ViewState::Form,
            document_input: String::new(),
            recommendation: None,
            error: None,
            survey_notice: None,
            selected_answer: None,
            comment: String::new(),
        }
    }
}

/// Drives the two-step interaction: lookup, then optional survey
/// submission, with a routed confirmation view and a full reset.
pub struct SurveyFlowController {
    transport: Arc<dyn SurveyTransport>,
    navigator: Arc<dyn Navigator>,
    state: FlowState,
    view: ViewState,
    document_input: String,
    document: Option<DocumentId>,
    recommendation: Option<String>,
    error: Option<String>,
    survey_notice: Option<String>,
    selected_answer: Option<SurveyAnswer>,
    comment: String,
}

impl SurveyFlowController {
    /// The initial view honors the navigator's current path, so a direct
    /// link to the confirmation path opens on that view.
    pub fn new(transport: Arc<dyn SurveyTransport>, navigator: Arc<dyn Navigator>) -> Self {
        let view = ViewState::from_path(&navigator.current_path());
        Self {
            transport,
            navigator,
            state: FlowState::Idle,
            view,
            document_input: String::new(),
            document: None,
            recommendation: None,
            error: None,
            survey_notice: None,
            selected_answer: None,
            comment: String::new(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Stores raw input; trimming happens only at validation time so the
    /// field displays exactly what the user typed.
    pub fn set_document_input(&mut self, value: impl Into<String>) {
        self.document_input = value.into();
    }

    pub fn set_selected_answer(&mut self, answer: Option<SurveyAnswer>) {
        self.selected_answer = answer;
    }

    /// Accepts at most [`COMMENT_MAX_CHARS`] characters; the rest is
    /// dropped at input time, not flagged later.
    pub fn set_comment(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value.chars().count() > COMMENT_MAX_CHARS {
            self.comment = value.chars().take(COMMENT_MAX_CHARS).collect();
        } else {
            self.comment = value;
        }
    }

    /// Validates the document and queries the recommendation. Invalid
    /// input fails locally with a fixed message and no network call.
    pub async fn submit_lookup(&mut self) {
        if !self.state.lookup_allowed() {
            debug!(state = ?self.state, "lookup trigger ignored");
            return;
        }

        self.error = None;
        self.recommendation = None;
        self.survey_notice = None;
        self.document = None;

        let document = match DocumentId::parse(&self.document_input) {
            Ok(document) => document,
            Err(_) => {
                self.error = Some(MSG_INVALID_DOCUMENT.to_string());
                self.state = FlowState::QueryFailed;
                return;
            }
        };

        self.state = FlowState::Querying;
        match self.transport.lookup(&document).await {
            Ok(recommendation) => {
                self.recommendation = Some(match recommendation {
                    Some(text) if !text.is_empty() => text,
                    _ => MSG_NO_RECOMMENDATION.to_string(),
                });
                self.document = Some(document);
                self.state = FlowState::SurveyVisible;
            }
            Err(err) => {
                warn!(document = %document, error = %err, "recommendation lookup failed");
                self.error = Some(
                    err.backend_message()
                        .unwrap_or(MSG_LOOKUP_FAILED)
                        .to_string(),
                );
                self.state = FlowState::QueryFailed;
            }
        }
    }

    /// Sends the survey. Requires a selected answer; without one the
    /// guidance notice is set and nothing leaves the client.
    pub async fn submit_survey(&mut self) {
        if self.state != FlowState::SurveyVisible {
            debug!(state = ?self.state, "survey trigger ignored");
            return;
        }

        self.survey_notice = None;
        self.error = None;

        let Some(answer) = self.selected_answer else {
            self.survey_notice = Some(MSG_SELECT_ANSWER.to_string());
            return;
        };
        // A document is always stored while the survey is visible.
        let Some(document) = self.document.clone() else {
            return;
        };

        self.state = FlowState::Submitting;
        let submission = SurveySubmission {
            document,
            answer,
            comment: self.comment.trim().to_string(),
        };
        match self.transport.submit(&submission).await {
            Ok(()) => {
                self.survey_notice = Some(MSG_SUBMIT_OK.to_string());
                self.state = FlowState::Submitted;
                self.view = ViewState::SubmissionComplete;
                self.navigator.push(SUBMITTED_PATH);
            }
            Err(err) => {
                warn!(error = %err, "survey submission failed");
                self.survey_notice = Some(
                    err.backend_message()
                        .unwrap_or(MSG_SUBMIT_FAILED)
                        .to_string(),
                );
                self.state = FlowState::SurveyVisible;
            }
        }
    }

    /// Clears every stored field and returns to the base path when the
    /// navigator is currently elsewhere.
    pub fn reset(&mut self) {
        self.state = FlowState::Idle;
        self.view = ViewState::Form;
        self.document_input.clear();
        self.document = None;
        self.recommendation = None;
        self.error = None;
        self.survey_notice = None;
        self.selected_answer = None;
        self.comment.clear();
        if self.navigator.current_path() != BASE_PATH {
            self.navigator.push(BASE_PATH);
        }
    }

    /// Re-maps the navigator's current path to a view after external
    /// history movement. Flow fields are untouched and no request is
    /// issued.
    pub fn sync_view_with_path(&mut self) {
        self.view = ViewState::from_path(&self.navigator.current_path());
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot {
            state: self.state,
            view: self.view,
            document_input: self.document_input.clone(),
            recommendation: self.recommendation.clone(),
            error: self.error.clone(),
            survey_notice: self.survey_notice.clone(),
            selected_answer: self.selected_answer,
            comment: self.comment.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
