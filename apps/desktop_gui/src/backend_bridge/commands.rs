//! Backend commands queued from UI to the backend worker.

use shared::domain::SurveyAnswer;

pub enum BackendCommand {
    Lookup {
        document: String,
    },
    SubmitSurvey {
        answer: Option<SurveyAnswer>,
        comment: String,
    },
    Reset,
    NavigateBack,
    NavigateForward,
}
