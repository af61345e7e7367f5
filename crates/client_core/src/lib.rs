//! Core of the recommendation follow-up client: the survey flow state
//! machine, the transport seam to the two backend endpoints, and the
//! navigation abstraction used for the routed confirmation view.

pub mod controller;
pub mod navigation;
pub mod transport;

pub use controller::{
    FlowSnapshot, FlowState, SurveyFlowController, ViewState, COMMENT_MAX_CHARS,
};
pub use navigation::{MemoryHistory, Navigator, BASE_PATH, SUBMITTED_PATH};
pub use transport::{HttpSurveyBackend, SurveyTransport, TransportError};
