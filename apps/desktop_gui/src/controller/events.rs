//! UI/backend events and error modeling for the desktop front-end.

use client_core::FlowSnapshot;

pub enum UiEvent {
    Info(String),
    FlowUpdated(FlowSnapshot),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    General,
}

pub fn classify_startup_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("failed to build runtime") || lower.contains("startup failure") {
        "No se pudo iniciar el componente de red; cierra y vuelve a abrir la aplicación."
            .to_string()
    } else {
        format!("Error al iniciar: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
            || message_lower.contains("runtime")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Conexión",
        UiErrorCategory::Validation => "Validación",
        UiErrorCategory::Unknown => "Inesperado",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_runtime_build_failures_as_transport_errors() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "backend worker startup failure: failed to build runtime: out of file descriptors",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.context(), UiErrorContext::BackendStartup);
    }

    #[test]
    fn startup_failures_get_a_user_facing_explanation() {
        let text = classify_startup_failure(
            "backend worker startup failure: failed to build runtime: boom",
        );
        assert!(text.contains("No se pudo iniciar"));

        let text = classify_startup_failure("something odd");
        assert!(text.contains("something odd"));
    }

    #[test]
    fn unrecognized_messages_fall_back_to_the_unknown_category() {
        let err = UiError::from_message(UiErrorContext::General, "¿?");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
    }
}
