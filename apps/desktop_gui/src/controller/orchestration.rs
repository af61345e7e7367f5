//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::Lookup { .. } => "lookup",
        BackendCommand::SubmitSurvey { .. } => "submit_survey",
        BackendCommand::Reset => "reset",
        BackendCommand::NavigateBack => "navigate_back",
        BackendCommand::NavigateForward => "navigate_forward",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "La cola de comandos está llena; intenta de nuevo".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "El procesador de comandos se desconectó; cierra y vuelve a abrir la aplicación"
                    .to_string();
        }
    }
}
