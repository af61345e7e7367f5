//! Backend worker: owns the flow controller and processes UI commands
//! sequentially on its own tokio runtime.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use client_core::{
    HttpSurveyBackend, MemoryHistory, Navigator, SurveyFlowController, SurveyTransport,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(backend_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info(
            "Iniciando conexión con el backend...".to_string(),
        ));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let transport: Arc<dyn SurveyTransport> = Arc::new(HttpSurveyBackend::new(backend_url));
        let history = Arc::new(MemoryHistory::new());
        let mut controller =
            SurveyFlowController::new(transport, Arc::clone(&history) as Arc<dyn Navigator>);

        let _ = ui_tx.try_send(UiEvent::Info("Listo para consultar".to_string()));
        let _ = ui_tx.try_send(UiEvent::FlowUpdated(controller.snapshot()));

        // Commands run one at a time: an in-flight request can never be
        // overlapped by a second trigger.
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::Lookup { document } => {
                    controller.set_document_input(document);
                    runtime.block_on(controller.submit_lookup());
                }
                BackendCommand::SubmitSurvey { answer, comment } => {
                    controller.set_selected_answer(answer);
                    controller.set_comment(comment);
                    runtime.block_on(controller.submit_survey());
                }
                BackendCommand::Reset => controller.reset(),
                BackendCommand::NavigateBack => {
                    if history.back().is_some() {
                        controller.sync_view_with_path();
                    }
                }
                BackendCommand::NavigateForward => {
                    if history.forward().is_some() {
                        controller.sync_view_with_path();
                    }
                }
            }
            let _ = ui_tx.try_send(UiEvent::FlowUpdated(controller.snapshot()));
        }
        tracing::info!("ui command channel closed; backend worker exiting");
    });
}
