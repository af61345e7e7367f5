mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::app::SurveyGuiApp;

/// Desktop front-end for the recommendation follow-up survey.
#[derive(Debug, Parser)]
#[command(name = "survey_gui")]
struct Args {
    /// Base URL of the backend hosting the lookup and survey functions.
    #[arg(long, default_value = "http://127.0.0.1:8888")]
    backend_url: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    tracing::info!(backend_url = %args.backend_url, "starting survey gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(args.backend_url, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Seguimiento de recomendaciones")
            .with_inner_size([620.0, 760.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Seguimiento de recomendaciones",
        options,
        Box::new(|_cc| Ok(Box::new(SurveyGuiApp::new(cmd_tx, ui_rx)))),
    )
}
