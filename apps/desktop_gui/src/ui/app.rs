use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use client_core::{FlowSnapshot, FlowState, ViewState, COMMENT_MAX_CHARS};
use shared::domain::{DocumentId, SurveyAnswer};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{
    classify_startup_failure, err_label, UiErrorContext, UiEvent,
};
use crate::controller::orchestration::dispatch_backend_command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

pub struct SurveyGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    snapshot: FlowSnapshot,

    // Local edit buffers. The backend worker owns the canonical copies;
    // these hold in-progress typing between commands.
    document_input: String,
    selected_answer: Option<SurveyAnswer>,
    comment_input: String,

    status: String,
    status_banner: Option<StatusBanner>,
}

impl SurveyGuiApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            snapshot: FlowSnapshot::initial(),
            document_input: String::new(),
            selected_answer: None,
            comment_input: String::new(),
            status: "Iniciando...".to_string(),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::FlowUpdated(snapshot) => {
                    // A reset empties the worker-side fields; mirror that in
                    // the local buffers so the form comes back blank.
                    if snapshot.state == FlowState::Idle && snapshot.document_input.is_empty() {
                        self.document_input.clear();
                        self.selected_answer = None;
                        self.comment_input.clear();
                    }
                    self.snapshot = snapshot;
                }
                UiEvent::Error(err) => {
                    if err.context() == UiErrorContext::BackendStartup {
                        self.status = classify_startup_failure(err.message());
                        self.status_banner = Some(StatusBanner {
                            severity: StatusBannerSeverity::Error,
                            message: self.status.clone(),
                        });
                    } else {
                        self.status =
                            format!("{}: {}", err_label(err.category()), err.message());
                    }
                }
            }
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Cerrar").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
        }
    }

    fn show_history_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("◀").on_hover_text("Atrás").clicked() {
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::NavigateBack,
                    &mut self.status,
                );
            }
            if ui.button("▶").on_hover_text("Adelante").clicked() {
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::NavigateForward,
                    &mut self.status,
                );
            }
        });
    }

    fn request_reset(&mut self) {
        dispatch_backend_command(&self.cmd_tx, BackendCommand::Reset, &mut self.status);
    }

    fn show_lookup_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Número de documento").strong());
        let lookup_enabled = self.snapshot.state.lookup_allowed();
        let input = egui::TextEdit::singleline(&mut self.document_input)
            .char_limit(DocumentId::MAX_DIGITS)
            .hint_text("Ej: 1032456789")
            .desired_width(f32::INFINITY)
            .interactive(lookup_enabled);
        let response = ui.add_sized([ui.available_width(), 34.0], input);

        ui.add_space(6.0);

        let button_label = if self.snapshot.state == FlowState::Querying {
            "Consultando..."
        } else {
            "Consultar"
        };
        let clicked = ui
            .add_enabled(
                lookup_enabled,
                egui::Button::new(egui::RichText::new(button_label).strong())
                    .min_size(egui::vec2(ui.available_width(), 36.0)),
            )
            .clicked();
        let enter_submitted =
            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if lookup_enabled && (clicked || enter_submitted) {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::Lookup {
                    document: self.document_input.clone(),
                },
                &mut self.status,
            );
        }

        if self.snapshot.state.survey_visible() {
            ui.small("Consulta completada. Usa \"Realizar otra consulta\" para un nuevo documento.");
        }
    }

    fn show_lookup_result(&mut self, ui: &mut egui::Ui) {
        if let Some(recommendation) = self.snapshot.recommendation.clone() {
            egui::Frame::group(ui.style())
                .fill(ui.visuals().faint_bg_color)
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("Recomendación encontrada").strong());
                    ui.label(recommendation);
                });
        }

        if let Some(error) = self.snapshot.error.clone() {
            egui::Frame::group(ui.style())
                .fill(egui::Color32::from_rgb(64, 40, 40))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new("Ocurrió un problema")
                            .strong()
                            .color(egui::Color32::from_rgb(240, 190, 190)),
                    );
                    ui.label(egui::RichText::new(error).color(egui::Color32::from_rgb(240, 190, 190)));
                });
        }
    }

    fn show_survey_section(&mut self, ui: &mut egui::Ui) {
        if !self.snapshot.state.survey_visible() {
            return;
        }

        ui.separator();
        ui.label(egui::RichText::new("¿Qué has hecho con la recomendación?").strong());

        let selected_text = self
            .selected_answer
            .map(SurveyAnswer::label)
            .unwrap_or("Selecciona una opción");
        egui::ComboBox::from_id_salt("survey_answer")
            .selected_text(selected_text)
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for answer in SurveyAnswer::ALL {
                    ui.selectable_value(&mut self.selected_answer, Some(answer), answer.label());
                }
            });

        ui.add_space(6.0);
        ui.label("Comentario (opcional)");
        ui.add(
            egui::TextEdit::multiline(&mut self.comment_input)
                .char_limit(COMMENT_MAX_CHARS)
                .hint_text("Cuéntanos más detalles")
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
        ui.small(format!(
            "{}/{COMMENT_MAX_CHARS}",
            self.comment_input.chars().count()
        ));

        ui.add_space(6.0);
        let submitting = self.snapshot.state == FlowState::Submitting;
        let button_label = if submitting {
            "Enviando..."
        } else {
            "Enviar encuesta"
        };
        let can_submit = self.snapshot.state == FlowState::SurveyVisible;
        if ui
            .add_enabled(
                can_submit,
                egui::Button::new(egui::RichText::new(button_label).strong())
                    .min_size(egui::vec2(ui.available_width(), 36.0)),
            )
            .clicked()
        {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::SubmitSurvey {
                    answer: self.selected_answer,
                    comment: self.comment_input.clone(),
                },
                &mut self.status,
            );
        }

        if let Some(notice) = self.snapshot.survey_notice.clone() {
            ui.small(notice);
        }
    }

    fn show_form_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let card_width = avail.x.clamp(420.0, 560.0);
            ui.add_space((avail.y * 0.08).clamp(12.0, 60.0));

            ui.vertical_centered(|ui| {
                ui.set_width(card_width);

                egui::Frame::NONE
                    .fill(ui.visuals().panel_fill)
                    .corner_radius(14.0)
                    .stroke(egui::Stroke::new(
                        1.0,
                        ui.visuals().widgets.noninteractive.bg_stroke.color,
                    ))
                    .inner_margin(egui::Margin::symmetric(20, 18))
                    .show(ui, |ui| {
                        ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);

                        ui.small(
                            egui::RichText::new("Seguimiento de restricciones médicas").weak(),
                        );
                        ui.heading("Consulta y responde tu recomendación");

                        ui.add_space(4.0);
                        self.show_status_banner(ui);

                        self.show_lookup_section(ui);
                        self.show_lookup_result(ui);
                        self.show_survey_section(ui);

                        ui.add_space(8.0);
                        if ui.button("Realizar otra consulta").clicked() {
                            self.request_reset();
                        }

                        ui.separator();
                        self.show_history_controls(ui);
                        show_status_line(ui, &self.status);
                    });
            });
        });
    }

    fn show_submission_complete_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let card_width = avail.x.clamp(420.0, 560.0);
            ui.add_space((avail.y * 0.15).clamp(18.0, 110.0));

            ui.vertical_centered(|ui| {
                ui.set_width(card_width);

                egui::Frame::NONE
                    .fill(ui.visuals().panel_fill)
                    .corner_radius(14.0)
                    .stroke(egui::Stroke::new(
                        1.0,
                        ui.visuals().widgets.noninteractive.bg_stroke.color,
                    ))
                    .inner_margin(egui::Margin::symmetric(20, 18))
                    .show(ui, |ui| {
                        ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);

                        ui.label(
                            egui::RichText::new("Envío completado")
                                .strong()
                                .color(egui::Color32::from_rgb(120, 200, 140)),
                        );
                        ui.heading("Encuesta enviada correctamente.");
                        ui.label(
                            "Gracias por responder. Tu información fue registrada y será \
                             revisada por el equipo.",
                        );

                        ui.add_space(8.0);
                        if ui
                            .button(egui::RichText::new("Realizar otra consulta").strong())
                            .clicked()
                        {
                            self.request_reset();
                        }

                        ui.separator();
                        self.show_history_controls(ui);
                        show_status_line(ui, &self.status);
                    });
            });
        });
    }
}

fn show_status_line(ui: &mut egui::Ui, status: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.small("Estado:");
        ui.small(egui::RichText::new(status).weak());
    });
}

impl eframe::App for SurveyGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        match self.snapshot.view {
            ViewState::Form => self.show_form_view(ctx),
            ViewState::SubmissionComplete => self.show_submission_complete_view(ctx),
        }

        // Worker events arrive outside the frame loop; poll at a steady rate.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
