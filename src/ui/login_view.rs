use egui::{Button, Color32, RichText, TextEdit};

use crate::controller::StatusKind;

use super::VisualizerApp;

const FORM_WIDTH: f32 = 240.;

impl VisualizerApp {
    pub(crate) fn login_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(ui.available_height() * 0.25);
            ui.vertical_centered(|ui| {
                ui.heading("Chemical Equipment Visualizer");
                ui.label(RichText::new("Please login to continue").color(Color32::GRAY));
                ui.add_space(16.);

                ui.add(
                    TextEdit::singleline(&mut self.username_input)
                        .hint_text("Username")
                        .desired_width(FORM_WIDTH),
                );
                ui.add_space(4.);
                let password_response = ui.add(
                    TextEdit::singleline(&mut self.password_input)
                        .hint_text("Password")
                        .password(true)
                        .desired_width(FORM_WIDTH),
                );
                ui.add_space(12.);

                let submitted = password_response.lost_focus()
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let clicked = ui
                    .add_sized([FORM_WIDTH, 32.], Button::new("Login"))
                    .clicked();
                if clicked || submitted {
                    self.trigger_login(ctx);
                }

                if let Some(status) = self.controller.status() {
                    let color = match status.kind {
                        StatusKind::Error => Color32::RED,
                        StatusKind::Info => Color32::DARK_GREEN,
                    };
                    ui.add_space(12.);
                    ui.colored_label(color, &status.text);
                }
            });
        });
    }
}
