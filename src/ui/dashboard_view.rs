use egui::{Align, Button, Color32, Layout, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::api::HistoryEntry;
use crate::controller::{StatusKind, StatusMessage};
use crate::view::ViewModel;

use super::VisualizerApp;

const SIDEBAR_WIDTH: f32 = 280.;
const CHART_HEIGHT: f32 = 280.;

// accent colors of the temperature and pressure stat cards
const TEMPERATURE_ACCENT: Color32 = Color32::from_rgb(230, 57, 70);
const PRESSURE_ACCENT: Color32 = Color32::from_rgb(69, 123, 157);

impl VisualizerApp {
    pub(crate) fn dashboard_view(&mut self, ctx: &egui::Context) {
        let username = self
            .controller
            .session()
            .map(|s| s.username.clone())
            .unwrap_or_default();
        let busy = self.controller.is_busy();
        let current_id = self.controller.current_dataset_id();
        let entries = self.controller.history().to_vec();
        let status = self.controller.status().cloned();
        let view = self.controller.view().cloned();

        self.sidebar(ctx, &username, busy, current_id, &entries);
        self.main_panel(ctx, status, view, current_id);
    }

    fn sidebar(
        &mut self,
        ctx: &egui::Context,
        username: &str,
        busy: bool,
        current_id: Option<i64>,
        entries: &[HistoryEntry],
    ) {
        egui::SidePanel::left("sidebar")
            .exact_width(SIDEBAR_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(8.);
                ui.heading("Chemical Equipment Visualizer");
                ui.horizontal(|ui| {
                    ui.label(RichText::new(username).color(Color32::GRAY));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Logout").clicked() {
                            self.trigger_logout();
                        }
                    });
                });
                ui.separator();

                ui.label(RichText::new("Import Data").small().strong());
                if ui.button("Select CSV file…").clicked()
                    && let Some(path) = rfd::FileDialog::new()
                        .add_filter("CSV files", &["csv"])
                        .pick_file()
                {
                    self.selected_file = Some(path);
                }
                if let Some(file_name) = self
                    .selected_file
                    .as_deref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                {
                    ui.label(RichText::new(file_name).small().color(Color32::GRAY));
                }
                ui.add_space(4.);
                let upload_label = if busy { "Processing…" } else { "Upload & Sync" };
                if ui.add_enabled(!busy, Button::new(upload_label)).clicked() {
                    self.trigger_upload(ctx);
                }
                ui.separator();

                ui.label(RichText::new("History (Last 5)").small().strong());
                ScrollArea::vertical().show(ui, |ui| {
                    if entries.is_empty() {
                        ui.label(RichText::new("No uploads yet").color(Color32::GRAY));
                        return;
                    }
                    let mut clicked = None;
                    for entry in entries {
                        let text = format!(
                            "{}\n{} units · {}",
                            entry.name,
                            entry.total_count,
                            entry.uploaded_at.format("%Y-%m-%d")
                        );
                        let selected = current_id == Some(entry.id);
                        if ui.selectable_label(selected, text).clicked() {
                            clicked = Some(entry.id);
                        }
                    }
                    if let Some(dataset_id) = clicked {
                        self.trigger_selection(dataset_id, ctx);
                    }
                });
            });
    }

    fn main_panel(
        &mut self,
        ctx: &egui::Context,
        status: Option<StatusMessage>,
        view: Option<ViewModel>,
        current_id: Option<i64>,
    ) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(status) = &status {
                let color = match status.kind {
                    StatusKind::Error => Color32::RED,
                    StatusKind::Info => Color32::DARK_GREEN,
                };
                ui.colored_label(color, &status.text);
                ui.add_space(4.);
            }

            let Some(view) = view else {
                empty_state(ui);
                return;
            };

            ui.horizontal(|ui| {
                ui.heading("Equipment Analytics Dashboard");
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui
                        .add_enabled(current_id.is_some(), Button::new("Download PDF Report"))
                        .clicked()
                    {
                        self.trigger_report_download(ctx);
                    }
                });
            });
            if !view.dataset_name.is_empty() {
                ui.label(RichText::new(&view.dataset_name).color(Color32::GRAY));
            }
            ui.add_space(8.);

            ui.columns(3, |columns| {
                stat_card(&mut columns[0], "Total Units", &view.stats.total_units, None);
                stat_card(
                    &mut columns[1],
                    "Avg Temperature",
                    &view.stats.avg_temperature,
                    Some(TEMPERATURE_ACCENT),
                );
                stat_card(
                    &mut columns[2],
                    "Avg Pressure",
                    &view.stats.avg_pressure,
                    Some(PRESSURE_ACCENT),
                );
            });
            ui.add_space(8.);

            ui.group(|ui| {
                ui.label(RichText::new("Distribution by Type").strong());
                distribution_chart(ui, &view);
            });
            ui.add_space(8.);
            ui.group(|ui| {
                ui.label(RichText::new("Raw Data Preview").strong());
                preview_table(ui, &view);
            });
        });
    }
}

fn stat_card(ui: &mut Ui, label: &str, value: &str, accent: Option<Color32>) {
    ui.group(|ui| {
        ui.label(RichText::new(label).small().color(Color32::GRAY));
        let mut text = RichText::new(value).heading().strong();
        if let Some(color) = accent {
            text = text.color(color);
        }
        ui.label(text);
    });
}

fn distribution_chart(ui: &mut Ui, view: &ViewModel) {
    if view.chart.is_empty() {
        ui.label(RichText::new("No distribution data").color(Color32::GRAY));
        return;
    }
    Plot::new("distribution")
        .legend(Legend::default())
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show_grid(false)
        .height(CHART_HEIGHT)
        .show(ui, |plot_ui| {
            for (index, slice) in view.chart.iter().enumerate() {
                let bar = Bar::new(index as f64, slice.value).fill(slice.color);
                plot_ui.bar_chart(BarChart::new(slice.label.clone(), vec![bar]).color(slice.color));
            }
        });
}

fn preview_table(ui: &mut Ui, view: &ViewModel) {
    if view.table.is_empty() {
        ui.label(RichText::new("No raw data").color(Color32::GRAY));
        return;
    }
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::remainder())
        .column(Column::remainder())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Name");
            });
            header.col(|ui| {
                ui.strong("Type");
            });
            header.col(|ui| {
                ui.strong("Temp");
            });
        })
        .body(|mut body| {
            for row in &view.table {
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(&row.name);
                    });
                    table_row.col(|ui| {
                        ui.label(&row.eq_type);
                    });
                    table_row.col(|ui| {
                        ui.label(&row.temperature);
                    });
                });
            }
        });
}

fn empty_state(ui: &mut Ui) {
    ui.add_space(ui.available_height() * 0.3);
    ui.vertical_centered(|ui| {
        ui.heading("Ready for Analysis");
        ui.label(
            RichText::new("Upload a CSV file or select a dataset from the history.")
                .color(Color32::GRAY),
        );
    });
}
