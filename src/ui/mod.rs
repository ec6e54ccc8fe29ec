mod dashboard_view;
mod login_view;

use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use egui::Visuals;
use log::warn;

use crate::api::ApiClient;
use crate::controller::{ApiEvent, AppController, Effect};
use crate::errors::ChemvizError;
use crate::session::SessionStore;

/// `VisualizerApp` is the desktop client for the equipment analytics
/// service: login, CSV upload, summary dashboard and upload history.
///
/// All network requests run on worker threads holding a clone of the API
/// client; each completion comes back over the event channel tagged with the
/// generation it was issued under, and `update` drains the channel into the
/// controller before rendering. The controller decides what is applied and
/// what is stale.
pub struct VisualizerApp {
    controller: AppController,
    client: ApiClient,
    events_tx: Sender<ApiEvent>,
    events_rx: Receiver<ApiEvent>,
    username_input: String,
    password_input: String,
    selected_file: Option<PathBuf>,
}

impl VisualizerApp {
    pub fn new(
        api_url: &str,
        store: Box<dyn SessionStore>,
        cc: &eframe::CreationContext<'_>,
    ) -> Self {
        cc.egui_ctx.set_visuals(Visuals::light());

        let (events_tx, events_rx) = mpsc::channel::<ApiEvent>();
        let mut controller = AppController::new(store);
        let restored = controller.restore();

        let mut app = Self {
            controller,
            client: ApiClient::new(api_url),
            events_tx,
            events_rx,
            username_input: String::new(),
            password_input: String::new(),
            selected_file: None,
        };
        app.sync_client_token();
        if restored {
            app.spawn_history_refresh(&cc.egui_ctx);
        }
        app
    }

    /// Mirror the controller's session token into the request builder. Runs
    /// after every applied event so authorized requests always carry the
    /// live credential and none once the session ends.
    fn sync_client_token(&mut self) {
        self.client
            .set_token(self.controller.session().map(|s| s.token.clone()));
    }

    pub(crate) fn trigger_login(&mut self, ctx: &egui::Context) {
        let username = self.username_input.trim().to_string();
        let password = std::mem::take(&mut self.password_input);
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let result = client.login(&username, &password);
            send_event(&tx, ApiEvent::LoginCompleted { result });
            ctx.request_repaint();
        });
    }

    /// Local teardown always runs; the server-side token invalidation is
    /// fired off as best effort and its failure only logged.
    pub(crate) fn trigger_logout(&mut self) {
        let client = self.client.clone();
        thread::spawn(move || {
            if let Err(e) = client.logout() {
                warn!("server-side logout failed: {e}");
            }
        });
        self.controller.logout();
        self.sync_client_token();
        self.selected_file = None;
        self.username_input.clear();
        self.password_input.clear();
    }

    pub(crate) fn trigger_upload(&mut self, ctx: &egui::Context) {
        let Some((generation, path)) = self.controller.request_upload(self.selected_file.clone())
        else {
            return;
        };
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload.csv".to_string());
            let accepted = fs::read(&path)
                .map_err(|e| ChemvizError::UploadFileError {
                    path: path.display().to_string(),
                    source: e,
                })
                .and_then(|content| client.upload(&file_name, &content));
            match accepted {
                Ok(upload) => {
                    send_event(
                        &tx,
                        ApiEvent::UploadAccepted {
                            generation,
                            dataset_id: upload.id,
                        },
                    );
                    ctx.request_repaint();
                    // the accepted upload flows straight into its summary
                    let result = client.summary(upload.id);
                    send_event(
                        &tx,
                        ApiEvent::SummaryFetched {
                            generation,
                            dataset_id: upload.id,
                            result,
                        },
                    );
                }
                Err(error) => send_event(&tx, ApiEvent::UploadFailed { generation, error }),
            }
            ctx.request_repaint();
        });
    }

    pub(crate) fn trigger_selection(&mut self, dataset_id: i64, ctx: &egui::Context) {
        let Some(generation) = self.controller.request_selection(dataset_id) else {
            return;
        };
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let result = client.summary(dataset_id);
            send_event(
                &tx,
                ApiEvent::SummaryFetched {
                    generation,
                    dataset_id,
                    result,
                },
            );
            ctx.request_repaint();
        });
    }

    pub(crate) fn trigger_report_download(&mut self, ctx: &egui::Context) {
        let Some(dataset_id) = self.controller.request_report() else {
            return;
        };
        let Some(target) = rfd::FileDialog::new()
            .set_file_name(format!("report_{dataset_id}.pdf"))
            .add_filter("PDF document", &["pdf"])
            .save_file()
        else {
            return;
        };
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let result = client.pdf(dataset_id).and_then(|bytes| {
                fs::write(&target, bytes)
                    .map(|_| target)
                    .map_err(|e| ChemvizError::ReportWriteError { source: e })
            });
            send_event(&tx, ApiEvent::ReportSaved { result });
            ctx.request_repaint();
        });
    }

    fn spawn_history_refresh(&mut self, ctx: &egui::Context) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let result = client.history();
            send_event(&tx, ApiEvent::HistoryFetched { result });
            ctx.request_repaint();
        });
    }
}

impl eframe::App for VisualizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // apply completed background requests before rendering
        while let Ok(event) = self.events_rx.try_recv() {
            let effect = self.controller.handle_event(event);
            self.sync_client_token();
            if let Some(Effect::RefreshHistory) = effect {
                self.spawn_history_refresh(ctx);
            }
        }

        if self.controller.is_authenticated() {
            self.dashboard_view(ctx);
        } else {
            self.login_view(ctx);
        }
    }
}

fn send_event(tx: &Sender<ApiEvent>, event: ApiEvent) {
    if tx.send(event).is_err() {
        warn!("event receiver dropped, discarding request completion");
    }
}
