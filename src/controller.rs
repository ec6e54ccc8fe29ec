// Composes the session store, history cache, dataset workflow and view
// projection into the single state the UI renders from. Background request
// threads report back through `ApiEvent`s; the controller applies each event
// to the state machine and tells the caller when a follow-up request is
// needed. All methods are synchronous and free of I/O except for the
// session store.

use std::path::PathBuf;

use log::{debug, error, warn};

use crate::api::{HistoryEntry, LoginResponse, Summary};
use crate::errors::ChemvizError;
use crate::history::HistoryCache;
use crate::session::{Session, SessionStore};
use crate::view::{self, ViewModel};
use crate::workflow::{CommitOutcome, DatasetWorkflow, WorkflowState};

/// Completion of a background request, tagged with the generation it was
/// issued under where staleness matters.
#[derive(Debug)]
pub enum ApiEvent {
    LoginCompleted {
        result: Result<LoginResponse, ChemvizError>,
    },
    HistoryFetched {
        result: Result<Vec<HistoryEntry>, ChemvizError>,
    },
    UploadAccepted {
        generation: u64,
        dataset_id: i64,
    },
    UploadFailed {
        generation: u64,
        error: ChemvizError,
    },
    SummaryFetched {
        generation: u64,
        dataset_id: i64,
        result: Result<Summary, ChemvizError>,
    },
    ReportSaved {
        result: Result<PathBuf, ChemvizError>,
    },
}

/// Follow-up request the caller must issue after an event was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Effect {
    RefreshHistory,
}

/// Inline alert shown in the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

impl StatusMessage {
    fn info(text: String) -> Self {
        Self {
            text,
            kind: StatusKind::Info,
        }
    }

    fn error(text: String) -> Self {
        Self {
            text,
            kind: StatusKind::Error,
        }
    }
}

pub struct AppController {
    store: Box<dyn SessionStore>,
    session: Option<Session>,
    history: HistoryCache,
    workflow: DatasetWorkflow,
    view: Option<ViewModel>,
    status: Option<StatusMessage>,
}

impl AppController {
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self {
            store,
            session: None,
            history: HistoryCache::default(),
            workflow: DatasetWorkflow::default(),
            view: None,
            status: None,
        }
    }

    /// Read the persisted session at startup. A present credential counts as
    /// authenticated without asking the server; the first authorized request
    /// validates it and forces a logout on a 401. Returns true when a
    /// session was restored so the caller can kick off the history fetch.
    pub fn restore(&mut self) -> bool {
        match self.store.load() {
            Ok(Some(session)) => {
                self.session = Some(session);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!("could not restore session: {e}");
                false
            }
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn workflow_state(&self) -> WorkflowState {
        self.workflow.state()
    }

    pub fn is_busy(&self) -> bool {
        self.workflow.is_busy()
    }

    pub fn current_dataset_id(&self) -> Option<i64> {
        self.workflow.current_dataset_id()
    }

    pub fn view(&self) -> Option<&ViewModel> {
        self.view.as_ref()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Validate and start an upload. With no file picked this surfaces the
    /// validation message and issues nothing: no network call, no busy
    /// state. Otherwise returns the generation to tag the request with,
    /// along with the file to send.
    pub fn request_upload(&mut self, file: Option<PathBuf>) -> Option<(u64, PathBuf)> {
        let Some(path) = file else {
            self.status = Some(StatusMessage::error(
                ChemvizError::NoFileSelected.to_string(),
            ));
            return None;
        };
        match self.workflow.begin_upload() {
            Ok(generation) => {
                self.status = None;
                Some((generation, path))
            }
            Err(e) => {
                self.status = Some(StatusMessage::error(e.to_string()));
                None
            }
        }
    }

    /// Start a summary fetch for a history entry. Returns the generation to
    /// tag the request with, or nothing when the selection is not allowed
    /// right now (an upload is in flight).
    pub fn request_selection(&mut self, dataset_id: i64) -> Option<u64> {
        match self.workflow.begin_selection(dataset_id) {
            Ok(generation) => {
                self.status = None;
                Some(generation)
            }
            Err(e) => {
                debug!("selection of dataset {dataset_id} ignored: {e}");
                None
            }
        }
    }

    /// Resolve the dataset a report download would target, surfacing the
    /// validation message when nothing is displayed yet.
    pub fn request_report(&mut self) -> Option<i64> {
        match self.workflow.current_dataset_id() {
            Some(dataset_id) => Some(dataset_id),
            None => {
                self.status = Some(StatusMessage::error(
                    ChemvizError::NoDatasetSelected.to_string(),
                ));
                None
            }
        }
    }

    /// Locally end the session. The server-side token invalidation runs
    /// elsewhere and is best effort; this teardown is unconditional so
    /// logout always succeeds from the user's point of view.
    pub fn logout(&mut self) {
        self.teardown();
        self.status = None;
    }

    /// Apply a completed background request to the state machine.
    pub fn handle_event(&mut self, event: ApiEvent) -> Option<Effect> {
        match event {
            ApiEvent::LoginCompleted { result } => match result {
                Ok(login) => {
                    let session = Session {
                        token: login.token,
                        username: login.username,
                    };
                    if let Err(e) = self.store.save(&session) {
                        warn!("could not persist session: {e}");
                    }
                    self.session = Some(session);
                    self.status = None;
                    Some(Effect::RefreshHistory)
                }
                Err(e) => {
                    self.fail(e);
                    None
                }
            },
            ApiEvent::HistoryFetched { result } => match result {
                Ok(entries) => {
                    self.history.replace(entries);
                    None
                }
                Err(e) => {
                    self.fail(e);
                    None
                }
            },
            ApiEvent::UploadAccepted {
                generation,
                dataset_id,
            } => {
                if !self.workflow.upload_accepted(generation, dataset_id) {
                    debug!("dropping stale upload acceptance for dataset {dataset_id}");
                }
                None
            }
            ApiEvent::UploadFailed { generation, error } => {
                if self.workflow.operation_failed(generation) {
                    self.fail(error);
                } else {
                    debug!("dropping stale upload failure: {error}");
                }
                None
            }
            ApiEvent::SummaryFetched {
                generation,
                dataset_id,
                result,
            } => match result {
                Ok(summary) => match self.workflow.fetch_succeeded(generation, dataset_id, summary)
                {
                    CommitOutcome::Committed { from_upload } => {
                        self.view = self.workflow.current_summary().map(view::project);
                        self.status = None;
                        from_upload.then_some(Effect::RefreshHistory)
                    }
                    CommitOutcome::Discarded => {
                        debug!("dropping stale summary for dataset {dataset_id}");
                        None
                    }
                },
                Err(e) => {
                    if self.workflow.operation_failed(generation) {
                        self.fail(e);
                    } else {
                        debug!("dropping stale summary failure: {e}");
                    }
                    None
                }
            },
            ApiEvent::ReportSaved { result } => match result {
                Ok(path) => {
                    self.status = Some(StatusMessage::info(format!(
                        "Report saved to {}",
                        path.display()
                    )));
                    None
                }
                Err(e) => {
                    self.fail(e);
                    None
                }
            },
        }
    }

    /// Surface a failure. Session expiry is the one error that tears the
    /// whole client state down; everything else becomes an inline message
    /// and leaves the last known-good state in place.
    fn fail(&mut self, error: ChemvizError) {
        if error.is_session_expired() {
            self.teardown();
            self.status = Some(StatusMessage::error(error.to_string()));
        } else {
            error!("{error}");
            self.status = Some(StatusMessage::error(error.to_string()));
        }
    }

    fn teardown(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!("could not clear persisted session: {e}");
        }
        self.session = None;
        self.history.clear();
        self.workflow.reset();
        self.view = None;
    }
}
