// Library interface for chemviz
// This allows integration tests to access internal modules

pub mod api;
pub mod controller;
pub mod errors;
pub mod history;
pub mod session;
pub mod ui;
pub mod view;
pub mod workflow;

// Re-export commonly used types
pub use api::{ApiClient, Averages, EquipmentRow, HistoryEntry, Summary, TypeCount};
pub use controller::{ApiEvent, AppController, Effect, StatusKind};
pub use errors::ChemvizError;
pub use session::{FileSessionStore, Session, SessionStore};
pub use view::{ViewModel, project};
pub use workflow::{DatasetWorkflow, WorkflowState};
