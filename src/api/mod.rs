mod client;
mod types;

pub use client::ApiClient;
pub use types::{Averages, EquipmentRow, HistoryEntry, LoginResponse, Summary, TypeCount, UploadResponse};
