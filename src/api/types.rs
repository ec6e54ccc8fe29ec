// Wire types for the analytics API. Field names match the server's
// snake_case JSON; unknown fields in responses are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response body from `POST /login/`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

/// Response body from `POST /upload/`: the id of the dataset the server
/// created for the uploaded file.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UploadResponse {
    pub id: i64,
}

/// One entry of `GET /history/`. The server orders entries newest first
/// and caps the list to the last 5 uploads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub name: String,
    pub total_count: u32,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub averages: Averages,
}

/// Dataset-wide averages computed by the server.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Averages {
    #[serde(default)]
    pub avg_flow: f64,
    #[serde(default)]
    pub avg_press: f64,
    #[serde(default)]
    pub avg_temp: f64,
}

/// Summary payload from `GET /summary/{id}/`. Immutable once received;
/// replaced wholesale when a different dataset is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Name of the uploaded file the dataset was created from.
    #[serde(default)]
    pub dataset: String,
    pub total_count: u32,
    pub averages: Averages,
    pub distribution: Vec<TypeCount>,
    pub raw_data: Vec<EquipmentRow>,
}

/// One slice of the equipment-type distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCount {
    pub eq_type: String,
    pub count: u32,
}

/// One row of the raw equipment data preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRow {
    pub name: String,
    pub eq_type: String,
    #[serde(default)]
    pub flowrate: f64,
    #[serde(default)]
    pub pressure: f64,
    pub temperature: f64,
}
