// Error types for chemviz

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum ChemvizError {
    // Errors surfaced on the login form
    #[snafu(display("Login failed. Please check your credentials"))]
    LoginFailed,

    // Raised whenever an authorized call comes back with a 401; forces a
    // local logout and a re-login prompt
    #[snafu(display("Session expired. Please login again"))]
    SessionExpired,

    // Local validation errors, no network call is made
    #[snafu(display("Please select a file first"))]
    NoFileSelected,
    #[snafu(display("Another operation is still in progress"))]
    OperationInFlight,
    #[snafu(display("No dataset selected"))]
    NoDatasetSelected,

    // Errors while talking to the analytics API
    #[snafu(display("Could not reach the server for the {operation} request"))]
    RequestError {
        operation: &'static str,
        source: Box<ureq::Error>,
    },
    #[snafu(display("The server rejected the {operation} request (status {status})"))]
    UnexpectedStatus { operation: &'static str, status: u16 },
    #[snafu(display("Error reading the {operation} response"))]
    ResponseParseError {
        operation: &'static str,
        source: io::Error,
    },

    // Errors reading the file picked for upload
    #[snafu(display("Error reading {path}"))]
    UploadFileError { path: String, source: io::Error },

    // Session persistence errors
    #[snafu(display("Could not find application data directory to save the session file"))]
    NoConfigDir,
    #[snafu(display("Error accessing the session file"))]
    SessionIOError { source: io::Error },
    #[snafu(display("Error serializing the session file"))]
    SessionSerializeError { source: serde_json::Error },

    // Errors saving the downloaded PDF report
    #[snafu(display("Error saving the report file"))]
    ReportWriteError { source: io::Error },
}

impl ChemvizError {
    /// True for the one error kind that tears down the whole client state.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ChemvizError::SessionExpired)
    }
}
