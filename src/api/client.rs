/// Analytics API client.
///
/// Talks to the backend over the synchronous `ureq` HTTP client. The client
/// owns the base URL and the current auth token; every authorized request
/// gets its `Authorization: Token <value>` header injected here, per call.
/// Clones are cheap and handed to worker threads.
use std::io::Read;
use std::time::Duration;

use log::debug;
use serde::Serialize;

use super::types::{HistoryEntry, LoginResponse, Summary, UploadResponse};
use crate::errors::ChemvizError;

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

// The boundary only has to be absent from the uploaded bytes; this marker
// does not occur in delimited-text tabular data.
const MULTIPART_BOUNDARY: &str = "----chemviz-multipart-5fK2pQ9wXaV3mGz8";

/// Request body for `POST /login/`.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Attach or remove the credential injected into authorized requests.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Authenticate with the server. Every failure mode of this call reads
    /// as a failed login so the form can surface a single inline message; in
    /// particular a 401 here means bad credentials, not an expired session.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ChemvizError> {
        let url = format!("{}/login/", self.base_url);
        let response = ureq::post(&url)
            .timeout(self.timeout)
            .send_json(LoginRequest { username, password })
            .map_err(|e| {
                debug!("login request failed: {e}");
                ChemvizError::LoginFailed
            })?;
        response.into_json().map_err(|e| {
            debug!("login response could not be parsed: {e}");
            ChemvizError::LoginFailed
        })
    }

    /// Ask the server to invalidate the token. Callers treat this as best
    /// effort: local teardown proceeds whether or not it succeeds.
    pub fn logout(&self) -> Result<(), ChemvizError> {
        let url = format!("{}/logout/", self.base_url);
        self.authorized(ureq::post(&url))
            .call()
            .map_err(|e| map_request_error(e, "logout"))?;
        Ok(())
    }

    /// Fetch the current user's upload history, newest first.
    pub fn history(&self) -> Result<Vec<HistoryEntry>, ChemvizError> {
        let url = format!("{}/history/", self.base_url);
        let response = self
            .authorized(ureq::get(&url))
            .call()
            .map_err(|e| map_request_error(e, "history"))?;
        response.into_json().map_err(|e| ChemvizError::ResponseParseError {
            operation: "history",
            source: e,
        })
    }

    /// Upload a tabular data file as the `file` field of a multipart body.
    /// Returns the id of the dataset the server created for it.
    pub fn upload(&self, file_name: &str, content: &[u8]) -> Result<UploadResponse, ChemvizError> {
        let url = format!("{}/upload/", self.base_url);
        let body = multipart_file_body(file_name, content);
        let response = self
            .authorized(ureq::post(&url))
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .send_bytes(&body)
            .map_err(|e| map_request_error(e, "upload"))?;
        response.into_json().map_err(|e| ChemvizError::ResponseParseError {
            operation: "upload",
            source: e,
        })
    }

    /// Fetch the computed summary for a dataset.
    pub fn summary(&self, dataset_id: i64) -> Result<Summary, ChemvizError> {
        let url = format!("{}/summary/{}/", self.base_url, dataset_id);
        let response = self
            .authorized(ureq::get(&url))
            .call()
            .map_err(|e| map_request_error(e, "summary"))?;
        response.into_json().map_err(|e| ChemvizError::ResponseParseError {
            operation: "summary",
            source: e,
        })
    }

    /// Fetch the rendered PDF report for a dataset as raw bytes.
    pub fn pdf(&self, dataset_id: i64) -> Result<Vec<u8>, ChemvizError> {
        let url = format!("{}/pdf/{}/", self.base_url, dataset_id);
        let response = self
            .authorized(ureq::get(&url))
            .call()
            .map_err(|e| map_request_error(e, "report"))?;
        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| ChemvizError::ResponseParseError {
                operation: "report",
                source: e,
            })?;
        Ok(bytes)
    }

    fn authorized(&self, mut request: ureq::Request) -> ureq::Request {
        request = request.timeout(self.timeout);
        if let Some(token) = &self.token {
            request = request.set("Authorization", &format!("Token {token}"));
        }
        request
    }
}

/// Convert a `ureq` failure on an authorized call into the crate error. A
/// 401 means the token is no longer valid and maps to the session-expired
/// error that tears down the client state.
fn map_request_error(error: ureq::Error, operation: &'static str) -> ChemvizError {
    match error {
        ureq::Error::Status(401, _) => ChemvizError::SessionExpired,
        ureq::Error::Status(status, _) => ChemvizError::UnexpectedStatus { operation, status },
        transport => ChemvizError::RequestError {
            operation,
            source: Box::new(transport),
        },
    }
}

fn multipart_file_body(file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(content.len() + 256);
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: text/csv\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_strips_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/api/");
        assert_eq!(client.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn multipart_body_wraps_content_in_boundaries() {
        let body = multipart_file_body("plant.csv", b"Equipment Name,Type\nPump-1,Pump\n");
        let text = String::from_utf8(body).unwrap();
        assert!(text.starts_with(&format!("--{MULTIPART_BOUNDARY}\r\n")));
        assert!(text.contains("name=\"file\"; filename=\"plant.csv\""));
        assert!(text.contains("Pump-1,Pump"));
        assert!(text.ends_with(&format!("\r\n--{MULTIPART_BOUNDARY}--\r\n")));
    }

    #[test]
    fn status_401_maps_to_session_expired() {
        let response = ureq::Response::new(401, "Unauthorized", "").unwrap();
        let mapped = map_request_error(ureq::Error::Status(401, response), "history");
        assert!(mapped.is_session_expired());
    }

    #[test]
    fn other_statuses_keep_operation_and_code() {
        let response = ureq::Response::new(400, "Bad Request", "").unwrap();
        let mapped = map_request_error(ureq::Error::Status(400, response), "upload");
        match mapped {
            ChemvizError::UnexpectedStatus { operation, status } => {
                assert_eq!(operation, "upload");
                assert_eq!(status, 400);
            }
            other => panic!("expected UnexpectedStatus, got {other:?}"),
        }
    }
}
