//! MOLGENIS REST client
//!
//! Every outbound call goes through one pipeline: execute, detect an
//! expired session, re-login and retry at most once, decode the error
//! payload.

pub mod auth;
pub mod resources;

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::Config;
use crate::errors::Error;
use auth::AuthManager;

pub use resources::{PrincipalType, ResourceType};

const TOKEN_HEADER: &str = "x-molgenis-token";

/// Structured error as returned by the API inside an `errors` array.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ApiError>,
    #[serde(rename = "errorMessage")]
    error_message: Option<String>,
}

/// Decides whether a failed response means the session token expired.
pub type SessionExpired = fn(StatusCode, &[ApiError]) -> bool;

/// The platform reports an expired or missing session as a 401 carrying a
/// DS04 "no read metadata permission" error. The upstream contract may
/// change, so the check is swappable via
/// [`MolgenisClient::with_session_expired`].
pub fn default_session_expired(status: StatusCode, errors: &[ApiError]) -> bool {
    if status != StatusCode::UNAUTHORIZED {
        return false;
    }
    errors.first().map_or(false, |e| {
        e.code.as_deref() == Some("DS04")
            && e.message
                .as_deref()
                .map_or(false, |m| m.starts_with("No 'Read metadata' permission"))
    })
}

/// Client for the platform's REST, permission and import APIs.
pub struct MolgenisClient {
    http: Client,
    config: Config,
    auth: AuthManager,
    session_expired: SessionExpired,
}

impl MolgenisClient {
    pub fn new(config: Config) -> Result<Self, Error> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;
        let auth = AuthManager::new(http.clone(), &config);
        Ok(Self {
            http,
            config,
            auth,
            session_expired: default_session_expired,
        })
    }

    /// Replace the expired-session check.
    pub fn with_session_expired(mut self, check: SessionExpired) -> Self {
        self.session_expired = check;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }

    // ============ Request pipeline ============

    /// Execute a request with uniform header injection and error
    /// translation. At most one re-login and retry per call, however the
    /// retry ends.
    fn send<F>(&self, build: F) -> Result<Response, Error>
    where
        F: Fn(&Client, &str) -> RequestBuilder,
    {
        let mut retried = false;
        loop {
            let response = build(&self.http, &self.auth.token()).send()?;
            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            let text = response.text().unwrap_or_else(|_| String::new());
            let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();

            if !retried && (self.session_expired)(status, &body.errors) {
                retried = true;
                self.auth.login()?;
                continue;
            }

            return Err(decode_error(status, &text, body));
        }
    }

    // ============ Verb helpers ============

    pub fn get(&self, url: &str) -> Result<Response, Error> {
        self.send(|http, token| {
            http.get(url)
                .header("Content-Type", "application/json")
                .header(TOKEN_HEADER, token)
        })
    }

    pub fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<Response, Error> {
        self.send(|http, token| http.post(url).header(TOKEN_HEADER, token).json(body))
    }

    /// POST a form-encoded body (the permission manager endpoints).
    pub fn post_form(&self, url: &str, fields: &[(String, String)]) -> Result<Response, Error> {
        self.send(|http, token| http.post(url).header(TOKEN_HEADER, token).form(fields))
    }

    /// POST with query parameters and no body (import-by-url).
    pub fn post_query(&self, url: &str, params: &[(String, String)]) -> Result<Response, Error> {
        self.send(|http, token| {
            http.post(url)
                .header("Content-Type", "application/json")
                .header(TOKEN_HEADER, token)
                .query(params)
        })
    }

    /// POST a file as multipart form data. The file is buffered up front
    /// so the form can be rebuilt when the call is retried after a
    /// re-login.
    pub fn post_multipart(
        &self,
        url: &str,
        file: &Path,
        params: &[(String, String)],
    ) -> Result<Response, Error> {
        let bytes = std::fs::read(file)?;
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let mime = mime_guess::from_path(file)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        self.send(move |http, token| {
            let part = multipart::Part::bytes(bytes.clone())
                .file_name(file_name.clone())
                .mime_str(&mime)
                .expect("mime type from mime_guess is well-formed");
            let form = multipart::Form::new().part("file", part);
            http.post(url)
                .header(TOKEN_HEADER, token)
                .query(params)
                .multipart(form)
        })
    }
}

fn decode_error(status: StatusCode, text: &str, body: ErrorBody) -> Error {
    let mut messages: Vec<String> = body.errors.into_iter().filter_map(|e| e.message).collect();
    if messages.is_empty() {
        if let Some(message) = body.error_message {
            messages.push(message);
        }
    }
    if messages.is_empty() {
        let text = text.trim();
        messages.push(if text.is_empty() {
            format!("HTTP {}", status)
        } else {
            format!("HTTP {}: {}", status, text)
        });
    }
    Error::Api { messages }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(code: &str, message: &str) -> ApiError {
        ApiError {
            code: Some(code.to_string()),
            message: Some(message.to_string()),
        }
    }

    #[test]
    fn expired_session_needs_401_and_ds04() {
        let errors = [api_error("DS04", "No 'Read metadata' permission on Package.")];
        assert!(default_session_expired(StatusCode::UNAUTHORIZED, &errors));
        assert!(!default_session_expired(StatusCode::FORBIDDEN, &errors));
    }

    #[test]
    fn other_401s_are_not_expired_sessions() {
        let denied = [api_error("DS10", "No 'Read metadata' permission on Package.")];
        assert!(!default_session_expired(StatusCode::UNAUTHORIZED, &denied));

        let unrelated = [api_error("DS04", "Something else entirely")];
        assert!(!default_session_expired(StatusCode::UNAUTHORIZED, &unrelated));

        assert!(!default_session_expired(StatusCode::UNAUTHORIZED, &[]));
    }

    #[test]
    fn decode_error_aggregates_every_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"errors":[{"message":"first"},{"message":"second"}]}"#)
                .unwrap();
        let err = decode_error(StatusCode::BAD_REQUEST, "", body);
        assert_eq!(err.to_string(), "first\nsecond");
    }

    #[test]
    fn decode_error_falls_back_to_status_and_text() {
        let err = decode_error(StatusCode::INTERNAL_SERVER_ERROR, "oops", ErrorBody::default());
        assert_eq!(err.to_string(), "HTTP 500 Internal Server Error: oops");
    }
}
