//! Session authentication
//!
//! Holds the session token and performs the credential exchange. Token
//! validity is discovered reactively by the request pipeline; no expiry
//! timer is kept.

use std::sync::Mutex;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::errors::Error;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Owns the session token. Reads and replacements go through a mutex so
/// a token swap during re-login is a single atomic step.
pub struct AuthManager {
    http: Client,
    login_url: String,
    username: String,
    password: String,
    token: Mutex<String>,
}

impl AuthManager {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            login_url: config.login(),
            username: config.username.clone(),
            password: config.password.clone(),
            token: Mutex::new(String::new()),
        }
    }

    /// Current session token; empty if never logged in.
    pub fn token(&self) -> String {
        self.token.lock().expect("token cell poisoned").clone()
    }

    /// Exchange the configured credentials for a fresh session token,
    /// replacing the current one wholesale.
    pub fn login(&self) -> Result<(), Error> {
        let response = self
            .http
            .post(&self.login_url)
            .json(&json!({"username": self.username, "password": self.password}))
            .send()
            .map_err(|e| Error::Auth(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Auth(format!(
                "server returned {} for user {}",
                response.status(),
                self.username
            )));
        }

        let body: LoginResponse = response
            .json()
            .map_err(|_| Error::Auth("login response did not contain a token".into()))?;

        *self.token.lock().expect("token cell poisoned") = body.token;
        Ok(())
    }
}
