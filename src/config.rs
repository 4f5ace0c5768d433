//! Configuration loading (.env + environment variables)

use std::path::PathBuf;

use crate::errors::Error;

/// Load the .env file from the working directory, if there is one.
/// Variables already set in the environment win.
pub fn load_env() {
    let _ = dotenvy::dotenv();
}

/// Server connection settings, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    host: String,
    pub username: String,
    pub password: String,
}

impl Config {
    pub fn new(host: &str, username: &str, password: &str) -> Self {
        let mut host = host.to_string();
        if !host.ends_with('/') {
            host.push('/');
        }
        Self {
            host,
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Read MOLGENIS_HOST / MOLGENIS_USERNAME / MOLGENIS_PASSWORD.
    pub fn from_env() -> Result<Self, Error> {
        let host = std::env::var("MOLGENIS_HOST")
            .unwrap_or_else(|_| "http://localhost:8080/".to_string());
        let username =
            std::env::var("MOLGENIS_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let password = std::env::var("MOLGENIS_PASSWORD").map_err(|_| {
            Error::Config("missing env var: MOLGENIS_PASSWORD. Add it to your .env file.".into())
        })?;
        Ok(Self::new(&host, &username, &password))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    // ============ API endpoints ============

    pub fn login(&self) -> String {
        format!("{}api/v1/login", self.host)
    }

    pub fn rest1(&self) -> String {
        format!("{}api/v1/", self.host)
    }

    pub fn rest2(&self) -> String {
        format!("{}api/v2/", self.host)
    }

    /// Permission manager update endpoint; callers append the resource
    /// path segment and principal type.
    pub fn perm(&self) -> String {
        format!("{}menu/admin/permissionmanager/update/", self.host)
    }

    pub fn import_file(&self) -> String {
        format!("{}plugin/importwizard/importFile", self.host)
    }

    pub fn import_url(&self) -> String {
        format!("{}plugin/importwizard/importByUrl", self.host)
    }

    pub fn group(&self) -> String {
        format!("{}api/plugin/security/group", self.host)
    }

    pub fn member(&self, group: &str) -> String {
        format!("{}api/plugin/security/group/{}/member", self.host, group)
    }
}

/// Directory holding molcmd state (the history log).
///
/// Checks MOLCMD_HOME first, then falls back to ~/.molcmd.
pub fn home_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MOLCMD_HOME") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".molcmd")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_gets_a_trailing_slash() {
        let config = Config::new("http://localhost:8080", "admin", "admin");
        assert_eq!(config.host(), "http://localhost:8080/");
        assert_eq!(config.rest2(), "http://localhost:8080/api/v2/");
    }

    #[test]
    fn existing_trailing_slash_is_kept() {
        let config = Config::new("http://localhost:8080/", "admin", "admin");
        assert_eq!(config.host(), "http://localhost:8080/");
    }

    #[test]
    fn member_endpoint_interpolates_the_group() {
        let config = Config::new("http://molgenis.example.org", "admin", "admin");
        assert_eq!(
            config.member("bio-data"),
            "http://molgenis.example.org/api/plugin/security/group/bio-data/member"
        );
    }
}
