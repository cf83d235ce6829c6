//! Credential loading from the local `.env` file.
//!
//! The file is plain `KEY=VALUE` lines with optional quoting, `#` comments and
//! blank lines. Everything is resolved once into a [`Config`] value that the
//! tools pass into each client; nothing global, nothing mutable.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

/// Key holding the base endpoint URL.
pub const URL_KEY: &str = "VITE_SUPABASE_URL";
/// Key holding the privileged service-role credential.
pub const SERVICE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
/// Key holding the public anon credential (fallback).
pub const ANON_KEY: &str = "VITE_SUPABASE_ANON_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing VITE_SUPABASE_URL in {0}")]
    MissingUrl(String),
    #[error("no credential in {0} (need SUPABASE_SERVICE_ROLE_KEY or VITE_SUPABASE_ANON_KEY)")]
    MissingKey(String),
}

/// Which credential ended up in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    /// Service-role key: full read/write on storage and tables
    ServiceRole,
    /// Anon key: writes may be rejected by row-level policies
    Anon,
}

/// Resolved connection settings for the remote backend.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base endpoint URL, without a trailing slash
    pub base_url: String,
    pub api_key: String,
    pub credential: Credential,
}

impl Config {
    /// Load and resolve credentials from a `.env` file.
    ///
    /// The service-role key wins over the anon key when both are present.
    /// A missing URL or missing credential is fatal for every tool, so both
    /// are errors here rather than at the call sites.
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        let vars = load_env_file(path);
        let shown = path.display().to_string();

        let base_url = vars
            .get(URL_KEY)
            .map(|url| url.trim_end_matches('/').to_string())
            .ok_or_else(|| ConfigError::MissingUrl(shown.clone()))?;

        let (api_key, credential) = if let Some(key) = vars.get(SERVICE_KEY) {
            (key.clone(), Credential::ServiceRole)
        } else if let Some(key) = vars.get(ANON_KEY) {
            (key.clone(), Credential::Anon)
        } else {
            return Err(ConfigError::MissingKey(shown));
        };

        Ok(Config {
            base_url,
            api_key,
            credential,
        })
    }
}

/// Read a `.env` file into a key → value map.
///
/// An absent file is an empty map, not an error; required keys are the
/// caller's problem.
pub fn load_env_file(path: &Path) -> HashMap<String, String> {
    match fs::read_to_string(path) {
        Ok(contents) => parse_env(&contents),
        Err(_) => HashMap::new(),
    }
}

/// Parse `KEY=VALUE` lines, skipping blanks and `#` comments.
/// One layer of surrounding single or double quotes is stripped from values.
pub fn parse_env(contents: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            vars.insert(key.trim().to_string(), value.to_string());
        }
    }

    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_quotes_comments_and_blanks() {
        let contents = r#"
# backend credentials
VITE_SUPABASE_URL="https://example.supabase.co"
SUPABASE_SERVICE_ROLE_KEY='secret-key'

NOT_A_LINE
PLAIN=value
"#;
        let vars = parse_env(contents);
        assert_eq!(
            vars.get(URL_KEY).map(String::as_str),
            Some("https://example.supabase.co")
        );
        assert_eq!(vars.get(SERVICE_KEY).map(String::as_str), Some("secret-key"));
        assert_eq!(vars.get("PLAIN").map(String::as_str), Some("value"));
        assert!(!vars.contains_key("NOT_A_LINE"));
    }

    #[test]
    fn missing_file_is_empty_map() {
        let vars = load_env_file(Path::new("/nonexistent/.env"));
        assert!(vars.is_empty());
    }

    #[test]
    fn service_role_key_wins_over_anon() {
        let dir = tempfile::TempDir::new().unwrap();
        let env_path = dir.path().join(".env");
        let mut file = fs::File::create(&env_path).unwrap();
        writeln!(file, "{}=https://example.supabase.co/", URL_KEY).unwrap();
        writeln!(file, "{}=anon-key", ANON_KEY).unwrap();
        writeln!(file, "{}=service-key", SERVICE_KEY).unwrap();

        let config = Config::from_env_file(&env_path).unwrap();
        assert_eq!(config.api_key, "service-key");
        assert_eq!(config.credential, Credential::ServiceRole);
        // trailing slash is normalized away
        assert_eq!(config.base_url, "https://example.supabase.co");
    }

    #[test]
    fn falls_back_to_anon_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let env_path = dir.path().join(".env");
        let mut file = fs::File::create(&env_path).unwrap();
        writeln!(file, "{}=https://example.supabase.co", URL_KEY).unwrap();
        writeln!(file, "{}=anon-key", ANON_KEY).unwrap();

        let config = Config::from_env_file(&env_path).unwrap();
        assert_eq!(config.api_key, "anon-key");
        assert_eq!(config.credential, Credential::Anon);
    }

    #[test]
    fn missing_credentials_are_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let env_path = dir.path().join(".env");
        let mut file = fs::File::create(&env_path).unwrap();
        writeln!(file, "{}=https://example.supabase.co", URL_KEY).unwrap();

        let err = Config::from_env_file(&env_path).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey(_)));

        let err = Config::from_env_file(Path::new("/nonexistent/.env")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingUrl(_)));
    }
}
