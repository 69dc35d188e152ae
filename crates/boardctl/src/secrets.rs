//! Credential resolution: environment, then `secrets.json`, then prompt.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Resolved Trello API key and token.
#[derive(Debug, Clone)]
pub struct TrelloCredentials {
    pub key: String,
    pub token: String,
}

/// Contents of the local `secrets.json` file.
///
/// A missing or unparseable file behaves like an empty one; the environment
/// and the interactive prompt cover the rest of the fallback chain.
#[derive(Debug, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    trello: TrelloSecrets,
    #[serde(default)]
    slack: SlackSecrets,
    // Legacy top-level keys from early setups.
    #[serde(default, rename = "TRELLO_API_KEY")]
    legacy_api_key: Option<String>,
    #[serde(default, rename = "TRELLO_TOKEN")]
    legacy_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TrelloSecrets {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    token: Option<String>,
    /// Everything else under `"trello"`, including per-person
    /// `member_username_<name>` overrides.
    #[serde(default, flatten)]
    extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct SlackSecrets {
    #[serde(default)]
    token: Option<String>,
}

/// A trimmed, non-empty environment variable.
fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn nonempty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn prompt(label: &str) -> Option<String> {
    dialoguer::Input::<String>::new()
        .with_prompt(label)
        .interact_text()
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn prompt_secret(label: &str) -> Option<String> {
    dialoguer::Password::new()
        .with_prompt(label)
        .interact()
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Secrets {
    /// Load the secrets file, treating a missing or invalid file as empty.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                debug!(path = %path.display(), error = %e, "Ignoring unparseable secrets file");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    fn trello_key(&self) -> Option<String> {
        nonempty(&self.trello.api_key).or_else(|| nonempty(&self.legacy_api_key))
    }

    fn trello_token(&self) -> Option<String> {
        nonempty(&self.trello.token).or_else(|| nonempty(&self.legacy_token))
    }

    /// Resolve Trello credentials: env, then this file, then prompt.
    ///
    /// # Errors
    /// Returns error when no tier yields both a key and a token; callers
    /// treat this as a precondition failure.
    pub fn trello_credentials(&self) -> Result<TrelloCredentials> {
        let key = env_nonempty("TRELLO_API_KEY")
            .or_else(|| self.trello_key())
            .or_else(|| prompt("Trello API Key"));
        let token = env_nonempty("TRELLO_TOKEN")
            .or_else(|| self.trello_token())
            .or_else(|| prompt_secret("Trello Token"));

        match (key, token) {
            (Some(key), Some(token)) => Ok(TrelloCredentials { key, token }),
            _ => bail!("Need Trello API key and token."),
        }
    }

    /// Resolve a Slack bot token: env, then this file, then prompt.
    ///
    /// # Errors
    /// Returns error when no tier yields a token.
    pub fn slack_token(&self) -> Result<String> {
        env_nonempty("SLACK_TOKEN")
            .or_else(|| nonempty(&self.slack.token))
            .or_else(|| prompt_secret("Slack token"))
            .context("Need a Slack token (SLACK_TOKEN, secrets.json, or prompt).")
    }

    /// Look up a per-person Trello username override
    /// (`trello.member_username_<person>` in the file, then
    /// `TRELLO_USERNAME_<PERSON>` in the environment).
    pub fn member_username(&self, person: &str) -> Option<String> {
        let key = format!("member_username_{person}");
        self.trello
            .extra
            .get(&key)
            .and_then(|v| v.as_str())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .or_else(|| env_nonempty(&format!("TRELLO_USERNAME_{}", person.to_uppercase())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_secrets(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_nested_trello_section() {
        let file = write_secrets(
            r#"{ "trello": { "api_key": " k1 ", "token": "t1", "member_username_moaz": "moazelhag" } }"#,
        );
        let secrets = Secrets::load(file.path());
        assert_eq!(secrets.trello_key().as_deref(), Some("k1"));
        assert_eq!(secrets.trello_token().as_deref(), Some("t1"));
        assert_eq!(secrets.member_username("moaz").as_deref(), Some("moazelhag"));
    }

    #[test]
    fn falls_back_to_legacy_top_level_keys() {
        let file = write_secrets(r#"{ "TRELLO_API_KEY": "legacy-k", "TRELLO_TOKEN": "legacy-t" }"#);
        let secrets = Secrets::load(file.path());
        assert_eq!(secrets.trello_key().as_deref(), Some("legacy-k"));
        assert_eq!(secrets.trello_token().as_deref(), Some("legacy-t"));
    }

    #[test]
    fn nested_section_wins_over_legacy_keys() {
        let file = write_secrets(
            r#"{ "trello": { "api_key": "k", "token": "t" }, "TRELLO_API_KEY": "legacy" }"#,
        );
        let secrets = Secrets::load(file.path());
        assert_eq!(secrets.trello_key().as_deref(), Some("k"));
    }

    #[test]
    fn missing_or_invalid_file_is_empty() {
        let secrets = Secrets::load(Path::new("/nonexistent/secrets.json"));
        assert!(secrets.trello_key().is_none());

        let file = write_secrets("not json at all");
        let secrets = Secrets::load(file.path());
        assert!(secrets.trello_key().is_none());
    }

    #[test]
    fn slack_token_reads_nested_section() {
        let file = write_secrets(r#"{ "slack": { "token": "xoxb-1" } }"#);
        let secrets = Secrets::load(file.path());
        assert_eq!(nonempty(&secrets.slack.token).as_deref(), Some("xoxb-1"));
    }

    #[test]
    fn unknown_member_returns_none() {
        let file = write_secrets(r#"{ "trello": { "api_key": "k" } }"#);
        let secrets = Secrets::load(file.path());
        assert_eq!(secrets.member_username("nobody_xyzzy"), None);
    }
}
