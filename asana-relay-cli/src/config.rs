use anyhow::Result;
use asana_relay_core::comment::DEFAULT_SERVICE_LOGIN;
use asana_relay_core::DEFAULT_ACTION_URL;
use std::env;
use std::path::PathBuf;

/// Settings read from the GitHub Actions runner environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub event_name: Option<String>,
    pub event_path: Option<PathBuf>,
    /// File that step outputs are appended to (`GITHUB_OUTPUT`).
    pub output_path: Option<PathBuf>,
    pub allowed_projects: String,
    pub blocked_projects: String,
    pub comment_text: String,
    pub action_url: String,
    /// Integration secret, sent as a bearer token when present.
    pub asana_secret: Option<String>,
    pub service_login: String,
    /// Replaces the built-in user directory when set.
    pub user_directory: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let input = |name: &str| parse_optional(lookup(&input_variable(name)));

        let action_url = input("action-url").unwrap_or_else(|| DEFAULT_ACTION_URL.to_string());
        if !action_url.starts_with("http://") && !action_url.starts_with("https://") {
            anyhow::bail!("action-url must be an http(s) URL, got {}", action_url);
        }

        Ok(Config {
            event_name: parse_optional(lookup("GITHUB_EVENT_NAME")),
            event_path: parse_optional(lookup("GITHUB_EVENT_PATH")).map(PathBuf::from),
            output_path: parse_optional(lookup("GITHUB_OUTPUT")).map(PathBuf::from),
            allowed_projects: input("allowed-projects").unwrap_or_default(),
            blocked_projects: input("blocked-projects").unwrap_or_default(),
            comment_text: lookup(&input_variable("comment-text")).unwrap_or_default(),
            action_url,
            asana_secret: input("asana-secret"),
            service_login: input("service-login")
                .unwrap_or_else(|| DEFAULT_SERVICE_LOGIN.to_string()),
            user_directory: input("user-directory").map(PathBuf::from),
        })
    }
}

/// Name of the variable the runner uses for an action input: `INPUT_` plus the
/// upper-cased input name with spaces replaced by underscores.
pub fn input_variable(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Treats missing, empty and whitespace-only values as unset.
pub fn parse_optional(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
