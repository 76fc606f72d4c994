use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::error::{RelayError, Result};

/// One row of the directory file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntry {
    pub github_name: String,
    pub asana_id: String,
}

/// Maps GitHub logins to Asana user ids. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<String, String>,
}

impl UserDirectory {
    /// The directory compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(include_str!("../users.json"))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            RelayError::UserDirectory(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let entries: Vec<UserEntry> = serde_json::from_str(contents)
            .map_err(|e| RelayError::UserDirectory(format!("invalid directory JSON: {}", e)))?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = UserEntry>) -> Self {
        let mut users = HashMap::new();
        for entry in entries {
            if let Some(previous) = users.insert(entry.github_name.clone(), entry.asana_id) {
                warn!(
                    "Duplicate user directory entry for {}, replacing Asana id {}",
                    entry.github_name, previous
                );
            }
        }
        Self { users }
    }

    pub fn lookup(&self, github_login: &str) -> Option<&str> {
        self.users.get(github_login).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
