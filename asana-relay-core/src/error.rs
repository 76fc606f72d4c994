use thiserror::Error;

pub type Result<T> = std::result::Result<T, RelayError>;

#[derive(Debug, Error)]
pub enum RelayError {
    /// The workflow was triggered by an event this action does not handle.
    #[error("Unsupported trigger '{0}': only pull_request, pull_request_review, issue_comment and pull_request_review_comment events are supported")]
    UnsupportedTrigger(String),

    #[error("Invalid project configuration: {0}")]
    InvalidProjectConfiguration(String),

    /// The payload does not carry a record its event kind requires.
    #[error("Event payload is missing '{0}'")]
    MissingField(&'static str),

    #[error("Failed to load user directory: {0}")]
    UserDirectory(String),

    /// The endpoint answered with an error status, or the request never completed.
    #[error("{}", transport_message(.status, .detail))]
    Transport { status: Option<u16>, detail: String },

    #[error("{0}")]
    Unknown(String),
}

fn transport_message(status: &Option<u16>, detail: &str) -> String {
    match status {
        Some(code) => format!("Request failed with status code {}: {}", code, detail),
        None => format!("Request failed: {}", detail),
    }
}

impl RelayError {
    /// Wraps an arbitrary error, keeping its message or falling back to a marker.
    pub fn unknown(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            RelayError::Unknown(UNKNOWN_ERROR.to_string())
        } else {
            RelayError::Unknown(message)
        }
    }
}

pub const UNKNOWN_ERROR: &str = "Unknown error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_with_status() {
        let err = RelayError::Transport {
            status: Some(401),
            detail: "bad token".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request failed with status code 401: bad token"
        );
    }

    #[test]
    fn test_transport_message_without_status() {
        let err = RelayError::Transport {
            status: None,
            detail: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed: connection refused");
    }

    #[test]
    fn test_unknown_without_message_uses_marker() {
        assert_eq!(RelayError::unknown("").to_string(), "Unknown error");
        assert_eq!(RelayError::unknown("  ").to_string(), "Unknown error");
        assert_eq!(RelayError::unknown("boom").to_string(), "boom");
    }
}
