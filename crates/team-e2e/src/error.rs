// Error types for team-e2e

use std::time::Duration;
use thiserror::Error;

/// Result type alias for suite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the data fetch layer and the page objects.
///
/// Scenario assertion failures are not represented here: they surface as
/// test harness panics from `assert!`/`assert_eq!`.
#[derive(Debug, Error)]
pub enum Error {
    /// The teams endpoint could not be reached or answered with a non-2xx status
    #[error("Network error: {0}")]
    Network(String),

    /// A payload or on-page value could not be parsed
    ///
    /// Covers malformed JSON, a missing `teams` array, missing team fields and
    /// unexpected text read off a page (status messages, progress values).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Menu selection for an app the playground registry does not model
    #[error("Unknown app '{0}'. Known apps: Sample App, Load Delay, Progress Bar")]
    UnknownApp(String),

    /// A required element never reached the awaited state
    #[error("Timeout after {timeout:?} waiting for '{selector}' to be {state}")]
    Timeout {
        selector: String,
        state: String,
        timeout: Duration,
    },

    /// Failure reported by the browser automation layer
    #[error("Browser error: {0}")]
    Browser(#[from] playwright_rs::Error),

    /// Invalid suite configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Returns true when the root cause is a wait timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Context(_, inner) => inner.is_timeout(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_names_selector_and_state() {
        let err = Error::Timeout {
            selector: "button#login".to_string(),
            state: "visible".to_string(),
            timeout: Duration::from_millis(1500),
        };
        let msg = err.to_string();
        assert!(msg.contains("button#login"));
        assert!(msg.contains("visible"));
        assert!(msg.contains("1.5s"));
    }

    #[test]
    fn test_is_timeout_sees_through_context() {
        let err = Error::Timeout {
            selector: "#progressBar".to_string(),
            state: "attached".to_string(),
            timeout: Duration::from_secs(1),
        }
        .context("Progress Bar did not load");
        assert!(err.is_timeout());
        assert!(!Error::Parse("x".to_string()).is_timeout());
    }

    #[test]
    fn test_json_errors_map_to_parse() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Parse(_)));
    }
}
