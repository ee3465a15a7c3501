//! Error types for the acceptance-test harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("chromedriver failed to start: {0}")]
    DriverLaunch(String),

    #[error("chromedriver not ready after {0} status checks")]
    DriverReadiness(usize),

    #[error("element `{id}` not found after {waited_ms} ms")]
    ElementNotFound { id: String, waited_ms: u64 },

    #[error("text mismatch in `{region}`: expected {expected:?}, got {actual:?}")]
    TextMismatch {
        region: String,
        expected: String,
        actual: String,
    },

    #[error("expected to land on `{expected}`, still on `{actual}` after {waited_ms} ms")]
    Navigation {
        expected: String,
        actual: String,
        waited_ms: u64,
    },

    #[error("could not open WebDriver session: {0}")]
    NewSession(#[from] fantoccini::error::NewSessionError),

    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_not_found_names_the_identifier() {
        let err = E2eError::ElementNotFound {
            id: "loginButton".to_string(),
            waited_ms: 5000,
        };
        let msg = err.to_string();
        assert!(msg.contains("loginButton"), "message was: {msg}");
        assert!(msg.contains("5000"), "message was: {msg}");
    }

    #[test]
    fn text_mismatch_reports_both_values() {
        let err = E2eError::TextMismatch {
            region: "status".to_string(),
            expected: "success".to_string(),
            actual: "Internal server error. Please try again later.".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("status"), "message was: {msg}");
        assert!(msg.contains("success"), "message was: {msg}");
        assert!(msg.contains("Internal server error"), "message was: {msg}");
    }
}
