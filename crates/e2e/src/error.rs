//! Error types for acceptance runs

use std::time::Duration;
use thiserror::Error;

/// Failure reported by a [`UiDriver`](crate::driver::UiDriver) call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error("No element matches selector '{0}'")]
    ElementNotFound(String),

    #[error("Timeout after {}s waiting for '{selector}'", .timeout.as_secs())]
    Timeout { selector: String, timeout: Duration },

    #[error("Interaction with '{selector}' failed: {reason}")]
    Interaction { selector: String, reason: String },

    #[error("Browser session lost: {0}")]
    Session(String),
}

impl DriverError {
    /// True when the session itself is unusable and no further case can run
    pub fn is_fatal(&self) -> bool {
        matches!(self, DriverError::Session(_))
    }
}

pub type DriverResult<T> = Result<T, DriverError>;

/// Failure of a single test case action
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaseError {
    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl CaseError {
    pub fn is_fatal(&self) -> bool {
        match self {
            CaseError::Driver(e) => e.is_fatal(),
            CaseError::Assertion(_) => false,
        }
    }
}

/// Run-level failure; nothing here is contained to a single case
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Browser failed to start: {0}")]
    BrowserStartup(String),

    #[error("Navigation to {url} failed: {source}")]
    Navigation { url: String, source: DriverError },

    #[error("Fatal session failure in {case}: {source}")]
    Session { case: String, source: DriverError },

    #[error(transparent)]
    Common(#[from] mindgames_common::Error),
}

pub type RunResult<T> = Result<T, RunError>;
