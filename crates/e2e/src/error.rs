//! Error types for the acceptance harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Playwright not found. Install with: npm install playwright && npx playwright install")]
    PlaywrightNotFound,

    #[error("Playwright error: {0}")]
    Playwright(String),

    #[error("Scenario spec parse error: {0}")]
    SpecParse(String),

    #[error("Scenario '{name}' exceeded the overall timeout of {secs}s")]
    ScenarioTimeout { name: String, secs: u64 },

    #[error("Application unreachable at {url} after {attempts} attempts")]
    AppUnreachable { url: String, attempts: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;

/// Classification of a failed step, recovered from the failure message the
/// in-browser script reports. The generated script prefixes each failure
/// with one of these markers so the report can distinguish a selector that
/// matched nothing from a wait that ran out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    LocatorNotFound,
    AmbiguousLocator,
    NavigationTimeout,
    ElementTimeout,
    DialogTimeout,
    AssertionMismatch,
    UnexpectedDialog,
    Other,
}

impl FailureKind {
    pub fn classify(message: &str) -> Self {
        if message.starts_with("locator not found") {
            Self::LocatorNotFound
        } else if message.starts_with("ambiguous locator") {
            Self::AmbiguousLocator
        } else if message.starts_with("navigation timeout") {
            Self::NavigationTimeout
        } else if message.starts_with("element timeout") {
            Self::ElementTimeout
        } else if message.starts_with("dialog timeout") {
            Self::DialogTimeout
        } else if message.starts_with("assertion mismatch")
            || message.starts_with("dialog kind mismatch")
            || message.starts_with("dialog message mismatch")
        {
            Self::AssertionMismatch
        } else if message.starts_with("unexpected") {
            Self::UnexpectedDialog
        } else {
            Self::Other
        }
    }
}
