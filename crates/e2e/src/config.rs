//! Harness configuration: base URL, fixture users, browser, timeouts

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Process-wide configuration for a suite run. Everything scenario scripts
/// need to know about the environment lives here so the same suite can be
/// pointed at different deployments.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Base URL of the application under test
    pub base_url: String,

    /// Browser engine to drive
    pub browser: Browser,

    /// Run the browser headless
    pub headless: bool,

    /// Viewport dimensions
    pub viewport: Viewport,

    /// Pre-seeded accounts the suite depends on
    pub fixtures: FixtureUsers,

    /// Wait bounds applied inside scenarios
    pub timeouts: Timeouts,

    /// Directory receiving failure screenshots
    pub artifacts_dir: PathBuf,

    /// Node binary used to run the generated scripts
    pub node_binary: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            browser: Browser::Chromium,
            headless: true,
            viewport: Viewport { width: 1280, height: 720 },
            fixtures: FixtureUsers::default(),
            timeouts: Timeouts::default(),
            artifacts_dir: PathBuf::from("test-results/artifacts"),
            node_binary: PathBuf::from("node"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::str::FromStr for Browser {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(format!("unsupported browser: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// The role a scenario logs in as. Roles are relative to the reference
/// book on the catalog page: the creator fixture authored it, the
/// non-creator fixture did not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Creator,
    NonCreator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// The two pre-seeded accounts every deployment of the test environment
/// carries. The creator fixture must own at least one book that sorts
/// first on the catalog page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureUsers {
    pub creator: Credentials,
    pub non_creator: Credentials,
}

impl Default for FixtureUsers {
    fn default() -> Self {
        Self {
            creator: Credentials {
                email: "peter@abv.bg".to_string(),
                password: "123456".to_string(),
            },
            non_creator: Credentials {
                email: "john@abv.bg".to_string(),
                password: "123456".to_string(),
            },
        }
    }
}

impl FixtureUsers {
    pub fn credentials(&self, role: Role) -> &Credentials {
        match role {
            Role::Creator => &self.creator,
            Role::NonCreator => &self.non_creator,
        }
    }
}

/// Wait bounds. Every suspension point inside a scenario is bounded by one
/// of these; the scenario-level bound caps the whole Node process.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    /// Waiting for a route change to settle
    pub navigation_ms: u64,

    /// Waiting for an element to appear or become visible
    pub element_ms: u64,

    /// Waiting for an armed dialog to fire
    pub dialog_ms: u64,

    /// Ceiling on one scenario end to end
    pub scenario: Duration,

    /// Ceiling on the application readiness probe
    pub startup: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            navigation_ms: 10_000,
            element_ms: 5_000,
            dialog_ms: 5_000,
            scenario: Duration::from_secs(60),
            startup: Duration::from_secs(30),
        }
    }
}

/// Build a registration email that cannot collide with earlier runs
/// against the same backend store.
pub fn unique_email(prefix: &str) -> String {
    format!("{}{}@example.com", prefix, chrono::Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_environment() {
        let config = HarnessConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.fixtures.creator.email, "peter@abv.bg");
        assert_eq!(config.fixtures.non_creator.email, "john@abv.bg");
        assert!(config.headless);
    }

    #[test]
    fn test_unique_email_prefix_and_domain() {
        let email = unique_email("testuser");
        assert!(email.starts_with("testuser"));
        assert!(email.ends_with("@example.com"));
    }

    #[test]
    fn test_browser_from_str() {
        assert!(matches!("firefox".parse::<Browser>(), Ok(Browser::Firefox)));
        assert!(matches!("Chromium".parse::<Browser>(), Ok(Browser::Chromium)));
        assert!("opera".parse::<Browser>().is_err());
    }
}
