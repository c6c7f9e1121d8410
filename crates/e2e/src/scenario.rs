//! Scenario model: one independent test case as data
//!
//! A scenario is an ordered action list plus declared expectations, fixed
//! at suite-definition time and immutable during execution. The built-in
//! suite constructs scenarios in Rust; additional scenarios can be loaded
//! from YAML files with the same shape.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Role;
use crate::error::{HarnessError, HarnessResult};

/// A complete scenario: setup requirement, steps, and tags for filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique name for this scenario
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,

    /// Fixture role to log in as before the steps run, if any
    #[serde(default)]
    pub session: Option<Role>,

    /// Steps executed in order
    pub steps: Vec<Step>,
}

/// A single step. Actions abort the scenario when they fail; expectations
/// are evaluated independently so one mismatch never hides the next.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Go to a path relative to the base URL, then wait for the route's
    /// defining element. Never a fixed sleep.
    Navigate {
        path: String,
        #[serde(default)]
        wait_for: Option<String>,
    },

    /// Fill an input field
    Fill { selector: String, value: String },

    /// Select an option from a dropdown
    Select { selector: String, value: String },

    /// Click an element. If the click is expected to trigger a native
    /// dialog, the expectation is declared here so the interceptor is
    /// armed before the click is issued.
    Click {
        selector: String,
        #[serde(default)]
        expect_dialog: Option<DialogExpectation>,
    },

    /// Expect the browser to settle on this path
    ExpectUrl { path: String },

    /// Expect the current URL to contain a fragment (detail routes carry
    /// generated ids)
    ExpectUrlContains { fragment: String },

    /// Expect an element to be visible (or absent/hidden)
    ExpectVisible {
        selector: String,
        #[serde(default = "default_true")]
        visible: bool,
    },

    /// Expect an element's text content to match
    ExpectText {
        selector: String,
        #[serde(default)]
        equals: Option<String>,
        #[serde(default)]
        non_empty: bool,
    },

    /// Expect a collection selector to match at least this many elements
    ExpectCount { selector: String, at_least: usize },
}

fn default_true() -> bool {
    true
}

/// Native dialog kinds the application raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogKind {
    Alert,
    Confirm,
}

impl DialogKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DialogKind::Alert => "alert",
            DialogKind::Confirm => "confirm",
        }
    }
}

/// An expected native dialog: kind and exact message text. The message is
/// part of the application's external contract and is compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogExpectation {
    pub kind: DialogKind,
    pub message: String,
}

impl DialogExpectation {
    pub fn alert(message: impl Into<String>) -> Self {
        Self { kind: DialogKind::Alert, message: message.into() }
    }
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
            session: None,
            steps: Vec::new(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn as_user(mut self, role: Role) -> Self {
        self.session = Some(role);
        self
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Parse a scenario from a YAML string. The name is embedded in script
    /// and screenshot file paths, so it is restricted to a path-safe
    /// alphabet.
    pub fn from_yaml(yaml: &str) -> HarnessResult<Self> {
        let scenario: Self = serde_yaml::from_str(yaml).map_err(HarnessError::from)?;
        validate_name(&scenario.name)?;
        Ok(scenario)
    }

    /// Parse a scenario from a YAML file
    pub fn from_file(path: &Path) -> HarnessResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| {
            HarnessError::SpecParse(format!("{}: {}", path.display(), e))
        })
    }

    /// Load all scenarios from a directory tree
    pub fn load_all(dir: &Path) -> HarnessResult<Vec<Self>> {
        let mut scenarios = Vec::new();

        for entry in walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            scenarios.push(Self::from_file(entry.path())?);
        }

        Ok(scenarios)
    }

    /// Whether any step declares a dialog expectation
    pub fn expects_dialog(&self) -> bool {
        self.steps.iter().any(|s| {
            matches!(s, Step::Click { expect_dialog: Some(_), .. })
        })
    }
}

/// Scenario names become `<name>.js` and `<name>.png` file names; anything
/// outside ASCII alphanumerics plus `-`, `_`, `.` is rejected, as is a
/// leading dot.
fn validate_name(name: &str) -> HarnessResult<()> {
    let safe = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if safe {
        Ok(())
    } else {
        Err(HarnessError::SpecParse(format!(
            "scenario name {:?} is not file-safe (allowed: ASCII alphanumerics, '-', '_', '.', no leading '.')",
            name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login_scenario() {
        let yaml = r#"
name: login-valid
description: Valid fixture credentials land on the catalog
tags:
  - auth
  - smoke
steps:
  - action: navigate
    path: /login
    wait_for: nav.navbar
  - action: fill
    selector: input[name="email"]
    value: peter@abv.bg
  - action: fill
    selector: input[name="password"]
    value: "123456"
  - action: click
    selector: input[type="submit"]
  - action: expect_url
    path: /catalog
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();
        assert_eq!(scenario.name, "login-valid");
        assert_eq!(scenario.steps.len(), 5);
        assert!(scenario.session.is_none());
        assert!(!scenario.expects_dialog());
    }

    #[test]
    fn test_parse_dialog_expectation() {
        let yaml = r#"
name: login-empty
session: creator
steps:
  - action: navigate
    path: /login
  - action: click
    selector: input[type="submit"]
    expect_dialog:
      kind: alert
      message: "All fields are required!"
  - action: expect_url
    path: /login
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();
        assert_eq!(scenario.session, Some(Role::Creator));
        assert!(scenario.expects_dialog());

        match &scenario.steps[1] {
            Step::Click { expect_dialog: Some(d), .. } => {
                assert_eq!(d.kind, DialogKind::Alert);
                assert_eq!(d.message, "All fields are required!");
            }
            other => panic!("unexpected step: {:?}", other),
        }
    }

    #[test]
    fn test_visible_defaults_to_true() {
        let yaml = r#"
name: nav-check
steps:
  - action: expect_visible
    selector: a[href="/catalog"]
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();
        match &scenario.steps[0] {
            Step::ExpectVisible { visible, .. } => assert!(*visible),
            other => panic!("unexpected step: {:?}", other),
        }
    }

    #[test]
    fn test_path_hostile_names_are_rejected() {
        for name in ["../escape", "a/b", "name with spaces", ".hidden", "", "nul\0byte"] {
            let yaml = format!(
                "name: \"{}\"\nsteps:\n  - action: expect_url\n    path: /catalog\n",
                name.replace('\\', "\\\\").replace('\0', "\\0")
            );
            let err = Scenario::from_yaml(&yaml).unwrap_err();
            assert!(
                matches!(err, HarnessError::SpecParse(_)),
                "name {:?} should be rejected, got {:?}",
                name,
                err
            );
        }

        let ok = "name: details-controls_v2.guest\nsteps:\n  - action: expect_url\n    path: /catalog\n";
        assert!(Scenario::from_yaml(ok).is_ok());
    }

    #[test]
    fn test_builder_is_equivalent_to_yaml() {
        let built = Scenario::new("logout-visible")
            .describe("Logout button shows for a logged-in user")
            .tag("auth")
            .as_user(Role::Creator)
            .step(Step::ExpectVisible { selector: "#logoutBtn".into(), visible: true });

        assert_eq!(built.session, Some(Role::Creator));
        assert_eq!(built.tags, vec!["auth".to_string()]);
        assert_eq!(built.steps.len(), 1);
    }
}
