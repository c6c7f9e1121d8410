//! Book Library Acceptance Harness
//!
//! This crate drives the Book Library web application through Playwright
//! and asserts on DOM state, navigation, and native dialog content. It:
//! - Compiles declarative scenarios into Node/Playwright scripts
//! - Runs each scenario in its own browser context and Node process
//! - Intercepts native dialogs and compares their messages verbatim
//! - Reports per-step outcomes with a failure taxonomy
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Scenario Runner (Rust)                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ScenarioRunner                                             │
//! │    ├── wait_for_app() - readiness probe                     │
//! │    ├── run_all(scenarios) -> SuiteResult                    │
//! │    └── run_scenario(s) -> ScenarioResult                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Scenario (Rust builder or YAML)                            │
//! │    ├── session: optional fixture role (login preamble)      │
//! │    └── steps: [Step]                                        │
//! │          ├── navigate { path, wait_for }                    │
//! │          ├── fill / select / click { expect_dialog? }       │
//! │          ├── expect_url / expect_url_contains               │
//! │          └── expect_visible / expect_text / expect_count    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  BrowserDriver: scenario -> Node script -> JSON outcomes    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Isolation invariant: every scenario gets a fresh browser context in a
//! fresh Node process, so no scenario can observe authentication state
//! left over from another.

pub mod catalog;
pub mod config;
pub mod error;
pub mod probe;
pub mod runner;
pub mod scenario;
pub mod script;
pub mod session;
pub mod suite;

pub use config::HarnessConfig;
pub use error::{HarnessError, HarnessResult};
pub use runner::ScenarioRunner;
pub use scenario::{Scenario, Step};
