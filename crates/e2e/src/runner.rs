//! Scenario runner: orchestrates scenarios across isolated browser contexts
//!
//! Each scenario moves through setup (optional login preamble, dialog
//! interceptor armed per declared expectation), execution, assertion, and
//! teardown, all inside its own Node process; the runner supervises the
//! process with an overall scenario timeout and aggregates per-step
//! outcomes into a suite report. Scenarios never share state: a failing
//! scenario cannot abort or contaminate its siblings, so the runner may
//! execute them in parallel across contexts.

use std::path::PathBuf;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::HarnessConfig;
use crate::error::{FailureKind, HarnessError, HarnessResult};
use crate::scenario::Scenario;
use crate::script::{BrowserDriver, ScriptReport};

/// One step's outcome, with the failure class recovered from the message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub step: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
}

/// Result of running a single scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    pub steps: Vec<StepReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure class of the abort reason or the first failed step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

/// Result of running the whole suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub finished_at: chrono::DateTime<chrono::Utc>,
    pub results: Vec<ScenarioResult>,
}

/// Drives scenarios and collects results.
pub struct ScenarioRunner {
    config: HarnessConfig,
    jobs: usize,
    output_dir: PathBuf,
}

impl ScenarioRunner {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            jobs: 1,
            output_dir: PathBuf::from("test-results"),
        }
    }

    /// Number of scenarios allowed to run concurrently, each in its own
    /// browser context.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    /// Probe the application before running anything.
    pub async fn wait_for_app(&self) -> HarnessResult<()> {
        crate::probe::wait_for_app(&self.config.base_url, self.config.timeouts.startup).await
    }

    /// Run every scenario in the list.
    pub async fn run_all(&self, scenarios: &[Scenario]) -> HarnessResult<SuiteResult> {
        BrowserDriver::check_playwright_installed()?;

        let start = Instant::now();
        info!("Running {} scenario(s) with {} job(s)...", scenarios.len(), self.jobs);

        let mut indexed: Vec<(usize, ScenarioResult)> = stream::iter(scenarios.iter().enumerate())
            .map(|(i, scenario)| async move { (i, self.run_scenario(scenario).await) })
            .buffer_unordered(self.jobs)
            .map(|(i, outcome)| {
                let result = match outcome {
                    Ok(result) => result,
                    // A harness-level error fails that scenario only;
                    // siblings keep running.
                    Err(e) => ScenarioResult {
                        name: scenarios[i].name.clone(),
                        success: false,
                        duration_ms: 0,
                        steps: vec![],
                        error: Some(e.to_string()),
                        failure: None,
                    },
                };
                (i, result)
            })
            .collect()
            .await;

        indexed.sort_by_key(|(i, _)| *i);
        let results: Vec<ScenarioResult> = indexed.into_iter().map(|(_, r)| r).collect();

        let mut passed = 0;
        let mut failed = 0;
        for result in &results {
            if result.success {
                passed += 1;
                info!("PASS {} ({} ms)", result.name, result.duration_ms);
            } else {
                failed += 1;
                error!(
                    "FAIL {} - {}",
                    result.name,
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Suite finished: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        Ok(SuiteResult {
            total: results.len(),
            passed,
            failed,
            duration_ms,
            finished_at: chrono::Utc::now(),
            results,
        })
    }

    /// Run only the scenarios carrying a tag.
    pub async fn run_tagged(&self, scenarios: &[Scenario], tag: &str) -> HarnessResult<SuiteResult> {
        let filtered: Vec<Scenario> = scenarios
            .iter()
            .filter(|s| s.tags.iter().any(|t| t == tag))
            .cloned()
            .collect();
        self.run_all(&filtered).await
    }

    /// Run one scenario to completion or its timeout, whichever is first.
    pub async fn run_scenario(&self, scenario: &Scenario) -> HarnessResult<ScenarioResult> {
        let start = Instant::now();
        debug!("Running scenario: {}", scenario.name);

        let driver = BrowserDriver::new(self.config.clone());
        let deadline = self.config.timeouts.scenario;

        let report = tokio::time::timeout(deadline, driver.run_scenario(scenario))
            .await
            .map_err(|_| HarnessError::ScenarioTimeout {
                name: scenario.name.clone(),
                secs: deadline.as_secs(),
            })??;

        Ok(summarize(
            &scenario.name,
            &report,
            start.elapsed().as_millis() as u64,
        ))
    }

    /// Write the suite result as pretty JSON.
    pub fn write_results(&self, results: &SuiteResult) -> HarnessResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

/// Fold a script report into a scenario result, classifying the abort
/// reason and every failing step.
fn summarize(name: &str, report: &ScriptReport, duration_ms: u64) -> ScenarioResult {
    let steps: Vec<StepReport> = report
        .outcomes
        .iter()
        .map(|o| StepReport {
            step: o.step.clone(),
            ok: o.ok,
            kind: o.error.as_deref().map(FailureKind::classify),
            error: o.error.clone(),
        })
        .collect();

    let error = report.aborted.clone().or_else(|| {
        steps
            .iter()
            .find(|s| !s.ok)
            .and_then(|s| s.error.clone())
    });
    let failure = report
        .aborted
        .as_deref()
        .map(FailureKind::classify)
        .or_else(|| steps.iter().find(|s| !s.ok).and_then(|s| s.kind));

    ScenarioResult {
        name: name.to_string(),
        success: report.success(),
        duration_ms,
        steps,
        error,
        failure,
    }
}
