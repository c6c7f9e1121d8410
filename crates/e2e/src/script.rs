//! Playwright script generation and execution
//!
//! A whole scenario compiles to one Node script against the `playwright`
//! library: context setup, the dialog interceptor, the optional login
//! preamble, then the step list. Actions run bare and abort the scenario
//! on failure; expectations run inside `check(...)` so every declared
//! assertion reports independently. The script prints a single JSON line
//! with per-step outcomes, which this module parses back.

use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::scenario::{DialogExpectation, Scenario, Step};
use crate::session;

/// Outcome of one step as reported by the in-browser script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step: String,
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Everything the script reports back: the outcome list plus the abort
/// reason if an action (rather than an expectation) failed mid-scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptReport {
    pub outcomes: Vec<StepOutcome>,
    #[serde(default)]
    pub aborted: Option<String>,
}

impl ScriptReport {
    pub fn success(&self) -> bool {
        self.aborted.is_none() && self.outcomes.iter().all(|o| o.ok)
    }
}

/// Compiles scenarios to Playwright scripts and runs them under Node.
pub struct BrowserDriver {
    config: HarnessConfig,
}

impl BrowserDriver {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Check that Node can resolve the playwright package.
    pub fn check_playwright_installed() -> HarnessResult<()> {
        let status = Command::new("node")
            .args(["-e", "require('playwright')"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(s) if s.success() => Ok(()),
            _ => Err(HarnessError::PlaywrightNotFound),
        }
    }

    /// Run one scenario in a fresh Node process and parse its report.
    pub async fn run_scenario(&self, scenario: &Scenario) -> HarnessResult<ScriptReport> {
        std::fs::create_dir_all(&self.config.artifacts_dir)?;

        let script = self.build_script(scenario);
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join(format!("{}.js", scenario.name));
        std::fs::write(&script_path, &script)?;

        debug!("Running scenario script: {}", script_path.display());

        // kill_on_drop takes the browser down with us when the runner's
        // scenario timeout drops this future mid-flight.
        let output = TokioCommand::new(&self.config.node_binary)
            .arg(&script_path)
            .kill_on_drop(true)
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        // The report is the last JSON object line on stdout; anything else
        // the page logged is ignored.
        let report_line = stdout
            .lines()
            .rev()
            .find(|line| line.trim_start().starts_with('{'));

        match report_line {
            Some(line) => Ok(serde_json::from_str(line.trim())?),
            None => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(HarnessError::Playwright(format!(
                    "scenario '{}' produced no report:\nstdout: {}\nstderr: {}",
                    scenario.name, stdout, stderr
                )))
            }
        }
    }

    /// Build the complete Node script for a scenario.
    pub fn build_script(&self, scenario: &Scenario) -> String {
        let mut script = String::new();
        let screenshot_path = self
            .config
            .artifacts_dir
            .join(format!("{}.png", scenario.name));

        script.push_str(&format!(
            r#"const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const outcomes = [];
  const record = (step, ok, error) =>
    outcomes.push(error === undefined ? {{ step, ok }} : {{ step, ok, error }});
  const check = async (step, fn) => {{
    try {{ await fn(); record(step, true); }}
    catch (e) {{ record(step, false, e.message); }}
  }};
  // Actions abort the scenario; rethrow with the failure-class marker so
  // the report can tell an element wait from a navigation wait.
  const act = async (marker, fn) => {{
    try {{ await fn(); }}
    catch (e) {{ throw new Error(marker + ': ' + e.message); }}
  }};

  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  const baseUrl = '{base_url}';

  // Dialog interceptor. An armed expectation captures the dialog and
  // accepts it; any dialog with nothing armed is a hard failure.
  let armed = null;
  page.on('dialog', dialog => {{
    if (armed && !armed.fired) {{
      armed.fired = true;
      armed.observedKind = dialog.type();
      armed.observedMessage = dialog.message();
      dialog.accept().catch(() => {{}});
    }} else {{
      record('dialog', false,
        'unexpected ' + dialog.type() + ' dialog: ' + dialog.message());
      dialog.dismiss().catch(() => {{}});
    }}
  }});
  const awaitDialog = async (timeoutMs) => {{
    const deadline = Date.now() + timeoutMs;
    while (!armed.fired && Date.now() < deadline) {{
      await new Promise(r => setTimeout(r, 50));
    }}
    return armed.fired;
  }};

  let aborted = null;
  try {{
"#,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = self.config.viewport.width,
            height = self.config.viewport.height,
            base_url = js_quote(&self.config.base_url),
        ));

        if let Some(role) = scenario.session {
            script.push_str(&session::login_preamble(&self.config, role));
        }

        for (i, step) in scenario.steps.iter().enumerate() {
            script.push_str(&format!("\n    // step {}: {}\n", i + 1, step_label(step)));
            script.push_str(&self.step_js(step));
        }

        script.push_str(&format!(
            r#"  }} catch (e) {{
    aborted = e.message;
  }} finally {{
    if (aborted !== null || outcomes.some(o => !o.ok)) {{
      try {{
        await page.screenshot({{ path: '{screenshot}', fullPage: true }});
      }} catch (_) {{}}
    }}
    await browser.close();
  }}
  console.log(JSON.stringify({{ outcomes, aborted }}));
}})();
"#,
            screenshot = js_quote(&screenshot_path.to_string_lossy()),
        ));

        script
    }

    fn step_js(&self, step: &Step) -> String {
        let nav = self.config.timeouts.navigation_ms;
        let elem = self.config.timeouts.element_ms;
        let dialog_ms = self.config.timeouts.dialog_ms;

        match step {
            Step::Navigate { path, wait_for } => {
                let path = js_quote(path);
                let mut js = format!(
                    "    await act('navigation timeout: {path}', () => page.goto(baseUrl + '{path}'));\n",
                    path = path
                );
                if let Some(selector) = wait_for {
                    let sel = js_quote(selector);
                    js.push_str(&format!(
                        "    await act('element timeout: {sel}', () => page.waitForSelector('{sel}', {{ timeout: {elem} }}));\n",
                        sel = sel,
                        elem = elem
                    ));
                }
                js
            }
            Step::Fill { selector, value } => format!(
                "    await act('element timeout: {sel}', () => page.fill('{sel}', '{value}', {{ timeout: {elem} }}));\n",
                sel = js_quote(selector),
                value = js_quote(value),
                elem = elem
            ),
            Step::Select { selector, value } => format!(
                "    await act('element timeout: {sel}', () => page.selectOption('{sel}', '{value}', {{ timeout: {elem} }}));\n",
                sel = js_quote(selector),
                value = js_quote(value),
                elem = elem
            ),
            Step::Click { selector, expect_dialog: None } => format!(
                "    await act('element timeout: {sel}', () => page.click('{sel}', {{ timeout: {elem} }}));\n",
                sel = js_quote(selector),
                elem = elem
            ),
            Step::Click { selector, expect_dialog: Some(expected) } => {
                self.dialog_click_js(selector, expected, elem, dialog_ms)
            }
            Step::ExpectUrl { path } => format!(
                r#"    await check('expect_url:{label}', async () => {{
      try {{
        await page.waitForURL(baseUrl + '{path}', {{ timeout: {nav} }});
      }} catch (e) {{
        throw new Error('navigation timeout: expected {label}, at ' + page.url());
      }}
    }});
"#,
                label = js_quote(path),
                path = js_quote(path),
                nav = nav
            ),
            Step::ExpectUrlContains { fragment } => format!(
                r#"    await check('expect_url_contains:{frag}', async () => {{
      const deadline = Date.now() + {nav};
      while (!page.url().includes('{frag}') && Date.now() < deadline) {{
        await new Promise(r => setTimeout(r, 50));
      }}
      if (!page.url().includes('{frag}')) {{
        throw new Error('navigation timeout: expected url containing {frag}, at ' + page.url());
      }}
    }});
"#,
                frag = js_quote(fragment),
                nav = nav
            ),
            Step::ExpectVisible { selector, visible: true } => format!(
                r#"    await check('expect_visible:{sel}', async () => {{
      const loc = page.locator('{sel}');
      try {{
        await loc.first().waitFor({{ state: 'visible', timeout: {elem} }});
      }} catch (e) {{
        if (await loc.count() === 0) {{
          throw new Error('locator not found: {sel}');
        }}
        throw new Error('element timeout: {sel} present but never visible');
      }}
      const n = await loc.count();
      if (n > 1) {{
        throw new Error('ambiguous locator: {sel} matched ' + n + ' elements');
      }}
    }});
"#,
                sel = js_quote(selector),
                elem = elem
            ),
            Step::ExpectVisible { selector, visible: false } => format!(
                r#"    await check('expect_hidden:{sel}', async () => {{
      const loc = page.locator('{sel}');
      if (await loc.count() === 0) {{ return; }}
      if (await loc.first().isVisible()) {{
        throw new Error('assertion mismatch: expected {sel} hidden, but it is visible');
      }}
    }});
"#,
                sel = js_quote(selector)
            ),
            Step::ExpectText { selector, equals, non_empty } => {
                let mut body = format!(
                    r#"      const loc = page.locator('{sel}');
      if (await loc.count() === 0) {{
        throw new Error('locator not found: {sel}');
      }}
      const text = (await loc.first().textContent()) || '';
"#,
                    sel = js_quote(selector)
                );
                if let Some(expected) = equals {
                    body.push_str(&format!(
                        r#"      if (text !== '{expected}') {{
        throw new Error('assertion mismatch: expected "{expected}", got "' + text + '"');
      }}
"#,
                        expected = js_quote(expected)
                    ));
                }
                if *non_empty {
                    body.push_str(&format!(
                        r#"      if (text.trim() === '') {{
        throw new Error('assertion mismatch: expected non-empty text in {sel}');
      }}
"#,
                        sel = js_quote(selector)
                    ));
                }
                format!(
                    "    await check('expect_text:{sel}', async () => {{\n{body}    }});\n",
                    sel = js_quote(selector),
                    body = body
                )
            }
            Step::ExpectCount { selector, at_least } => format!(
                r#"    await check('expect_count:{sel}', async () => {{
      const loc = page.locator('{sel}');
      try {{
        await loc.first().waitFor({{ state: 'attached', timeout: {elem} }});
      }} catch (e) {{
        throw new Error('locator not found: {sel}');
      }}
      const n = await loc.count();
      if (n < {at_least}) {{
        throw new Error('assertion mismatch: expected at least {at_least} of {sel}, got ' + n);
      }}
    }});
"#,
                sel = js_quote(selector),
                elem = elem,
                at_least = at_least
            ),
        }
    }

    /// A click that must raise a dialog: arm before the click, then wait a
    /// bounded interval for the dialog and compare kind and message
    /// verbatim. Disarmed afterwards regardless of outcome.
    fn dialog_click_js(
        &self,
        selector: &str,
        expected: &DialogExpectation,
        element_ms: u64,
        dialog_ms: u64,
    ) -> String {
        format!(
            r#"    armed = {{ kind: '{kind}', message: '{message}', fired: false }};
    await act('element timeout: {sel}', () => page.click('{sel}', {{ timeout: {element_ms} }}));
    await check('expect_dialog:{kind}', async () => {{
      if (!await awaitDialog({dialog_ms})) {{
        throw new Error('dialog timeout: expected {kind} did not fire');
      }}
      if (armed.observedKind !== armed.kind) {{
        throw new Error('dialog kind mismatch: expected ' + armed.kind + ', got ' + armed.observedKind);
      }}
      if (armed.observedMessage !== armed.message) {{
        throw new Error('dialog message mismatch: expected "' + armed.message + '", got "' + armed.observedMessage + '"');
      }}
    }});
    armed = null;
"#,
            kind = expected.kind.as_str(),
            message = js_quote(&expected.message),
            sel = js_quote(selector),
            element_ms = element_ms,
            dialog_ms = dialog_ms,
        )
    }
}

/// Human-readable label for a step, used in comments and outcome names.
pub fn step_label(step: &Step) -> String {
    match step {
        Step::Navigate { path, .. } => format!("navigate:{}", path),
        Step::Fill { selector, .. } => format!("fill:{}", selector),
        Step::Select { selector, .. } => format!("select:{}", selector),
        Step::Click { selector, expect_dialog: None } => format!("click:{}", selector),
        Step::Click { selector, expect_dialog: Some(d) } => {
            format!("click:{} (expect {})", selector, d.kind.as_str())
        }
        Step::ExpectUrl { path } => format!("expect_url:{}", path),
        Step::ExpectUrlContains { fragment } => format!("expect_url_contains:{}", fragment),
        Step::ExpectVisible { selector, visible: true } => format!("expect_visible:{}", selector),
        Step::ExpectVisible { selector, visible: false } => format!("expect_hidden:{}", selector),
        Step::ExpectText { selector, .. } => format!("expect_text:{}", selector),
        Step::ExpectCount { selector, .. } => format!("expect_count:{}", selector),
    }
}

/// Escape a string for embedding in a single-quoted JS literal.
pub(crate) fn js_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
