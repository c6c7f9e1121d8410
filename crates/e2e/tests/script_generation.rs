//! Browser-free checks over the generated Playwright scripts

use booklib_e2e::config::{HarnessConfig, Role};
use booklib_e2e::scenario::{DialogExpectation, Scenario, Step};
use booklib_e2e::script::BrowserDriver;

fn driver() -> BrowserDriver {
    BrowserDriver::new(HarnessConfig::default())
}

#[test]
fn interceptor_is_armed_before_the_triggering_click() {
    let scenario = Scenario::new("login-empty-all")
        .step(Step::Navigate { path: "/login".into(), wait_for: None })
        .step(Step::Click {
            selector: "input[type=\"submit\"]".into(),
            expect_dialog: Some(DialogExpectation::alert("All fields are required!")),
        });

    let script = driver().build_script(&scenario);

    let arm_at = script.find("armed = { kind: 'alert'").expect("arming code present");
    let click_at = script
        .find("page.click('input[type=\"submit\"]'")
        .expect("click code present");
    assert!(arm_at < click_at, "dialog must be armed before the click is issued");

    // Scoped release: the expectation is disarmed after its check. The
    // first "armed = null" is the handler's initial state, so look for
    // the last one.
    let disarm_at = script.rfind("armed = null").expect("disarming code present");
    assert!(disarm_at > click_at);
}

#[test]
fn unexpected_dialogs_are_a_hard_failure() {
    let scenario = Scenario::new("nav-check")
        .step(Step::Navigate { path: "/".into(), wait_for: Some("nav.navbar".into()) });

    let script = driver().build_script(&scenario);
    assert!(script.contains("'unexpected ' + dialog.type()"));
    assert!(script.contains("dialog.dismiss()"));
}

#[test]
fn contract_messages_survive_escaping() {
    let scenario = Scenario::new("register-password-mismatch").step(Step::Click {
        selector: "input[type=\"submit\"]".into(),
        expect_dialog: Some(DialogExpectation::alert("Passwords don't match!")),
    });

    let script = driver().build_script(&scenario);
    assert!(
        script.contains(r"Passwords don\'t match!"),
        "apostrophe must be escaped for the single-quoted JS literal"
    );
}

#[test]
fn session_preamble_precedes_the_steps() {
    let scenario = Scenario::new("user-nav-email")
        .as_user(Role::Creator)
        .step(Step::ExpectVisible { selector: "#user span".into(), visible: true });

    let script = driver().build_script(&scenario);

    let login_at = script.find("page.goto(baseUrl + '/login')").expect("login preamble");
    let step_at = script.find("expect_visible:#user span").expect("first step");
    assert!(login_at < step_at);
    assert!(script.contains("peter@abv.bg"));
}

#[test]
fn guest_scenarios_carry_no_credentials() {
    let scenario = Scenario::new("guest-nav-login")
        .step(Step::Navigate { path: "/".into(), wait_for: Some("nav.navbar".into()) })
        .step(Step::ExpectVisible { selector: "a[href=\"/login\"]".into(), visible: true });

    let script = driver().build_script(&scenario);
    assert!(!script.contains("peter@abv.bg"));
    assert!(!script.contains("john@abv.bg"));
}

#[test]
fn every_wait_is_bounded() {
    let scenario = Scenario::new("details-reachable-guest")
        .step(Step::Navigate { path: "/catalog".into(), wait_for: Some(".other-books-list".into()) })
        .step(Step::Click { selector: ".otherBooks a.button >> nth=0".into(), expect_dialog: None })
        .step(Step::ExpectVisible { selector: ".book-information".into(), visible: true })
        .step(Step::ExpectUrlContains { fragment: "/details/".into() });

    let script = driver().build_script(&scenario);
    // No unbounded waits and no fixed sleeps anywhere in the generated code.
    assert!(script.contains("timeout:"));
    assert!(!script.contains("waitForTimeout"));
    for line in script.lines() {
        if line.contains("waitForSelector") || line.contains("waitForURL") || line.contains("waitFor({") {
            assert!(line.contains("timeout"), "unbounded wait in: {}", line);
        }
    }
}

#[test]
fn dialog_wait_is_bounded_by_the_dialog_timeout() {
    let scenario = Scenario::new("add-book-empty").step(Step::Click {
        selector: "input[type=\"submit\"]".into(),
        expect_dialog: Some(DialogExpectation::alert("All fields are required!")),
    });

    let script = driver().build_script(&scenario);
    // Default dialog timeout is 5000ms; the poll must carry it, never an
    // open-ended wait for the dialog to fire.
    assert!(script.contains("awaitDialog(5000)"));
    assert!(!script.contains("awaitDialog()"));
}

#[test]
fn actions_carry_failure_class_markers() {
    let scenario = Scenario::new("login-valid")
        .step(Step::Navigate { path: "/login".into(), wait_for: Some("nav.navbar".into()) })
        .step(Step::Fill { selector: "input[name=\"email\"]".into(), value: "peter@abv.bg".into() })
        .step(Step::Click { selector: "input[type=\"submit\"]".into(), expect_dialog: None });

    let script = driver().build_script(&scenario);
    // Raw Playwright error text is unclassifiable; every action rethrows
    // under a marker the report can sort into a failure kind.
    assert!(script.contains("act('navigation timeout: /login'"));
    assert!(script.contains("act('element timeout: nav.navbar'"));
    assert!(script.contains("act('element timeout: input[name=\"email\"]'"));
    assert!(script.contains("act('element timeout: input[type=\"submit\"]'"));
}

#[test]
fn failure_screenshot_lands_in_the_artifacts_dir() {
    let scenario = Scenario::new("logout-clears-session")
        .step(Step::ExpectUrl { path: "/catalog".into() });

    let script = driver().build_script(&scenario);
    assert!(script.contains("logout-clears-session.png"));
    assert!(script.contains("outcomes.some(o => !o.ok)"));
}

#[test]
fn report_is_emitted_even_when_a_step_aborts() {
    let scenario = Scenario::new("any")
        .step(Step::Fill { selector: "input[name=\"email\"]".into(), value: "x".into() });

    let script = driver().build_script(&scenario);
    let close_at = script.find("await browser.close()").expect("teardown present");
    let report_at = script
        .find("console.log(JSON.stringify({ outcomes, aborted }))")
        .expect("report line present");
    assert!(close_at < report_at, "context is torn down before the report is printed");
}
