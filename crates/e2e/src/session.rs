//! Session helper: the login preamble for authenticated scenarios
//!
//! Login runs as scenario setup, before the step list. It makes a single
//! submit attempt and treats anything other than settling on the catalog
//! route as a setup failure that aborts the scenario. Isolation comes for
//! free: every scenario gets a fresh browser context in a fresh process,
//! so no authentication state can leak between scenarios.

use crate::catalog::Target;
use crate::config::{HarnessConfig, Role};
use crate::script::js_quote;

/// Route the application lands on after a successful login.
pub const POST_LOGIN_ROUTE: &str = "/catalog";

/// Emit the JavaScript preamble that signs the page in as the given
/// fixture role: navigate to the login entry point, populate both
/// credential fields, submit, and block until the post-login route
/// settles.
pub fn login_preamble(config: &HarnessConfig, role: Role) -> String {
    let creds = config.fixtures.credentials(role);
    let nav_timeout = config.timeouts.navigation_ms;
    let element_timeout = config.timeouts.element_ms;

    format!(
        r#"    // setup: login as {email}
    await act('navigation timeout: /login', () => page.goto(baseUrl + '/login'));
    await act('element timeout: {nav_bar}', () => page.waitForSelector('{nav_bar}', {{ timeout: {element_timeout} }}));
    await act('element timeout: {email_field}', () => page.fill('{email_field}', '{email}', {{ timeout: {element_timeout} }}));
    await act('element timeout: {password_field}', () => page.fill('{password_field}', '{password}', {{ timeout: {element_timeout} }}));
    await act('element timeout: {submit}', () => page.click('{submit}', {{ timeout: {element_timeout} }}));
    await act('navigation timeout: {post_login}', () => page.waitForURL(baseUrl + '{post_login}', {{ timeout: {nav_timeout} }}));
"#,
        email = js_quote(&creds.email),
        password = js_quote(&creds.password),
        nav_bar = Target::NavBar.css(),
        email_field = Target::EmailField.css(),
        password_field = Target::PasswordField.css(),
        submit = Target::SubmitButton.css(),
        post_login = POST_LOGIN_ROUTE,
        nav_timeout = nav_timeout,
        element_timeout = element_timeout,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_fills_both_credential_fields() {
        let config = HarnessConfig::default();
        let js = login_preamble(&config, Role::Creator);

        assert!(js.contains(r#"page.goto(baseUrl + '/login')"#));
        assert!(js.contains("peter@abv.bg"));
        assert!(js.contains(r#"input[name="password"]"#));
        assert!(js.contains("waitForURL(baseUrl + '/catalog'"));
    }

    #[test]
    fn test_preamble_failures_carry_class_markers() {
        let config = HarnessConfig::default();
        let js = login_preamble(&config, Role::Creator);

        assert!(js.contains("act('navigation timeout: /login'"));
        assert!(js.contains("act('navigation timeout: /catalog'"));
        assert!(js.contains("act('element timeout: nav.navbar'"));
    }

    #[test]
    fn test_preamble_uses_requested_fixture() {
        let config = HarnessConfig::default();
        let js = login_preamble(&config, Role::NonCreator);
        assert!(js.contains("john@abv.bg"));
        assert!(!js.contains("peter@abv.bg"));
    }
}
