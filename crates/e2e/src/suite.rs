//! The built-in scenario catalog for the Book Library application
//!
//! One function per page group, mirroring how the suite is organized:
//! navigation bars, login, registration, add-book, the catalog listing,
//! the details page with its role-based action visibility, and logout.

use crate::catalog::Target;
use crate::config::{unique_email, Role};
use crate::scenario::{DialogExpectation, Scenario, Step};

/// The client-side validation message for any empty required field.
pub const REQUIRED_FIELDS_MSG: &str = "All fields are required!";

/// The client-side validation message for mismatched passwords.
pub const PASSWORD_MISMATCH_MSG: &str = "Passwords don't match!";

const TEST_PASSWORD: &str = "123456";

/// Every scenario in the suite, in execution order.
pub fn all() -> Vec<Scenario> {
    let mut scenarios = Vec::new();
    scenarios.extend(guest_navigation());
    scenarios.extend(user_navigation());
    scenarios.extend(login_page());
    scenarios.extend(register_page());
    scenarios.extend(add_book_page());
    scenarios.extend(all_books_page());
    scenarios.extend(details_page());
    scenarios.extend(logout());
    scenarios
}

fn goto_home() -> Step {
    Step::Navigate {
        path: "/".into(),
        wait_for: Some(Target::NavBar.selector()),
    }
}

fn visible(target: Target) -> Step {
    Step::ExpectVisible { selector: target.selector(), visible: true }
}

fn hidden(target: Target) -> Step {
    Step::ExpectVisible { selector: target.selector(), visible: false }
}

fn required_fields_submit() -> Step {
    Step::Click {
        selector: Target::SubmitButton.selector(),
        expect_dialog: Some(DialogExpectation::alert(REQUIRED_FIELDS_MSG)),
    }
}

fn fill(target: Target, value: impl Into<String>) -> Step {
    Step::Fill { selector: target.selector(), value: value.into() }
}

/// Navigate to the catalog and open the first book's details page.
fn open_first_book() -> Vec<Step> {
    vec![
        Step::Navigate {
            path: "/catalog".into(),
            wait_for: Some(Target::BookList.selector()),
        },
        Step::Click {
            selector: Target::FirstBookDetailsLink.selector(),
            expect_dialog: None,
        },
        visible(Target::BookInformation),
    ]
}

fn guest_navigation() -> Vec<Scenario> {
    let links = [
        ("guest-nav-all-books", Target::CatalogLink, "All Books"),
        ("guest-nav-login", Target::LoginLink, "Login"),
        ("guest-nav-register", Target::RegisterLink, "Register"),
    ];

    links
        .into_iter()
        .map(|(name, target, label)| {
            Scenario::new(name)
                .describe(format!("\"{}\" link is visible for guests", label))
                .tag("nav")
                .step(goto_home())
                .step(visible(target))
        })
        .collect()
}

fn user_navigation() -> Vec<Scenario> {
    let links = [
        ("user-nav-all-books", Target::CatalogLink, "All Books"),
        ("user-nav-my-books", Target::ProfileLink, "My Books"),
        ("user-nav-add-book", Target::CreateLink, "Add Book"),
        ("user-nav-email", Target::UserEmail, "user email"),
    ];

    links
        .into_iter()
        .map(|(name, target, label)| {
            Scenario::new(name)
                .describe(format!("{} is visible for logged-in users", label))
                .tag("nav")
                .as_user(Role::Creator)
                .step(visible(Target::NavBar))
                .step(visible(target))
        })
        .collect()
}

fn login_page() -> Vec<Scenario> {
    let valid = Scenario::new("login-valid")
        .describe("Valid fixture credentials land on the catalog")
        .tag("auth")
        .tag("smoke")
        .as_user(Role::Creator)
        .step(Step::ExpectUrl { path: "/catalog".into() });

    let empty_variants = [
        ("login-empty-all", None, None),
        ("login-empty-email", None, Some(TEST_PASSWORD)),
        ("login-empty-password", Some("peter@abv.bg"), None),
    ];

    let mut scenarios = vec![valid];
    for (name, email, password) in empty_variants {
        let mut scenario = Scenario::new(name)
            .describe("Submitting with a required field empty raises the alert and stays put")
            .tag("auth")
            .step(Step::Navigate {
                path: "/login".into(),
                wait_for: Some(Target::SubmitButton.selector()),
            });
        if let Some(email) = email {
            scenario = scenario.step(fill(Target::EmailField, email));
        }
        if let Some(password) = password {
            scenario = scenario.step(fill(Target::PasswordField, password));
        }
        scenarios.push(
            scenario
                .step(required_fields_submit())
                .step(Step::ExpectUrl { path: "/login".into() }),
        );
    }
    scenarios
}

fn register_page() -> Vec<Scenario> {
    let goto_register = Step::Navigate {
        path: "/register".into(),
        wait_for: Some(Target::SubmitButton.selector()),
    };

    let valid = Scenario::new("register-valid")
        .describe("A fresh unique email with matching passwords lands on the catalog")
        .tag("auth")
        .step(goto_register.clone())
        .step(fill(Target::EmailField, unique_email("testuser")))
        .step(fill(Target::PasswordField, TEST_PASSWORD))
        .step(fill(Target::ConfirmPasswordField, TEST_PASSWORD))
        .step(Step::Click { selector: Target::SubmitButton.selector(), expect_dialog: None })
        .step(Step::ExpectUrl { path: "/catalog".into() })
        .step(visible(Target::CatalogLink));

    // (name, email, password, confirm) with None marking the omitted field
    let empty_variants: [(&str, Option<&str>, Option<&str>, Option<&str>); 4] = [
        ("register-empty-all", None, None, None),
        ("register-empty-email", None, Some(TEST_PASSWORD), Some(TEST_PASSWORD)),
        ("register-empty-password", Some("newuser@abv.bg"), None, Some(TEST_PASSWORD)),
        ("register-empty-confirm", Some("newuser@abv.bg"), Some(TEST_PASSWORD), None),
    ];

    let mut scenarios = vec![valid];
    for (name, email, password, confirm) in empty_variants {
        let mut scenario = Scenario::new(name)
            .describe("Submitting with a required field empty raises the alert and stays put")
            .tag("auth")
            .step(goto_register.clone());
        if let Some(email) = email {
            scenario = scenario.step(fill(Target::EmailField, email));
        }
        if let Some(password) = password {
            scenario = scenario.step(fill(Target::PasswordField, password));
        }
        if let Some(confirm) = confirm {
            scenario = scenario.step(fill(Target::ConfirmPasswordField, confirm));
        }
        scenarios.push(
            scenario
                .step(required_fields_submit())
                .step(Step::ExpectUrl { path: "/register".into() }),
        );
    }

    scenarios.push(
        Scenario::new("register-password-mismatch")
            .describe("Mismatched passwords raise the mismatch alert and stay put")
            .tag("auth")
            .step(goto_register)
            .step(fill(Target::EmailField, "newuser@abv.bg"))
            .step(fill(Target::PasswordField, TEST_PASSWORD))
            .step(fill(Target::ConfirmPasswordField, "654321"))
            .step(Step::Click {
                selector: Target::SubmitButton.selector(),
                expect_dialog: Some(DialogExpectation::alert(PASSWORD_MISMATCH_MSG)),
            })
            .step(Step::ExpectUrl { path: "/register".into() }),
    );

    scenarios
}

fn add_book_page() -> Vec<Scenario> {
    let goto_create = Step::Click {
        selector: Target::CreateLink.selector(),
        expect_dialog: None,
    };
    let wait_form = visible(Target::SubmitButton);

    let valid = Scenario::new("add-book-valid")
        .describe("A fully populated book form lands on the catalog")
        .tag("books")
        .tag("smoke")
        .as_user(Role::Creator)
        .step(goto_create.clone())
        .step(wait_form.clone())
        .step(fill(Target::TitleField, "Test Book"))
        .step(fill(Target::DescriptionField, "Test Description"))
        .step(fill(Target::ImageUrlField, "http://example.com/image.jpg"))
        .step(Step::Select { selector: Target::TypeSelect.selector(), value: "Fiction".into() })
        .step(Step::Click { selector: Target::SubmitButton.selector(), expect_dialog: None })
        .step(Step::ExpectUrl { path: "/catalog".into() });

    // (name, title, description, image_url) with None marking the omitted field
    let empty_variants: [(&str, Option<&str>, Option<&str>, Option<&str>); 3] = [
        ("add-book-empty-title", None, Some("Test Description"), Some("http://example.com/image.jpg")),
        ("add-book-empty-description", Some("Test Book"), None, Some("http://example.com/image.jpg")),
        ("add-book-empty-image-url", Some("Test Book"), Some("Test Description"), None),
    ];

    let mut scenarios = vec![valid];
    for (name, title, description, image_url) in empty_variants {
        let mut scenario = Scenario::new(name)
            .describe("Submitting with a required field empty raises the alert and stays put")
            .tag("books")
            .as_user(Role::Creator)
            .step(goto_create.clone())
            .step(wait_form.clone());
        if let Some(title) = title {
            scenario = scenario.step(fill(Target::TitleField, title));
        }
        if let Some(description) = description {
            scenario = scenario.step(fill(Target::DescriptionField, description));
        }
        if let Some(image_url) = image_url {
            scenario = scenario.step(fill(Target::ImageUrlField, image_url));
        }
        scenarios.push(
            scenario
                .step(Step::Select { selector: Target::TypeSelect.selector(), value: "Fiction".into() })
                .step(required_fields_submit())
                .step(Step::ExpectUrl { path: "/create".into() }),
        );
    }
    scenarios
}

fn all_books_page() -> Vec<Scenario> {
    vec![Scenario::new("all-books-listed")
        .describe("The catalog shows at least one book card")
        .tag("books")
        .as_user(Role::Creator)
        .step(Step::Navigate {
            path: "/catalog".into(),
            wait_for: Some(Target::BookList.selector()),
        })
        .step(Step::ExpectCount { selector: Target::BookCards.selector(), at_least: 1 })]
}

fn details_page() -> Vec<Scenario> {
    let mut scenarios = Vec::new();

    let mut logged_in = Scenario::new("details-reachable-logged-in")
        .describe("A logged-in user reaches the details page from the catalog")
        .tag("details")
        .as_user(Role::NonCreator);
    for step in open_first_book() {
        logged_in = logged_in.step(step);
    }
    scenarios.push(logged_in.step(Step::ExpectUrlContains { fragment: "/details/".into() }));

    let mut guest = Scenario::new("details-reachable-guest")
        .describe("A guest reaches the details page from the catalog")
        .tag("details");
    for step in open_first_book() {
        guest = guest.step(step);
    }
    scenarios.push(guest.step(Step::ExpectUrlContains { fragment: "/details/".into() }));

    let mut info = Scenario::new("details-info-populated")
        .describe("Title, type, and description are all non-empty")
        .tag("details");
    for step in open_first_book() {
        info = info.step(step);
    }
    scenarios.push(
        info.step(Step::ExpectText {
            selector: Target::BookTitle.selector(),
            equals: None,
            non_empty: true,
        })
        .step(Step::ExpectText {
            selector: Target::BookType.selector(),
            equals: None,
            non_empty: true,
        })
        .step(Step::ExpectText {
            selector: Target::BookDescriptionText.selector(),
            equals: None,
            non_empty: true,
        }),
    );

    // The authorization-visibility matrix: edit/delete are
    // creator-exclusive, like is exclusive to non-creators, and no viewer
    // sees both control sets at once.
    let matrix: [(&str, Option<Role>, bool, bool); 3] = [
        ("details-controls-creator", Some(Role::Creator), true, false),
        ("details-controls-non-creator", Some(Role::NonCreator), false, true),
        ("details-controls-guest", None, false, false),
    ];

    for (name, role, edit_delete, like) in matrix {
        let mut scenario = Scenario::new(name)
            .describe("Action links match the viewer's role for the same book")
            .tag("details");
        if let Some(role) = role {
            scenario = scenario.as_user(role);
        }
        for step in open_first_book() {
            scenario = scenario.step(step);
        }
        let edit_step = if edit_delete { visible(Target::EditLink) } else { hidden(Target::EditLink) };
        let delete_step = if edit_delete { visible(Target::DeleteLink) } else { hidden(Target::DeleteLink) };
        let like_step = if like { visible(Target::LikeLink) } else { hidden(Target::LikeLink) };
        scenarios.push(scenario.step(edit_step).step(delete_step).step(like_step));
    }

    scenarios
}

fn logout() -> Vec<Scenario> {
    vec![
        Scenario::new("logout-button-visible")
            .describe("The logout button shows for a logged-in user")
            .tag("auth")
            .as_user(Role::Creator)
            .step(visible(Target::NavBar))
            .step(visible(Target::LogoutButton)),
        Scenario::new("logout-clears-session")
            .describe("Logout lands on the catalog and the next load shows the guest nav")
            .tag("auth")
            .as_user(Role::Creator)
            .step(Step::Click { selector: Target::LogoutButton.selector(), expect_dialog: None })
            .step(Step::ExpectUrl { path: "/catalog".into() })
            .step(goto_home())
            .step(visible(Target::LoginLink))
            .step(hidden(Target::LogoutButton)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_scenario_names_are_unique() {
        let scenarios = all();
        let names: HashSet<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), scenarios.len());
    }

    #[test]
    fn test_every_dialog_is_a_contract_message() {
        for scenario in all() {
            for step in &scenario.steps {
                if let Step::Click { expect_dialog: Some(d), .. } = step {
                    assert!(
                        d.message == REQUIRED_FIELDS_MSG || d.message == PASSWORD_MISMATCH_MSG,
                        "scenario '{}' expects an unknown dialog message: {}",
                        scenario.name,
                        d.message
                    );
                }
            }
        }
    }

    #[test]
    fn test_register_valid_uses_fresh_email() {
        let scenarios = register_page();
        let valid = scenarios.iter().find(|s| s.name == "register-valid").unwrap();
        let email = valid
            .steps
            .iter()
            .find_map(|s| match s {
                Step::Fill { selector, value } if selector.contains("email") => Some(value.clone()),
                _ => None,
            })
            .unwrap();
        assert!(email.starts_with("testuser"));
        assert_ne!(email, "testuser@example.com");
    }

    #[test]
    fn test_empty_field_scenarios_stay_on_their_route() {
        for scenario in all() {
            if !scenario.expects_dialog() {
                continue;
            }
            let last = scenario.steps.last().unwrap();
            assert!(
                matches!(last, Step::ExpectUrl { .. }),
                "dialog scenario '{}' must end by asserting the unchanged route",
                scenario.name
            );
        }
    }
}
