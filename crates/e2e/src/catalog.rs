//! Selector catalog: semantic element names mapped to DOM locators
//!
//! Every selector the suite touches lives here so that markup drift in the
//! application breaks exactly one table. Singular targets must resolve to
//! one element; collection targets to a countable set. Anything ambiguous
//! in the raw markup (the first book card's details link, the text-named
//! action links) is scoped explicitly rather than left to first-match.

use serde::{Deserialize, Serialize};

/// Whether a target names one element or a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    One,
    Many,
}

/// Semantic names for every element the scenarios interact with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    // Navigation bar
    NavBar,
    CatalogLink,
    LoginLink,
    RegisterLink,
    ProfileLink,
    CreateLink,
    UserEmail,
    LogoutButton,

    // Credential forms
    EmailField,
    PasswordField,
    ConfirmPasswordField,
    SubmitButton,

    // Book form
    TitleField,
    DescriptionField,
    ImageUrlField,
    TypeSelect,

    // Catalog page
    BookList,
    BookCards,
    FirstBookDetailsLink,

    // Details page
    BookInformation,
    BookTitle,
    BookType,
    BookDescriptionText,
    EditLink,
    DeleteLink,
    LikeLink,
}

impl Target {
    pub fn css(self) -> &'static str {
        match self {
            Target::NavBar => "nav.navbar",
            Target::CatalogLink => r#"a[href="/catalog"]"#,
            Target::LoginLink => r#"a[href="/login"]"#,
            Target::RegisterLink => r#"a[href="/register"]"#,
            Target::ProfileLink => r#"a[href="/profile"]"#,
            Target::CreateLink => r#"a[href="/create"]"#,
            Target::UserEmail => "#user span",
            Target::LogoutButton => "#logoutBtn",

            Target::EmailField => r#"input[name="email"]"#,
            Target::PasswordField => r#"input[name="password"]"#,
            Target::ConfirmPasswordField => r#"input[name="confirm-pass"]"#,
            Target::SubmitButton => r#"input[type="submit"]"#,

            Target::TitleField => r#"input[name="title"]"#,
            Target::DescriptionField => r#"textarea[name="description"]"#,
            Target::ImageUrlField => r#"input[name="imageUrl"]"#,
            Target::TypeSelect => r#"select[name="type"]"#,

            Target::BookList => ".other-books-list",
            Target::BookCards => ".otherBooks",
            // Explicitly scoped to the first card; never rely on implicit
            // first-match against the whole collection.
            Target::FirstBookDetailsLink => ".otherBooks a.button >> nth=0",

            Target::BookInformation => ".book-information",
            Target::BookTitle => ".book-information h3",
            Target::BookType => ".book-information .type",
            Target::BookDescriptionText => ".book-description p",
            // The app renders Delete and Like with identical href values,
            // so the action links are named by their visible text.
            Target::EditLink => r#".book-information a:has-text("Edit")"#,
            Target::DeleteLink => r#".book-information a:has-text("Delete")"#,
            Target::LikeLink => r#".book-information a:has-text("Like")"#,
        }
    }

    pub fn cardinality(self) -> Cardinality {
        match self {
            Target::BookCards => Cardinality::Many,
            _ => Cardinality::One,
        }
    }

    pub fn selector(self) -> String {
        self.css().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_selectors() {
        assert_eq!(Target::NavBar.css(), "nav.navbar");
        assert_eq!(Target::BookList.css(), ".other-books-list");
        assert_eq!(Target::UserEmail.css(), "#user span");
        assert_eq!(Target::LogoutButton.css(), "#logoutBtn");
        assert_eq!(Target::ConfirmPasswordField.css(), r#"input[name="confirm-pass"]"#);
    }

    #[test]
    fn test_only_book_cards_are_a_collection() {
        assert_eq!(Target::BookCards.cardinality(), Cardinality::Many);
        assert_eq!(Target::CatalogLink.cardinality(), Cardinality::One);
        assert_eq!(Target::FirstBookDetailsLink.cardinality(), Cardinality::One);
    }

    #[test]
    fn test_action_links_are_scoped_by_text() {
        assert!(Target::EditLink.css().starts_with(".book-information"));
        assert!(Target::DeleteLink.css().contains(r#"has-text("Delete")"#));
        assert!(Target::LikeLink.css().contains(r#"has-text("Like")"#));
    }
}
