//! View models behind the console screens.
//!
//! Views hold their own filter, pagination, selection and feedback state and
//! call the [`ApiClient`](crate::api::ApiClient) directly. Rendering lives in
//! [`crate::console`].

pub mod boards;
pub mod login;
pub mod pagination;
pub mod posts;
pub mod users;

pub use boards::{BoardsMode, BoardsView};
pub use login::{LoginOutcome, LoginView};
pub use pagination::{PageCommand, Pager};
pub use posts::PostsView;
pub use users::{StatusUpdateOutcome, UsersView};

use crate::api::ApiError;
use crate::i18n::I18n;
use crate::validation::ValidationError;

/// Outcome of the last action, shown inline under a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// The action succeeded; the text is a locale key.
    Success(&'static str),
    /// The action failed with an already localized message.
    Error(String),
    /// The action was refused locally; the text is a locale key.
    Rejected(&'static str),
    /// Only part of the action took effect. The key takes a `{{message}}` parameter.
    Partial(&'static str, String),
}

impl Feedback {
    /// Feedback for a failed backend call.
    pub fn from_api(error: &ApiError) -> Self {
        Feedback::Error(error.message().to_string())
    }

    /// Feedback for a failed validation rule.
    pub fn invalid(error: &ValidationError) -> Self {
        Feedback::Rejected(error.message_key())
    }

    /// Whether this reports a failure.
    pub fn is_error(&self) -> bool {
        !matches!(self, Feedback::Success(_))
    }

    /// Text to show.
    pub fn render(&self, i18n: &I18n) -> String {
        match self {
            Feedback::Success(key) | Feedback::Rejected(key) => i18n.t(key).to_string(),
            Feedback::Error(message) => message.clone(),
            Feedback::Partial(key, message) => i18n.t_with(key, &[("message", message)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_feedback() {
        let i18n = I18n::builtin("en").unwrap();
        assert_eq!(
            Feedback::Success("feedback.board_created").render(&i18n),
            "Board created."
        );
        assert_eq!(Feedback::Error("boom".to_string()).render(&i18n), "boom");
        assert_eq!(
            Feedback::invalid(&ValidationError::PasswordTooShort).render(&i18n),
            "Password must be at least 8 characters."
        );
        assert!(Feedback::Rejected("x").is_error());
        assert!(!Feedback::Success("x").is_error());
    }

    #[test]
    fn test_render_partial() {
        let i18n = I18n::builtin("en").unwrap();
        let text = Feedback::Partial("feedback.user_status_partial", "timeout".to_string())
            .render(&i18n);
        assert!(text.contains("timeout"));
    }
}
