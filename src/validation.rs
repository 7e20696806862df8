//! Client-side form validation.
//!
//! Every check runs before a request is built; a failing check means no
//! network call is made. Each error maps to a locale key for the message the
//! form shows.

use thiserror::Error;
use validator::ValidateEmail;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Login id accepted in place of an email when the admin-id allowance is on.
pub const ADMIN_LOGIN_ID: &str = "admin";

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The login id is neither an email nor the admin id.
    #[error("invalid email format")]
    EmailInvalid,

    /// Password is too short.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    /// Password and confirmation differ.
    #[error("password confirmation does not match")]
    PasswordMismatch,

    /// Board name is blank.
    #[error("board name cannot be empty")]
    BoardNameEmpty,

    /// Post title or content is blank.
    #[error("post title and content cannot be empty")]
    PostFieldsEmpty,

    /// A list action needs a selected board.
    #[error("no board selected")]
    NoBoardSelected,

    /// A detail action needs a selected row.
    #[error("nothing selected")]
    NothingSelected,
}

impl ValidationError {
    /// Locale key of the message shown to the operator.
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationError::EmailInvalid => "validation.email_invalid",
            ValidationError::PasswordTooShort => "validation.password_too_short",
            ValidationError::PasswordMismatch => "validation.password_mismatch",
            ValidationError::BoardNameEmpty => "validation.board_name_empty",
            ValidationError::PostFieldsEmpty => "validation.post_fields_empty",
            ValidationError::NoBoardSelected => "validation.no_board_selected",
            ValidationError::NothingSelected => "validation.nothing_selected",
        }
    }
}

/// Whether the login form submits a login or a signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Sign in to an existing account.
    #[default]
    Login,
    /// Create an account.
    Signup,
}

/// Validate a login id.
///
/// The id must look like an email address, unless `allow_admin_id` is set and
/// the id is exactly [`ADMIN_LOGIN_ID`].
///
/// # Examples
///
/// ```
/// use msa_admin::validation::validate_login_id;
///
/// assert!(validate_login_id("kim@example.com", false).is_ok());
/// assert!(validate_login_id("admin", true).is_ok());
/// assert!(validate_login_id("admin", false).is_err());
/// assert!(validate_login_id("Admin", true).is_err());
/// ```
pub fn validate_login_id(id: &str, allow_admin_id: bool) -> Result<(), ValidationError> {
    if allow_admin_id && id == ADMIN_LOGIN_ID {
        return Ok(());
    }
    if id.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::EmailInvalid)
    }
}

/// Validate a password's length (in characters).
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Validate that a confirmation repeats the password.
pub fn validate_confirmation(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Validate the login/signup form, returning the first failing rule.
///
/// The confirmation is only checked in signup mode.
pub fn validate_credentials(
    mode: FormMode,
    id: &str,
    password: &str,
    confirm: &str,
    allow_admin_id: bool,
) -> Result<(), ValidationError> {
    // The admin id is never a valid signup address.
    let allow_admin_id = allow_admin_id && mode == FormMode::Login;
    validate_login_id(id, allow_admin_id)?;
    validate_password(password)?;
    if mode == FormMode::Signup {
        validate_confirmation(password, confirm)?;
    }
    Ok(())
}

/// Validate a board name, returning it trimmed.
pub fn validate_board_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::BoardNameEmpty);
    }
    Ok(name.to_string())
}

/// Validate a post's title and content, returning both trimmed.
pub fn validate_post_fields(title: &str, content: &str) -> Result<(String, String), ValidationError> {
    let (title, content) = (title.trim(), content.trim());
    if title.is_empty() || content.is_empty() {
        return Err(ValidationError::PostFieldsEmpty);
    }
    Ok((title.to_string(), content.to_string()))
}
