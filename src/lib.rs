//! MSA Admin - terminal console for the identity, member and board services
//!
//! Operators sign in against the identity service, manage member accounts
//! and moderate boards and posts. End users sign up, sign in and read or
//! write posts on public boards.

pub mod api;
pub mod config;
pub mod console;
pub mod datetime;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod models;
pub mod query;
pub mod router;
pub mod session;
pub mod validation;
pub mod views;

pub use api::{ApiClient, ApiError, Operation, Service};
pub use config::Config;
pub use error::{AdminError, Result};
pub use i18n::I18n;
pub use session::{AuthState, SessionHolder, SessionScope, SessionStore};
