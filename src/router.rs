//! Path routing conditioned on the session.

use std::fmt;

use crate::session::{SessionHolder, SessionScope};

/// A screen the console can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Board reader for the signed-in user.
    Home,
    /// User login/signup form.
    Login,
    /// Admin user management.
    AdminUsers,
    /// Admin board management.
    AdminBoards,
    /// Admin login form.
    AdminLogin,
    /// No such path.
    NotFound,
}

impl Screen {
    /// Canonical path of the screen.
    pub fn path(&self) -> &'static str {
        match self {
            Screen::Home => "/",
            Screen::Login => "/login",
            Screen::AdminUsers => "/admin/users",
            Screen::AdminBoards => "/admin/boards",
            Screen::AdminLogin => "/admin/login",
            Screen::NotFound => "/404",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Where a path leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Normalized requested path.
    pub requested: String,
    /// Screen to show.
    pub screen: Screen,
    /// An admin session exists but lacks the ADMIN role.
    pub admin_refused: bool,
}

impl Resolution {
    /// Whether the screen differs from the requested path.
    pub fn redirected(&self) -> bool {
        self.screen != Screen::NotFound && self.screen.path() != self.requested
    }
}

/// Normalize a path: drop query and fragment, ensure a leading slash and
/// strip trailing slashes.
pub fn normalize(path: &str) -> String {
    let path = path.trim();
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Resolve `path` against the current sessions.
pub fn resolve(path: &str, session: &SessionHolder) -> Resolution {
    let requested = normalize(path);
    let signed_in = session.session(SessionScope::User).is_some();
    let admitted = session.admin_admitted();
    let admin_refused = !admitted && session.session(SessionScope::Admin).is_some();

    let admin = |screen: Screen| if admitted { screen } else { Screen::AdminLogin };

    let screen = match requested.as_str() {
        "/" | "/login" if signed_in => Screen::Home,
        "/" | "/login" => Screen::Login,
        "/admin" | "/admin/users" => admin(Screen::AdminUsers),
        "/admin/boards" => admin(Screen::AdminBoards),
        "/admin/login" => Screen::AdminLogin,
        _ => Screen::NotFound,
    };

    Resolution {
        requested,
        screen,
        admin_refused: admin_refused && screen == Screen::AdminLogin,
    }
}
