//! In-memory session state mirrored to the session store.

use std::fmt;

use tracing::{info, warn};

use super::storage::SessionStore;
use crate::models::{AuthResponse, Role};

const KEY_TOKEN: &str = "token";
const KEY_EMAIL: &str = "email";
const KEY_ADMIN_TOKEN: &str = "adminToken";
const KEY_ADMIN_EMAIL: &str = "adminEmail";
const KEY_ADMIN_ROLE: &str = "adminRole";

/// Which of the two parallel sessions an action applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionScope {
    /// The signed-in user of the board reader.
    User,
    /// The signed-in operator of the admin area.
    Admin,
}

impl SessionScope {
    fn token_key(&self) -> &'static str {
        match self {
            SessionScope::User => KEY_TOKEN,
            SessionScope::Admin => KEY_ADMIN_TOKEN,
        }
    }

    fn email_key(&self) -> &'static str {
        match self {
            SessionScope::User => KEY_EMAIL,
            SessionScope::Admin => KEY_ADMIN_EMAIL,
        }
    }

    /// Short name used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionScope::User => "user",
            SessionScope::Admin => "admin",
        }
    }
}

/// Authentication state of one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No session.
    Anonymous,
    /// A login request is outstanding.
    Authenticating,
    /// A session exists.
    Authenticated,
}

/// A signed-in session.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token.
    pub token: String,
    /// Login email.
    pub email: String,
    /// Role, when known. The user scope does not persist it.
    pub role: Option<Role>,
}

impl Session {
    /// Whether this session may enter the admin area.
    pub fn is_admin(&self) -> bool {
        self.role.is_some_and(|role| role.is_admin())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Debug, Default)]
struct Slot {
    session: Option<Session>,
    authenticating: bool,
}

impl Slot {
    fn state(&self) -> AuthState {
        if self.authenticating {
            AuthState::Authenticating
        } else if self.session.is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        }
    }
}

/// Owner of the user and admin sessions.
///
/// Only this type changes session state. Every change is written through to
/// the [`SessionStore`]. The in-memory state is authoritative: when a write
/// fails the change still applies for this run, and the failure is kept for
/// [`take_save_error`](Self::take_save_error).
#[derive(Debug)]
pub struct SessionHolder {
    store: SessionStore,
    user: Slot,
    admin: Slot,
    save_error: Option<String>,
}

impl SessionHolder {
    /// Restore both sessions from the store.
    ///
    /// A scope is restored only when both its token and email are present and
    /// non-empty.
    pub fn restore(store: SessionStore) -> Self {
        let user = Self::read_session(&store, SessionScope::User);
        let mut admin = Self::read_session(&store, SessionScope::Admin);
        if let Some(session) = admin.as_mut() {
            session.role = store.get(KEY_ADMIN_ROLE).and_then(|r| r.parse().ok());
        }
        if user.is_some() || admin.is_some() {
            info!(
                user = user.is_some(),
                admin = admin.is_some(),
                "restored persisted sessions"
            );
        }
        Self {
            store,
            user: Slot {
                session: user,
                authenticating: false,
            },
            admin: Slot {
                session: admin,
                authenticating: false,
            },
            save_error: None,
        }
    }

    fn read_session(store: &SessionStore, scope: SessionScope) -> Option<Session> {
        let token = store.get(scope.token_key()).filter(|t| !t.is_empty())?;
        let email = store.get(scope.email_key()).filter(|e| !e.is_empty())?;
        Some(Session {
            token: token.to_string(),
            email: email.to_string(),
            role: None,
        })
    }

    fn slot(&self, scope: SessionScope) -> &Slot {
        match scope {
            SessionScope::User => &self.user,
            SessionScope::Admin => &self.admin,
        }
    }

    fn slot_mut(&mut self, scope: SessionScope) -> &mut Slot {
        match scope {
            SessionScope::User => &mut self.user,
            SessionScope::Admin => &mut self.admin,
        }
    }

    /// Authentication state of a scope.
    pub fn state(&self, scope: SessionScope) -> AuthState {
        self.slot(scope).state()
    }

    /// Current session of a scope.
    pub fn session(&self, scope: SessionScope) -> Option<&Session> {
        self.slot(scope).session.as_ref()
    }

    /// Bearer token of a scope.
    pub fn token(&self, scope: SessionScope) -> Option<&str> {
        self.session(scope).map(|s| s.token.as_str())
    }

    /// Whether the admin session may enter the admin area.
    pub fn admin_admitted(&self) -> bool {
        self.admin.session.as_ref().is_some_and(Session::is_admin)
    }

    /// Mark a login as submitted. Any existing session of the scope is dropped.
    pub fn begin_login(&mut self, scope: SessionScope) {
        let had_session = {
            let slot = self.slot_mut(scope);
            slot.authenticating = true;
            slot.session.take().is_some()
        };
        if had_session {
            self.persist(scope);
        }
    }

    /// Store the session from a successful login.
    ///
    /// Returns `false` and falls back to anonymous when the response carries
    /// no token.
    pub fn complete_login(&mut self, scope: SessionScope, auth: AuthResponse) -> bool {
        if auth.token.trim().is_empty() {
            warn!(scope = scope.as_str(), "login response carried no token");
            self.fail_login(scope);
            return false;
        }
        info!(scope = scope.as_str(), email = %auth.email, role = %auth.role, "signed in");
        let slot = self.slot_mut(scope);
        slot.authenticating = false;
        slot.session = Some(Session {
            token: auth.token,
            email: auth.email,
            role: Some(auth.role),
        });
        self.persist(scope);
        true
    }

    /// Abandon an outstanding login.
    pub fn fail_login(&mut self, scope: SessionScope) {
        let slot = self.slot_mut(scope);
        slot.authenticating = false;
        slot.session = None;
    }

    /// Sign out of a scope.
    pub fn logout(&mut self, scope: SessionScope) {
        let slot = self.slot_mut(scope);
        slot.authenticating = false;
        if let Some(session) = slot.session.take() {
            info!(scope = scope.as_str(), email = %session.email, "signed out");
        }
        self.persist(scope);
    }

    /// Message of the last failed write, cleared by the next successful one.
    pub fn take_save_error(&mut self) -> Option<String> {
        self.save_error.take()
    }

    fn persist(&mut self, scope: SessionScope) {
        let session = self.slot(scope).session.clone();
        match session {
            Some(session) => {
                self.store.set(scope.token_key(), session.token);
                self.store.set(scope.email_key(), session.email);
                if scope == SessionScope::Admin {
                    match session.role {
                        Some(role) => self.store.set(KEY_ADMIN_ROLE, role.as_str()),
                        None => self.store.remove(KEY_ADMIN_ROLE),
                    }
                }
            }
            None => {
                self.store.remove(scope.token_key());
                self.store.remove(scope.email_key());
                if scope == SessionScope::Admin {
                    self.store.remove(KEY_ADMIN_ROLE);
                }
            }
        }
        match self.store.save() {
            Ok(()) => self.save_error = None,
            Err(e) => {
                warn!(scope = scope.as_str(), error = %e, "failed to save session");
                self.save_error = Some(e.to_string());
            }
        }
    }
}
