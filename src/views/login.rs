//! Login and signup form.

use tracing::{info, warn};

use super::Feedback;
use crate::api::ApiClient;
use crate::session::{SessionHolder, SessionScope};
use crate::validation::{self, FormMode, ADMIN_LOGIN_ID};

/// Result of submitting the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// A rule failed locally; nothing was sent.
    Invalid,
    /// The service refused the request.
    Failed,
    /// Signed in.
    SignedIn,
    /// Signed in to the admin scope with an account that is not an admin.
    NotAdmin,
    /// An account was created; the form is back in login mode.
    SignedUp,
}

/// State of the login/signup form for one session scope.
#[derive(Debug, Clone)]
pub struct LoginView {
    scope: SessionScope,
    mode: FormMode,
    allow_admin_id: bool,
    /// Login id.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password confirmation (signup only).
    pub confirm: String,
    feedback: Option<Feedback>,
}

impl LoginView {
    /// Create a form for `scope`.
    ///
    /// The admin form starts with the admin id filled in when the allowance is on.
    pub fn new(scope: SessionScope, allow_admin_id: bool) -> Self {
        let email = if scope == SessionScope::Admin && allow_admin_id {
            ADMIN_LOGIN_ID.to_string()
        } else {
            String::new()
        };
        Self {
            scope,
            mode: FormMode::Login,
            allow_admin_id,
            email,
            password: String::new(),
            confirm: String::new(),
            feedback: None,
        }
    }

    /// Scope the form signs in to.
    pub fn scope(&self) -> SessionScope {
        self.scope
    }

    /// Current mode.
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Switch between login and signup. The admin form only logs in.
    pub fn set_mode(&mut self, mode: FormMode) {
        if self.scope == SessionScope::Admin || mode == self.mode {
            return;
        }
        self.mode = mode;
        self.password.clear();
        self.confirm.clear();
        self.feedback = None;
    }

    /// Feedback from the last submit.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Set the feedback line, e.g. when the router refuses a non-admin session.
    pub fn set_feedback(&mut self, feedback: Feedback) {
        self.feedback = Some(feedback);
    }

    /// Validate and submit the form.
    ///
    /// Failures are reported through the outcome and [`feedback`](Self::feedback).
    pub async fn submit(&mut self, api: &ApiClient, session: &mut SessionHolder) -> LoginOutcome {
        let email = self.email.trim().to_string();
        if let Err(e) = validation::validate_credentials(
            self.mode,
            &email,
            &self.password,
            &self.confirm,
            self.allow_admin_id,
        ) {
            self.feedback = Some(Feedback::invalid(&e));
            return LoginOutcome::Invalid;
        }
        self.feedback = None;

        match self.mode {
            FormMode::Login => self.login(api, session, &email).await,
            FormMode::Signup => self.signup(api, &email).await,
        }
    }

    async fn login(
        &mut self,
        api: &ApiClient,
        session: &mut SessionHolder,
        email: &str,
    ) -> LoginOutcome {
        session.begin_login(self.scope);
        match api.login(email, &self.password).await {
            Ok(auth) => {
                if !session.complete_login(self.scope, auth) {
                    self.feedback = Some(Feedback::Rejected("api.login_failed"));
                    return LoginOutcome::Failed;
                }
                self.password.clear();
                if self.scope == SessionScope::Admin && !session.admin_admitted() {
                    warn!(email, "admin login by an account without the ADMIN role");
                    self.feedback = Some(Feedback::Rejected("feedback.admin_required"));
                    return LoginOutcome::NotAdmin;
                }
                LoginOutcome::SignedIn
            }
            Err(e) => {
                session.fail_login(self.scope);
                self.feedback = Some(Feedback::from_api(&e));
                LoginOutcome::Failed
            }
        }
    }

    async fn signup(&mut self, api: &ApiClient, email: &str) -> LoginOutcome {
        match api.signup(email, &self.password).await {
            Ok(created) => {
                info!(email = %created.email, "signup complete");
                self.mode = FormMode::Login;
                self.email = created.email;
                self.password.clear();
                self.confirm.clear();
                self.feedback = Some(Feedback::Success("feedback.signup_complete"));
                LoginOutcome::SignedUp
            }
            Err(e) => {
                self.feedback = Some(Feedback::from_api(&e));
                LoginOutcome::Failed
            }
        }
    }
}
