//! Identity service calls.

use reqwest::Method;
use tracing::info;

use super::{ApiClient, ApiError, Operation, Service};
use crate::models::{AuthResponse, Credentials, SignupResponse, StatusUpdate, User, UserStatus};

impl ApiClient {
    /// Exchange credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let op = Operation::Login;
        let url = self.url(op, Service::Auth, &["api", "v1", "auth", "login"], &[])?;
        let body = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self
            .send_json(op, self.request(Method::POST, url, None).json(&body))
            .await?;
        info!(email = %auth.email, role = %auth.role, "login accepted");
        Ok(auth)
    }

    /// Register a new account.
    pub async fn signup(&self, email: &str, password: &str) -> Result<SignupResponse, ApiError> {
        let op = Operation::Signup;
        let url = self.url(op, Service::Auth, &["api", "v1", "auth", "signup"], &[])?;
        let body = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let created: SignupResponse = self
            .send_json(op, self.request(Method::POST, url, None).json(&body))
            .await?;
        info!(email = %created.email, "account created");
        Ok(created)
    }

    /// Change an account's status in the identity service, addressed by email.
    pub async fn update_identity_user_status(
        &self,
        token: &str,
        email: &str,
        status: UserStatus,
    ) -> Result<User, ApiError> {
        let op = Operation::UpdateIdentityStatus;
        let url = self.url(
            op,
            Service::Auth,
            &["api", "v1", "admin", "users", email, "status"],
            &[],
        )?;
        let builder = self
            .request(Method::PATCH, url, Some(token))
            .json(&StatusUpdate { status });
        self.send_json(op, builder).await
    }
}
