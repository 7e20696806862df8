//! Identity service login and signup payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{Role, UserStatus};

/// Body of the login and signup endpoints.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Login id (an email, or the `admin` sentinel).
    pub email: String,
    /// Plain password.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login.
#[derive(Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    /// Bearer token.
    pub token: String,
    /// Login email.
    pub email: String,
    /// Role of the account.
    pub role: Role,
}

impl std::fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &"<redacted>")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish()
    }
}

/// Account created by signup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    /// Identifier of the new account.
    pub id: String,
    /// Login email.
    pub email: String,
    /// Assigned role.
    pub role: Role,
    /// Initial status.
    pub status: UserStatus,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials {
            email: "admin".to_string(),
            password: "supersecret".to_string(),
        };
        let debug = format!("{creds:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("supersecret"));
    }

    #[test]
    fn test_auth_response_debug_hides_token() {
        let json = r#"{"token":"eyJhbGciOi.secret","email":"admin","role":"ADMIN"}"#;
        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(auth.role, Role::Admin);
        assert!(!format!("{auth:?}").contains("eyJhbGciOi"));
    }

    #[test]
    fn test_deserialize_signup_response() {
        let json = r#"{
            "id": "9b1c",
            "email": "new@example.com",
            "role": "USER",
            "status": "ACTIVE",
            "createdAt": "2024-06-01T08:00:00Z"
        }"#;
        let created: SignupResponse = serde_json::from_str(json).unwrap();
        assert_eq!(created.email, "new@example.com");
        assert_eq!(created.role, Role::User);
        assert_eq!(created.status, UserStatus::Active);
    }
}
