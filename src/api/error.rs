//! Error normalization for backend calls.

use std::fmt;

use thiserror::Error;

/// The backend operation a request belongs to.
///
/// Each operation has its own default message, used when the service gives
/// no usable `message` of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `POST /api/v1/auth/login`.
    Login,
    /// `POST /api/v1/auth/signup`.
    Signup,
    /// `GET /api/v1/members`.
    FetchUsers,
    /// `PATCH /api/v1/members/{id}/status`.
    UpdateMemberStatus,
    /// `PATCH /api/v1/admin/users/{email}/status`.
    UpdateIdentityStatus,
    /// `GET /api/v1/boards`.
    FetchBoards,
    /// `GET /api/v1/boards/{id}`.
    FetchBoard,
    /// `POST /api/v1/boards`.
    CreateBoard,
    /// `PATCH /api/v1/boards/{id}`.
    UpdateBoard,
    /// `GET /api/v1/boards/{boardId}/posts`.
    FetchPosts,
    /// `GET /api/v1/boards/{boardId}/posts/{postId}`.
    FetchPost,
    /// `POST /api/v1/boards/{boardId}/posts`.
    CreatePost,
    /// `PATCH /api/v1/boards/{boardId}/posts/{postId}`.
    UpdatePost,
    /// `DELETE /api/v1/boards/{boardId}/posts/{postId}`.
    ArchivePost,
}

impl Operation {
    /// Short name used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Login => "login",
            Operation::Signup => "signup",
            Operation::FetchUsers => "fetch_users",
            Operation::UpdateMemberStatus => "update_member_status",
            Operation::UpdateIdentityStatus => "update_identity_status",
            Operation::FetchBoards => "fetch_boards",
            Operation::FetchBoard => "fetch_board",
            Operation::CreateBoard => "create_board",
            Operation::UpdateBoard => "update_board",
            Operation::FetchPosts => "fetch_posts",
            Operation::FetchPost => "fetch_post",
            Operation::CreatePost => "create_post",
            Operation::UpdatePost => "update_post",
            Operation::ArchivePost => "archive_post",
        }
    }

    /// Locale key of the default failure message.
    pub fn message_key(&self) -> &'static str {
        match self {
            Operation::Login => "api.login_failed",
            Operation::Signup => "api.signup_failed",
            Operation::FetchUsers => "api.fetch_users_failed",
            Operation::UpdateMemberStatus => "api.update_member_status_failed",
            Operation::UpdateIdentityStatus => "api.update_identity_status_failed",
            Operation::FetchBoards => "api.fetch_boards_failed",
            Operation::FetchBoard => "api.fetch_board_failed",
            Operation::CreateBoard => "api.create_board_failed",
            Operation::UpdateBoard => "api.update_board_failed",
            Operation::FetchPosts => "api.fetch_posts_failed",
            Operation::FetchPost => "api.fetch_post_failed",
            Operation::CreatePost => "api.create_post_failed",
            Operation::UpdatePost => "api.update_post_failed",
            Operation::ArchivePost => "api.archive_post_failed",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A failed backend call.
///
/// `Display` yields the message to show the operator: the service's own
/// `message` when it sent one, otherwise the operation's localized default.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("{message}")]
    Transport {
        /// Operation that failed.
        operation: Operation,
        /// Message to show.
        message: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Status {
        /// Operation that failed.
        operation: Operation,
        /// HTTP status code.
        status: u16,
        /// Message to show.
        message: String,
        /// Whether `message` came from the response body.
        from_server: bool,
    },

    /// A 2xx response whose body could not be decoded.
    #[error("{message}")]
    Decode {
        /// Operation that failed.
        operation: Operation,
        /// Message to show.
        message: String,
        /// Decoding failure.
        detail: String,
    },

    /// The request URL could not be built.
    #[error("{message}")]
    InvalidUrl {
        /// Operation that failed.
        operation: Operation,
        /// Message to show.
        message: String,
        /// Parse failure.
        detail: String,
    },
}

impl ApiError {
    /// Operation that failed.
    pub fn operation(&self) -> Operation {
        match self {
            ApiError::Transport { operation, .. }
            | ApiError::Status { operation, .. }
            | ApiError::Decode { operation, .. }
            | ApiError::InvalidUrl { operation, .. } => *operation,
        }
    }

    /// HTTP status, when the service answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message to show the operator.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Transport { message, .. }
            | ApiError::Status { message, .. }
            | ApiError::Decode { message, .. }
            | ApiError::InvalidUrl { message, .. } => message,
        }
    }

    /// Whether the service rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

/// Pull a usable `message` out of an error body.
///
/// Returns `None` for unparsable bodies and for blank or non-string messages.
pub fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("message")?.as_str()?.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}
