//! Post records and request bodies.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    /// Not yet visible to readers.
    #[default]
    Draft,
    /// Visible to readers.
    Published,
    /// Soft-deleted.
    Archived,
}

impl PostStatus {
    /// All statuses in display order.
    pub const ALL: [PostStatus; 3] = [PostStatus::Draft, PostStatus::Published, PostStatus::Archived];

    /// Statuses a new post may be created with.
    pub const CREATABLE: [PostStatus; 2] = [PostStatus::Draft, PostStatus::Published];

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "DRAFT",
            PostStatus::Published => "PUBLISHED",
            PostStatus::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DRAFT" => Ok(PostStatus::Draft),
            "PUBLISHED" => Ok(PostStatus::Published),
            "ARCHIVED" => Ok(PostStatus::Archived),
            _ => Err(format!("unknown post status: {s}")),
        }
    }
}

/// A post on a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Identifier (a UUID string).
    pub id: String,
    /// Owning board.
    pub board_id: String,
    /// Author's login email.
    pub author_email: String,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Lifecycle status.
    pub status: PostStatus,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/v1/boards/{boardId}/posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPost {
    /// Title (already trimmed).
    pub title: String,
    /// Body text (already trimmed).
    pub content: String,
    /// Initial status; the service defaults to DRAFT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}

/// Body of `PATCH /api/v1/boards/{boardId}/posts/{postId}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostPatch {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}

impl PostPatch {
    /// A patch that only changes the status.
    pub fn status(status: PostStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}
