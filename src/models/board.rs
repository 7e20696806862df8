//! Board records and request bodies.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who can see a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    /// Listed for every signed-in user.
    #[default]
    Public,
    /// Admin-only.
    Private,
}

impl Visibility {
    /// All visibilities in display order.
    pub const ALL: [Visibility; 2] = [Visibility::Public, Visibility::Private];

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "PUBLIC",
            Visibility::Private => "PRIVATE",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PUBLIC" => Ok(Visibility::Public),
            "PRIVATE" => Ok(Visibility::Private),
            _ => Err(format!("unknown visibility: {s}")),
        }
    }
}

/// Board lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoardStatus {
    /// Open for reading and posting.
    #[default]
    Active,
    /// Closed.
    Inactive,
}

impl BoardStatus {
    /// All statuses in display order.
    pub const ALL: [BoardStatus; 2] = [BoardStatus::Active, BoardStatus::Inactive];

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardStatus::Active => "ACTIVE",
            BoardStatus::Inactive => "INACTIVE",
        }
    }
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BoardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Ok(BoardStatus::Active),
            "INACTIVE" => Ok(BoardStatus::Inactive),
            _ => Err(format!("unknown board status: {s}")),
        }
    }
}

/// A board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Identifier (a UUID string).
    pub id: String,
    /// Board name.
    pub name: String,
    /// Visibility.
    pub visibility: Visibility,
    /// Lifecycle status.
    pub status: BoardStatus,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/v1/boards`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBoard {
    /// Board name (already trimmed).
    pub name: String,
    /// Visibility.
    pub visibility: Visibility,
}

/// Body of `PATCH /api/v1/boards/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardPatch {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BoardStatus>,
}

impl BoardPatch {
    /// A patch that only changes the status.
    pub fn status(status: BoardStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Check whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.visibility.is_none() && self.status.is_none()
    }
}
