//! Records exchanged with the backend services.
//!
//! Field names follow the services' camelCase JSON; enumerations travel as
//! their SCREAMING_CASE names and parse case-insensitively from operator input.

mod auth;
mod board;
mod page;
mod post;
mod user;

pub use auth::{AuthResponse, Credentials, SignupResponse};
pub use board::{Board, BoardPatch, BoardStatus, NewBoard, Visibility};
pub use page::Page;
pub use post::{NewPost, Post, PostPatch, PostStatus};
pub use user::{Role, StatusUpdate, User, UserStatus};
