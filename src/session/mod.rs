//! Session layer: the user and admin sessions and their persistence.

mod holder;
mod storage;

pub use holder::{AuthState, Session, SessionHolder, SessionScope};
pub use storage::SessionStore;
