//! Console screens, one per routed view.

mod boards;
mod login;
mod posts;
mod users;

pub use boards::BoardsScreen;
pub use login::LoginScreen;
pub use posts::PostsScreen;
pub use users::UsersScreen;

/// Result of running a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenResult {
    /// Go back to the previous screen.
    Back,
    /// Show another path.
    Navigate(String),
    /// Leave the console.
    Quit,
}

impl ScreenResult {
    /// Navigate to `path`.
    pub fn to(path: &str) -> Self {
        ScreenResult::Navigate(path.to_string())
    }
}
