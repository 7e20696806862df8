//! Interactive console.
//!
//! The shell routes paths to screens; screens render views to a
//! [`Terminal`] and translate operator choices into view actions.

pub mod context;
pub mod screens;
pub mod shell;
pub mod terminal;

pub use context::ConsoleContext;
pub use screens::ScreenResult;
pub use shell::Shell;
pub use terminal::{ScriptedTerminal, StdioTerminal, Terminal};
