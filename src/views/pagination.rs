//! Page navigation shared by the list views.

use std::str::FromStr;

/// A pagination request from the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCommand {
    /// Jump to page 0.
    First,
    /// Go back one page.
    Prev,
    /// Go forward one page.
    Next,
    /// Jump to the last page.
    Last,
    /// Jump to a zero-based page index.
    Goto(u32),
}

impl FromStr for PageCommand {
    type Err = String;

    /// Parse console input: `<<`, `<`, `>`, `>>` or a one-based page number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<<" => Ok(PageCommand::First),
            "<" => Ok(PageCommand::Prev),
            ">" => Ok(PageCommand::Next),
            ">>" => Ok(PageCommand::Last),
            other => match other.parse::<u32>() {
                Ok(n) if n >= 1 => Ok(PageCommand::Goto(n - 1)),
                _ => Err(format!("not a page command: {s}")),
            },
        }
    }
}

/// Current page index of a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pager {
    page: u32,
}

impl Pager {
    /// Current zero-based page.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Go back to page 0.
    pub fn reset(&mut self) {
        self.page = 0;
    }

    /// Apply a command against a list of `total_pages` pages.
    ///
    /// The result is clamped to `[0, total_pages - 1]` (page 0 for an empty
    /// list). Returns whether the page changed.
    pub fn apply(&mut self, command: PageCommand, total_pages: u32) -> bool {
        let last = total_pages.saturating_sub(1);
        let target = match command {
            PageCommand::First => 0,
            PageCommand::Prev => self.page.saturating_sub(1),
            PageCommand::Next => self.page.saturating_add(1),
            PageCommand::Last => last,
            PageCommand::Goto(page) => page,
        }
        .min(last);
        let changed = target != self.page;
        self.page = target;
        changed
    }

    /// One-based page number and page count for display.
    pub fn label(&self, total_pages: u32) -> (u32, u32) {
        (self.page + 1, total_pages.max(1))
    }
}
