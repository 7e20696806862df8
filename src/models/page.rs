//! The pagination envelope shared by every list endpoint.

use serde::{Deserialize, Serialize};

/// One page of a list result.
///
/// Missing envelope fields decode as empty/zero so a bare `{"content": []}`
/// is still a valid page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Rows on this page.
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    /// Zero-based page index.
    #[serde(default)]
    pub page: u32,
    /// Requested page size.
    #[serde(default)]
    pub size: u32,
    /// Rows across all pages.
    #[serde(default)]
    pub total_elements: u64,
    /// Number of pages.
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Create a page.
    pub fn new(content: Vec<T>, page: u32, size: u32, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(u64::from(size)) as u32
        };
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }

    /// Check if the page has no rows.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Find a row on this page.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.content.iter().find(|item| predicate(item))
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            page: 0,
            size: 0,
            total_elements: 0,
            total_pages: 0,
        }
    }
}
