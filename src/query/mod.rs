//! Explicit cache for paginated list queries.
//!
//! Entries are keyed by entity, filters and page. While a key has no data of
//! its own, reads fall back to the page shown last so a list keeps its rows
//! during a page or filter change.
//!
//! A cache holds at most [`MAX_ENTRIES`] results. Invalidation drops every
//! idle entry except the one shown last.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::debug;

use crate::api::ApiError;

/// Results kept per cache before the least recently filled idle entry is dropped.
pub const MAX_ENTRIES: usize = 16;

/// Identity of a list query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    entity: &'static str,
    filters: BTreeMap<&'static str, String>,
    page: u32,
}

impl QueryKey {
    /// Key for page 0 of an entity with no filters.
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            filters: BTreeMap::new(),
            page: 0,
        }
    }

    /// Add a filter. Empty or absent values are not part of the key.
    pub fn filter(mut self, name: &'static str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value.map(|v| v.to_string()) {
            if !value.trim().is_empty() {
                self.filters.insert(name, value.trim().to_string());
            }
        }
        self
    }

    /// Set the page index.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.entity)?;
        for (i, (name, value)) in self.filters.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{name}={value}")?;
        }
        write!(f, "]#{}", self.page)
    }
}

#[derive(Debug)]
struct Entry<T> {
    data: Option<T>,
    in_flight: bool,
    stale: bool,
    error: Option<String>,
    filled: u64,
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Self {
            data: None,
            in_flight: false,
            stale: false,
            error: None,
            filled: 0,
        }
    }
}

/// What a view shows for a key.
#[derive(Debug)]
pub struct QueryState<'a, T> {
    /// Rows to show: the key's own data, or the last shown data as a placeholder.
    pub data: Option<&'a T>,
    /// Whether `data` belongs to a different key.
    pub is_placeholder: bool,
    /// Nothing to show yet and a fetch is outstanding.
    pub is_loading: bool,
    /// A fetch for the key is outstanding.
    pub is_fetching: bool,
    /// Message of the last failed fetch for the key.
    pub error: Option<&'a str>,
}

/// Cache of list results of one type.
#[derive(Debug)]
pub struct QueryCache<T> {
    entries: HashMap<QueryKey, Entry<T>>,
    last_shown: Option<QueryKey>,
    fills: u64,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            last_shown: None,
            fills: 0,
        }
    }
}

impl<T> QueryCache<T> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether reading `key` requires a fetch.
    pub fn needs_fetch(&self, key: &QueryKey) -> bool {
        match self.entries.get(key) {
            Some(entry) => !entry.in_flight && (entry.data.is_none() || entry.stale),
            None => true,
        }
    }

    /// Mark a fetch for `key` as started.
    ///
    /// Returns `false` when a fetch for the same key is already outstanding.
    pub fn begin_fetch(&mut self, key: &QueryKey) -> bool {
        let entry = self.entries.entry(key.clone()).or_default();
        if entry.in_flight {
            debug!(key = %key, "fetch already in flight");
            return false;
        }
        entry.in_flight = true;
        true
    }

    /// Record the outcome of a fetch.
    ///
    /// A failure keeps the key's previous data.
    pub fn complete(&mut self, key: &QueryKey, result: Result<T, ApiError>) {
        self.fills += 1;
        let entry = self.entries.entry(key.clone()).or_default();
        entry.in_flight = false;
        match result {
            Ok(data) => {
                entry.data = Some(data);
                entry.stale = false;
                entry.error = None;
                entry.filled = self.fills;
                self.last_shown = Some(key.clone());
            }
            Err(e) => {
                entry.error = Some(e.message().to_string());
            }
        }
        self.evict();
    }

    fn evict(&mut self) {
        while self.entries.len() > MAX_ENTRIES {
            let oldest = self
                .entries
                .iter()
                .filter(|(key, entry)| !entry.in_flight && self.last_shown.as_ref() != Some(*key))
                .min_by_key(|(_, entry)| entry.filled)
                .map(|(key, _)| key.clone());
            let Some(oldest) = oldest else {
                break;
            };
            debug!(key = %oldest, "evicting cached page");
            self.entries.remove(&oldest);
        }
    }

    /// State of `key` for display.
    pub fn state(&self, key: &QueryKey) -> QueryState<'_, T> {
        let entry = self.entries.get(key);
        let own = entry.and_then(|e| e.data.as_ref());
        let is_fetching = entry.is_some_and(|e| e.in_flight);

        let (data, is_placeholder) = match own {
            Some(data) => (Some(data), false),
            None => {
                let fallback = self
                    .last_shown
                    .as_ref()
                    .filter(|last| last.entity == key.entity)
                    .and_then(|last| self.entries.get(last))
                    .and_then(|e| e.data.as_ref());
                (fallback, fallback.is_some())
            }
        };

        QueryState {
            data,
            is_placeholder,
            is_loading: data.is_none() && is_fetching,
            is_fetching,
            error: entry.and_then(|e| e.error.as_deref()),
        }
    }

    /// Force the next read of any key to refetch.
    ///
    /// The last shown entry and in-flight entries are kept (marked stale) so
    /// the list stays visible; every other entry is dropped.
    pub fn invalidate(&mut self) {
        let last_shown = &self.last_shown;
        self.entries
            .retain(|key, entry| entry.in_flight || last_shown.as_ref() == Some(key));
        for entry in self.entries.values_mut() {
            entry.stale = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Operation;

    fn failure(message: &str) -> ApiError {
        ApiError::Status {
            operation: Operation::FetchBoards,
            status: 500,
            message: message.to_string(),
            from_server: true,
        }
    }

    #[test]
    fn test_key_ignores_empty_filters() {
        let a = QueryKey::new("boards").filter("q", Some("")).filter("status", None::<&str>);
        let b = QueryKey::new("boards");
        assert_eq!(a, b);

        let c = QueryKey::new("boards").filter("q", Some(" ann ")).page(2);
        assert_eq!(c.to_string(), "boards[q=ann]#2");
    }

    #[test]
    fn test_loading_then_data() {
        let mut cache = QueryCache::new();
        let key = QueryKey::new("users");
        assert!(cache.needs_fetch(&key));
        assert!(cache.begin_fetch(&key));

        let state = cache.state(&key);
        assert!(state.is_loading);
        assert!(state.is_fetching);
        assert!(state.data.is_none());

        cache.complete(&key, Ok(vec![1, 2, 3]));
        let state = cache.state(&key);
        assert!(!state.is_loading);
        assert!(!state.is_fetching);
        assert_eq!(state.data, Some(&vec![1, 2, 3]));
        assert!(!cache.needs_fetch(&key));
    }

    #[test]
    fn test_in_flight_dedup() {
        let mut cache: QueryCache<u8> = QueryCache::new();
        let key = QueryKey::new("users");
        assert!(cache.begin_fetch(&key));
        assert!(!cache.begin_fetch(&key));
        assert!(!cache.needs_fetch(&key));
        cache.complete(&key, Ok(1));
        assert!(cache.begin_fetch(&key));
    }

    #[test]
    fn test_placeholder_keeps_previous_page() {
        let mut cache = QueryCache::new();
        let first = QueryKey::new("boards");
        cache.begin_fetch(&first);
        cache.complete(&first, Ok("page0"));

        let second = QueryKey::new("boards").page(1);
        cache.begin_fetch(&second);
        let state = cache.state(&second);
        assert_eq!(state.data, Some(&"page0"));
        assert!(state.is_placeholder);
        assert!(!state.is_loading);
        assert!(state.is_fetching);

        cache.complete(&second, Ok("page1"));
        let state = cache.state(&second);
        assert_eq!(state.data, Some(&"page1"));
        assert!(!state.is_placeholder);
    }

    #[test]
    fn test_placeholder_not_shared_across_entities() {
        let mut cache = QueryCache::new();
        let boards = QueryKey::new("boards");
        cache.begin_fetch(&boards);
        cache.complete(&boards, Ok(1));
        assert!(cache.state(&QueryKey::new("posts")).data.is_none());
    }

    #[test]
    fn test_error_keeps_data() {
        let mut cache = QueryCache::new();
        let key = QueryKey::new("boards");
        cache.begin_fetch(&key);
        cache.complete(&key, Ok(7));
        cache.invalidate();
        assert!(cache.needs_fetch(&key));

        cache.begin_fetch(&key);
        cache.complete(&key, Err(failure("boom")));
        let state = cache.state(&key);
        assert_eq!(state.data, Some(&7));
        assert_eq!(state.error, Some("boom"));
        assert!(cache.needs_fetch(&key));

        cache.begin_fetch(&key);
        cache.complete(&key, Ok(8));
        assert_eq!(cache.state(&key).error, None);
    }

    #[test]
    fn test_invalidate_drops_idle_pages() {
        let mut cache = QueryCache::new();
        for page in 0..3 {
            let key = QueryKey::new("boards").page(page);
            cache.begin_fetch(&key);
            cache.complete(&key, Ok(page));
        }
        let pending = QueryKey::new("boards").page(7);
        cache.begin_fetch(&pending);
        assert_eq!(cache.entries.len(), 4);

        cache.invalidate();
        assert_eq!(cache.entries.len(), 2);
        let last = QueryKey::new("boards").page(2);
        assert_eq!(cache.state(&last).data, Some(&2));
        assert!(cache.needs_fetch(&last));
        assert!(cache.state(&QueryKey::new("boards")).is_placeholder);
    }

    #[test]
    fn test_cache_is_bounded() {
        let mut cache = QueryCache::new();
        for page in 0..(MAX_ENTRIES as u32 + 5) {
            let key = QueryKey::new("users").page(page);
            cache.begin_fetch(&key);
            cache.complete(&key, Ok(page));
        }
        assert_eq!(cache.entries.len(), MAX_ENTRIES);

        // Oldest pages go first; the last one shown stays.
        assert!(cache.state(&QueryKey::new("users")).is_placeholder);
        let newest = QueryKey::new("users").page(MAX_ENTRIES as u32 + 4);
        assert!(!cache.state(&newest).is_placeholder);
        let kept = QueryKey::new("users").page(5);
        assert_eq!(cache.state(&kept).data, Some(&5));
    }
}
