//! User list, detail and status editor.

use tracing::{info, warn};

use super::{Feedback, PageCommand, Pager};
use crate::api::{ApiClient, ApiError};
use crate::models::{Page, User, UserStatus};
use crate::query::{QueryCache, QueryKey, QueryState};
use crate::validation::ValidationError;

/// Result of the two-step user status change.
///
/// The identity service is written first, then the membership service. The
/// second write is skipped when the first fails; nothing is rolled back.
#[derive(Debug)]
pub enum StatusUpdateOutcome {
    /// Both services hold the new status. Carries the membership record.
    BothSucceeded(User),
    /// The identity write failed; neither service changed.
    FirstFailed(ApiError),
    /// The identity service changed but the membership service did not.
    SecondFailed {
        /// Record returned by the identity service.
        identity: User,
        /// Membership failure.
        error: ApiError,
    },
}

/// Change a user's status in both services, identity first.
pub async fn update_user_status(
    api: &ApiClient,
    token: &str,
    user: &User,
    status: UserStatus,
) -> StatusUpdateOutcome {
    let identity = match api.update_identity_user_status(token, &user.email, status).await {
        Ok(identity) => identity,
        Err(e) => return StatusUpdateOutcome::FirstFailed(e),
    };
    match api.update_member_status(token, &user.id, status).await {
        Ok(member) => {
            info!(user_id = %user.id, email = %user.email, %status, "user status updated");
            StatusUpdateOutcome::BothSucceeded(member)
        }
        Err(error) => {
            warn!(
                user_id = %user.id,
                email = %user.email,
                %status,
                error = %error,
                "identity and membership status disagree, manual reconciliation needed"
            );
            StatusUpdateOutcome::SecondFailed { identity, error }
        }
    }
}

/// User management view.
#[derive(Debug)]
pub struct UsersView {
    query: String,
    pager: Pager,
    page_size: u32,
    cache: QueryCache<Page<User>>,
    selected: Option<User>,
    feedback: Option<Feedback>,
}

impl UsersView {
    /// Create the view.
    pub fn new(page_size: u32) -> Self {
        Self {
            query: String::new(),
            pager: Pager::default(),
            page_size,
            cache: QueryCache::new(),
            selected: None,
            feedback: None,
        }
    }

    /// Free-text filter.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Change the free-text filter. Returns to page 0.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.trim().to_string();
        self.pager.reset();
    }

    /// Pagination state.
    pub fn pager(&self) -> Pager {
        self.pager
    }

    /// Cache key of the current list.
    pub fn key(&self) -> QueryKey {
        QueryKey::new("users")
            .filter("q", Some(&self.query))
            .page(self.pager.page())
    }

    /// What the list shows.
    pub fn list(&self) -> QueryState<'_, Page<User>> {
        self.cache.state(&self.key())
    }

    /// Page count of the list as last shown.
    pub fn total_pages(&self) -> u32 {
        self.list().data.map(|p| p.total_pages).unwrap_or(0)
    }

    /// Move between pages. Returns whether the page changed.
    pub fn paginate(&mut self, command: PageCommand) -> bool {
        let total = self.total_pages();
        self.pager.apply(command, total)
    }

    /// Fetch the current page unless it is cached.
    pub async fn load(&mut self, api: &ApiClient, token: &str) {
        if self.cache.needs_fetch(&self.key()) {
            self.fetch(api, token).await;
        }
    }

    /// Refetch the current page.
    pub async fn refresh(&mut self, api: &ApiClient, token: &str) {
        self.cache.invalidate();
        self.fetch(api, token).await;
    }

    async fn fetch(&mut self, api: &ApiClient, token: &str) {
        let key = self.key();
        if !self.cache.begin_fetch(&key) {
            return;
        }
        let q = (!self.query.is_empty()).then_some(self.query.as_str());
        let result = api
            .fetch_users(token, self.pager.page(), self.page_size, q)
            .await;
        self.cache.complete(&key, result);
    }

    /// Select a row of the list shown.
    pub fn select(&mut self, id: &str) -> bool {
        let found = self
            .list()
            .data
            .and_then(|page| page.find(|u| u.id == id))
            .cloned();
        match found {
            Some(user) => {
                self.selected = Some(user);
                self.feedback = None;
                true
            }
            None => false,
        }
    }

    /// Select the row at `index` of the list shown.
    pub fn select_index(&mut self, index: usize) -> bool {
        let id = self
            .list()
            .data
            .and_then(|page| page.content.get(index))
            .map(|u| u.id.clone());
        match id {
            Some(id) => self.select(&id),
            None => false,
        }
    }

    /// Close the detail panel.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.feedback = None;
    }

    /// Selected user.
    pub fn selected(&self) -> Option<&User> {
        self.selected.as_ref()
    }

    /// Feedback from the last action.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Change the selected user's status in both services.
    ///
    /// On success the selection takes the returned record and the list is
    /// refetched once. Returns `None` when no user is selected.
    pub async fn update_status(
        &mut self,
        api: &ApiClient,
        token: &str,
        status: UserStatus,
    ) -> Option<StatusUpdateOutcome> {
        let Some(user) = self.selected.clone() else {
            self.feedback = Some(Feedback::invalid(&ValidationError::NothingSelected));
            return None;
        };

        let outcome = update_user_status(api, token, &user, status).await;
        match &outcome {
            StatusUpdateOutcome::BothSucceeded(member) => {
                let mut updated = member.clone();
                if updated.role.is_none() {
                    updated.role = user.role;
                }
                self.selected = Some(updated);
                self.feedback = Some(Feedback::Success("feedback.user_status_updated"));
                self.refresh(api, token).await;
            }
            StatusUpdateOutcome::FirstFailed(e) => {
                self.feedback = Some(Feedback::from_api(e));
            }
            StatusUpdateOutcome::SecondFailed { identity, error } => {
                if let Some(selected) = self.selected.as_mut() {
                    selected.status = identity.status;
                }
                self.feedback = Some(Feedback::Partial(
                    "feedback.user_status_partial",
                    error.message().to_string(),
                ));
                self.refresh(api, token).await;
            }
        }
        Some(outcome)
    }
}
