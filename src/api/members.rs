//! Membership service calls.

use reqwest::Method;

use super::{ApiClient, ApiError, Operation, Service};
use crate::models::{Page, StatusUpdate, User, UserStatus};

impl ApiClient {
    /// List members, optionally filtered by a free-text query.
    pub async fn fetch_users(
        &self,
        token: &str,
        page: u32,
        size: u32,
        q: Option<&str>,
    ) -> Result<Page<User>, ApiError> {
        let op = Operation::FetchUsers;
        let url = self.url(
            op,
            Service::Member,
            &["api", "v1", "members"],
            &[
                ("page", Some(page.to_string())),
                ("size", Some(size.to_string())),
                ("q", q.map(|s| s.trim().to_string())),
            ],
        )?;
        self.send_json(op, self.request(Method::GET, url, Some(token)))
            .await
    }

    /// Change a member's status, addressed by id.
    pub async fn update_member_status(
        &self,
        token: &str,
        id: &str,
        status: UserStatus,
    ) -> Result<User, ApiError> {
        let op = Operation::UpdateMemberStatus;
        let url = self.url(
            op,
            Service::Member,
            &["api", "v1", "members", id, "status"],
            &[],
        )?;
        let builder = self
            .request(Method::PATCH, url, Some(token))
            .json(&StatusUpdate { status });
        self.send_json(op, builder).await
    }
}
