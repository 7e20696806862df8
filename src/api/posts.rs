//! Board service calls for posts.

use reqwest::Method;
use tracing::info;

use super::{ApiClient, ApiError, Operation, Service};
use crate::models::{NewPost, Page, Post, PostPatch, PostStatus};

impl ApiClient {
    /// List the posts of a board with optional status and author filters.
    pub async fn fetch_posts(
        &self,
        token: &str,
        board_id: &str,
        page: u32,
        size: u32,
        status: Option<PostStatus>,
        author: Option<&str>,
    ) -> Result<Page<Post>, ApiError> {
        let op = Operation::FetchPosts;
        let url = self.url(
            op,
            Service::Board,
            &["api", "v1", "boards", board_id, "posts"],
            &[
                ("page", Some(page.to_string())),
                ("size", Some(size.to_string())),
                ("status", status.map(|s| s.as_str().to_string())),
                ("author", author.map(|s| s.trim().to_string())),
            ],
        )?;
        self.send_json(op, self.request(Method::GET, url, Some(token)))
            .await
    }

    /// Read a single post.
    pub async fn fetch_post(
        &self,
        token: &str,
        board_id: &str,
        post_id: &str,
    ) -> Result<Post, ApiError> {
        let op = Operation::FetchPost;
        let url = self.url(
            op,
            Service::Board,
            &["api", "v1", "boards", board_id, "posts", post_id],
            &[],
        )?;
        self.send_json(op, self.request(Method::GET, url, Some(token)))
            .await
    }

    /// Create a post. Without a status the service creates a draft.
    pub async fn create_post(
        &self,
        token: &str,
        board_id: &str,
        title: &str,
        content: &str,
        status: Option<PostStatus>,
    ) -> Result<Post, ApiError> {
        let op = Operation::CreatePost;
        let url = self.url(
            op,
            Service::Board,
            &["api", "v1", "boards", board_id, "posts"],
            &[],
        )?;
        let body = NewPost {
            title: title.to_string(),
            content: content.to_string(),
            status,
        };
        let post: Post = self
            .send_json(op, self.request(Method::POST, url, Some(token)).json(&body))
            .await?;
        info!(board_id, post_id = %post.id, status = %post.status, "post created");
        Ok(post)
    }

    /// Patch a post's title, content or status.
    pub async fn update_post(
        &self,
        token: &str,
        board_id: &str,
        post_id: &str,
        patch: &PostPatch,
    ) -> Result<Post, ApiError> {
        let op = Operation::UpdatePost;
        let url = self.url(
            op,
            Service::Board,
            &["api", "v1", "boards", board_id, "posts", post_id],
            &[],
        )?;
        let post: Post = self
            .send_json(op, self.request(Method::PATCH, url, Some(token)).json(patch))
            .await?;
        info!(board_id, post_id, status = %post.status, "post updated");
        Ok(post)
    }

    /// Archive (soft-delete) a post.
    pub async fn archive_post(
        &self,
        token: &str,
        board_id: &str,
        post_id: &str,
    ) -> Result<(), ApiError> {
        let op = Operation::ArchivePost;
        let url = self.url(
            op,
            Service::Board,
            &["api", "v1", "boards", board_id, "posts", post_id],
            &[],
        )?;
        self.send_empty(op, self.request(Method::DELETE, url, Some(token)))
            .await?;
        info!(board_id, post_id, "post archived");
        Ok(())
    }
}
