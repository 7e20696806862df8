//! Board service calls for boards.

use reqwest::Method;
use tracing::info;

use super::{ApiClient, ApiError, Operation, Service};
use crate::models::{Board, BoardPatch, BoardStatus, NewBoard, Page, Visibility};

impl ApiClient {
    /// List boards with optional query, visibility and status filters.
    pub async fn fetch_boards(
        &self,
        token: &str,
        page: u32,
        size: u32,
        q: Option<&str>,
        visibility: Option<Visibility>,
        status: Option<BoardStatus>,
    ) -> Result<Page<Board>, ApiError> {
        let op = Operation::FetchBoards;
        let url = self.url(
            op,
            Service::Board,
            &["api", "v1", "boards"],
            &[
                ("page", Some(page.to_string())),
                ("size", Some(size.to_string())),
                ("q", q.map(|s| s.trim().to_string())),
                ("visibility", visibility.map(|v| v.as_str().to_string())),
                ("status", status.map(|s| s.as_str().to_string())),
            ],
        )?;
        self.send_json(op, self.request(Method::GET, url, Some(token)))
            .await
    }

    /// Read a single board.
    pub async fn fetch_board(&self, token: &str, id: &str) -> Result<Board, ApiError> {
        let op = Operation::FetchBoard;
        let url = self.url(op, Service::Board, &["api", "v1", "boards", id], &[])?;
        self.send_json(op, self.request(Method::GET, url, Some(token)))
            .await
    }

    /// Create a board.
    pub async fn create_board(
        &self,
        token: &str,
        name: &str,
        visibility: Visibility,
    ) -> Result<Board, ApiError> {
        let op = Operation::CreateBoard;
        let url = self.url(op, Service::Board, &["api", "v1", "boards"], &[])?;
        let body = NewBoard {
            name: name.to_string(),
            visibility,
        };
        let board: Board = self
            .send_json(op, self.request(Method::POST, url, Some(token)).json(&body))
            .await?;
        info!(board_id = %board.id, name = %board.name, "board created");
        Ok(board)
    }

    /// Patch a board's name, visibility or status.
    pub async fn update_board(
        &self,
        token: &str,
        id: &str,
        patch: &BoardPatch,
    ) -> Result<Board, ApiError> {
        let op = Operation::UpdateBoard;
        let url = self.url(op, Service::Board, &["api", "v1", "boards", id], &[])?;
        let board: Board = self
            .send_json(op, self.request(Method::PATCH, url, Some(token)).json(patch))
            .await?;
        info!(board_id = %board.id, status = %board.status, "board updated");
        Ok(board)
    }
}
