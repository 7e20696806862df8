//! Board list, detail, status editor and create form.
//!
//! The same view backs the public board reader, where the visibility and
//! status filters are pinned to PUBLIC and ACTIVE and nothing but posts can be
//! created.

use super::{Feedback, PageCommand, Pager, PostsView};
use crate::api::ApiClient;
use crate::models::{Board, BoardPatch, BoardStatus, Page, Visibility};
use crate::query::{QueryCache, QueryKey, QueryState};
use crate::validation::{self, ValidationError};

/// Who the board view is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardsMode {
    /// Board management in the admin area.
    Admin,
    /// The signed-in user's board reader.
    Reader,
}

/// Board view.
#[derive(Debug)]
pub struct BoardsView {
    mode: BoardsMode,
    query: String,
    visibility: Option<Visibility>,
    status: Option<BoardStatus>,
    pager: Pager,
    page_size: u32,
    cache: QueryCache<Page<Board>>,
    selected: Option<Board>,
    posts: Option<PostsView>,
    /// Name field of the create form.
    pub new_name: String,
    /// Visibility field of the create form.
    pub new_visibility: Visibility,
    feedback: Option<Feedback>,
}

impl BoardsView {
    /// Create the view.
    pub fn new(mode: BoardsMode, page_size: u32) -> Self {
        let (visibility, status) = match mode {
            BoardsMode::Admin => (None, None),
            BoardsMode::Reader => (Some(Visibility::Public), Some(BoardStatus::Active)),
        };
        Self {
            mode,
            query: String::new(),
            visibility,
            status,
            pager: Pager::default(),
            page_size,
            cache: QueryCache::new(),
            selected: None,
            posts: None,
            new_name: String::new(),
            new_visibility: Visibility::Public,
            feedback: None,
        }
    }

    /// Who the view is for.
    pub fn mode(&self) -> BoardsMode {
        self.mode
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

    /// Visibility filter.
    pub fn visibility_filter(&self) -> Option<Visibility> {
        self.visibility
    }

    /// Change the visibility filter. Returns to page 0; ignored by the reader.
    pub fn set_visibility_filter(&mut self, visibility: Option<Visibility>) {
        if self.mode == BoardsMode::Admin {
            self.visibility = visibility;
            self.pager.reset();
        }
    }

    /// Status filter.
    pub fn status_filter(&self) -> Option<BoardStatus> {
        self.status
    }

    /// Change the status filter. Returns to page 0; ignored by the reader.
    pub fn set_status_filter(&mut self, status: Option<BoardStatus>) {
        if self.mode == BoardsMode::Admin {
            self.status = status;
            self.pager.reset();
        }
    }

    /// Pagination state.
    pub fn pager(&self) -> Pager {
        self.pager
    }

    /// Cache key of the current list.
    pub fn key(&self) -> QueryKey {
        let entity = match self.mode {
            BoardsMode::Admin => "boards",
            BoardsMode::Reader => "boards-public",
        };
        QueryKey::new(entity)
            .filter("q", Some(&self.query))
            .filter("visibility", self.visibility)
            .filter("status", self.status)
            .page(self.pager.page())
    }

    /// What the list shows.
    pub fn list(&self) -> QueryState<'_, Page<Board>> {
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
            .fetch_boards(
                token,
                self.pager.page(),
                self.page_size,
                q,
                self.visibility,
                self.status,
            )
            .await;
        self.cache.complete(&key, result);
    }

    /// Select a board of the list shown and open its posts.
    pub fn select(&mut self, id: &str) -> bool {
        let found = self
            .list()
            .data
            .and_then(|page| page.find(|b| b.id == id))
            .cloned();
        match found {
            Some(board) => {
                self.open(board);
                true
            }
            None => false,
        }
    }

    /// Select the board at `index` of the list shown.
    pub fn select_index(&mut self, index: usize) -> bool {
        let id = self
            .list()
            .data
            .and_then(|page| page.content.get(index))
            .map(|b| b.id.clone());
        match id {
            Some(id) => self.select(&id),
            None => false,
        }
    }

    fn open(&mut self, board: Board) {
        self.posts = Some(PostsView::new(&board.id, self.mode, self.page_size));
        self.selected = Some(board);
        self.feedback = None;
    }

    /// Close the detail panel and its posts.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.posts = None;
        self.feedback = None;
    }

    /// Selected board.
    pub fn selected(&self) -> Option<&Board> {
        self.selected.as_ref()
    }

    /// Posts of the selected board.
    pub fn posts(&self) -> Option<&PostsView> {
        self.posts.as_ref()
    }

    /// Posts of the selected board, mutably.
    pub fn posts_mut(&mut self) -> Option<&mut PostsView> {
        self.posts.as_mut()
    }

    /// Feedback from the last action.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Create a board from the form fields and refetch the list once.
    pub async fn create(&mut self, api: &ApiClient, token: &str) -> bool {
        if self.mode == BoardsMode::Reader {
            return false;
        }
        let name = match validation::validate_board_name(&self.new_name) {
            Ok(name) => name,
            Err(e) => {
                self.feedback = Some(Feedback::invalid(&e));
                return false;
            }
        };
        match api.create_board(token, &name, self.new_visibility).await {
            Ok(_) => {
                self.new_name.clear();
                self.feedback = Some(Feedback::Success("feedback.board_created"));
                self.refresh(api, token).await;
                true
            }
            Err(e) => {
                self.feedback = Some(Feedback::from_api(&e));
                false
            }
        }
    }

    /// Patch the selected board.
    ///
    /// On success the selection takes the returned record and the list is
    /// refetched once.
    pub async fn update(&mut self, api: &ApiClient, token: &str, patch: &BoardPatch) -> bool {
        if self.mode == BoardsMode::Reader {
            return false;
        }
        let Some(id) = self.selected.as_ref().map(|b| b.id.clone()) else {
            self.feedback = Some(Feedback::invalid(&ValidationError::NoBoardSelected));
            return false;
        };
        let mut patch = patch.clone();
        if let Some(name) = patch.name.take() {
            match validation::validate_board_name(&name) {
                Ok(trimmed) => patch.name = Some(trimmed),
                Err(e) => {
                    self.feedback = Some(Feedback::invalid(&e));
                    return false;
                }
            }
        }
        match api.update_board(token, &id, &patch).await {
            Ok(board) => {
                self.selected = Some(board);
                self.feedback = Some(Feedback::Success("feedback.board_updated"));
                self.refresh(api, token).await;
                true
            }
            Err(e) => {
                self.feedback = Some(Feedback::from_api(&e));
                false
            }
        }
    }

    /// Change the status of the selected board.
    pub async fn update_status(&mut self, api: &ApiClient, token: &str, status: BoardStatus) -> bool {
        self.update(api, token, &BoardPatch::status(status)).await
    }

    /// Re-read the selected board from its detail endpoint.
    pub async fn reload_selected(&mut self, api: &ApiClient, token: &str) -> bool {
        let Some(id) = self.selected.as_ref().map(|b| b.id.clone()) else {
            self.feedback = Some(Feedback::invalid(&ValidationError::NoBoardSelected));
            return false;
        };
        match api.fetch_board(token, &id).await {
            Ok(board) => {
                self.selected = Some(board);
                true
            }
            Err(e) => {
                self.feedback = Some(Feedback::from_api(&e));
                false
            }
        }
    }
}
