//! Posts of one board: list, editor and archive.

use super::{BoardsMode, Feedback, PageCommand, Pager};
use crate::api::ApiClient;
use crate::models::{Page, Post, PostPatch, PostStatus};
use crate::query::{QueryCache, QueryKey, QueryState};
use crate::validation::{self, ValidationError};

/// Post view for the selected board.
///
/// In reader mode the status filter starts at PUBLISHED and new posts are
/// always published.
#[derive(Debug)]
pub struct PostsView {
    board_id: String,
    mode: BoardsMode,
    status: Option<PostStatus>,
    author: String,
    pager: Pager,
    page_size: u32,
    cache: QueryCache<Page<Post>>,
    selected: Option<Post>,
    /// Title field of the create form and the editor.
    pub title: String,
    /// Content field of the create form and the editor.
    pub content: String,
    /// Status field of the create form and the editor.
    pub status_input: PostStatus,
    feedback: Option<Feedback>,
}

impl PostsView {
    /// Open the posts of `board_id` at page 0 with nothing selected.
    pub fn new(board_id: &str, mode: BoardsMode, page_size: u32) -> Self {
        let (status, status_input) = match mode {
            BoardsMode::Admin => (None, PostStatus::Draft),
            BoardsMode::Reader => (Some(PostStatus::Published), PostStatus::Published),
        };
        Self {
            board_id: board_id.to_string(),
            mode,
            status,
            author: String::new(),
            pager: Pager::default(),
            page_size,
            cache: QueryCache::new(),
            selected: None,
            title: String::new(),
            content: String::new(),
            status_input,
            feedback: None,
        }
    }

    /// Board the posts belong to.
    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    /// Status filter.
    pub fn status_filter(&self) -> Option<PostStatus> {
        self.status
    }

    /// Change the status filter. Returns to page 0.
    pub fn set_status_filter(&mut self, status: Option<PostStatus>) {
        self.status = status;
        self.pager.reset();
    }

    /// Author filter.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Change the author filter. Returns to page 0.
    pub fn set_author(&mut self, author: &str) {
        self.author = author.trim().to_string();
        self.pager.reset();
    }

    /// Pagination state.
    pub fn pager(&self) -> Pager {
        self.pager
    }

    /// Cache key of the current list.
    pub fn key(&self) -> QueryKey {
        QueryKey::new("posts")
            .filter("board", Some(&self.board_id))
            .filter("status", self.status)
            .filter("author", Some(&self.author))
            .page(self.pager.page())
    }

    /// What the list shows.
    pub fn list(&self) -> QueryState<'_, Page<Post>> {
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
        let author = (!self.author.is_empty()).then_some(self.author.as_str());
        let result = api
            .fetch_posts(
                token,
                &self.board_id,
                self.pager.page(),
                self.page_size,
                self.status,
                author,
            )
            .await;
        self.cache.complete(&key, result);
    }

    /// Select a post of the list shown and load it into the editor.
    pub fn select(&mut self, id: &str) -> bool {
        let found = self
            .list()
            .data
            .and_then(|page| page.find(|p| p.id == id))
            .cloned();
        match found {
            Some(post) => {
                self.load_editor(post);
                self.feedback = None;
                true
            }
            None => false,
        }
    }

    /// Select the post at `index` of the list shown.
    pub fn select_index(&mut self, index: usize) -> bool {
        let id = self
            .list()
            .data
            .and_then(|page| page.content.get(index))
            .map(|p| p.id.clone());
        match id {
            Some(id) => self.select(&id),
            None => false,
        }
    }

    fn load_editor(&mut self, post: Post) {
        self.title = post.title.clone();
        self.content = post.content.clone();
        self.status_input = post.status;
        self.selected = Some(post);
    }

    /// Leave the editor and reset the form for a new post.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.title.clear();
        self.content.clear();
        self.status_input = match self.mode {
            BoardsMode::Admin => PostStatus::Draft,
            BoardsMode::Reader => PostStatus::Published,
        };
        self.feedback = None;
    }

    /// Selected post.
    pub fn selected(&self) -> Option<&Post> {
        self.selected.as_ref()
    }

    /// Feedback from the last action.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Create a post from the form fields.
    ///
    /// On success the new post is selected, the form is cleared and the list
    /// is refetched once.
    pub async fn create(&mut self, api: &ApiClient, token: &str) -> bool {
        let (title, content) = match validation::validate_post_fields(&self.title, &self.content) {
            Ok(fields) => fields,
            Err(e) => {
                self.feedback = Some(Feedback::invalid(&e));
                return false;
            }
        };
        let status = match self.mode {
            BoardsMode::Reader => PostStatus::Published,
            BoardsMode::Admin if self.status_input == PostStatus::Archived => PostStatus::Draft,
            BoardsMode::Admin => self.status_input,
        };

        match api
            .create_post(token, &self.board_id, &title, &content, Some(status))
            .await
        {
            Ok(post) => {
                self.title.clear();
                self.content.clear();
                self.selected = Some(post);
                self.feedback = Some(Feedback::Success("feedback.post_created"));
                self.refresh(api, token).await;
                true
            }
            Err(e) => {
                self.feedback = Some(Feedback::from_api(&e));
                false
            }
        }
    }

    /// Save the editor fields to the selected post.
    ///
    /// On success the selection takes the returned record and the list is
    /// refetched once.
    pub async fn save(&mut self, api: &ApiClient, token: &str) -> bool {
        let Some(post_id) = self.selected.as_ref().map(|p| p.id.clone()) else {
            self.feedback = Some(Feedback::invalid(&ValidationError::NothingSelected));
            return false;
        };
        let (title, content) = match validation::validate_post_fields(&self.title, &self.content) {
            Ok(fields) => fields,
            Err(e) => {
                self.feedback = Some(Feedback::invalid(&e));
                return false;
            }
        };
        let patch = PostPatch {
            title: Some(title),
            content: Some(content),
            status: Some(self.status_input),
        };

        match api.update_post(token, &self.board_id, &post_id, &patch).await {
            Ok(post) => {
                self.load_editor(post);
                self.feedback = Some(Feedback::Success("feedback.post_updated"));
                self.refresh(api, token).await;
                true
            }
            Err(e) => {
                self.feedback = Some(Feedback::from_api(&e));
                false
            }
        }
    }

    /// Change only the status of the selected post.
    pub async fn update_status(&mut self, api: &ApiClient, token: &str, status: PostStatus) -> bool {
        let Some(post_id) = self.selected.as_ref().map(|p| p.id.clone()) else {
            self.feedback = Some(Feedback::invalid(&ValidationError::NothingSelected));
            return false;
        };
        match api
            .update_post(token, &self.board_id, &post_id, &PostPatch::status(status))
            .await
        {
            Ok(post) => {
                self.load_editor(post);
                self.feedback = Some(Feedback::Success("feedback.post_updated"));
                self.refresh(api, token).await;
                true
            }
            Err(e) => {
                self.feedback = Some(Feedback::from_api(&e));
                false
            }
        }
    }

    /// Archive the selected post and refetch the list once.
    pub async fn archive(&mut self, api: &ApiClient, token: &str) -> bool {
        let Some(post_id) = self.selected.as_ref().map(|p| p.id.clone()) else {
            self.feedback = Some(Feedback::invalid(&ValidationError::NothingSelected));
            return false;
        };
        match api.archive_post(token, &self.board_id, &post_id).await {
            Ok(()) => {
                if let Some(post) = self.selected.as_mut() {
                    post.status = PostStatus::Archived;
                }
                self.status_input = PostStatus::Archived;
                self.feedback = Some(Feedback::Success("feedback.post_archived"));
                self.refresh(api, token).await;
                true
            }
            Err(e) => {
                self.feedback = Some(Feedback::from_api(&e));
                false
            }
        }
    }

    /// Re-read the selected post from its detail endpoint.
    pub async fn reload_selected(&mut self, api: &ApiClient, token: &str) -> bool {
        let Some(post_id) = self.selected.as_ref().map(|p| p.id.clone()) else {
            self.feedback = Some(Feedback::invalid(&ValidationError::NothingSelected));
            return false;
        };
        match api.fetch_post(token, &self.board_id, &post_id).await {
            Ok(post) => {
                self.load_editor(post);
                true
            }
            Err(e) => {
                self.feedback = Some(Feedback::from_api(&e));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, status: PostStatus) -> Post {
        Post {
            id: id.to_string(),
            board_id: "b1".to_string(),
            author_email: "kim@example.com".to_string(),
            title: format!("title {id}"),
            content: format!("content {id}"),
            status,
            created_at: None,
            updated_at: None,
        }
    }

    fn seeded(view: &mut PostsView, posts: Vec<Post>, total: u64) {
        let key = view.key();
        let page = Page::new(posts, view.pager().page(), view.page_size, total);
        view.cache.begin_fetch(&key);
        view.cache.complete(&key, Ok(page));
    }

    #[test]
    fn test_reader_defaults() {
        let view = PostsView::new("b1", BoardsMode::Reader, 10);
        assert_eq!(view.status_filter(), Some(PostStatus::Published));
        assert_eq!(view.status_input, PostStatus::Published);

        let view = PostsView::new("b1", BoardsMode::Admin, 10);
        assert_eq!(view.status_filter(), None);
        assert_eq!(view.status_input, PostStatus::Draft);
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut view = PostsView::new("b1", BoardsMode::Admin, 10);
        seeded(&mut view, vec![post("p1", PostStatus::Draft)], 50);
        view.paginate(PageCommand::Goto(3));
        assert_eq!(view.pager().page(), 3);
        view.set_status_filter(Some(PostStatus::Archived));
        assert_eq!(view.pager().page(), 0);

        seeded(&mut view, vec![post("p1", PostStatus::Archived)], 50);
        view.paginate(PageCommand::Next);
        assert_eq!(view.pager().page(), 1);
        view.set_author("lee@example.com");
        assert_eq!(view.pager().page(), 0);
    }

    #[test]
    fn test_select_loads_editor() {
        let mut view = PostsView::new("b1", BoardsMode::Admin, 10);
        seeded(&mut view, vec![post("p1", PostStatus::Published)], 1);
        assert!(view.select("p1"));
        assert_eq!(view.title, "title p1");
        assert_eq!(view.content, "content p1");
        assert_eq!(view.status_input, PostStatus::Published);

        view.clear_selection();
        assert!(view.selected().is_none());
        assert!(view.title.is_empty());
        assert_eq!(view.status_input, PostStatus::Draft);
    }

    #[test]
    fn test_key_includes_board() {
        let a = PostsView::new("b1", BoardsMode::Admin, 10);
        let b = PostsView::new("b2", BoardsMode::Admin, 10);
        assert_ne!(a.key(), b.key());
    }
}
