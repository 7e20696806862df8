//! Console shell: resolves paths and runs the matching screen.

use std::sync::Arc;

use tracing::{debug, info};

use super::context::ConsoleContext;
use super::screens::{BoardsScreen, LoginScreen, ScreenResult, UsersScreen};
use super::terminal::Terminal;
use crate::config::Config;
use crate::router::{self, Screen};
use crate::session::{SessionHolder, SessionScope};
use crate::views::{BoardsMode, BoardsView, Feedback, LoginView, UsersView};
use crate::Result;

/// Views kept across navigation, plus the sessions they were built for.
pub struct Shell {
    user_login: LoginView,
    admin_login: LoginView,
    users: UsersView,
    admin_boards: BoardsView,
    reader: BoardsView,
    page_size: u32,
    user_token: Option<String>,
    admin_token: Option<String>,
}

impl Shell {
    /// Create the shell with empty views.
    pub fn new(config: &Config) -> Self {
        let page_size = config.ui.page_size;
        let allow_admin_id = config.auth.allow_admin_id;
        Self {
            user_login: LoginView::new(SessionScope::User, allow_admin_id),
            admin_login: LoginView::new(SessionScope::Admin, allow_admin_id),
            users: UsersView::new(page_size),
            admin_boards: BoardsView::new(BoardsMode::Admin, page_size),
            reader: BoardsView::new(BoardsMode::Reader, page_size),
            page_size,
            user_token: None,
            admin_token: None,
        }
    }

    /// Show `start` and follow navigation until the operator quits or input ends.
    pub async fn run<T: Terminal>(&mut self, ctx: &mut ConsoleContext<T>, start: &str) -> Result<()> {
        self.sync_sessions(&ctx.session);
        let mut path = router::normalize(start);

        loop {
            let resolution = router::resolve(&path, &ctx.session);
            debug!(
                requested = %resolution.requested,
                screen = %resolution.screen,
                redirected = resolution.redirected(),
                "navigate"
            );
            if resolution.admin_refused {
                self.admin_login
                    .set_feedback(Feedback::Rejected("feedback.admin_required"));
            }

            let result = match resolution.screen {
                Screen::Home => BoardsScreen::run(ctx, &mut self.reader).await?,
                Screen::Login => LoginScreen::run(ctx, &mut self.user_login).await?,
                Screen::AdminUsers => UsersScreen::run(ctx, &mut self.users).await?,
                Screen::AdminBoards => BoardsScreen::run(ctx, &mut self.admin_boards).await?,
                Screen::AdminLogin => LoginScreen::run(ctx, &mut self.admin_login).await?,
                Screen::NotFound => Self::not_found(ctx, &resolution.requested).await?,
            };
            self.sync_sessions(&ctx.session);
            if let Some(message) = ctx.session.take_save_error() {
                let feedback = Feedback::Partial("feedback.session_not_saved", message);
                ctx.feedback(Some(&feedback)).await?;
            }

            match result {
                ScreenResult::Navigate(next) => path = router::normalize(&next),
                ScreenResult::Back => path = "/".to_string(),
                ScreenResult::Quit => break,
            }
        }

        info!("console closed");
        Ok(())
    }

    /// Drop the cached views of a scope whose session changed.
    fn sync_sessions(&mut self, session: &SessionHolder) {
        let user = session.token(SessionScope::User).map(str::to_string);
        if user != self.user_token {
            self.reader = BoardsView::new(BoardsMode::Reader, self.page_size);
            self.user_token = user;
        }

        let admin = session.token(SessionScope::Admin).map(str::to_string);
        if admin != self.admin_token {
            self.users = UsersView::new(self.page_size);
            self.admin_boards = BoardsView::new(BoardsMode::Admin, self.page_size);
            self.admin_token = admin;
        }
    }

    async fn not_found<T: Terminal>(ctx: &mut ConsoleContext<T>, path: &str) -> Result<ScreenResult> {
        let i18n = Arc::clone(&ctx.i18n);

        ctx.heading(i18n.t("not_found.title")).await?;
        ctx.send_line(&i18n.t_with("not_found.message", &[("path", path)]))
            .await?;
        ctx.menu_item("H", i18n.t("not_found.home")).await?;
        ctx.menu_item("G", i18n.t("common.goto")).await?;

        loop {
            let Some(choice) = ctx.choose_or_quit().await? else {
                return Ok(ScreenResult::Quit);
            };
            match choice.as_str() {
                "q" => return Ok(ScreenResult::Quit),
                "h" => return Ok(ScreenResult::to("/")),
                "g" => {
                    let Some(path) = ctx.prompt(i18n.t("common.path_prompt")).await? else {
                        return Ok(ScreenResult::Quit);
                    };
                    return Ok(ScreenResult::Navigate(path));
                }
                _ => ctx.send_line(i18n.t("common.invalid_choice")).await?,
            }
        }
    }
}
