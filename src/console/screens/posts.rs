//! Posts of the selected board.

use std::sync::Arc;

use tracing::debug;

use super::ScreenResult;
use crate::console::context::ConsoleContext;
use crate::console::terminal::Terminal;
use crate::models::PostStatus;
use crate::session::SessionScope;
use crate::views::{PageCommand, PostsView};
use crate::Result;

/// Posts screen handler.
pub struct PostsScreen;

impl PostsScreen {
    /// Run the post list of one board. `Q` goes back to the board list.
    pub async fn run<T: Terminal>(
        ctx: &mut ConsoleContext<T>,
        view: &mut PostsView,
        scope: SessionScope,
    ) -> Result<ScreenResult> {
        let i18n = Arc::clone(&ctx.i18n);
        let admin = scope == SessionScope::Admin;
        debug!(board = view.board_id(), scope = scope.as_str(), "posts opened");

        loop {
            let Some(token) = ctx.token(scope) else {
                return Ok(ScreenResult::Back);
            };
            view.load(&ctx.api, &token).await;
            Self::render(ctx, view, admin).await?;

            let Some(choice) = ctx.choose().await? else {
                return Ok(ScreenResult::Quit);
            };
            if let Ok(command) = choice.parse::<PageCommand>() {
                if !matches!(command, PageCommand::Goto(_)) {
                    view.paginate(command);
                    continue;
                }
            }
            match choice.as_str() {
                "q" => return Ok(ScreenResult::Back),
                "f" => {
                    let Some(answer) = ctx.prompt(i18n.t("posts.status_filter_prompt")).await?
                    else {
                        return Ok(ScreenResult::Quit);
                    };
                    let answer = answer.trim();
                    if answer.is_empty() || answer == "-" {
                        view.set_status_filter(None);
                    } else {
                        match answer.parse::<PostStatus>() {
                            Ok(status) => view.set_status_filter(Some(status)),
                            Err(_) => ctx.send_line(i18n.t("common.invalid_choice")).await?,
                        }
                    }
                }
                "w" if admin => {
                    let Some(author) = ctx
                        .prompt_default(i18n.t("posts.author_prompt"), view.author())
                        .await?
                    else {
                        return Ok(ScreenResult::Quit);
                    };
                    view.set_author(if author.trim() == "-" { "" } else { &author });
                }
                "r" => view.refresh(&ctx.api, &token).await,
                "p" => {
                    let Some(page) = ctx.prompt(i18n.t("common.page_prompt")).await? else {
                        return Ok(ScreenResult::Quit);
                    };
                    if let Ok(command @ PageCommand::Goto(_)) = page.parse::<PageCommand>() {
                        view.paginate(command);
                    }
                }
                "n" => {
                    view.clear_selection();
                    if !Self::fill(ctx, view, admin, &PostStatus::CREATABLE)
                        .await?
                    {
                        return Ok(ScreenResult::Quit);
                    }
                    view.create(&ctx.api, &token).await;
                }
                "e" if admin && view.selected().is_some() => {
                    if !Self::fill(ctx, view, true, &PostStatus::ALL).await? {
                        return Ok(ScreenResult::Quit);
                    }
                    view.save(&ctx.api, &token).await;
                }
                "t" if admin && view.selected().is_some() => {
                    let options: Vec<&str> = PostStatus::ALL.iter().map(|s| s.as_str()).collect();
                    let label =
                        i18n.t_with("posts.status_prompt", &[("options", &options.join("/"))]);
                    let Some(answer) = ctx.prompt(&label).await? else {
                        return Ok(ScreenResult::Quit);
                    };
                    match answer.parse::<PostStatus>() {
                        Ok(status) => {
                            view.update_status(&ctx.api, &token, status).await;
                        }
                        Err(_) => ctx.send_line(i18n.t("common.invalid_choice")).await?,
                    }
                }
                "x" if admin && view.selected().is_some() => {
                    view.archive(&ctx.api, &token).await;
                }
                "d" if view.selected().is_some() => {
                    view.reload_selected(&ctx.api, &token).await;
                }
                "c" => view.clear_selection(),
                other => {
                    let selected = other
                        .parse::<usize>()
                        .ok()
                        .filter(|n| *n >= 1)
                        .is_some_and(|n| view.select_index(n - 1));
                    if !selected {
                        ctx.send_line(i18n.t("common.invalid_choice")).await?;
                    }
                }
            }
        }
    }

    /// Read the title, content and (for admins) status fields, keeping the
    /// current values on empty answers. Returns `false` at end of input.
    async fn fill<T: Terminal>(
        ctx: &mut ConsoleContext<T>,
        view: &mut PostsView,
        with_status: bool,
        allowed: &[PostStatus],
    ) -> Result<bool> {
        let i18n = Arc::clone(&ctx.i18n);

        let Some(title) = ctx
            .prompt_default(i18n.t("posts.title_prompt"), &view.title)
            .await?
        else {
            return Ok(false);
        };
        view.title = title;

        let Some(content) = ctx
            .prompt_default(i18n.t("posts.content_prompt"), &view.content)
            .await?
        else {
            return Ok(false);
        };
        view.content = content;

        if with_status {
            let options: Vec<&str> = allowed.iter().map(|s| s.as_str()).collect();
            let label = i18n.t_with("posts.status_prompt", &[("options", &options.join("/"))]);
            let Some(answer) = ctx
                .prompt_default(&label, view.status_input.as_str())
                .await?
            else {
                return Ok(false);
            };
            match answer.parse::<PostStatus>() {
                Ok(status) if allowed.contains(&status) => view.status_input = status,
                _ => ctx.send_line(i18n.t("common.invalid_choice")).await?,
            }
        }
        Ok(true)
    }

    async fn render<T: Terminal>(
        ctx: &mut ConsoleContext<T>,
        view: &PostsView,
        admin: bool,
    ) -> Result<()> {
        let i18n = Arc::clone(&ctx.i18n);

        ctx.heading(i18n.t("posts.title")).await?;
        let all = i18n.t("common.all");
        let mut filter = format!(
            "{}: {}",
            i18n.t("posts.col_status"),
            view.status_filter().map(|s| s.as_str()).unwrap_or(all)
        );
        if !view.author().is_empty() {
            filter.push_str(&format!("  {}: {}", i18n.t("posts.col_author"), view.author()));
        }
        ctx.send_line(&filter).await?;

        let state = view.list();
        if let Some(page) = state.data {
            if page.is_empty() {
                ctx.send_line(i18n.t("posts.no_posts")).await?;
            } else {
                ctx.send_line(&format!(
                    "{:<4} {:<28} {:<24} {:<10} {:<16}",
                    "#",
                    i18n.t("posts.col_title"),
                    i18n.t("posts.col_author"),
                    i18n.t("posts.col_status"),
                    i18n.t("posts.col_created"),
                ))
                .await?;
                ctx.send_line(&"-".repeat(84)).await?;
                for (i, post) in page.content.iter().enumerate() {
                    let marker = if view.selected().is_some_and(|s| s.id == post.id) {
                        ">"
                    } else {
                        " "
                    };
                    let line = format!(
                        "{marker}{:<3} {:<28} {:<24} {:<10} {:<16}",
                        i + 1,
                        post.title,
                        post.author_email,
                        post.status.as_str(),
                        ctx.time(post.created_at.as_ref()),
                    );
                    ctx.send_line(&line).await?;
                }
            }
        }
        ctx.list_status(&state, view.pager(), view.total_pages())
            .await?;

        if let Some(post) = view.selected() {
            ctx.heading(&post.title).await?;
            let author = i18n.t_with("posts.author_label", &[("author", &post.author_email)]);
            let meta = format!(
                "  {author}  {}  {}",
                post.status.as_str(),
                ctx.time(post.updated_at.as_ref().or(post.created_at.as_ref()))
            );
            ctx.send_line(&meta).await?;
            ctx.send_line("").await?;
            for line in post.content.lines() {
                ctx.send_line(&format!("  {line}")).await?;
            }
        }
        ctx.feedback(view.feedback()).await?;

        ctx.send_line("").await?;
        let mut line = format!(
            "  [N] {}  [F] {}",
            i18n.t("posts.create"),
            i18n.t("posts.filter_status"),
        );
        if admin {
            line.push_str(&format!("  [W] {}", i18n.t("posts.filter_author")));
        }
        line.push_str(&format!(
            "  [R] {}  [1-n] {}  [P] {}  [< > << >>] {}",
            i18n.t("common.refresh"),
            i18n.t("common.select_row"),
            i18n.t("common.page"),
            i18n.t("common.paging"),
        ));
        ctx.send_line(&line).await?;
        if view.selected().is_some() {
            let mut line = format!(
                "  [D] {}  [C] {}",
                i18n.t("common.reload_detail"),
                i18n.t("common.close_detail"),
            );
            if admin {
                line.push_str(&format!(
                    "  [E] {}  [T] {}  [X] {}",
                    i18n.t("posts.edit"),
                    i18n.t("posts.change_status"),
                    i18n.t("posts.archive"),
                ));
            }
            ctx.send_line(&line).await?;
        }
        Ok(())
    }
}
