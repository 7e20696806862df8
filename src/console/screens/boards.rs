//! Board screen: admin board management and the user's board reader.

use std::sync::Arc;

use super::{PostsScreen, ScreenResult};
use crate::console::context::ConsoleContext;
use crate::console::terminal::Terminal;
use crate::models::{BoardPatch, BoardStatus, Visibility};
use crate::session::SessionScope;
use crate::views::{BoardsMode, BoardsView, PageCommand};
use crate::Result;

/// Board screen handler.
pub struct BoardsScreen;

/// Parse an optional enum filter: empty or `-` means "all".
fn parse_filter<E: std::str::FromStr>(answer: &str) -> Option<Option<E>> {
    let answer = answer.trim();
    if answer.is_empty() || answer == "-" {
        return Some(None);
    }
    answer.parse().ok().map(Some)
}

impl BoardsScreen {
    /// Run the board list until the operator leaves.
    pub async fn run<T: Terminal>(
        ctx: &mut ConsoleContext<T>,
        view: &mut BoardsView,
    ) -> Result<ScreenResult> {
        let i18n = Arc::clone(&ctx.i18n);
        let admin = view.mode() == BoardsMode::Admin;
        let (scope, login_path) = if admin {
            (SessionScope::Admin, "/admin/login")
        } else {
            (SessionScope::User, "/login")
        };

        loop {
            let Some(token) = ctx.token(scope) else {
                return Ok(ScreenResult::to(login_path));
            };
            view.load(&ctx.api, &token).await;
            Self::render(ctx, view).await?;

            let Some(choice) = ctx.choose_or_quit().await? else {
                return Ok(ScreenResult::Quit);
            };
            if let Ok(command) = choice.parse::<PageCommand>() {
                if !matches!(command, PageCommand::Goto(_)) {
                    view.paginate(command);
                    continue;
                }
            }
            match choice.as_str() {
                "q" => return Ok(ScreenResult::Quit),
                "s" => {
                    let Some(q) = ctx
                        .prompt_default(i18n.t("boards.search_prompt"), view.query())
                        .await?
                    else {
                        return Ok(ScreenResult::Quit);
                    };
                    view.set_query(if q.trim() == "-" { "" } else { &q });
                }
                "v" if admin => {
                    let Some(answer) = ctx.prompt(i18n.t("boards.visibility_filter_prompt")).await?
                    else {
                        return Ok(ScreenResult::Quit);
                    };
                    match parse_filter::<Visibility>(&answer) {
                        Some(filter) => view.set_visibility_filter(filter),
                        None => ctx.send_line(i18n.t("common.invalid_choice")).await?,
                    }
                }
                "f" if admin => {
                    let Some(answer) = ctx.prompt(i18n.t("boards.status_filter_prompt")).await?
                    else {
                        return Ok(ScreenResult::Quit);
                    };
                    match parse_filter::<BoardStatus>(&answer) {
                        Some(filter) => view.set_status_filter(filter),
                        None => ctx.send_line(i18n.t("common.invalid_choice")).await?,
                    }
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
                "n" if admin => {
                    let Some(name) = ctx.prompt(i18n.t("boards.name_prompt")).await? else {
                        return Ok(ScreenResult::Quit);
                    };
                    let Some(visibility) = ctx
                        .prompt_default(
                            i18n.t("boards.visibility_prompt"),
                            view.new_visibility.as_str(),
                        )
                        .await?
                    else {
                        return Ok(ScreenResult::Quit);
                    };
                    match visibility.parse::<Visibility>() {
                        Ok(visibility) => {
                            view.new_name = name;
                            view.new_visibility = visibility;
                            view.create(&ctx.api, &token).await;
                        }
                        Err(_) => ctx.send_line(i18n.t("common.invalid_choice")).await?,
                    }
                }
                "t" if admin && view.selected().is_some() => {
                    let Some(answer) = ctx.prompt(i18n.t("boards.status_prompt")).await? else {
                        return Ok(ScreenResult::Quit);
                    };
                    match answer.parse::<BoardStatus>() {
                        Ok(status) => {
                            view.update_status(&ctx.api, &token, status).await;
                        }
                        Err(_) => ctx.send_line(i18n.t("common.invalid_choice")).await?,
                    }
                }
                "m" if admin => {
                    let Some((name, visibility)) = view
                        .selected()
                        .map(|b| (b.name.clone(), b.visibility))
                    else {
                        continue;
                    };
                    let Some(new_name) = ctx
                        .prompt_default(i18n.t("boards.name_prompt"), &name)
                        .await?
                    else {
                        return Ok(ScreenResult::Quit);
                    };
                    let Some(new_visibility) = ctx
                        .prompt_default(i18n.t("boards.visibility_prompt"), visibility.as_str())
                        .await?
                    else {
                        return Ok(ScreenResult::Quit);
                    };
                    let Ok(new_visibility) = new_visibility.parse::<Visibility>() else {
                        ctx.send_line(i18n.t("common.invalid_choice")).await?;
                        continue;
                    };
                    let patch = BoardPatch {
                        name: (new_name.trim() != name).then(|| new_name.trim().to_string()),
                        visibility: (new_visibility != visibility).then_some(new_visibility),
                        status: None,
                    };
                    if !patch.is_empty() {
                        view.update(&ctx.api, &token, &patch).await;
                    }
                }
                "d" if view.selected().is_some() => {
                    view.reload_selected(&ctx.api, &token).await;
                }
                "e" if view.selected().is_some() => {
                    if let Some(posts) = view.posts_mut() {
                        match PostsScreen::run(ctx, posts, scope).await? {
                            ScreenResult::Back => {}
                            other => return Ok(other),
                        }
                    }
                }
                "c" => view.clear_selection(),
                "u" if admin => return Ok(ScreenResult::to("/admin/users")),
                "a" if !admin => return Ok(ScreenResult::to("/admin")),
                "o" => {
                    ctx.session.logout(scope);
                    return Ok(ScreenResult::to(login_path));
                }
                "g" => {
                    let Some(path) = ctx.prompt(i18n.t("common.path_prompt")).await? else {
                        return Ok(ScreenResult::Quit);
                    };
                    return Ok(ScreenResult::Navigate(path));
                }
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

    async fn render<T: Terminal>(ctx: &mut ConsoleContext<T>, view: &BoardsView) -> Result<()> {
        let i18n = Arc::clone(&ctx.i18n);
        let admin = view.mode() == BoardsMode::Admin;
        let scope = if admin {
            SessionScope::Admin
        } else {
            SessionScope::User
        };

        let title = if admin {
            i18n.t("boards.title")
        } else {
            i18n.t("boards.reader_title")
        };
        ctx.heading(title).await?;
        let welcome = ctx
            .session
            .session(scope)
            .map(|s| i18n.t_with("common.welcome", &[("email", &s.email)]));
        if let Some(welcome) = welcome {
            ctx.send_line(&welcome).await?;
        }

        let all = i18n.t("common.all");
        let mut filters = Vec::new();
        if !view.query().is_empty() {
            filters.push(format!("{}: {}", i18n.t("boards.search"), view.query()));
        }
        if admin {
            filters.push(format!(
                "{}: {}",
                i18n.t("boards.col_visibility"),
                view.visibility_filter().map(|v| v.as_str()).unwrap_or(all)
            ));
            filters.push(format!(
                "{}: {}",
                i18n.t("boards.col_status"),
                view.status_filter().map(|s| s.as_str()).unwrap_or(all)
            ));
        }
        if !filters.is_empty() {
            ctx.send_line(&filters.join("  ")).await?;
        }

        let state = view.list();
        if let Some(page) = state.data {
            if page.is_empty() {
                ctx.send_line(i18n.t("boards.no_boards")).await?;
            } else {
                ctx.send_line(&format!(
                    "{:<4} {:<24} {:<10} {:<10} {:<16}",
                    "#",
                    i18n.t("boards.col_name"),
                    i18n.t("boards.col_visibility"),
                    i18n.t("boards.col_status"),
                    i18n.t("boards.col_created"),
                ))
                .await?;
                ctx.send_line(&"-".repeat(68)).await?;
                for (i, board) in page.content.iter().enumerate() {
                    let marker = if view.selected().is_some_and(|s| s.id == board.id) {
                        ">"
                    } else {
                        " "
                    };
                    let line = format!(
                        "{marker}{:<3} {:<24} {:<10} {:<10} {:<16}",
                        i + 1,
                        board.name,
                        board.visibility.as_str(),
                        board.status.as_str(),
                        ctx.time(board.created_at.as_ref()),
                    );
                    ctx.send_line(&line).await?;
                }
            }
        }
        ctx.list_status(&state, view.pager(), view.total_pages())
            .await?;

        if let Some(board) = view.selected() {
            ctx.heading(&board.name).await?;
            let rows = [
                (i18n.t("boards.col_visibility"), board.visibility.to_string()),
                (i18n.t("boards.col_status"), board.status.to_string()),
                (i18n.t("boards.col_created"), ctx.time(board.created_at.as_ref())),
                (i18n.t("boards.col_updated"), ctx.time(board.updated_at.as_ref())),
            ];
            for (label, value) in rows {
                ctx.send_line(&format!("  {label}: {value}")).await?;
            }
        }
        ctx.feedback(view.feedback()).await?;

        ctx.send_line("").await?;
        ctx.send_line(&format!(
            "  [S] {}  [R] {}  [1-n] {}  [P] {}  [< > << >>] {}",
            i18n.t("boards.search"),
            i18n.t("common.refresh"),
            i18n.t("common.select_row"),
            i18n.t("common.page"),
            i18n.t("common.paging"),
        ))
        .await?;
        if admin {
            ctx.send_line(&format!(
                "  [V] {}  [F] {}  [N] {}",
                i18n.t("boards.filter_visibility"),
                i18n.t("boards.filter_status"),
                i18n.t("boards.create"),
            ))
            .await?;
        }
        if view.posts().is_some() {
            let mut line = format!(
                "  [E] {}  [D] {}  [C] {}",
                i18n.t("boards.open_posts"),
                i18n.t("common.reload_detail"),
                i18n.t("common.close_detail"),
            );
            if admin {
                line.push_str(&format!(
                    "  [M] {}  [T] {}",
                    i18n.t("boards.edit"),
                    i18n.t("boards.change_status"),
                ));
            }
            ctx.send_line(&line).await?;
        }
        let nav = if admin {
            format!("  [U] {}", i18n.t("boards.to_users"))
        } else {
            format!("  [A] {}", i18n.t("login.to_admin"))
        };
        ctx.send_line(&format!(
            "{nav}  [G] {}  [O] {}",
            i18n.t("common.goto"),
            i18n.t("common.logout"),
        ))
        .await?;
        Ok(())
    }
}
