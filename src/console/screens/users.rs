//! Admin user management screen.

use std::sync::Arc;

use super::ScreenResult;
use crate::console::context::ConsoleContext;
use crate::console::terminal::Terminal;
use crate::models::UserStatus;
use crate::session::SessionScope;
use crate::views::{PageCommand, UsersView};
use crate::Result;

/// User management screen handler.
pub struct UsersScreen;

impl UsersScreen {
    /// Run the user list until the operator leaves.
    pub async fn run<T: Terminal>(
        ctx: &mut ConsoleContext<T>,
        view: &mut UsersView,
    ) -> Result<ScreenResult> {
        let i18n = Arc::clone(&ctx.i18n);

        loop {
            let Some(token) = ctx.token(SessionScope::Admin) else {
                return Ok(ScreenResult::to("/admin/login"));
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
                        .prompt_default(i18n.t("users.search_prompt"), view.query())
                        .await?
                    else {
                        return Ok(ScreenResult::Quit);
                    };
                    // A lone "-" clears the filter.
                    view.set_query(if q.trim() == "-" { "" } else { &q });
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
                "t" => {
                    if view.selected().is_none() {
                        ctx.send_line(i18n.t("validation.nothing_selected")).await?;
                        continue;
                    }
                    let Some(answer) = ctx.prompt(i18n.t("users.status_prompt")).await? else {
                        return Ok(ScreenResult::Quit);
                    };
                    match answer.parse::<UserStatus>() {
                        Ok(status) => {
                            view.update_status(&ctx.api, &token, status).await;
                        }
                        Err(_) => ctx.send_line(i18n.t("common.invalid_choice")).await?,
                    }
                }
                "c" => view.clear_selection(),
                "b" => return Ok(ScreenResult::to("/admin/boards")),
                "o" => {
                    ctx.session.logout(SessionScope::Admin);
                    return Ok(ScreenResult::to("/admin/login"));
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

    async fn render<T: Terminal>(ctx: &mut ConsoleContext<T>, view: &UsersView) -> Result<()> {
        let i18n = Arc::clone(&ctx.i18n);

        ctx.heading(i18n.t("users.title")).await?;
        let welcome = ctx
            .session
            .session(SessionScope::Admin)
            .map(|s| i18n.t_with("common.welcome", &[("email", &s.email)]));
        if let Some(welcome) = welcome {
            ctx.send_line(&welcome).await?;
        }
        if !view.query().is_empty() {
            ctx.send_line(&format!("{}: {}", i18n.t("users.search"), view.query()))
                .await?;
        }

        let state = view.list();
        if let Some(page) = state.data {
            if page.is_empty() {
                ctx.send_line(i18n.t("users.no_users")).await?;
            } else {
                ctx.send_line(&format!(
                    "{:<4} {:<28} {:<12} {:<8} {:<16}",
                    "#",
                    i18n.t("users.col_email"),
                    i18n.t("users.col_name"),
                    i18n.t("users.col_status"),
                    i18n.t("users.col_created"),
                ))
                .await?;
                ctx.send_line(&"-".repeat(72)).await?;
                for (i, user) in page.content.iter().enumerate() {
                    let marker = if view.selected().is_some_and(|s| s.id == user.id) {
                        ">"
                    } else {
                        " "
                    };
                    let line = format!(
                        "{marker}{:<3} {:<28} {:<12} {:<8} {:<16}",
                        i + 1,
                        user.email,
                        user.name.as_deref().unwrap_or("-"),
                        user.status.as_str(),
                        ctx.time(user.created_at.as_ref()),
                    );
                    ctx.send_line(&line).await?;
                }
            }
        }
        ctx.list_status(&state, view.pager(), view.total_pages())
            .await?;

        if let Some(user) = view.selected() {
            ctx.heading(i18n.t("users.detail")).await?;
            let rows = [
                (i18n.t("users.col_email"), user.email.clone()),
                (
                    i18n.t("users.col_name"),
                    user.name.clone().unwrap_or_else(|| "-".to_string()),
                ),
                (
                    i18n.t("users.col_role"),
                    user.role.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string()),
                ),
                (i18n.t("users.col_status"), user.status.to_string()),
                (i18n.t("users.col_created"), ctx.time(user.created_at.as_ref())),
            ];
            for (label, value) in rows {
                ctx.send_line(&format!("  {label}: {value}")).await?;
            }
        }
        ctx.feedback(view.feedback()).await?;

        ctx.send_line("").await?;
        ctx.send_line(&format!(
            "  [S] {}  [R] {}  [1-n] {}  [P] {}  [< > << >>] {}",
            i18n.t("users.search"),
            i18n.t("common.refresh"),
            i18n.t("common.select_row"),
            i18n.t("common.page"),
            i18n.t("common.paging"),
        ))
        .await?;
        if view.selected().is_some() {
            ctx.send_line(&format!(
                "  [T] {}  [C] {}",
                i18n.t("users.change_status"),
                i18n.t("common.close_detail"),
            ))
            .await?;
        }
        ctx.send_line(&format!(
            "  [B] {}  [G] {}  [O] {}",
            i18n.t("users.to_boards"),
            i18n.t("common.goto"),
            i18n.t("common.logout"),
        ))
        .await?;
        Ok(())
    }
}
