//! Login and signup screen for both session scopes.

use std::sync::Arc;

use super::ScreenResult;
use crate::console::context::ConsoleContext;
use crate::console::terminal::Terminal;
use crate::session::SessionScope;
use crate::validation::FormMode;
use crate::views::{LoginOutcome, LoginView};
use crate::Result;

/// Login screen handler.
pub struct LoginScreen;

impl LoginScreen {
    /// Run the form until the operator signs in or leaves.
    pub async fn run<T: Terminal>(
        ctx: &mut ConsoleContext<T>,
        view: &mut LoginView,
    ) -> Result<ScreenResult> {
        let i18n = Arc::clone(&ctx.i18n);
        let admin = view.scope() == SessionScope::Admin;

        loop {
            let title = match (admin, view.mode()) {
                (true, _) => i18n.t("login.admin_title"),
                (false, FormMode::Login) => i18n.t("login.title"),
                (false, FormMode::Signup) => i18n.t("login.signup_title"),
            };
            ctx.heading(title).await?;
            ctx.feedback(view.feedback()).await?;

            let submit = match view.mode() {
                FormMode::Login => i18n.t("login.submit"),
                FormMode::Signup => i18n.t("login.signup_submit"),
            };
            ctx.menu_item("1", submit).await?;
            if admin {
                ctx.menu_item("H", i18n.t("login.to_home")).await?;
            } else {
                let switch = match view.mode() {
                    FormMode::Login => i18n.t("login.switch_signup"),
                    FormMode::Signup => i18n.t("login.switch_login"),
                };
                ctx.menu_item("2", switch).await?;
                ctx.menu_item("A", i18n.t("login.to_admin")).await?;
            }
            ctx.menu_item("G", i18n.t("common.goto")).await?;

            let Some(choice) = ctx.choose_or_quit().await? else {
                return Ok(ScreenResult::Quit);
            };
            match choice.as_str() {
                "q" => return Ok(ScreenResult::Quit),
                "1" => {
                    if !Self::fill(ctx, view).await? {
                        return Ok(ScreenResult::Quit);
                    }
                    ctx.send_line(i18n.t("login.in_progress")).await?;
                    match view.submit(&ctx.api, &mut ctx.session).await {
                        LoginOutcome::SignedIn if admin => {
                            return Ok(ScreenResult::to("/admin/users"))
                        }
                        LoginOutcome::SignedIn => return Ok(ScreenResult::to("/")),
                        _ => {}
                    }
                }
                "2" if !admin => {
                    let next = match view.mode() {
                        FormMode::Login => FormMode::Signup,
                        FormMode::Signup => FormMode::Login,
                    };
                    view.set_mode(next);
                }
                "a" if !admin => return Ok(ScreenResult::to("/admin")),
                "h" if admin => return Ok(ScreenResult::to("/")),
                "g" => {
                    if let Some(path) = ctx.prompt(i18n.t("common.path_prompt")).await? {
                        return Ok(ScreenResult::Navigate(path));
                    }
                    return Ok(ScreenResult::Quit);
                }
                _ => {}
            }
        }
    }

    /// Read the form fields. Returns `false` at end of input.
    async fn fill<T: Terminal>(ctx: &mut ConsoleContext<T>, view: &mut LoginView) -> Result<bool> {
        let i18n = Arc::clone(&ctx.i18n);

        let email = if view.email.is_empty() {
            ctx.prompt(i18n.t("login.email")).await?
        } else {
            ctx.prompt_default(i18n.t("login.email"), &view.email).await?
        };
        let Some(email) = email else {
            return Ok(false);
        };
        view.email = email.trim().to_string();

        let Some(password) = ctx.prompt(i18n.t("login.password")).await? else {
            return Ok(false);
        };
        view.password = password;

        if view.mode() == FormMode::Signup {
            let Some(confirm) = ctx.prompt(i18n.t("login.confirm")).await? else {
                return Ok(false);
            };
            view.confirm = confirm;
        }
        Ok(true)
    }
}
