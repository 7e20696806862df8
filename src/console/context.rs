//! Shared state and output helpers for the console screens.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::terminal::Terminal;
use crate::api::ApiClient;
use crate::config::Config;
use crate::datetime;
use crate::i18n::I18n;
use crate::query::QueryState;
use crate::session::{SessionHolder, SessionScope};
use crate::views::{Feedback, Pager};
use crate::Result;

/// Everything a screen needs.
pub struct ConsoleContext<T: Terminal> {
    /// Terminal the console talks to.
    pub term: T,
    /// Backend client.
    pub api: ApiClient,
    /// User and admin sessions.
    pub session: SessionHolder,
    /// Message catalog.
    pub i18n: Arc<I18n>,
    /// Application configuration.
    pub config: Arc<Config>,
}

impl<T: Terminal> ConsoleContext<T> {
    /// Create a context.
    pub fn new(
        term: T,
        api: ApiClient,
        session: SessionHolder,
        i18n: Arc<I18n>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            term,
            api,
            session,
            i18n,
            config,
        }
    }

    /// Bearer token of a scope, owned so views can borrow the context mutably.
    pub fn token(&self, scope: SessionScope) -> Option<String> {
        self.session.token(scope).map(str::to_string)
    }

    /// Rows per list page.
    pub fn page_size(&self) -> u32 {
        self.config.ui.page_size
    }

    /// Format a timestamp in the configured timezone.
    pub fn time(&self, dt: Option<&DateTime<Utc>>) -> String {
        datetime::format_timestamp_default(dt, &self.config.ui.timezone)
    }

    /// Write text without a line break.
    pub async fn send(&mut self, data: &str) -> Result<()> {
        self.term.send(data).await
    }

    /// Write one line.
    pub async fn send_line(&mut self, data: &str) -> Result<()> {
        self.term.send_line(data).await
    }

    /// Write a section heading.
    pub async fn heading(&mut self, title: &str) -> Result<()> {
        self.term.send_line("").await?;
        self.term.send_line(&format!("=== {title} ===")).await
    }

    /// Write a menu entry.
    pub async fn menu_item(&mut self, key: &str, label: &str) -> Result<()> {
        self.term.send_line(&format!("  [{key}] {label}")).await
    }

    /// Ask for a line of input. `None` at end of input.
    pub async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        self.term.send(&format!("{label}: ")).await?;
        self.term.read_line().await
    }

    /// Ask for a line of input, showing the current value. An empty answer
    /// keeps it.
    pub async fn prompt_default(&mut self, label: &str, current: &str) -> Result<Option<String>> {
        self.term.send(&format!("{label} [{current}]: ")).await?;
        Ok(self.term.read_line().await?.map(|answer| {
            if answer.trim().is_empty() {
                current.to_string()
            } else {
                answer
            }
        }))
    }

    /// Ask for a menu choice, lowercased and trimmed. `None` at end of input.
    pub async fn choose(&mut self) -> Result<Option<String>> {
        self.choose_with("common.back").await
    }

    /// Like [`choose`](Self::choose), on a screen where `q` closes the console.
    pub async fn choose_or_quit(&mut self) -> Result<Option<String>> {
        self.choose_with("common.quit").await
    }

    async fn choose_with(&mut self, q_label: &str) -> Result<Option<String>> {
        let i18n = Arc::clone(&self.i18n);
        self.term
            .send(&format!(
                "{} [Q={}]: ",
                i18n.t("common.select_prompt"),
                i18n.t(q_label)
            ))
            .await?;
        Ok(self
            .term
            .read_line()
            .await?
            .map(|s| s.trim().to_lowercase()))
    }

    /// Write a feedback line, if any.
    pub async fn feedback(&mut self, feedback: Option<&Feedback>) -> Result<()> {
        let Some(feedback) = feedback else {
            return Ok(());
        };
        let text = feedback.render(&self.i18n);
        let marker = if feedback.is_error() { "!" } else { "*" };
        self.term.send_line(&format!("{marker} {text}")).await
    }

    /// Write the loading/error status and pagination line of a list.
    pub async fn list_status<P>(
        &mut self,
        state: &QueryState<'_, P>,
        pager: Pager,
        total_pages: u32,
    ) -> Result<()> {
        let i18n = Arc::clone(&self.i18n);
        if state.is_loading {
            self.term.send_line(i18n.t("common.loading")).await?;
        }
        if let Some(error) = state.error {
            self.term.send_line(&format!("! {error}")).await?;
        }
        if state.data.is_some() {
            let (page, total) = pager.label(total_pages);
            let mut line = i18n.t_with(
                "common.page_info",
                &[("page", &page.to_string()), ("total", &total.to_string())],
            );
            if state.is_fetching {
                line.push_str(&format!(" ({})", i18n.t("common.fetching")));
            }
            self.term.send_line(&line).await?;
        }
        Ok(())
    }
}
