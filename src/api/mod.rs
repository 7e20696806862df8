//! HTTP client for the identity, membership and board services.
//!
//! Every operation issues exactly one request and either returns the decoded
//! body or an [`ApiError`] carrying the message to show. There are no retries.

mod auth;
mod boards;
pub mod error;
mod members;
mod posts;

pub use error::{ApiError, Operation};

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::i18n::I18n;
use crate::{AdminError, Result};

/// User agent sent with every request.
const USER_AGENT: &str = concat!("msa-admin/", env!("CARGO_PKG_VERSION"));

/// Which backend a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Identity/auth service.
    Auth,
    /// Membership service.
    Member,
    /// Board/post service.
    Board,
}

/// Client for the three backend services.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    auth_base: String,
    member_base: String,
    board_base: String,
    i18n: Arc<I18n>,
}

impl ApiClient {
    /// Create a client from the API configuration.
    ///
    /// Messages for failed calls come from `i18n`.
    pub fn new(config: &ApiConfig, i18n: Arc<I18n>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AdminError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            auth_base: sanitize_base_url(&config.auth_base_url)?,
            member_base: sanitize_base_url(&config.member_base_url)?,
            board_base: sanitize_base_url(&config.board_base_url)?,
            i18n,
        })
    }

    /// Base URL of a service, without trailing slash.
    pub fn base_url(&self, service: Service) -> &str {
        match service {
            Service::Auth => &self.auth_base,
            Service::Member => &self.member_base,
            Service::Board => &self.board_base,
        }
    }

    /// Build a request URL.
    ///
    /// `segments` are percent-encoded and joined under the service base; query
    /// pairs with an empty value are left out.
    pub(crate) fn url(
        &self,
        operation: Operation,
        service: Service,
        segments: &[&str],
        query: &[(&str, Option<String>)],
    ) -> std::result::Result<Url, ApiError> {
        let mut raw = self.base_url(service).to_string();
        for segment in segments {
            raw.push('/');
            raw.push_str(&urlencoding::encode(segment));
        }

        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl {
            operation,
            message: self.default_message(operation),
            detail: e.to_string(),
        })?;

        let present: Vec<(&str, &str)> = query
            .iter()
            .filter_map(|(name, value)| match value.as_deref() {
                Some(v) if !v.is_empty() => Some((*name, v)),
                _ => None,
            })
            .collect();
        if !present.is_empty() {
            url.query_pairs_mut().extend_pairs(present);
        }

        Ok(url)
    }

    /// Start a request, attaching the bearer token when given.
    pub(crate) fn request(&self, method: Method, url: Url, token: Option<&str>) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode the JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        builder: RequestBuilder,
    ) -> std::result::Result<T, ApiError> {
        let response = self.dispatch(operation, builder).await?;
        response.json::<T>().await.map_err(|e| {
            warn!(operation = %operation, error = %e, "undecodable response body");
            ApiError::Decode {
                operation,
                message: self.default_message(operation),
                detail: e.to_string(),
            }
        })
    }

    /// Send a request whose success body is ignored.
    pub(crate) async fn send_empty(
        &self,
        operation: Operation,
        builder: RequestBuilder,
    ) -> std::result::Result<(), ApiError> {
        self.dispatch(operation, builder).await.map(|_| ())
    }

    async fn dispatch(
        &self,
        operation: Operation,
        builder: RequestBuilder,
    ) -> std::result::Result<Response, ApiError> {
        if let Some(request) = builder.try_clone().and_then(|b| b.build().ok()) {
            debug!(
                operation = %operation,
                method = %request.method(),
                path = request.url().path(),
                "sending request"
            );
        }

        let response = builder.send().await.map_err(|e| {
            warn!(operation = %operation, error = %e, "request failed");
            ApiError::Transport {
                operation,
                message: self.default_message(operation),
                source: e,
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let (message, from_server) = match error::server_message(&body) {
            Some(message) => (message, true),
            None => (self.default_message(operation), false),
        };
        let error = ApiError::Status {
            operation,
            status: status.as_u16(),
            message,
            from_server,
        };
        if error.is_unauthorized() {
            warn!(operation = %operation, status = status.as_u16(), "credentials rejected");
        } else {
            warn!(
                operation = %operation,
                status = status.as_u16(),
                from_server,
                "service returned an error"
            );
        }
        Err(error)
    }

    fn default_message(&self, operation: Operation) -> String {
        self.i18n.t(operation.message_key()).to_string()
    }
}

fn sanitize_base_url(base: &str) -> Result<String> {
    let mut base = base.trim().to_string();
    if !base.starts_with("http://") && !base.starts_with("https://") {
        base = format!("http://{base}");
    }
    while base.ends_with('/') {
        base.pop();
    }
    Url::parse(&base).map_err(|e| AdminError::Config(format!("invalid base URL {base}: {e}")))?;
    Ok(base)
}
