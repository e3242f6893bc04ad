//! Request dispatch and response decoding shared by the repositories.

use reqwest::{RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Which statuses an operation counts as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// Any 2xx status.
    Success,
    /// Exactly this status; every other status is a failure.
    Exactly(StatusCode),
}

impl Expect {
    fn accepts(&self, status: StatusCode) -> bool {
        match self {
            Expect::Success => status.is_success(),
            Expect::Exactly(expected) => status == *expected,
        }
    }
}

/// The failure body every endpoint returns.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Builds the URL for `path` under the configured backend.
///
/// The path is appended to the base URL as-is, so a base with a path prefix
/// keeps it.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `path` - The endpoint path, starting with `/`.
/// * `query` - Query parameters; empty pairs produce no `?`.
pub fn endpoint(state: &AppState, path: &str, query: &[(&str, &str)]) -> Result<Url> {
    let base = state.config.api_url.as_str().trim_end_matches('/');
    let mut url = Url::parse(&format!("{}{}", base, path))
        .map_err(|e| AppError::Config(format!("invalid endpoint {}: {}", path, e)))?;

    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }

    Ok(url)
}

/// Sends `request` and decodes a JSON body when the status is accepted.
///
/// # Arguments
///
/// * `request` - The prepared request.
/// * `expect` - The statuses that count as success.
/// * `operation` - A short name used in logs.
///
/// # Returns
///
/// A `Result` containing the decoded body.
pub async fn fetch<T: DeserializeOwned>(
    request: RequestBuilder,
    expect: Expect,
    operation: &str,
) -> Result<T> {
    let body = dispatch(request, expect, operation).await?;
    decode(&body, operation)
}

/// Like [`fetch`], but an empty success body yields `T::default()`.
pub async fn fetch_or_default<T: DeserializeOwned + Default>(
    request: RequestBuilder,
    expect: Expect,
    operation: &str,
) -> Result<T> {
    let body = dispatch(request, expect, operation).await?;
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    decode(&body, operation)
}

async fn dispatch(request: RequestBuilder, expect: Expect, operation: &str) -> Result<String> {
    tracing::debug!("📡 {} request dispatched", operation);

    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if expect.accepts(status) {
        tracing::debug!("✅ {} answered {}", operation, status);
        return Ok(body);
    }

    let message = sonic_rs::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|parsed| parsed.error);

    Err(AppError::Api { status, message })
}

fn decode<T: DeserializeOwned>(body: &str, operation: &str) -> Result<T> {
    sonic_rs::from_str(body)
        .map_err(|e| AppError::Decode(format!("{} response: {}", operation, e)))
}
