//! Context providers — live data merged into prompts and local replies.
//!
//! The clock always answers. Weather and news go over HTTP with a short
//! timeout and degrade to an "unavailable" value instead of erroring; the
//! caller never sees a provider failure as an `Err`.

pub mod clock;
pub mod news;
pub mod weather;

pub use clock::{TimeContext, get_time_context, time_context_at};
pub use news::{Headline, NewsCategory, NewsLookup, NewsProvider};
pub use weather::{WeatherProvider, WeatherSnapshot};

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use crate::error::AppError;

/// Everything the prompt assembler needs to know about "now".
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSnapshot {
    pub time: TimeContext,
    /// `None` when the weather lookup was unavailable.
    pub weather: Option<WeatherSnapshot>,
}

pub(crate) fn http_client(timeout_seconds: u64) -> Result<Client, AppError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| AppError::ProviderUnavailable(format!("failed to build HTTP client: {e}")))
}

/// Send `req` and decode a JSON body. Transport errors, non-2xx statuses
/// and undecodable bodies all map to [`AppError::ProviderUnavailable`].
pub(crate) async fn fetch_json(req: RequestBuilder) -> Result<Value, AppError> {
    let response = req
        .send()
        .await
        .map_err(|e| AppError::ProviderUnavailable(format!("request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::ProviderUnavailable(format!("HTTP {status}")));
    }

    let body = response
        .json::<Value>()
        .await
        .map_err(|e| AppError::ProviderUnavailable(format!("failed to parse response body: {e}")))?;
    debug!(%status, "provider response received");
    Ok(body)
}
