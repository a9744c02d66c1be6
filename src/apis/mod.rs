pub mod pokeapi;
pub mod tcg;

use crate::app::ports::HttpClientPort;
use crate::error::{CollectorError, Result};
use serde::de::DeserializeOwned;
use tracing::warn;

/// Fetches `url` and deserializes the body, mapping statuses onto the error taxonomy:
/// 404 is `NotFound`, 429 is `RateLimited`, any other non-2xx is `Status`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &dyn HttpClientPort,
    url: &str,
    headers: &[(&str, &str)],
) -> Result<T> {
    let resp = http
        .get(url, headers)
        .await
        .map_err(CollectorError::Transport)?;

    match resp.status {
        404 => {
            return Err(CollectorError::NotFound { query: url.to_string() });
        }
        429 => {
            warn!("Rate limited by {}", url);
            return Err(CollectorError::RateLimited { url: url.to_string() });
        }
        _ if !resp.is_success() => {
            return Err(CollectorError::Status { status: resp.status, url: url.to_string() });
        }
        _ => {}
    }

    Ok(serde_json::from_slice(&resp.bytes)?)
}
