use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::{info, warn};

use super::CLIENT;
use crate::config::Config;
use crate::error::{AppError, Result};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexNowPayload<'a> {
    host: &'a str,
    key: &'a str,
    key_location: String,
    url_list: &'a [String],
}

/// A 2xx from the IndexNow endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexNowAccepted {
    pub status: u16,
}

impl IndexNowAccepted {
    /// 200 means newly submitted; any other 2xx (usually 202) means already
    /// known or queued.
    pub fn message(&self) -> &'static str {
        if self.status == 200 {
            "URLs submitted successfully"
        } else {
            "URLs already known or accepted"
        }
    }
}

/// POSTs `urls` to the configured IndexNow endpoint.
///
/// Callers filter `urls` to the canonical host first. Non-2xx answers become
/// [`AppError::UpstreamError`] carrying the upstream status and body.
pub async fn submit_to_indexnow(config: &Config, key: &str, urls: &[String]) -> Result<IndexNowAccepted> {
    let payload = IndexNowPayload {
        host: &config.host,
        key,
        key_location: format!("{}/{}.txt", config.site_url, key),
        url_list: urls,
    };
    let body = serde_json::to_string(&payload).map_err(|e| AppError::InternalError {
        message: "Internal server error".to_string(),
        details: e.to_string(),
    })?;

    let response = CLIENT
        .post(&config.indexnow_endpoint)
        .header(CONTENT_TYPE, "application/json; charset=utf-8")
        .body(body)
        .send()
        .await?;

    let status = response.status();
    if status.is_success() {
        info!(count = urls.len(), status = status.as_u16(), "IndexNow accepted submission");
        return Ok(IndexNowAccepted {
            status: status.as_u16(),
        });
    }

    let details = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), %details, "IndexNow rejected submission");
    Err(AppError::UpstreamError {
        message: "IndexNow submission failed".to_string(),
        status: status.as_u16(),
        details,
    })
}
