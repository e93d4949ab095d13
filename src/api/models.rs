use serde::{Deserialize, Serialize};

use crate::indexing::EngineResult;

#[derive(Debug, Default, Deserialize)]
pub struct IndexNowRequest {
    pub url: Option<String>,
    pub urls: Option<Vec<String>>,
}

impl IndexNowRequest {
    /// `url` first, then `urls`, skipping blanks.
    pub fn collect(self) -> Vec<String> {
        self.url
            .into_iter()
            .chain(self.urls.unwrap_or_default())
            .filter(|u| !u.trim().is_empty())
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct IndexNowResponse {
    pub success: bool,
    pub submitted: Vec<String>,
    pub status: u16,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct IndexNowInfo {
    pub service: &'static str,
    pub configured: bool,
    pub endpoint: String,
    pub usage: &'static str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapSubmitRequest {
    pub sitemap_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapSubmitResponse {
    pub success: bool,
    pub sitemap_url: String,
    pub results: Vec<EngineResult>,
    /// ISO 8601, millisecond precision.
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapInfo {
    pub service: &'static str,
    pub usage: String,
    pub search_engines: Vec<&'static str>,
    pub default_sitemap: String,
}
