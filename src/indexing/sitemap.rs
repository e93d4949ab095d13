use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use reqwest::header::CONTENT_TYPE;
use scraper::{Html, Selector};
use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use super::CLIENT;
use crate::config::Config;
use crate::error::Result;
use crate::freshness::format_iso_date;

static LOC_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("loc").expect("Failed to parse loc selector")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    Google,
    Bing,
}

impl SearchEngine {
    pub const ALL: [SearchEngine; 2] = [SearchEngine::Google, SearchEngine::Bing];

    pub fn display_name(self) -> &'static str {
        match self {
            SearchEngine::Google => "Google",
            SearchEngine::Bing => "Bing",
        }
    }

    fn ping_base(self, config: &Config) -> &str {
        match self {
            SearchEngine::Google => &config.google_ping_url,
            SearchEngine::Bing => &config.bing_ping_url,
        }
    }
}

/// Outcome of pinging one engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineResult {
    pub engine: SearchEngine,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `<base>?sitemap=<encoded sitemap url>` for `engine`.
pub fn create_ping_url(config: &Config, engine: SearchEngine, sitemap_url: &str) -> Result<String> {
    let url = Url::parse_with_params(engine.ping_base(config), &[("sitemap", sitemap_url)])?;
    Ok(url.to_string())
}

/// Pings one engine. Never fails; problems are reported in the result.
pub async fn ping_engine(config: &Config, engine: SearchEngine, sitemap_url: &str) -> EngineResult {
    let ping_url = match create_ping_url(config, engine, sitemap_url) {
        Ok(url) => url,
        Err(e) => {
            return EngineResult {
                engine,
                success: false,
                status: None,
                error: Some(e.to_string()),
            };
        }
    };

    match CLIENT.get(&ping_url).send().await {
        Ok(response) => {
            let status = response.status();
            info!(engine = engine.display_name(), status = status.as_u16(), "sitemap ping answered");
            EngineResult {
                engine,
                success: status.is_success(),
                status: Some(status.as_u16()),
                error: (!status.is_success()).then(|| "Submission failed".to_string()),
            }
        }
        Err(e) => {
            warn!(engine = engine.display_name(), error = %e, "sitemap ping failed");
            EngineResult {
                engine,
                success: false,
                status: None,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Pings every engine in turn; one engine failing does not stop the next.
pub async fn ping_all(config: &Config, sitemap_url: &str) -> Vec<EngineResult> {
    let mut results = Vec::with_capacity(SearchEngine::ALL.len());
    for engine in SearchEngine::ALL {
        results.push(ping_engine(config, engine, sitemap_url).await);
    }
    results
}

pub fn default_sitemap_url(config: &Config) -> String {
    format!("{}/sitemap.xml", config.site_url)
}

pub fn all_sitemap_urls(config: &Config) -> Vec<String> {
    vec![
        default_sitemap_url(config),
        format!("{}/sitemap-0.xml", config.site_url),
    ]
}

/// http(s) URL of an `.xml` document.
pub fn validate_sitemap_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && raw.ends_with(".xml"),
        Err(_) => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapImage {
    pub loc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSitemapEntry {
    pub loc: String,
    pub images: Vec<SitemapImage>,
}

/// Image sitemap entry for `page_url`; each image is `(url, caption, title)`.
pub fn image_sitemap_entry(page_url: &str, images: &[(String, Option<String>, Option<String>)]) -> ImageSitemapEntry {
    ImageSitemapEntry {
        loc: page_url.to_string(),
        images: images
            .iter()
            .map(|(url, caption, title)| SitemapImage {
                loc: url.clone(),
                caption: caption.clone(),
                title: title.clone(),
                license: None,
            })
            .collect(),
    }
}

fn escape_xml(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn generate_sitemap_index(sitemap_urls: &[String], now: DateTime<Utc>) -> String {
    let lastmod = format_iso_date(now);
    let mut sitemaps = String::new();
    for url in sitemap_urls {
        sitemaps.push_str(&format!(
            "\n  <sitemap>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n  </sitemap>",
            escape_xml(url),
            lastmod
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}\n</sitemapindex>",
        sitemaps
    )
}

/// Number of `<loc>` elements in a sitemap document.
pub fn count_loc_elements(xml: &str) -> usize {
    let document = Html::parse_document(xml);
    document.select(&LOC_SELECTOR).count()
}

/// HEAD request answering OK with an XML content type.
pub async fn verify_sitemap_accessible(sitemap_url: &str) -> bool {
    match CLIENT.head(sitemap_url).send().await {
        Ok(response) => {
            let is_xml = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|ct| ct.contains("xml"))
                .unwrap_or(false);
            response.status().is_success() && is_xml
        }
        Err(e) => {
            warn!(url = sitemap_url, error = %e, "sitemap not reachable");
            false
        }
    }
}

/// URLs listed in the sitemap at `sitemap_url`; 0 when it cannot be fetched.
pub async fn sitemap_url_count(sitemap_url: &str) -> usize {
    let response = match CLIENT.get(sitemap_url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(url = sitemap_url, error = %e, "sitemap fetch failed");
            return 0;
        }
    };
    match response.text().await {
        Ok(xml) => count_loc_elements(&xml),
        Err(_) => 0,
    }
}
