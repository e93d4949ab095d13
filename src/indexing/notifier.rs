//! Background IndexNow submissions for publishing code.
//!
//! Posts to this service's own `/api/indexnow` route. Content publishing must
//! not wait on indexing, so the `notify_*` helpers spawn the request and only
//! log failures.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::task::JoinHandle;
use tracing::warn;

use super::sitemap::all_sitemap_urls;
use super::CLIENT;
use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize)]
struct ApiReply {
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IndexNowNotifier {
    endpoint: String,
    config: Arc<Config>,
}

impl IndexNowNotifier {
    pub fn new(config: &Config) -> Self {
        Self::from_shared(Arc::new(config.clone()))
    }

    /// Shares the server's config instead of copying it.
    pub fn from_shared(config: Arc<Config>) -> Self {
        Self {
            endpoint: format!("{}/api/indexnow", config.api_base_url),
            config,
        }
    }

    pub async fn submit_url(&self, url: &str) -> SubmissionReport {
        self.post(json!({ "url": url })).await
    }

    pub async fn submit_urls(&self, urls: &[String]) -> SubmissionReport {
        self.post(json!({ "urls": urls })).await
    }

    async fn post(&self, body: serde_json::Value) -> SubmissionReport {
        let response = match CLIENT.post(&self.endpoint).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                return SubmissionReport {
                    success: false,
                    error: Some(e.to_string()),
                };
            }
        };

        let ok = response.status().is_success();
        match response.json::<ApiReply>().await {
            Ok(reply) => SubmissionReport {
                success: ok,
                error: reply.error,
            },
            Err(e) => SubmissionReport {
                success: false,
                error: Some(e.to_string()),
            },
        }
    }

    /// Submits one page after it changed. Returns immediately.
    pub fn notify_page_update(&self, pathname: &str) -> JoinHandle<()> {
        let url = self.config.absolute(pathname);
        self.spawn("IndexNow submission failed", move |notifier| async move {
            notifier.submit_url(&url).await
        })
    }

    /// Submits `pathname` under every configured locale prefix.
    pub fn notify_page_update_all_locales(&self, pathname: &str) -> JoinHandle<()> {
        let path = pathname.trim_start_matches('/');
        let urls: Vec<String> = self
            .config
            .locales
            .iter()
            .map(|locale| self.config.absolute(&format!("{}/{}", locale, path)))
            .collect();
        self.spawn("IndexNow submission failed", move |notifier| async move {
            notifier.submit_urls(&urls).await
        })
    }

    /// Tells search engines the sitemaps changed.
    pub fn notify_sitemap_update(&self) -> JoinHandle<()> {
        let urls = all_sitemap_urls(&self.config);
        self.spawn("Sitemap IndexNow submission failed", move |notifier| async move {
            notifier.submit_urls(&urls).await
        })
    }

    fn spawn<F, Fut>(&self, context: &'static str, submit: F) -> JoinHandle<()>
    where
        F: FnOnce(IndexNowNotifier) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = SubmissionReport> + Send + 'static,
    {
        let notifier = self.clone();
        tokio::spawn(async move {
            let report = submit(notifier).await;
            if !report.success {
                warn!(error = report.error.as_deref().unwrap_or("unknown error"), "{}", context);
            }
        })
    }
}
