//! Search-engine indexing notifications.
//!
//! Best-effort, at-most-once calls to third-party indexing services: IndexNow
//! submissions and Google/Bing sitemap pings. Nothing here retries, and no
//! timeout is set beyond the transport defaults.

pub mod indexnow;
pub mod notifier;
pub mod sitemap;

use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use url::Url;

pub use indexnow::{submit_to_indexnow, IndexNowAccepted};
pub use notifier::{IndexNowNotifier, SubmissionReport};
pub use sitemap::{ping_all, ping_engine, EngineResult, SearchEngine};

// Shared client so connections are reused across submissions
pub(crate) static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

/// Keeps absolute URLs whose hostname is `host`; drops everything else,
/// including strings that do not parse.
pub fn filter_site_urls<S: AsRef<str>>(urls: &[S], host: &str) -> Vec<String> {
    urls.iter()
        .map(|u| u.as_ref())
        .filter(|raw| {
            Url::parse(raw)
                .ok()
                .and_then(|u| u.host_str().map(|h| h == host))
                .unwrap_or(false)
        })
        .map(str::to_string)
        .collect()
}
