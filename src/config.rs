use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use url::Url;
use crate::error::{AppError, Result};
use crate::freshness::parse_timestamp;

pub const DEFAULT_SITE_URL: &str = "https://kanadojo.com";
pub const DEFAULT_SITE_NAME: &str = "KanaDojo";
pub const DEFAULT_INDEXNOW_ENDPOINT: &str = "https://api.indexnow.org/indexnow";
pub const DEFAULT_GOOGLE_PING_URL: &str = "https://www.google.com/ping";
pub const DEFAULT_BING_PING_URL: &str = "https://www.bing.com/ping";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    /// Canonical site origin, without trailing slash.
    pub site_url: String,
    /// Hostname every submitted URL must match.
    pub host: String,
    pub site_name: String,
    pub locales: Vec<String>,
    /// Server-side secret. Never echoed in responses.
    pub indexnow_key: Option<String>,
    pub indexnow_endpoint: String,
    pub google_ping_url: String,
    pub bing_ping_url: String,
    /// Where the background notifier posts `/api/indexnow` requests.
    pub api_base_url: String,
    /// `Expires` field of security.txt. Unset means a rolling date ahead of each request.
    pub security_txt_expires: Option<DateTime<Utc>>,
    /// Extra font directory for OG image rasterisation, on top of system fonts.
    pub og_font_dir: Option<PathBuf>,
}

impl Config {
    /// Builds a config for `site_url` with every other setting at its default.
    pub fn new(site_url: &str) -> Result<Self> {
        let site_url = site_url.trim_end_matches('/').to_string();
        let host = canonical_host(&site_url)?;

        Ok(Config {
            server_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
            host,
            site_name: DEFAULT_SITE_NAME.to_string(),
            locales: vec!["en".to_string(), "es".to_string(), "ja".to_string()],
            indexnow_key: None,
            indexnow_endpoint: DEFAULT_INDEXNOW_ENDPOINT.to_string(),
            google_ping_url: DEFAULT_GOOGLE_PING_URL.to_string(),
            bing_ping_url: DEFAULT_BING_PING_URL.to_string(),
            api_base_url: site_url.clone(),
            security_txt_expires: None,
            og_font_dir: None,
            site_url,
        })
    }

    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let site_url = env::var("SITE_URL").unwrap_or_else(|_| DEFAULT_SITE_URL.to_string());
        let mut config = Config::new(&site_url)?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        config.server_addr = parse_server_addr(&host, &port)?;

        if let Ok(name) = env::var("SITE_NAME") {
            config.site_name = name;
        }
        if let Ok(locales) = env::var("LOCALES") {
            config.locales = parse_locales(&locales);
            if config.locales.is_empty() {
                return Err(AppError::ConfigError("LOCALES must name at least one locale".to_string()));
            }
        }

        // An empty key is the same as no key.
        config.indexnow_key = env::var("INDEXNOW_KEY").ok().filter(|k| !k.trim().is_empty());

        if let Ok(endpoint) = env::var("INDEXNOW_ENDPOINT") {
            Url::parse(&endpoint)?;
            config.indexnow_endpoint = endpoint;
        }
        if let Ok(ping) = env::var("GOOGLE_PING_URL") {
            Url::parse(&ping)?;
            config.google_ping_url = ping;
        }
        if let Ok(ping) = env::var("BING_PING_URL") {
            Url::parse(&ping)?;
            config.bing_ping_url = ping;
        }
        if let Ok(base) = env::var("API_BASE_URL") {
            Url::parse(&base)?;
            config.api_base_url = base.trim_end_matches('/').to_string();
        }
        if let Ok(expires) = env::var("SECURITY_TXT_EXPIRES") {
            let expires = parse_timestamp(&expires)
                .map_err(|e| AppError::ConfigError(format!("Invalid SECURITY_TXT_EXPIRES: {}", e)))?;
            config.security_txt_expires = Some(expires);
        }
        if let Ok(dir) = env::var("OG_FONT_DIR") {
            config.og_font_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    pub fn with_indexnow_key(mut self, key: impl Into<String>) -> Self {
        self.indexnow_key = Some(key.into());
        self
    }

    pub fn is_supported_locale(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }

    /// Absolute site URL for `path`, adding the leading slash when missing.
    pub fn absolute(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.site_url, path)
        } else {
            format!("{}/{}", self.site_url, path)
        }
    }
}

fn parse_server_addr(host: &str, port: &str) -> Result<SocketAddr> {
    let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
    let ip = IpAddr::from_str(host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;
    Ok(SocketAddr::new(ip, port))
}

fn canonical_host(site_url: &str) -> Result<String> {
    let parsed = Url::parse(site_url)?;
    parsed
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| AppError::ConfigError(format!("SITE_URL has no host: {}", site_url)))
}

fn parse_locales(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
