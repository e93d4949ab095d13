//! security.txt (RFC 9116) served at `/security.txt` and `/.well-known/security.txt`.

use chrono::{DateTime, Duration, Utc};

use crate::config::Config;
use crate::freshness::format_iso_date;

pub const CACHE_CONTROL: &str = "public, max-age=86400";

const CONTACT_REPO: &str = "https://github.com/lingdojo/kanadojo/security";
/// RFC 9116 asks for an `Expires` less than a year out.
const ROLLING_EXPIRY_DAYS: i64 = 180;

pub fn security_txt(config: &Config) -> String {
    security_txt_at(config, Utc::now())
}

/// Configured expiry, or `now` plus the rolling window when none is set.
pub fn expires_at(config: &Config, now: DateTime<Utc>) -> DateTime<Utc> {
    config
        .security_txt_expires
        .unwrap_or_else(|| now + Duration::days(ROLLING_EXPIRY_DAYS))
}

pub fn security_txt_at(config: &Config, now: DateTime<Utc>) -> String {
    let site = &config.site_url;
    format!(
        "Contact: {repo}
Contact: mailto:security@{host}
Expires: {expires}
Preferred-Languages: en, ja, es
Canonical: {site}/.well-known/security.txt
Policy: {site}/security
Acknowledgments: {site}/credits

# Security Policy for {name}
# If you discover a security vulnerability, please report it responsibly.
# See our security policy at {site}/security for details.",
        repo = CONTACT_REPO,
        host = config.host,
        expires = format_iso_date(expires_at(config, now)),
        site = site,
        name = config.site_name,
    )
}
