//! Content freshness signals.
//!
//! Turns publish/modify timestamps into the age descriptions, badges and
//! review recommendations shown next to content. Every classifier comes in two
//! forms: one taking an explicit `now`, and a convenience form reading the
//! clock. Nothing is cached between calls.
//!
//! Day thresholds, ascending: 30 (fresh), 90 (recent), 180 (getting old),
//! 365 (old), 730 (very old).

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{AppError, Result};

pub const DEFAULT_FRESH_THRESHOLD_DAYS: i64 = 90;

/// Whole days elapsed from `date` to `now`, truncated.
///
/// Future dates count as zero days elapsed.
pub fn days_since(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - date).num_days().max(0)
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::ValidationError(format!("Invalid date: {}", raw)))
}

pub fn format_last_updated(date: DateTime<Utc>) -> String {
    format_last_updated_at(date, Utc::now())
}

pub fn format_last_updated_at(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = days_since(date, now);

    match days {
        0 => "Updated today".to_string(),
        1 => "Updated yesterday".to_string(),
        d if d < 7 => format!("Updated {} days ago", d),
        d if d < 30 => {
            let weeks = d / 7;
            format!("Updated {} {} ago", weeks, if weeks == 1 { "week" } else { "weeks" })
        }
        d if d < 365 => {
            let months = d / 30;
            format!("Updated {} {} ago", months, if months == 1 { "month" } else { "months" })
        }
        _ => format!("Last updated {}", format_date(date)),
    }
}

/// Long US-English date, e.g. "January 5, 2025".
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// ISO 8601 with millisecond precision, as schema.org `dateModified` expects.
pub fn format_iso_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn is_content_fresh(date: DateTime<Utc>, threshold_days: i64) -> bool {
    is_content_fresh_at(date, threshold_days, Utc::now())
}

pub fn is_content_fresh_at(date: DateTime<Utc>, threshold_days: i64, now: DateTime<Utc>) -> bool {
    days_since(date, now) <= threshold_days
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FreshnessTier {
    Fresh,
    Recent,
    Outdated,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreshnessBadge {
    pub label: &'static str,
    pub variant: FreshnessTier,
}

pub fn freshness_badge(date: DateTime<Utc>) -> FreshnessBadge {
    freshness_badge_at(date, Utc::now())
}

pub fn freshness_badge_at(date: DateTime<Utc>, now: DateTime<Utc>) -> FreshnessBadge {
    let days = days_since(date, now);

    let (label, variant) = if days <= 30 {
        ("Recently Updated", FreshnessTier::Fresh)
    } else if days <= 90 {
        ("Updated", FreshnessTier::Recent)
    } else if days > 365 {
        ("Older Content", FreshnessTier::Outdated)
    } else {
        ("", FreshnessTier::None)
    };

    FreshnessBadge { label, variant }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecommendation {
    pub should_update: bool,
    pub urgency: Urgency,
    pub reason: &'static str,
}

pub fn update_recommendation(date: DateTime<Utc>) -> UpdateRecommendation {
    update_recommendation_at(date, Utc::now())
}

pub fn update_recommendation_at(date: DateTime<Utc>, now: DateTime<Utc>) -> UpdateRecommendation {
    let days = days_since(date, now);

    let (should_update, urgency, reason) = if days > 730 {
        (true, Urgency::High, "Content is over 2 years old and may contain outdated information")
    } else if days > 365 {
        (true, Urgency::Medium, "Content is over 1 year old and should be reviewed for accuracy")
    } else if days > 180 {
        (false, Urgency::Low, "Content is getting older, consider reviewing in the near future")
    } else {
        (false, Urgency::Low, "Content is relatively fresh")
    };

    UpdateRecommendation {
        should_update,
        urgency,
        reason,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Success,
    Warning,
    Default,
}

/// Props for a "Last updated" badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastUpdatedBadge {
    pub text: String,
    pub is_fresh: bool,
    pub variant: BadgeVariant,
}

pub fn last_updated_badge(modified: DateTime<Utc>) -> LastUpdatedBadge {
    last_updated_badge_at(modified, Utc::now())
}

pub fn last_updated_badge_at(modified: DateTime<Utc>, now: DateTime<Utc>) -> LastUpdatedBadge {
    let days = days_since(modified, now);
    let text = format_last_updated_at(modified, now);

    let (is_fresh, variant) = if days <= 30 {
        (true, BadgeVariant::Success)
    } else if days <= 180 {
        (true, BadgeVariant::Default)
    } else {
        (false, BadgeVariant::Warning)
    };

    LastUpdatedBadge {
        text,
        is_fresh,
        variant,
    }
}

/// Publish/modify pair supplied by the caller for one piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessRecord {
    pub published_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAgeMetadata {
    pub date_published: String,
    pub date_modified: String,
    pub is_fresh: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDates {
    pub published: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    pub show_modified: bool,
}

impl FreshnessRecord {
    pub fn new(published_at: DateTime<Utc>, modified_at: Option<DateTime<Utc>>) -> Self {
        Self {
            published_at,
            modified_at,
        }
    }

    /// The date freshness is judged against: modified if known, else published.
    pub fn reference_date(&self) -> DateTime<Utc> {
        self.modified_at.unwrap_or(self.published_at)
    }

    pub fn content_age_metadata(&self) -> ContentAgeMetadata {
        self.content_age_metadata_at(Utc::now())
    }

    pub fn content_age_metadata_at(&self, now: DateTime<Utc>) -> ContentAgeMetadata {
        let date_published = format_iso_date(self.published_at);
        let date_modified = self
            .modified_at
            .map(format_iso_date)
            .unwrap_or_else(|| date_published.clone());

        ContentAgeMetadata {
            date_published,
            date_modified,
            is_fresh: is_content_fresh_at(self.reference_date(), DEFAULT_FRESH_THRESHOLD_DAYS, now),
        }
    }

    pub fn content_dates(&self) -> ContentDates {
        self.content_dates_at(Utc::now())
    }

    /// Modified dates within a day of publishing are auto-save noise and stay hidden.
    pub fn content_dates_at(&self, now: DateTime<Utc>) -> ContentDates {
        let published = format_date(self.published_at);

        let Some(modified) = self.modified_at else {
            return ContentDates {
                published,
                modified: None,
                show_modified: false,
            };
        };

        let gap_days = (modified - self.published_at).num_seconds().div_euclid(86_400);
        if gap_days <= 1 {
            return ContentDates {
                published,
                modified: None,
                show_modified: false,
            };
        }

        ContentDates {
            published,
            modified: Some(format_last_updated_at(modified, now)),
            show_modified: true,
        }
    }
}
