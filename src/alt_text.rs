//! Alt text for site imagery.
//!
//! One generator per image kind, each a fixed phrase template with optional
//! keyword and site-name suffixes. Every generator ends in [`truncate_alt`],
//! so output never exceeds `max_length` characters. [`validate_alt_text`]
//! checks any alt string, generated or hand-written, and only reports.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_MAX_LENGTH: usize = 125;
pub const HARD_MAX_LENGTH: usize = 255;
pub const FALLBACK_ALT: &str = "Image";

const SITE_NAME: &str = "KanaDojo";
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AltTextOptions {
    pub include_site_name: Option<bool>,
    pub include_keywords: Option<bool>,
    pub max_length: Option<usize>,
    /// Brand used by the site-name suffix. Defaults to "KanaDojo".
    pub site_name: Option<String>,
}

impl AltTextOptions {
    fn site_name(&self, default: bool) -> Option<&str> {
        self.include_site_name
            .unwrap_or(default)
            .then(|| self.site_name.as_deref().unwrap_or(SITE_NAME))
    }

    fn keywords(&self) -> bool {
        self.include_keywords.unwrap_or(true)
    }

    fn finish(&self, alt: String) -> String {
        truncate_alt(&alt, self.max_length.unwrap_or(DEFAULT_MAX_LENGTH))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KanaScript {
    #[default]
    Hiragana,
    Katakana,
}

impl KanaScript {
    fn label(self) -> &'static str {
        match self {
            KanaScript::Hiragana => "Hiragana",
            KanaScript::Katakana => "Katakana",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            KanaScript::Hiragana => "hiragana",
            KanaScript::Katakana => "katakana",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Hiragana,
    Katakana,
    Kanji,
    Vocabulary,
}

impl ChartKind {
    fn label(self) -> &'static str {
        match self {
            ChartKind::Hiragana => "Hiragana",
            ChartKind::Katakana => "Katakana",
            ChartKind::Kanji => "Kanji",
            ChartKind::Vocabulary => "Vocabulary",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KanjiReadings {
    #[serde(default)]
    pub on: Vec<String>,
    #[serde(default)]
    pub kun: Vec<String>,
}

pub fn kana_alt_text(character: &str, script: KanaScript, romanization: &str, options: &AltTextOptions) -> String {
    let mut alt = format!("{} character {}", script.label(), character);

    if options.keywords() {
        alt.push_str(&format!(" ({}) - Japanese {} syllable", romanization, script.as_str()));
    }
    if let Some(site) = options.site_name(false) {
        alt.push_str(&format!(" | {}", site));
    }

    options.finish(alt)
}

pub fn kanji_alt_text(
    character: &str,
    meaning: &str,
    readings: &KanjiReadings,
    jlpt_level: Option<&str>,
    options: &AltTextOptions,
) -> String {
    let mut alt = format!("Kanji {} meaning \"{}\"", character, meaning);

    if options.keywords() {
        let shown: Vec<&str> = readings
            .on
            .iter()
            .take(2)
            .chain(readings.kun.iter().take(2))
            .map(String::as_str)
            .collect();
        if !shown.is_empty() {
            alt.push_str(&format!(" ({})", shown.join(", ")));
        }
        if let Some(level) = jlpt_level.filter(|l| !l.is_empty()) {
            alt.push_str(&format!(" - {}", level));
        }
    }
    if let Some(site) = options.site_name(false) {
        alt.push_str(&format!(" | {}", site));
    }

    options.finish(alt)
}

pub fn vocabulary_alt_text(word: &str, reading: &str, meaning: &str, options: &AltTextOptions) -> String {
    let mut alt = format!("Japanese word {}", word);

    if options.keywords() {
        alt.push_str(&format!(" ({}) meaning \"{}\"", reading, meaning));
    }
    if let Some(site) = options.site_name(false) {
        alt.push_str(&format!(" | {}", site));
    }

    options.finish(alt)
}

pub fn chart_alt_text(kind: ChartKind, subset: Option<&str>, options: &AltTextOptions) -> String {
    let mut alt = format!("{} chart", kind.label());

    if let Some(subset) = subset.filter(|s| !s.is_empty()) {
        alt.push_str(&format!(" - {}", subset));
    }
    if options.keywords() {
        alt.push_str(" with pronunciation guide and romanization");
    }
    if let Some(site) = options.site_name(true) {
        alt.push_str(&format!(" | {}", site));
    }

    options.finish(alt)
}

pub fn screenshot_alt_text(feature: &str, description: &str, options: &AltTextOptions) -> String {
    let mut alt = format!("{}: {}", feature, description);

    if let Some(site) = options.site_name(true) {
        alt.push_str(&format!(" - {} Japanese learning platform", site));
    }

    options.finish(alt)
}

pub fn theme_alt_text(theme_name: &str, options: &AltTextOptions) -> String {
    let mut alt = format!("{} theme preview", theme_name);

    if options.keywords() {
        alt.push_str(" - customizable Japanese learning interface");
    }
    if let Some(site) = options.site_name(true) {
        alt.push_str(&format!(" | {}", site));
    }

    options.finish(alt)
}

pub fn blog_image_alt_text(post_title: &str, image_description: Option<&str>, options: &AltTextOptions) -> String {
    let description = image_description.filter(|d| !d.is_empty());
    let mut alt = description.unwrap_or(post_title).to_string();

    // the guide suffix only pads out a bare title
    if options.keywords() && description.is_none() {
        alt.push_str(" - Japanese learning guide");
    }
    if let Some(site) = options.site_name(true) {
        alt.push_str(&format!(" | {} Academy", site));
    }

    options.finish(alt)
}

pub fn achievement_alt_text(name: &str, description: &str, options: &AltTextOptions) -> String {
    let mut alt = format!("Achievement badge: {} - {}", name, description);

    if let Some(site) = options.site_name(false) {
        alt.push_str(&format!(" | {}", site));
    }

    options.finish(alt)
}

pub fn avatar_alt_text(user_name: Option<&str>, options: &AltTextOptions) -> String {
    match user_name.filter(|n| !n.is_empty()) {
        Some(name) => options.finish(format!("{}'s profile picture", name)),
        None => options.finish("User profile picture".to_string()),
    }
}

/// Decorative images normally get `alt=""`; this is for when some context is wanted.
pub fn decorative_alt_text(context: &str, options: &AltTextOptions) -> String {
    options.finish(format!("Decorative {} image", context))
}

pub fn icon_alt_text(purpose: &str, options: &AltTextOptions) -> String {
    options.finish(format!("{} icon", purpose))
}

pub fn infographic_alt_text(title: &str, key_points: &[String], options: &AltTextOptions) -> String {
    let mut alt = format!("{} infographic", title);

    if !key_points.is_empty() {
        let shown: Vec<&str> = key_points.iter().take(3).map(String::as_str).collect();
        alt.push_str(&format!(" showing {}", shown.join(", ")));
    }
    if let Some(site) = options.site_name(true) {
        alt.push_str(&format!(" | {}", site));
    }

    options.finish(alt)
}

/// Caps `text` at `max_length` characters.
///
/// Over-long text is cut to leave room for "...", backing off to the last
/// space when that keeps more than 80% of the budget.
pub fn truncate_alt(text: &str, max_length: usize) -> String {
    let len = text.chars().count();
    if len <= max_length {
        return text.to_string();
    }
    if max_length < ELLIPSIS.len() {
        return text.chars().take(max_length).collect();
    }

    let truncated: String = text.chars().take(max_length - ELLIPSIS.len()).collect();
    let last_space = truncated.chars().rev().position(|c| c == ' ').map(|from_end| {
        truncated.chars().count() - 1 - from_end
    });

    match last_space {
        Some(idx) if idx as f64 > max_length as f64 * 0.8 => {
            let head: String = truncated.chars().take(idx).collect();
            format!("{}{}", head, ELLIPSIS)
        }
        _ => format!("{}{}", truncated, ELLIPSIS),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AltTextReport {
    pub is_valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

const FILE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp"];
const FILLER_PREFIXES: &[&str] = &["image of", "picture of", "photo of"];

/// Advisory check of an alt string; never alters it.
pub fn validate_alt_text(alt: &str) -> AltTextReport {
    let mut report = AltTextReport::default();

    if alt.trim().is_empty() {
        report.errors.push("Alt text is empty".to_string());
        return report;
    }

    let len = alt.chars().count();
    if len > DEFAULT_MAX_LENGTH {
        report
            .warnings
            .push(format!("Alt text is longer than recommended {} characters", DEFAULT_MAX_LENGTH));
    }
    if len > HARD_MAX_LENGTH {
        report
            .errors
            .push(format!("Alt text exceeds {} characters (screen reader limit)", HARD_MAX_LENGTH));
    }

    let lower = alt.to_lowercase();
    if FILLER_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        report
            .warnings
            .push("Avoid starting with \"image of\", \"picture of\", or \"photo of\"".to_string());
    }
    if lower.contains("click here") {
        report.warnings.push("Avoid using \"click here\" in alt text".to_string());
    }
    if FILE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        report.errors.push("Alt text should not include file extension".to_string());
    }

    report.is_valid = report.errors.is_empty();
    report
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanaImage {
    pub character: String,
    #[serde(rename = "type")]
    pub script: KanaScript,
    pub romanization: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanjiImage {
    pub character: String,
    pub meaning: String,
    #[serde(default)]
    pub readings: KanjiReadings,
    pub jlpt_level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VocabularyImage {
    pub word: String,
    pub reading: String,
    pub meaning: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartImage {
    pub chart_type: ChartKind,
    pub subset: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScreenshotImage {
    pub feature: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeImage {
    pub theme_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogImage {
    pub post_title: String,
    pub image_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementImage {
    pub achievement_name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarImage {
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconImage {
    pub icon_purpose: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecorativeImage {
    pub context: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfographicImage {
    pub title: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}

/// The closed set of image kinds, as `{"type": <kind>, "data": {..}}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum AltTextSubject {
    Kana(KanaImage),
    Kanji(KanjiImage),
    Vocabulary(VocabularyImage),
    Chart(ChartImage),
    Screenshot(ScreenshotImage),
    Theme(ThemeImage),
    Blog(BlogImage),
    Achievement(AchievementImage),
    Avatar(AvatarImage),
    Icon(IconImage),
    Decorative(DecorativeImage),
    Infographic(InfographicImage),
}

impl AltTextSubject {
    /// Parses a kind name and its payload. `None` for unknown kinds or
    /// payloads missing required fields.
    pub fn from_parts(kind: &str, data: &Value) -> Option<Self> {
        let tagged = serde_json::json!({ "type": kind, "data": data });
        serde_json::from_value(tagged).ok()
    }

    pub fn alt_text(&self, options: &AltTextOptions) -> String {
        match self {
            AltTextSubject::Kana(k) => kana_alt_text(&k.character, k.script, &k.romanization, options),
            AltTextSubject::Kanji(k) => {
                kanji_alt_text(&k.character, &k.meaning, &k.readings, k.jlpt_level.as_deref(), options)
            }
            AltTextSubject::Vocabulary(v) => vocabulary_alt_text(&v.word, &v.reading, &v.meaning, options),
            AltTextSubject::Chart(c) => chart_alt_text(c.chart_type, c.subset.as_deref(), options),
            AltTextSubject::Screenshot(s) => screenshot_alt_text(&s.feature, &s.description, options),
            AltTextSubject::Theme(t) => theme_alt_text(&t.theme_name, options),
            AltTextSubject::Blog(b) => blog_image_alt_text(&b.post_title, b.image_description.as_deref(), options),
            AltTextSubject::Achievement(a) => achievement_alt_text(&a.achievement_name, &a.description, options),
            AltTextSubject::Avatar(a) => avatar_alt_text(a.user_name.as_deref(), options),
            AltTextSubject::Icon(i) => icon_alt_text(&i.icon_purpose, options),
            AltTextSubject::Decorative(d) => decorative_alt_text(&d.context, options),
            AltTextSubject::Infographic(i) => infographic_alt_text(&i.title, &i.key_points, options),
        }
    }
}

/// Routes a `kind`/`data` pair to its generator; anything unrecognised gets "Image".
pub fn generate_alt_text(kind: &str, data: &Value, options: &AltTextOptions) -> String {
    match AltTextSubject::from_parts(kind, data) {
        Some(subject) => subject.alt_text(options),
        None => FALLBACK_ALT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> AltTextOptions {
        AltTextOptions::default()
    }

    #[test]
    fn kana_example() {
        assert_eq!(
            kana_alt_text("あ", KanaScript::Hiragana, "a", &defaults()),
            "Hiragana character あ (a) - Japanese hiragana syllable"
        );
    }

    #[test]
    fn kana_without_keywords_with_site() {
        let opts = AltTextOptions {
            include_keywords: Some(false),
            include_site_name: Some(true),
            ..Default::default()
        };
        assert_eq!(kana_alt_text("カ", KanaScript::Katakana, "ka", &opts), "Katakana character カ | KanaDojo");
    }

    #[test]
    fn kanji_caps_readings_at_two_each() {
        let readings = KanjiReadings {
            on: vec!["ニチ".into(), "ジツ".into(), "ニ".into()],
            kun: vec!["ひ".into(), "か".into(), "び".into()],
        };
        assert_eq!(
            kanji_alt_text("日", "sun", &readings, Some("N5"), &defaults()),
            "Kanji 日 meaning \"sun\" (ニチ, ジツ, ひ, か) - N5"
        );
        assert_eq!(
            kanji_alt_text("日", "sun", &KanjiReadings::default(), None, &defaults()),
            "Kanji 日 meaning \"sun\""
        );
    }

    #[test]
    fn chart_and_theme_include_site_by_default() {
        assert_eq!(
            chart_alt_text(ChartKind::Katakana, Some("Dakuten"), &defaults()),
            "Katakana chart - Dakuten with pronunciation guide and romanization | KanaDojo"
        );
        assert_eq!(
            theme_alt_text("Sakura", &defaults()),
            "Sakura theme preview - customizable Japanese learning interface | KanaDojo"
        );
        assert_eq!(
            screenshot_alt_text("Kana Blitz", "timed quiz", &defaults()),
            "Kana Blitz: timed quiz - KanaDojo Japanese learning platform"
        );
    }

    #[test]
    fn blog_guide_suffix_only_without_description() {
        assert_eq!(
            blog_image_alt_text("Learn Hiragana", None, &defaults()),
            "Learn Hiragana - Japanese learning guide | KanaDojo Academy"
        );
        assert_eq!(
            blog_image_alt_text("Learn Hiragana", Some("Chart of vowels"), &defaults()),
            "Chart of vowels | KanaDojo Academy"
        );
    }

    #[test]
    fn small_generators() {
        assert_eq!(avatar_alt_text(Some("Yuki"), &defaults()), "Yuki's profile picture");
        assert_eq!(avatar_alt_text(None, &defaults()), "User profile picture");
        assert_eq!(icon_alt_text("Settings", &defaults()), "Settings icon");
        assert_eq!(decorative_alt_text("wave", &defaults()), "Decorative wave image");
        assert_eq!(
            achievement_alt_text("Kana Master", "All kana learned", &defaults()),
            "Achievement badge: Kana Master - All kana learned"
        );
        let points = vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()];
        assert_eq!(
            infographic_alt_text("JLPT levels", &points, &defaults()),
            "JLPT levels infographic showing a, b, c | KanaDojo"
        );
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_alt("short", 125), "short");
    }

    #[test]
    fn truncation_prefers_word_boundary() {
        let text = "word ".repeat(40);
        let out = truncate_alt(&text, 50);
        assert!(out.chars().count() <= 50);
        assert!(out.ends_with("..."));
        assert!(!out.ends_with(" ..."));
        assert_eq!(out, format!("{}...", "word ".repeat(9).trim_end()));
    }

    #[test]
    fn truncation_hard_cuts_long_words() {
        let text = "a".repeat(200);
        let out = truncate_alt(&text, 125);
        assert_eq!(out.chars().count(), 125);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "あ".repeat(130);
        let out = truncate_alt(&text, 125);
        assert_eq!(out.chars().count(), 125);
    }

    #[test]
    fn generated_text_respects_max_length() {
        for max in [10usize, 20, 40, 60, 125] {
            let opts = AltTextOptions {
                max_length: Some(max),
                include_site_name: Some(true),
                ..Default::default()
            };
            let out = chart_alt_text(ChartKind::Vocabulary, Some("JLPT N5 food and drink words"), &opts);
            assert!(out.chars().count() <= max, "{out:?} exceeds {max}");
        }
    }

    #[test]
    fn validator_flags_photo_filenames() {
        let report = validate_alt_text("photo of cat.jpg");
        assert!(!report.is_valid);
        assert!(report.warnings.iter().any(|w| w.starts_with("Avoid starting with")));
        assert!(report.errors.iter().any(|e| e.contains("file extension")));
    }

    #[test]
    fn validator_length_and_empty() {
        let empty = validate_alt_text("   ");
        assert!(!empty.is_valid);
        assert_eq!(empty.errors, vec!["Alt text is empty".to_string()]);

        let long = validate_alt_text(&"x".repeat(130));
        assert!(long.is_valid);
        assert_eq!(long.warnings.len(), 1);

        let too_long = validate_alt_text(&"x".repeat(256));
        assert!(!too_long.is_valid);

        let click = validate_alt_text("Click here to start");
        assert!(click.is_valid);
        assert!(click.warnings[0].contains("click here"));

        assert!(validate_alt_text("Hiragana chart").warnings.is_empty());
    }

    #[test]
    fn dispatch_routes_by_kind() {
        let out = generate_alt_text(
            "kana",
            &json!({ "character": "あ", "type": "hiragana", "romanization": "a" }),
            &defaults(),
        );
        assert_eq!(out, "Hiragana character あ (a) - Japanese hiragana syllable");

        let out = generate_alt_text(
            "kanji",
            &json!({ "character": "水", "meaning": "water", "readings": { "on": ["スイ"] }, "jlptLevel": "N5" }),
            &defaults(),
        );
        assert_eq!(out, "Kanji 水 meaning \"water\" (スイ) - N5");

        let out = generate_alt_text("chart", &json!({ "chartType": "kanji" }), &defaults());
        assert!(out.starts_with("Kanji chart"));

        assert_eq!(generate_alt_text("avatar", &json!({}), &defaults()), "User profile picture");
    }

    #[test]
    fn unknown_kind_falls_back() {
        assert_eq!(generate_alt_text("hologram", &json!({}), &defaults()), "Image");
        assert_eq!(generate_alt_text("chart", &json!({ "chartType": "runes" }), &defaults()), "Image");
    }
}
