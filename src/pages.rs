//! Locale-aware page shells for the practice modes.
//!
//! Each page under `/{locale}/{section}/{mode}` is an HTML document that
//! carries its metadata, a breadcrumb trail, BreadcrumbList and
//! LearningResource structured data, and a mount point for the game
//! component that runs client side.

use maud::{html, Markup, DOCTYPE};

use crate::config::Config;
use crate::og;
use crate::schema::{
    breadcrumb_schema, json_ld_script, learning_resource_schema, BreadcrumbItem, LearningResourceProps, Provider,
};

/// Pages are regenerated at most once an hour.
pub const CACHE_CONTROL: &str = "public, max-age=3600";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Kana,
    Kanji,
    Vocabulary,
}

impl Section {
    pub fn slug(self) -> &'static str {
        match self {
            Section::Kana => "kana",
            Section::Kanji => "kanji",
            Section::Vocabulary => "vocabulary",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Kana => "Kana",
            Section::Kanji => "Kanji",
            Section::Vocabulary => "Vocabulary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Blitz,
    Gauntlet,
}

impl Mode {
    pub fn slug(self) -> &'static str {
        match self {
            Mode::Blitz => "blitz",
            Mode::Gauntlet => "gauntlet",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Blitz => "Blitz",
            Mode::Gauntlet => "Gauntlet",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    /// Metadata key, e.g. `kanaBlitz`.
    pub key: &'static str,
    pub section: Section,
    pub mode: Mode,
    /// Client component mounted into the shell.
    pub component: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub resource_type: &'static str,
    pub levels: &'static [&'static str],
    pub teaches: &'static str,
    pub assesses: &'static str,
    /// ISO 8601 duration.
    pub time_required: &'static str,
}

impl PageSpec {
    pub fn pathname(&self) -> String {
        format!("/{}/{}", self.section.slug(), self.mode.slug())
    }
}

const BEGINNER_INTERMEDIATE: &[&str] = &["Beginner", "Intermediate"];
const ALL_LEVELS: &[&str] = &["Beginner", "Intermediate", "Advanced"];

pub static PAGES: [PageSpec; 6] = [
    PageSpec {
        key: "kanaBlitz",
        section: Section::Kana,
        mode: Mode::Blitz,
        component: "BlitzKana",
        name: "Hiragana & Katakana Blitz Mode",
        description: "Fast-paced Japanese Kana practice game. Test your speed and accuracy with Hiragana and Katakana recognition in timed challenges.",
        resource_type: "Game",
        levels: BEGINNER_INTERMEDIATE,
        teaches: "Japanese Hiragana and Katakana speed recognition",
        assesses: "Hiragana and Katakana reading speed and accuracy",
        time_required: "PT5M",
    },
    PageSpec {
        key: "kanaGauntlet",
        section: Section::Kana,
        mode: Mode::Gauntlet,
        component: "GauntletKana",
        name: "Hiragana & Katakana Gauntlet Mode",
        description: "Progressive Japanese Kana challenge. Master all Hiragana and Katakana characters in order with increasing difficulty levels.",
        resource_type: "Assessment",
        levels: BEGINNER_INTERMEDIATE,
        teaches: "Complete mastery of Japanese Hiragana and Katakana",
        assesses: "Progressive Kana recognition and mastery",
        time_required: "PT15M",
    },
    PageSpec {
        key: "kanjiBlitz",
        section: Section::Kanji,
        mode: Mode::Blitz,
        component: "BlitzKanji",
        name: "Kanji Blitz Mode",
        description: "Fast-paced Japanese Kanji practice game. Test your speed with Kanji recognition across all JLPT levels in timed challenges.",
        resource_type: "Game",
        levels: ALL_LEVELS,
        teaches: "Japanese Kanji characters and meanings (JLPT N5-N1)",
        assesses: "Kanji recognition speed and accuracy",
        time_required: "PT5M",
    },
    PageSpec {
        key: "kanjiGauntlet",
        section: Section::Kanji,
        mode: Mode::Gauntlet,
        component: "GauntletKanji",
        name: "Kanji Gauntlet Mode",
        description: "Progressive Japanese Kanji mastery challenge. Test your knowledge across JLPT levels with increasing difficulty.",
        resource_type: "Assessment",
        levels: ALL_LEVELS,
        teaches: "Complete Kanji mastery across JLPT N5-N1 levels",
        assesses: "Progressive Kanji recognition and understanding",
        time_required: "PT20M",
    },
    PageSpec {
        key: "vocabularyBlitz",
        section: Section::Vocabulary,
        mode: Mode::Blitz,
        component: "BlitzVocab",
        name: "Japanese Vocabulary Blitz Mode",
        description: "Fast-paced Japanese vocabulary practice game. Test your speed with vocabulary recognition across all JLPT levels in timed challenges.",
        resource_type: "Game",
        levels: ALL_LEVELS,
        teaches: "Japanese vocabulary words and meanings (JLPT N5-N1)",
        assesses: "Vocabulary recognition speed and accuracy",
        time_required: "PT5M",
    },
    PageSpec {
        key: "vocabularyGauntlet",
        section: Section::Vocabulary,
        mode: Mode::Gauntlet,
        component: "GauntletVocab",
        name: "Japanese Vocabulary Gauntlet Mode",
        description: "Progressive Japanese vocabulary mastery challenge. Build comprehensive word knowledge across JLPT levels.",
        resource_type: "Assessment",
        levels: ALL_LEVELS,
        teaches: "Complete vocabulary mastery across JLPT N5-N1 levels",
        assesses: "Progressive vocabulary recognition and comprehension",
        time_required: "PT20M",
    },
];

pub fn find_page(section: &str, mode: &str) -> Option<&'static PageSpec> {
    PAGES
        .iter()
        .find(|p| p.section.slug() == section && p.mode.slug() == mode)
}

/// Every `(locale, page)` pair to pre-render.
pub fn static_params(locales: &[String]) -> Vec<(String, &'static PageSpec)> {
    locales
        .iter()
        .flat_map(|locale| PAGES.iter().map(move |page| (locale.clone(), page)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub canonical: String,
    /// `(hreflang, href)` for each locale plus `x-default`.
    pub alternates: Vec<(String, String)>,
}

pub fn page_metadata(config: &Config, locale: &str, page: &PageSpec) -> PageMetadata {
    let pathname = page.pathname();
    let mut alternates: Vec<(String, String)> = config
        .locales
        .iter()
        .map(|l| (l.clone(), format!("{}/{}{}", config.site_url, l, pathname)))
        .collect();
    alternates.push(("x-default".to_string(), config.absolute(&pathname)));

    PageMetadata {
        title: format!("{} | {}", page.name, config.site_name),
        description: page.description.to_string(),
        canonical: format!("{}/{}{}", config.site_url, locale, pathname),
        alternates,
    }
}

pub fn breadcrumbs(config: &Config, page: &PageSpec) -> Vec<BreadcrumbItem> {
    vec![
        BreadcrumbItem::new("Home", config.site_url.as_str()),
        BreadcrumbItem::new(page.section.label(), config.absolute(page.section.slug())),
        BreadcrumbItem::new(page.mode.label(), config.absolute(&page.pathname())),
    ]
}

pub fn learning_resource(config: &Config, page: &PageSpec) -> LearningResourceProps {
    LearningResourceProps {
        name: page.name.to_string(),
        description: page.description.to_string(),
        url: config.absolute(&page.pathname()),
        learning_resource_type: Some(page.resource_type.to_string()),
        educational_level: page.levels.iter().map(|l| l.to_string()).collect(),
        teaches: Some(page.teaches.to_string()),
        assesses: Some(page.assesses.to_string()),
        time_required: Some(page.time_required.to_string()),
        is_accessible_for_free: Some(true),
        in_language: None,
        provider: Some(Provider {
            name: config.site_name.clone(),
            url: Some(config.site_url.clone()),
        }),
    }
}

/// Breadcrumb trail; a lone "Home" renders nothing.
pub fn render_breadcrumbs(items: &[BreadcrumbItem], include_schema: bool) -> Markup {
    if items.len() < 2 {
        return html! {};
    }
    let last = items.len() - 1;

    html! {
        @if include_schema {
            (json_ld_script("breadcrumb-schema", &breadcrumb_schema(items)))
        }
        nav.breadcrumbs aria-label="Breadcrumb" {
            ol {
                @for (index, item) in items.iter().enumerate() {
                    li {
                        @if index == last {
                            span aria-current="page" { (item.name) }
                        } @else {
                            a href=(item.url) { (item.name) }
                        }
                    }
                }
            }
        }
    }
}

fn og_image_url(config: &Config, page: &PageSpec) -> String {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("type", page.section.slug())
        .append_pair("title", page.name)
        .finish();
    format!("{}/api/og?{}", config.site_url, query)
}

pub fn render_page(config: &Config, locale: &str, page: &PageSpec) -> Markup {
    let meta = page_metadata(config, locale, page);
    let trail = breadcrumbs(config, page);
    let resource = learning_resource_schema(&learning_resource(config, page));

    html! {
        (DOCTYPE)
        html lang=(locale) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (meta.title) }
                meta name="description" content=(meta.description);
                link rel="canonical" href=(meta.canonical);
                @for (lang, href) in &meta.alternates {
                    link rel="alternate" hreflang=(lang) href=(href);
                }
                meta property="og:title" content=(meta.title);
                meta property="og:description" content=(meta.description);
                meta property="og:url" content=(meta.canonical);
                meta property="og:image" content=(og_image_url(config, page));
                meta property="og:image:type" content="image/png";
                meta property="og:image:width" content=(og::WIDTH);
                meta property="og:image:height" content=(og::HEIGHT);
                (json_ld_script("learning-resource-schema", &resource))
            }
            body {
                (render_breadcrumbs(&trail, true))
                main id="app" data-component=(page.component) data-page=(page.key) data-locale=(locale) {}
            }
        }
    }
}
