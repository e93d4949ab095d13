//! Open Graph preview images.
//!
//! Lays out a 1200×630 SVG card (gradient background, a large faint glyph for
//! the section, the brand, a clamped title and description, a host badge) and
//! rasterises it to PNG, the format social crawlers accept for `og:image`.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use image::{ImageFormat, RgbaImage};
use maud::{html, Markup};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, fontdb};
use serde::Deserialize;
use tracing::info;

use crate::error::{AppError, Result};

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;
pub const DEFAULT_DESCRIPTION: &str = "Master Japanese with interactive learning";
pub const CACHE_CONTROL: &str = "public, max-age=86400";

// CJK faces first so the section glyphs and Japanese titles have coverage
const FONT_FAMILY: &str = "'Noto Sans CJK JP', 'Noto Sans JP', 'DejaVu Sans', sans-serif";

const TITLE_LINE_CHARS: usize = 28;
const TITLE_MAX_LINES: usize = 2;
const DESCRIPTION_LINE_CHARS: usize = 48;
const DESCRIPTION_MAX_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OgTheme {
    pub from: &'static str,
    pub to: &'static str,
    pub icon: &'static str,
    pub accent: &'static str,
}

const KANA: OgTheme = OgTheme { from: "#667eea", to: "#764ba2", icon: "あ", accent: "#667eea" };
const KANJI: OgTheme = OgTheme { from: "#f093fb", to: "#f5576c", icon: "漢", accent: "#f5576c" };
const VOCABULARY: OgTheme = OgTheme { from: "#4facfe", to: "#00f2fe", icon: "語", accent: "#00f2fe" };
const ACADEMY: OgTheme = OgTheme { from: "#fa709a", to: "#fee140", icon: "学", accent: "#fa709a" };
const DEFAULT: OgTheme = OgTheme { from: "#667eea", to: "#764ba2", icon: "道", accent: "#667eea" };

/// Theme for a `type` query value; anything unknown gets the default theme.
pub fn theme_for(kind: &str) -> OgTheme {
    match kind {
        "kana" => KANA,
        "kanji" => KANJI,
        "vocabulary" => VOCABULARY,
        "academy" => ACADEMY,
        _ => DEFAULT,
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OgParams {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Greedy word wrap capped at `max_lines`; overflow ends the last line with "…".
/// Words longer than a line (e.g. unspaced Japanese) are split by character.
pub fn wrap_lines(text: &str, line_chars: usize, max_lines: usize) -> Vec<String> {
    let line_chars = line_chars.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let used = current.chars().count();
            let sep = usize::from(used > 0);
            if used + sep + word.len() <= line_chars {
                if sep == 1 {
                    current.push(' ');
                }
                current.extend(word.iter());
                break;
            }
            if used > 0 {
                lines.push(std::mem::take(&mut current));
                continue;
            }
            let rest = word.split_off(line_chars.min(word.len()));
            lines.push(word.iter().collect());
            word = rest;
            if word.is_empty() {
                break;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let mut kept: Vec<char> = last.chars().collect();
            kept.truncate(line_chars.saturating_sub(1));
            *last = kept.into_iter().collect::<String>().trim_end().to_string() + "…";
        }
    }
    lines
}

pub fn render_og_svg(params: &OgParams, site_name: &str, host: &str) -> String {
    let title = params.title.as_deref().filter(|t| !t.is_empty()).unwrap_or(site_name);
    let description = params
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DESCRIPTION);
    let theme = theme_for(params.kind.as_deref().unwrap_or("default"));

    let title_lines = wrap_lines(title, TITLE_LINE_CHARS, TITLE_MAX_LINES);
    let description_lines = wrap_lines(description, DESCRIPTION_LINE_CHARS, DESCRIPTION_MAX_LINES);

    let title_top = 300;
    let description_top = title_top + 77 * title_lines.len() as u32 + 30;

    let svg: Markup = html! {
        svg xmlns="http://www.w3.org/2000/svg" width=(WIDTH) height=(HEIGHT) viewBox={ "0 0 " (WIDTH) " " (HEIGHT) } {
            defs {
                // 135deg CSS gradient
                linearGradient id="bg" x1="0" y1="0" x2="1" y2="1" {
                    stop offset="0%" stop-color=(theme.from) {}
                    stop offset="100%" stop-color=(theme.to) {}
                }
            }
            rect width="100%" height="100%" fill="url(#bg)" {}
            text x="600" y="390" font-size="200" fill="white" opacity="0.1" text-anchor="middle" { (theme.icon) }
            text x="600" y="180" font-size="48" font-weight="900" fill="white" text-anchor="middle"
                font-family=(FONT_FAMILY) { (site_name) }
            @for (i, line) in title_lines.iter().enumerate() {
                text x="600" y=(title_top + 77 * i as u32) font-size="64" font-weight="900" fill="white"
                    text-anchor="middle" font-family=(FONT_FAMILY) { (line) }
            }
            @for (i, line) in description_lines.iter().enumerate() {
                text x="600" y=(description_top + 42 * i as u32) font-size="30" fill="white" fill-opacity="0.95"
                    text-anchor="middle" font-family=(FONT_FAMILY) { (line) }
            }
            rect x="880" y="530" width="280" height="60" rx="30" fill="white" fill-opacity="0.2" {}
            text x="1020" y="569" font-size="24" font-weight="600" fill="white" text-anchor="middle"
                font-family=(FONT_FAMILY) { (host) }
            rect x="0" y="622" width="100%" height="8" fill=(theme.accent) {}
        }
    };

    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>{}", svg.into_string())
}

/// System fonts plus any faces under `extra_dir`. Loaded once at startup.
pub fn load_fonts(extra_dir: Option<&Path>) -> Arc<fontdb::Database> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    if let Some(dir) = extra_dir {
        db.load_fonts_dir(dir);
    }
    info!(faces = db.len(), "loaded fonts for OG images");
    Arc::new(db)
}

fn render_failed(details: impl ToString) -> AppError {
    AppError::InternalError {
        message: "Failed to generate image".to_string(),
        details: details.to_string(),
    }
}

/// Rasterises an SVG card to PNG bytes at its declared size.
pub fn rasterize_png(svg: &str, fonts: &Arc<fontdb::Database>) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    options.fontdb = Arc::clone(fonts);

    let tree = usvg::Tree::from_str(svg, &options).map_err(render_failed)?;
    let size = tree.size().to_int_size();
    let mut pixmap = Pixmap::new(size.width(), size.height()).ok_or_else(|| render_failed("empty canvas"))?;
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha; PNG wants straight alpha
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let card = RgbaImage::from_raw(size.width(), size.height(), rgba)
        .ok_or_else(|| render_failed("pixel buffer size mismatch"))?;

    let mut buf = Cursor::new(Vec::new());
    card.write_to(&mut buf, ImageFormat::Png).map_err(render_failed)?;
    Ok(buf.into_inner())
}

/// The `/api/og` card as PNG.
pub fn render_og_png(params: &OgParams, site_name: &str, host: &str, fonts: &Arc<fontdb::Database>) -> Result<Vec<u8>> {
    rasterize_png(&render_og_svg(params, site_name, host), fonts)
}
