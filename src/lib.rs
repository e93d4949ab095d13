pub mod alt_text;
pub mod api;
pub mod config;
pub mod error;
pub mod freshness;
pub mod indexing;
pub mod og;
pub mod pages;
pub mod schema;
pub mod security;

use std::sync::Arc;
use config::Config;
use resvg::usvg::fontdb;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Faces available to the OG image renderer.
    pub fonts: Arc<fontdb::Database>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let fonts = og::load_fonts(config.og_font_dir.as_deref());
        Self {
            config: Arc::new(config),
            fonts,
        }
    }
}
