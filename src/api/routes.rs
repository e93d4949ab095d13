use axum::{
    routing::{get, post},
    Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::error::{Result, AppError};
use crate::api::models::{
    IndexNowInfo, IndexNowRequest, IndexNowResponse, SitemapInfo, SitemapSubmitRequest, SitemapSubmitResponse,
};
use crate::api::response;
use crate::indexing::{filter_site_urls, ping_all, submit_to_indexnow, SearchEngine};
use crate::freshness::format_iso_date;
use crate::indexing::sitemap::default_sitemap_url;
use crate::og::{self, OgParams};
use crate::pages::{self, find_page, render_page};
use crate::security;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/indexnow", post(indexnow_handler).get(indexnow_info))
        .route("/api/sitemap/submit", post(sitemap_submit_handler).get(sitemap_info))
        .route("/api/og", get(og_handler))
        .route("/security.txt", get(security_txt_handler))
        .route("/.well-known/security.txt", get(security_txt_handler))
        .route("/:locale/:section/:mode", get(practice_page_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

/// Empty bodies parse as `T::default()`.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::ValidationError(format!("Invalid JSON body: {}", e)))
}

async fn indexnow_handler(State(state): State<AppState>, body: Bytes) -> Response {
    match process_indexnow_request(&state, &body).await {
        Ok(data) => response::success(data),
        Err(err) => err.at_boundary("Internal server error").into_response(),
    }
}

async fn process_indexnow_request(state: &AppState, body: &Bytes) -> Result<IndexNowResponse> {
    let config = &state.config;

    let Some(key) = config.indexnow_key.as_deref() else {
        warn!("IndexNow submission rejected: key not configured");
        return Err(AppError::ConfigError("IndexNow key not configured".to_string()));
    };

    let request: IndexNowRequest = parse_body(body)?;
    let requested = request.collect();
    if requested.is_empty() {
        return Err(AppError::ValidationError(
            "No URLs provided. Use \"url\" or \"urls\" in request body.".to_string(),
        ));
    }

    let valid = filter_site_urls(&requested, &config.host);
    if valid.len() < requested.len() {
        info!(dropped = requested.len() - valid.len(), "dropped URLs outside the site");
    }
    if valid.is_empty() {
        return Err(AppError::ValidationError(format!("No valid URLs for {} domain", config.host)));
    }

    let accepted = submit_to_indexnow(config, key, &valid).await?;

    Ok(IndexNowResponse {
        success: true,
        status: accepted.status,
        message: accepted.message(),
        submitted: valid,
    })
}

async fn indexnow_info(State(state): State<AppState>) -> impl IntoResponse {
    response::success(IndexNowInfo {
        service: "IndexNow API",
        configured: state.config.indexnow_key.is_some(),
        endpoint: state.config.indexnow_endpoint.clone(),
        usage: "POST with { url: \"...\" } or { urls: [\"...\", \"...\"] }",
    })
}

async fn sitemap_submit_handler(State(state): State<AppState>, body: Bytes) -> Response {
    match process_sitemap_submission(&state, &body).await {
        Ok(data) => {
            // 207 when at least one engine failed
            let status = if data.success { StatusCode::OK } else { StatusCode::MULTI_STATUS };
            response::json(status, data)
        }
        Err(err) => err.at_boundary("Failed to submit sitemap").into_response(),
    }
}

async fn process_sitemap_submission(state: &AppState, body: &Bytes) -> Result<SitemapSubmitResponse> {
    let config = &state.config;
    let request: SitemapSubmitRequest = parse_body(body)?;

    let sitemap_url = request
        .sitemap_url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| default_sitemap_url(config));

    let on_site = sitemap_url == config.site_url || sitemap_url.starts_with(&format!("{}/", config.site_url));
    if !on_site {
        return Err(AppError::ValidationError("Invalid sitemap URL".to_string()));
    }

    let results = ping_all(config, &sitemap_url).await;
    let success = results.iter().all(|r| r.success);
    info!(%sitemap_url, success, "sitemap submitted to search engines");

    Ok(SitemapSubmitResponse {
        success,
        sitemap_url,
        results,
        timestamp: format_iso_date(Utc::now()),
    })
}

async fn sitemap_info(State(state): State<AppState>) -> impl IntoResponse {
    let default_sitemap = default_sitemap_url(&state.config);
    response::success(SitemapInfo {
        service: "Sitemap Submission API",
        usage: format!("POST with {{ \"sitemapUrl\": \"{}\" }}", default_sitemap),
        search_engines: SearchEngine::ALL.iter().map(|e| e.display_name()).collect(),
        default_sitemap,
    })
}

async fn og_handler(State(state): State<AppState>, Query(params): Query<OgParams>) -> Response {
    // rasterising is CPU bound; keep it off the async workers
    let rendered = tokio::task::spawn_blocking(move || {
        og::render_og_png(&params, &state.config.site_name, &state.config.host, &state.fonts)
    })
    .await
    .unwrap_or_else(|e| {
        Err(AppError::InternalError {
            message: "Failed to generate image".to_string(),
            details: e.to_string(),
        })
    });

    match rendered {
        Ok(png) => response::png(png, og::CACHE_CONTROL),
        Err(err) => {
            error!(error = %err, "OG image rendering failed");
            err.into_response()
        }
    }
}

async fn security_txt_handler(State(state): State<AppState>) -> Response {
    response::plain_text(security::security_txt(&state.config), security::CACHE_CONTROL)
}

async fn practice_page_handler(
    State(state): State<AppState>,
    Path((locale, section, mode)): Path<(String, String, String)>,
) -> Response {
    if !state.config.is_supported_locale(&locale) {
        return response::not_found();
    }
    match find_page(&section, &mode) {
        Some(page) => response::page(render_page(&state.config, &locale, page), pages::CACHE_CONTROL),
        None => response::not_found(),
    }
}
