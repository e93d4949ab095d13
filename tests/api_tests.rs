use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::{Body, Bytes};
use axum::extract::{RawQuery, State};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use dojo_seo::api::routes::create_router;
use dojo_seo::config::Config;
use dojo_seo::indexing::sitemap::{sitemap_url_count, verify_sitemap_accessible};
use dojo_seo::indexing::IndexNowNotifier;
use dojo_seo::AppState;

// -- Fake third-party endpoints -------------------------------------------

#[derive(Clone, Default)]
struct Upstream {
    indexnow_status: u16,
    google_status: u16,
    bing_status: u16,
    submissions: Arc<Mutex<Vec<Value>>>,
    content_types: Arc<Mutex<Vec<String>>>,
    pings: Arc<Mutex<Vec<String>>>,
}

impl Upstream {
    fn new(indexnow_status: u16, google_status: u16, bing_status: u16) -> Self {
        Self {
            indexnow_status,
            google_status,
            bing_status,
            ..Default::default()
        }
    }
}

async fn fake_indexnow(State(up): State<Upstream>, headers: HeaderMap, body: Bytes) -> (StatusCode, &'static str) {
    let payload: Value = serde_json::from_slice(&body).unwrap();
    up.submissions.lock().unwrap().push(payload);
    if let Some(ct) = headers.get(header::CONTENT_TYPE) {
        up.content_types.lock().unwrap().push(ct.to_str().unwrap().to_string());
    }
    (StatusCode::from_u16(up.indexnow_status).unwrap(), "upstream says no")
}

async fn fake_google(State(up): State<Upstream>, RawQuery(query): RawQuery) -> StatusCode {
    up.pings.lock().unwrap().push(format!("google?{}", query.unwrap_or_default()));
    StatusCode::from_u16(up.google_status).unwrap()
}

async fn fake_bing(State(up): State<Upstream>, RawQuery(query): RawQuery) -> StatusCode {
    up.pings.lock().unwrap().push(format!("bing?{}", query.unwrap_or_default()));
    StatusCode::from_u16(up.bing_status).unwrap()
}

const SITEMAP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://kanadojo.com/</loc></url>
  <url><loc>https://kanadojo.com/kana</loc></url>
</urlset>"#;

async fn fake_sitemap() -> ([(header::HeaderName, &'static str); 1], &'static str) {
    ([(header::CONTENT_TYPE, "application/xml")], SITEMAP_XML)
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn spawn_upstream(upstream: Upstream) -> SocketAddr {
    let app = Router::new()
        .route("/indexnow", post(fake_indexnow))
        .route("/google/ping", get(fake_google))
        .route("/bing/ping", get(fake_bing))
        .route("/sitemap.xml", get(fake_sitemap))
        .with_state(upstream);
    serve(app).await
}

// -- Helpers --------------------------------------------------------------

fn base_config() -> Config {
    Config::new("https://kanadojo.com").unwrap()
}

fn config_for(addr: SocketAddr) -> Config {
    let mut config = base_config().with_indexnow_key("test-key-123");
    config.indexnow_endpoint = format!("http://{}/indexnow", addr);
    config.google_ping_url = format!("http://{}/google/ping", addr);
    config.bing_ping_url = format!("http://{}/bing/ping", addr);
    config
}

async fn send(config: Config, req: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let app = create_router(AppState::new(config));
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, headers, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_req(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn as_json(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap()
}

// -- /api/indexnow --------------------------------------------------------

#[tokio::test]
async fn indexnow_without_key_is_a_server_error() {
    let (status, _, body) = send(
        base_config(),
        post_json("/api/indexnow", json!({ "url": "https://kanadojo.com/kana" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(as_json(&body), json!({ "error": "IndexNow key not configured" }));
}

#[tokio::test]
async fn indexnow_requires_urls() {
    let config = base_config().with_indexnow_key("k");
    let (status, _, body) = send(config, post_json("/api/indexnow", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        as_json(&body)["error"],
        "No URLs provided. Use \"url\" or \"urls\" in request body."
    );
}

#[tokio::test]
async fn indexnow_rejects_foreign_hosts() {
    let config = base_config().with_indexnow_key("k");
    let req = post_json(
        "/api/indexnow",
        json!({ "urls": ["https://evil.com/kana", "not a url", "https://www.kanadojo.com/kana"] }),
    );
    let (status, _, body) = send(config, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(as_json(&body)["error"], "No valid URLs for kanadojo.com domain");
}

#[tokio::test]
async fn indexnow_rejects_malformed_json() {
    let config = base_config().with_indexnow_key("k");
    let req = Request::builder()
        .method("POST")
        .uri("/api/indexnow")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, _) = send(config, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn indexnow_submits_only_site_urls() {
    let upstream = Upstream::new(200, 200, 200);
    let addr = spawn_upstream(upstream.clone()).await;

    let req = post_json(
        "/api/indexnow",
        json!({
            "url": "https://kanadojo.com/kana",
            "urls": ["https://other.org/x", "https://kanadojo.com/ja/kanji"]
        }),
    );
    let (status, _, body) = send(config_for(addr), req).await;
    assert_eq!(status, StatusCode::OK);

    let body = as_json(&body);
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], 200);
    assert_eq!(body["message"], "URLs submitted successfully");
    assert_eq!(body["submitted"], json!(["https://kanadojo.com/kana", "https://kanadojo.com/ja/kanji"]));

    let submissions = upstream.submissions.lock().unwrap();
    assert_eq!(submissions.len(), 1);
    let payload = &submissions[0];
    assert_eq!(payload["host"], "kanadojo.com");
    assert_eq!(payload["key"], "test-key-123");
    assert_eq!(payload["keyLocation"], "https://kanadojo.com/test-key-123.txt");
    assert_eq!(payload["urlList"], json!(["https://kanadojo.com/kana", "https://kanadojo.com/ja/kanji"]));
    assert_eq!(
        upstream.content_types.lock().unwrap()[0],
        "application/json; charset=utf-8"
    );
}

#[tokio::test]
async fn indexnow_accepted_status_changes_message() {
    let addr = spawn_upstream(Upstream::new(202, 200, 200)).await;
    let req = post_json("/api/indexnow", json!({ "url": "https://kanadojo.com/kana" }));
    let (status, _, body) = send(config_for(addr), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["status"], 202);
    assert_eq!(as_json(&body)["message"], "URLs already known or accepted");
}

#[tokio::test]
async fn indexnow_upstream_rejection_passes_status_through() {
    let addr = spawn_upstream(Upstream::new(403, 200, 200)).await;
    let req = post_json("/api/indexnow", json!({ "url": "https://kanadojo.com/kana" }));
    let (status, _, body) = send(config_for(addr), req).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    let body_text = String::from_utf8(body.to_vec()).unwrap();
    assert!(!body_text.contains("test-key-123"));
    let body = as_json(&body);
    assert_eq!(body["error"], "IndexNow submission failed");
    assert_eq!(body["status"], 403);
    assert_eq!(body["details"], "upstream says no");
}

#[tokio::test]
async fn indexnow_transport_failure_is_internal_error() {
    let mut config = base_config().with_indexnow_key("k");
    config.indexnow_endpoint = "http://127.0.0.1:9/indexnow".to_string();
    let req = post_json("/api/indexnow", json!({ "url": "https://kanadojo.com/kana" }));
    let (status, _, body) = send(config, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = as_json(&body);
    assert_eq!(body["error"], "Internal server error");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn indexnow_descriptor_reports_configuration() {
    let (status, _, body) = send(base_config(), get_req("/api/indexnow")).await;
    assert_eq!(status, StatusCode::OK);
    let body = as_json(&body);
    assert_eq!(body["service"], "IndexNow API");
    assert_eq!(body["configured"], false);
    assert_eq!(body["endpoint"], "https://api.indexnow.org/indexnow");

    let (_, _, body) = send(base_config().with_indexnow_key("k"), get_req("/api/indexnow")).await;
    assert_eq!(as_json(&body)["configured"], true);
}

// -- /api/sitemap/submit --------------------------------------------------

#[tokio::test]
async fn sitemap_partial_failure_is_multi_status() {
    let upstream = Upstream::new(200, 500, 200);
    let addr = spawn_upstream(upstream.clone()).await;

    let req = post_json(
        "/api/sitemap/submit",
        json!({ "sitemapUrl": "https://kanadojo.com/sitemap-0.xml" }),
    );
    let (status, _, body) = send(config_for(addr), req).await;
    assert_eq!(status, StatusCode::MULTI_STATUS);

    let body = as_json(&body);
    assert_eq!(body["success"], false);
    assert_eq!(body["sitemapUrl"], "https://kanadojo.com/sitemap-0.xml");
    assert!(body["timestamp"].is_string());

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["engine"], "google");
    assert_eq!(results[0]["success"], false);
    assert_eq!(results[0]["status"], 500);
    assert_eq!(results[0]["error"], "Submission failed");
    assert_eq!(results[1]["engine"], "bing");
    assert_eq!(results[1]["success"], true);
    assert!(results[1].get("error").is_none());

    let pings = upstream.pings.lock().unwrap();
    assert_eq!(pings.len(), 2);
    assert_eq!(pings[0], "google?sitemap=https%3A%2F%2Fkanadojo.com%2Fsitemap-0.xml");
}

#[tokio::test]
async fn sitemap_defaults_and_succeeds() {
    let upstream = Upstream::new(200, 200, 200);
    let addr = spawn_upstream(upstream.clone()).await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/sitemap/submit")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(config_for(addr), req).await;
    assert_eq!(status, StatusCode::OK);

    let body = as_json(&body);
    assert_eq!(body["success"], true);
    assert_eq!(body["sitemapUrl"], "https://kanadojo.com/sitemap.xml");
    assert_eq!(upstream.pings.lock().unwrap().len(), 2);

    // millisecond precision, e.g. 2026-10-16T03:28:00.179Z
    let timestamp = body["timestamp"].as_str().unwrap();
    assert_eq!(timestamp.len(), 24);
    assert!(timestamp.ends_with('Z'));
    assert_eq!(&timestamp[19..20], ".");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn sitemap_engine_unreachable_is_reported_per_engine() {
    let upstream = Upstream::new(200, 200, 200);
    let addr = spawn_upstream(upstream.clone()).await;
    let mut config = config_for(addr);
    config.google_ping_url = "http://127.0.0.1:9/ping".to_string();

    let (status, _, body) = send(config, post_json("/api/sitemap/submit", json!({}))).await;
    assert_eq!(status, StatusCode::MULTI_STATUS);
    let body = as_json(&body);
    assert_eq!(body["results"][0]["success"], false);
    assert!(body["results"][0].get("status").is_none());
    assert!(body["results"][0]["error"].is_string());
    assert_eq!(body["results"][1]["success"], true);
}

#[tokio::test]
async fn sitemap_rejects_other_sites() {
    for url in ["https://evil.com/sitemap.xml", "https://kanadojo.com.evil.com/sitemap.xml"] {
        let req = post_json("/api/sitemap/submit", json!({ "sitemapUrl": url }));
        let (status, _, body) = send(base_config(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(as_json(&body)["error"], "Invalid sitemap URL");
    }
}

#[tokio::test]
async fn sitemap_descriptor() {
    let (status, _, body) = send(base_config(), get_req("/api/sitemap/submit")).await;
    assert_eq!(status, StatusCode::OK);
    let body = as_json(&body);
    assert_eq!(body["service"], "Sitemap Submission API");
    assert_eq!(body["searchEngines"], json!(["Google", "Bing"]));
    assert_eq!(body["defaultSitemap"], "https://kanadojo.com/sitemap.xml");
}

#[tokio::test]
async fn live_sitemap_is_checked_and_counted() {
    let addr = spawn_upstream(Upstream::new(200, 200, 200)).await;
    let url = format!("http://{}/sitemap.xml", addr);
    assert!(verify_sitemap_accessible(&url).await);
    assert_eq!(sitemap_url_count(&url).await, 2);

    let missing = format!("http://{}/sitemap-0.xml", addr);
    assert!(!verify_sitemap_accessible(&missing).await);
    assert_eq!(sitemap_url_count("http://127.0.0.1:9/sitemap.xml").await, 0);
}

// -- static documents -----------------------------------------------------

#[tokio::test]
async fn security_txt_is_cached_plain_text() {
    for path in ["/security.txt", "/.well-known/security.txt"] {
        let (status, headers, body) = send(base_config(), get_req(path)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");
        assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=86400");
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("Contact: "));

        let expires = text
            .lines()
            .find_map(|l| l.strip_prefix("Expires: "))
            .unwrap();
        let expires = chrono::DateTime::parse_from_rfc3339(expires).unwrap();
        assert!(expires > chrono::Utc::now());
    }
}

fn corner_pixel(png: &Bytes) -> [u8; 4] {
    let image = image::load_from_memory(png).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (1200, 630));
    image.get_pixel(0, 0).0
}

#[tokio::test]
async fn og_image_is_png_with_theme_fallback() {
    let (status, headers, body) = send(base_config(), get_req("/api/og?title=Learn%20Kana&type=mystery")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/png");
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=86400");
    assert!(body.starts_with(b"\x89PNG\r\n\x1a\n"));

    // unknown type gets the default blue-violet gradient
    let [r, _, b, a] = corner_pixel(&body);
    assert_eq!(a, 255);
    assert!(b > r);

    // academy starts pink
    let (_, _, body) = send(base_config(), get_req("/api/og?type=academy")).await;
    let [r, _, b, _] = corner_pixel(&body);
    assert!(r > b);
}

// -- practice pages -------------------------------------------------------

#[tokio::test]
async fn practice_page_renders_for_known_locale() {
    let (status, headers, body) = send(base_config(), get_req("/ja/kana/blitz")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=3600");
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains(r#"data-component="BlitzKana""#));
    assert!(html.contains(r#"<link rel="canonical" href="https://kanadojo.com/ja/kana/blitz">"#));
    assert!(html.contains("BreadcrumbList"));
}

#[tokio::test]
async fn unknown_locale_or_mode_is_not_found() {
    let (status, _, _) = send(base_config(), get_req("/fr/kana/blitz")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(base_config(), get_req("/en/kana/zen")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// -- background notifier --------------------------------------------------

#[tokio::test]
async fn notifier_submits_every_locale_through_the_api() {
    let upstream = Upstream::new(200, 200, 200);
    let upstream_addr = spawn_upstream(upstream.clone()).await;

    let api_config = config_for(upstream_addr);
    let api_addr = serve(create_router(AppState::new(api_config.clone()))).await;

    let mut client_config = api_config;
    client_config.api_base_url = format!("http://{}", api_addr);
    let notifier = IndexNowNotifier::new(&client_config);

    notifier.notify_page_update_all_locales("academy/learn-hiragana").await.unwrap();
    notifier.notify_page_update("/kana").await.unwrap();
    notifier.notify_page_update("kanji").await.unwrap();

    let submissions = upstream.submissions.lock().unwrap();
    assert_eq!(submissions.len(), 3);
    assert_eq!(
        submissions[0]["urlList"],
        json!([
            "https://kanadojo.com/en/academy/learn-hiragana",
            "https://kanadojo.com/es/academy/learn-hiragana",
            "https://kanadojo.com/ja/academy/learn-hiragana"
        ])
    );
    assert_eq!(submissions[1]["urlList"], json!(["https://kanadojo.com/kana"]));
    assert_eq!(submissions[2]["urlList"], json!(["https://kanadojo.com/kanji"]));
}

#[tokio::test]
async fn notifier_swallows_api_errors() {
    // API without a key answers 500; the background task still completes cleanly
    let api_addr = serve(create_router(AppState::new(base_config()))).await;
    let mut client_config = base_config();
    client_config.api_base_url = format!("http://{}", api_addr);
    let notifier = IndexNowNotifier::new(&client_config);

    let report = notifier.submit_url("https://kanadojo.com/kana").await;
    assert!(!report.success);
    assert_eq!(report.error.as_deref(), Some("IndexNow key not configured"));

    assert!(notifier.notify_sitemap_update().await.is_ok());
}
