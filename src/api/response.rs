use serde::Serialize;
use axum::Json;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use maud::Markup;

pub fn json<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(data)).into_response()
}

pub fn success<T: Serialize>(data: T) -> Response {
    json(StatusCode::OK, data)
}

pub fn plain_text(body: String, cache_control: &'static str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, cache_control),
        ],
        body,
    )
        .into_response()
}

pub fn png(body: Vec<u8>, cache_control: &'static str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, cache_control),
        ],
        body,
    )
        .into_response()
}

pub fn page(markup: Markup, cache_control: &'static str) -> Response {
    ([(header::CACHE_CONTROL, cache_control)], Html(markup.into_string())).into_response()
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html("<h1>404 - Page not found</h1>")).into_response()
}
