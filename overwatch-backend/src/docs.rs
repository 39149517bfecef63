//! Landing page and API reference, embedded at compile time.

use axum::{
    http::header::CONTENT_TYPE,
    response::{Html, IntoResponse},
};

const INDEX_HTML: &str = include_str!("../static/index.html");
const DOCS_HTML: &str = include_str!("../static/docs.html");
const OPENAPI_JSON: &str = include_str!("../static/openapi.json");

pub(crate) async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub(crate) async fn reference() -> Html<&'static str> {
    Html(DOCS_HTML)
}

pub(crate) async fn openapi() -> impl IntoResponse {
    ([(CONTENT_TYPE, "application/json")], OPENAPI_JSON)
}
