//! Landing note at `/`

use axum::http::Uri;
use axum::response::Html;
use axum::{routing::get, Router};

use crate::http::error::ApiError;

const LANDING: &str = r#"<!doctype html>
<html>
    <head><title>Standup Spinner API</title></head>
    <body>
        <h1>Standup Spinner API</h1>
        <p>Your standup spinner backend is running!</p>
        <p>Try <code>GET /members</code>, <code>GET /twists</code> or <code>POST /spin</code>.</p>
    </body>
</html>
"#;

async fn index() -> Html<&'static str> {
    Html(LANDING)
}

/// Fallback for unmatched paths, keeping the JSON error shape
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        resource: "route",
        id: uri.path().to_owned(),
    }
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(index))
}
