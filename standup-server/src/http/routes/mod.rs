//! Route handlers organized by resource

pub mod health;
pub mod index;
pub mod members;
pub mod spin;
pub mod stats;
pub mod twists;

#[cfg(test)]
pub(crate) mod test_support {
    //! Router and request helpers shared by route tests

    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::db::MemoryStore;
    use crate::http::{build_router, AppState, ServerConfig};

    pub fn app() -> Router {
        build_router(
            AppState::new(Arc::new(MemoryStore::new())),
            &ServerConfig::default(),
        )
    }

    pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        match body {
            Some(json) => send_raw(app, method, uri, Some("application/json"), &json.to_string()).await,
            None => send_raw(app, method, uri, None, "").await,
        }
    }

    /// Send an arbitrary body, optionally without a content-type
    pub async fn send_raw(
        app: &Router,
        method: &str,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let request = builder.body(Body::from(body.to_owned())).unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}
