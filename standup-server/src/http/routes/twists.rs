//! Twist catalogue endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;
use standup_core::Twist;

#[derive(Serialize)]
pub struct TwistInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Serialize)]
pub struct TwistsResponse {
    pub twists: Vec<TwistInfo>,
}

/// GET /twists - every twist `POST /spin` accepts
async fn list_twists() -> Json<TwistsResponse> {
    let twists = Twist::ALL
        .into_iter()
        .map(|t| TwistInfo {
            id: t.id(),
            name: t.label(),
            description: t.description(),
        })
        .collect();

    Json(TwistsResponse { twists })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/twists", get(list_twists))
        .route("/twists/", get(list_twists))
}
