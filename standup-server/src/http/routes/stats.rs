//! Statistics endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Deserialize;
use standup_core::{aggregate, MemberStats};

use crate::http::error::ApiError;
use crate::http::extractors::ValidQuery;
use crate::http::AppState;
use crate::models::DaysWindow;

#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
    pub days: Option<i64>,
}

/// GET /stats?days=30 - who went first, last, and how often
async fn get_stats(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<StatsParams>,
) -> Result<Json<Vec<MemberStats>>, ApiError> {
    let window = params
        .days
        .map(DaysWindow::new)
        .transpose()?
        .unwrap_or_default();

    let records = state
        .store
        .spin_records_since(window.cutoff(Utc::now()))
        .await?;
    tracing::debug!(days = window.days(), records = records.len(), "computing stats");

    Ok(Json(aggregate(&records)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/stats/", get(get_stats))
}
