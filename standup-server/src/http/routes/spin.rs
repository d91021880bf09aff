//! Spin endpoints - produce and replay speaking orders

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use standup_core::{apply_twist, Slot, SpinRecord, Twist, PAIR_EMOJI};
use uuid::Uuid;

use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidUuid};
use crate::http::AppState;
use crate::models::ValidationError;

/// Twist type stored for spins whose twist did not apply
const NO_TWIST: &str = "none";

/// Spin request
#[derive(Deserialize)]
pub struct SpinRequest {
    pub present_members: Vec<i64>,
    #[serde(default)]
    pub twist_type: Option<String>,
}

/// Spin result
#[derive(Serialize)]
pub struct SpinResponse {
    pub order: Vec<Slot>,
    pub twist_type: Twist,
    pub twist_applied: bool,
    pub twist_description: String,
    pub session_id: Uuid,
}

/// A recorded spin replayed from history
#[derive(Serialize)]
pub struct RecordedSpinResponse {
    pub session_id: Uuid,
    pub twist_type: String,
    pub recorded_at: String,
    pub order: Vec<Slot>,
}

/// POST /spin - shuffle the present members, apply a twist, record it
async fn spin(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<SpinRequest>,
) -> Result<Json<SpinResponse>, ApiError> {
    if req.present_members.is_empty() {
        return Err(ValidationError::Empty {
            field: "present_members",
        }
        .into());
    }
    let twist = match req.twist_type.as_deref() {
        Some(t) => t.parse::<Twist>()?,
        None => Twist::default(),
    };

    let members = state.store.active_members(&req.present_members).await?;
    if members.is_empty() {
        return Err(ApiError::BadRequest {
            message: "No valid members found".to_owned(),
        });
    }

    // ThreadRng is !Send; keep it out of scope at the next await
    let outcome = {
        let mut rng = rand::thread_rng();
        apply_twist(members, twist, &mut rng)
    };

    let session_id = Uuid::new_v4();
    let stored_twist = if outcome.applied { twist.id() } else { NO_TWIST };
    state
        .store
        .record_spin(session_id, stored_twist, &outcome.slots)
        .await?;

    tracing::info!(
        %session_id,
        twist = %twist,
        applied = outcome.applied,
        slots = outcome.slots.len(),
        "spin recorded"
    );

    Ok(Json(SpinResponse {
        order: outcome.slots,
        twist_type: twist,
        twist_applied: outcome.applied,
        twist_description: outcome.description,
        session_id,
    }))
}

/// GET /spins/{session_id} - replay a recorded spin
async fn get_spin(
    State(state): State<Arc<AppState>>,
    ValidUuid(session_id): ValidUuid,
) -> Result<Json<RecordedSpinResponse>, ApiError> {
    let records = state.store.get_spin(session_id).await?;
    let first = records.first().ok_or_else(|| ApiError::NotFound {
        resource: "spin",
        id: session_id.to_string(),
    })?;

    Ok(Json(RecordedSpinResponse {
        session_id,
        twist_type: first.twist_type.clone(),
        recorded_at: first.recorded_at.to_rfc3339(),
        order: slots_from_records(&records),
    }))
}

/// Regroup per-member rows into slots; rows sharing a position were a pair.
fn slots_from_records(records: &[SpinRecord]) -> Vec<Slot> {
    let mut by_position: BTreeMap<u32, Vec<&SpinRecord>> = BTreeMap::new();
    for r in records {
        by_position.entry(r.position).or_default().push(r);
    }

    by_position
        .into_iter()
        .map(|(position, rows)| {
            let emoji = match rows.as_slice() {
                [solo] => solo.emoji.clone(),
                _ => PAIR_EMOJI.to_owned(),
            };
            Slot {
                position,
                name: rows
                    .iter()
                    .map(|r| r.member_name.as_str())
                    .collect::<Vec<_>>()
                    .join(" & "),
                emoji,
                member_ids: rows.iter().map(|r| r.member_id).collect(),
            }
        })
        .collect()
}

/// Spin routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/spin", post(spin))
        .route("/spin/", post(spin))
        .route("/spins/{session_id}", get(get_spin))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{app, send, send_raw};
    use super::*;
    use axum::http::StatusCode;
    use chrono::Utc;
    use serde_json::{json, Value};

    async fn seed(app: &Router, names: &[&str]) -> Vec<i64> {
        let mut ids = Vec::new();
        for name in names {
            let (_, body) = send(app, "POST", "/members", Some(json!({"name": name}))).await;
            ids.push(body["id"].as_i64().unwrap());
        }
        ids
    }

    fn order_ids(body: &Value) -> Vec<i64> {
        let mut ids: Vec<i64> = body["order"]
            .as_array()
            .unwrap()
            .iter()
            .flat_map(|slot| slot["member_ids"].as_array().unwrap().clone())
            .map(|id| id.as_i64().unwrap())
            .collect();
        ids.sort_unstable();
        ids
    }

    #[tokio::test]
    async fn default_spin_is_random() {
        let app = app();
        let ids = seed(&app, &["Ada", "Bob", "Cy"]).await;

        let (status, body) = send(&app, "POST", "/spin", Some(json!({"present_members": ids}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["twist_type"], "random");
        assert_eq!(body["twist_applied"], false);
        assert_eq!(body["twist_description"], "Random order (no twist)");
        assert_eq!(order_ids(&body), ids);
    }

    #[tokio::test]
    async fn reverse_spin_orders_names() {
        let app = app();
        let ids = seed(&app, &["Ada", "Cy", "Bob"]).await;

        let (_, body) = send(
            &app,
            "POST",
            "/spin",
            Some(json!({"present_members": ids, "twist_type": "reverse"})),
        )
        .await;
        let names: Vec<&str> = body["order"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Cy", "Bob", "Ada"]);
        assert_eq!(body["twist_applied"], true);
    }

    #[tokio::test]
    async fn inactive_and_unknown_members_are_ignored() {
        let app = app();
        let ids = seed(&app, &["Ada", "Bob"]).await;
        send(&app, "DELETE", &format!("/members/{}", ids[1]), None).await;

        let (status, body) = send(
            &app,
            "POST",
            "/spin",
            Some(json!({"present_members": [ids[0], ids[1], 999]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(order_ids(&body), vec![ids[0]]);
    }

    #[tokio::test]
    async fn no_valid_members_is_400() {
        let (status, body) = send(&app(), "POST", "/spin", Some(json!({"present_members": [1, 2]}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "No valid members found");
    }

    #[tokio::test]
    async fn empty_present_list_is_400() {
        let (status, body) = send(&app(), "POST", "/spin", Some(json!({"present_members": []}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn unknown_twist_is_400() {
        let app = app();
        let ids = seed(&app, &["Ada"]).await;
        let (status, body) = send(
            &app,
            "POST",
            "/spin",
            Some(json!({"present_members": ids, "twist_type": "emoji_sort"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid twist_type value: 'emoji_sort'");
    }

    #[tokio::test]
    async fn recorded_pair_spin_replays() {
        let app = app();
        let ids = seed(&app, &["Ada", "Bob", "Cy", "Di"]).await;

        let (_, spun) = send(
            &app,
            "POST",
            "/spin",
            Some(json!({"present_members": ids, "twist_type": "pair_up"})),
        )
        .await;
        assert_eq!(spun["order"].as_array().unwrap().len(), 2);

        let uri = format!("/spins/{}", spun["session_id"].as_str().unwrap());
        let (status, replay) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(replay["twist_type"], "pair_up");
        assert_eq!(replay["order"], spun["order"]);
    }

    #[tokio::test]
    async fn unapplied_twist_is_stored_as_none() {
        let app = app();
        let ids = seed(&app, &["Ada"]).await;

        let (_, spun) = send(
            &app,
            "POST",
            "/spin",
            Some(json!({"present_members": ids, "twist_type": "random_skip"})),
        )
        .await;
        assert_eq!(spun["twist_applied"], false);

        let uri = format!("/spins/{}", spun["session_id"].as_str().unwrap());
        let (_, replay) = send(&app, "GET", &uri, None).await;
        assert_eq!(replay["twist_type"], "none");
    }

    #[tokio::test]
    async fn unknown_session_is_404() {
        let uri = format!("/spins/{}", Uuid::new_v4());
        let (status, _) = send(&app(), "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app(), "GET", "/spins/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wrong_body_shape_is_json_400() {
        let (status, body) = send(&app(), "POST", "/spin", Some(json!({"present_members": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");

        let (status, body) = send_raw(&app(), "POST", "/spin", Some("application/json"), "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn trailing_slash_spin() {
        let app = app();
        let ids = seed(&app, &["Ada", "Bob"]).await;
        let (status, body) = send(&app, "POST", "/spin/", Some(json!({"present_members": ids}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(order_ids(&body), ids);
    }

    #[tokio::test]
    async fn double_turn_records_repeat_and_counts_once() {
        let app = app();
        let ids = seed(&app, &["Ada", "Bob", "Cy"]).await;

        let (_, spun) = send(
            &app,
            "POST",
            "/spin",
            Some(json!({"present_members": ids, "twist_type": "double_turn"})),
        )
        .await;
        assert_eq!(spun["twist_applied"], true);

        let order = spun["order"].as_array().unwrap();
        assert_eq!(order.len(), 4);
        let lucky = order[3]["member_ids"][0].as_i64().unwrap();
        let appearances = order
            .iter()
            .filter(|slot| slot["member_ids"][0].as_i64() == Some(lucky))
            .count();
        assert_eq!(appearances, 2);

        let uri = format!("/spins/{}", spun["session_id"].as_str().unwrap());
        let (_, replay) = send(&app, "GET", &uri, None).await;
        assert_eq!(replay["order"].as_array().unwrap().len(), 4);
        assert_eq!(replay["twist_type"], "double_turn");

        let (_, stats) = send(&app, "GET", "/stats", None).await;
        let stats = stats.as_array().unwrap();
        assert_eq!(stats.len(), 3);
        assert!(stats.iter().all(|row| row["total_standups"] == 1));

        let lucky_row = stats.iter().find(|row| row["member_id"] == lucky).unwrap();
        assert_eq!(lucky_row["last_count"], 1);
    }

    #[tokio::test]
    async fn pair_up_stats_share_first_place() {
        let app = app();
        let ids = seed(&app, &["Ada", "Bob"]).await;

        let (_, spun) = send(
            &app,
            "POST",
            "/spin",
            Some(json!({"present_members": ids, "twist_type": "pair_up"})),
        )
        .await;
        let order = spun["order"].as_array().unwrap();
        assert_eq!(order.len(), 1);
        assert_eq!(order[0]["position"], 1);
        assert_eq!(order[0]["emoji"], PAIR_EMOJI);

        let (_, stats) = send(&app, "GET", "/stats", None).await;
        let stats = stats.as_array().unwrap();
        assert_eq!(stats.len(), 2);
        for row in stats {
            assert_eq!(row["first_count"], 1);
            assert_eq!(row["last_count"], 0);
            assert_eq!(row["total_standups"], 1);
            assert_eq!(row["avg_position"], 1.0);
        }
    }

    #[test]
    fn regroups_pairs_by_position() {
        let session_id = Uuid::new_v4();
        let row = |member_id, name: &str, position| SpinRecord {
            session_id,
            member_id,
            member_name: name.to_owned(),
            emoji: "🙂".to_owned(),
            position,
            twist_type: "pair_up".to_owned(),
            recorded_at: Utc::now(),
        };

        let slots = slots_from_records(&[row(1, "Ada", 1), row(2, "Bob", 1), row(3, "Cy", 2)]);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].name, "Ada & Bob");
        assert_eq!(slots[0].emoji, PAIR_EMOJI);
        assert_eq!(slots[0].member_ids, vec![1, 2]);
        assert_eq!(slots[1].name, "Cy");
        assert_eq!(slots[1].emoji, "🙂");
    }
}
