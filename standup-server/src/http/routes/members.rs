//! Team member endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::{MemberUpdate, TeamMember};
use crate::http::error::ApiError;
use crate::http::extractors::{MemberId, ValidJson, ValidQuery};
use crate::http::AppState;
use crate::models::{Emoji, MemberName};

/// Create member request
#[derive(Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    #[serde(default)]
    pub emoji: Option<String>,
}

/// Partial update request
#[derive(Deserialize)]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub emoji: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// Member response
#[derive(Serialize)]
pub struct MemberResponse {
    pub id: i64,
    pub name: String,
    pub emoji: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<TeamMember> for MemberResponse {
    fn from(m: TeamMember) -> Self {
        Self {
            id: m.id,
            name: m.name,
            emoji: m.emoji,
            is_active: m.is_active,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /members - active members, or all with `?include_inactive=true`
async fn list_members(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let members = state.store.list_members(params.include_inactive).await?;
    Ok(Json(members.into_iter().map(MemberResponse::from).collect()))
}

/// POST /members - add a member (or bring back a deactivated one)
async fn create_member(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateMemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), ApiError> {
    let name = MemberName::new(&req.name)?;
    let emoji = Emoji::new(req.emoji.as_deref())?;

    let member = state.store.create_member(&name, &emoji).await?;
    tracing::info!(id = member.id, name = %member.name, "member added");

    Ok((StatusCode::CREATED, Json(MemberResponse::from(member))))
}

/// GET /members/{id}
async fn get_member(
    State(state): State<Arc<AppState>>,
    MemberId(id): MemberId,
) -> Result<Json<MemberResponse>, ApiError> {
    let member = state.store.get_member(id).await?;
    Ok(Json(MemberResponse::from(member)))
}

/// PUT /members/{id} - update any of name, emoji, active flag
async fn update_member(
    State(state): State<Arc<AppState>>,
    MemberId(id): MemberId,
    ValidJson(req): ValidJson<UpdateMemberRequest>,
) -> Result<Json<MemberResponse>, ApiError> {
    let update = MemberUpdate {
        name: req.name.as_deref().map(MemberName::new).transpose()?,
        emoji: req
            .emoji
            .as_deref()
            .map(|e| Emoji::new(Some(e)))
            .transpose()?,
        is_active: req.is_active,
    };

    let member = state.store.update_member(id, update).await?;
    Ok(Json(MemberResponse::from(member)))
}

/// DELETE /members/{id} - deactivate; spin history is kept
async fn delete_member(
    State(state): State<Arc<AppState>>,
    MemberId(id): MemberId,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.deactivate_member(id).await?;
    tracing::info!(id, "member deactivated");

    Ok(Json(MessageResponse {
        message: "Member deactivated",
    }))
}

/// Member routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/members", get(list_members).post(create_member))
        .route("/members/", get(list_members).post(create_member))
        .route(
            "/members/{id}",
            get(get_member).put(update_member).delete(delete_member),
        )
}
