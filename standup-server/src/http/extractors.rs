//! Custom Axum extractors
//!
//! Every rejection is an `ApiError`, so malformed input gets the same
//! `{error, message}` JSON body as any other 400.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::error::ApiError;
use crate::models::ValidationError;

/// Read a single path segment, rejecting with a JSON 400.
async fn path_segment<S>(parts: &mut Parts, state: &S, field: &'static str) -> Result<String, ApiError>
where
    S: Send + Sync,
{
    let Path(raw): Path<String> = Path::from_request_parts(parts, state)
        .await
        .map_err(|e| ApiError::BadRequest {
            message: format!("invalid {} in path: {}", field, e.body_text()),
        })?;
    Ok(raw)
}

/// Extract a numeric member id from path
pub struct MemberId(pub i64);

impl<S> FromRequestParts<S> for MemberId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = path_segment(parts, state, "member id").await?;

        let id = id.parse::<i64>().map_err(|_| {
            ApiError::Validation(ValidationError::InvalidVariant {
                field: "member id",
                value: id.clone(),
            })
        })?;

        Ok(Self(id))
    }
}

/// Extract and validate a UUID from path
pub struct ValidUuid(pub Uuid);

impl<S> FromRequestParts<S> for ValidUuid
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = path_segment(parts, state, "session id").await?;

        let uuid = Uuid::parse_str(&id).map_err(|_| {
            ApiError::Validation(ValidationError::InvalidVariant {
                field: "session id",
                value: id.clone(),
            })
        })?;

        Ok(Self(uuid))
    }
}

/// `Json<T>` whose rejections (bad syntax, wrong shape, missing
/// content-type) become a JSON 400
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| ApiError::BadRequest {
                message: e.body_text(),
            })?;
        Ok(Self(value))
    }
}

/// `Query<T>` whose rejections become a JSON 400
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: QueryRejection| ApiError::BadRequest {
                message: e.body_text(),
            })?;
        Ok(Self(value))
    }
}
