use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use mongodb::bson::doc;

use crate::error::ApiError;
use crate::store::models::Announcement;
use crate::store::Store;

/// GET /announcement - List announcements for the residents' board
pub async fn list(
    Extension(store): Extension<Store>,
) -> Result<Json<Vec<Announcement>>, ApiError> {
    let announcements = store.announcements().find_any(doc! {}).await?;
    Ok(Json(announcements))
}

/// POST /announcement - Publish a new announcement
pub async fn create(
    Extension(store): Extension<Store>,
    Json(mut announcement): Json<Announcement>,
) -> Result<Response, ApiError> {
    announcement.id = None;
    announcement.posted_at = Utc::now().to_rfc3339();

    let receipt = store.announcements().insert_one(&announcement).await?;
    Ok((StatusCode::CREATED, Json(receipt)).into_response())
}
