use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use mongodb::bson::doc;

use crate::error::ApiError;
use crate::services::AgreementService;
use crate::store::models::{Agreement, AgreementStatus, Role};
use crate::store::repo::{DeleteReceipt, UpdateReceipt};
use crate::store::Store;

/// GET /agree - List every agreement request
pub async fn list(Extension(store): Extension<Store>) -> Result<Json<Vec<Agreement>>, ApiError> {
    let agreements = store.agreements().find_any(doc! {}).await?;
    Ok(Json(agreements))
}

/// POST /agree - File an agreement request
///
/// Status and role are server-assigned; whatever the client sends for them
/// is discarded so every new request starts out pending and unprivileged.
pub async fn create(
    Extension(store): Extension<Store>,
    Json(mut agreement): Json<Agreement>,
) -> Result<Response, ApiError> {
    agreement.id = None;
    agreement.status = AgreementStatus::Pending;
    agreement.role = Role::None;
    agreement.requested_at = Utc::now().to_rfc3339();

    let receipt = store.agreements().insert_one(&agreement).await?;
    Ok((StatusCode::CREATED, Json(receipt)).into_response())
}

/// PATCH /agree/:id - Approve a pending request
pub async fn approve(
    Extension(store): Extension<Store>,
    Path(id): Path<String>,
) -> Result<Json<UpdateReceipt>, ApiError> {
    let receipt = AgreementService::new(store).approve(&id).await?;
    Ok(Json(receipt))
}

/// DELETE /agree/:id - Discard a request
pub async fn remove(
    Extension(store): Extension<Store>,
    Path(id): Path<String>,
) -> Result<Json<DeleteReceipt>, ApiError> {
    let receipt = store.agreements().delete_id(&id).await?;
    Ok(Json(receipt))
}
