use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use mongodb::bson::doc;
use serde::Deserialize;

use crate::config;
use crate::error::ApiError;
use crate::middleware::{ensure_self, AuthUser};
use crate::store::models::Booking;
use crate::store::repo::DeleteReceipt;
use crate::store::Store;

#[derive(Debug, Deserialize)]
pub struct BookingQuery {
    pub email: Option<String>,
}

/// GET /books?email= - List a member's bookings
pub async fn list(
    Extension(store): Extension<Store>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<BookingQuery>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let email = query
        .email
        .ok_or_else(|| ApiError::bad_request("email query parameter is required"))?;
    ensure_self(&auth, &email)?;

    let bookings = store.bookings().find_any(doc! { "email": &email }).await?;
    Ok(Json(bookings))
}

/// POST /books - Record a booking
pub async fn create(
    Extension(store): Extension<Store>,
    Json(mut booking): Json<Booking>,
) -> Result<Response, ApiError> {
    booking.id = None;
    booking.booked_at = Utc::now().to_rfc3339();

    let receipt = store.bookings().insert_one(&booking).await?;
    Ok((StatusCode::CREATED, Json(receipt)).into_response())
}

/// DELETE /books/:id - Remove a booking, when the deployment allows it
pub async fn remove(
    Extension(store): Extension<Store>,
    Path(id): Path<String>,
) -> Result<Json<DeleteReceipt>, ApiError> {
    if !config::config().policy.allow_booking_delete {
        return Err(ApiError::forbidden("booking deletion is disabled"));
    }

    let receipt = store.bookings().delete_id(&id).await?;
    Ok(Json(receipt))
}
