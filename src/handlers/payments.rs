use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use mongodb::bson::doc;
use serde::Deserialize;
use serde_json::json;

use crate::config;
use crate::error::ApiError;
use crate::gateway::{to_minor_units, PaymentGateway};
use crate::middleware::{ensure_self, AuthUser};
use crate::store::models::Payment;
use crate::store::Store;

#[derive(Debug, Deserialize)]
pub struct IntentRequest {
    pub rent: f64,
}

/// POST /create-payment-intent - Open an intent with the provider
///
/// The amount arrives in major units and is converted before the provider
/// sees it. Invalid amounts never generate provider traffic.
pub async fn create_intent(
    Extension(gateway): Extension<Arc<dyn PaymentGateway>>,
    Json(body): Json<IntentRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let amount_minor = to_minor_units(body.rent)?;
    let currency = &config::config().payments.currency;

    let client_secret = gateway.create_intent(amount_minor, currency).await?;
    Ok(Json(json!({ "clientSecret": client_secret })))
}

/// GET /payments/:email - List the caller's payment history
pub async fn list_for(
    Extension(store): Extension<Store>,
    Extension(auth): Extension<AuthUser>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Payment>>, ApiError> {
    ensure_self(&auth, &email)?;

    let payments = store.payments().find_any(doc! { "email": &email }).await?;
    Ok(Json(payments))
}

/// POST /payments - Record a completed payment
///
/// When booking retirement is enabled, every referenced booking id is
/// validated before the insert so a malformed id cannot leave a payment
/// behind with nothing retired.
pub async fn record(
    Extension(store): Extension<Store>,
    Json(mut payment): Json<Payment>,
) -> Result<Response, ApiError> {
    payment.id = None;
    payment.paid_at = Utc::now().to_rfc3339();

    if !config::config().policy.retire_bookings_on_payment {
        let receipt = store.payments().insert_one(&payment).await?;
        return Ok((StatusCode::CREATED, Json(receipt)).into_response());
    }

    for id in &payment.booking_ids {
        crate::store::parse_object_id(id)?;
    }

    let receipt = store.payments().insert_one(&payment).await?;
    let retired = store.bookings().delete_ids(&payment.booking_ids).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "insertedId": receipt.inserted_id,
            "deletedCount": retired.deleted_count,
        })),
    )
        .into_response())
}
