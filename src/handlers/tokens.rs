use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, Claims};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

/// POST /jwt - Mint a signed session token for the supplied identity
///
/// Issuance is unconditional: the email is not required to belong to a
/// registered account. What the token buys is decided later, by the role
/// and ownership checks on protected routes.
pub async fn create(Json(request): Json<TokenRequest>) -> Result<Json<Value>, ApiError> {
    let claims = Claims::new(request.email);
    let token = auth::mint_jwt(claims)?;

    Ok(Json(json!({ "token": token })))
}
