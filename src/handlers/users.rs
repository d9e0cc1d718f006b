use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use mongodb::bson::doc;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ensure_self, require_role, AuthUser};
use crate::store::models::{Role, User};
use crate::store::repo::UpdateReceipt;
use crate::store::Store;

/// GET /users - List every registered account (admin only)
pub async fn list(
    Extension(store): Extension<Store>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<User>>, ApiError> {
    require_role(&store, &auth, Role::Admin).await?;

    let users = store.users().find_any(doc! {}).await?;
    Ok(Json(users))
}

/// POST /users - Register an account, idempotently by email
pub async fn create(
    Extension(store): Extension<Store>,
    Json(mut user): Json<User>,
) -> Result<Response, ApiError> {
    // The store mints the id.
    user.id = None;

    let users = store.users();
    if users.find_one(doc! { "email": &user.email }).await?.is_some() {
        let body = json!({ "message": "user already exists", "insertedId": null });
        return Ok((StatusCode::OK, Json(body)).into_response());
    }

    let receipt = users.insert_one(&user).await?;
    Ok((StatusCode::CREATED, Json(receipt)).into_response())
}

/// GET /users/admin/:email - Does the addressed account hold the admin role?
///
/// Callers may only ask about themselves. An unknown email reads as false
/// rather than not-found.
pub async fn is_admin(
    Extension(store): Extension<Store>,
    Extension(auth): Extension<AuthUser>,
    Path(email): Path<String>,
) -> Result<Json<Value>, ApiError> {
    ensure_self(&auth, &email)?;

    let user = store.users().find_one(doc! { "email": &email }).await?;
    let admin = user.map(|u| u.role == Role::Admin).unwrap_or(false);
    Ok(Json(json!({ "admin": admin })))
}

/// GET /users/member/:email - Does the addressed account hold the member role?
pub async fn is_member(
    Extension(store): Extension<Store>,
    Extension(auth): Extension<AuthUser>,
    Path(email): Path<String>,
) -> Result<Json<Value>, ApiError> {
    ensure_self(&auth, &email)?;

    let user = store.users().find_one(doc! { "email": &email }).await?;
    let member = user.map(|u| u.role == Role::Member).unwrap_or(false);
    Ok(Json(json!({ "member": member })))
}

/// PATCH /users/admin/:id - Grant the admin role (admin only)
pub async fn make_admin(
    Extension(store): Extension<Store>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<UpdateReceipt>, ApiError> {
    require_role(&store, &auth, Role::Admin).await?;

    let receipt = store
        .users()
        .update_id(&id, doc! { "role": Role::Admin.as_str() })
        .await?;
    Ok(Json(receipt))
}

/// PATCH /users/member/:id - Grant the member role (admin only)
pub async fn make_member(
    Extension(store): Extension<Store>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<UpdateReceipt>, ApiError> {
    require_role(&store, &auth, Role::Admin).await?;

    let receipt = store
        .users()
        .update_id(&id, doc! { "role": Role::Member.as_str() })
        .await?;
    Ok(Json(receipt))
}

/// DELETE /users/:id - Demote privileged accounts, remove unprivileged ones
/// (admin only)
pub async fn remove(
    Extension(store): Extension<Store>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    require_role(&store, &auth, Role::Admin).await?;

    let users = store.users();
    let user = users
        .find_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    match decide_deletion(user.role) {
        Deletion::Demote => {
            let receipt = users
                .update_id(&id, doc! { "role": Role::None.as_str() })
                .await?;
            Ok(Json(receipt).into_response())
        }
        Deletion::Remove => {
            let receipt = users.delete_id(&id).await?;
            Ok(Json(receipt).into_response())
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Deletion {
    Demote,
    Remove,
}

/// Privileged accounts keep their record and lose their role; accounts with
/// no privilege are removed outright.
pub(crate) fn decide_deletion(role: Role) -> Deletion {
    if role.is_privileged() {
        Deletion::Demote
    } else {
        Deletion::Remove
    }
}
