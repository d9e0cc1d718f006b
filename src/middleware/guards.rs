use mongodb::bson::doc;

use crate::error::ApiError;
use crate::store::models::Role;
use crate::store::Store;

use super::auth::AuthUser;

/// Capability check for privileged endpoints: the caller's stored role must
/// equal the required role. Runs after token verification because it keys
/// off the claim email.
pub async fn require_role(store: &Store, auth: &AuthUser, required: Role) -> Result<(), ApiError> {
    let user = store.users().find_one(doc! { "email": &auth.email }).await?;

    match user {
        Some(user) if user.role == required => Ok(()),
        _ => Err(ApiError::forbidden("forbidden access")),
    }
}

/// Ownership check for routes addressed by email: callers may only read
/// their own records. Rejects before any store access.
pub fn ensure_self(auth: &AuthUser, email: &str) -> Result<(), ApiError> {
    if auth.email != email {
        return Err(ApiError::forbidden("forbidden access"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callers_may_address_themselves() {
        let auth = AuthUser {
            email: "tenant@example.com".to_string(),
        };
        assert!(ensure_self(&auth, "tenant@example.com").is_ok());
    }

    #[test]
    fn addressing_another_account_is_forbidden() {
        let auth = AuthUser {
            email: "tenant@example.com".to_string(),
        };
        let err = ensure_self(&auth, "other@example.com").unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
}
