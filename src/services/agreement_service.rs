use mongodb::bson::doc;

use crate::store::models::{AgreementStatus, Role};
use crate::store::repo::UpdateReceipt;
use crate::store::{Store, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("agreement not found: {0}")]
    NotFound(String),
}

/// Coordinates the two-step approval: activate the agreement, then promote
/// the applicant. The agreement update is the gate; the promotion never runs
/// unless exactly one document was modified.
pub struct AgreementService {
    store: Store,
}

impl AgreementService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Approve a pending agreement and promote the applicant to member.
    ///
    /// A missing id and an already-active agreement are indistinguishable at
    /// the gate: both modify zero documents and report not-found, with no
    /// user mutation. A crash between the two steps leaves an active
    /// agreement alongside an unpromoted user; a retry then reports
    /// not-found and changes nothing further.
    pub async fn approve(&self, id: &str) -> Result<UpdateReceipt, ApprovalError> {
        let agreements = self.store.agreements();

        let receipt = agreements
            .update_id(
                id,
                doc! {
                    "status": AgreementStatus::Active.as_str(),
                    "role": Role::Member.as_str(),
                },
            )
            .await?;

        if receipt.modified_count != 1 {
            return Err(ApprovalError::NotFound(id.to_string()));
        }

        // Re-read for the applicant email; the update result does not carry it.
        if let Some(agreement) = agreements.find_id(id).await? {
            self.store
                .users()
                .update_one_by(
                    doc! { "email": &agreement.email },
                    doc! { "role": Role::Member.as_str() },
                )
                .await?;
        }

        Ok(receipt)
    }
}
