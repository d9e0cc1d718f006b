use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::{serialize_oid_hex, Role};

/// Lifecycle of a rental agreement. Requests start pending and move to
/// active exactly once, on approval; there is no transition back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgreementStatus {
    #[default]
    Pending,
    Active,
}

impl AgreementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgreementStatus::Pending => "pending",
            AgreementStatus::Active => "active",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agreement {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_oid_hex",
        default
    )]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent: Option<f64>,
    #[serde(default)]
    pub status: AgreementStatus,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub requested_at: String,
}
