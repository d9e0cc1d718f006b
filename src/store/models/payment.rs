use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::serialize_oid_hex;

/// A completed checkout. Each record counts as one booked unit in the
/// occupancy summary and its `rent` feeds the revenue total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_oid_hex",
        default
    )]
    pub id: Option<ObjectId>,
    pub email: String,
    pub rent: f64,
    #[serde(default)]
    pub booking_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub paid_at: String,
}
