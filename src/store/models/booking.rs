use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::serialize_oid_hex;

/// A reservation of one or more apartments. `booked_at` is set by the server
/// at insert time; whatever the client sends for it is discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_oid_hex",
        default
    )]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(default)]
    pub apartment_ids: Vec<String>,
    pub rent: f64,
    #[serde(default)]
    pub booked_at: String,
}
