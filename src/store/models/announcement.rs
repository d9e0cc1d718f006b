use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::serialize_oid_hex;

/// A notice posted to all residents. Announcements are append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_oid_hex",
        default
    )]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub posted_at: String,
}
