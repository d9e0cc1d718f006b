pub mod agreement;
pub mod announcement;
pub mod apartment;
pub mod booking;
pub mod payment;
pub mod user;

pub use agreement::{Agreement, AgreementStatus};
pub use announcement::Announcement;
pub use apartment::Apartment;
pub use booking::Booking;
pub use payment::Payment;
pub use user::{Role, User};

use mongodb::bson::oid::ObjectId;
use serde::Serializer;

/// Serialize a store-minted id as its 24-char hex string. Documents going
/// into the store never carry an id (the field is skipped while `None`), so
/// this only ever shapes JSON responses.
pub(crate) fn serialize_oid_hex<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(oid) => serializer.serialize_str(&oid.to_hex()),
        None => serializer.serialize_none(),
    }
}
