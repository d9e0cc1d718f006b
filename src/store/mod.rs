pub mod models;
pub mod repo;

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::ClientOptions;
use mongodb::Client;

use crate::config::StoreConfig;
use models::{Agreement, Announcement, Apartment, Booking, Payment, User};
use repo::Repo;

// Collection names as they exist in the database.
const USERS: &str = "users";
const APARTMENTS: &str = "apartment";
const BOOKINGS: &str = "books";
const AGREEMENTS: &str = "agreement";
const ANNOUNCEMENTS: &str = "announcement";
const PAYMENTS: &str = "payments";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("store driver error: {0}")]
    Driver(#[from] mongodb::error::Error),
}

/// Parse a caller-supplied id into an ObjectId. Fails before any query runs,
/// so a malformed id never reaches the driver.
pub fn parse_object_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// Handle on the application database. Cloning is cheap; the underlying
/// driver client is shared.
#[derive(Clone)]
pub struct Store {
    client: Client,
    database: String,
}

impl Store {
    /// Build the driver client from configuration. No connection is
    /// established here; the driver connects on first operation.
    pub async fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = Some(config.app_name.clone());
        options.server_selection_timeout =
            Some(Duration::from_millis(config.selection_timeout_ms));

        let client = Client::with_options(options)?;

        Ok(Self {
            client,
            database: config.database.clone(),
        })
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.db().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    fn db(&self) -> mongodb::Database {
        self.client.database(&self.database)
    }

    pub fn users(&self) -> Repo<User> {
        Repo::new(self.db().collection(USERS))
    }

    pub fn apartments(&self) -> Repo<Apartment> {
        Repo::new(self.db().collection(APARTMENTS))
    }

    pub fn bookings(&self) -> Repo<Booking> {
        Repo::new(self.db().collection(BOOKINGS))
    }

    pub fn agreements(&self) -> Repo<Agreement> {
        Repo::new(self.db().collection(AGREEMENTS))
    }

    pub fn announcements(&self) -> Repo<Announcement> {
        Repo::new(self.db().collection(ANNOUNCEMENTS))
    }

    pub fn payments(&self) -> Repo<Payment> {
        Repo::new(self.db().collection(PAYMENTS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_ids() {
        let oid = parse_object_id("65f0a1b2c3d4e5f6a7b8c9d0").unwrap();
        assert_eq!(oid.to_hex(), "65f0a1b2c3d4e5f6a7b8c9d0");
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(matches!(
            parse_object_id("not-an-id"),
            Err(StoreError::InvalidId(_))
        ));
        assert!(matches!(parse_object_id(""), Err(StoreError::InvalidId(_))));
        // Right length, invalid hex digit
        assert!(matches!(
            parse_object_id("65f0a1b2c3d4e5f6a7b8c9dz"),
            Err(StoreError::InvalidId(_))
        ));
    }
}
