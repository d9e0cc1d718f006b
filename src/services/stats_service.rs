use mongodb::bson::doc;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::store::models::Payment;
use crate::store::{Store, StoreError};

/// Occupancy and revenue summary for the admin dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub users: u64,
    pub apartments: u64,
    pub booked: u64,
    pub available: i64,
    pub available_percentage: f64,
    pub booked_percentage: f64,
    pub revenue: f64,
}

pub struct StatsService {
    store: Store,
}

impl StatsService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn summarize(&self) -> Result<StatsSummary, StoreError> {
        let users = self.store.users().count(doc! {}).await?;
        let apartments = self.store.apartments().count(doc! {}).await?;
        // Every payment record represents one booked unit.
        let booked = self.store.payments().count(doc! {}).await?;

        let available = apartments as i64 - booked as i64;
        let (available_percentage, booked_percentage) = occupancy_percentages(apartments, booked);

        let payments = self.store.payments().find_any(doc! {}).await?;
        let revenue = total_revenue(&payments);

        Ok(StatsSummary {
            users,
            apartments,
            booked,
            available,
            available_percentage,
            booked_percentage,
            revenue,
        })
    }
}

/// Share of available and booked units, scaled to 100. A property with no
/// apartments reports 0.0 for both rather than dividing by zero.
fn occupancy_percentages(apartments: u64, booked: u64) -> (f64, f64) {
    if apartments == 0 {
        return (0.0, 0.0);
    }

    let total = apartments as f64;
    let available = apartments as i64 - booked as i64;
    (
        (available as f64 / total) * 100.0,
        (booked as f64 / total) * 100.0,
    )
}

/// Sum payment amounts with decimal accumulation so repeated float addition
/// cannot drift the total.
fn total_revenue(payments: &[Payment]) -> f64 {
    let total: Decimal = payments
        .iter()
        .filter_map(|payment| Decimal::from_f64(payment.rent))
        .sum();
    total.to_f64().unwrap_or(0.0)
}
