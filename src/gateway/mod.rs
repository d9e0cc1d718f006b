use async_trait::async_trait;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::config::PaymentsConfig;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid payment amount")]
    InvalidAmount,
    #[error("payment provider secret key is not configured")]
    MissingSecret,
    #[error("payment provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("payment provider rejected the request: {0}")]
    Rejected(String),
}

/// Convert a major-unit amount (10.99) into provider minor units (1099).
/// Truncates past two fractional digits; rejects zero, negative and
/// non-finite amounts before any provider traffic.
pub fn to_minor_units(amount: f64) -> Result<i64, GatewayError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(GatewayError::InvalidAmount);
    }

    let amount = Decimal::from_f64(amount).ok_or(GatewayError::InvalidAmount)?;
    (amount * Decimal::ONE_HUNDRED)
        .trunc()
        .to_i64()
        .ok_or(GatewayError::InvalidAmount)
}

/// Seam in front of the payment provider so handlers never talk HTTP
/// directly and tests can substitute the provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent and return the client secret the frontend
    /// uses to confirm it.
    async fn create_intent(&self, amount_minor: i64, currency: &str)
        -> Result<String, GatewayError>;
}

pub struct StripeGateway {
    client: reqwest::Client,
    secret_key: String,
    api_base: String,
}

impl StripeGateway {
    pub fn new(config: &PaymentsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key: config.secret_key.clone(),
            api_base: config.api_base.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    client_secret: String,
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<String, GatewayError> {
        if self.secret_key.is_empty() {
            return Err(GatewayError::MissingSecret);
        }

        let params = [
            ("amount", amount_minor.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self
            .client
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .header("Idempotency-Key", Uuid::new_v4().to_string())
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected(body));
        }

        let intent: IntentResponse = response.json().await?;
        Ok(intent.client_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_fractional_minor_units() {
        assert_eq!(to_minor_units(10.999).unwrap(), 1099);
        assert_eq!(to_minor_units(5.555).unwrap(), 555);
        assert_eq!(to_minor_units(10.0).unwrap(), 1000);
        assert_eq!(to_minor_units(0.009).unwrap(), 0);
    }

    #[test]
    fn rejects_zero_and_negative_amounts() {
        assert!(matches!(to_minor_units(0.0), Err(GatewayError::InvalidAmount)));
        assert!(matches!(to_minor_units(-3.2), Err(GatewayError::InvalidAmount)));
    }

    #[test]
    fn rejects_non_finite_amounts() {
        assert!(matches!(
            to_minor_units(f64::INFINITY),
            Err(GatewayError::InvalidAmount)
        ));
        assert!(matches!(to_minor_units(f64::NAN), Err(GatewayError::InvalidAmount)));
    }

    #[test]
    fn rejects_amounts_past_the_minor_unit_range() {
        assert!(matches!(to_minor_units(1e18), Err(GatewayError::InvalidAmount)));
    }
}
