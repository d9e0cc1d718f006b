use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub security: SecurityConfig,
    pub payments: PaymentsConfig,
    pub policy: PolicyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
    pub app_name: String,
    pub selection_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Empty means unset; token operations fail with a server error rather
    /// than signing with a guessable default.
    pub jwt_secret: String,
    pub token_expiry_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentsConfig {
    pub secret_key: String,
    pub currency: String,
    pub api_base: String,
}

/// Runtime toggles for behavior that operators have flipped back and forth on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub allow_booking_delete: bool,
    pub retire_bookings_on_payment: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("HAVEN_API_PORT").or_else(|_| env::var("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Store overrides
        if let Ok(v) = env::var("MONGODB_URI") {
            self.store.uri = v;
        }
        if let Ok(v) = env::var("HAVEN_DB_NAME") {
            self.store.database = v;
        }
        if let Ok(v) = env::var("STORE_SELECTION_TIMEOUT_MS") {
            self.store.selection_timeout_ms = v.parse().unwrap_or(self.store.selection_timeout_ms);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.token_expiry_hours = v.parse().unwrap_or(self.security.token_expiry_hours);
        }

        // Payment overrides
        if let Ok(v) = env::var("STRIPE_SECRET_KEY") {
            self.payments.secret_key = v;
        }
        if let Ok(v) = env::var("PAYMENT_CURRENCY") {
            self.payments.currency = v;
        }
        if let Ok(v) = env::var("PAYMENT_API_BASE") {
            self.payments.api_base = v;
        }

        // Policy overrides
        if let Ok(v) = env::var("POLICY_ALLOW_BOOKING_DELETE") {
            self.policy.allow_booking_delete = v.parse().unwrap_or(self.policy.allow_booking_delete);
        }
        if let Ok(v) = env::var("POLICY_RETIRE_BOOKINGS_ON_PAYMENT") {
            self.policy.retire_bookings_on_payment = v.parse().unwrap_or(self.policy.retire_bookings_on_payment);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 5000 },
            store: StoreConfig {
                uri: "mongodb://localhost:27017".to_string(),
                database: "haven".to_string(),
                app_name: "haven-api".to_string(),
                selection_timeout_ms: 5_000,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                token_expiry_hours: 1,
            },
            payments: PaymentsConfig {
                secret_key: String::new(),
                currency: "usd".to_string(),
                api_base: "https://api.stripe.com".to_string(),
            },
            policy: PolicyConfig {
                allow_booking_delete: false,
                retire_bookings_on_payment: false,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            store: StoreConfig {
                database: "haven_staging".to_string(),
                selection_timeout_ms: 10_000,
                ..Self::development().store
            },
            ..Self::development()
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            store: StoreConfig {
                selection_timeout_ms: 10_000,
                ..Self::development().store
            },
            ..Self::development()
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.store.uri, "mongodb://localhost:27017");
        assert_eq!(config.store.selection_timeout_ms, 5_000);
        assert_eq!(config.security.token_expiry_hours, 1);
        assert!(config.security.jwt_secret.is_empty());
        assert!(!config.policy.allow_booking_delete);
        assert!(!config.policy.retire_bookings_on_payment);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.store.selection_timeout_ms, 10_000);
        assert_eq!(config.security.token_expiry_hours, 1);
        assert_eq!(config.payments.currency, "usd");
        assert!(config.payments.secret_key.is_empty());
    }
}
