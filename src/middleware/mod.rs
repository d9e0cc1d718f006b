pub mod auth;
pub mod guards;

pub use auth::{verify_token, AuthUser};
pub use guards::{ensure_self, require_role};
