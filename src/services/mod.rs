pub mod agreement_service;
pub mod stats_service;

pub use agreement_service::{AgreementService, ApprovalError};
pub use stats_service::{StatsService, StatsSummary};
