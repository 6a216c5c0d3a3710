pub mod alerts;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod massive_client;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod scorer;
pub mod sweep;
pub mod telegram_client;
pub mod thresholds;

// Re-exports for convenience
pub use config::Settings;
pub use massive_client::MassiveClient;
pub use models::{Candidate, Contract, ContractType, Direction, FlowType, RejectReason};
pub use pipeline::{ScanOutcome, scan_contracts};
pub use thresholds::Thresholds;
