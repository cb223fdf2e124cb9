pub mod alerting;
pub mod config;
pub mod input;
pub mod models;
pub mod output;
pub mod report;
pub mod scoring;

// Re-export commonly used types
pub use models::{AlertLevel, Coordinates, HazardType, RiskAssessment, RiskLevel, RiskRequest};
pub use scoring::{FixedJitter, Jitter, RequestDefaults, RiskScorer, RngJitter};
pub use report::RiskReport;
pub use alerting::{BroadcastPolicy, HighRiskNotice};
pub use input::RequestReader;
pub use output::{OutputFormat, OutputHandler};
