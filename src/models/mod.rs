pub mod assessment;
pub mod request;

pub use assessment::{
    AlertLevel, AnalysisFactors, Priority, Recommendation, RecommendedAction, RiskAssessment,
    RiskLevel,
};
pub use request::{CoordinateParseError, Coordinates, HazardType, RiskRequest};
