//! Response envelope for a scored request
//!
//! Wraps a `RiskAssessment` with the prediction summary, impact estimate
//! and metadata that dashboard clients consume.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    AlertLevel, AnalysisFactors, Recommendation, RiskAssessment, RiskLevel, RiskRequest,
};

pub const MODEL_VERSION: &str = "2.1.0";
pub const DATA_QUALITY: &str = "HIGH";
/// Minutes until a client should request a fresh assessment
pub const REFRESH_INTERVAL_MINUTES: i64 = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub probability: f64,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub alert_level: AlertLevel,
    /// Hazard name as the caller sent it
    pub hazard_type: String,
    pub recommendations: Vec<Recommendation>,
    pub next_update: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedImpact {
    pub estimated_affected_population: u64,
    pub economic_impact: f64,
    pub infrastructure_damage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnalysis {
    pub analysis_factors: AnalysisFactors,
    pub estimated_impact: EstimatedImpact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub analysis_timestamp: DateTime<Utc>,
    pub model_version: String,
    pub data_quality: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    pub prediction: Prediction,
    pub risk_assessment: ImpactAnalysis,
    pub metadata: ReportMetadata,
}

impl RiskReport {
    pub fn new(
        request: &RiskRequest,
        assessment: &RiskAssessment,
        generated_at: DateTime<Utc>,
    ) -> Self {
        RiskReport {
            prediction: Prediction {
                probability: assessment.probability,
                confidence: assessment.confidence,
                risk_level: assessment.risk_level,
                alert_level: assessment.alert_level,
                hazard_type: request.hazard_label().to_string(),
                recommendations: assessment.recommendations.clone(),
                next_update: generated_at + Duration::minutes(REFRESH_INTERVAL_MINUTES),
            },
            risk_assessment: ImpactAnalysis {
                analysis_factors: assessment.analysis_factors,
                estimated_impact: EstimatedImpact {
                    estimated_affected_population: assessment.estimated_affected_population,
                    economic_impact: assessment.economic_impact,
                    infrastructure_damage: assessment.analysis_factors.infrastructure,
                },
            },
            metadata: ReportMetadata {
                analysis_timestamp: generated_at,
                model_version: MODEL_VERSION.to_string(),
                data_quality: DATA_QUALITY.to_string(),
            },
        }
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        format!(
            "[{}/{}] {} p={:.3} conf={:.2} affected={} impact=${:.0} next={}",
            self.prediction.risk_level,
            self.prediction.alert_level,
            self.prediction.hazard_type,
            self.prediction.probability,
            self.prediction.confidence,
            self.risk_assessment.estimated_impact.estimated_affected_population,
            self.risk_assessment.estimated_impact.economic_impact,
            self.prediction.next_update.to_rfc3339(),
        )
    }
}
