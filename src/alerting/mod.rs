//! High-risk notice policy
//!
//! Decides which assessments are worth pushing to live subscribers and
//! builds the notice payload. Delivery itself is left to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Coordinates, RiskAssessment, RiskLevel, RiskRequest};

/// Probability above which an assessment is broadcast
pub const DEFAULT_BROADCAST_THRESHOLD: f64 = 0.6;

/// Event name subscribers listen on
pub const HIGH_RISK_EVENT: &str = "high_risk_prediction";

/// Payload pushed to live subscribers for a high-risk assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighRiskNotice {
    pub location: Option<Coordinates>,
    pub hazard_type: String,
    pub probability: f64,
    pub risk_level: RiskLevel,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadcastPolicy {
    /// Turn notices off entirely
    pub enabled: bool,
    /// Strict lower bound on probability
    pub threshold: f64,
}

impl Default for BroadcastPolicy {
    fn default() -> Self {
        BroadcastPolicy {
            enabled: true,
            threshold: DEFAULT_BROADCAST_THRESHOLD,
        }
    }
}

impl BroadcastPolicy {
    pub fn should_broadcast(&self, assessment: &RiskAssessment) -> bool {
        self.enabled && assessment.probability > self.threshold
    }

    /// Build a notice when the assessment crosses the threshold
    pub fn evaluate(
        &self,
        request: &RiskRequest,
        assessment: &RiskAssessment,
        at: DateTime<Utc>,
    ) -> Option<HighRiskNotice> {
        if !self.should_broadcast(assessment) {
            log::debug!(
                "No broadcast for {} (p={:.3}, threshold {:.2}, enabled {})",
                request.hazard_type,
                assessment.probability,
                self.threshold,
                self.enabled
            );
            return None;
        }

        Some(HighRiskNotice {
            location: request.coordinates,
            hazard_type: request.hazard_label().to_string(),
            probability: assessment.probability,
            risk_level: assessment.risk_level,
            timestamp: at,
        })
    }
}
