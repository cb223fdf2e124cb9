use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical risk band derived from the final probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Lower bounds (inclusive) of each band, checked highest first
const RISK_BANDS: [(f64, RiskLevel); 3] = [
    (0.8, RiskLevel::Critical),
    (0.6, RiskLevel::High),
    (0.4, RiskLevel::Medium),
];

impl RiskLevel {
    pub fn from_probability(probability: f64) -> Self {
        RISK_BANDS
            .iter()
            .find(|(floor, _)| probability >= *floor)
            .map(|(_, level)| *level)
            .unwrap_or(RiskLevel::Low)
    }

    /// Alert colour paired one-to-one with this band
    pub fn alert_level(&self) -> AlertLevel {
        match self {
            RiskLevel::Low => AlertLevel::Green,
            RiskLevel::Medium => AlertLevel::Yellow,
            RiskLevel::High => AlertLevel::Orange,
            RiskLevel::Critical => AlertLevel::Red,
        }
    }

    /// Lowercase severity used on stored disaster records
    pub fn severity(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Green,
    Yellow,
    Orange,
    Red,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlertLevel::Green => "GREEN",
            AlertLevel::Yellow => "YELLOW",
            AlertLevel::Orange => "ORANGE",
            AlertLevel::Red => "RED",
        };
        f.write_str(name)
    }
}

/// The five normalized inputs to the base probability
///
/// Values are not clamped: an extreme population density can push
/// `demographic` well above 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFactors {
    pub geographic: f64,
    pub demographic: f64,
    pub infrastructure: f64,
    pub economic: f64,
    pub historical: f64,
}

impl AnalysisFactors {
    pub fn values(&self) -> [f64; 5] {
        [
            self.geographic,
            self.demographic,
            self.infrastructure,
            self.economic,
            self.historical,
        ]
    }

    /// Arithmetic mean of the five factors
    pub fn mean(&self) -> f64 {
        self.values().iter().sum::<f64>() / 5.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendedAction {
    ImmediateEvacuation,
    PrepareResources,
    Monitor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub action: RecommendedAction,
    pub description: String,
}

impl Recommendation {
    pub fn for_action(action: RecommendedAction) -> Self {
        let (priority, description) = match action {
            RecommendedAction::ImmediateEvacuation => (
                Priority::High,
                "Immediate evacuation of high-risk areas recommended",
            ),
            RecommendedAction::PrepareResources => (
                Priority::Medium,
                "Pre-position emergency resources and personnel",
            ),
            RecommendedAction::Monitor => (
                Priority::Low,
                "Continue monitoring conditions and maintain preparedness",
            ),
        };

        Recommendation {
            priority,
            action,
            description: description.to_string(),
        }
    }
}

/// Result of scoring a single request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Final likelihood, capped at 0.95
    pub probability: f64,
    /// Drawn independently of `probability`, in [0.7, 1.0)
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub alert_level: AlertLevel,
    /// Seasonal multiplier applied to the base probability
    pub hazard_multiplier: f64,
    pub analysis_factors: AnalysisFactors,
    /// Highest priority first, always ending with `MONITOR`
    pub recommendations: Vec<Recommendation>,
    pub estimated_affected_population: u64,
    /// Estimated loss in USD
    pub economic_impact: f64,
}

impl RiskAssessment {
    pub fn has_action(&self, action: RecommendedAction) -> bool {
        self.recommendations.iter().any(|r| r.action == action)
    }
}
