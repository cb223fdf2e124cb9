use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use crate::models::{
    AnalysisFactors, Recommendation, RecommendedAction, RiskAssessment, RiskLevel, RiskRequest,
};
use crate::scoring::jitter::Jitter;
use crate::scoring::seasonal::hazard_multiplier;

/// Hard ceiling on the final probability
pub const PROBABILITY_CEILING: f64 = 0.95;
/// Above this, immediate evacuation is recommended
pub const EVACUATION_THRESHOLD: f64 = 0.7;
/// Above this, resources should be pre-positioned
pub const PREPARE_THRESHOLD: f64 = 0.5;
/// Loss per affected person at probability 1.0, in USD
const IMPACT_PER_PERSON_USD: f64 = 100_000.0;

/// Values used in place of missing request fields
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDefaults {
    pub population_density: f64,
    pub infrastructure_age: f64,
    pub economic_index: f64,
    pub historical_frequency: f64,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        RequestDefaults {
            population_density: 1000.0,
            infrastructure_age: 20.0,
            economic_index: 50.0,
            historical_frequency: 1.0,
        }
    }
}

/// Request with every numeric field filled in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedInputs {
    pub population_density: f64,
    pub infrastructure_age: f64,
    pub economic_index: f64,
    pub historical_frequency: f64,
}

impl RequestDefaults {
    /// Fill absent fields.
    ///
    /// An explicit `0` (or NaN) is overridden by the default exactly like a
    /// missing value: `economicIndex: 0` scores as 50, not as the poorest
    /// possible area. Dashboard forms submit blank fields as zero.
    pub fn resolve(&self, request: &RiskRequest) -> ResolvedInputs {
        fn pick(value: Option<f64>, default: f64) -> f64 {
            match value {
                Some(v) if v != 0.0 && !v.is_nan() => v,
                _ => default,
            }
        }

        ResolvedInputs {
            population_density: pick(request.population_density, self.population_density),
            infrastructure_age: pick(request.infrastructure_age, self.infrastructure_age),
            economic_index: pick(request.economic_index, self.economic_index),
            historical_frequency: pick(request.historical_frequency, self.historical_frequency),
        }
    }
}

impl ResolvedInputs {
    /// Normalize into the five analysis factors. No clamping is applied.
    pub fn factors(&self, geographic: f64) -> AnalysisFactors {
        AnalysisFactors {
            geographic,
            demographic: self.population_density / 10_000.0,
            infrastructure: self.infrastructure_age / 100.0,
            economic: (100.0 - self.economic_index) / 100.0,
            historical: self.historical_frequency / 10.0,
        }
    }
}

/// Stateless disaster risk scorer
///
/// Holds only the defaults for missing request fields; every call is
/// independent and the scorer can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    defaults: RequestDefaults,
}

impl RiskScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: RequestDefaults) -> Self {
        RiskScorer { defaults }
    }

    /// Score `request` for the given calendar `month` (1-12)
    ///
    /// The geographic factor is drawn before the confidence value, so a
    /// seeded jitter source reproduces the assessment exactly.
    pub fn assess<J: Jitter>(
        &self,
        request: &RiskRequest,
        month: u32,
        mut jitter: J,
    ) -> RiskAssessment {
        let inputs = self.defaults.resolve(request);
        let analysis_factors = inputs.factors(jitter.geographic_factor());

        let base_probability = analysis_factors.mean();
        let multiplier = hazard_multiplier(request.hazard_type, month);
        let probability = (base_probability * multiplier).min(PROBABILITY_CEILING);

        let confidence = jitter.confidence();
        let risk_level = RiskLevel::from_probability(probability);

        let estimated_affected_population =
            (inputs.population_density * probability * 10.0).floor().max(0.0) as u64;
        let economic_impact =
            estimated_affected_population as f64 * probability * IMPACT_PER_PERSON_USD;

        log::debug!(
            "Scored {} for month {}: base {:.4} x {:.2} -> {:.4} ({})",
            request.hazard_type,
            month,
            base_probability,
            multiplier,
            probability,
            risk_level
        );

        RiskAssessment {
            probability,
            confidence,
            risk_level,
            alert_level: risk_level.alert_level(),
            hazard_multiplier: multiplier,
            analysis_factors,
            recommendations: recommendations_for(probability),
            estimated_affected_population,
            economic_impact,
        }
    }

    /// Score `request` using the current local calendar month
    pub fn assess_now<J: Jitter>(&self, request: &RiskRequest, jitter: J) -> RiskAssessment {
        self.assess(request, current_month(), jitter)
    }
}

pub fn current_month() -> u32 {
    Local::now().month()
}

/// Recommendations for a final probability, highest priority first
pub fn recommendations_for(probability: f64) -> Vec<Recommendation> {
    let mut recommendations = Vec::with_capacity(3);

    if probability > EVACUATION_THRESHOLD {
        recommendations.push(Recommendation::for_action(
            RecommendedAction::ImmediateEvacuation,
        ));
    }
    if probability > PREPARE_THRESHOLD {
        recommendations.push(Recommendation::for_action(
            RecommendedAction::PrepareResources,
        ));
    }
    recommendations.push(Recommendation::for_action(RecommendedAction::Monitor));

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertLevel, HazardType, Priority};
    use crate::scoring::jitter::{FixedJitter, RngJitter};

    const EPSILON: f64 = 1e-9;

    fn baseline_flood() -> RiskRequest {
        RiskRequest::new(HazardType::Flood)
            .with_population_density(1000.0)
            .with_infrastructure_age(20.0)
            .with_economic_index(50.0)
            .with_historical_frequency(1.0)
    }

    #[test]
    fn test_flood_in_monsoon() {
        let scorer = RiskScorer::new();
        let result = scorer.assess(&baseline_flood(), 7, FixedJitter::new(0.5, 0.85));

        assert!((result.analysis_factors.mean() - 0.28).abs() < EPSILON);
        assert_eq!(result.hazard_multiplier, 1.5);
        assert!((result.probability - 0.42).abs() < EPSILON, "got {}", result.probability);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.alert_level, AlertLevel::Yellow);
        assert_eq!(result.confidence, 0.85);
    }

    #[test]
    fn test_flood_out_of_season() {
        let scorer = RiskScorer::new();
        let result = scorer.assess(&baseline_flood(), 1, FixedJitter::new(0.5, 0.85));

        assert_eq!(result.hazard_multiplier, 0.8);
        assert!((result.probability - 0.224).abs() < EPSILON, "got {}", result.probability);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.alert_level, AlertLevel::Green);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let scorer = RiskScorer::new();
        let sparse = RiskRequest::new(HazardType::Flood);

        let a = scorer.assess(&sparse, 7, FixedJitter::new(0.5, 0.85));
        let b = scorer.assess(&baseline_flood(), 7, FixedJitter::new(0.5, 0.85));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_is_treated_as_missing() {
        let defaults = RequestDefaults::default();
        let request = RiskRequest::new(HazardType::Other).with_economic_index(0.0);
        assert_eq!(defaults.resolve(&request).economic_index, 50.0);
    }

    #[test]
    fn test_explicit_zero_is_overridden() {
        let scorer = RiskScorer::new();
        let zeroed = RiskRequest::new(HazardType::Flood)
            .with_population_density(0.0)
            .with_infrastructure_age(0.0)
            .with_economic_index(0.0)
            .with_historical_frequency(0.0);

        let a = scorer.assess(&zeroed, 7, FixedJitter::new(0.5, 0.85));
        let b = scorer.assess(&baseline_flood(), 7, FixedJitter::new(0.5, 0.85));
        assert_eq!(a, b);
        assert!((a.analysis_factors.economic - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_assess_now_uses_current_month() {
        let scorer = RiskScorer::new();
        let request = baseline_flood();

        let now = scorer.assess_now(&request, FixedJitter::new(0.5, 0.85));
        let explicit = scorer.assess(&request, current_month(), FixedJitter::new(0.5, 0.85));
        assert_eq!(now, explicit);
    }

    #[test]
    fn test_factors_are_not_clamped() {
        let scorer = RiskScorer::new();
        let request = RiskRequest::new(HazardType::Earthquake).with_population_density(50_000.0);
        let result = scorer.assess(&request, 3, FixedJitter::new(0.5, 0.9));

        assert!((result.analysis_factors.demographic - 5.0).abs() < EPSILON);
        assert_eq!(result.probability, PROBABILITY_CEILING);
        assert_eq!(result.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_probability_ceiling() {
        let scorer = RiskScorer::new();
        let request = RiskRequest::new(HazardType::Drought)
            .with_population_density(9000.0)
            .with_infrastructure_age(90.0)
            .with_economic_index(5.0)
            .with_historical_frequency(9.0);
        let result = scorer.assess(&request, 4, FixedJitter::new(0.79, 0.7));
        assert_eq!(result.probability, 0.95);
    }

    #[test]
    fn test_recommendations_ordering() {
        let high = recommendations_for(0.75);
        let actions: Vec<_> = high.iter().map(|r| r.action).collect();
        assert_eq!(
            actions,
            vec![
                RecommendedAction::ImmediateEvacuation,
                RecommendedAction::PrepareResources,
                RecommendedAction::Monitor
            ]
        );
        assert_eq!(high[0].priority, Priority::High);

        let mid = recommendations_for(0.6);
        assert_eq!(mid.len(), 2);
        assert_eq!(mid[0].action, RecommendedAction::PrepareResources);

        // Thresholds are strict
        assert_eq!(recommendations_for(0.7).len(), 2);
        assert_eq!(recommendations_for(0.5).len(), 1);
        assert_eq!(recommendations_for(0.1)[0].action, RecommendedAction::Monitor);
    }

    #[test]
    fn test_impact_estimates() {
        let scorer = RiskScorer::new();
        let result = scorer.assess(&baseline_flood(), 7, FixedJitter::new(0.5, 0.85));

        // floor(1000 * 0.42 * 10)
        let expected_population = (1000.0 * result.probability * 10.0).floor() as u64;
        assert_eq!(result.estimated_affected_population, expected_population);
        assert!(
            (result.economic_impact
                - expected_population as f64 * result.probability * 100_000.0)
                .abs()
                < 1e-6
        );
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let scorer = RiskScorer::new();
        let request = baseline_flood();

        let a = scorer.assess(&request, 8, RngJitter::seeded(2024));
        let b = scorer.assess(&request, 8, RngJitter::seeded(2024));
        assert_eq!(a.probability.to_bits(), b.probability.to_bits());
        assert_eq!(a.confidence.to_bits(), b.confidence.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_shared_jitter_by_reference() {
        let scorer = RiskScorer::new();
        let mut jitter = RngJitter::seeded(5);
        let first = scorer.assess(&baseline_flood(), 2, &mut jitter);
        let second = scorer.assess(&baseline_flood(), 2, &mut jitter);
        // The generator advanced between calls
        assert_ne!(first.confidence.to_bits(), second.confidence.to_bits());
    }
}
