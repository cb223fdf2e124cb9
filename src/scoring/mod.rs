//! Disaster risk scoring
//!
//! Turns a `RiskRequest` into a `RiskAssessment`: five normalized factors
//! are averaged, scaled by a seasonal hazard multiplier, capped, and then
//! banded into risk and alert levels with a recommendation list.
//!
//! Scoring is a pure computation. Randomness comes from an injected
//! [`Jitter`] and the calendar month is an explicit argument, so results
//! are reproducible under a fixed seed.

pub mod jitter;
pub mod scorer;
pub mod seasonal;

pub use jitter::{FixedJitter, Jitter, RngJitter};
pub use scorer::{
    current_month, recommendations_for, RequestDefaults, ResolvedInputs, RiskScorer,
    PROBABILITY_CEILING,
};
pub use seasonal::{hazard_multiplier, MonthWindow, SeasonalRule, SEASONAL_RULES};
