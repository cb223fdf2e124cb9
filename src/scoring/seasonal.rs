//! Month-dependent hazard multipliers

use crate::models::HazardType;

/// Inclusive month window, 1 = January
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub first: u32,
    pub last: u32,
}

impl MonthWindow {
    pub const fn new(first: u32, last: u32) -> Self {
        MonthWindow { first, last }
    }

    pub fn contains(&self, month: u32) -> bool {
        (self.first..=self.last).contains(&month)
    }
}

/// One hazard's seasonal rule: `high` inside any window, `low` outside
#[derive(Debug, Clone, Copy)]
pub struct SeasonalRule {
    pub hazard: HazardType,
    pub windows: &'static [MonthWindow],
    pub high: f64,
    pub low: f64,
}

impl SeasonalRule {
    pub fn multiplier(&self, month: u32) -> f64 {
        if self.windows.iter().any(|w| w.contains(month)) {
            self.high
        } else {
            self.low
        }
    }
}

/// Multiplier for hazards without a rule
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

pub static SEASONAL_RULES: &[SeasonalRule] = &[
    // Monsoon
    SeasonalRule {
        hazard: HazardType::Flood,
        windows: &[MonthWindow::new(6, 9)],
        high: 1.5,
        low: 0.8,
    },
    SeasonalRule {
        hazard: HazardType::Cyclone,
        windows: &[MonthWindow::new(4, 6), MonthWindow::new(10, 12)],
        high: 1.4,
        low: 0.7,
    },
    SeasonalRule {
        hazard: HazardType::Earthquake,
        windows: &[MonthWindow::new(1, 12)],
        high: 1.0,
        low: 1.0,
    },
    // Pre-monsoon summer
    SeasonalRule {
        hazard: HazardType::Drought,
        windows: &[MonthWindow::new(3, 5)],
        high: 1.6,
        low: 0.6,
    },
];

pub fn rule_for(hazard: HazardType) -> Option<&'static SeasonalRule> {
    SEASONAL_RULES.iter().find(|rule| rule.hazard == hazard)
}

/// Seasonal multiplier for `hazard` in `month` (1-12)
pub fn hazard_multiplier(hazard: HazardType, month: u32) -> f64 {
    rule_for(hazard)
        .map(|rule| rule.multiplier(month))
        .unwrap_or(NEUTRAL_MULTIPLIER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flood_window() {
        assert_eq!(hazard_multiplier(HazardType::Flood, 5), 0.8);
        for month in 6..=9 {
            assert_eq!(hazard_multiplier(HazardType::Flood, month), 1.5);
        }
        assert_eq!(hazard_multiplier(HazardType::Flood, 10), 0.8);
    }

    #[test]
    fn test_cyclone_has_two_windows() {
        let high: Vec<u32> = (1..=12)
            .filter(|m| hazard_multiplier(HazardType::Cyclone, *m) == 1.4)
            .collect();
        assert_eq!(high, vec![4, 5, 6, 10, 11, 12]);
        assert_eq!(hazard_multiplier(HazardType::Cyclone, 8), 0.7);
    }

    #[test]
    fn test_drought_window() {
        assert_eq!(hazard_multiplier(HazardType::Drought, 3), 1.6);
        assert_eq!(hazard_multiplier(HazardType::Drought, 5), 1.6);
        assert_eq!(hazard_multiplier(HazardType::Drought, 6), 0.6);
    }

    #[test]
    fn test_neutral_hazards() {
        for month in 1..=12 {
            assert_eq!(hazard_multiplier(HazardType::Earthquake, month), 1.0);
            assert_eq!(hazard_multiplier(HazardType::Wildfire, month), 1.0);
            assert_eq!(hazard_multiplier(HazardType::Other, month), 1.0);
        }
    }
}
