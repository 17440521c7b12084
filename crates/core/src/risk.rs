//! Risk stratification.
//!
//! Maps a heart failure probability in `[0, 1]` to one of three ordinal risk
//! bands. Band lower bounds are inclusive.

use std::fmt;

/// Ordinal risk band derived from the predicted probability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    /// probability < 0.20
    Low,
    /// 0.20 <= probability < 0.60
    Moderate,
    /// probability >= 0.60
    High,
}

impl RiskLevel {
    /// Stratifies a probability into its risk band. Pure function.
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.2 {
            RiskLevel::Low
        } else if probability < 0.6 {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    /// The caller-facing band label.
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stratification_boundaries() {
        assert_eq!(RiskLevel::from_probability(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.199999), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.2), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_probability(0.599999), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_probability(0.6), RiskLevel::High);
        assert_eq!(RiskLevel::from_probability(1.0), RiskLevel::High);
    }

    #[test]
    fn test_stratification_is_monotonic_in_probability() {
        let probabilities = [0.0, 0.1, 0.19, 0.2, 0.35, 0.59, 0.6, 0.85, 1.0];
        let bands: Vec<RiskLevel> = probabilities
            .iter()
            .map(|p| RiskLevel::from_probability(*p))
            .collect();
        assert!(bands.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_band_labels() {
        assert_eq!(RiskLevel::Low.to_string(), "Low Risk");
        assert_eq!(RiskLevel::Moderate.to_string(), "Moderate Risk");
        assert_eq!(RiskLevel::High.to_string(), "High Risk");
    }
}
