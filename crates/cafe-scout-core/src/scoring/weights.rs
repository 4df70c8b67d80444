use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ScoutError;
use crate::scoring::Factor;
use crate::ScoutResult;

/// Version tag of the published weighting.
pub const PUBLISHED_VERSION: &str = "opportunity-v1";

/// Scale applied to the weighted percentile sum.
pub const INDEX_SCALE: Decimal = dec!(100);

const SUM_TOLERANCE: Decimal = dec!(0.000000001);

/// Weights of the opportunity index.
///
/// `density_competition` weighs the mean of the office-density and
/// low-competition percentiles. Any set of weights other than the published
/// one must carry its own `version`, so a re-weighted ranking can never be
/// mistaken for the published one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub version: String,
    pub density_competition: Decimal,
    pub weekday_share: Decimal,
    pub early_hours_share: Decimal,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            version: PUBLISHED_VERSION.into(),
            density_competition: dec!(0.4),
            weekday_share: dec!(0.3),
            early_hours_share: dec!(0.3),
        }
    }
}

impl ScoringWeights {
    pub fn validate(&self) -> ScoutResult<()> {
        if self.version.trim().is_empty() {
            return Err(ScoutError::InvalidInput {
                field: "version".into(),
                reason: "weights must carry a version tag".into(),
            });
        }

        for (field, w) in [
            ("density_competition", self.density_competition),
            ("weekday_share", self.weekday_share),
            ("early_hours_share", self.early_hours_share),
        ] {
            if w < Decimal::ZERO || w > Decimal::ONE {
                return Err(ScoutError::InvalidInput {
                    field: field.into(),
                    reason: format!("weight must be within [0, 1], got {w}"),
                });
            }
        }

        let sum = self.density_competition + self.weekday_share + self.early_hours_share;
        if (sum - Decimal::ONE).abs() > SUM_TOLERANCE {
            return Err(ScoutError::InvalidInput {
                field: "weights".into(),
                reason: format!("weights must sum to 1, got {sum}"),
            });
        }

        let published = ScoringWeights::default();
        if self.version == published.version && *self != published {
            return Err(ScoutError::InvalidInput {
                field: "version".into(),
                reason: format!(
                    "weights differ from the published '{PUBLISHED_VERSION}' formula; give them a new version"
                ),
            });
        }
        Ok(())
    }

    pub fn is_published(&self) -> bool {
        *self == ScoringWeights::default()
    }

    /// Weight a single factor percentile carries in the final sum.
    pub fn effective_weight(&self, factor: Factor) -> Decimal {
        match factor {
            Factor::EmployeeDensity | Factor::LowCompetition => self.density_competition / dec!(2),
            Factor::WeekdayShare => self.weekday_share,
            Factor::EarlyHoursShare => self.early_hours_share,
        }
    }

    /// Human-readable formula, tagged with the version.
    pub fn formula(&self) -> String {
        format!(
            "[{}] index = {} * ({} * avg(office_density, low_competition) + {} * weekday_share + {} * early_hours_share)",
            self.version,
            INDEX_SCALE,
            self.density_competition,
            self.weekday_share,
            self.early_hours_share
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_published_weights_are_valid() {
        let w = ScoringWeights::default();
        assert!(w.validate().is_ok());
        assert!(w.is_published());
    }

    #[test]
    fn test_effective_weights_sum_to_one() {
        let w = ScoringWeights::default();
        let total: Decimal = Factor::ALL.iter().map(|&f| w.effective_weight(f)).sum();
        assert_eq!(total, Decimal::ONE);
        assert_eq!(w.effective_weight(Factor::LowCompetition), dec!(0.2));
    }

    #[test]
    fn test_reject_sum_not_one() {
        let w = ScoringWeights {
            version: "custom".into(),
            density_competition: dec!(0.5),
            weekday_share: dec!(0.3),
            early_hours_share: dec!(0.3),
        };
        assert!(w.validate().is_err());
    }

    #[test]
    fn test_reject_negative_weight() {
        let w = ScoringWeights {
            version: "custom".into(),
            density_competition: dec!(1.2),
            weekday_share: dec!(-0.2),
            early_hours_share: dec!(0),
        };
        assert!(w.validate().is_err());
    }

    #[test]
    fn test_reweighting_requires_new_version() {
        let mut w = ScoringWeights {
            density_competition: dec!(0.5),
            weekday_share: dec!(0.25),
            early_hours_share: dec!(0.25),
            ..ScoringWeights::default()
        };
        let err = w.validate().unwrap_err();
        assert!(err.to_string().contains("new version"));

        w.version = "opportunity-v2-density".into();
        assert!(w.validate().is_ok());
        assert!(!w.is_published());
    }

    #[test]
    fn test_reject_blank_version() {
        let w = ScoringWeights {
            version: " ".into(),
            ..ScoringWeights::default()
        };
        assert!(w.validate().is_err());
    }

    #[test]
    fn test_formula_mentions_version() {
        assert!(ScoringWeights::default().formula().starts_with("[opportunity-v1]"));
    }
}
