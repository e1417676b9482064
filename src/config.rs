use serde::{Deserialize, Serialize};

use crate::decimal::LEDGER_SCALE;
use crate::errors::{AccrualError, Result};

/// longest cycle whose length in months still fits a month count
pub const MAX_CYCLE_LENGTH_YEARS: u32 = u32::MAX / 12;

/// accrual configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccrualConfig {
    /// length of one compounding window in calendar years
    pub cycle_length_years: u32,
    /// fractional digits on reported amounts
    pub display_scale: u32,
}

impl Default for AccrualConfig {
    fn default() -> Self {
        Self::three_year_cycles()
    }
}

impl AccrualConfig {
    /// interest folds into principal every 3 years, amounts reported to 2 places
    pub fn three_year_cycles() -> Self {
        Self {
            cycle_length_years: 3,
            display_scale: 2,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cycle_length_years == 0 {
            return Err(AccrualError::InvalidConfiguration {
                message: "cycle length must be at least one year".to_string(),
            });
        }

        if self.cycle_length_years > MAX_CYCLE_LENGTH_YEARS {
            return Err(AccrualError::InvalidConfiguration {
                message: format!(
                    "cycle length {} years exceeds {}",
                    self.cycle_length_years, MAX_CYCLE_LENGTH_YEARS
                ),
            });
        }

        if self.display_scale > LEDGER_SCALE {
            return Err(AccrualError::InvalidConfiguration {
                message: format!(
                    "display scale {} exceeds ledger scale {}",
                    self.display_scale, LEDGER_SCALE
                ),
            });
        }

        Ok(())
    }

    /// parse and validate a json configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AccrualConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_three_year_cycles() {
        let config = AccrualConfig::default();
        assert_eq!(config.cycle_length_years, 3);
        assert_eq!(config.display_scale, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = AccrualConfig::from_json(r#"{ "cycle_length_years": 5 }"#).unwrap();
        assert_eq!(config.cycle_length_years, 5);
        assert_eq!(config.display_scale, 2);
    }

    #[test]
    fn test_json_round_trip() {
        let config = AccrualConfig {
            cycle_length_years: 2,
            display_scale: 4,
        };
        let json = config.to_json().unwrap();
        assert_eq!(AccrualConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_zero_cycle_length_is_rejected() {
        let result = AccrualConfig::from_json(r#"{ "cycle_length_years": 0 }"#);
        assert!(matches!(result, Err(AccrualError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_oversized_cycle_length_is_rejected() {
        let result = AccrualConfig::from_json(r#"{ "cycle_length_years": 400000000 }"#);
        assert!(matches!(result, Err(AccrualError::InvalidConfiguration { .. })));

        let at_limit = AccrualConfig {
            cycle_length_years: MAX_CYCLE_LENGTH_YEARS,
            display_scale: 2,
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_display_scale_above_ledger_is_rejected() {
        let config = AccrualConfig {
            cycle_length_years: 3,
            display_scale: 9,
        };
        assert!(matches!(config.validate(), Err(AccrualError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_malformed_json() {
        let result = AccrualConfig::from_json("{ not json");
        assert!(matches!(result, Err(AccrualError::Serialization { .. })));
    }
}
