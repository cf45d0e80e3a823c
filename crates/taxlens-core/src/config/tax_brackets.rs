use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// One marginal-rate bracket over the half-open income range
/// `[min_income, max_income)`; `max_income = None` means unbounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: f64,
    pub max_income: Option<f64>,
    pub marginal_rate: f64,
}

/// Validated, ordered, gap-free bracket table covering `[0, inf)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBrackets {
    brackets: Vec<TaxBracket>,
}

impl TaxBrackets {
    /// Validate and seal a bracket table. Gaps, overlaps, a bounded last
    /// bracket, or an out-of-range rate are fatal.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, ConfigError> {
        let Some(first) = brackets.first() else {
            return Err(ConfigError::EmptyBrackets);
        };
        if first.min_income != 0.0 {
            return Err(ConfigError::UnanchoredBrackets {
                min: first.min_income,
            });
        }
        for (i, bracket) in brackets.iter().enumerate() {
            if !(0.0..=1.0).contains(&bracket.marginal_rate) {
                return Err(ConfigError::InvalidMarginalRate {
                    rate: bracket.marginal_rate,
                });
            }
            let last = i == brackets.len() - 1;
            match bracket.max_income {
                None if !last => return Err(ConfigError::UnboundedInnerBracket),
                Some(_) if last => return Err(ConfigError::BoundedLastBracket),
                Some(max) => {
                    let next = &brackets[i + 1];
                    if next.min_income != max {
                        return Err(ConfigError::BracketGap {
                            expected: max,
                            found: next.min_income,
                        });
                    }
                }
                None => {}
            }
        }
        Ok(Self { brackets })
    }

    /// Simplified progressive bracket table used by the standard config.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::new(vec![
            TaxBracket {
                min_income: 0.0,
                max_income: Some(11000.0),
                marginal_rate: 0.0,
            },
            TaxBracket {
                min_income: 11000.0,
                max_income: Some(33000.0),
                marginal_rate: 0.20,
            },
            TaxBracket {
                min_income: 33000.0,
                max_income: Some(55000.0),
                marginal_rate: 0.37,
            },
            TaxBracket {
                min_income: 55000.0,
                max_income: None,
                marginal_rate: 0.45,
            },
        ])
    }

    /// Marginal rate applicable to the last unit of `income`. Negative
    /// income is treated as zero.
    pub fn marginal_rate(&self, income: f64) -> f64 {
        let income = income.max(0.0);
        for bracket in &self.brackets {
            match bracket.max_income {
                Some(max) if income < max => return bracket.marginal_rate,
                None => return bracket.marginal_rate,
                Some(_) => continue,
            }
        }
        // Unreachable for a validated table; the last bracket is unbounded.
        0.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaxBracket> {
        self.brackets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_rates() {
        let brackets = TaxBrackets::standard().unwrap();
        assert_eq!(brackets.marginal_rate(0.0), 0.0);
        assert_eq!(brackets.marginal_rate(10999.0), 0.0);
        assert_eq!(brackets.marginal_rate(11000.0), 0.20);
        assert_eq!(brackets.marginal_rate(50000.0), 0.37);
        assert_eq!(brackets.marginal_rate(55000.0), 0.45);
        assert_eq!(brackets.marginal_rate(1_000_000.0), 0.45);
        assert_eq!(brackets.marginal_rate(-5.0), 0.0);
    }

    #[test]
    fn gap_rejected() {
        let err = TaxBrackets::new(vec![
            TaxBracket {
                min_income: 0.0,
                max_income: Some(10000.0),
                marginal_rate: 0.0,
            },
            TaxBracket {
                min_income: 12000.0,
                max_income: None,
                marginal_rate: 0.2,
            },
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::BracketGap { .. }));
    }

    #[test]
    fn bounded_last_bracket_rejected() {
        let err = TaxBrackets::new(vec![TaxBracket {
            min_income: 0.0,
            max_income: Some(10000.0),
            marginal_rate: 0.0,
        }])
        .unwrap_err();
        assert!(matches!(err, ConfigError::BoundedLastBracket));
    }
}
