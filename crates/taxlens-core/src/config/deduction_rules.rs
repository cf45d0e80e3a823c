use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// A single deductible-category rule.
///
/// `category` must exactly match the `Transaction.category` values used by
/// the ingestion tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionRule {
    pub category: String,
    /// Fraction of spend that is deductible, in (0, 1].
    pub deduction_rate: f64,
    /// Minimum qualifying annual spend.
    pub min_amount: f64,
    /// Annual deduction cap; `None` means unbounded.
    pub max_annual: Option<f64>,
    pub description: String,
}

/// Validated, read-only deduction rule table. Constructed once at process
/// start and passed by reference into the miners and the tip generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionRules {
    rules: Vec<DeductionRule>,
}

impl DeductionRules {
    /// Validate and seal a rule table. Any violation is fatal and is
    /// detected here, before any analysis run.
    pub fn new(rules: Vec<DeductionRule>) -> Result<Self, ConfigError> {
        if rules.is_empty() {
            return Err(ConfigError::EmptyRules);
        }
        for (i, rule) in rules.iter().enumerate() {
            if !(rule.deduction_rate > 0.0 && rule.deduction_rate <= 1.0) {
                return Err(ConfigError::InvalidDeductionRate {
                    category: rule.category.clone(),
                    rate: rule.deduction_rate,
                });
            }
            if rules[..i].iter().any(|r| r.category == rule.category) {
                return Err(ConfigError::DuplicateCategory {
                    category: rule.category.clone(),
                });
            }
            if let Some(cap) = rule.max_annual {
                if cap < rule.min_amount {
                    return Err(ConfigError::CapBelowMinimum {
                        category: rule.category.clone(),
                        cap,
                        min: rule.min_amount,
                    });
                }
            }
        }
        Ok(Self { rules })
    }

    /// The standard five-category table.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::new(vec![
            DeductionRule {
                category: "Work Equipment".to_string(),
                deduction_rate: 0.5,
                min_amount: 50.0,
                max_annual: Some(800.0),
                description: "Work-related equipment and tools".to_string(),
            },
            DeductionRule {
                category: "Professional Development".to_string(),
                deduction_rate: 1.0,
                min_amount: 100.0,
                max_annual: Some(4000.0),
                description: "Courses, certifications, and training".to_string(),
            },
            DeductionRule {
                category: "Medical".to_string(),
                deduction_rate: 0.8,
                min_amount: 100.0,
                max_annual: None,
                description: "Medical expenses above insurance coverage".to_string(),
            },
            DeductionRule {
                category: "Charitable Donations".to_string(),
                deduction_rate: 1.0,
                min_amount: 25.0,
                max_annual: None,
                description: "Donations to registered charities".to_string(),
            },
            DeductionRule {
                category: "Transportation".to_string(),
                deduction_rate: 0.6,
                min_amount: 200.0,
                max_annual: Some(2000.0),
                description: "Business-related transportation costs".to_string(),
            },
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeductionRule> {
        self.rules.iter()
    }

    pub fn get(&self, category: &str) -> Option<&DeductionRule> {
        self.rules.iter().find(|r| r.category == category)
    }

    pub fn is_deductible(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.category.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_validates() {
        let rules = DeductionRules::standard().unwrap();
        assert_eq!(rules.iter().count(), 5);
        assert!(rules.is_deductible("Medical"));
        assert!(!rules.is_deductible("Groceries"));
    }

    #[test]
    fn zero_rate_rejected() {
        let err = DeductionRules::new(vec![DeductionRule {
            category: "Medical".to_string(),
            deduction_rate: 0.0,
            min_amount: 0.0,
            max_annual: None,
            description: String::new(),
        }])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDeductionRate { .. }));
    }

    #[test]
    fn duplicate_category_rejected() {
        let rule = DeductionRule {
            category: "Medical".to_string(),
            deduction_rate: 0.8,
            min_amount: 0.0,
            max_annual: None,
            description: String::new(),
        };
        let err = DeductionRules::new(vec![rule.clone(), rule]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateCategory { .. }));
    }
}
