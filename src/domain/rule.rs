//! Sale rule definitions.
//!
//! The watch list carries a loose descriptor (`{"type": ..., "value": ...}`);
//! it is resolved into the closed [`Rule`] enum before evaluation so that an
//! unknown or malformed rule is rejected up front instead of being treated
//! as some other rule.

use crate::domain::error::PricewatchError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ANY_SALE: &str = "anySale";
pub const BELOW_PRICE: &str = "belowPrice";

/// Rule descriptor as written in the watch list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    #[serde(rename = "type")]
    pub rule_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{} ({})", self.rule_type, v),
            None => write!(f, "{}", self.rule_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// On sale whenever the current price is strictly below the list price.
    AnySale,
    /// Threshold rule. Declared in the watch format but has no evaluator yet.
    BelowPrice(f64),
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::AnySale => ANY_SALE,
            Rule::BelowPrice(_) => BELOW_PRICE,
        }
    }

    /// Resolves an optional descriptor; a watch without one uses `anySale`.
    pub fn resolve(spec: Option<&RuleSpec>) -> Result<Rule, PricewatchError> {
        let Some(spec) = spec else {
            return Ok(Rule::AnySale);
        };
        match spec.rule_type.trim() {
            ANY_SALE => Ok(Rule::AnySale),
            BELOW_PRICE => match spec.value {
                Some(v) if v.is_finite() => Ok(Rule::BelowPrice(v)),
                Some(_) => Err(PricewatchError::RuleInvalid {
                    rule_type: BELOW_PRICE.into(),
                    reason: "value must be a finite number".into(),
                }),
                None => Err(PricewatchError::RuleInvalid {
                    rule_type: BELOW_PRICE.into(),
                    reason: "value is required".into(),
                }),
            },
            other => Err(PricewatchError::UnknownRule {
                rule_type: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::AnySale => write!(f, "{}", ANY_SALE),
            Rule::BelowPrice(v) => write!(f, "{} ({})", BELOW_PRICE, v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(rule_type: &str, value: Option<f64>) -> RuleSpec {
        RuleSpec {
            rule_type: rule_type.into(),
            value,
        }
    }

    #[test]
    fn missing_descriptor_defaults_to_any_sale() {
        assert_eq!(Rule::resolve(None).unwrap(), Rule::AnySale);
    }

    #[test]
    fn resolves_any_sale() {
        assert_eq!(
            Rule::resolve(Some(&spec("anySale", None))).unwrap(),
            Rule::AnySale
        );
    }

    #[test]
    fn resolves_below_price_with_value() {
        assert_eq!(
            Rule::resolve(Some(&spec("belowPrice", Some(199.99)))).unwrap(),
            Rule::BelowPrice(199.99)
        );
    }

    #[test]
    fn below_price_without_value_is_invalid() {
        let err = Rule::resolve(Some(&spec("belowPrice", None))).unwrap_err();
        assert!(matches!(err, PricewatchError::RuleInvalid { .. }));
    }

    #[test]
    fn below_price_nan_is_invalid() {
        let err = Rule::resolve(Some(&spec("belowPrice", Some(f64::NAN)))).unwrap_err();
        assert!(matches!(err, PricewatchError::RuleInvalid { .. }));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = Rule::resolve(Some(&spec("percentOff", Some(20.0)))).unwrap_err();
        assert!(
            matches!(err, PricewatchError::UnknownRule { ref rule_type } if rule_type == "percentOff")
        );
    }

    #[test]
    fn spec_deserializes_from_watch_json() {
        let s: RuleSpec = serde_json::from_str(r#"{"type":"belowPrice","value":150}"#).unwrap();
        assert_eq!(s, spec("belowPrice", Some(150.0)));

        let s: RuleSpec = serde_json::from_str(r#"{"type":"anySale"}"#).unwrap();
        assert_eq!(s.value, None);
    }

    #[test]
    fn display_formats() {
        assert_eq!(spec("anySale", None).to_string(), "anySale");
        assert_eq!(spec("belowPrice", Some(150.0)).to_string(), "belowPrice (150)");
        assert_eq!(Rule::AnySale.to_string(), "anySale");
        assert_eq!(Rule::BelowPrice(9.5).to_string(), "belowPrice (9.5)");
    }
}
