use indexmap::IndexMap;
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use tracing::warn;

use crate::{CountBounds, Error, PatternRule, Rule, RuleSet};

const UNEXPECTED: &str = "unexpected";

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        return match Value::deserialize(deserializer)? {
            Value::String(s) if s == UNEXPECTED => Ok(Rule::Unexpected),
            Value::String(s) => Err(D::Error::custom(format!(
                "unexpected condition string '{s}'"
            ))),
            value @ Value::Mapping(_) => CountBounds::deserialize(value)
                .map(Rule::Count)
                .map_err(D::Error::custom),
            _ => Ok(Rule::Unchecked),
        };
    }
}

impl RuleSet {
    /// Compiles every pattern of `rules`, keeping declaration order.
    pub fn compile(case: &str, rules: IndexMap<String, Rule>) -> Result<Self, Error> {
        let rules = rules
            .into_iter()
            .map(|(pattern, rule)| -> Result<PatternRule, Error> {
                if rule == Rule::Unchecked {
                    warn!(case, %pattern, "rule is neither a string nor a mapping, never checked");
                }
                let pattern = Regex::new(&pattern).map_err(|source| Error::Pattern {
                    case: String::from(case),
                    pattern: pattern.clone(),
                    source,
                })?;
                return Ok(PatternRule { pattern, rule });
            })
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Self { rules });
    }

    pub fn len(&self) -> usize {
        return self.rules.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.rules.is_empty();
    }
}
