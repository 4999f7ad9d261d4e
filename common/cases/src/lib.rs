use regex::Regex;
use serde::Deserialize;

pub mod cases;
mod error;
pub mod rule;

pub use error::Error;

/// Reserved key holding the rules shared by every test case.
pub const COMMON_KEY: &str = "common";

/// Expectation attached to a single pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// The pattern must not match any string.
    Unexpected,
    /// The number of matching strings must satisfy the bounds.
    Count(CountBounds),
    /// Value that is neither a string nor a mapping. Never checked.
    Unchecked,
}

/// Bounds are checked in field order and only the first violated one is reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountBounds {
    #[serde(default)]
    pub max_count: Option<usize>,
    #[serde(default)]
    pub min_count: Option<usize>,
    #[serde(default)]
    pub exact_count: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct PatternRule {
    pub pattern: Regex,
    pub rule: Rule,
}

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub rules: Vec<PatternRule>,
}

#[derive(Debug, Clone)]
pub struct TestCase {
    pub id: String,
    pub ignored: bool,
    pub patterns: RuleSet,
}

#[derive(Debug)]
pub struct TestCaseSet {
    pub common: RuleSet,
    pub cases: Vec<TestCase>,
}
