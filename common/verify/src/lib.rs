use std::fmt::{Display, Formatter};

use cases_lib::RuleSet;

pub mod rules;

pub trait Verify<R> {
    fn verify(&self, symbols: &[String]) -> R;
}

pub trait VerifyResult {
    fn is_good(&self) -> bool;
}

/// What a failed pattern was expected to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    NotToAppear,
    AtMost(usize),
    AtLeast(usize),
    Exactly(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFailure {
    pub pattern: String,
    pub expectation: Expectation,
    pub matched: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulesVerifyResult {
    pub failures: Vec<PatternFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub passed: bool,
    pub message: String,
}

/// Checks the case rules, then the common rules if all case rules passed.
pub fn evaluate(
    symbols: &[String],
    common_rules: &RuleSet,
    case_rules: &RuleSet,
    verbose: bool,
) -> Verdict {
    let mut result: RulesVerifyResult = case_rules.verify(symbols);
    if result.is_good() {
        result = common_rules.verify(symbols);
    }
    return Verdict {
        passed: result.is_good(),
        message: result.message(verbose),
    };
}

impl Display for Expectation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expectation::NotToAppear => f.write_str("not to appear"),
            Expectation::AtMost(n) => f.write_fmt(format_args!("to appear at most {n} times")),
            Expectation::AtLeast(n) => f.write_fmt(format_args!("to appear at least {n} times")),
            Expectation::Exactly(n) => f.write_fmt(format_args!("to appear exactly {n} times")),
        }
    }
}
