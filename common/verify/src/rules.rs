use cases_lib::{CountBounds, PatternRule, Rule, RuleSet};
use tracing::trace;

use crate::{Expectation, PatternFailure, RulesVerifyResult, Verify, VerifyResult};

impl Verify<RulesVerifyResult> for RuleSet {
    fn verify(&self, symbols: &[String]) -> RulesVerifyResult {
        let mut result = RulesVerifyResult::default();
        for rule in &self.rules {
            if let Some(failure) = rule.check(symbols) {
                result.failures.push(failure);
            }
        }
        return result;
    }
}

trait CheckPattern {
    fn check(&self, symbols: &[String]) -> Option<PatternFailure>;
}

impl CheckPattern for PatternRule {
    fn check(&self, symbols: &[String]) -> Option<PatternFailure> {
        let matched: Vec<String> = symbols
            .iter()
            .filter(|s| self.pattern.is_match(s))
            .cloned()
            .collect();
        trace!(pattern = self.pattern.as_str(), count = matched.len(), "matched");
        let expectation = match &self.rule {
            Rule::Unexpected if !matched.is_empty() => Expectation::NotToAppear,
            Rule::Count(bounds) => bounds.violated(matched.len())?,
            _ => return None,
        };
        return Some(PatternFailure {
            pattern: String::from(self.pattern.as_str()),
            expectation,
            matched,
        });
    }
}

trait Violated {
    fn violated(&self, count: usize) -> Option<Expectation>;
}

impl Violated for CountBounds {
    fn violated(&self, count: usize) -> Option<Expectation> {
        if let Some(max) = self.max_count {
            if count > max {
                return Some(Expectation::AtMost(max));
            }
        }
        if let Some(min) = self.min_count {
            if count < min {
                return Some(Expectation::AtLeast(min));
            }
        }
        if let Some(exact) = self.exact_count {
            if count != exact {
                return Some(Expectation::Exactly(exact));
            }
        }
        return None;
    }
}

impl PatternFailure {
    pub fn message(&self, verbose: bool) -> String {
        let mut msg = format!(
            "Expects pattern '{}' {}, but it appears {} time(s) actually",
            self.pattern,
            self.expectation,
            self.matched.len()
        );
        if verbose && !self.matched.is_empty() {
            msg.push(':');
            for s in &self.matched {
                msg.push_str("\n* ");
                msg.push_str(s);
            }
        } else {
            msg.push('.');
        }
        return msg;
    }
}

impl RulesVerifyResult {
    pub fn message(&self, verbose: bool) -> String {
        return self
            .failures
            .iter()
            .map(|failure| failure.message(verbose))
            .collect::<Vec<String>>()
            .join("\n");
    }
}

impl VerifyResult for RulesVerifyResult {
    fn is_good(&self) -> bool {
        return self.failures.is_empty();
    }
}

#[cfg(test)]
mod tests {
    use cases_lib::{Rule, RuleSet};
    use indexmap::IndexMap;

    use crate::{evaluate, Expectation, Verify, VerifyResult};

    fn rule_set(yaml: &str) -> RuleSet {
        let rules: IndexMap<String, Rule> = serde_yaml::from_str(yaml).unwrap();
        return RuleSet::compile("test.cpp", rules).unwrap();
    }

    fn symbols(lines: &[&str]) -> Vec<String> {
        return lines.iter().map(|s| String::from(*s)).collect();
    }

    #[test]
    fn test_unexpected_absent() {
        let verdict = evaluate(
            &symbols(&["_ZN3Bar", "main", ""]),
            &RuleSet::default(),
            &rule_set("foo_impl: unexpected"),
            false,
        );
        assert!(verdict.passed);
        assert_eq!(verdict.message, "");
    }

    #[test]
    fn test_unexpected_present() {
        let verdict = evaluate(
            &symbols(&["foo_impl_1", "xx foo_impl", "bar"]),
            &RuleSet::default(),
            &rule_set("foo_impl: unexpected"),
            false,
        );
        assert!(!verdict.passed);
        assert_eq!(
            verdict.message,
            "Expects pattern 'foo_impl' not to appear, but it appears 2 time(s) actually."
        );
    }

    #[test]
    fn test_exact_count() {
        let rules = rule_set("_ZN3Foo: {exact_count: 1}");
        let one = evaluate(&symbols(&["_ZN3Foo3barEv", "x"]), &RuleSet::default(), &rules, false);
        assert!(one.passed);

        let two = evaluate(
            &symbols(&["_ZN3Foo3barEv", "_ZN3Foo3bazEv"]),
            &RuleSet::default(),
            &rules,
            false,
        );
        assert!(!two.passed);
        assert_eq!(
            two.message,
            "Expects pattern '_ZN3Foo' to appear exactly 1 times, but it appears 2 time(s) actually."
        );

        let none = evaluate(&symbols(&["x"]), &RuleSet::default(), &rules, false);
        assert_eq!(
            none.message,
            "Expects pattern '_ZN3Foo' to appear exactly 1 times, but it appears 0 time(s) actually."
        );
    }

    #[test]
    fn test_bounds_order() {
        let rules = rule_set("a: {exact_count: 5, min_count: 3, max_count: 1}");
        let result = rules.verify(&symbols(&["a", "a"]));
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].expectation, Expectation::AtMost(1));

        let rules = rule_set("a: {exact_count: 5, min_count: 3}");
        let result = rules.verify(&symbols(&["a", "a"]));
        assert_eq!(result.failures[0].expectation, Expectation::AtLeast(3));

        let rules = rule_set("a: {exact_count: 5, min_count: 1}");
        let result = rules.verify(&symbols(&["a", "a"]));
        assert_eq!(result.failures[0].expectation, Expectation::Exactly(5));
    }

    #[test]
    fn test_all_failures_in_order() {
        let verdict = evaluate(
            &symbols(&["alpha", "beta"]),
            &RuleSet::default(),
            &rule_set("beta: unexpected\nok: {max_count: 3}\nalpha: {min_count: 2}"),
            false,
        );
        assert_eq!(
            verdict.message,
            "Expects pattern 'beta' not to appear, but it appears 1 time(s) actually.\n\
             Expects pattern 'alpha' to appear at least 2 times, but it appears 1 time(s) actually."
        );
    }

    #[test]
    fn test_verbose_lists_matches() {
        let verdict = evaluate(
            &symbols(&["std::__throw_length_error", "main", "std::__throw_bad_alloc"]),
            &RuleSet::default(),
            &rule_set("'std::__throw_': {max_count: 1}"),
            true,
        );
        assert_eq!(
            verdict.message,
            "Expects pattern 'std::__throw_' to appear at most 1 times, but it appears 2 time(s) actually:\n\
             * std::__throw_length_error\n\
             * std::__throw_bad_alloc"
        );
    }

    #[test]
    fn test_verbose_without_matches() {
        let verdict = evaluate(
            &symbols(&["main"]),
            &RuleSet::default(),
            &rule_set("foo: {min_count: 1}"),
            true,
        );
        assert!(verdict.message.ends_with("0 time(s) actually."));
    }

    #[test]
    fn test_common_rules_after_case_rules() {
        let common = rule_set("__cxa_throw: unexpected");
        let syms = symbols(&["__cxa_throw", "foo"]);

        let verdict = evaluate(&syms, &common, &rule_set("foo: {exact_count: 1}"), false);
        assert!(!verdict.passed);
        assert!(verdict.message.contains("'__cxa_throw'"));

        let verdict = evaluate(&syms, &common, &rule_set("foo: unexpected"), false);
        assert!(!verdict.passed);
        assert!(verdict.message.contains("'foo'"));
        assert!(!verdict.message.contains("__cxa_throw"));
    }

    #[test]
    fn test_unchecked_rule_passes() {
        let result = rule_set("foo: 3").verify(&symbols(&["foo", "foo"]));
        assert!(result.is_good());
    }

    #[test]
    fn test_idempotent() {
        let common = rule_set("x: {max_count: 0}");
        let rules = rule_set("a: unexpected\nb: {min_count: 1}");
        let syms = symbols(&["a", "x", "c"]);
        let first = evaluate(&syms, &common, &rules, true);
        let second = evaluate(&syms, &common, &rules, true);
        assert_eq!(first, second);
    }
}
