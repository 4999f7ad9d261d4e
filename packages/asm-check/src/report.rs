use tracing::debug;

use cases_lib::{TestCase, TestCaseSet};
use verify_lib::{evaluate, Verdict};

use crate::output::{CaseStatus, ReportOutput};
use crate::Error;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub verbose: bool,
    pub stops_on_first_failure: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: Vec<String>,
    pub ignored_passed: Vec<String>,
    pub ignored_failed: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Finished(Summary),
    /// Stopped at the first failed case, no summary printed.
    Stopped(String),
}

impl Summary {
    pub fn new(total: usize) -> Self {
        return Self {
            total,
            ..Default::default()
        };
    }

    pub fn record(&mut self, case: &str, status: CaseStatus) {
        match status {
            CaseStatus::Passed => self.passed += 1,
            CaseStatus::Failed => self.failed.push(String::from(case)),
            CaseStatus::IgnoredPassed => self.ignored_passed.push(String::from(case)),
            CaseStatus::IgnoredFailed => self.ignored_failed.push(String::from(case)),
        }
    }

    /// Cases that count towards the pass rate.
    pub fn attempted(&self) -> usize {
        return self.total - self.ignored_passed.len() - self.ignored_failed.len();
    }

    pub fn print(&self, out: &mut dyn ReportOutput) -> Result<(), std::io::Error> {
        out.write_fmt(format_args!(
            "Summary: {} / {} test cases passed.\n",
            self.passed,
            self.attempted()
        ))?;
        print_list(out, "failed", &self.failed)?;
        print_list(out, "ignored yet passed", &self.ignored_passed)?;
        print_list(out, "ignored and failed", &self.ignored_failed)?;
        return Ok(());
    }
}

fn print_list(
    out: &mut dyn ReportOutput,
    title: &str,
    cases: &[String],
) -> Result<(), std::io::Error> {
    if cases.is_empty() {
        return Ok(());
    }
    out.write_fmt(format_args!("{} test cases {title}:\n", cases.len()))?;
    for case in cases {
        out.write_fmt(format_args!("* {case}\n"))?;
    }
    return Ok(());
}

impl Outcome {
    pub fn exit_code(&self, returns_non_zero_on_failure: bool) -> u8 {
        if !returns_non_zero_on_failure {
            return 0;
        }
        return match self {
            Outcome::Finished(summary) if summary.failed.is_empty() => 0,
            _ => 1,
        };
    }
}

/// Checks every case in declaration order and prints its status, then the summary.
pub fn run<F>(
    cases: &TestCaseSet,
    options: RunOptions,
    mut extract: F,
    out: &mut dyn ReportOutput,
) -> Result<Outcome, Error>
where
    F: FnMut(&TestCase) -> Result<Vec<String>, Error>,
{
    out.write_all(b"Starts ASM check:\n")?;
    let mut summary = Summary::new(cases.len());
    for case in &cases.cases {
        let symbols = extract(case)?;
        let Verdict { passed, message } =
            evaluate(&symbols, &cases.common, &case.patterns, options.verbose);
        let status = CaseStatus::new(passed, case.ignored);
        debug!(case = %case.id, ?status, "checked");
        out.case_line(status, &case.id)?;
        if status == CaseStatus::Failed {
            out.write_fmt(format_args!("{message}\n"))?;
            if options.stops_on_first_failure {
                out.flush()?;
                return Ok(Outcome::Stopped(case.id.clone()));
            }
        }
        summary.record(&case.id, status);
    }
    summary.print(out)?;
    out.flush()?;
    return Ok(Outcome::Finished(summary));
}
