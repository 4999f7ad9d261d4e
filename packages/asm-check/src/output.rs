use std::io::{Error, Stdout, Write};

use anstyle::{AnsiColor, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStatus {
    Passed,
    Failed,
    IgnoredPassed,
    IgnoredFailed,
}

impl CaseStatus {
    pub fn new(passed: bool, ignored: bool) -> Self {
        return match (passed, ignored) {
            (true, false) => CaseStatus::Passed,
            (false, false) => CaseStatus::Failed,
            (true, true) => CaseStatus::IgnoredPassed,
            (false, true) => CaseStatus::IgnoredFailed,
        };
    }

    pub fn tag(&self) -> &'static str {
        return match self {
            CaseStatus::Passed | CaseStatus::IgnoredPassed => "[PASS]",
            CaseStatus::Failed | CaseStatus::IgnoredFailed => "[FAIL]",
        };
    }

    /// Ignored cases are always yellow, whatever their verdict.
    pub fn color(&self) -> AnsiColor {
        return match self {
            CaseStatus::Passed => AnsiColor::Green,
            CaseStatus::Failed => AnsiColor::Red,
            CaseStatus::IgnoredPassed | CaseStatus::IgnoredFailed => AnsiColor::Yellow,
        };
    }

    pub fn style(&self) -> Style {
        return Style::new().fg_color(Some(self.color().into()));
    }
}

pub trait ReportOutput: Write {
    fn write_tag(&mut self, status: CaseStatus) -> Result<(), Error>;

    fn case_line(&mut self, status: CaseStatus, case: &str) -> Result<(), Error> {
        self.write_tag(status)?;
        return self.write_fmt(format_args!(" {case}\n"));
    }
}

/// Output without any color.
pub struct Plain<W>(pub W);

impl<W: Write> Write for Plain<W> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        return self.0.write(buf);
    }

    fn flush(&mut self) -> Result<(), Error> {
        return self.0.flush();
    }
}

impl<W: Write> ReportOutput for Plain<W> {
    fn write_tag(&mut self, status: CaseStatus) -> Result<(), Error> {
        return self.write_all(status.tag().as_bytes());
    }
}

/// Output with tags wrapped in ANSI color codes.
pub struct Colored<W>(pub W);

impl<W: Write> Write for Colored<W> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        return self.0.write(buf);
    }

    fn flush(&mut self) -> Result<(), Error> {
        return self.0.flush();
    }
}

impl<W: Write> ReportOutput for Colored<W> {
    fn write_tag(&mut self, status: CaseStatus) -> Result<(), Error> {
        let style = status.style();
        return self.write_fmt(format_args!(
            "{}{}{}",
            style.render(),
            status.tag(),
            style.render_reset()
        ));
    }
}

pub fn console(colored: bool) -> Box<dyn ReportOutput> {
    if colored {
        return Box::new(Colored::<Stdout>(std::io::stdout()));
    }
    return Box::new(Plain::<Stdout>(std::io::stdout()));
}
