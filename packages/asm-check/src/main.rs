use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use cases_lib::TestCaseSet;
use symbols_lib::Extractor;

use crate::report::{run, RunOptions};

mod output;
mod report;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'R', long, default_value = ".", help = "Root directory of the repository")]
    root_dir: PathBuf,
    #[arg(short, long, help = "Colored terminal output")]
    colored_output: bool,
    #[arg(short, long, help = "Stops testing after first failed test case")]
    stops_on_first_failure: bool,
    #[arg(
        short = 'z',
        long,
        help = "Exits with non-zero return code if any test case fails"
    )]
    returns_non_zero_on_failure: bool,
    #[arg(short, long, help = "Displays full message")]
    verbose: bool,
    #[arg(long, default_value = "strings", help = "Utility printing the strings of a binary")]
    strings: PathBuf,
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Cases(#[from] cases_lib::Error),
    #[error(transparent)]
    Symbols(#[from] symbols_lib::Error),
    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl Args {
    fn run_options(&self) -> RunOptions {
        return RunOptions {
            verbose: self.verbose,
            stops_on_first_failure: self.stops_on_first_failure,
        };
    }
}

fn init_logging(debug: u8) {
    let level = match debug {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn check(args: &Args) -> Result<u8, Error> {
    let cases = TestCaseSet::load(&args.root_dir)?;
    let build_dir = symbols_lib::build_dir(&args.root_dir);
    let extractor = Extractor::new(&args.strings);
    let mut output = output::console(args.colored_output);
    let outcome = run(
        &cases,
        args.run_options(),
        |case| {
            let path = Extractor::artifact_path(&build_dir, &case.id);
            return Ok(extractor.extract(path)?);
        },
        output.as_mut(),
    )?;
    return Ok(outcome.exit_code(args.returns_non_zero_on_failure));
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);
    return match check(&args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    };
}
