use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

pub mod extractor;

/// Prefix shared by every built test case artifact.
pub const ARTIFACT_PREFIX: &str = "asm_check";

/// Runs an external utility that prints the printable strings of a binary, one per line.
#[derive(Debug, Clone)]
pub struct Extractor {
    program: OsString,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Artifact {} not found, build the test cases first", .0.display())]
    ArtifactMissing(PathBuf),

    #[error("Failed to run {} on {}: {source}", .program.to_string_lossy(), .path.display())]
    Spawn {
        program: OsString,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} exited with {status} on {}: {stderr}", .program.to_string_lossy(), .path.display())]
    Status {
        program: OsString,
        path: PathBuf,
        status: ExitStatus,
        stderr: String,
    },
}

/// Directory holding the built artifacts under the repository root.
pub fn build_dir<P>(root: P) -> PathBuf
where
    P: AsRef<Path>,
{
    return root.as_ref().join("build").join(ARTIFACT_PREFIX);
}
