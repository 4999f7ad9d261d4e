use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use path_slash::PathExt;
use tracing::debug;

use crate::{Error, Extractor, ARTIFACT_PREFIX};

impl Default for Extractor {
    fn default() -> Self {
        return Self::new("strings");
    }
}

impl Extractor {
    pub fn new<S>(program: S) -> Self
    where
        S: AsRef<OsStr>,
    {
        return Self {
            program: program.as_ref().to_os_string(),
        };
    }

    /// Path of the shared object built for `case`, e.g. `enum/foo.cpp` maps to
    /// `libasm_check-enum-foo.cpp.so`.
    pub fn artifact_path<P>(build_dir: P, case: &str) -> PathBuf
    where
        P: AsRef<Path>,
    {
        let case = Path::new(case).to_slash_lossy().replace('/', "-");
        return build_dir
            .as_ref()
            .join(format!("lib{ARTIFACT_PREFIX}-{case}.so"));
    }

    /// Extracts the strings of `path`. Empty entries produced by splitting, including
    /// the trailing one, are kept.
    pub fn extract<P>(&self, path: P) -> Result<Vec<String>, Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::ArtifactMissing(path.to_path_buf()));
        }
        debug!(
            program = %self.program.to_string_lossy(),
            path = %path.display(),
            "extracting strings"
        );
        let output = Command::new(&self.program)
            .arg(path)
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                path: path.to_path_buf(),
                source,
            })?;
        if !output.status.success() {
            return Err(Error::Status {
                program: self.program.clone(),
                path: path.to_path_buf(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let symbols: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .split('\n')
            .map(String::from)
            .collect();
        debug!(count = symbols.len(), "extracted strings");
        return Ok(symbols);
    }
}
