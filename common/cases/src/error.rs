use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read test cases from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed test cases file: {0}")]
    Malformed(#[source] serde_yaml::Error),

    #[error("Missing 'common' rules in test cases file")]
    MissingCommon,

    #[error("Bad definition of '{case}': {source}")]
    Case {
        case: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Bad pattern '{pattern}' in '{case}': {source}")]
    Pattern {
        case: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
