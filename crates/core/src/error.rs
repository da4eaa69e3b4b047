//! Error types for taskfile loading.

use std::path::PathBuf;

/// Result type for taskfile operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating or decoding a taskfile.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input path could not be read.
    #[error("failed to read '{}'", path.display())]
    Io {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The taskfile was read but is not valid YAML for the expected schema.
    #[error("failed to parse taskfile '{}'", path.display())]
    Parse {
        /// The file that failed to decode.
        path: PathBuf,
        /// The underlying decode error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A directory was given but contains no recognized taskfile.
    #[error("no taskfile found in '{}'", dir.display())]
    NoTaskfile {
        /// The directory that was searched.
        dir: PathBuf,
    },
}
