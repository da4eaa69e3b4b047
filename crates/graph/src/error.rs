//! Error types for style configuration loading.

use std::path::PathBuf;

/// Result type for graph and style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or compiling a style configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration file could not be read.
    #[error("failed to read style configuration '{}'", path.display())]
    Io {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for the expected schema.
    ///
    /// Unknown top-level keys are rejected and surface here.
    #[error("failed to parse style configuration '{}'", path.display())]
    Parse {
        /// The file that failed to decode.
        path: PathBuf,
        /// The underlying decode error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A style rule pattern could not be compiled into a matcher.
    #[error("invalid style pattern '{pattern}'")]
    Pattern {
        /// The offending glob pattern.
        pattern: String,
        /// The underlying compile error.
        #[source]
        source: regex::Error,
    },
}
