//! Error type of this crate.

use std::path::PathBuf;
use thiserror::Error;

/// Catch-all error for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be opened.
    #[error("couldn't open {}", path.display())]
    FileOpen {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The input file does not contain a limit table, which is detected by a missing column.
    #[error("couldn't get limit table from {}: column `{column}` is missing", path.display())]
    MissingTable {
        /// Path of the file.
        path: PathBuf,
        /// Name of the first missing column.
        column: String,
    },
    /// Malformed CSV input.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// Malformed YAML input.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    /// The requested signal model is not registered.
    #[error("unknown signal model `{name}`, expected one of: {}", known.join(", "))]
    UnknownSignal {
        /// Requested name.
        name: String,
        /// Names of all registered signal models.
        known: Vec<String>,
    },
    /// A signal configuration violates one of its invariants.
    #[error("invalid signal model `{name}`: {reason}")]
    InvalidSignal {
        /// Name of the signal model.
        name: String,
        /// Violated invariant.
        reason: String,
    },
    /// A limit was found for a mass without a theoretical cross section.
    #[error("no cross section for mass {mass} in signal model `{signal}`")]
    UnknownMass {
        /// Mass of the offending row.
        mass: f64,
        /// Name of the signal model.
        signal: String,
    },
    /// The two scans of a band do not line up.
    #[error(
        "scans for quantiles {low} ({low_len} points) and {high} ({high_len} points) do not match"
    )]
    BandMismatch {
        /// Lower quantile.
        low: f64,
        /// Upper quantile.
        high: f64,
        /// Number of points of the lower scan.
        low_len: usize,
        /// Number of points of the upper scan.
        high_len: usize,
    },
    /// Only zero, one or two expected bands can be drawn.
    #[error("band level must be 0, 1 or 2, is {0}")]
    InvalidBandLevel(u8),
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
