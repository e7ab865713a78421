//! Module containing the rows of a limit table and the quantile filter.

use super::error::{Error, Result};
use log::{debug, info};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Two quantile tags are considered the same if they differ by less than this value.
pub const QUANTILE_TOLERANCE: f64 = 0.01;

/// Quantile tag of the observed limit.
pub const OBSERVED: f64 = -1.0;

/// Quantile tag of the median expected limit.
pub const MEDIAN: f64 = 0.5;

/// Lower and upper quantile tags of the 68% expected band.
pub const ONE_SIGMA: (f64, f64) = (0.16, 0.84);

/// Lower and upper quantile tags of the 95% expected band.
pub const TWO_SIGMA: (f64, f64) = (0.025, 0.975);

/// Names of the columns a limit table must provide.
pub const COLUMNS: [&str; 3] = ["mh", "limit", "quantileExpected"];

/// A single row of a limit table.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct LimitPoint {
    /// Mass hypothesis.
    #[serde(rename = "mh")]
    pub mass: f64,
    /// Limit on the signal strength for this mass and quantile.
    pub limit: f64,
    /// Quantile tag, see [`OBSERVED`], [`MEDIAN`], [`ONE_SIGMA`] and [`TWO_SIGMA`].
    #[serde(rename = "quantileExpected")]
    pub quantile: f64,
}

impl LimitPoint {
    /// Returns `true` if this row carries the quantile `target`.
    #[must_use]
    pub fn matches(&self, target: f64) -> bool {
        (self.quantile - target).abs() < QUANTILE_TOLERANCE
    }
}

/// All rows of a limit table, in the order they were read.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LimitTree {
    points: Vec<LimitPoint>,
}

impl LimitTree {
    /// Reads a limit table from the CSV file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileOpen`] if the file can not be opened, [`Error::MissingTable`] if
    /// one of the [`COLUMNS`] is not present and [`Error::Csv`] for malformed rows.
    pub fn read(path: &Path) -> Result<Self> {
        info!("reading limits from {}", path.display());

        let file = File::open(path).map_err(|source| Error::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        Self::read_csv(BufReader::new(file), path.to_path_buf())
    }

    /// Reads a limit table in CSV format from `reader`.
    ///
    /// # Errors
    ///
    /// See [`LimitTree::read`].
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Self::read_csv(reader, PathBuf::from("-"))
    }

    fn read_csv(reader: impl Read, path: PathBuf) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = reader.headers()?.clone();

        if let Some(column) = COLUMNS
            .iter()
            .find(|&&column| !headers.iter().any(|header| header == column))
        {
            return Err(Error::MissingTable {
                path,
                column: (*column).to_owned(),
            });
        }

        let points = reader
            .deserialize()
            .collect::<std::result::Result<Vec<LimitPoint>, _>>()?;

        info!("read {} rows", points.len());

        Ok(Self { points })
    }

    /// Returns all rows.
    #[must_use]
    pub fn points(&self) -> &[LimitPoint] {
        &self.points
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the rows whose quantile tag is within [`QUANTILE_TOLERANCE`] of `target`, in
    /// source order.
    pub fn select(&self, target: f64) -> impl Iterator<Item = &LimitPoint> {
        debug!("selecting rows with abs(quantileExpected-{target})<{QUANTILE_TOLERANCE}");

        self.points.iter().filter(move |point| point.matches(target))
    }
}

impl From<Vec<LimitPoint>> for LimitTree {
    fn from(points: Vec<LimitPoint>) -> Self {
        Self { points }
    }
}
