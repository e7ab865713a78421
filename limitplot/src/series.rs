//! Curves and bands of cross-section limits.

use super::error::{Error, Result};
use super::limit::LimitTree;
use super::signal::SignalConfig;
use float_cmp::approx_eq;
use log::info;

/// Limits for a single quantile, scaled to cross sections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    masses: Vec<f64>,
    values: Vec<f64>,
}

impl Series {
    /// Selects the rows of `tree` tagged with `quantile` and multiplies each limit with the
    /// cross section of `signal` for the same mass. The order of `tree` is kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMass`] if a selected row has a mass for which `signal` has no
    /// cross section.
    pub fn scaled(tree: &LimitTree, quantile: f64, signal: &SignalConfig) -> Result<Self> {
        let (masses, values) = tree
            .select(quantile)
            .map(|point| {
                signal
                    .cross_section(point.mass)
                    .map(|xsec| (point.mass, point.limit * xsec))
                    .ok_or_else(|| Error::UnknownMass {
                        mass: point.mass,
                        signal: signal.name.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .unzip();

        let series = Self { masses, values };

        info!("quantile {quantile}: {} points", series.len());

        Ok(series)
    }

    /// Returns the theoretical cross sections of `signal`.
    #[must_use]
    pub fn theory(signal: &SignalConfig) -> Self {
        Self {
            masses: signal.masses.clone(),
            values: signal.cross_sections.clone(),
        }
    }

    /// Mass of each point.
    #[must_use]
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    /// Scaled limit of each point.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Returns `true` if the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Returns the value at `mass`, if there is a point for it.
    #[must_use]
    pub fn value_at(&self, mass: f64) -> Option<f64> {
        self.masses
            .iter()
            .position(|&m| approx_eq!(f64, m, mass, ulps = 4))
            .map(|index| self.values[index])
    }

    /// Returns the points as `(mass, value)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.masses.iter().copied().zip(self.values.iter().copied())
    }

    fn reverse(&mut self) {
        self.masses.reverse();
        self.values.reverse();
    }
}

/// Closed polygon enclosing the region between two expected quantiles.
#[derive(Clone, Debug, PartialEq)]
pub struct Band {
    quantiles: (f64, f64),
    polygon: Series,
}

impl Band {
    /// Builds the band between the quantiles `low` and `high`, see [`Series::scaled`] and
    /// [`Band::from_scans`].
    ///
    /// # Errors
    ///
    /// Returns the errors of both functions.
    pub fn new(tree: &LimitTree, (low, high): (f64, f64), signal: &SignalConfig) -> Result<Self> {
        let lower = Series::scaled(tree, low, signal)?;
        let upper = Series::scaled(tree, high, signal)?;

        Self::from_scans((low, high), lower, upper)
    }

    /// Joins the two scans into a polygon: first `upper` in its original order, then `lower`
    /// reversed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BandMismatch`] if the scans have different lengths or their masses
    /// differ.
    pub fn from_scans(quantiles: (f64, f64), mut lower: Series, upper: Series) -> Result<Self> {
        if lower.len() != upper.len()
            || lower
                .masses()
                .iter()
                .zip(upper.masses())
                .any(|(&lhs, &rhs)| !approx_eq!(f64, lhs, rhs, ulps = 4))
        {
            return Err(Error::BandMismatch {
                low: quantiles.0,
                high: quantiles.1,
                low_len: lower.len(),
                high_len: upper.len(),
            });
        }

        lower.reverse();

        let mut polygon = upper;
        polygon.masses.extend(lower.masses);
        polygon.values.extend(lower.values);

        Ok(Self { quantiles, polygon })
    }

    /// Lower and upper quantile of this band.
    #[must_use]
    pub const fn quantiles(&self) -> (f64, f64) {
        self.quantiles
    }

    /// The vertices of the polygon.
    #[must_use]
    pub const fn polygon(&self) -> &Series {
        &self.polygon
    }
}
