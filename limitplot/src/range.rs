//! Running minimum and maximum used to size the axes of a plot.

/// Closed interval that only ever widens.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    min: f64,
    max: f64,
}

impl Default for AxisRange {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisRange {
    /// Creates an empty range. The first call to [`AxisRange::widen`] with a non-empty slice sets
    /// both bounds.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Widens the range so that it includes all `values`. An empty slice leaves it unchanged.
    pub fn widen(&mut self, values: &[f64]) {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if min < self.min {
            self.min = min;
        }

        if max > self.max {
            self.max = max;
        }
    }

    /// Returns `true` if no value has been seen yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Returns the range extended by one decade on both sides, which leaves room for the legend
    /// and caption on a logarithmic axis.
    #[must_use]
    pub fn padded_log(&self) -> Self {
        Self {
            min: self.min / 10.0,
            max: self.max * 10.0,
        }
    }
}
