//! `limitplot` turns the limits of a likelihood scan into the curves and bands of an exclusion
//! plot.
//!
//! A [`limit::LimitTree`] holds the rows of a limit table, each tagged with a quantile.
//! [`series::Series::scaled`] selects one quantile and converts the limits on the signal strength
//! to cross sections using a [`signal::SignalConfig`], and [`plot::LimitPlot`] collects all
//! curves together with the ranges and labels of the axes.

mod error;

pub mod limit;
pub mod plot;
pub mod range;
pub mod series;
pub mod signal;

pub use error::{Error, Result};
