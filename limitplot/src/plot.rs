//! Assembly of everything an exclusion-limit plot shows. Rendering is left to the caller, which
//! only has to draw the [`Layer`]s returned by [`LimitPlot::layers`] in order.

use super::error::{Error, Result};
use super::limit::{LimitTree, MEDIAN, OBSERVED, ONE_SIGMA, TWO_SIGMA};
use super::range::AxisRange;
use super::series::{Band, Series};
use super::signal::SignalConfig;
use log::info;

/// First line of the legend, without a marker.
pub const LEGEND_HEADER: &str = "95% CL upper limits";

/// Integrated luminosity in inverse picobarn assumed if none is given.
pub const DEFAULT_LUMI: f64 = 35900.0;

/// The curves of an exclusion-limit plot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Curve {
    /// Band between the 2.5% and 97.5% expected quantiles.
    TwoSigma,
    /// Band between the 16% and 84% expected quantiles.
    OneSigma,
    /// Median expected limit.
    Median,
    /// Observed limit.
    Observed,
    /// Theoretical cross section.
    Theory,
}

impl Curve {
    /// Legend label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TwoSigma => "95% expected",
            Self::OneSigma => "68% expected",
            Self::Median => "Median expected",
            Self::Observed => "Observed",
            Self::Theory => "Theoretical",
        }
    }

    /// Returns `true` if this curve is drawn as a filled polygon.
    #[must_use]
    pub const fn is_band(self) -> bool {
        matches!(self, Self::TwoSigma | Self::OneSigma)
    }
}

/// A curve together with its points.
#[derive(Clone, Copy, Debug)]
pub struct Layer<'a> {
    /// Which curve this is.
    pub curve: Curve,
    /// Points of the curve, or vertices of the polygon for bands.
    pub series: &'a Series,
}

/// Contents of an exclusion-limit plot for one signal model.
#[derive(Clone, Debug)]
pub struct LimitPlot {
    signal: SignalConfig,
    lumi: f64,
    theory: Series,
    observed: Series,
    median: Series,
    one_sigma: Option<Band>,
    two_sigma: Option<Band>,
    x_range: AxisRange,
    y_range: AxisRange,
}

impl LimitPlot {
    /// Extracts all curves of `signal` from `tree`. `bands` selects how many expected bands are
    /// shown: none, only the 68% band, or both the 68% and the 95% band. `lumi` is the
    /// integrated luminosity in inverse picobarn.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBandLevel`] if `bands` is larger than two and otherwise the
    /// errors of [`Series::scaled`] and [`Band::new`].
    pub fn new(tree: &LimitTree, signal: &SignalConfig, bands: u8, lumi: f64) -> Result<Self> {
        if bands > 2 {
            return Err(Error::InvalidBandLevel(bands));
        }

        let mut x_range = AxisRange::new();
        let mut y_range = AxisRange::new();

        let theory = Series::theory(signal);
        y_range.widen(theory.values());
        x_range.widen(theory.masses());

        let observed = Series::scaled(tree, OBSERVED, signal)?;
        y_range.widen(observed.values());

        let median = Series::scaled(tree, MEDIAN, signal)?;
        y_range.widen(median.values());

        let one_sigma = if bands >= 1 {
            let band = Band::new(tree, ONE_SIGMA, signal)?;
            y_range.widen(band.polygon().values());
            Some(band)
        } else {
            None
        };

        let two_sigma = if bands >= 2 {
            let band = Band::new(tree, TWO_SIGMA, signal)?;
            y_range.widen(band.polygon().values());
            Some(band)
        } else {
            None
        };

        let y_range = y_range.padded_log();

        info!(
            "axis ranges: x = [{}, {}], y = [{:e}, {:e}]",
            x_range.min(),
            x_range.max(),
            y_range.min(),
            y_range.max()
        );

        Ok(Self {
            signal: signal.clone(),
            lumi,
            theory,
            observed,
            median,
            one_sigma,
            two_sigma,
            x_range,
            y_range,
        })
    }

    /// The signal model this plot is made for.
    #[must_use]
    pub const fn signal(&self) -> &SignalConfig {
        &self.signal
    }

    /// Base name of the output file, without extension.
    #[must_use]
    pub fn name(&self) -> String {
        self.signal.plot_name()
    }

    /// Range of the x axis.
    #[must_use]
    pub const fn x_range(&self) -> AxisRange {
        self.x_range
    }

    /// Range of the y axis, already padded for a logarithmic axis.
    #[must_use]
    pub const fn y_range(&self) -> AxisRange {
        self.y_range
    }

    /// Lines of the caption.
    #[must_use]
    pub fn caption(&self) -> [&str; 2] {
        [&self.signal.process, &self.signal.lsp]
    }

    /// Luminosity label shown above the frame.
    #[must_use]
    pub fn lumi_label(&self) -> String {
        format!("{} fb$^{{-1}}$ (13 TeV)", self.lumi / 1000.0)
    }

    /// Returns the series of `curve`, or `None` for a band that was not requested.
    #[must_use]
    pub fn series(&self, curve: Curve) -> Option<&Series> {
        match curve {
            Curve::TwoSigma => self.two_sigma.as_ref().map(Band::polygon),
            Curve::OneSigma => self.one_sigma.as_ref().map(Band::polygon),
            Curve::Median => Some(&self.median),
            Curve::Observed => Some(&self.observed),
            Curve::Theory => Some(&self.theory),
        }
    }

    /// Curves in the order they are drawn, back to front.
    #[must_use]
    pub fn layers(&self) -> Vec<Layer<'_>> {
        [
            Curve::TwoSigma,
            Curve::OneSigma,
            Curve::Median,
            Curve::Observed,
            Curve::Theory,
        ]
        .into_iter()
        .filter_map(|curve| self.series(curve).map(|series| Layer { curve, series }))
        .collect()
    }

    /// Curves in the order they are listed in the legend, below [`LEGEND_HEADER`].
    #[must_use]
    pub fn legend(&self) -> Vec<Curve> {
        [
            Curve::Theory,
            Curve::Observed,
            Curve::Median,
            Curve::OneSigma,
            Curve::TwoSigma,
        ]
        .into_iter()
        .filter(|&curve| self.series(curve).is_some())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limit::LimitPoint;
    use float_cmp::assert_approx_eq;

    fn full_tree(signal: &SignalConfig) -> LimitTree {
        let quantiles = [-1.0, 0.025, 0.16, 0.5, 0.84, 0.975];
        let factors = [1.0, 0.4, 0.6, 0.8, 1.2, 1.6];

        signal
            .masses
            .iter()
            .flat_map(|&mass| {
                quantiles
                    .iter()
                    .zip(factors)
                    .map(move |(&quantile, limit)| LimitPoint {
                        mass,
                        limit,
                        quantile,
                    })
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn observed_only() {
        let signal = SignalConfig::t2tt();
        let tree: LimitTree = signal
            .masses
            .iter()
            .map(|&mass| LimitPoint {
                mass,
                limit: 1.0,
                quantile: -1.0,
            })
            .collect::<Vec<_>>()
            .into();
        let plot = LimitPlot::new(&tree, &signal, 0, DEFAULT_LUMI).unwrap();

        assert_eq!(
            plot.series(Curve::Observed).unwrap().values(),
            signal.cross_sections
        );
        assert!(plot.series(Curve::Median).unwrap().is_empty());
        assert_approx_eq!(f64, plot.y_range().max(), 0.0283338 * 10.0, ulps = 2);
        assert_approx_eq!(f64, plot.y_range().min(), 0.00159844 / 10.0, ulps = 2);
        assert_eq!((plot.x_range().min(), plot.x_range().max()), (800.0, 1200.0));
        assert_eq!(plot.name(), "plotLimit_T2tt");
    }

    #[test]
    fn layers_and_legend() {
        let signal = SignalConfig::t1tttt();
        let tree = full_tree(&signal);

        let plot = LimitPlot::new(&tree, &signal, 0, DEFAULT_LUMI).unwrap();
        let curves: Vec<_> = plot.layers().iter().map(|layer| layer.curve).collect();
        assert_eq!(curves, [Curve::Median, Curve::Observed, Curve::Theory]);
        assert_eq!(
            plot.legend(),
            [Curve::Theory, Curve::Observed, Curve::Median]
        );

        let plot = LimitPlot::new(&tree, &signal, 1, DEFAULT_LUMI).unwrap();
        let curves: Vec<_> = plot.layers().iter().map(|layer| layer.curve).collect();
        assert_eq!(
            curves,
            [Curve::OneSigma, Curve::Median, Curve::Observed, Curve::Theory]
        );

        let plot = LimitPlot::new(&tree, &signal, 2, DEFAULT_LUMI).unwrap();
        let curves: Vec<_> = plot.layers().iter().map(|layer| layer.curve).collect();
        assert_eq!(
            curves,
            [
                Curve::TwoSigma,
                Curve::OneSigma,
                Curve::Median,
                Curve::Observed,
                Curve::Theory
            ]
        );
        assert_eq!(
            plot.legend(),
            [
                Curve::Theory,
                Curve::Observed,
                Curve::Median,
                Curve::OneSigma,
                Curve::TwoSigma
            ]
        );
        assert_eq!(plot.series(Curve::TwoSigma).unwrap().len(), 10);
    }

    #[test]
    fn bands_widen_y_range() {
        let signal = SignalConfig::t1tttt();
        let tree = full_tree(&signal);

        let narrow = LimitPlot::new(&tree, &signal, 0, DEFAULT_LUMI).unwrap();
        let wide = LimitPlot::new(&tree, &signal, 2, DEFAULT_LUMI).unwrap();

        assert!(wide.y_range().min() < narrow.y_range().min());
        assert!(wide.y_range().max() > narrow.y_range().max());
        assert_approx_eq!(f64, wide.y_range().max(), 0.00470323 * 1.6 * 10.0, ulps = 4);
    }

    #[test]
    fn invalid_band_level() {
        let signal = SignalConfig::t2tt();

        assert!(matches!(
            LimitPlot::new(&LimitTree::default(), &signal, 3, DEFAULT_LUMI),
            Err(Error::InvalidBandLevel(3))
        ));
    }

    #[test]
    fn labels() {
        let signal = SignalConfig::t2tt();
        let plot = LimitPlot::new(&LimitTree::default(), &signal, 0, DEFAULT_LUMI).unwrap();

        assert_eq!(plot.lumi_label(), "35.9 fb$^{-1}$ (13 TeV)");
        assert_eq!(plot.caption(), [signal.process.as_str(), signal.lsp.as_str()]);
        assert_eq!(Curve::OneSigma.label(), "68% expected");
        assert!(Curve::TwoSigma.is_band());
        assert!(!Curve::Observed.is_band());
    }
}
