//! Direct rendering of limit plots to PNG files with [`plotters`].

use anyhow::{anyhow, Result};
use limitplot::plot::{Curve, LimitPlot, LEGEND_HEADER};
use plotters::prelude::*;
use std::path::Path;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

const TEX_REPLACEMENTS: [(&str, &str); 8] = [
    (r"\tilde{\chi}_{1}^{0}", "\u{3c7}\u{303}\u{2070}\u{2081}"),
    (r"\tilde{t}", "t\u{303}"),
    (r"\tilde{g}", "g\u{303}"),
    (r"\bar{t}", "t\u{304}"),
    (r"\rightarrow", "\u{2192}"),
    (r"\sigma", "\u{3c3}"),
    ("^{-1}", "\u{207b}\u{b9}"),
    ("$", ""),
];

/// Converts the TeX labels of a signal model to plain text.
fn plain_text(tex: &str) -> String {
    let text = TEX_REPLACEMENTS
        .iter()
        .fold(tex.to_owned(), |text, (from, to)| text.replace(from, to));

    text.chars()
        .filter(|c| !matches!(c, '{' | '}' | '_' | '^' | '\\'))
        .collect()
}

fn color(curve: Curve) -> RGBColor {
    match curve {
        Curve::TwoSigma => RGBColor(255, 165, 0),
        Curve::OneSigma => RGBColor(34, 139, 34),
        Curve::Median => BLUE,
        Curve::Observed => BLACK,
        Curve::Theory => MAGENTA,
    }
}

/// Ways a curve is drawn, following the styles of the matplotlib script.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Stroke {
    Fill,
    Solid,
    Dashed,
    Markers,
}

const fn stroke(curve: Curve) -> Stroke {
    match curve {
        Curve::TwoSigma | Curve::OneSigma => Stroke::Fill,
        Curve::Median => Stroke::Dashed,
        Curve::Observed => Stroke::Markers,
        Curve::Theory => Stroke::Solid,
    }
}

/// Legend entries from top to bottom. The header comes first and has no sample.
fn legend_entries(plot: &LimitPlot) -> Vec<(&'static str, Option<Curve>)> {
    std::iter::once((LEGEND_HEADER, None))
        .chain(
            plot.legend()
                .into_iter()
                .map(|curve| (curve.label(), Some(curve))),
        )
        .collect()
}

/// Draws `plot` and saves it as a PNG at `path`.
pub fn render(plot: &LimitPlot, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(|err| anyhow!("{err}"))?;

    let signal = plot.signal();
    let x_range = plot.x_range();
    let y_range = plot.y_range();

    let mut chart = ChartBuilder::on(&root)
        .caption(plain_text(&plot.lumi_label()), ("sans-serif", 18))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(
            x_range.min()..x_range.max(),
            (y_range.min()..y_range.max()).log_scale(),
        )
        .map_err(|err| anyhow!("{err}"))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(plain_text(&signal.x_title))
        .y_desc(plain_text(&signal.y_title))
        .y_label_formatter(&|y| format!("{y:.0e}"))
        .draw()
        .map_err(|err| anyhow!("{err}"))?;

    for layer in plot.layers() {
        let color = color(layer.curve);
        let style = color.stroke_width(2);
        let points: Vec<_> = layer.series.points().collect();

        match stroke(layer.curve) {
            Stroke::Fill => {
                chart.draw_series(std::iter::once(Polygon::new(points, color.filled())))
            }
            Stroke::Solid => chart.draw_series(LineSeries::new(points, style)),
            Stroke::Dashed => chart.draw_series(DashedLineSeries::new(points, 10, 6, style)),
            Stroke::Markers => {
                chart
                    .draw_series(
                        points
                            .iter()
                            .map(|&point| Circle::new(point, 4, color.filled())),
                    )
                    .map_err(|err| anyhow!("{err}"))?;
                chart.draw_series(LineSeries::new(points, style))
            }
        }
        .map_err(|err| anyhow!("{err}"))?;
    }

    // legend entries are empty series registered in legend order
    for (label, curve) in legend_entries(plot) {
        let annotation = chart
            .draw_series(std::iter::empty::<Circle<(f64, f64), u32>>())
            .map_err(|err| anyhow!("{err}"))?;

        annotation.label(label);

        let Some(curve) = curve else {
            continue;
        };

        let color = color(curve);
        let style = color.stroke_width(2);

        match stroke(curve) {
            Stroke::Fill => annotation.legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled())
            }),
            Stroke::Solid => {
                annotation.legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style))
            }
            Stroke::Dashed => annotation.legend(move |(x, y)| {
                EmptyElement::at((x, y))
                    + PathElement::new(vec![(0, 0), (7, 0)], style)
                    + PathElement::new(vec![(13, 0), (20, 0)], style)
            }),
            Stroke::Markers => annotation.legend(move |(x, y)| {
                EmptyElement::at((x, y))
                    + PathElement::new(vec![(0, 0), (20, 0)], style)
                    + Circle::new((10, 0), 4, color.filled())
            }),
        };
    }

    // the frame goes on top of the bands
    chart
        .configure_mesh()
        .disable_mesh()
        .draw()
        .map_err(|err| anyhow!("{err}"))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE)
        .border_style(WHITE)
        .draw()
        .map_err(|err| anyhow!("{err}"))?;

    for (index, line) in plot.caption().iter().enumerate() {
        let y = 40 + 24 * i32::try_from(index)?;

        root.draw(&Text::new(plain_text(line), (110, y), ("sans-serif", 18)))
            .map_err(|err| anyhow!("{err}"))?;
    }

    root.present().map_err(|err| anyhow!("{err}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use limitplot::limit::{LimitPoint, LimitTree};
    use limitplot::plot::DEFAULT_LUMI;
    use limitplot::signal::SignalConfig;

    #[test]
    fn legend_follows_plot_order() {
        let signal = SignalConfig::t2tt();
        let tree: LimitTree = signal
            .masses
            .iter()
            .flat_map(|&mass| {
                [-1.0, 0.025, 0.16, 0.5, 0.84, 0.975]
                    .into_iter()
                    .map(move |quantile| LimitPoint {
                        mass,
                        limit: 1.0,
                        quantile,
                    })
            })
            .collect::<Vec<_>>()
            .into();
        let plot = LimitPlot::new(&tree, &signal, 2, DEFAULT_LUMI).unwrap();

        assert_eq!(
            legend_entries(&plot),
            [
                (LEGEND_HEADER, None),
                ("Theoretical", Some(Curve::Theory)),
                ("Observed", Some(Curve::Observed)),
                ("Median expected", Some(Curve::Median)),
                ("68% expected", Some(Curve::OneSigma)),
                ("95% expected", Some(Curve::TwoSigma)),
            ]
        );
    }

    #[test]
    fn strokes() {
        assert_eq!(stroke(Curve::TwoSigma), Stroke::Fill);
        assert_eq!(stroke(Curve::OneSigma), Stroke::Fill);
        assert_eq!(stroke(Curve::Median), Stroke::Dashed);
        assert_eq!(stroke(Curve::Observed), Stroke::Markers);
        assert_eq!(stroke(Curve::Theory), Stroke::Solid);
    }

    #[test]
    fn plain_text_labels() {
        assert_eq!(
            plain_text(r"$\tilde{t} \rightarrow t \tilde{\chi}_{1}^{0}$"),
            "t\u{303} \u{2192} t \u{3c7}\u{303}\u{2070}\u{2081}"
        );
        assert_eq!(plain_text(r"$m_{\tilde{g}}$ [GeV]"), "mg\u{303} [GeV]");
        assert_eq!(
            plain_text("35.9 fb$^{-1}$ (13 TeV)"),
            "35.9 fb\u{207b}\u{b9} (13 TeV)"
        );
    }
}
