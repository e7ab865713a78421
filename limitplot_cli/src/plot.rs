use super::helpers;
use super::{GlobalConfiguration, Subcommand};
use anyhow::Result;
use clap::{Parser, ValueHint};
use itertools::Itertools;
use limitplot::plot::{Curve, LimitPlot, DEFAULT_LUMI, LEGEND_HEADER};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

/// Creates a matplotlib script plotting the exclusion limits of a signal model.
#[derive(Parser)]
pub struct Opts {
    /// Path to the limit table [default: cards/higgsCombine_<SIGNAL>_best.csv].
    #[arg(value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,
    /// Name of the signal model.
    #[arg(long, short)]
    signal: String,
    /// Number of expected bands to draw.
    #[arg(
        default_value_t = 0,
        long,
        short,
        value_parser = clap::value_parser!(u8).range(0..=2)
    )]
    bands: u8,
    /// Integrated luminosity in inverse picobarn.
    #[arg(default_value_t = DEFAULT_LUMI, long, value_parser = helpers::parse_lumi)]
    lumi: f64,
    /// Render the image directly instead of printing a script.
    #[cfg(feature = "bitmap")]
    #[arg(long)]
    bitmap: bool,
    /// Path of the rendered image [default: plotLimit_<SIGNAL>.png].
    #[cfg(feature = "bitmap")]
    #[arg(long, requires = "bitmap", short, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,
}

fn map_format_join(slice: &[f64]) -> String {
    slice.iter().map(|x| format!("{x}")).join(", ")
}

fn map_format_e_join(slice: &[f64]) -> String {
    slice.iter().map(|x| format!("{x:e}")).join(", ")
}

fn style(curve: Curve) -> &'static str {
    match curve {
        Curve::TwoSigma => r#"dict(color="orange", linewidth=0)"#,
        Curve::OneSigma => r#"dict(color="forestgreen", linewidth=0)"#,
        Curve::Median => r#"dict(color="blue", linestyle="dashed", linewidth=2)"#,
        Curve::Observed => r#"dict(color="black", linewidth=2, marker="o")"#,
        Curve::Theory => r#"dict(color="magenta", linewidth=2)"#,
    }
}

fn format_layers(plot: &LimitPlot) -> String {
    plot.layers()
        .iter()
        .map(|layer| {
            format!(
                "    (
        \"{}\",
        r\"{}\",
        {},
        np.array([{}]),
        np.array([{}]),
    ),\n",
                if layer.curve.is_band() { "fill" } else { "line" },
                layer.curve.label(),
                style(layer.curve),
                map_format_join(layer.series.masses()),
                map_format_e_join(layer.series.values()),
            )
        })
        .collect()
}

fn format_script(plot: &LimitPlot) -> String {
    let [process, lsp] = plot.caption();
    let signal = plot.signal();

    format!(
        r#"#!/usr/bin/env python3

import matplotlib.pyplot as plt
import numpy as np

# stylesheet for plot
stylesheet = {{
    "axes.labelsize": "large",
    "font.size": 14.0,
    "legend.borderpad": 0.0,
    "legend.fontsize": "small",
    "legend.frameon": False,
    "xtick.direction": "in",
    "xtick.minor.visible": True,
    "xtick.top": True,
    "ytick.direction": "in",
    "ytick.right": True,
}}

# global plot labels
title  = r"{lumi}"
xlabel = r"{xlabel}"
ylabel = r"{ylabel}"
caption = [
    r"{process}",
    r"{lsp}",
]

# frame of the plot
xlim = ({xmin}, {xmax})
ylim = ({ymin:e}, {ymax:e})

# (kind, label, style, x, y) in the order they are drawn, back to front
layers = [
{layers}]

# legend entries below the header, top to bottom
legend_header = r"{header}"
legend = [{legend}]

def main():
    plt.rcParams.update(stylesheet)

    figure, axis = plt.subplots(figsize=(8.0, 6.0), layout="constrained")
    axis.set_yscale("log")
    axis.set_xlim(*xlim)
    axis.set_ylim(*ylim)
    axis.set_xlabel(xlabel)
    axis.set_ylabel(ylabel)
    axis.set_title(title, loc="right", fontsize="medium")

    handles = {{}}

    for zorder, (kind, label, style, x, y) in enumerate(layers):
        if kind == "fill":
            handles[label] = axis.fill(x, y, zorder=zorder, **style)[0]
        else:
            handles[label] = axis.plot(x, y, zorder=zorder, **style)[0]

    # draw the frame on top of all layers
    axis.set_axisbelow(False)
    for spine in axis.spines.values():
        spine.set_zorder(len(layers))

    header = axis.plot([], [], " ")[0]
    axis.legend(
        [header] + [handles[label] for label in legend],
        [legend_header] + legend,
        loc="upper right",
    )
    axis.text(0.05, 0.95, "\n".join(caption), transform=axis.transAxes, va="top")

    figure.savefig("{name}.png")

if __name__ == "__main__":
    main()
"#,
        lumi = plot.lumi_label(),
        xlabel = signal.x_title,
        ylabel = signal.y_title,
        xmin = plot.x_range().min(),
        xmax = plot.x_range().max(),
        ymin = plot.y_range().min(),
        ymax = plot.y_range().max(),
        layers = format_layers(plot),
        header = LEGEND_HEADER,
        legend = plot
            .legend()
            .iter()
            .map(|curve| format!("r\"{}\"", curve.label()))
            .join(", "),
        name = plot.name(),
    )
}

impl Subcommand for Opts {
    fn run(&self, cfg: &GlobalConfiguration) -> Result<ExitCode> {
        let registry = helpers::registry(cfg)?;
        let signal = registry.get(&self.signal)?;
        let tree = helpers::read_tree(self.input.as_deref(), &self.signal)?;
        let plot = LimitPlot::new(&tree, signal, self.bands, self.lumi)?;

        #[cfg(feature = "bitmap")]
        if self.bitmap {
            let output = self
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("{}.png", plot.name())));

            super::bitmap::render(&plot, &output)?;
            info!("wrote {}", output.display());

            return Ok(ExitCode::SUCCESS);
        }

        print!("{}", format_script(&plot));
        info!("script writes {}.png", plot.name());

        Ok(ExitCode::SUCCESS)
    }
}
