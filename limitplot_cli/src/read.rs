use super::helpers;
use super::{GlobalConfiguration, Subcommand};
use anyhow::Result;
use clap::{Parser, ValueHint};
use limitplot::limit::{MEDIAN, OBSERVED, ONE_SIGMA, TWO_SIGMA};
use limitplot::series::Series;
use log::warn;
use prettytable::{cell, row};
use std::path::PathBuf;
use std::process::ExitCode;

/// Prints the cross-section limits of a signal model for each mass.
#[derive(Parser)]
pub struct Opts {
    /// Path to the limit table [default: cards/higgsCombine_<SIGNAL>_best.csv].
    #[arg(value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,
    /// Name of the signal model.
    #[arg(long, short)]
    signal: String,
    /// Set the number of fractional digits shown for cross sections.
    #[arg(default_value_t = 4, long, value_name = "DIGITS")]
    digits: usize,
    /// Show whether the observed limit excludes each mass.
    #[arg(long, short)]
    excluded: bool,
}

impl Subcommand for Opts {
    fn run(&self, cfg: &GlobalConfiguration) -> Result<ExitCode> {
        let registry = helpers::registry(cfg)?;
        let signal = registry.get(&self.signal)?;
        let tree = helpers::read_tree(self.input.as_deref(), &self.signal)?;

        let quantiles = [
            OBSERVED,
            MEDIAN,
            TWO_SIGMA.0,
            ONE_SIGMA.0,
            ONE_SIGMA.1,
            TWO_SIGMA.1,
        ];

        let unmatched = tree
            .points()
            .iter()
            .filter(|point| !quantiles.iter().any(|&quantile| point.matches(quantile)))
            .count();

        if unmatched != 0 {
            warn!("skipping {unmatched} rows with unknown quantile tags");
        }

        let series = quantiles
            .iter()
            .map(|&quantile| Series::scaled(&tree, quantile, signal))
            .collect::<limitplot::Result<Vec<_>>>()?;

        let mut table = helpers::create_table();
        let mut titles = row![c =>
            "mass\n[GeV]", "theory\n[pb]", "observed\n[pb]", "median\n[pb]",
            "-2\u{3c3}\n[pb]", "-1\u{3c3}\n[pb]", "+1\u{3c3}\n[pb]", "+2\u{3c3}\n[pb]"
        ];

        if self.excluded {
            titles.add_cell(cell!(c->"excluded"));
        }

        table.set_titles(titles);

        for (mass, xsec) in signal.points() {
            let row = table.add_empty_row();

            row.add_cell(cell!(r->format!("{mass}")));
            row.add_cell(cell!(r->format!("{:.*e}", self.digits, xsec)));

            for series in &series {
                row.add_cell(cell!(r->series
                    .value_at(mass)
                    .map_or_else(String::new, |value| format!("{:.*e}", self.digits, value))));
            }

            if self.excluded {
                let excluded = series[0].value_at(mass).map(|observed| observed < xsec);

                row.add_cell(cell!(c->match excluded {
                    Some(true) => "yes",
                    Some(false) => "no",
                    None => "",
                }));
            }
        }

        table.printstd();

        Ok(ExitCode::SUCCESS)
    }
}
