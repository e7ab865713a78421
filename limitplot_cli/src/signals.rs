use super::helpers;
use super::{GlobalConfiguration, Subcommand};
use anyhow::Result;
use clap::Parser;
use prettytable::row;
use std::process::ExitCode;

/// Lists the available signal models.
#[derive(Parser)]
pub struct Opts {
    /// Show the theoretical cross sections of each mass.
    #[arg(long, short)]
    cross_sections: bool,
}

impl Subcommand for Opts {
    fn run(&self, cfg: &GlobalConfiguration) -> Result<ExitCode> {
        let registry = helpers::registry(cfg)?;
        let mut table = helpers::create_table();

        if self.cross_sections {
            table.set_titles(row![c => "name", "mass", "xsec"]);

            for signal in registry.iter() {
                for (mass, xsec) in signal.points() {
                    table.add_row(row![
                        signal.name,
                        r->format!("{mass}"),
                        r->format!("{xsec:e}")
                    ]);
                }
            }
        } else {
            table.set_titles(row![c => "name", "masses", "points", "process"]);

            for signal in registry.iter() {
                let first = signal.masses.first().copied().unwrap_or_default();
                let last = signal.masses.last().copied().unwrap_or_default();

                table.add_row(row![
                    signal.name,
                    r->format!("{first}-{last}"),
                    r->signal.masses.len(),
                    signal.process
                ]);
            }
        }

        table.printstd();

        Ok(ExitCode::SUCCESS)
    }
}
