//! Command-line interface of `limitplot`.

#[cfg(feature = "bitmap")]
mod bitmap;
mod helpers;
mod plot;
mod read;
mod signals;

use anyhow::Result;
use clap::{Parser, ValueHint};
use enum_dispatch::enum_dispatch;
use git_version::git_version;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
pub struct GlobalConfiguration {
    /// YAML file with additional signal models.
    #[arg(long, value_hint = ValueHint::FilePath, value_name = "FILE")]
    pub signals_file: Option<PathBuf>,
}

/// A subcommand of `limitplot`.
#[enum_dispatch]
pub trait Subcommand {
    /// Runs the subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the subcommand fails.
    fn run(&self, cfg: &GlobalConfiguration) -> Result<ExitCode>;
}

#[enum_dispatch(Subcommand)]
#[derive(Parser)]
pub enum SubcommandEnum {
    Plot(plot::Opts),
    Read(read::Opts),
    Signals(signals::Opts),
}

#[derive(Parser)]
#[command(
    arg_required_else_help = true,
    author,
    about,
    disable_help_subcommand = true,
    name = "limitplot",
    version = git_version!(
        args = ["--always", "--dirty", "--long", "--tags"],
        cargo_prefix = "",
        fallback = "unknown"
    )
)]
pub struct Opts {
    #[command(flatten)]
    pub configuration: GlobalConfiguration,
    #[command(subcommand)]
    pub subcommand: SubcommandEnum,
}
