use clap::Parser;
use limitplot_cli::{Opts, Subcommand};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let opts = Opts::parse();

    match opts.subcommand.run(&opts.configuration) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
