use super::GlobalConfiguration;
use anyhow::{bail, Result};
use limitplot::limit::LimitTree;
use limitplot::signal::SignalRegistry;
use prettytable::format::{FormatBuilder, LinePosition, LineSeparator};
use prettytable::Table;
use std::path::{Path, PathBuf};

pub(crate) fn create_table() -> Table {
    let mut table = Table::new();
    table.set_format(
        FormatBuilder::new()
            .column_separator(' ')
            .separator(LinePosition::Title, LineSeparator::new('-', '+', ' ', ' '))
            .build(),
    );
    table
}

pub(crate) fn registry(cfg: &GlobalConfiguration) -> Result<SignalRegistry> {
    let mut registry = SignalRegistry::builtin();

    if let Some(path) = &cfg.signals_file {
        registry.extend_from_file(path)?;
    }

    Ok(registry)
}

/// Path the limit table of `signal` is read from if none is given.
pub(crate) fn default_input(signal: &str) -> PathBuf {
    Path::new("cards").join(format!("higgsCombine_{signal}_best.csv"))
}

pub(crate) fn read_tree(input: Option<&Path>, signal: &str) -> Result<LimitTree> {
    let tree = match input {
        Some(path) => LimitTree::read(path)?,
        None => LimitTree::read(&default_input(signal))?,
    };

    Ok(tree)
}

pub(crate) fn parse_lumi(arg: &str) -> Result<f64> {
    let lumi: f64 = arg.parse()?;

    if lumi.is_finite() && lumi > 0.0 {
        Ok(lumi)
    } else {
        bail!("luminosity must be positive and finite, is {lumi}");
    }
}
