//! Registry of the signal models that limits can be plotted for.

use super::error::{Error, Result};
use float_cmp::approx_eq;
use itertools::Itertools;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

fn default_lsp() -> String {
    r"$m_{\tilde{\chi}_{1}^{0}} = 1$ GeV".to_owned()
}

/// Theoretical cross sections and display labels of a single signal model. Labels are written
/// in TeX math notation as understood by matplotlib.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SignalConfig {
    /// Name of the signal model, for instance `T2tt`.
    pub name: String,
    /// Mass hypotheses, strictly increasing.
    pub masses: Vec<f64>,
    /// Theoretical cross section in pb for each entry of `masses`.
    pub cross_sections: Vec<f64>,
    /// Decay chain shown in the caption.
    pub process: String,
    /// Title of the x axis.
    pub x_title: String,
    /// Title of the y axis.
    pub y_title: String,
    /// Caption line with the mass of the lightest supersymmetric particle.
    #[serde(default = "default_lsp")]
    pub lsp: String,
}

impl SignalConfig {
    /// Stop-pair production, stop masses from 800 to 1200 GeV.
    #[must_use]
    pub fn t2tt() -> Self {
        Self {
            name: "T2tt".to_owned(),
            masses: vec![800.0, 900.0, 1000.0, 1100.0, 1200.0],
            cross_sections: vec![0.0283338, 0.0128895, 0.00615134, 0.00307413, 0.00159844],
            process: r"$\tilde{t} \rightarrow t \tilde{\chi}_{1}^{0}$".to_owned(),
            x_title: r"$m_{\tilde{t}}$ [GeV]".to_owned(),
            y_title: r"$\sigma(pp \rightarrow \tilde{t}\tilde{t})$ [pb]".to_owned(),
            lsp: default_lsp(),
        }
    }

    /// Gluino-pair production, gluino masses from 1700 to 2100 GeV.
    #[must_use]
    pub fn t1tttt() -> Self {
        Self {
            name: "T1tttt".to_owned(),
            masses: vec![1700.0, 1800.0, 1900.0, 2000.0, 2100.0],
            cross_sections: vec![0.00470323, 0.00276133, 0.00163547, 0.000981077, 0.000591918],
            process: r"$\tilde{g} \rightarrow t \bar{t} \tilde{\chi}_{1}^{0}$".to_owned(),
            x_title: r"$m_{\tilde{g}}$ [GeV]".to_owned(),
            y_title: r"$\sigma(pp \rightarrow \tilde{g}\tilde{g})$ [pb]".to_owned(),
            lsp: default_lsp(),
        }
    }

    /// Checks that the masses are non-empty and strictly increasing and that there is exactly
    /// one finite, positive cross section per mass.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSignal`] naming the first violated condition.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Error::InvalidSignal {
            name: self.name.clone(),
            reason,
        };

        if self.masses.is_empty() {
            return Err(invalid("no masses given".to_owned()));
        }

        if self.masses.len() != self.cross_sections.len() {
            return Err(invalid(format!(
                "{} masses but {} cross sections",
                self.masses.len(),
                self.cross_sections.len()
            )));
        }

        if let Some(mass) = self.masses.iter().find(|mass| !mass.is_finite()) {
            return Err(invalid(format!("mass {mass} is not finite")));
        }

        if let Some((lhs, rhs)) = self
            .masses
            .iter()
            .tuple_windows()
            .find(|(lhs, rhs)| lhs >= rhs)
        {
            return Err(invalid(format!(
                "masses are not strictly increasing: {lhs} is followed by {rhs}"
            )));
        }

        if let Some((mass, xsec)) = self
            .masses
            .iter()
            .zip(&self.cross_sections)
            .find(|(_, xsec)| !xsec.is_finite() || **xsec <= 0.0)
        {
            return Err(invalid(format!(
                "cross section {xsec} for mass {mass} is not positive"
            )));
        }

        Ok(())
    }

    /// Returns the theoretical cross section for `mass`, if this model has one.
    #[must_use]
    pub fn cross_section(&self, mass: f64) -> Option<f64> {
        self.masses
            .iter()
            .position(|&m| approx_eq!(f64, m, mass, ulps = 4))
            .map(|index| self.cross_sections[index])
    }

    /// Returns the pairs of mass and cross section.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.masses
            .iter()
            .copied()
            .zip(self.cross_sections.iter().copied())
    }

    /// Returns the name of the image this model's limits are plotted to.
    #[must_use]
    pub fn plot_name(&self) -> String {
        format!("plotLimit_{}", self.name)
    }
}

/// Collection of [`SignalConfig`]s, keyed by name.
#[derive(Clone, Debug, PartialEq)]
pub struct SignalRegistry {
    signals: BTreeMap<String, SignalConfig>,
}

impl Default for SignalRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SignalRegistry {
    /// Creates the registry with the built-in models `T1tttt` and `T2tt`.
    #[must_use]
    pub fn builtin() -> Self {
        let signals = [SignalConfig::t2tt(), SignalConfig::t1tttt()]
            .into_iter()
            .map(|config| (config.name.clone(), config))
            .collect();

        Self { signals }
    }

    /// Validates and adds `config`, returning the model it replaces, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`SignalConfig::validate`].
    pub fn insert(&mut self, config: SignalConfig) -> Result<Option<SignalConfig>> {
        config.validate()?;

        Ok(self.signals.insert(config.name.clone(), config))
    }

    /// Adds all models from a YAML sequence of [`SignalConfig`]s read from `reader`.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or any model is invalid. In that case no model
    /// is added.
    pub fn extend_from_yaml(&mut self, reader: impl Read) -> Result<()> {
        let configs: Vec<SignalConfig> = serde_yaml::from_reader(reader)?;

        for config in &configs {
            config.validate()?;
        }

        for config in configs {
            if let Some(old) = self.insert(config)? {
                warn!("signal model `{}` replaces an existing definition", old.name);
            }
        }

        Ok(())
    }

    /// Adds all models from the YAML file at `path`, see [`SignalRegistry::extend_from_yaml`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileOpen`] if the file can not be opened, otherwise the errors of
    /// [`SignalRegistry::extend_from_yaml`].
    pub fn extend_from_file(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|source| Error::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        self.extend_from_yaml(BufReader::new(file))
    }

    /// Looks up the model called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSignal`] if no such model is registered.
    pub fn get(&self, name: &str) -> Result<&SignalConfig> {
        self.signals.get(name).ok_or_else(|| Error::UnknownSignal {
            name: name.to_owned(),
            known: self.signals.keys().cloned().collect(),
        })
    }

    /// Returns all models, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &SignalConfig> {
        self.signals.values()
    }
}
