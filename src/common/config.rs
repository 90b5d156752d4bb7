//! Run configuration for the call-removal transformer

use super::consts::{ENV_MUTATOR, ENV_TARGET};
use super::error::{Error, Result};
use crate::mutate::filters::MutatorKind;

/// Settings for one mutation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Which call sites are eligible
    pub mutator: MutatorKind,
    /// Occurrence index to activate; `None` only counts eligible sites
    pub target: Option<usize>,
    /// Verbose diagnostics
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mutator: MutatorKind::AllCalls,
            target: None,
            verbose: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mutator(mut self, mutator: MutatorKind) -> Self {
        self.mutator = mutator;
        self
    }

    pub fn with_target(mut self, target: usize) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Defaults overridden by `TOLMUT_MUTATOR` / `TOLMUT_TARGET` when set
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(name) = lookup(ENV_MUTATOR) {
            config.mutator = name.parse()?;
        }
        if let Some(raw) = lookup(ENV_TARGET) {
            let target = raw.trim().parse::<usize>().map_err(|e| {
                Error::config_error(format!("{}='{}' is not an occurrence index: {}", ENV_TARGET, raw, e))
            })?;
            config.target = Some(target);
        }
        log::debug!("config: mutator={} target={:?}", config.mutator, config.target);
        Ok(config)
    }
}
