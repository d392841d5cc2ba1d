//! Configuration source resolution for the `fuzzpid` binary.
//!
//! Precedence: the `--config` flag, then the `FUZZPID_CONFIG` environment
//! variable, then the built-in default configuration.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use fuzzpid_engine::ControllerConfig;

/// Environment variable naming a controller configuration file.
pub const CONFIG_ENV: &str = "FUZZPID_CONFIG";

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    Flag(PathBuf),
    Env(PathBuf),
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Flag(p) => write!(f, "{}", p.display()),
            ConfigSource::Env(p) => write!(f, "{} (from {CONFIG_ENV})", p.display()),
            ConfigSource::Default => write!(f, "built-in default"),
        }
    }
}

/// Pick the configuration source without touching the filesystem.
pub fn resolve_source(flag: Option<&Path>, env_value: Option<String>) -> ConfigSource {
    if let Some(path) = flag {
        return ConfigSource::Flag(path.to_path_buf());
    }
    match env_value {
        Some(v) if !v.trim().is_empty() => ConfigSource::Env(PathBuf::from(v)),
        _ => ConfigSource::Default,
    }
}

/// Resolve and load the controller configuration.
pub fn load(flag: Option<&Path>) -> anyhow::Result<(ControllerConfig, ConfigSource)> {
    let source = resolve_source(flag, std::env::var(CONFIG_ENV).ok());
    let config = load_source(&source)?;
    Ok((config, source))
}

pub(crate) fn load_source(source: &ConfigSource) -> anyhow::Result<ControllerConfig> {
    match source {
        ConfigSource::Flag(path) | ConfigSource::Env(path) => ControllerConfig::load_from(path)
            .with_context(|| format!("loading controller configuration from {source}")),
        ConfigSource::Default => Ok(ControllerConfig::default()),
    }
}
