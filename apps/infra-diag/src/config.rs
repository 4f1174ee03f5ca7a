//! Agent configuration discovery and plugin directory resolution.
//!
//! The agent's own `newrelic-infra.yml` is read only to find where its
//! integration configs live. It is decoded leniently: unknown keys are the
//! agent's business, not ours.
//!
//! Discovery order when `--config` is absent:
//! - `./newrelic-infra.yml`
//! - `/etc/newrelic-infra.yml`
//!
//! Plugin directory precedence: CLI path > `NRIA_PLUGIN_DIR` > `plugin_dir`
//! from the file > `/etc/newrelic-infra/integrations.d`.

use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_CONFIG_LOCATIONS: &[&str] = &["newrelic-infra.yml", "/etc/newrelic-infra.yml"];
pub const DEFAULT_PLUGIN_DIR: &str = "/etc/newrelic-infra/integrations.d";
pub const PLUGIN_DIR_ENV: &str = "NRIA_PLUGIN_DIR";

#[derive(Debug, Default, Deserialize, Clone)]
/// Subset of the agent configuration this tool consumes.
pub struct AgentConfig {
    pub plugin_dir: Option<String>,
    pub verbose: Option<u8>,
}

#[derive(Debug, Clone)]
/// Agent configuration plus where it came from.
pub struct LoadedConfig {
    pub config: AgentConfig,
    pub source: Option<PathBuf>,
}

impl AgentConfig {
    pub fn verbose(&self) -> bool {
        self.verbose.unwrap_or(0) > 0
    }
}

/// Load the agent configuration.
///
/// An explicit `path` must exist. Without one the default locations are
/// probed and, when none exists, defaults are returned.
pub fn load_agent_config(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    if let Some(p) = path {
        if !p.exists() {
            return Err(ConfigError::NotFound {
                path: p.to_path_buf(),
            });
        }
        return read_config(p).map(|config| LoadedConfig {
            config,
            source: Some(p.to_path_buf()),
        });
    }
    for loc in DEFAULT_CONFIG_LOCATIONS {
        let p = Path::new(loc);
        if p.is_file() {
            debug!(path = %p.display(), "Found agent config");
            return read_config(p).map(|config| LoadedConfig {
                config,
                source: Some(p.to_path_buf()),
            });
        }
    }
    info!("No agent config file found; using defaults");
    Ok(LoadedConfig {
        config: AgentConfig::default(),
        source: None,
    })
}

fn read_config(path: &Path) -> Result<AgentConfig, ConfigError> {
    let bytes = fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(AgentConfig::default());
    }
    serde_yaml::from_slice(&bytes).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the directory (or file) to validate.
pub fn resolve_plugin_dir(
    cli_path: Option<&str>,
    env_dir: Option<&str>,
    cfg: &AgentConfig,
) -> PathBuf {
    cli_path
        .filter(|s| !s.is_empty())
        .or(env_dir.filter(|s| !s.is_empty()))
        .or(cfg.plugin_dir.as_deref().filter(|s| !s.is_empty()))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PLUGIN_DIR))
}
