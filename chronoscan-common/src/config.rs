//! Configuration loading
//!
//! Config files are resolved in priority order:
//! 1. Explicit path argument (highest priority)
//! 2. Environment variable naming a path
//! 3. Platform config directory (`~/.config/chronoscan/<module>.toml`)
//! 4. Compiled defaults (fallback)

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default configuration file path for a module on this platform
pub fn default_config_path(module: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chronoscan").join(format!("{module}.toml")))
}

/// Parse a TOML config file into `T`
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read config failed ({}): {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse config failed ({}): {}", path.display(), e)))
}

/// Resolve and load a module configuration
///
/// `env_var` names an environment variable that may carry a config file
/// path. Missing files fall through to the next tier; a file that exists
/// but fails to parse is an error (silent misconfiguration is worse than a
/// startup failure).
pub fn resolve_module_config<T: DeserializeOwned + Default>(
    module: &str,
    explicit_path: Option<&Path>,
    env_var: &str,
) -> Result<T> {
    // Tier 1: explicit path, must exist
    if let Some(path) = explicit_path {
        info!("Loading {} config from explicit path: {}", module, path.display());
        return load_toml(path);
    }

    // Tier 2: environment variable
    if let Ok(path) = std::env::var(env_var) {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading {} config from {}: {}", module, env_var, path.display());
            return load_toml(&path);
        }
        warn!(
            "{} points at a missing config file ({}), falling back to defaults",
            env_var,
            path.display()
        );
    }

    // Tier 3: platform config directory
    if let Some(path) = default_config_path(module) {
        if path.exists() {
            info!("Loading {} config from {}", module, path.display());
            return load_toml(&path);
        }
    }

    // Tier 4: compiled defaults
    info!("No config file found for {}, using compiled defaults", module);
    Ok(T::default())
}
