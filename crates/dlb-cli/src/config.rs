//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`:
//!
//! ```yaml
//! catalog: data/catalog.yaml   # relative to this file
//! login_delay_ms: 0
//! ```
//!
//! `--catalog` on the command line takes precedence over `catalog`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use serde::Deserialize;

use dlb_catalog::Catalog;
use dlb_state::AuthConfig;

/// Settings read from the config file and flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Catalog document; the built-in catalog when absent.
    pub catalog: Option<PathBuf>,
    /// Simulated login latency in milliseconds.
    pub login_delay_ms: Option<u64>,
}

impl CliConfig {
    /// Parse a config file. A relative `catalog` path is resolved against
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config: CliConfig = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        if let (Some(catalog), Some(dir)) = (config.catalog.as_mut(), path.parent()) {
            if catalog.is_relative() {
                *catalog = dir.join(&*catalog);
            }
        }
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Merge the optional config file with command-line overrides.
    pub fn resolve(config_path: Option<&Path>, catalog: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if catalog.is_some() {
            config.catalog = catalog;
        }
        Ok(config)
    }

    pub fn auth_config(&self) -> AuthConfig {
        match self.login_delay_ms {
            Some(ms) => AuthConfig {
                login_delay: Duration::from_millis(ms),
            },
            None => AuthConfig::default(),
        }
    }

    /// Load the configured catalog, or the built-in one.
    pub fn open_catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => Catalog::load(path)
                .with_context(|| format!("failed to load catalog {}", path.display())),
            None => Catalog::seeded().context("built-in catalog is invalid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_to_builtin_catalog() {
        let config = CliConfig::resolve(None, None).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.auth_config(), AuthConfig::default());
        assert!(config.open_catalog().unwrap().has_section(&"sec-1".parse().unwrap()));
    }

    #[test]
    fn relative_catalog_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dlb.yaml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "catalog: data/catalog.yaml\nlogin_delay_ms: 5").unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.catalog, Some(dir.path().join("data/catalog.yaml")));
        assert_eq!(config.auth_config().login_delay, Duration::from_millis(5));
    }

    #[test]
    fn flag_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dlb.yaml");
        std::fs::write(&path, "catalog: /srv/a.yaml\n").unwrap();
        let config = CliConfig::resolve(Some(&path), Some(PathBuf::from("/srv/b.json"))).unwrap();
        assert_eq!(config.catalog, Some(PathBuf::from("/srv/b.json")));
    }

    #[test]
    fn unknown_keys_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dlb.yaml");
        std::fs::write(&path, "catalgo: typo.yaml\n").unwrap();
        assert!(CliConfig::load(&path).is_err());
    }
}
