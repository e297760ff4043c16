use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const CONFIG_FILE: &str = "footprint.toml";
pub const DEFAULT_DB_PATH: &str = ".footprint/state.sqlite";
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Optional per-directory settings read from `footprint.toml`. A missing
/// file means defaults; a malformed file is an error, never silently
/// ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub db: Option<String>,
    pub default_currency: Option<String>,
}

impl Config {
    pub fn load(data_root: &Path) -> Result<Self, ConfigError> {
        let path = data_root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Resolve the database path: an explicit CLI/env override wins, then
    /// the config file, then the default, all relative to the data root.
    pub fn db_path(&self, data_root: &Path, override_path: Option<&str>) -> PathBuf {
        let raw = override_path
            .map(str::to_string)
            .or_else(|| self.db.clone())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let raw = PathBuf::from(raw);
        if raw.is_absolute() {
            raw
        } else {
            data_root.join(raw)
        }
    }

    pub fn currency(&self) -> &str {
        self.default_currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "cannot parse {}: {}", path.display(), source)
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use uuid::Uuid;

    use super::{Config, ConfigError, CONFIG_FILE, DEFAULT_CURRENCY, DEFAULT_DB_PATH};

    fn temp_root() -> std::path::PathBuf {
        let root = std::env::temp_dir().join(format!("footprint-config-test-{}", Uuid::now_v7()));
        std::fs::create_dir_all(&root).expect("temp root should be creatable");
        root
    }

    #[test]
    fn missing_file_yields_defaults() {
        let root = temp_root();
        let config = Config::load(&root).expect("load should succeed");
        assert_eq!(config, Config::default());
        assert_eq!(config.currency(), DEFAULT_CURRENCY);
        assert_eq!(
            config.db_path(&root, None),
            root.join(DEFAULT_DB_PATH)
        );
        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn file_values_and_overrides_are_layered() {
        let root = temp_root();
        std::fs::write(
            root.join(CONFIG_FILE),
            "db = \"ledger/custom.sqlite\"\ndefault_currency = \"USD\"\n",
        )
        .expect("config should be writable");

        let config = Config::load(&root).expect("load should succeed");
        assert_eq!(config.currency(), "USD");
        assert_eq!(
            config.db_path(&root, None),
            root.join("ledger/custom.sqlite")
        );
        // An explicit override beats the file.
        assert_eq!(
            config.db_path(&root, Some("/tmp/other.sqlite")),
            Path::new("/tmp/other.sqlite")
        );
        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let root = temp_root();
        std::fs::write(root.join(CONFIG_FILE), "db = [not toml").expect("write should succeed");
        let result = Config::load(&root);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
        let _ = std::fs::remove_dir_all(root);
    }
}
