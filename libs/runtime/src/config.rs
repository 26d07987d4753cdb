use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::paths::home_dir::resolve_home_dir;

/// Home directory name used when `console.home_dir` is left empty.
pub const DEFAULT_HOME_SUBDIR: &str = ".users_admin";

/// Console application configuration, one strongly-typed section per concern.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub users: UsersConfig,
    /// Logging configuration (optional, uses defaults if None).
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Normalized to an absolute path on load.
    #[serde(default)]
    pub home_dir: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Slot directory, relative to `console.home_dir` unless absolute.
    #[serde(default = "default_storage_dir")]
    pub dir: String,
    #[serde(default = "default_users_key")]
    pub users_key: String,
    #[serde(default = "default_session_key")]
    pub session_key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UsersConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

fn default_storage_dir() -> String {
    "data".to_string()
}

fn default_users_key() -> String {
    "users".to_string()
}

fn default_session_key() -> String {
    "user".to_string()
}

fn default_page_size() -> usize {
    10
}

fn default_max_page_size() -> usize {
    100
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            dir: default_storage_dir(),
            users_key: default_users_key(),
            session_key: default_session_key(),
        }
    }
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

/// Logging configuration - maps tracing targets to their logging settings.
/// Key "default" is the catch-all for events that match no other key.
pub type LoggingConfig = HashMap<String, Section>;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Section {
    pub console_level: String, // "info", "debug", "error", "off"
    #[serde(default)]
    pub file: String, // "logs/console.log", empty disables the file sink
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>,
    #[serde(default)]
    pub max_size_mb: Option<u64>,
}

/// Create a default logging configuration.
pub fn default_logging_config() -> LoggingConfig {
    let mut logging = HashMap::new();
    logging.insert(
        "default".to_string(),
        Section {
            console_level: "warn".to_string(),
            file: "logs/admin-console.log".to_string(),
            file_level: "debug".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(10),
        },
    );
    logging
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            storage: StorageConfig::default(),
            users: UsersConfig::default(),
            logging: Some(default_logging_config()),
        }
    }
}

impl AppConfig {
    /// Load configuration with layered loading: defaults → YAML file → environment variables.
    /// Also normalizes `console.home_dir` into an absolute path and creates the directory.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        let config_path = config_path.as_ref();
        if !config_path.is_file() {
            anyhow::bail!("config file not found: {}", config_path.display());
        }

        // Logging stays None unless YAML/ENV provides it.
        let base = AppConfig {
            logging: None,
            ..AppConfig::default()
        };

        let figment = Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Yaml::file(config_path))
            // APP__STORAGE__BACKEND=memory maps to storage.backend
            .merge(Env::prefixed("APP__").split("__"));

        let mut config: AppConfig = figment
            .extract()
            .context("Failed to extract config from figment")?;

        normalize_home_dir_inplace(&mut config.console)
            .context("Failed to resolve console.home_dir")?;

        Ok(config)
    }

    /// Load configuration from file or fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_layered(path),
            None => {
                let mut c = Self::default();
                normalize_home_dir_inplace(&mut c.console)
                    .context("Failed to resolve console.home_dir (defaults)")?;
                Ok(c)
            }
        }
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// Apply overrides from command line arguments.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if args.memory {
            self.storage.backend = StorageBackend::Memory;
        }

        let logging = self.logging.get_or_insert_with(default_logging_config);
        if let Some(default_section) = logging.get_mut("default") {
            match args.verbose {
                0 => {}
                1 => default_section.console_level = "debug".to_string(),
                _ => default_section.console_level = "trace".to_string(),
            }
        }
    }

    /// Absolute directory holding the file-backed slots.
    pub fn storage_dir(&self) -> PathBuf {
        let dir = PathBuf::from(&self.storage.dir);
        if dir.is_absolute() {
            dir
        } else {
            PathBuf::from(&self.console.home_dir).join(dir)
        }
    }
}

/// Command line arguments relevant to configuration.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<String>,
    pub print_config: bool,
    pub verbose: u8,
    pub memory: bool,
}

fn normalize_home_dir_inplace(console: &mut ConsoleConfig) -> Result<()> {
    // Empty string means "not provided".
    let opt = if console.home_dir.trim().is_empty() {
        None
    } else {
        Some(console.home_dir.clone())
    };

    let resolved: PathBuf = resolve_home_dir(opt, DEFAULT_HOME_SUBDIR, /*create*/ true)
        .context("home_dir normalization failed")?;

    console.home_dir = resolved.to_string_lossy().to_string();
    Ok(())
}
