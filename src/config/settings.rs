//! TOML-based configuration for entity-desc.
//!
//! Supports a config file (entity-desc.toml) with environment variable
//! expansion in the source path.
//!
//! Example configuration:
//! ```toml
//! [source]
//! kind = "catalog"
//! path = "${APP_ROOT}/config/entities.toml"
//! naming_strategy = "underscore"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [routes]
//! dynamic = true
//!
//! [docs]
//! locale = "en"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::describe::MetadataReader;
use crate::metadata::{
    CatalogSource, InMemorySource, MetadataSource, NamingStrategyKind, SqliteSource,
};
use crate::projection::Locale;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "ENTITY_DESC_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Where entity metadata comes from.
    pub source: SourceSettings,

    /// HTTP server settings.
    pub server: ServerSettings,

    /// Dynamic route settings.
    pub routes: RouteSettings,

    /// Markdown output settings.
    pub docs: DocsSettings,
}

/// Kind of metadata source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// No entities.
    #[default]
    Empty,
    /// TOML mapping file.
    Catalog,
    /// SQLite database file.
    Sqlite,
}

/// Metadata source configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceSettings {
    pub kind: SourceKind,

    /// Mapping file or database path (supports ${ENV_VAR} expansion).
    pub path: Option<String>,

    /// Naming strategy for fields without an explicit column.
    pub naming_strategy: NamingStrategyKind,
}

impl SourceSettings {
    /// Get the source path with environment variables expanded.
    pub fn resolved_path(&self) -> Result<Option<PathBuf>, SettingsError> {
        self.path
            .as_deref()
            .map(|p| expand_env_vars(p).map(PathBuf::from))
            .transpose()
    }

    /// Instantiate the configured source.
    pub fn build(&self) -> Result<Arc<dyn MetadataSource>, SettingsError> {
        let naming = self.naming_strategy.build();

        let source: Arc<dyn MetadataSource> = match self.kind {
            SourceKind::Empty => Arc::new(InMemorySource::empty()),
            SourceKind::Catalog => {
                Arc::new(CatalogSource::new(self.require_path()?).with_naming_strategy(naming))
            }
            SourceKind::Sqlite => {
                Arc::new(SqliteSource::new(self.require_path()?).with_naming_strategy(naming))
            }
        };

        Ok(source)
    }

    fn require_path(&self) -> Result<PathBuf, SettingsError> {
        self.resolved_path()?.ok_or_else(|| {
            SettingsError::InvalidConfig(format!(
                "source kind '{:?}' requires a path",
                self.kind
            ))
        })
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Dynamic route configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteSettings {
    /// Register one route per table. The `ENTITY_METADATA_ROUTES`
    /// environment variable also enables this.
    pub dynamic: bool,
}

/// Markdown output configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DocsSettings {
    pub locale: Locale,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `ENTITY_DESC_CONFIG`
    /// 2. `./entity-desc.toml`
    /// 3. `~/.config/entity-desc/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("entity-desc.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("entity-desc").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Build a reader over the configured source.
    pub fn reader(&self) -> Result<MetadataReader, SettingsError> {
        Ok(MetadataReader::new(self.source.build()?))
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let braced = chars.peek() == Some(&'{');
        if braced {
            chars.next();
        }

        let mut var_name = String::new();
        while let Some(&ch) = chars.peek() {
            if braced {
                chars.next();
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            } else if ch.is_alphanumeric() || ch == '_' {
                chars.next();
                var_name.push(ch);
            } else {
                break;
            }
        }

        if var_name.is_empty() && !braced {
            // Just a lone $, keep it
            result.push('$');
            continue;
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
