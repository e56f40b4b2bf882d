//! Configuration module for entity-desc.
//!
//! Handles the settings file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, DocsSettings, RouteSettings, ServerSettings, Settings, SettingsError,
    SourceKind, SourceSettings, CONFIG_ENV_VAR,
};
