//! Naming strategies: logical field name to physical column name.

use inflector::cases::snakecase::to_snake_case;
use serde::{Deserialize, Serialize};

/// Maps a logical property name to a physical column name.
pub trait NamingStrategy: Send + Sync {
    fn property_to_column_name(&self, property: &str) -> String;
}

/// Column name equals the property name.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNamingStrategy;

impl NamingStrategy for DefaultNamingStrategy {
    fn property_to_column_name(&self, property: &str) -> String {
        property.to_string()
    }
}

/// `createdAt` becomes `created_at`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnderscoreNamingStrategy;

impl NamingStrategy for UnderscoreNamingStrategy {
    fn property_to_column_name(&self, property: &str) -> String {
        to_snake_case(property)
    }
}

/// Naming strategy selector used in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategyKind {
    #[default]
    Default,
    Underscore,
}

impl NamingStrategyKind {
    /// Instantiate the selected strategy.
    pub fn build(self) -> Box<dyn NamingStrategy> {
        match self {
            Self::Default => Box::new(DefaultNamingStrategy),
            Self::Underscore => Box::new(UnderscoreNamingStrategy),
        }
    }
}
