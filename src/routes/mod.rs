//! Dynamic route discovery and one-shot registration.
//!
//! Registration is split in two phases:
//!
//! 1. [`discover`] reads the current table names and returns one
//!    [`RouteSpec`] per table. It has no side effects and can run any
//!    number of times.
//! 2. [`RouteRegistrar::register_once`] hands specs out exactly once. The
//!    registrar is owned by the composition root that builds the router.

use std::collections::HashSet;
use std::env;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, warn};

use crate::describe::MetadataReader;

/// Environment variable that enables dynamic routes.
pub const ROUTES_ENV_VAR: &str = "ENTITY_METADATA_ROUTES";

/// Prefix shared by every description route.
pub const DESC_PATH_PREFIX: &str = "/entity/desc/";

static PATH_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.$-]+$").unwrap());

/// A route that serves the description of one fixed table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    /// Route name, `entity_desc_<table>`.
    pub name: String,
    /// Route path, `/entity/desc/<table>`.
    pub path: String,
    pub table_name: String,
}

impl RouteSpec {
    pub fn for_table(table_name: &str) -> Self {
        Self {
            name: format!("entity_desc_{table_name}"),
            path: format!("{DESC_PATH_PREFIX}{table_name}"),
            table_name: table_name.to_string(),
        }
    }
}

/// One route spec per table, in source order.
///
/// A table that appears twice keeps its first spec. Tables whose names
/// cannot form a single path segment are skipped.
pub fn discover(reader: &MetadataReader) -> Vec<RouteSpec> {
    let mut seen = HashSet::new();

    reader
        .table_names()
        .into_iter()
        .filter(|table| {
            if !PATH_SEGMENT.is_match(table) {
                warn!(table = %table, "table name is not a valid path segment, no route registered");
                return false;
            }
            seen.insert(table.clone())
        })
        .map(|table| RouteSpec::for_table(&table))
        .collect()
}

/// Whether dynamic routes are switched on, by environment or by settings.
pub fn dynamic_routes_enabled(configured: bool) -> bool {
    configured || env::var_os(ROUTES_ENV_VAR).is_some()
}

/// Hands out route specs at most once.
#[derive(Debug, Default)]
pub struct RouteRegistrar {
    initialized: bool,
}

impl RouteRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns `specs` on the first call and an empty list afterwards.
    pub fn register_once(&mut self, specs: Vec<RouteSpec>) -> Vec<RouteSpec> {
        if self.initialized {
            return Vec::new();
        }

        self.initialized = true;
        info!(count = specs.len(), "registering dynamic entity routes");
        specs
    }
}
