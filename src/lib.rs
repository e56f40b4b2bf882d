//! # entity-desc
//!
//! Describes entity-to-table mappings as JSON over HTTP and as Markdown
//! documentation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    MetadataSource                        │
//! │     (in-memory, TOML mapping file, SQLite catalog)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [describe]
//! ┌─────────────────────────────────────────────────────────┐
//! │              MetadataReader → EntityDescriptor           │
//! └─────────────────────────────────────────────────────────┘
//!              │                               │
//!              ▼ [projection]                  ▼ [routes]
//! ┌───────────────────────────┐   ┌─────────────────────────┐
//! │ JSON column list/Markdown │   │ RouteSpec per table     │
//! └───────────────────────────┘   └─────────────────────────┘
//!              │                               │
//!              ▼                               ▼
//!          CLI output              axum router (web)
//! ```

pub mod config;
pub mod describe;
pub mod metadata;
pub mod projection;
pub mod routes;

#[cfg(feature = "server")]
pub mod web;

pub use describe::{EntityDescriptor, LookupError, MetadataReader};
pub use metadata::{ClassMetadata, MetadataSource};
pub use projection::{Locale, Projector};
