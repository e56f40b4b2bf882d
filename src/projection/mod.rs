//! Projections of entity descriptors into output formats.
//!
//! - [`to_column_list`] - the JSON column description served over HTTP
//! - [`Projector`] - Markdown table list and full dictionary

mod columns;
mod locale;
mod markdown;

pub use columns::{to_column_list, ColumnSummary, TableDescription};
pub use locale::Locale;
pub use markdown::{physical_type, Projector};
