//! HTTP surface for entity descriptions.

#[cfg(feature = "server")]
mod server;

#[cfg(feature = "server")]
pub use server::*;
