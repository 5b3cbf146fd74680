//! Nethys Oracle - Pathfinder 2e reference lookups
//!
//! Core library that queries the Archives of Nethys search index and renders
//! the best match for a spell, item, feat, or weapon as a chat embed record.

pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
