//! Configuration module for iconsheet projects
//!
//! Provides types and parsing for `iconsheet.toml` project configuration.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
