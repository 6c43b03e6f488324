//! Run configuration.
//!
//! The optional JSON file passed with `--config` sets per-component
//! expectations and dump-mode options. Without a file every default applies.

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{ComponentConfig, DumpConfig, InspectorConfig};
