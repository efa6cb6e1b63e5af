//! Configuration loading and management for the Shift Hours Engine.
//!
//! This module loads engine settings (punch ordering, negative net policy)
//! and punch sheet column names from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use shift_hours::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded configuration: {}", config.config().settings.name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ColumnConfig, EngineConfig, EngineSettings, NegativeNetPolicy, NetDurationConfig,
    OrderingConfig,
};
