//! Configuration module for Shelf-Value
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section has defaults, so a run without a configuration file values
//! the public demo catalogue.
//!
//! # Example
//!
//! ```no_run
//! use shelf_value::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("shelf-value.toml")).unwrap();
//! println!("Starting from: {}", config.catalogue.start_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CatalogueConfig, Config, HttpConfig, LoggingConfig, RetryConfig, DEFAULT_START_URL,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
pub use validation::validate;
