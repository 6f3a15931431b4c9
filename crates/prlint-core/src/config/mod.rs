//! Configuration parsing and merging.
//!
//! A repository configures the gate with a small YAML/JSON file. Every key is
//! optional; present keys override the built-in defaults one by one and unknown
//! keys are ignored.

mod parser;

pub use parser::{
    CheckLogic, ConfigError, ConfigOverride, Configuration, DEFAULT_CONFIG_PATH, DEFAULT_PROJECT,
};
