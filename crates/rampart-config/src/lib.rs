//! Configuration for the Rampart client.
//!
//! Settings persist to disk as RON files and can be overridden on the
//! command line via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, InputConfig, NetworkConfig, PlayerConfig, default_config_dir};
pub use error::ConfigError;
