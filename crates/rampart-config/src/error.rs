//! Configuration error types.

/// Errors from loading, saving, or parsing configuration files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Could not read the config file.
    #[error("could not read config file: {0}")]
    Read(#[source] std::io::Error),

    /// Could not write the config file.
    #[error("could not write config file: {0}")]
    Write(#[source] std::io::Error),

    /// The file is not valid RON.
    #[error("invalid config file: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// The config could not be serialized to RON.
    #[error("could not serialize config: {0}")]
    Serialize(#[source] ron::Error),
}
