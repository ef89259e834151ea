use thiserror::Error;

#[derive(Debug, Error)]
pub enum HubError {
    #[error("signaling hub is no longer running")]
    Closed,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid bind address '{0}'")]
    InvalidAddress(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}
