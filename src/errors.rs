use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Sizing error: {0}")]
    SizingError(String),

    #[error("Integration error: {0}")]
    IntegrationError(String),

    #[error("Config file error: {0}")]
    ConfigFileError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] serde_yaml::Error),
}
