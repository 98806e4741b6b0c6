use thiserror::Error;

#[derive(Error, Debug)]
pub enum DifficultyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid zone: {0}")]
    InvalidZone(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DifficultyError>;
