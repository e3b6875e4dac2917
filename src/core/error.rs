use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaleError {
    #[error("Unknown zone: {0}")]
    UnknownZone(String),

    #[error("Unknown use type: {0}")]
    UnknownUseType(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error("Zone lookup error: {0}")]
    Lookup(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ScaleError>;
