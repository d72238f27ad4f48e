use thiserror::Error;

#[derive(Error, Debug)]
pub enum DevmateError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid priming history: {0}")]
    InvalidPriming(String),

    #[error("provider error: {0}")]
    Provider(#[from] devmate_llms::Error),

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DevmateError>;
