use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymsgError {
    #[error("Load error: {message}")]
    Load { message: String },

    #[error("Parsing error: {message}")]
    Parsing { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unknown root element: {name}")]
    UnknownRoot { name: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PaymsgError {
    pub fn load(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
        }
    }

    pub fn parsing(message: impl Into<String>) -> Self {
        Self::Parsing {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PaymsgError>;
