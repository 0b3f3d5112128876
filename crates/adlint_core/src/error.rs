use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to fetch article: {0}")]
    Fetch(String),

    #[error("Backend rejected credentials: {0}")]
    Auth(String),

    #[error("Backend rate limited the request: {0}")]
    RateLimited(String),

    #[error("Backend request failed: {0}")]
    Network(String),

    #[error("Backend returned no usable content: {0}")]
    EmptyReply(String),

    #[error("Invalid response format: {message}")]
    Parse {
        message: String,
        /// Original backend text, kept for diagnostics and never echoed to callers.
        raw: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn parse(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Error::Parse {
            message: message.into(),
            raw: raw.into(),
        }
    }

    /// Client-correctable failures, as opposed to backend/environment faults.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, Error::Fetch(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
