use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Rate limited by {url}")]
    RateLimited { url: String },

    #[error("Nothing found for \"{query}\"")]
    NotFound { query: String },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse failure taxonomy used by callers deciding how to report an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TransportFailure,
    NotFound,
    ParseFailure,
    Configuration,
}

impl CollectorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CollectorError::Http(_)
            | CollectorError::Transport(_)
            | CollectorError::Status { .. }
            | CollectorError::RateLimited { .. } => ErrorKind::TransportFailure,
            CollectorError::NotFound { .. } => ErrorKind::NotFound,
            CollectorError::Json(_) | CollectorError::MissingField(_) => ErrorKind::ParseFailure,
            CollectorError::Toml(_) | CollectorError::Config(_) => ErrorKind::Configuration,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, CollectorError::RateLimited { .. })
    }

    /// Message shown to the user after a failed card search.
    pub fn user_message(&self) -> String {
        match self {
            CollectorError::NotFound { query } => format!("No cards found for \"{}\".", query),
            CollectorError::RateLimited { .. } => {
                "The card service is rate limiting requests. Wait a minute and search again, or configure an API key.".to_string()
            }
            _ => "An unknown error occurred while searching for cards.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CollectorError>;
