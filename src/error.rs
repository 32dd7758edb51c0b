pub type Result<T> = std::result::Result<T, Error>;

pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error, please try again.";
pub const DEFAULT_REQUEST_ERROR_MESSAGE: &str = "Request failed.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {message}")]
    Request { status: u16, message: String },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Text shown next to the operation that failed.
    pub fn display_message(&self) -> String {
        match self {
            Error::Transport(_) => CONNECTION_ERROR_MESSAGE.to_string(),
            Error::Request { message, .. } => message.clone(),
            Error::Validation(errors) => {
                let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
                fields.sort_unstable();
                format!("Please check the following fields: {}", fields.join(", "))
            }
            Error::Json(_) | Error::Decode(_) => {
                "The server returned an unexpected response.".to_string()
            }
            Error::Config(msg) | Error::InvalidState(msg) => msg.clone(),
            Error::Io(err) => err.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Request { status, .. } => Some(*status),
            Error::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
