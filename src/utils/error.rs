use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickerError {
    #[error("{message}")]
    Remote { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Selected places were already loaded for this session")]
    AlreadyLoaded,

    #[error("No place with id '{id}'")]
    PlaceNotFound { id: String },

    #[error("The remote write queue has shut down")]
    WriteQueueClosed,
}

impl PickerError {
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// Text shown to the user. Empty for remote errors that carried no message,
    /// so callers can substitute their own fallback.
    pub fn user_message(&self) -> String {
        match self {
            Self::Remote { message } => message.clone(),
            Self::Http(e) if e.is_timeout() => "The server took too long to respond".to_string(),
            Self::Http(e) if e.is_connect() => "Could not reach the server".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Remote { .. } | Self::Http(_) => {
                "Check that the backend is running and reachable, then try again"
            }
            Self::IoError(_) => "Check file permissions and that the path exists",
            Self::SerializationError(_) => "The backend returned data in an unexpected shape",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::ConfigValidationError { .. } => {
                "Fix the configuration file or command line options"
            }
            Self::AlreadyLoaded | Self::WriteQueueClosed => {
                "Start a new session to reload the selection"
            }
            Self::PlaceNotFound { .. } => "Run the `catalog` command to list valid ids",
        }
    }

    /// Whether the failure came from talking to the backend.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Remote { .. }
                | Self::Http(_)
                | Self::SerializationError(_)
                | Self::WriteQueueClosed
        )
    }
}

pub type Result<T> = std::result::Result<T, PickerError>;
