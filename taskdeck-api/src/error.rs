//! Error types

/// Errors that can occur while talking to the API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend rejected the request and supplied its own message.
    #[error("{message}")]
    Api {
        /// Backend error code.
        code: i32,
        /// Human-readable message from the envelope.
        message: String,
    },

    /// The server answered 401; the stored token is no longer valid.
    #[error("Login expired")]
    SessionExpired,

    /// Network error during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not a valid envelope.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },

    /// A successful envelope arrived without the expected payload.
    #[error("Response was missing its payload")]
    MissingData,

    /// Invalid base URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    pub fn api(code: i32, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>, body: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body,
        }
    }

    /// Whether the UI should drop to the login screen.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// Message suitable for a notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::SessionExpired => "Login expired".to_string(),
            Self::Network(_) | Self::Parse { .. } | Self::MissingData | Self::InvalidUrl(_) => {
                "Something went wrong".to_string()
            }
        }
    }
}
