use thiserror::Error;

/// Uniform error surfaced by every portal API call.
///
/// Callers never see a raw HTTP response: non-2xx outcomes arrive as
/// [`ApiError::Api`] carrying whatever message the server provided, and
/// transport failures keep their own variants so a timeout is never mistaken
/// for a server-side status.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request timed out after {ms} ms")]
    Timeout { ms: u64 },

    #[error("network error: {0}")]
    Network(String),

    #[error("{message}")]
    Api {
        message: String,
        code: Option<String>,
        details: Option<Vec<String>>,
        status: Option<u16>,
    },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of a normalized server error, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => *status,
            _ => None,
        }
    }

    pub fn api(message: impl Into<String>, status: u16) -> Self {
        ApiError::Api {
            message: message.into(),
            code: None,
            details: None,
            status: Some(status),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}
