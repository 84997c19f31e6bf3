use thiserror::Error;

/// Errors produced while synthesizing a single piece of text.
#[derive(Debug, Error)]
pub enum TTSError {
    /// The request never produced a complete response (connect failure,
    /// timeout, or an error while reading the body).
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The provider answered with a non-success status.
    #[error("{status} - {body}")]
    ProviderError { status: u16, body: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<reqwest::Error> for TTSError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TTSError::RequestFailed(format!("request timed out: {err}"))
        } else {
            TTSError::RequestFailed(err.to_string())
        }
    }
}

pub type TTSResult<T> = Result<T, TTSError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = TTSError::ProviderError {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "401 - unauthorized");
    }

    #[test]
    fn test_request_failed_display() {
        let err = TTSError::RequestFailed("connection refused".to_string());
        assert_eq!(err.to_string(), "Request failed: connection refused");
    }
}
