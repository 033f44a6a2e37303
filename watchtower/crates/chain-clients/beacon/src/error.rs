use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum BeaconClientError {
    /// Transport level failure (timeout, refused connection, ...)
    #[error("Network error during {operation}: {message}")]
    NetworkError { operation: String, message: String },

    /// The beacon node answered with a non success status
    #[error("Beacon API error during {operation} (status {status}): {message}")]
    ApiError { operation: String, status: StatusCode, message: String },

    #[error("Failed to parse response during {operation}: {message}")]
    ParseError { operation: String, message: String },

    #[error("Failed to build URL for {operation}: {message}")]
    UrlError { operation: String, message: String },
}

impl BeaconClientError {
    pub fn from_reqwest_error(operation: impl Into<String>, source: reqwest::Error) -> Self {
        let operation = operation.into();
        match source.status() {
            Some(status) => BeaconClientError::ApiError { operation, status, message: source.to_string() },
            None if source.is_timeout() => {
                BeaconClientError::NetworkError { operation, message: "request timed out".to_string() }
            }
            None => BeaconClientError::NetworkError { operation, message: source.to_string() },
        }
    }

    pub fn parse_error(operation: impl Into<String>, message: impl Into<String>) -> Self {
        BeaconClientError::ParseError { operation: operation.into(), message: message.into() }
    }
}
