//! Error types for Harbor API operations.

use thiserror::Error;

use crate::response::ResponseMeta;

/// Errors that can occur during Harbor API operations.
///
/// Variants that arise after a response was received carry its
/// [`ResponseMeta`], so status and headers stay inspectable on failure.
#[derive(Debug, Error)]
pub enum HarborError {
    /// The request URL could not be built from the base URL and path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connection, TLS or timeout failure before a response arrived.
    #[error("HTTP error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a status other than 200.
    #[error("request status code exception: {}", .response.status.as_u16())]
    UnexpectedStatus { response: ResponseMeta },

    /// The response body stream failed while it was being drained.
    #[error("Failed to read response body: {source}")]
    BodyRead {
        #[source]
        source: reqwest::Error,
        response: ResponseMeta,
    },

    /// The response body did not match the expected JSON shape.
    #[error("Failed to parse response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        response: ResponseMeta,
    },

    /// Query text could not be interpreted as JSON or as a query string.
    #[error("Failed to encode query: {0}")]
    Encode(String),

    /// An options value could not be serialized for query encoding.
    #[error("Failed to encode query: {0}")]
    EncodeJson(#[source] serde_json::Error),
}

impl HarborError {
    /// The response that accompanied this error, if one was received.
    pub fn response(&self) -> Option<&ResponseMeta> {
        match self {
            Self::UnexpectedStatus { response }
            | Self::BodyRead { response, .. }
            | Self::Decode { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Numeric HTTP status of the accompanying response.
    pub fn status_code(&self) -> Option<u16> {
        self.response().map(|r| r.status.as_u16())
    }
}

/// Result type alias for Harbor operations.
pub type Result<T> = core::result::Result<T, HarborError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_unexpected_status_message_contains_code() {
        let err = HarborError::UnexpectedStatus {
            response: ResponseMeta::for_status(StatusCode::NOT_FOUND),
        };

        assert!(err.to_string().contains("404"));
        assert_eq!(err.status_code(), Some(404));
        assert!(err.response().is_some());
    }

    #[test]
    fn test_encode_error_has_no_response() {
        let err = HarborError::Encode("bad escape".to_string());
        assert!(err.response().is_none());
        assert_eq!(err.status_code(), None);
    }
}
