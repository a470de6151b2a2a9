//! Error types for the ListenBrainz client.

use thiserror::Error;

use crate::models::ListenType;

/// Main error type for all ListenBrainz operations.
///
/// Validation variants are raised locally before any request is sent.
/// [`ListenBrainzError::Api`] covers every non-2xx response from the service.
#[derive(Debug, Error)]
pub enum ListenBrainzError {
    /// A submission was attempted without an auth token set on the client.
    #[error("An auth token is required to submit listens")]
    AuthTokenRequired,

    /// The service reported the supplied token as invalid.
    #[error("Invalid auth token")]
    InvalidAuthToken,

    /// No listens were supplied for submission.
    #[error("Cannot submit an empty list of listens")]
    EmptyPayload,

    /// Listen type is not one of `single`, `playing_now`, `import`.
    #[error("Unknown listen type: {0}")]
    UnknownListenType(String),

    /// More than one listen for a `single` or `playing_now` submission.
    #[error("Listen type {listen_type} accepts exactly one listen, got {count}")]
    TooManyListens { listen_type: ListenType, count: usize },

    /// A playing-now listen carried a `listened_at` timestamp.
    #[error("Playing-now listens must not have a listened_at timestamp")]
    ListenedAtInPlayingNow,

    /// Recommendation artist type is not `top` or `similar`.
    #[error("Invalid artist type: {0} (expected \"top\" or \"similar\")")]
    InvalidArtistType(String),

    /// The service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid base URL in the client configuration.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl ListenBrainzError {
    /// Whether this error was raised by local validation, before any request.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::AuthTokenRequired
                | Self::EmptyPayload
                | Self::UnknownListenType(_)
                | Self::TooManyListens { .. }
                | Self::ListenedAtInPlayingNow
                | Self::InvalidArtistType(_)
        )
    }

    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RequestError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for ListenBrainz operations.
pub type Result<T> = std::result::Result<T, ListenBrainzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_flagged() {
        assert!(ListenBrainzError::EmptyPayload.is_validation());
        assert!(ListenBrainzError::InvalidArtistType("bad".into()).is_validation());
        assert!(!ListenBrainzError::InvalidAuthToken.is_validation());
        assert!(!ListenBrainzError::Api {
            status: 500,
            message: "boom".into()
        }
        .is_validation());
    }

    #[test]
    fn test_api_error_display_and_status() {
        let err = ListenBrainzError::Api {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "API error (401): Unauthorized");
    }

    #[test]
    fn test_json_failure_converts_to_parse_error() {
        let err: ListenBrainzError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, ListenBrainzError::ParseError(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_too_many_listens_display() {
        let err = ListenBrainzError::TooManyListens {
            listen_type: ListenType::PlayingNow,
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "Listen type playing_now accepts exactly one listen, got 2"
        );
    }
}
