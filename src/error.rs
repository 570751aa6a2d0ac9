//! Error types for fetching, summarizing and configuration loading.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while resolving a source or fetching its titles.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No registered matcher accepts the URL.
    #[error("Unsupported URL: {url}")]
    UnsupportedSource { url: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },

    #[error("malformed feed: {0}")]
    Feed(#[from] quick_xml::DeError),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the chat-completion call.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api error {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("completion contained no message")]
    EmptyResponse,
}

/// Errors raised while loading the YAML configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_source_message() {
        let err = FetchError::UnsupportedSource {
            url: "https://example.com/blog".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported URL: https://example.com/blog");
    }

    #[test]
    fn test_status_message() {
        let err = FetchError::Status {
            url: "https://note.com/u/rss".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(err.to_string(), "https://note.com/u/rss returned 404 Not Found");
    }

    #[test]
    fn test_api_error_message() {
        let err = SummarizeError::Api {
            status: StatusCode::BAD_REQUEST,
            message: "bad request".to_string(),
        };
        assert_eq!(err.to_string(), "api error 400 Bad Request: bad request");
    }
}
