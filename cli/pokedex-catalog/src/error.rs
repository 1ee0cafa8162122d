//! Error handling for catalog API operations.

use reqwest::StatusCode;
use thiserror::Error;

/// Common error type for catalog API operations.
#[derive(Debug, Error)]
pub enum CatalogClientError {
    /// The server answered with a non-success status.
    #[error("request to '{url}' failed with status {status}")]
    Network { status: StatusCode, url: String },
    /// The request could not be sent or the connection failed.
    #[error("request to '{url}' could not be completed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The response body could not be decoded.
    #[error("could not decode response from '{url}'")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid catalog url '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{0}")]
    Other(String),
}

impl CatalogClientError {
    /// The status code of a failed response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CatalogClientError::Network { status, .. } => Some(*status),
            CatalogClientError::Decode { source, .. }
            | CatalogClientError::Request { source, .. } => source.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}
