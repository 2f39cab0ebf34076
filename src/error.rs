use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single call to an upstream provider.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{url} has no such record")]
    NotFound { url: String },
    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl UpstreamError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::NotFound { .. })
    }
}

/// Outcome of assembling a movie that could not produce a record.
#[derive(Debug, Error)]
pub enum MovieError {
    #[error("movie {id} not found")]
    NotFound { id: String },
    #[error("upstream lookup for movie {id} failed: {source}")]
    Upstream {
        id: String,
        #[source]
        source: UpstreamError,
    },
}

impl MovieError {
    pub fn id(&self) -> &str {
        match self {
            MovieError::NotFound { id } | MovieError::Upstream { id, .. } => id,
        }
    }
}
