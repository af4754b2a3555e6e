use reqwest::StatusCode;
use thiserror::Error;

/// Why an upstream request produced no data
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API answered with a non-success status
    #[error("NWS returned {status} for {url}")]
    Status { status: StatusCode, url: String },

    /// The request never completed (DNS, connect, timeout)
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body was not valid JSON
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Problems found while checking the published entry points at startup
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("malformed resource template '{template}': {reason}")]
    MalformedTemplate { template: String, reason: String },

    #[error("resource template '{0}' registered twice")]
    DuplicateTemplate(String),

    #[error("tool '{0}' is expected but not routed")]
    MissingTool(String),

    #[error("tool '{0}' is routed but not expected")]
    UnexpectedTool(String),

    #[error("invalid resource descriptor for '{template}': {source}")]
    Descriptor {
        template: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a 2xx alerts body could not be used
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("expected a JSON object at {path}, found {found}")]
    NotAnObject { path: String, found: &'static str },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
