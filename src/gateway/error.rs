//! Errors raised when calling the graph or document service

use thiserror::Error;

/// Failure of a single upstream call
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("{service} has no resource at {path}")]
    NotFound { service: &'static str, path: String },

    #[error("{service} returned {status} for {path}: {message}")]
    Status {
        service: &'static str,
        path: String,
        status: u16,
        message: String,
    },

    #[error("{service} is unreachable: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from {service} for {path}: {message}")]
    Decode {
        service: &'static str,
        path: String,
        message: String,
    },
}

impl UpstreamError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::NotFound { .. })
    }

    pub fn service(&self) -> &'static str {
        match self {
            UpstreamError::NotFound { service, .. }
            | UpstreamError::Status { service, .. }
            | UpstreamError::Transport { service, .. }
            | UpstreamError::Decode { service, .. } => service,
        }
    }
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Treat a 404 from a list lookup as an empty list
pub fn empty_on_not_found<T>(result: UpstreamResult<Vec<T>>) -> UpstreamResult<Vec<T>> {
    match result {
        Err(e) if e.is_not_found() => Ok(Vec::new()),
        other => other,
    }
}
