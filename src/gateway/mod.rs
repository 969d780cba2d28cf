//! Gateway backends and cross-service aggregation

pub mod aggregator;
pub mod client;
pub mod error;
pub mod traits;

pub use aggregator::Aggregator;
pub use client::HttpBackend;
pub use error::{UpstreamError, UpstreamResult};
pub use traits::{DocumentBackend, GraphBackend};

#[cfg(test)]
pub(crate) mod mock;
