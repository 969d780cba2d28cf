//! MongoDB client and models for the document collections

pub mod client;
mod impl_document_store;
pub mod manager;
pub mod models;
pub mod traits;

pub use client::MongoClient;
pub use manager::ContentManager;
pub use models::*;
pub use traits::DocumentStore;

#[cfg(test)]
pub(crate) mod mock;
