//! HTTP API for the graph service, the document service and the gateway

pub mod document_handlers;
pub mod gateway_handlers;
pub mod graph_handlers;
pub mod handlers;
pub mod query;
pub mod routes;

pub use document_handlers::DocumentServiceState;
pub use gateway_handlers::GatewayState;
pub use graph_handlers::GraphServiceState;
pub use query::*;
pub use routes::{create_document_router, create_gateway_router, create_graph_router};
