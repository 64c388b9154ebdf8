//! The Forwarding Service: `POST /invoke-lambda` and `GET /health`.

/// Handler error type and its HTTP rendering.
pub mod error;
/// Envelope-invoke-compose pipeline.
pub mod forward;
/// Cross-origin layer.
pub mod middleware;
/// Router construction and serving.
pub mod server;

pub use error::{GatewayError, FAILURE_LABEL};
pub use forward::forward;
pub use server::{serve, AppState, GatewayServer};
