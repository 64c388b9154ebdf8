//! Core types shared by every relay crate.
//!
//! # Main types
//!
//! - [`InvocationRequest`] — body accepted by the forwarding endpoint.
//! - [`InvocationEnvelope`] — gateway-proxy-shaped event sent to the function.
//! - [`InvocationResult`] — composed success response.
//! - [`InvokeError`] — closed taxonomy of invocation failures.
//! - [`RelayConfig`] — startup configuration (file + environment).

/// Startup configuration.
pub mod config;
/// Error types.
pub mod error;
/// Request, envelope, and response types.
pub mod model;

pub use config::{CorsConfig, LambdaConfig, RelayConfig, ServerConfig};
pub use error::{InvokeError, RelayError, RelayResult};
pub use model::{
    HealthStatus, InvocationEnvelope, InvocationRequest, InvocationResult, ENVELOPE_METHOD,
    INPUT_KEY,
};
