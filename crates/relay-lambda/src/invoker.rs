use async_trait::async_trait;
use relay_core::{InvocationEnvelope, InvokeError};

/// A named external function that can be called synchronously.
///
/// The gateway only ever talks to this trait, so tests can swap the real
/// Lambda client for an in-process fake.
///
/// To add a new target:
/// 1. Implement `Invoker` for your struct
/// 2. Hand it to `GatewayServer::build` as an `Arc<dyn Invoker>`
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Identifier of the invocation target, for logging.
    fn target(&self) -> &str;

    /// Send the envelope and wait for the decoded response payload.
    async fn invoke(&self, envelope: &InvocationEnvelope)
        -> Result<serde_json::Value, InvokeError>;
}
