use relay_core::{InvocationEnvelope, InvocationResult, InvokeError};
use relay_lambda::Invoker;

/// Wrap `value`, invoke the target once, and compose the success response.
///
/// No retries: the first failure is returned as-is.
pub async fn forward(invoker: &dyn Invoker, value: String) -> Result<InvocationResult, InvokeError> {
    let envelope = InvocationEnvelope::wrap(&value)?;
    let payload = invoker.invoke(&envelope).await?;
    Ok(InvocationResult::success(value, payload))
}
