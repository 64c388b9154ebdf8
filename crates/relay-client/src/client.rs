use crate::form::FormState;
use relay_core::InvocationRequest;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Bound on one submission.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// What a single submission produced. Every failure is a variant, never an `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// Local validation failed; nothing was sent.
    Invalid(String),
    /// The backend answered 200.
    Success {
        /// Echoed input, `"N/A"` if absent.
        input_received: String,
        /// Decoded function payload, `{}` if absent.
        lambda_response: Value,
    },
    /// The backend answered with any other status.
    HttpError {
        /// Numeric status.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// The backend could not be reached.
    Unreachable,
    /// The backend did not answer within the bound.
    TimedOut,
    /// Anything else.
    Unexpected(String),
}

impl FormOutcome {
    /// True only for [`FormOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Issues form submissions against the Forwarding Service.
pub struct FormClient {
    http: reqwest::Client,
}

impl FormClient {
    /// Client bounded by [`DEFAULT_TIMEOUT`].
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Client with a custom bound.
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Validate, then POST `{"value": ...}` once. No retries.
    pub async fn submit(&self, form: &FormState) -> FormOutcome {
        if let Err(msg) = form.validate() {
            return FormOutcome::Invalid(msg.to_string());
        }

        let url = form.invoke_url();
        let body = InvocationRequest {
            value: form.value.clone(),
        };
        debug!(url = %url, "Submitting form");

        let resp = match self.http.post(&url).json(&body).send().await {
            Ok(resp) => resp,
            Err(e) => return classify(e),
        };

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return match resp.text().await {
                Ok(body) => FormOutcome::HttpError {
                    status: status.as_u16(),
                    body,
                },
                Err(e) => classify(e),
            };
        }

        let result = match resp.json::<Value>().await {
            Ok(result) => result,
            Err(e) => return classify(e),
        };
        let Some(fields) = result.as_object() else {
            warn!("Backend answered 200 with a non-object body");
            return FormOutcome::Unexpected(format!(
                "expected a JSON object from the backend, got: {result}"
            ));
        };

        FormOutcome::Success {
            input_received: fields
                .get("input_received")
                .and_then(Value::as_str)
                .unwrap_or("N/A")
                .to_string(),
            lambda_response: fields
                .get("lambda_response")
                .cloned()
                .unwrap_or_else(|| Value::Object(Default::default())),
        }
    }
}

fn classify(e: reqwest::Error) -> FormOutcome {
    warn!(error = %e, "Form submission failed");
    if e.is_connect() {
        FormOutcome::Unreachable
    } else if e.is_timeout() {
        FormOutcome::TimedOut
    } else {
        FormOutcome::Unexpected(e.to_string())
    }
}
