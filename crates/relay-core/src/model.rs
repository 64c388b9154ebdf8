use serde::{Deserialize, Serialize};

/// Key under which the caller's value is wrapped inside the envelope body.
pub const INPUT_KEY: &str = "input_value";

/// Method marker the invocation target expects in the envelope.
pub const ENVELOPE_METHOD: &str = "POST";

/// Body accepted by `POST /invoke-lambda`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Caller-supplied value, forwarded untouched.
    pub value: String,
}

/// Gateway-proxy-shaped event sent to the invocation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationEnvelope {
    /// JSON string of `{"input_value": <value>}`.
    pub body: String,
    /// Always [`ENVELOPE_METHOD`].
    #[serde(rename = "httpMethod")]
    pub http_method: String,
}

impl InvocationEnvelope {
    /// Wrap a caller value the way an API gateway proxy event would carry it.
    pub fn wrap(value: &str) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(&serde_json::json!({ INPUT_KEY: value }))?;
        Ok(Self {
            body,
            http_method: ENVELOPE_METHOD.to_string(),
        })
    }

    /// Serialized bytes sent as the invocation payload.
    pub fn to_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Parse the body back and return the wrapped value, if present.
    pub fn input_value(&self) -> Option<String> {
        let body: serde_json::Value = serde_json::from_str(&self.body).ok()?;
        body.get(INPUT_KEY)?.as_str().map(str::to_string)
    }
}

/// Successful response of `POST /invoke-lambda`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResult {
    /// Always `"success"`.
    pub status: String,
    /// Decoded payload returned by the invocation target, verbatim.
    pub lambda_response: serde_json::Value,
    /// Echo of [`InvocationRequest::value`].
    pub input_received: String,
}

impl InvocationResult {
    /// Compose the success response for `value` and the decoded payload.
    pub fn success(value: impl Into<String>, lambda_response: serde_json::Value) -> Self {
        Self {
            status: "success".to_string(),
            lambda_response,
            input_received: value.into(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always `"healthy"`.
    pub status: String,
}

impl HealthStatus {
    /// The fixed liveness marker.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let envelope = InvocationEnvelope::wrap("hello").unwrap();
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["httpMethod"], "POST");
        assert_eq!(json["body"], r#"{"input_value":"hello"}"#);
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_envelope_body_reproduces_input() {
        for value in ["", "hello", "  padded  ", "quote \" and \\ slash", "한국어 🚀", "{\"nested\":1}"] {
            let envelope = InvocationEnvelope::wrap(value).unwrap();
            assert_eq!(envelope.input_value().as_deref(), Some(value));
        }
    }

    #[test]
    fn test_payload_is_envelope_json() {
        let envelope = InvocationEnvelope::wrap("x").unwrap();
        let payload = envelope.to_payload().unwrap();
        let parsed: InvocationEnvelope = serde_json::from_slice(&payload).unwrap();
        assert_eq!(parsed, envelope);
    }

    #[test]
    fn test_result_serialization() {
        let payload = serde_json::json!({"statusCode": 200, "body": "{\"result\":\"ok\"}"});
        let result = InvocationResult::success("hello", payload.clone());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "success",
                "lambda_response": payload,
                "input_received": "hello",
            })
        );
    }

    #[test]
    fn test_request_rejects_non_string_value() {
        assert!(serde_json::from_str::<InvocationRequest>(r#"{"value": 5}"#).is_err());
        assert!(serde_json::from_str::<InvocationRequest>(r#"{}"#).is_err());
        let ok: InvocationRequest = serde_json::from_str(r#"{"value": ""}"#).unwrap();
        assert_eq!(ok.value, "");
    }
}
