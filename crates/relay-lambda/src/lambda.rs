use crate::credentials::Credentials;
use crate::invoker::Invoker;
use crate::sigv4::{self, SigningParams};
use async_trait::async_trait;
use chrono::Utc;
use relay_core::{InvocationEnvelope, InvokeError, LambdaConfig};
use reqwest::Url;
use tracing::{debug, warn};

/// Lambda `Invoke` API version segment.
const API_VERSION: &str = "2015-03-31";

const SERVICE: &str = "lambda";

/// Synchronous (`RequestResponse`) client for the AWS Lambda Invoke API.
pub struct LambdaInvoker {
    config: LambdaConfig,
    credentials: Option<Credentials>,
    http: reqwest::Client,
}

impl LambdaInvoker {
    /// Build an invoker bounded by `config.timeout_secs`.
    ///
    /// Missing credentials are accepted here; each call then fails with
    /// [`InvokeError::Envelope`].
    pub fn new(config: LambdaConfig, credentials: Option<Credentials>) -> Result<Self, InvokeError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| InvokeError::Envelope(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            config,
            credentials,
            http,
        })
    }

    /// The configuration this invoker was built with.
    pub fn config(&self) -> &LambdaConfig {
        &self.config
    }

    /// Full URL of the Invoke operation for the configured function.
    pub fn invocation_url(&self) -> Result<Url, InvokeError> {
        let raw = format!(
            "{}/{API_VERSION}/functions/{}/invocations",
            self.config.endpoint(),
            sigv4::uri_encode(&self.config.function_name)
        );
        let mut url = Url::parse(&raw)
            .map_err(|e| InvokeError::Envelope(format!("Invalid endpoint URL '{raw}': {e}")))?;
        if let Some(qualifier) = &self.config.qualifier {
            url.query_pairs_mut().append_pair("Qualifier", qualifier);
        }
        Ok(url)
    }
}

#[async_trait]
impl Invoker for LambdaInvoker {
    fn target(&self) -> &str {
        &self.config.function_name
    }

    async fn invoke(
        &self,
        envelope: &InvocationEnvelope,
    ) -> Result<serde_json::Value, InvokeError> {
        let payload = envelope.to_payload()?;
        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| InvokeError::Envelope("Unable to locate AWS credentials".to_string()))?;
        let url = self.invocation_url()?;

        let headers = [
            ("content-type", "application/json"),
            ("x-amz-invocation-type", "RequestResponse"),
        ];
        let params = SigningParams {
            credentials,
            region: &self.config.region,
            service: SERVICE,
            time: Utc::now(),
        };
        let signed = sigv4::sign(&params, "POST", &url, &headers, &payload)
            .map_err(|e| InvokeError::Envelope(format!("Failed to sign request: {e}")))?;

        debug!(function = %self.config.function_name, url = %url, "Invoking function");

        let mut request = self.http.post(url);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        for (name, value) in signed {
            request = request.header(name, value);
        }

        let resp = request.body(payload).send().await.map_err(classify)?;

        let status = resp.status();
        let function_error = resp
            .headers()
            .get("x-amz-function-error")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.bytes().await.map_err(classify)?;

        if !status.is_success() {
            return Err(InvokeError::Remote {
                status: status.as_u16(),
                message: remote_message(&body),
            });
        }

        if let Some(kind) = function_error {
            warn!(
                function = %self.config.function_name,
                function_error = %kind,
                "Function reported an error, passing its payload through"
            );
        }

        serde_json::from_slice(&body)
            .map_err(|e| InvokeError::Decode(format!("Function payload is not valid JSON: {e}")))
    }
}

fn classify(e: reqwest::Error) -> InvokeError {
    if e.is_timeout() {
        InvokeError::Timeout(e.to_string())
    } else if e.is_builder() {
        InvokeError::Envelope(e.to_string())
    } else {
        InvokeError::Transport(e.to_string())
    }
}

/// Pull the human-readable message out of an API error body.
fn remote_message(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("Message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| text.trim().to_string())
}
