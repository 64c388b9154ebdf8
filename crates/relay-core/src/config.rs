//! Startup configuration.
//!
//! Values come from three layers, highest precedence first: environment
//! variables, an optional `relay.toml` file, and built-in fallbacks. The
//! result is built once and handed to the components that need it.

use crate::error::{RelayError, RelayResult};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Fallback region when `AWS_DEFAULT_REGION` is unset.
pub const DEFAULT_REGION: &str = "ap-northeast-2";

/// Fallback invocation target when `LAMBDA_FUNCTION_NAME` is unset.
pub const DEFAULT_FUNCTION_NAME: &str = "say1-1team-llm-report";

/// Complete relay configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelayConfig {
    /// Listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Invocation target settings.
    #[serde(default)]
    pub lambda: LambdaConfig,
    /// Cross-origin policy.
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Address the Forwarding Service binds to.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// The external function the relay forwards to.
#[derive(Debug, Clone, Deserialize)]
pub struct LambdaConfig {
    /// AWS region of the function.
    #[serde(default = "default_region")]
    pub region: String,
    /// Function name or ARN.
    #[serde(default = "default_function_name")]
    pub function_name: String,
    /// Optional version or alias.
    #[serde(default)]
    pub qualifier: Option<String>,
    /// Overrides `https://lambda.{region}.amazonaws.com` (local emulators, tests).
    #[serde(default)]
    pub endpoint_url: Option<String>,
    /// Upper bound on one outbound invocation.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LambdaConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            function_name: default_function_name(),
            qualifier: None,
            endpoint_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LambdaConfig {
    /// Base URL of the invocation API.
    pub fn endpoint(&self) -> String {
        match &self.endpoint_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://lambda.{}.amazonaws.com", self.region),
        }
    }

    /// Outbound timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Cross-origin settings for the HTTP API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the API. Empty mirrors any origin (development only).
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// True when every origin is accepted.
    pub fn is_permissive(&self) -> bool {
        self.allowed_origins.is_empty()
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_region() -> String {
    DEFAULT_REGION.to_string()
}
fn default_function_name() -> String {
    DEFAULT_FUNCTION_NAME.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl RelayConfig {
    /// Parse a TOML document.
    pub fn from_toml(s: &str) -> RelayResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load configuration from an optional file and the process environment.
    ///
    /// A missing file is tolerated only when `required` is false.
    pub fn load(path: &Path, required: bool) -> RelayResult<Self> {
        let base = match std::fs::read_to_string(path) {
            Ok(s) => Self::from_toml(&s)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                info!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
            Err(e) => {
                return Err(RelayError::Config(format!(
                    "Failed to read config file '{}': {e}",
                    path.display()
                )))
            }
        };
        base.with_env(|key| std::env::var(key).ok())
    }

    /// Overlay environment variables resolved through `lookup`.
    pub fn with_env<F>(mut self, lookup: F) -> RelayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(region) = var("AWS_DEFAULT_REGION") {
            self.lambda.region = region;
        }
        if let Some(name) = var("LAMBDA_FUNCTION_NAME") {
            self.lambda.function_name = name;
        }
        if let Some(qualifier) = var("LAMBDA_QUALIFIER") {
            self.lambda.qualifier = Some(qualifier);
        }
        if let Some(url) = var("AWS_ENDPOINT_URL_LAMBDA").or_else(|| var("AWS_ENDPOINT_URL")) {
            self.lambda.endpoint_url = Some(url);
        }
        if let Some(host) = var("RELAY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("RELAY_PORT") {
            self.server.port = port.trim().parse().map_err(|e| {
                warn!(value = %port, "Invalid RELAY_PORT");
                RelayError::Config(format!("Invalid RELAY_PORT '{port}': {e}"))
            })?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject values the relay cannot run with.
    pub fn validate(&self) -> RelayResult<()> {
        if self.lambda.function_name.trim().is_empty() {
            return Err(RelayError::Config("lambda.function_name is empty".into()));
        }
        if self.lambda.region.trim().is_empty() {
            return Err(RelayError::Config("lambda.region is empty".into()));
        }
        if self.lambda.timeout_secs == 0 {
            return Err(RelayError::Config(
                "lambda.timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
