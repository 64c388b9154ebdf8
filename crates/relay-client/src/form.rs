/// Backend URL pre-filled in a fresh form.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Path of the forwarding endpoint, appended to the backend URL.
pub const INVOKE_PATH: &str = "/invoke-lambda";

/// Shown when the value field is blank.
pub const MISSING_VALUE: &str = "Please enter a value before invoking the Lambda function";

/// Shown when the backend URL field is blank.
pub const MISSING_URL: &str = "Please enter the backend URL";

/// The two input fields. Both persist across submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Base URL of the Forwarding Service.
    pub backend_url: String,
    /// Value to send.
    pub value: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            value: String::new(),
        }
    }
}

impl FormState {
    /// A form with the default backend URL and the given value.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Check both fields locally. The value is checked first.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.value.trim().is_empty() {
            return Err(MISSING_VALUE);
        }
        if self.backend_url.trim().is_empty() {
            return Err(MISSING_URL);
        }
        Ok(())
    }

    /// Full URL of the forwarding endpoint.
    pub fn invoke_url(&self) -> String {
        format!(
            "{}{INVOKE_PATH}",
            self.backend_url.trim().trim_end_matches('/')
        )
    }
}
