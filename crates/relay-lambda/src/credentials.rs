use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Static AWS credentials used to sign invocation requests.
///
/// Instance-role, SSO and web-identity providers are not consulted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Session token for temporary credentials.
    pub session_token: Option<String>,
}

impl Credentials {
    /// Build credentials from explicit values.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token,
        }
    }

    /// Resolve credentials from the process environment and the shared AWS files.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Credentials::from_env`] with an injectable variable lookup.
    ///
    /// Providers are tried in order, first hit wins:
    ///
    /// 1. `AWS_ACCESS_KEY_ID` + `AWS_SECRET_ACCESS_KEY` (+ `AWS_SESSION_TOKEN`)
    /// 2. the shared credentials file (`AWS_SHARED_CREDENTIALS_FILE`, else
    ///    `~/.aws/credentials`), section `[<profile>]`
    /// 3. the shared config file (`AWS_CONFIG_FILE`, else `~/.aws/config`),
    ///    section `[profile <profile>]` or `[default]`
    ///
    /// The profile is `AWS_PROFILE`, falling back to `default`. Returns `None`
    /// when no provider yields both a key id and a secret.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let (Some(access_key_id), Some(secret_access_key)) =
            (var("AWS_ACCESS_KEY_ID"), var("AWS_SECRET_ACCESS_KEY"))
        {
            debug!("Using AWS credentials from environment");
            return Some(Self {
                access_key_id,
                secret_access_key,
                session_token: var("AWS_SESSION_TOKEN"),
            });
        }

        let profile = var("AWS_PROFILE").unwrap_or_else(|| DEFAULT_PROFILE.to_string());
        let home = var("HOME").or_else(|| var("USERPROFILE")).map(PathBuf::from);

        let credentials_file = var("AWS_SHARED_CREDENTIALS_FILE")
            .map(PathBuf::from)
            .or_else(|| home.as_ref().map(|h| h.join(".aws").join("credentials")));
        if let Some(creds) = credentials_file.and_then(|path| read_profile(&path, &profile)) {
            return Some(creds);
        }

        let config_section = if profile == DEFAULT_PROFILE {
            profile
        } else {
            format!("profile {profile}")
        };
        var("AWS_CONFIG_FILE")
            .map(PathBuf::from)
            .or_else(|| home.map(|h| h.join(".aws").join("config")))
            .and_then(|path| read_profile(&path, &config_section))
    }
}

const DEFAULT_PROFILE: &str = "default";

fn read_profile(path: &Path, section: &str) -> Option<Credentials> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Shared AWS file not readable");
            return None;
        }
    };
    let creds = parse_profile(&contents, section);
    if creds.is_some() {
        debug!(path = %path.display(), section, "Using AWS credentials from shared file");
    }
    creds
}

/// Pull static keys out of one `[section]` of an INI-style AWS file.
///
/// Full-line `#` and `;` comments are skipped; keys are case-insensitive.
fn parse_profile(contents: &str, section: &str) -> Option<Credentials> {
    let mut in_section = false;
    let mut access_key_id = None;
    let mut secret_access_key = None;
    let mut session_token = None;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let header = header.split_whitespace().collect::<Vec<_>>().join(" ");
            in_section = header == section;
            continue;
        }
        if !in_section {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.trim().to_ascii_lowercase().as_str() {
            "aws_access_key_id" => access_key_id = Some(value.to_string()),
            "aws_secret_access_key" => secret_access_key = Some(value.to_string()),
            "aws_session_token" => session_token = Some(value.to_string()),
            _ => {}
        }
    }

    Some(Credentials {
        access_key_id: access_key_id?,
        secret_access_key: secret_access_key?,
        session_token,
    })
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
