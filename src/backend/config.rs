use std::fmt;

use serde::{Deserialize, Serialize};

use super::{BackendError, BackendResult};

/// Environment variables read for the project URL, first match wins.
pub const URL_ENV_KEYS: [&str; 2] = ["NEXT_PUBLIC_SUPABASE_URL", "SUPABASE_URL"];
/// Environment variables read for the anonymous API key, first match wins.
pub const ANON_KEY_ENV_KEYS: [&str; 2] = ["NEXT_PUBLIC_SUPABASE_ANON_KEY", "SUPABASE_ANON_KEY"];

/// Session handling switches of the auth client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthOptions {
    /// Refresh an expired access token on `get_session`.
    #[serde(default = "enabled")]
    pub auto_refresh_token: bool,
    /// Keep the session in the settings store across restarts.
    #[serde(default = "enabled")]
    pub persist_session: bool,
    /// Accept sessions handed back in a sign-in redirect URL.
    #[serde(default = "enabled")]
    pub detect_session_in_url: bool,
}

fn enabled() -> bool {
    true
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            auto_refresh_token: true,
            persist_session: true,
            detect_session_in_url: true,
        }
    }
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

/// Connection settings of the backend-as-a-service project.
///
/// An empty URL or key means the deployment runs without a backend and every
/// client operation reports "not configured".
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub anon_key: String,
    #[serde(default)]
    pub auth: AuthOptions,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            auth: AuthOptions::default(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field(
                "anon_key",
                &if self.anon_key.is_empty() {
                    "<empty>"
                } else {
                    "<redacted>"
                },
            )
            .field("auth", &self.auth)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

impl BackendConfig {
    #[must_use]
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim().to_owned(),
            anon_key: anon_key.into().trim().to_owned(),
            ..Self::default()
        }
    }

    /// Reads [`URL_ENV_KEYS`] and [`ANON_KEY_ENV_KEYS`] from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`BackendConfig::from_env`] over an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let first = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| lookup(key))
                .map(|value| value.trim().to_owned())
                .find(|value| !value.is_empty())
                .unwrap_or_default()
        };
        Self::new(first(&URL_ENV_KEYS), first(&ANON_KEY_ENV_KEYS))
    }

    pub fn from_json_str(input: &str) -> BackendResult<Self> {
        let mut config: Self = serde_json::from_str(input)
            .map_err(|e| BackendError::Decode(format!("invalid backend config: {e}")))?;
        config.url = config.url.trim().to_owned();
        config.anon_key = config.anon_key.trim().to_owned();
        Ok(config)
    }

    #[must_use]
    pub fn with_auth_options(mut self, auth: AuthOptions) -> Self {
        self.auth = auth;
        self
    }

    #[must_use]
    pub fn with_request_timeout_ms(mut self, request_timeout_ms: u64) -> Self {
        self.request_timeout_ms = request_timeout_ms;
        self
    }

    /// Both URL and key are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}
