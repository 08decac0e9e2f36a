//! Secret handling and API key resolution.
//!
//! Keys resolve in a fixed order: the explicit option, then the
//! [`EnvironmentSource`] under [`API_KEY_ENV_VAR`], otherwise a
//! configuration error.
//!
//! ```rust
//! use rtransport::{Options, StaticEnvironment, TransportErrorKind, resolve_credentials};
//!
//! let env = StaticEnvironment::new().with_var("OPENAI_API_KEY", "sk-from-env");
//! let resolved = resolve_credentials(&Options::new(), &env).expect("env key should resolve");
//! assert_eq!(resolved.api_key.expose(), "sk-from-env");
//!
//! let error = resolve_credentials(&Options::new(), &StaticEnvironment::new())
//!     .expect_err("nothing configured");
//! assert_eq!(error.kind, TransportErrorKind::Configuration);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

use crate::{Options, TransportError};

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

#[derive(Clone, PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        // SAFETY: zero bytes are valid UTF-8 and the string is never read again.
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Read access to environment variables.
pub trait EnvironmentSource: Send + Sync + std::fmt::Debug {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentSource for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed in-memory environment, mostly useful in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    vars: HashMap<String, String>,
}

impl StaticEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvironmentSource for StaticEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Everything a backend needs to authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCredentials {
    pub api_key: SecretString,
    pub organization: Option<String>,
    pub project: Option<String>,
}

pub fn resolve_credentials(
    options: &Options,
    environment: &dyn EnvironmentSource,
) -> Result<ResolvedCredentials, TransportError> {
    let api_key = options
        .api_key
        .clone()
        .filter(|key| !key.is_empty())
        .or_else(|| {
            environment
                .var(API_KEY_ENV_VAR)
                .map(SecretString::new)
                .filter(|key| !key.is_empty())
        })
        .ok_or_else(|| {
            TransportError::configuration(format!(
                "an API key must be provided via Options::api_key or the {API_KEY_ENV_VAR} environment variable"
            ))
        })?;

    Ok(ResolvedCredentials {
        api_key,
        organization: options.organization.clone(),
        project: options.project.clone(),
    })
}
