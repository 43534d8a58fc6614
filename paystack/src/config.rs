//! Client configuration.
//!
//! Configuration is resolved once at startup into an immutable
//! [`PaystackConfig`] and passed into the client at construction; nothing
//! reads the environment at call time.
//!
//! # Environment Variables
//!
//! - `PAYSTACK_SECRET_KEY` — Secret API key (required)
//! - `PAYSTACK_ENVIRONMENT` — `test` or `live` (default: `test`)
//! - `PAYSTACK_BASE_URL` — API base URL (default: `https://api.paystack.co`)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DEFAULT_BASE_URL;

/// Errors raised while resolving configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// `PAYSTACK_SECRET_KEY` is absent or empty. Startup-fatal.
    #[error("PAYSTACK_SECRET_KEY is not set")]
    MissingSecretKey,

    /// `PAYSTACK_ENVIRONMENT` is neither `test` nor `live`.
    #[error("invalid PAYSTACK_ENVIRONMENT {0:?}: expected \"test\" or \"live\"")]
    InvalidEnvironment(String),
}

/// Target Paystack environment, distinguished by credential.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Test-mode keys (`sk_test_...`).
    #[default]
    Test,
    /// Live-mode keys (`sk_live_...`).
    Live,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Test => f.write_str("test"),
            Self::Live => f.write_str("live"),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test" => Ok(Self::Test),
            "live" => Ok(Self::Live),
            other => Err(ConfigError::InvalidEnvironment(other.to_owned())),
        }
    }
}

/// Immutable client configuration.
///
/// The secret key is never logged: the [`fmt::Debug`] impl redacts it.
#[derive(Clone)]
pub struct PaystackConfig {
    /// Secret API key used for bearer authentication.
    pub secret_key: String,
    /// Target environment.
    pub environment: Environment,
    /// API base URL.
    pub base_url: String,
}

impl fmt::Debug for PaystackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaystackConfig")
            .field("secret_key", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PaystackConfig {
    /// Creates a configuration with the given secret key and defaults
    /// for everything else.
    #[must_use]
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            environment: Environment::default(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    /// Sets the target environment.
    #[must_use]
    pub const fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolves configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSecretKey`] if `PAYSTACK_SECRET_KEY`
    /// is absent or empty, and [`ConfigError::InvalidEnvironment`] if
    /// `PAYSTACK_ENVIRONMENT` is set to an unrecognized value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret_key = std::env::var("PAYSTACK_SECRET_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingSecretKey)?;

        let environment = match std::env::var("PAYSTACK_ENVIRONMENT") {
            Ok(value) => value.parse()?,
            Err(_) => Environment::default(),
        };

        let base_url =
            std::env::var("PAYSTACK_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());

        Ok(Self {
            secret_key,
            environment,
            base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_known_values() {
        assert_eq!("test".parse::<Environment>().unwrap(), Environment::Test);
        assert_eq!("live".parse::<Environment>().unwrap(), Environment::Live);
        assert!(matches!(
            "staging".parse::<Environment>(),
            Err(ConfigError::InvalidEnvironment(v)) if v == "staging"
        ));
    }

    #[test]
    fn debug_redacts_secret_key() {
        let config = PaystackConfig::new("sk_test_supersecret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("supersecret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn builder_overrides_apply() {
        let config = PaystackConfig::new("sk_live_x")
            .with_environment(Environment::Live)
            .with_base_url("https://proxy.internal/paystack");
        assert_eq!(config.environment, Environment::Live);
        assert_eq!(config.base_url, "https://proxy.internal/paystack");
    }
}
