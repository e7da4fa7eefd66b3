//! Issuer configuration.
//!
//! Options are passed explicitly to the validator and the claims builder;
//! nothing here is global state.
//!
//! # Example (TOML)
//!
//! ```toml
//! issuer = "https://auth.example.com"
//! default_token_lifetime = "1h"
//!
//! [token]
//! emit_scopes_as_space_delimited_string = true
//!
//! [validation]
//! include_required_resources = true
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root issuer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IssuerConfig {
    /// Issuer URL (used in the `iss` claim).
    pub issuer: String,

    /// Lifetime given to token descriptors when the caller has no
    /// client-specific value.
    #[serde(with = "humantime_serde")]
    pub default_token_lifetime: Duration,

    /// Claims builder options.
    pub token: TokenOptions,

    /// Resource validator options.
    pub validation: ValidationOptions,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            issuer: "http://localhost:8080".to_string(),
            default_token_lifetime: Duration::from_secs(3600), // 1 hour
            token: TokenOptions::default(),
            validation: ValidationOptions::default(),
        }
    }
}

/// Options for building token claims.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenOptions {
    /// Emit the `scope` claim of a JWT as one space-delimited string
    /// instead of a JSON array.
    pub emit_scopes_as_space_delimited_string: bool,
}

/// Options for resource validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Add every required identity resource and API scope the client may use
    /// to each validated result.
    pub include_required_resources: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            include_required_resources: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// An invalid configuration value was provided.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// The configuration document could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

impl IssuerConfig {
    /// Parses a TOML document and validates the result.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - The issuer URL is empty
    /// - The default token lifetime is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.issuer.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "issuer cannot be empty".to_string(),
            ));
        }

        if self.default_token_lifetime.is_zero() {
            return Err(ConfigError::InvalidValue(
                "default_token_lifetime must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns the default token lifetime in whole seconds.
    #[must_use]
    pub fn default_token_lifetime_secs(&self) -> i64 {
        i64::try_from(self.default_token_lifetime.as_secs()).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IssuerConfig::default();
        assert_eq!(config.issuer, "http://localhost:8080");
        assert_eq!(config.default_token_lifetime, Duration::from_secs(3600));
        assert!(!config.token.emit_scopes_as_space_delimited_string);
        assert!(config.validation.include_required_resources);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_issuer_fails_validation() {
        let config = IssuerConfig {
            issuer: "  ".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
        assert!(err.to_string().contains("issuer"));
    }

    #[test]
    fn test_zero_lifetime_fails_validation() {
        let config = IssuerConfig {
            default_token_lifetime: Duration::ZERO,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_token_lifetime"));
    }

    #[test]
    fn test_from_toml_str() {
        let config = IssuerConfig::from_toml_str(
            r#"
            issuer = "https://auth.example.com"
            default_token_lifetime = "15m"

            [token]
            emit_scopes_as_space_delimited_string = true
            "#,
        )
        .unwrap();

        assert_eq!(config.issuer, "https://auth.example.com");
        assert_eq!(config.default_token_lifetime_secs(), 900);
        assert!(config.token.emit_scopes_as_space_delimited_string);
        assert!(config.validation.include_required_resources);
    }

    #[test]
    fn test_from_toml_str_rejects_malformed() {
        let err = IssuerConfig::from_toml_str("issuer = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = IssuerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: IssuerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.issuer, parsed.issuer);
        assert_eq!(config.token, parsed.token);
        assert_eq!(config.validation, parsed.validation);
    }
}
