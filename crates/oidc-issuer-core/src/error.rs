//! Error types for scope validation and token claims assembly.
//!
//! Invalid scopes are not errors: the resource validator reports them as data
//! in its result. The errors in this module abort the current call and are
//! never returned alongside partial output.

use std::fmt;

use crate::types::claim::ClaimValueType;

/// Errors that can occur while validating resources or building token claims.
#[derive(Debug, thiserror::Error)]
pub enum IssuerError {
    /// Claims could not be merged into a single payload.
    ///
    /// Raised when a claim type is asserted as both JSON and non-JSON, when a
    /// JSON claim has an unsupported shape, or when a JSON claim value does
    /// not parse.
    #[error("Claims merge error: {message}")]
    ClaimsMerge {
        /// Description of the merge conflict.
        message: String,
    },

    /// A claim value does not match its declared value type.
    #[error("Cannot coerce claim '{claim_type}' to {value_type}: {message}")]
    Coercion {
        /// The claim type whose value failed to coerce.
        claim_type: String,
        /// The declared value type.
        value_type: ClaimValueType,
        /// Description of the parse failure.
        message: String,
    },

    /// One or more requested scopes were rejected.
    #[error("Invalid scope: {}", scopes.join(" "))]
    InvalidScope {
        /// The rejected scope identifiers.
        scopes: Vec<String>,
    },

    /// The resource store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },

    /// The configuration or the resource catalog is invalid.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },
}

impl IssuerError {
    /// Creates a new `ClaimsMerge` error.
    #[must_use]
    pub fn claims_merge(message: impl Into<String>) -> Self {
        Self::ClaimsMerge {
            message: message.into(),
        }
    }

    /// Creates a new `Coercion` error.
    #[must_use]
    pub fn coercion(
        claim_type: impl Into<String>,
        value_type: ClaimValueType,
        message: impl Into<String>,
    ) -> Self {
        Self::Coercion {
            claim_type: claim_type.into(),
            value_type,
            message: message.into(),
        }
    }

    /// Creates a new `InvalidScope` error.
    #[must_use]
    pub fn invalid_scope(scopes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::InvalidScope {
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns `true` if the error was caused by the request (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidScope { .. })
    }

    /// Returns `true` if the error is a server-side failure (5xx category).
    ///
    /// Claim merge and coercion failures count as server errors: the claim
    /// material is produced by the issuer, not by the requesting client.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }

    /// Returns `true` if this error aborted a token claims build.
    #[must_use]
    pub fn is_claims_error(&self) -> bool {
        matches!(self, Self::ClaimsMerge { .. } | Self::Coercion { .. })
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ClaimsMerge { .. } => ErrorCategory::Token,
            Self::Coercion { .. } => ErrorCategory::Token,
            Self::InvalidScope { .. } => ErrorCategory::Authorization,
            Self::Storage { .. } => ErrorCategory::Infrastructure,
            Self::Configuration { .. } => ErrorCategory::Configuration,
        }
    }

    /// Returns the OAuth 2.0 error code for this error.
    #[must_use]
    pub fn oauth_error_code(&self) -> &'static str {
        match self {
            Self::InvalidScope { .. } => "invalid_scope",
            Self::ClaimsMerge { .. }
            | Self::Coercion { .. }
            | Self::Storage { .. }
            | Self::Configuration { .. } => "server_error",
        }
    }
}

/// Categories of issuer errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Scope/resource authorization errors.
    Authorization,
    /// Token claims assembly errors.
    Token,
    /// Resource store errors.
    Infrastructure,
    /// Configuration errors.
    Configuration,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authorization => write!(f, "authorization"),
            Self::Token => write!(f, "token"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Configuration => write!(f, "configuration"),
        }
    }
}
