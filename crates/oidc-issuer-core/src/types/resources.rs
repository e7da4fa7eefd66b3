//! Resource catalog domain types.
//!
//! The catalog describes what a client may ask for:
//!
//! - [`IdentityResource`] - a named bundle of user identity claims (`openid`, `profile`)
//! - [`ApiScope`] - an independently enable/disable-able unit of API access
//! - [`ApiResource`] - a protected API exposing one or more API scopes
//!
//! API resources and API scopes are related many-to-many by scope name.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::IssuerResult;
use crate::error::IssuerError;

fn default_enabled() -> bool {
    true
}

// =============================================================================
// Identity Resource
// =============================================================================

/// A named bundle of user identity claims, requested via an identity scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResource {
    /// Unique name, also the scope identifier.
    pub name: String,

    /// Human-readable display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Included in every validated request once the client may use it.
    #[serde(default)]
    pub required: bool,

    /// Disabled resources are never granted.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Claim types released when this resource is granted.
    #[serde(default)]
    pub user_claims: Vec<String>,
}

impl IdentityResource {
    /// Creates an enabled, optional identity resource.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            required: false,
            enabled: true,
            user_claims: Vec::new(),
        }
    }

    /// Marks the resource as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets whether the resource is enabled.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the claim types released with this resource.
    #[must_use]
    pub fn with_user_claims(mut self, claims: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.user_claims = claims.into_iter().map(Into::into).collect();
        self
    }
}

// =============================================================================
// API Scope
// =============================================================================

/// A scope identifier granting access to part of one or more APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiScope {
    /// Unique name, also the scope identifier.
    pub name: String,

    /// Human-readable display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Included in every validated request once the client may use it.
    #[serde(default)]
    pub required: bool,

    /// Disabled scopes are never granted.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Claim types added to access tokens carrying this scope.
    #[serde(default)]
    pub user_claims: Vec<String>,
}

impl ApiScope {
    /// Creates an enabled, optional API scope.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            required: false,
            enabled: true,
            user_claims: Vec::new(),
        }
    }

    /// Marks the scope as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets whether the scope is enabled.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the claim types added with this scope.
    #[must_use]
    pub fn with_user_claims(mut self, claims: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.user_claims = claims.into_iter().map(Into::into).collect();
        self
    }
}

// =============================================================================
// API Resource
// =============================================================================

/// A protected API.
///
/// The resource name is the audience value for tokens that reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResource {
    /// Unique name.
    pub name: String,

    /// Human-readable display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Names of the API scopes this resource exposes.
    #[serde(default)]
    pub scopes: Vec<String>,

    /// Disabled resources never contribute to a validation result.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Claim types added to access tokens for this resource.
    #[serde(default)]
    pub user_claims: Vec<String>,
}

impl ApiResource {
    /// Creates an enabled API resource exposing the given scopes.
    #[must_use]
    pub fn new(name: impl Into<String>, scopes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            scopes: scopes.into_iter().map(Into::into).collect(),
            enabled: true,
            user_claims: Vec::new(),
        }
    }

    /// Sets whether the resource is enabled.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the claim types added for this resource.
    #[must_use]
    pub fn with_user_claims(mut self, claims: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.user_claims = claims.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if this resource exposes the named scope.
    #[must_use]
    pub fn exposes(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

// =============================================================================
// Resource Catalog
// =============================================================================

/// The full set of resource definitions known to the issuer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceCatalog {
    /// Identity resources.
    pub identity_resources: Vec<IdentityResource>,
    /// API resources.
    pub api_resources: Vec<ApiResource>,
    /// API scopes.
    pub api_scopes: Vec<ApiScope>,
}

impl ResourceCatalog {
    /// Creates a catalog and checks that names are unique within each kind.
    ///
    /// # Errors
    ///
    /// Returns `IssuerError::Configuration` naming the first duplicate found.
    pub fn new(
        identity_resources: Vec<IdentityResource>,
        api_resources: Vec<ApiResource>,
        api_scopes: Vec<ApiScope>,
    ) -> IssuerResult<Self> {
        let catalog = Self {
            identity_resources,
            api_resources,
            api_scopes,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Checks that names are unique within each kind.
    ///
    /// # Errors
    ///
    /// Returns `IssuerError::Configuration` naming the first duplicate found.
    pub fn validate(&self) -> IssuerResult<()> {
        ensure_unique(
            "identity resource",
            self.identity_resources.iter().map(|r| r.name.as_str()),
        )?;
        ensure_unique(
            "API resource",
            self.api_resources.iter().map(|r| r.name.as_str()),
        )?;
        ensure_unique("API scope", self.api_scopes.iter().map(|s| s.name.as_str()))
    }

    /// Returns the enabled entries flagged `required`, plus every enabled API
    /// resource exposing a required API scope.
    #[must_use]
    pub fn required_only(&self) -> Self {
        let api_scopes: Vec<ApiScope> = self
            .api_scopes
            .iter()
            .filter(|s| s.enabled && s.required)
            .cloned()
            .collect();
        let api_resources = self
            .api_resources
            .iter()
            .filter(|r| r.enabled && api_scopes.iter().any(|s| r.exposes(&s.name)))
            .cloned()
            .collect();
        Self {
            identity_resources: self
                .identity_resources
                .iter()
                .filter(|r| r.enabled && r.required)
                .cloned()
                .collect(),
            api_resources,
            api_scopes,
        }
    }
}

fn ensure_unique<'a>(kind: &str, names: impl Iterator<Item = &'a str>) -> IssuerResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(IssuerError::configuration(format!(
                "duplicate {} name: {}",
                kind, name
            )));
        }
    }
    Ok(())
}
