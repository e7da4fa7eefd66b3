//! Validation request and result types.

use indexmap::{IndexMap, IndexSet};

use crate::IssuerResult;
use crate::error::IssuerError;
use crate::types::{ApiResource, ApiScope, Client, IdentityResource};

// =============================================================================
// Request
// =============================================================================

/// A client's request for a list of scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceValidationRequest {
    /// The requesting client.
    pub client: Client,

    /// Requested scope identifiers, in request order. May contain duplicates.
    pub scopes: Vec<String>,
}

impl ResourceValidationRequest {
    /// Creates a request from a list of scope identifiers.
    #[must_use]
    pub fn new(client: Client, scopes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            client,
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a request from a space-delimited `scope` parameter.
    #[must_use]
    pub fn from_scope_param(client: Client, scope: &str) -> Self {
        Self::new(client, scope.split_whitespace())
    }
}

// =============================================================================
// Validated Resources
// =============================================================================

/// The resolved, deduplicated resources a request maps to.
///
/// Entries are keyed by name and kept in resolution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedResources {
    /// Identity resources.
    pub identity_resources: IndexMap<String, IdentityResource>,
    /// API resources.
    pub api_resources: IndexMap<String, ApiResource>,
    /// API scopes.
    pub api_scopes: IndexMap<String, ApiScope>,
}

impl ValidatedResources {
    /// Adds an identity resource unless one with the same name is present.
    pub fn add_identity_resource(&mut self, resource: IdentityResource) {
        self.identity_resources
            .entry(resource.name.clone())
            .or_insert(resource);
    }

    /// Adds an API resource unless one with the same name is present.
    pub fn add_api_resource(&mut self, resource: ApiResource) {
        self.api_resources
            .entry(resource.name.clone())
            .or_insert(resource);
    }

    /// Adds an API scope unless one with the same name is present.
    pub fn add_api_scope(&mut self, scope: ApiScope) {
        self.api_scopes.entry(scope.name.clone()).or_insert(scope);
    }

    /// Returns `true` if nothing was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identity_resources.is_empty()
            && self.api_resources.is_empty()
            && self.api_scopes.is_empty()
    }

    /// Returns the scope names backing these resources (identity resources,
    /// then API scopes).
    #[must_use]
    pub fn scope_names(&self) -> IndexSet<String> {
        self.identity_resources
            .keys()
            .chain(self.api_scopes.keys())
            .cloned()
            .collect()
    }

    /// Returns the API resource names, the audience candidates of an access token.
    #[must_use]
    pub fn api_resource_names(&self) -> Vec<String> {
        self.api_resources.keys().cloned().collect()
    }

    /// Returns the distinct claim types released by all resolved resources.
    #[must_use]
    pub fn user_claim_types(&self) -> IndexSet<String> {
        let identity = self
            .identity_resources
            .values()
            .flat_map(|r| r.user_claims.iter());
        let api = self
            .api_resources
            .values()
            .flat_map(|r| r.user_claims.iter());
        let scopes = self.api_scopes.values().flat_map(|s| s.user_claims.iter());
        identity.chain(api).chain(scopes).cloned().collect()
    }
}

// =============================================================================
// Result
// =============================================================================

/// Outcome of validating one request.
///
/// `resources` and `raw_scope_values` are populated even when validation
/// fails, for diagnostics. They must not be treated as authorized unless
/// [`succeeded`](Self::succeeded) is `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceValidationResult {
    invalid_scopes: IndexSet<String>,
    resources: ValidatedResources,
    raw_scope_values: IndexSet<String>,
}

impl ResourceValidationResult {
    /// Creates a result. Success is derived from `invalid_scopes`.
    #[must_use]
    pub fn new(
        invalid_scopes: IndexSet<String>,
        resources: ValidatedResources,
        raw_scope_values: IndexSet<String>,
    ) -> Self {
        Self {
            invalid_scopes,
            resources,
            raw_scope_values,
        }
    }

    /// Returns `true` if no requested scope was invalid.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.invalid_scopes.is_empty()
    }

    /// Requested scopes that were unknown, disabled, or not allowed for the client.
    #[must_use]
    pub fn invalid_scopes(&self) -> &IndexSet<String> {
        &self.invalid_scopes
    }

    /// The resolved resources.
    #[must_use]
    pub fn resources(&self) -> &ValidatedResources {
        &self.resources
    }

    /// The validated API scope values actually requested, deduplicated.
    #[must_use]
    pub fn raw_scope_values(&self) -> &IndexSet<String> {
        &self.raw_scope_values
    }

    /// Returns the resources if validation succeeded.
    ///
    /// # Errors
    ///
    /// Returns `IssuerError::InvalidScope` listing the invalid scopes otherwise.
    pub fn into_succeeded(self) -> IssuerResult<ValidatedResources> {
        if self.succeeded() {
            Ok(self.resources)
        } else {
            Err(IssuerError::invalid_scope(self.invalid_scopes))
        }
    }
}
