//! OAuth 2.0 client types.
//!
//! Only the parts of a client registration that scope validation needs are
//! modelled here; credentials and redirect handling live with the caller.

use serde::{Deserialize, Serialize};

fn default_restrict_scopes() -> bool {
    true
}

/// An OAuth 2.0 client as seen by the resource validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique client identifier used in OAuth flows.
    pub client_id: String,

    /// Scopes this client may request.
    #[serde(default)]
    pub allowed_scopes: Vec<String>,

    /// Whether `allowed_scopes` is enforced.
    ///
    /// When `true` (the default) a scope must be listed to be granted and an
    /// empty list grants nothing. When `false` the client has no restriction
    /// list and may request any enabled scope.
    #[serde(default = "default_restrict_scopes")]
    pub restrict_scopes: bool,
}

impl Client {
    /// Creates a client restricted to the given scopes.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        allowed_scopes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            allowed_scopes: allowed_scopes.into_iter().map(Into::into).collect(),
            restrict_scopes: true,
        }
    }

    /// Creates a client without a scope restriction list.
    #[must_use]
    pub fn unrestricted(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            allowed_scopes: Vec::new(),
            restrict_scopes: false,
        }
    }

    /// Checks if the given scope is allowed for this client.
    ///
    /// Matching is exact and case-sensitive.
    #[must_use]
    pub fn is_scope_allowed(&self, scope: &str) -> bool {
        if !self.restrict_scopes {
            return true;
        }
        self.allowed_scopes.iter().any(|allowed| allowed == scope)
    }
}
