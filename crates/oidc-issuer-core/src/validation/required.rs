//! Required resource inclusion.
//!
//! Identity resources and API scopes flagged `required` belong in every
//! validated result, whether or not they were requested. This pass runs after
//! scope resolution so the policy can be audited on its own.

use indexmap::IndexSet;
use tracing::debug;

use crate::types::{Client, ResourceCatalog};
use crate::validation::result::ValidatedResources;

/// Unions every required catalog entry into `resources`.
///
/// An entry is added only when it is enabled, the client may use it, and it
/// was not rejected as invalid in this request. A required API scope brings
/// along every enabled API resource exposing it. Raw scope values are not
/// touched: they only ever hold scopes the client actually requested.
#[must_use]
pub fn include_required_resources(
    mut resources: ValidatedResources,
    catalog: &ResourceCatalog,
    client: &Client,
    invalid_scopes: &IndexSet<String>,
) -> ValidatedResources {
    let eligible = |name: &str, enabled: bool| {
        enabled && client.is_scope_allowed(name) && !invalid_scopes.contains(name)
    };

    for identity in &catalog.identity_resources {
        if identity.required
            && eligible(&identity.name, identity.enabled)
            && !resources.identity_resources.contains_key(&identity.name)
        {
            debug!(client_id = %client.client_id, scope = %identity.name, "Including required identity resource");
            resources.add_identity_resource(identity.clone());
        }
    }

    for scope in &catalog.api_scopes {
        if !scope.required || !eligible(&scope.name, scope.enabled) {
            continue;
        }
        if !resources.api_scopes.contains_key(&scope.name) {
            debug!(client_id = %client.client_id, scope = %scope.name, "Including required API scope");
            resources.add_api_scope(scope.clone());
        }
        for api in catalog
            .api_resources
            .iter()
            .filter(|r| r.enabled && r.exposes(&scope.name))
        {
            resources.add_api_resource(api.clone());
        }
    }

    resources
}
