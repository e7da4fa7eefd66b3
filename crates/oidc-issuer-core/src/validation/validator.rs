//! Resource validator.
//!
//! Each requested scope is resolved in order of precedence:
//!
//! 1. an enabled identity resource the client may use
//! 2. an enabled API scope the client may use, together with every enabled
//!    API resource exposing it
//! 3. otherwise the scope is invalid
//!
//! There is no special knowledge of particular scope names. A scope such as
//! `offline_access` is valid only if the store defines a matching resource.

use std::sync::Arc;

use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::IssuerResult;
use crate::config::ValidationOptions;
use crate::storage::ResourceStore;
use crate::types::{ApiResource, ApiScope, Client, IdentityResource};
use crate::validation::required::include_required_resources;
use crate::validation::result::{
    ResourceValidationRequest, ResourceValidationResult, ValidatedResources,
};

/// Validates requested scopes against the resource store.
pub struct ResourceValidator {
    store: Arc<dyn ResourceStore>,
    options: ValidationOptions,
}

impl ResourceValidator {
    /// Creates a validator over a resource store.
    #[must_use]
    pub fn new(store: Arc<dyn ResourceStore>, options: ValidationOptions) -> Self {
        Self { store, options }
    }

    /// Returns the validator options.
    #[must_use]
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validates a request.
    ///
    /// Invalid scopes are reported in the result, never as an error. The
    /// store is queried once per lookup kind for the whole request.
    ///
    /// # Errors
    ///
    /// Returns the store's error unchanged if a lookup fails.
    pub async fn validate(
        &self,
        request: &ResourceValidationRequest,
    ) -> IssuerResult<ResourceValidationResult> {
        let requested: IndexSet<String> = request.scopes.iter().cloned().collect();
        let names: Vec<String> = requested.iter().cloned().collect();

        let identity_resources = self.store.find_identity_resources_by_name(&names).await?;
        let api_scopes = self.store.find_api_scopes_by_name(&names).await?;
        let api_resources = self.store.find_api_resources_by_scope_name(&names).await?;

        let (invalid_scopes, mut resources, raw_scope_values) = resolve_scopes(
            &request.client,
            &requested,
            &identity_resources,
            &api_scopes,
            &api_resources,
        );

        if self.options.include_required_resources {
            let required = self.store.find_required_resources().await?;
            resources =
                include_required_resources(resources, &required, &request.client, &invalid_scopes);
        }

        let result = ResourceValidationResult::new(invalid_scopes, resources, raw_scope_values);

        debug!(
            client_id = %request.client.client_id,
            succeeded = result.succeeded(),
            invalid_scopes = ?result.invalid_scopes(),
            raw_scope_values = ?result.raw_scope_values(),
            "Resource validation completed"
        );

        Ok(result)
    }
}

/// Resolves deduplicated requested scopes against looked-up resources.
///
/// Returns `(invalid_scopes, resources, raw_scope_values)`. Entries that are
/// disabled are ignored even if a store returned them. API resources that
/// expose no granted scope contribute nothing.
#[must_use]
pub fn resolve_scopes(
    client: &Client,
    requested: &IndexSet<String>,
    identity_resources: &[IdentityResource],
    api_scopes: &[ApiScope],
    api_resources: &[ApiResource],
) -> (IndexSet<String>, ValidatedResources, IndexSet<String>) {
    let mut invalid_scopes = IndexSet::new();
    let mut resources = ValidatedResources::default();
    let mut raw_scope_values = IndexSet::new();

    for scope in requested {
        let allowed = client.is_scope_allowed(scope);

        let identity = identity_resources
            .iter()
            .find(|r| r.enabled && r.name == *scope)
            .filter(|_| allowed);
        if let Some(identity) = identity {
            debug!(client_id = %client.client_id, scope = %scope, "Identity scope granted");
            resources.add_identity_resource(identity.clone());
            continue;
        }

        let api_scope = api_scopes
            .iter()
            .find(|s| s.enabled && s.name == *scope)
            .filter(|_| allowed);
        if let Some(api_scope) = api_scope {
            debug!(client_id = %client.client_id, scope = %scope, "API scope granted");
            resources.add_api_scope(api_scope.clone());
            for api in api_resources.iter().filter(|r| r.enabled && r.exposes(scope)) {
                resources.add_api_resource(api.clone());
            }
            raw_scope_values.insert(scope.clone());
            continue;
        }

        if allowed {
            warn!(
                client_id = %client.client_id,
                scope = %scope,
                "Scope not found in store or not enabled"
            );
        } else {
            warn!(
                client_id = %client.client_id,
                scope = %scope,
                "Client not allowed access to scope"
            );
        }
        invalid_scopes.insert(scope.clone());
    }

    (invalid_scopes, resources, raw_scope_values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssuerError;
    use crate::storage::InMemoryResourceStore;
    use crate::types::ResourceCatalog;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn create_test_catalog() -> ResourceCatalog {
        ResourceCatalog::new(
            vec![
                IdentityResource::new("openid").required(),
                IdentityResource::new("profile"),
                IdentityResource::new("disabled_identity").with_enabled(false),
            ],
            vec![
                ApiResource::new("resource1", ["scope1", "scope2"]),
                ApiResource::new("resource2", ["scope3"]),
                ApiResource::new("resource3", ["scope3"]),
                ApiResource::new("disabled_api", ["scope3"]).with_enabled(false),
                ApiResource::new("dangling", ["no_such_scope"]),
            ],
            vec![
                ApiScope::new("scope1").required(),
                ApiScope::new("scope2"),
                ApiScope::new("scope3"),
                ApiScope::new("disabled_scope").with_enabled(false),
            ],
        )
        .unwrap()
    }

    fn create_validator(include_required: bool) -> ResourceValidator {
        let store = InMemoryResourceStore::new(create_test_catalog()).unwrap();
        ResourceValidator::new(
            Arc::new(store),
            ValidationOptions {
                include_required_resources: include_required,
            },
        )
    }

    fn restricted_client() -> Client {
        Client::new("restricted", ["openid", "scope1"])
    }

    fn names<T>(map: &indexmap::IndexMap<String, T>) -> Vec<&str> {
        map.keys().map(String::as_str).collect()
    }

    #[tokio::test]
    async fn test_restricted_client_allowed_scopes() {
        let validator = create_validator(false);
        let request = ResourceValidationRequest::new(restricted_client(), ["openid", "scope1"]);

        let result = validator.validate(&request).await.unwrap();

        assert!(result.succeeded());
        assert!(result.invalid_scopes().is_empty());
        assert_eq!(names(&result.resources().identity_resources), vec!["openid"]);
        assert_eq!(names(&result.resources().api_resources), vec!["resource1"]);
        assert_eq!(names(&result.resources().api_scopes), vec!["scope1"]);
        assert_eq!(
            result.raw_scope_values().iter().collect::<Vec<_>>(),
            vec!["scope1"]
        );
    }

    #[tokio::test]
    async fn test_restricted_client_disallowed_scope() {
        let validator = create_validator(false);
        let request = ResourceValidationRequest::new(restricted_client(), ["openid", "scope2"]);

        let result = validator.validate(&request).await.unwrap();

        assert!(!result.succeeded());
        assert_eq!(
            result.invalid_scopes().iter().collect::<Vec<_>>(),
            vec!["scope2"]
        );
        assert!(result.resources().api_scopes.is_empty());
        assert!(result.raw_scope_values().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_scope_is_invalid_even_for_unrestricted_client() {
        let validator = create_validator(false);
        let request =
            ResourceValidationRequest::new(Client::unrestricted("internal"), ["unknown"]);

        let result = validator.validate(&request).await.unwrap();

        assert!(!result.succeeded());
        assert!(result.invalid_scopes().contains("unknown"));
    }

    #[tokio::test]
    async fn test_offline_access_without_resource_is_invalid() {
        let validator = create_validator(false);
        let client = Client::new("app", ["openid", "offline_access"]);
        let request = ResourceValidationRequest::new(client, ["openid", "offline_access"]);

        let result = validator.validate(&request).await.unwrap();

        assert!(!result.succeeded());
        assert_eq!(
            result.invalid_scopes().iter().collect::<Vec<_>>(),
            vec!["offline_access"]
        );
    }

    #[tokio::test]
    async fn test_disabled_scope_is_invalid_even_when_allowed() {
        let validator = create_validator(false);
        let client = Client::new("app", ["disabled_scope", "disabled_identity"]);
        let request =
            ResourceValidationRequest::new(client, ["disabled_scope", "disabled_identity"]);

        let result = validator.validate(&request).await.unwrap();

        assert!(!result.succeeded());
        assert!(result.invalid_scopes().contains("disabled_scope"));
        assert!(result.invalid_scopes().contains("disabled_identity"));
        assert!(result.resources().is_empty());
    }

    #[tokio::test]
    async fn test_scope_shared_by_two_api_resources() {
        let validator = create_validator(false);
        let client = Client::new("app", ["scope3"]);
        let request = ResourceValidationRequest::new(client, ["scope3", "scope3"]);

        let result = validator.validate(&request).await.unwrap();

        assert!(result.succeeded());
        assert_eq!(
            names(&result.resources().api_resources),
            vec!["resource2", "resource3"]
        );
        assert_eq!(result.raw_scope_values().len(), 1);
        assert!(result.raw_scope_values().contains("scope3"));
    }

    #[tokio::test]
    async fn test_empty_allowed_scopes_grants_nothing() {
        let validator = create_validator(false);
        let client = Client::new("empty", Vec::<String>::new());
        let request = ResourceValidationRequest::new(client, ["openid", "scope1"]);

        let result = validator.validate(&request).await.unwrap();

        assert!(!result.succeeded());
        assert_eq!(result.invalid_scopes().len(), 2);
    }

    #[tokio::test]
    async fn test_identity_scopes_not_in_raw_scope_values() {
        let validator = create_validator(false);
        let client = Client::new("app", ["openid", "profile"]);
        let request = ResourceValidationRequest::new(client, ["profile", "openid"]);

        let result = validator.validate(&request).await.unwrap();

        assert!(result.succeeded());
        assert!(result.raw_scope_values().is_empty());
        assert_eq!(
            names(&result.resources().identity_resources),
            vec!["profile", "openid"]
        );
    }

    #[tokio::test]
    async fn test_required_resources_are_included() {
        let validator = create_validator(true);
        let request = ResourceValidationRequest::new(restricted_client(), ["scope1"]);

        let result = validator.validate(&request).await.unwrap();

        assert!(result.succeeded());
        assert!(result.resources().identity_resources.contains_key("openid"));
        assert_eq!(
            result.raw_scope_values().iter().collect::<Vec<_>>(),
            vec!["scope1"]
        );
    }

    #[tokio::test]
    async fn test_invalid_and_resolved_scopes_are_disjoint() {
        let validator = create_validator(true);
        let client = Client::new("app", ["openid", "scope2", "scope3"]);
        let request = ResourceValidationRequest::new(
            client,
            ["openid", "scope1", "scope2", "scope3", "unknown", "disabled_scope"],
        );

        let result = validator.validate(&request).await.unwrap();

        let resolved = result.resources().scope_names();
        for invalid in result.invalid_scopes() {
            assert!(!resolved.contains(invalid), "{} is in both sets", invalid);
        }
        assert_eq!(result.succeeded(), result.invalid_scopes().is_empty());
        for raw in result.raw_scope_values() {
            assert!(request.scopes.contains(raw));
        }
    }

    struct CountingStore {
        inner: InMemoryResourceStore,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ResourceStore for CountingStore {
        async fn find_identity_resources_by_name(
            &self,
            names: &[String],
        ) -> IssuerResult<Vec<IdentityResource>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find_identity_resources_by_name(names).await
        }

        async fn find_api_scopes_by_name(&self, names: &[String]) -> IssuerResult<Vec<ApiScope>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find_api_scopes_by_name(names).await
        }

        async fn find_api_resources_by_scope_name(
            &self,
            names: &[String],
        ) -> IssuerResult<Vec<ApiResource>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find_api_resources_by_scope_name(names).await
        }

        async fn find_all_resources(&self) -> IssuerResult<ResourceCatalog> {
            Err(IssuerError::storage("full catalog scan not permitted"))
        }

        async fn find_required_resources(&self) -> IssuerResult<ResourceCatalog> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find_required_resources().await
        }
    }

    struct UnavailableStore;

    #[async_trait]
    impl ResourceStore for UnavailableStore {
        async fn find_identity_resources_by_name(
            &self,
            _names: &[String],
        ) -> IssuerResult<Vec<IdentityResource>> {
            Ok(Vec::new())
        }

        async fn find_api_scopes_by_name(&self, _names: &[String]) -> IssuerResult<Vec<ApiScope>> {
            Ok(Vec::new())
        }

        async fn find_api_resources_by_scope_name(
            &self,
            _names: &[String],
        ) -> IssuerResult<Vec<ApiResource>> {
            Ok(Vec::new())
        }

        async fn find_all_resources(&self) -> IssuerResult<ResourceCatalog> {
            Err(IssuerError::storage("catalog unavailable"))
        }
    }

    #[tokio::test]
    async fn test_store_is_queried_once_per_lookup_kind() {
        let store = Arc::new(CountingStore {
            inner: InMemoryResourceStore::new(create_test_catalog()).unwrap(),
            calls: AtomicUsize::new(0),
        });
        let validator = ResourceValidator::new(
            store.clone(),
            ValidationOptions {
                include_required_resources: false,
            },
        );
        let client = Client::new("app", ["openid", "profile", "scope1", "scope2"]);
        let request =
            ResourceValidationRequest::new(client, ["openid", "profile", "scope1", "scope2"]);

        let result = validator.validate(&request).await.unwrap();

        assert!(result.succeeded());
        assert_eq!(store.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_required_pass_uses_required_lookup_only() {
        let store = Arc::new(CountingStore {
            inner: InMemoryResourceStore::new(create_test_catalog()).unwrap(),
            calls: AtomicUsize::new(0),
        });
        let validator = ResourceValidator::new(store.clone(), ValidationOptions::default());
        let request = ResourceValidationRequest::new(restricted_client(), ["scope1"]);

        let result = validator.validate(&request).await.unwrap();

        assert!(result.succeeded());
        assert!(result.resources().identity_resources.contains_key("openid"));
        assert_eq!(store.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let validator =
            ResourceValidator::new(Arc::new(UnavailableStore), ValidationOptions::default());
        let request = ResourceValidationRequest::new(restricted_client(), ["openid"]);

        let err = validator.validate(&request).await.unwrap_err();
        assert!(matches!(err, IssuerError::Storage { .. }));
    }

    #[test]
    fn test_resolve_ignores_disabled_entries_returned_by_store() {
        let client = Client::unrestricted("internal");
        let requested: IndexSet<String> = ["scope1".to_string()].into_iter().collect();
        let scopes = vec![ApiScope::new("scope1").with_enabled(false)];

        let (invalid, resources, raw) = resolve_scopes(&client, &requested, &[], &scopes, &[]);

        assert!(invalid.contains("scope1"));
        assert!(resources.is_empty());
        assert!(raw.is_empty());
    }

    #[test]
    fn test_resolve_prefers_identity_resource_over_api_scope() {
        let client = Client::unrestricted("internal");
        let requested: IndexSet<String> = ["shared".to_string()].into_iter().collect();
        let identity = vec![IdentityResource::new("shared")];
        let scopes = vec![ApiScope::new("shared")];

        let (invalid, resources, raw) =
            resolve_scopes(&client, &requested, &identity, &scopes, &[]);

        assert!(invalid.is_empty());
        assert!(resources.identity_resources.contains_key("shared"));
        assert!(resources.api_scopes.is_empty());
        assert!(raw.is_empty());
    }
}
