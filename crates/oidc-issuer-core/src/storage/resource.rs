//! Resource store trait.
//!
//! Defines the batch lookups the resource validator performs. All lookups are
//! by exact, case-sensitive name.

use async_trait::async_trait;

use crate::IssuerResult;
use crate::types::{ApiResource, ApiScope, IdentityResource, ResourceCatalog};

/// Read access to the identity resource, API resource and API scope catalog.
///
/// Implementations should return only enabled entries. The validator filters
/// on `enabled` again, so a store that returns disabled entries is still
/// handled correctly.
///
/// # Example
///
/// ```ignore
/// use oidc_issuer_core::storage::ResourceStore;
///
/// async fn example(store: &impl ResourceStore) -> IssuerResult<()> {
///     let names = vec!["openid".to_string(), "profile".to_string()];
///     for resource in store.find_identity_resources_by_name(&names).await? {
///         println!("identity resource: {}", resource.name);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Finds identity resources whose name is in `names`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_identity_resources_by_name(
        &self,
        names: &[String],
    ) -> IssuerResult<Vec<IdentityResource>>;

    /// Finds API scopes whose name is in `names`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_api_scopes_by_name(&self, names: &[String]) -> IssuerResult<Vec<ApiScope>>;

    /// Finds API resources exposing at least one scope in `names`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_api_resources_by_scope_name(
        &self,
        names: &[String],
    ) -> IssuerResult<Vec<ApiResource>>;

    /// Returns the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_all_resources(&self) -> IssuerResult<ResourceCatalog>;

    /// Returns the entries flagged `required` and the API resources exposing
    /// a required API scope.
    ///
    /// Used by the required-resource pass on every validation. The default
    /// filters [`find_all_resources`](Self::find_all_resources); stores backed
    /// by a remote catalog should override it with an indexed query.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_required_resources(&self) -> IssuerResult<ResourceCatalog> {
        Ok(self.find_all_resources().await?.required_only())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    struct CatalogStore {
        catalog: ResourceCatalog,
    }

    #[async_trait]
    impl ResourceStore for CatalogStore {
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
            Ok(self.catalog.clone())
        }
    }

    #[test]
    fn test_default_required_lookup_filters_full_catalog() {
        let store = CatalogStore {
            catalog: ResourceCatalog {
                identity_resources: vec![
                    IdentityResource::new("openid").required(),
                    IdentityResource::new("profile"),
                ],
                api_resources: vec![
                    ApiResource::new("resource1", ["scope1"]),
                    ApiResource::new("resource2", ["scope2"]),
                ],
                api_scopes: vec![ApiScope::new("scope1").required(), ApiScope::new("scope2")],
            },
        };

        let required = block_on(store.find_required_resources()).unwrap();

        assert_eq!(required.identity_resources.len(), 1);
        assert_eq!(required.identity_resources[0].name, "openid");
        assert_eq!(required.api_scopes.len(), 1);
        assert_eq!(required.api_scopes[0].name, "scope1");
        assert_eq!(required.api_resources.len(), 1);
        assert_eq!(required.api_resources[0].name, "resource1");
    }
}
