//! In-memory resource store.

use async_trait::async_trait;

use crate::IssuerResult;
use crate::storage::ResourceStore;
use crate::types::{ApiResource, ApiScope, IdentityResource, ResourceCatalog};

/// A [`ResourceStore`] over a fixed [`ResourceCatalog`].
///
/// Lookups return enabled entries only.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResourceStore {
    catalog: ResourceCatalog,
}

impl InMemoryResourceStore {
    /// Creates a store over a catalog.
    ///
    /// # Errors
    ///
    /// Returns `IssuerError::Configuration` if the catalog contains duplicate
    /// names.
    pub fn new(catalog: ResourceCatalog) -> IssuerResult<Self> {
        catalog.validate()?;
        Ok(Self { catalog })
    }

    /// Returns the underlying catalog, including disabled entries.
    #[must_use]
    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }
}

fn contains(names: &[String], name: &str) -> bool {
    names.iter().any(|n| n == name)
}

#[async_trait]
impl ResourceStore for InMemoryResourceStore {
    async fn find_identity_resources_by_name(
        &self,
        names: &[String],
    ) -> IssuerResult<Vec<IdentityResource>> {
        Ok(self
            .catalog
            .identity_resources
            .iter()
            .filter(|r| r.enabled && contains(names, &r.name))
            .cloned()
            .collect())
    }

    async fn find_api_scopes_by_name(&self, names: &[String]) -> IssuerResult<Vec<ApiScope>> {
        Ok(self
            .catalog
            .api_scopes
            .iter()
            .filter(|s| s.enabled && contains(names, &s.name))
            .cloned()
            .collect())
    }

    async fn find_api_resources_by_scope_name(
        &self,
        names: &[String],
    ) -> IssuerResult<Vec<ApiResource>> {
        Ok(self
            .catalog
            .api_resources
            .iter()
            .filter(|r| r.enabled && r.scopes.iter().any(|s| contains(names, s)))
            .cloned()
            .collect())
    }

    async fn find_all_resources(&self) -> IssuerResult<ResourceCatalog> {
        Ok(ResourceCatalog {
            identity_resources: self
                .catalog
                .identity_resources
                .iter()
                .filter(|r| r.enabled)
                .cloned()
                .collect(),
            api_resources: self
                .catalog
                .api_resources
                .iter()
                .filter(|r| r.enabled)
                .cloned()
                .collect(),
            api_scopes: self
                .catalog
                .api_scopes
                .iter()
                .filter(|s| s.enabled)
                .cloned()
                .collect(),
        })
    }

    async fn find_required_resources(&self) -> IssuerResult<ResourceCatalog> {
        Ok(self.catalog.required_only())
    }
}
