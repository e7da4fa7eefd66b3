//! # oidc-issuer-core
//!
//! Scope validation and token claims assembly for an OAuth 2.0 / OpenID
//! Connect token issuer.
//!
//! This crate provides:
//! - Resource/scope validation against a catalog of identity resources,
//!   API resources and API scopes
//! - Token claims assembly into a JWT payload or a generic claims dictionary
//!
//! Both are pure computations over in-memory data. Endpoint handling,
//! persistence, signing and protocol flows belong to the caller.
//!
//! ## Modules
//!
//! - [`config`] - Issuer configuration
//! - [`types`] - Clients, resources, claims and token descriptors
//! - [`storage`] - Resource store trait and in-memory implementation
//! - [`validation`] - Resource validator
//! - [`token`] - Token claims builders
//! - [`clock`] - Time source

pub mod clock;
pub mod config;
pub mod error;
pub mod storage;
pub mod token;
pub mod types;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, IssuerConfig, TokenOptions, ValidationOptions};
pub use error::{ErrorCategory, IssuerError};
pub use storage::{InMemoryResourceStore, ResourceStore};
pub use token::{
    ClaimsDictionary, JwtPayload, TokenClaimsBuilder, build_claims_dictionary,
    build_structured_payload,
};
pub use types::{
    ApiResource, ApiScope, Claim, ClaimValueType, Client, IdentityResource, ResourceCatalog,
    Token, claim_types,
};
pub use validation::{
    ResourceValidationRequest, ResourceValidationResult, ResourceValidator, ValidatedResources,
};

/// Type alias for issuer results.
pub type IssuerResult<T> = Result<T, IssuerError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use oidc_issuer_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::IssuerResult;
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::config::{IssuerConfig, TokenOptions, ValidationOptions};
    pub use crate::error::{ErrorCategory, IssuerError};
    pub use crate::storage::{InMemoryResourceStore, ResourceStore};
    pub use crate::token::{ClaimsDictionary, JwtPayload, TokenClaimsBuilder};
    pub use crate::types::{
        ApiResource, ApiScope, Claim, ClaimValueType, Client, IdentityResource, ResourceCatalog,
        Token,
    };
    pub use crate::validation::{
        ResourceValidationRequest, ResourceValidationResult, ResourceValidator,
        ValidatedResources,
    };
}
