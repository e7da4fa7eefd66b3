//! Resource and scope validation.
//!
//! Given a client and the scopes it requested, the [`ResourceValidator`]
//! decides which scopes are valid, which identity resources, API resources
//! and API scopes they resolve to, and whether the request succeeds.
//!
//! # Example
//!
//! ```ignore
//! use oidc_issuer_core::validation::{ResourceValidationRequest, ResourceValidator};
//!
//! let validator = ResourceValidator::new(store, ValidationOptions::default());
//! let request = ResourceValidationRequest::new(client, ["openid", "scope1"]);
//! let result = validator.validate(&request).await?;
//!
//! if result.succeeded() {
//!     let audiences = result.resources().api_resource_names();
//! }
//! ```

pub mod required;
pub mod result;
pub mod validator;

pub use required::include_required_resources;
pub use result::{ResourceValidationRequest, ResourceValidationResult, ValidatedResources};
pub use validator::{ResourceValidator, resolve_scopes};
