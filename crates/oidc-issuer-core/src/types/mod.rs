//! Domain types for clients, resources, claims and token descriptors.

pub mod claim;
pub mod client;
pub mod resources;
pub mod token;

pub use claim::{Claim, ClaimValueType, claim_types};
pub use client::Client;
pub use resources::{ApiResource, ApiScope, IdentityResource, ResourceCatalog};
pub use token::Token;
