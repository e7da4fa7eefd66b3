//! Token claims assembly.
//!
//! Two representations are built from the same [`Token`](crate::types::Token)
//! descriptor:
//!
//! - [`JwtPayload`] via [`build_structured_payload`] - the payload a signer
//!   turns into a JWT; strict about JSON/non-JSON conflicts, no `iat`
//! - [`ClaimsDictionary`] via [`build_claims_dictionary`] - a generic mapping
//!   for non-JWT representations such as introspection responses
//!
//! [`TokenClaimsBuilder`] wraps both with fixed options and a clock.

pub mod builder;
pub mod classify;
pub mod coerce;
pub mod dictionary;
pub mod payload;

pub use builder::TokenClaimsBuilder;
pub use classify::ClassifiedClaims;
pub use coerce::{coerce_claim_value, parse_json_claim};
pub use dictionary::{ClaimsDictionary, build_claims_dictionary};
pub use payload::{JwtPayload, build_structured_payload};
