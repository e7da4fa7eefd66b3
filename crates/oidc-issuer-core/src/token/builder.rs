//! Token claims builder.
//!
//! Binds the claims options and a clock, samples the clock once per call, and
//! reports build failures through `tracing` before returning them.

use std::sync::Arc;

use indexmap::IndexSet;
use tracing::error;

use crate::IssuerResult;
use crate::clock::{Clock, SystemClock};
use crate::config::TokenOptions;
use crate::error::IssuerError;
use crate::token::dictionary::{ClaimsDictionary, build_claims_dictionary};
use crate::token::payload::{JwtPayload, build_structured_payload};
use crate::types::token::Token;

/// Builds token claim sets with fixed options.
///
/// # Example
///
/// ```ignore
/// use oidc_issuer_core::token::TokenClaimsBuilder;
///
/// let builder = TokenClaimsBuilder::new(config.token.clone(), Arc::new(SystemClock));
/// let payload = builder.build_payload(&token)?;
/// let jwt = signer.sign(&payload)?;
/// ```
#[derive(Clone)]
pub struct TokenClaimsBuilder {
    options: TokenOptions,
    clock: Arc<dyn Clock>,
}

impl TokenClaimsBuilder {
    /// Creates a builder.
    #[must_use]
    pub fn new(options: TokenOptions, clock: Arc<dyn Clock>) -> Self {
        Self { options, clock }
    }

    /// Creates a builder on the system clock.
    #[must_use]
    pub fn with_system_clock(options: TokenOptions) -> Self {
        Self::new(options, Arc::new(SystemClock))
    }

    /// Returns the builder options.
    #[must_use]
    pub fn options(&self) -> &TokenOptions {
        &self.options
    }

    /// Builds the structured JWT payload.
    ///
    /// # Errors
    ///
    /// See [`build_structured_payload`].
    pub fn build_payload(&self, token: &Token) -> IssuerResult<JwtPayload> {
        build_structured_payload(token, &self.options, self.clock.now())
            .map_err(|err| report_failure(token, "jwt_payload", err))
    }

    /// Builds the generic claims dictionary.
    ///
    /// # Errors
    ///
    /// See [`build_claims_dictionary`].
    pub fn build_claims_dictionary(&self, token: &Token) -> IssuerResult<ClaimsDictionary> {
        build_claims_dictionary(token, &self.options, self.clock.now())
            .map_err(|err| report_failure(token, "claims_dictionary", err))
    }
}

impl std::fmt::Debug for TokenClaimsBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenClaimsBuilder")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

fn report_failure(token: &Token, representation: &str, err: IssuerError) -> IssuerError {
    let claim_types: IndexSet<&str> = token.claims.iter().map(|c| c.claim_type.as_str()).collect();
    error!(
        token_issuer = %token.issuer,
        representation,
        claim_types = ?claim_types,
        category = %err.category(),
        error = %err,
        "Failed to build token claims"
    );
    err
}
