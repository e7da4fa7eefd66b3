//! Generic claims dictionary construction.
//!
//! [`build_claims_dictionary`] produces claims for non-JWT representations
//! such as introspection responses. Unlike the structured payload it sets
//! `iat`, folds a single audience into a scalar, and converts every remaining
//! claim type independently by its declared value type instead of merging
//! JSON groups. A type mixing JSON and plain claims therefore yields a
//! heterogeneous array rather than an error.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::IssuerResult;
use crate::config::TokenOptions;
use crate::error::IssuerError;
use crate::token::classify::ClassifiedClaims;
use crate::token::coerce::{coerce_claim_value, parse_json_claim};
use crate::types::claim::{Claim, claim_types};
use crate::types::token::Token;

/// Ordered mapping from claim type to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClaimsDictionary {
    claims: IndexMap<String, Value>,
}

impl ClaimsDictionary {
    /// Returns the value for a claim type.
    #[must_use]
    pub fn get(&self, claim_type: &str) -> Option<&Value> {
        self.claims.get(claim_type)
    }

    /// Returns `true` if the claim type is present.
    #[must_use]
    pub fn contains(&self, claim_type: &str) -> bool {
        self.claims.contains_key(claim_type)
    }

    /// Iterates over `(claim type, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.claims.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of claim types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Returns `true` if the dictionary is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Converts the dictionary into a JSON object.
    #[must_use]
    pub fn into_json(self) -> Value {
        Value::Object(self.claims.into_iter().collect::<Map<String, Value>>())
    }

    /// Inserts a claim type that must not be present yet.
    fn insert_new(&mut self, claim_type: &str, value: Value) -> IssuerResult<()> {
        if self.claims.contains_key(claim_type) {
            return Err(IssuerError::claims_merge(format!(
                "type {} already present",
                claim_type
            )));
        }
        self.claims.insert(claim_type.to_string(), value);
        Ok(())
    }
}

/// Builds the claims dictionary for a token.
///
/// Sets `iss`, `nbf`, `iat` (all `now`-based) and `exp = now + lifetime`;
/// `aud` as a string for one audience or an array for several; `amr` and
/// `scope` as in the structured payload; `cnf` from the token's confirmation;
/// then every other claim type, one array per type when it repeats.
///
/// # Errors
///
/// Returns `IssuerError::Coercion` if a claim value does not match its
/// declared type and `IssuerError::ClaimsMerge` if a JSON value does not
/// parse or a claim type collides with one already set (for example a raw
/// claim named `iss`).
pub fn build_claims_dictionary(
    token: &Token,
    options: &TokenOptions,
    now: OffsetDateTime,
) -> IssuerResult<ClaimsDictionary> {
    let now = now.unix_timestamp();
    let mut dictionary = ClaimsDictionary::default();

    dictionary.insert_new(claim_types::ISSUER, Value::from(token.issuer.as_str()))?;
    dictionary.insert_new(claim_types::NOT_BEFORE, Value::from(now))?;
    dictionary.insert_new(claim_types::ISSUED_AT, Value::from(now))?;
    dictionary.insert_new(
        claim_types::EXPIRATION,
        Value::from(now.saturating_add(token.lifetime)),
    )?;

    match token.audiences.as_slice() {
        [] => {}
        [audience] => dictionary.insert_new(claim_types::AUDIENCE, Value::from(audience.as_str()))?,
        audiences => dictionary.insert_new(
            claim_types::AUDIENCE,
            Value::Array(audiences.iter().map(|a| Value::from(a.as_str())).collect()),
        )?,
    }

    let classified = ClassifiedClaims::classify(&token.claims);

    if let Some(amr) = classified.amr_value() {
        dictionary.insert_new(claim_types::AUTHENTICATION_METHOD, amr)?;
    }

    if let Some(scope) = classified.scope_value(options) {
        dictionary.insert_new(claim_types::SCOPE, scope)?;
    }

    if let Some(confirmation) = &token.confirmation {
        let cnf = parse_json_claim(claim_types::CONFIRMATION, confirmation)?;
        dictionary.insert_new(claim_types::CONFIRMATION, cnf)?;
    }

    // JSON and plain claims are not merged separately here; grouping runs over
    // the original claim order so a mixed type keeps its sequence.
    let mut remaining: IndexMap<&str, Vec<&Claim>> = IndexMap::new();
    for claim in &token.claims {
        if claim.is(claim_types::SCOPE) || claim.is(claim_types::AUTHENTICATION_METHOD) {
            continue;
        }
        remaining
            .entry(claim.claim_type.as_str())
            .or_default()
            .push(claim);
    }

    for (claim_type, claims) in remaining {
        let value = match claims.as_slice() {
            [single] => coerce_claim_value(single)?,
            many => Value::Array(
                many.iter()
                    .map(|c| coerce_claim_value(c))
                    .collect::<IssuerResult<Vec<_>>>()?,
            ),
        };
        dictionary.insert_new(claim_type, value)?;
    }

    Ok(dictionary)
}
