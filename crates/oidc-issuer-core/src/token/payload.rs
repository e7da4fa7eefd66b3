//! Structured JWT payload construction.
//!
//! [`build_structured_payload`] produces the claim set a signer turns into a
//! JWT. It is the strict variant: a claim type asserted as both JSON and
//! non-JSON fails the whole build.
//!
//! JSON-typed claims are grouped by type and merged:
//!
//! - objects: a single object stays an object, several become an array
//! - arrays: every array in the group is flattened into one array
//! - anything else (strings, numbers, booleans, null) is rejected
//!
//! `iat` is not set here; the JWT encoder stamps it.

use indexmap::{IndexMap, IndexSet};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::IssuerResult;
use crate::config::TokenOptions;
use crate::error::IssuerError;
use crate::token::classify::ClassifiedClaims;
use crate::token::coerce::{coerce_claim_value, parse_json_claim};
use crate::types::claim::claim_types;
use crate::types::token::Token;

// =============================================================================
// JWT Payload
// =============================================================================

/// Ordered JWT payload entries.
///
/// An entry type may repeat (one `aud` entry per audience, repeated plain
/// claims). When serialized, repeated entries of a type fold into one array
/// and single entries stay scalar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JwtPayload {
    entries: Vec<(String, Value)>,
}

impl JwtPayload {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn add(&mut self, claim_type: impl Into<String>, value: impl Into<Value>) {
        self.entries.push((claim_type.into(), value.into()));
    }

    /// Returns `true` if any entry has the given type.
    #[must_use]
    pub fn contains(&self, claim_type: &str) -> bool {
        self.entries.iter().any(|(t, _)| t == claim_type)
    }

    /// Returns every value recorded for a type, in insertion order.
    #[must_use]
    pub fn get_all(&self, claim_type: &str) -> Vec<&Value> {
        self.entries
            .iter()
            .filter(|(t, _)| t == claim_type)
            .map(|(_, v)| v)
            .collect()
    }

    /// Returns the serialized value for a type: the value itself if recorded
    /// once, an array if recorded several times.
    #[must_use]
    pub fn get(&self, claim_type: &str) -> Option<Value> {
        fold(self.get_all(claim_type))
    }

    /// Returns the raw entries.
    #[must_use]
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the payload has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the payload as a JSON object, folding repeated entries.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.folded()
                .into_iter()
                .map(|(claim_type, value)| (claim_type.to_string(), value))
                .collect::<Map<String, Value>>(),
        )
    }

    fn folded(&self) -> IndexMap<&str, Value> {
        let mut grouped: IndexMap<&str, Vec<&Value>> = IndexMap::new();
        for (claim_type, value) in &self.entries {
            grouped.entry(claim_type.as_str()).or_default().push(value);
        }
        grouped
            .into_iter()
            .filter_map(|(claim_type, values)| fold(values).map(|v| (claim_type, v)))
            .collect()
    }
}

fn fold(mut values: Vec<&Value>) -> Option<Value> {
    match values.len() {
        0 => None,
        1 => values.pop().cloned(),
        _ => Some(Value::Array(values.into_iter().cloned().collect())),
    }
}

impl Serialize for JwtPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let folded = self.folded();
        let mut map = serializer.serialize_map(Some(folded.len()))?;
        for (claim_type, value) in &folded {
            map.serialize_entry(claim_type, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builds the structured JWT payload for a token.
///
/// Sets `iss`, `nbf = now` and `exp = now + lifetime`, one `aud` entry per
/// audience, every plain claim as its own entry, then `scope`, `amr` and the
/// merged JSON claims (including `cnf` from the token's confirmation).
///
/// # Errors
///
/// Returns `IssuerError::ClaimsMerge` if a JSON claim does not parse, has an
/// unsupported shape, or shares its type with a non-JSON entry, and
/// `IssuerError::Coercion` if a plain claim value does not match its declared
/// type. No partial payload is returned.
pub fn build_structured_payload(
    token: &Token,
    options: &TokenOptions,
    now: OffsetDateTime,
) -> IssuerResult<JwtPayload> {
    let now = now.unix_timestamp();
    let mut payload = JwtPayload::new();

    payload.add(claim_types::ISSUER, token.issuer.as_str());
    payload.add(claim_types::NOT_BEFORE, now);
    payload.add(claim_types::EXPIRATION, now.saturating_add(token.lifetime));

    for audience in &token.audiences {
        payload.add(claim_types::AUDIENCE, audience.as_str());
    }

    let classified = ClassifiedClaims::classify(&token.claims);

    for claim in &classified.plain {
        payload.add(claim.claim_type.as_str(), coerce_claim_value(claim)?);
    }

    if let Some(scope) = classified.scope_value(options) {
        payload.add(claim_types::SCOPE, scope);
    }

    if let Some(amr) = classified.amr_value() {
        payload.add(claim_types::AUTHENTICATION_METHOD, amr);
    }

    let mut json_claims: Vec<(&str, &str)> = classified
        .json
        .iter()
        .map(|c| (c.claim_type.as_str(), c.value.as_str()))
        .collect();
    if let Some(confirmation) = &token.confirmation {
        json_claims.push((claim_types::CONFIRMATION, confirmation.as_str()));
    }

    merge_json_claims(&mut payload, &json_claims)?;

    Ok(payload)
}

/// Merges JSON-valued claims into the payload.
///
/// All values are parsed before anything is merged. Object groups are merged
/// first, then array groups; a type already present in the payload at that
/// point is a conflict. Unsupported shapes are reported together, after the
/// conflict checks.
fn merge_json_claims(payload: &mut JwtPayload, claims: &[(&str, &str)]) -> IssuerResult<()> {
    let mut parsed = Vec::with_capacity(claims.len());
    for &(claim_type, value) in claims {
        parsed.push((claim_type, parse_json_claim(claim_type, value)?));
    }

    let mut objects: IndexMap<&str, Vec<Value>> = IndexMap::new();
    let mut arrays: IndexMap<&str, Vec<Value>> = IndexMap::new();
    let mut unsupported: IndexSet<&str> = IndexSet::new();

    for (claim_type, value) in parsed {
        match value {
            Value::Object(_) => objects.entry(claim_type).or_default().push(value),
            Value::Array(items) => arrays.entry(claim_type).or_default().extend(items),
            _ => {
                unsupported.insert(claim_type);
            }
        }
    }

    for (claim_type, mut values) in objects {
        if payload.contains(claim_type) {
            return Err(IssuerError::claims_merge(format!(
                "type {} already present as non-JSON object",
                claim_type
            )));
        }
        let value = if values.len() == 1 {
            values.remove(0)
        } else {
            Value::Array(values)
        };
        payload.add(claim_type, value);
    }

    for (claim_type, items) in arrays {
        if payload.contains(claim_type) {
            return Err(IssuerError::claims_merge(format!(
                "type {} already present as non-JSON array",
                claim_type
            )));
        }
        payload.add(claim_type, Value::Array(items));
    }

    if !unsupported.is_empty() {
        return Err(IssuerError::claims_merge(format!(
            "unsupported JSON type for claim types: {}",
            unsupported.into_iter().collect::<Vec<_>>().join(", ")
        )));
    }

    Ok(())
}
