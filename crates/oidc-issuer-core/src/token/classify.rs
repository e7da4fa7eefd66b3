//! Claim classification shared by both output representations.
//!
//! Claims fall into four groups: `scope` claims, `amr` claims, JSON-typed
//! claims, and everything else ("plain" claims).

use indexmap::IndexSet;
use serde_json::Value;

use crate::config::TokenOptions;
use crate::types::claim::{Claim, ClaimValueType, claim_types};

/// Token claims split by how they are merged.
#[derive(Debug, Default)]
pub struct ClassifiedClaims<'a> {
    /// Claims of type `scope`.
    pub scopes: Vec<&'a Claim>,
    /// Claims of type `amr`.
    pub amr: Vec<&'a Claim>,
    /// Remaining claims declared as [`ClaimValueType::Json`].
    pub json: Vec<&'a Claim>,
    /// All other claims.
    pub plain: Vec<&'a Claim>,
}

impl<'a> ClassifiedClaims<'a> {
    /// Splits claims into groups, keeping their relative order.
    ///
    /// `scope` and `amr` take precedence over the JSON value type.
    #[must_use]
    pub fn classify(claims: &'a [Claim]) -> Self {
        let mut classified = Self::default();
        for claim in claims {
            if claim.is(claim_types::SCOPE) {
                classified.scopes.push(claim);
            } else if claim.is(claim_types::AUTHENTICATION_METHOD) {
                classified.amr.push(claim);
            } else if claim.value_type == ClaimValueType::Json {
                classified.json.push(claim);
            } else {
                classified.plain.push(claim);
            }
        }
        classified
    }

    /// Returns the `scope` claim value, or `None` if there are no scope claims.
    ///
    /// Either one space-delimited string or an array of strings, depending on
    /// `options`.
    #[must_use]
    pub fn scope_value(&self, options: &TokenOptions) -> Option<Value> {
        if self.scopes.is_empty() {
            return None;
        }
        let values = self.scopes.iter().map(|c| c.value.as_str());
        if options.emit_scopes_as_space_delimited_string {
            Some(Value::String(values.collect::<Vec<_>>().join(" ")))
        } else {
            Some(Value::Array(
                values.map(|v| Value::String(v.to_string())).collect(),
            ))
        }
    }

    /// Returns the `amr` claim value, or `None` if there are no amr claims.
    ///
    /// Always an array of the distinct values in first-occurrence order.
    #[must_use]
    pub fn amr_value(&self) -> Option<Value> {
        if self.amr.is_empty() {
            return None;
        }
        let distinct: IndexSet<&str> = self.amr.iter().map(|c| c.value.as_str()).collect();
        Some(Value::Array(
            distinct
                .into_iter()
                .map(|v| Value::String(v.to_string()))
                .collect(),
        ))
    }
}
