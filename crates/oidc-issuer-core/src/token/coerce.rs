//! Claim value coercion by declared value type.

use serde_json::Value;

use crate::IssuerResult;
use crate::error::IssuerError;
use crate::types::claim::{Claim, ClaimValueType};

/// Converts a claim's string value into a JSON value of its declared type.
///
/// Boolean parsing is case-insensitive and ignores surrounding whitespace.
///
/// # Errors
///
/// Returns `IssuerError::Coercion` if a boolean or integer value does not
/// parse, and `IssuerError::ClaimsMerge` if a JSON value does not parse.
pub fn coerce_claim_value(claim: &Claim) -> IssuerResult<Value> {
    let value = claim.value.as_str();
    match claim.value_type {
        ClaimValueType::String => Ok(Value::String(value.to_string())),
        ClaimValueType::Boolean => parse_bool(value)
            .map(Value::Bool)
            .ok_or_else(|| {
                IssuerError::coercion(
                    &claim.claim_type,
                    claim.value_type,
                    format!("'{}' is not a boolean", value),
                )
            }),
        ClaimValueType::Integer32 => value
            .trim()
            .parse::<i32>()
            .map(Value::from)
            .map_err(|e| IssuerError::coercion(&claim.claim_type, claim.value_type, e.to_string())),
        ClaimValueType::Integer64 => value
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| IssuerError::coercion(&claim.claim_type, claim.value_type, e.to_string())),
        ClaimValueType::Json => parse_json_claim(&claim.claim_type, value),
    }
}

/// Parses a JSON-valued claim.
///
/// # Errors
///
/// Returns `IssuerError::ClaimsMerge` naming the claim type if `value` is not
/// a JSON document.
pub fn parse_json_claim(claim_type: &str, value: &str) -> IssuerResult<Value> {
    serde_json::from_str(value).map_err(|e| {
        IssuerError::claims_merge(format!("claim {} is not valid JSON: {}", claim_type, e))
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
