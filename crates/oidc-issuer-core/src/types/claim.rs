//! Claim domain types.
//!
//! A [`Claim`] is a single `(type, value, value type)` triple. Several claims
//! may share the same type; the token builders decide how such groups are
//! merged into the output representation.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Well-known claim type names.
pub mod claim_types {
    /// Issuer.
    pub const ISSUER: &str = "iss";
    /// Audience.
    pub const AUDIENCE: &str = "aud";
    /// Not before.
    pub const NOT_BEFORE: &str = "nbf";
    /// Issued at.
    pub const ISSUED_AT: &str = "iat";
    /// Expiration.
    pub const EXPIRATION: &str = "exp";
    /// Granted scopes.
    pub const SCOPE: &str = "scope";
    /// Authentication method references.
    pub const AUTHENTICATION_METHOD: &str = "amr";
    /// Proof-of-possession confirmation.
    pub const CONFIRMATION: &str = "cnf";
}

const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
const XSD_INTEGER32: &str = "http://www.w3.org/2001/XMLSchema#integer32";
const XSD_INTEGER64: &str = "http://www.w3.org/2001/XMLSchema#integer64";
const JSON: &str = "json";

// =============================================================================
// Claim Value Type
// =============================================================================

/// Declared type of a claim's string value.
///
/// Serialized as the value-type URI (`http://www.w3.org/2001/XMLSchema#...`
/// or `json`). Unknown URIs deserialize as [`ClaimValueType::String`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClaimValueType {
    /// Plain string value.
    #[default]
    String,
    /// `true` / `false`.
    Boolean,
    /// 32-bit signed integer.
    Integer32,
    /// 64-bit signed integer.
    Integer64,
    /// A serialized JSON document.
    Json,
}

impl ClaimValueType {
    /// Maps a value-type URI to a variant.
    ///
    /// Both `#integer` and `#integer32` map to [`ClaimValueType::Integer32`].
    #[must_use]
    pub fn from_uri(uri: &str) -> Self {
        match uri {
            XSD_BOOLEAN => Self::Boolean,
            XSD_INTEGER | XSD_INTEGER32 => Self::Integer32,
            XSD_INTEGER64 => Self::Integer64,
            JSON => Self::Json,
            _ => Self::String,
        }
    }

    /// Returns the canonical value-type URI.
    #[must_use]
    pub fn as_uri(&self) -> &'static str {
        match self {
            Self::String => XSD_STRING,
            Self::Boolean => XSD_BOOLEAN,
            Self::Integer32 => XSD_INTEGER32,
            Self::Integer64 => XSD_INTEGER64,
            Self::Json => JSON,
        }
    }

    /// Returns a short lowercase name for diagnostics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Integer32 => "integer32",
            Self::Integer64 => "integer64",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ClaimValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ClaimValueType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_uri())
    }
}

impl<'de> Deserialize<'de> for ClaimValueType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let uri = String::deserialize(deserializer)?;
        Ok(Self::from_uri(&uri))
    }
}

// =============================================================================
// Claim
// =============================================================================

/// A single claim about the token subject or the token itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Claim type (e.g. `sub`, `amr`, `address`).
    #[serde(rename = "type")]
    pub claim_type: String,

    /// Claim value in its string form.
    pub value: String,

    /// Declared type of `value`.
    #[serde(default)]
    pub value_type: ClaimValueType,
}

impl Claim {
    /// Creates a string-typed claim.
    #[must_use]
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self::typed(claim_type, value, ClaimValueType::String)
    }

    /// Creates a claim with an explicit value type.
    #[must_use]
    pub fn typed(
        claim_type: impl Into<String>,
        value: impl Into<String>,
        value_type: ClaimValueType,
    ) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
            value_type,
        }
    }

    /// Creates a JSON-typed claim from a serialized JSON document.
    #[must_use]
    pub fn json(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self::typed(claim_type, value, ClaimValueType::Json)
    }

    /// Returns `true` if the claim has the given type.
    #[must_use]
    pub fn is(&self, claim_type: &str) -> bool {
        self.claim_type == claim_type
    }
}
