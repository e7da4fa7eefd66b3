//! Token descriptor handed to the claims builders.

use serde::{Deserialize, Serialize};

use super::claim::Claim;

/// Everything needed to assemble the claim set of one security token.
///
/// The descriptor is read-only for the builders; they never modify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Issuer URL (`iss`).
    pub issuer: String,

    /// Audiences (`aud`), in order.
    #[serde(default)]
    pub audiences: Vec<String>,

    /// Lifetime in seconds; `exp = nbf + lifetime`.
    pub lifetime: i64,

    /// Raw claims. Several claims may share a type.
    #[serde(default)]
    pub claims: Vec<Claim>,

    /// Serialized JSON confirmation (`cnf`) for proof-of-possession tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<String>,
}

impl Token {
    /// Creates a descriptor with no audiences or claims.
    #[must_use]
    pub fn new(issuer: impl Into<String>, lifetime: i64) -> Self {
        Self {
            issuer: issuer.into(),
            audiences: Vec::new(),
            lifetime,
            claims: Vec::new(),
            confirmation: None,
        }
    }

    /// Adds an audience.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audiences.push(audience.into());
        self
    }

    /// Adds a claim.
    #[must_use]
    pub fn with_claim(mut self, claim: Claim) -> Self {
        self.claims.push(claim);
        self
    }

    /// Adds several claims.
    #[must_use]
    pub fn with_claims(mut self, claims: impl IntoIterator<Item = Claim>) -> Self {
        self.claims.extend(claims);
        self
    }

    /// Sets the serialized JSON confirmation.
    #[must_use]
    pub fn with_confirmation(mut self, confirmation: impl Into<String>) -> Self {
        self.confirmation = Some(confirmation.into());
        self
    }
}
