// Authentication models for the token gate
// Identity carried by bearer tokens and the signed payload wrapping it

use serde::{Deserialize, Serialize};

/// Minimal identity embedded in every issued token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityClaim {
    /// Opaque subject identifier
    pub id: String,

    /// Display username
    pub username: String,
}

impl IdentityClaim {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }

    /// Both fields must be non-empty for a claim to be issuable
    pub fn is_well_formed(&self) -> bool {
        !self.id.is_empty() && !self.username.is_empty()
    }
}

/// Signed token payload: the identity plus its validity window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject identifier
    pub id: String,

    /// Subject username
    pub username: String,

    /// Issued at timestamp (Unix epoch seconds)
    pub iat: u64,

    /// Expires at timestamp (Unix epoch seconds)
    pub exp: u64,
}

impl TokenClaims {
    /// Wrap an identity with an issuance time and ttl in seconds
    ///
    /// Returns `None` when `issued_at + ttl` does not fit in a u64.
    pub fn new(claim: &IdentityClaim, issued_at: u64, ttl: u64) -> Option<Self> {
        Some(Self {
            id: claim.id.clone(),
            username: claim.username.clone(),
            iat: issued_at,
            exp: issued_at.checked_add(ttl)?,
        })
    }

    /// Expiry is exclusive: a token is dead at the second it names
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.exp <= now
    }

    pub fn into_identity(self) -> IdentityClaim {
        IdentityClaim {
            id: self.id,
            username: self.username,
        }
    }
}
