use serde::{Deserialize, Serialize};
use std::fmt;

/// User identifiers arrive either as numbers or as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Numeric(id) => write!(f, "{}", id),
            UserId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId::Numeric(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: UserId,
    pub username: String,
    pub role: String,
    /// Expiry, in Unix seconds.
    pub exp: i64,
}

/// Identity projected out of the claims once a token has been accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub role: String,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == super::ADMIN_ROLE
    }
}

impl From<&TokenClaims> for UserProfile {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            id: claims.id.clone(),
            username: claims.username.clone(),
            role: claims.role.clone(),
        }
    }
}

/// Opaque bearer string. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialToken(String);

impl CredentialToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CredentialToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialToken(***)")
    }
}
