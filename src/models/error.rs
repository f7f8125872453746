use chrono::{DateTime, Utc};
use thiserror::Error;

/// Why a credential token could not be turned into a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Malformed token: {0}")]
    Malformed(String),
    #[error("Token expired at {0}")]
    Expired(DateTime<Utc>),
    #[error("Token cannot be used as an Authorization header")]
    InvalidHeader,
    #[error("Could not encode token: {0}")]
    Encoding(String),
}

/// Outcome of a failed login.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Login failed: {0}")]
    Unexpected(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage format error: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("No route matches '{0}'")]
    NoMatch(String),
    #[error("Invalid location '{0}'")]
    InvalidLocation(String),
    #[error("Too many redirects while navigating to '{0}'")]
    RedirectLoop(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        TokenError::Malformed(err.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        AuthError::Unexpected(err.to_string())
    }
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        AuthError::Unexpected(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AuthError::Unexpected(err.to_string())
    }
}

impl AuthError {
    pub fn unexpected(msg: impl std::fmt::Display) -> Self {
        AuthError::Unexpected(msg.to_string())
    }
}

impl RouteError {
    pub fn invalid_pattern(pattern: &str, reason: &str) -> Self {
        RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }
}
