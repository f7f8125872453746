use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use tracing::debug;

use crate::core::token;
use crate::models::{AuthError, CredentialToken, TokenClaims, UserId};
use crate::system::Clock;

/// Checks credentials and hands back a token for the session store to install.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str)
        -> Result<CredentialToken, AuthError>;
}

pub const SESSION_TTL_HOURS: i64 = 24;

// Lowest cost bcrypt accepts; these hashes only live in memory.
const HASH_COST: u32 = 4;

#[derive(Debug, Clone, Copy)]
pub struct DemoAccount<'a> {
    pub id: i64,
    pub username: &'a str,
    pub password: &'a str,
    pub role: &'a str,
}

pub const DEMO_ACCOUNTS: [DemoAccount<'static>; 2] = [
    DemoAccount {
        id: 1,
        username: "admin",
        password: "admin",
        role: "admin",
    },
    DemoAccount {
        id: 2,
        username: "operator1",
        password: "operator1",
        role: "operator",
    },
];

#[derive(Debug)]
struct HashedAccount {
    id: i64,
    username: String,
    password_hash: String,
    role: String,
}

/// Placeholder authenticator that accepts a fixed set of demo accounts and
/// issues unsigned tokens. It must be replaced by a client of the real auth
/// service before production use.
pub struct MockAuthenticator {
    accounts: Vec<HashedAccount>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl MockAuthenticator {
    pub fn new(clock: Arc<dyn Clock>) -> Result<Self, AuthError> {
        Self::with_accounts(clock, &DEMO_ACCOUNTS)
    }

    pub fn with_accounts(
        clock: Arc<dyn Clock>,
        accounts: &[DemoAccount<'_>],
    ) -> Result<Self, AuthError> {
        let accounts = accounts
            .iter()
            .map(|account| -> Result<HashedAccount, AuthError> {
                Ok(HashedAccount {
                    id: account.id,
                    username: account.username.to_string(),
                    password_hash: bcrypt::hash(account.password, HASH_COST)?,
                    role: account.role.to_string(),
                })
            })
            .collect::<Result<Vec<_>, AuthError>>()?;
        Ok(Self {
            accounts,
            clock,
            ttl: Duration::hours(SESSION_TTL_HOURS),
        })
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<CredentialToken, AuthError> {
        let account = self
            .accounts
            .iter()
            .find(|account| account.username == username)
            .ok_or(AuthError::InvalidCredentials)?;
        if !bcrypt::verify(password, &account.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let claims = TokenClaims {
            id: UserId::Numeric(account.id),
            username: account.username.clone(),
            role: account.role.clone(),
            exp: (self.clock.now() + self.ttl).timestamp(),
        };
        debug!("Issuing demo token for {}", account.username);
        Ok(token::issue_unsigned(&claims)?)
    }
}
