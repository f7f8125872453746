//! Session store: the single source of truth for who is logged in.
//!
//! The raw token lives in the `token` slot of a [`KeyValueStore`] so that a
//! restart can pick the session back up. Whenever a token is accepted it is
//! also installed as the bearer header of the outbound API client. Observers
//! read the current [`SessionState`] or subscribe to changes.
//!
//! Expiry is only noticed when the token is looked at again: on
//! [`SessionStore::restore`] or [`SessionStore::expire_if_due`]. The router
//! calls the latter before every guard decision.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::auth::Authenticator;
use crate::core::token;
use crate::models::{
    AuthError, CredentialToken, Session, SessionState, TokenError, UserProfile,
};
use crate::system::{Clock, CredentialHeader, KeyValueStore, TOKEN_KEY};

pub struct SessionStore {
    state: watch::Sender<SessionState>,
    storage: Arc<dyn KeyValueStore>,
    header: Arc<dyn CredentialHeader>,
    authenticator: Arc<dyn Authenticator>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Builds the store and immediately restores any persisted session.
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        header: Arc<dyn CredentialHeader>,
        authenticator: Arc<dyn Authenticator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        let store = Self {
            state,
            storage,
            header,
            authenticator,
            clock,
        };
        store.restore();
        store
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn session(&self) -> Session {
        self.state.borrow().session.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().session.is_authenticated()
    }

    pub fn role(&self) -> String {
        self.state.borrow().session.role().to_string()
    }

    pub fn username(&self) -> String {
        self.state.borrow().session.username().to_string()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.borrow().session.user.clone()
    }

    pub fn token(&self) -> Option<CredentialToken> {
        self.state.borrow().session.token.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn login_error(&self) -> Option<String> {
        self.state.borrow().login_error.clone()
    }

    /// Re-reads the persisted token and rebuilds the session from it.
    /// Returns whether a valid session is now active.
    pub fn restore(&self) -> bool {
        let persisted = match self.storage.get(TOKEN_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not read persisted token: {}", e);
                None
            }
        };
        let Some(raw) = persisted else {
            self.forget();
            return false;
        };

        let token = CredentialToken::new(raw);
        match self.activate(&token) {
            Ok(session) => {
                debug!("Restored session for {}", session.username());
                true
            }
            Err(TokenError::Expired(at)) => {
                info!("Token expired at {}", at);
                self.logout();
                false
            }
            Err(e) => {
                warn!("Invalid token in storage: {}", e);
                self.logout();
                false
            }
        }
    }

    /// Alias kept for callers that think of restoring as checking auth.
    pub fn check_auth(&self) -> bool {
        self.restore()
    }

    /// Logs out if the active session has reached its expiry. Returns whether
    /// a session was dropped.
    pub fn expire_if_due(&self) -> bool {
        let expires_at = self.state.borrow().session.expires_at;
        match expires_at {
            Some(at) if at <= self.clock.now() => {
                info!("Session expired at {}", at);
                self.logout();
                true
            }
            _ => false,
        }
    }

    /// Logs in through the authenticator. Bad credentials leave the session
    /// as it was; any other failure clears it.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.login_error = None;
        });

        let result = self.try_login(username, password).await;

        self.state.send_modify(|state| {
            state.is_loading = false;
            state.login_error = result.as_ref().err().map(ToString::to_string);
        });
        result
    }

    async fn try_login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let token = match self.authenticator.authenticate(username, password).await {
            Ok(token) => token,
            Err(AuthError::InvalidCredentials) => {
                info!("Rejected login for {}", username);
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                error!("Login error: {}", e);
                self.logout();
                return Err(e);
            }
        };

        let installed = self
            .storage
            .set(TOKEN_KEY, token.as_str())
            .map_err(AuthError::from)
            .and_then(|_| self.activate(&token).map_err(AuthError::from));
        match installed {
            Ok(session) => {
                info!("Logged in as {} ({})", session.username(), session.role());
                Ok(session)
            }
            Err(e) => {
                error!("Login error: {}", e);
                self.logout();
                Err(e)
            }
        }
    }

    /// Forgets the session everywhere: storage, header and memory.
    pub fn logout(&self) {
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            error!("Could not remove persisted token: {}", e);
        }
        self.forget();
        debug!("Session cleared");
    }

    /// Drops the header and the in-memory session, leaving storage alone.
    fn forget(&self) {
        self.header.clear_bearer();
        self.clear_session();
    }

    /// Decodes `token` and, if it is current, arms the header and publishes
    /// the session. Nothing is changed on failure.
    fn activate(&self, token: &CredentialToken) -> Result<Session, TokenError> {
        let (claims, expires_at) = token::decode_current(token.as_str(), self.clock.now())?;
        self.header.set_bearer(token)?;
        let session = Session {
            token: Some(token.clone()),
            user: Some(UserProfile::from(&claims)),
            expires_at: Some(expires_at),
        };
        let published = session.clone();
        self.state.send_modify(move |state| state.session = published);
        Ok(session)
    }

    fn clear_session(&self) {
        self.state.send_if_modified(|state| {
            if state.session == Session::default() {
                return false;
            }
            state.session = Session::default();
            true
        });
    }
}
