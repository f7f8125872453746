use chrono::{DateTime, Utc};

use super::{CredentialToken, UserProfile};

/// Who is logged in. `user` and `token` are set and cleared together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<CredentialToken>,
    pub user: Option<UserProfile>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn role(&self) -> &str {
        self.user.as_ref().map(|u| u.role.as_str()).unwrap_or("")
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserProfile::is_admin)
    }

    pub fn username(&self) -> &str {
        self.user.as_ref().map(|u| u.username.as_str()).unwrap_or("")
    }
}

/// Everything observers of the session store can see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub session: Session,
    pub is_loading: bool,
    pub login_error: Option<String>,
}
