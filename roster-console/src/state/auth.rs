//! Authentication gate
//!
//! Holds the session for the lifetime of the process and mirrors it
//! into the local store so a restart resumes where the user left off.

use roster_client::{SessionStore, StoreResult, StoredSession};
use shared::UserInfo;

/// Authentication state of the shell
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AuthState {
    /// No session; only the Login route is reachable
    #[default]
    Anonymous,
    /// Logged in; the token is attached to API mutations
    Authenticated { token: String, user: UserInfo },
}

/// Session owner backing the route guard and action visibility
pub struct AuthGate {
    state: AuthState,
    sessions: SessionStore,
}

impl AuthGate {
    pub fn new(sessions: SessionStore) -> Self {
        Self {
            state: AuthState::Anonymous,
            sessions,
        }
    }

    /// Restore a persisted session, if one is still valid
    ///
    /// Expired or corrupt sessions were already cleared by the store
    /// layer, so a `None` here simply means starting anonymous.
    pub fn hydrate(&mut self) -> StoreResult<()> {
        if let Some(session) = self.sessions.load()? {
            tracing::info!(user = %session.user.username, "Restored session");
            self.state = AuthState::Authenticated {
                token: session.token,
                user: session.user,
            };
        }
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&UserInfo> {
        match &self.state {
            AuthState::Anonymous => None,
            AuthState::Authenticated { user, .. } => Some(user),
        }
    }

    pub fn token(&self) -> Option<&str> {
        match &self.state {
            AuthState::Anonymous => None,
            AuthState::Authenticated { token, .. } => Some(token.as_str()),
        }
    }

    /// Whether the session user may see Edit/Delete row actions
    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(UserInfo::is_admin)
    }

    /// Install a fresh session after a successful login round-trip
    pub fn establish(&mut self, token: String, user: UserInfo) -> StoreResult<()> {
        self.sessions.save(&StoredSession {
            token: token.clone(),
            user: user.clone(),
        })?;
        tracing::info!(user = %user.username, role = ?user.role, "Signed in");
        self.state = AuthState::Authenticated { token, user };
        Ok(())
    }

    /// Drop the session and wipe it from the store
    pub fn logout(&mut self) -> StoreResult<()> {
        self.sessions.clear()?;
        self.state = AuthState::Anonymous;
        tracing::info!("Signed out");
        Ok(())
    }
}
