//! Cached session persistence
//!
//! The token and the user descriptor live under separate keys so the token
//! stays an opaque string. An expired or corrupt session loads as `None`
//! and is cleared in passing.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use shared::UserInfo;

use crate::store::{AUTH_TOKEN_KEY, AUTH_USER_KEY, LocalStore, StoreResult};

/// A persisted session: opaque bearer token plus the user it names
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub token: String,
    pub user: UserInfo,
}

/// Parse the expiry (Unix seconds) out of a JWT without verifying it
///
/// Verification is the server's job; the client only needs the `exp` claim
/// to skip hydrating a session that is already dead. Tokens that are not
/// JWT-shaped yield `None` and are kept until the server rejects them.
pub fn parse_jwt_exp(token: &str) -> Option<i64> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let payload_bytes = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&payload_bytes).ok()?;
    payload.get("exp")?.as_i64()
}

/// Session persistence on top of the local store
#[derive(Clone)]
pub struct SessionStore {
    store: LocalStore,
}

impl SessionStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Persist the session after a successful login
    pub fn save(&self, session: &StoredSession) -> StoreResult<()> {
        self.store.set(AUTH_TOKEN_KEY, &session.token)?;
        self.store
            .set(AUTH_USER_KEY, &serde_json::to_string(&session.user)?)?;
        tracing::debug!(username = %session.user.username, "Session saved");
        Ok(())
    }

    /// Load the cached session
    ///
    /// Returns `None` when nothing is stored, the stored user does not
    /// parse, or the token's embedded expiry has passed.
    pub fn load(&self) -> StoreResult<Option<StoredSession>> {
        let (Some(token), Some(raw_user)) = (
            self.store.get(AUTH_TOKEN_KEY)?,
            self.store.get(AUTH_USER_KEY)?,
        ) else {
            return Ok(None);
        };

        let user: UserInfo = match serde_json::from_str(&raw_user) {
            Ok(user) => user,
            Err(error) => {
                tracing::warn!(%error, "Stored session user is corrupt, clearing");
                self.clear()?;
                return Ok(None);
            }
        };

        if let Some(expires_at) = parse_jwt_exp(&token) {
            if chrono::Utc::now().timestamp() > expires_at {
                tracing::info!(username = %user.username, "Cached session expired, cleared");
                self.clear()?;
                return Ok(None);
            }
        }

        tracing::info!(username = %user.username, "Loaded cached session");
        Ok(Some(StoredSession { token, user }))
    }

    /// Drop the persisted session keys
    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(AUTH_TOKEN_KEY)?;
        self.store.remove(AUTH_USER_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Role;

    fn make_jwt(exp: i64) -> String {
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"1","exp":{}}}"#, exp));
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", payload)
    }

    fn admin_session(token: String) -> StoredSession {
        StoredSession {
            token,
            user: UserInfo {
                id: "1".into(),
                username: "admin".into(),
                role: Role::Admin,
            },
        }
    }

    #[test]
    fn parse_jwt_exp_reads_the_claim() {
        assert_eq!(parse_jwt_exp(&make_jwt(1_700_000_000)), Some(1_700_000_000));
        assert_eq!(parse_jwt_exp("not-a-jwt"), None);
        assert_eq!(parse_jwt_exp("a.!!!.c"), None);
    }

    #[test]
    fn save_load_round_trip() {
        let sessions = SessionStore::new(LocalStore::open_in_memory().unwrap());

        assert_eq!(sessions.load().unwrap(), None);

        let session = admin_session(make_jwt(chrono::Utc::now().timestamp() + 3600));
        sessions.save(&session).unwrap();
        assert_eq!(sessions.load().unwrap(), Some(session));

        sessions.clear().unwrap();
        assert_eq!(sessions.load().unwrap(), None);
    }

    #[test]
    fn expired_token_clears_on_load() {
        let store = LocalStore::open_in_memory().unwrap();
        let sessions = SessionStore::new(store.clone());

        let session = admin_session(make_jwt(chrono::Utc::now().timestamp() - 3600));
        sessions.save(&session).unwrap();

        assert_eq!(sessions.load().unwrap(), None);
        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn opaque_token_loads_without_expiry_check() {
        let sessions = SessionStore::new(LocalStore::open_in_memory().unwrap());

        let session = admin_session("opaque-token".to_string());
        sessions.save(&session).unwrap();
        assert_eq!(sessions.load().unwrap(), Some(session));
    }

    #[test]
    fn corrupt_user_clears_on_load() {
        let store = LocalStore::open_in_memory().unwrap();
        let sessions = SessionStore::new(store.clone());

        store.set(AUTH_TOKEN_KEY, "opaque-token").unwrap();
        store.set(AUTH_USER_KEY, "{broken").unwrap();

        assert_eq!(sessions.load().unwrap(), None);
        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap(), None);
    }
}
