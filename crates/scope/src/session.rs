//! Session store: the identity source every resolver reads.

use std::sync::RwLock;

use chrono::{DateTime, Utc};

use fuelops_auth::{SessionClaims, SessionUser, validate_claims};

use crate::ScopeError;

/// Holds the claims of the logged-in user, if any.
///
/// The user is immutable for the lifetime of a session; re-login replaces it.
#[derive(Debug, Default)]
pub struct SessionStore {
    claims: RwLock<Option<SessionClaims>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store `claims`, replacing any previous session.
    pub fn login(&self, claims: SessionClaims, now: DateTime<Utc>) -> Result<(), ScopeError> {
        validate_claims(&claims, now)?;
        let Ok(mut slot) = self.claims.write() else {
            tracing::error!(user_id = %claims.user.id, "session store poisoned; login not recorded");
            return Err(ScopeError::SessionUnavailable);
        };
        tracing::info!(
            user_id = %claims.user.id,
            company_id = %claims.user.id_company,
            role = ?claims.user.role,
            "session started"
        );
        *slot = Some(claims);
        Ok(())
    }

    pub fn logout(&self) {
        if let Ok(mut slot) = self.claims.write() {
            if let Some(previous) = slot.take() {
                tracing::info!(user_id = %previous.user.id, "session ended");
            }
        }
    }

    /// Current user, or `None` when logged out or the session expired.
    pub fn current_user(&self) -> Option<SessionUser> {
        self.current_user_at(Utc::now())
    }

    pub fn current_user_at(&self, now: DateTime<Utc>) -> Option<SessionUser> {
        let slot = self.claims.read().ok()?;
        let claims = slot.as_ref()?;
        if claims.is_valid_at(now) {
            Some(claims.user.clone())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use fuelops_auth::{Role, TokenValidationError};
    use fuelops_core::{CompanyId, UserId};

    fn claims(now: DateTime<Utc>) -> SessionClaims {
        SessionClaims {
            user: SessionUser::new(UserId::new(4), Role::Admin, CompanyId::new(1)),
            issued_at: now - Duration::minutes(1),
            expires_at: now + Duration::hours(1),
        }
    }

    #[test]
    fn login_then_logout() {
        let store = SessionStore::new();
        let now = Utc::now();
        store.login(claims(now), now).unwrap();
        assert_eq!(store.current_user_at(now).map(|u| u.id), Some(UserId::new(4)));

        store.logout();
        assert!(store.current_user_at(now).is_none());
    }

    #[test]
    fn rejected_login_keeps_previous_state() {
        let store = SessionStore::new();
        let now = Utc::now();
        let err = store.login(claims(now), now + Duration::hours(2)).unwrap_err();
        assert_eq!(err, ScopeError::Session(TokenValidationError::Expired));
        assert!(store.current_user_at(now).is_none());
    }

    #[test]
    fn expired_session_yields_no_user() {
        let store = SessionStore::new();
        let now = Utc::now();
        store.login(claims(now), now).unwrap();
        assert!(store.current_user_at(now + Duration::hours(2)).is_none());
    }

    #[test]
    fn poisoned_store_refuses_login() {
        let store = SessionStore::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _slot = store.claims.write().unwrap();
            panic!("writer died holding the session lock");
        }));

        let now = Utc::now();
        assert_eq!(store.login(claims(now), now), Err(ScopeError::SessionUnavailable));
        assert!(store.current_user_at(now).is_none());
    }
}
