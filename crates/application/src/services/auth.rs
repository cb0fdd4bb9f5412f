//! Authentication service.
//!
//! Wraps the `/auth/*` endpoints and owns the local credential lifecycle:
//! the token pair and the serialized profile are written on login and
//! registration, rotated on refresh, and deleted on logout or on a failed
//! refresh. The three entries are independent keys written concurrently;
//! a partial failure is logged and tolerated rather than rolled back.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use trove_domain::{AuthSession, NewUser, User};

use super::unwrap_envelope;
use crate::error::{ApiError, ApiResult};
use crate::ports::{
    ACCESS_TOKEN_KEY, ApiRequest, ApiTransport, KeyValueStore, REFRESH_TOKEN_KEY, StorageError,
    USER_PROFILE_KEY,
};

/// Stateless wrapper over the auth endpoints.
#[derive(Debug)]
pub struct AuthService<T, S> {
    transport: Arc<T>,
    storage: Arc<S>,
}

impl<T, S> Clone for AuthService<T, S> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            storage: Arc::clone(&self.storage),
        }
    }
}

/// Body of a successful `/auth/refresh` envelope.
#[derive(Debug, Deserialize)]
struct RefreshedToken {
    token: String,
}

impl<T: ApiTransport, S: KeyValueStore> AuthService<T, S> {
    /// Creates a new auth service over the given ports.
    #[must_use]
    pub const fn new(transport: Arc<T>, storage: Arc<S>) -> Self {
        Self { transport, storage }
    }

    /// Signs in with email and password, persisting the returned session.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails; persistence failures after a
    /// successful call are logged and swallowed.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthSession> {
        let request = ApiRequest::post("/auth/login")
            .with_body(json!({"email": email, "password": password}));
        let session: AuthSession = unwrap_envelope(self.transport.send(request).await?)?;
        self.persist_session(&session).await;
        Ok(session)
    }

    /// Registers a new account, persisting the returned session.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails; persistence failures after a
    /// successful call are logged and swallowed.
    pub async fn register(&self, profile: &NewUser) -> ApiResult<AuthSession> {
        let body = serde_json::to_value(profile)
            .map_err(|e| ApiError::Unexpected(format!("request encode: {e}")))?;
        let request = ApiRequest::post("/auth/register").with_body(body);
        let session: AuthSession = unwrap_envelope(self.transport.send(request).await?)?;
        self.persist_session(&session).await;
        Ok(session)
    }

    /// Signs out: best-effort remote call, then unconditional local
    /// deletion of the token pair and cached profile.
    pub async fn logout(&self) {
        if let Err(err) = self.transport.send(ApiRequest::post("/auth/logout")).await {
            warn!(error = %err, "remote logout failed; clearing local session anyway");
        }
        self.clear_session().await;
    }

    /// Returns the current user's profile, preferring the cached copy and
    /// falling back to `/auth/me` (re-caching on success).
    ///
    /// Never fails: `None` means neither the cache nor the fetch route
    /// produced a profile.
    pub async fn current_user(&self) -> Option<User> {
        match self.storage.get(USER_PROFILE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(user) => return Some(user),
                Err(err) => warn!(error = %err, "cached profile unreadable; refetching"),
            },
            Ok(None) => {}
            Err(err) => warn!(error = %err, "profile cache read failed; refetching"),
        }

        let value = self.transport.send(ApiRequest::get("/auth/me")).await.ok()?;
        let user: User = unwrap_envelope(value).ok()?;
        if let Err(err) = self.cache_profile(&user).await {
            warn!(error = %err, "profile re-cache failed");
        }
        Some(user)
    }

    /// Exchanges the stored refresh token for a new access token, storing
    /// and returning it.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::Auth`] — without a network call — when no
    /// refresh token is stored. Any other failure wipes all stored
    /// credentials before propagating, forcing a full re-login rather
    /// than leaving a half-valid state.
    pub async fn refresh_token(&self) -> ApiResult<String> {
        let refresh = self
            .storage
            .get(REFRESH_TOKEN_KEY)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| ApiError::Auth("No refresh token available".to_string()))?;

        match self.request_refresh(&refresh).await {
            Ok(token) => {
                if let Err(err) = self.storage.set(ACCESS_TOKEN_KEY, &token).await {
                    warn!(error = %err, "access token write failed");
                }
                Ok(token)
            }
            Err(err) => {
                self.clear_session().await;
                Err(err)
            }
        }
    }

    /// True iff an access token is present in storage. Does not validate
    /// expiry and never reaches the network.
    pub async fn is_authenticated(&self) -> bool {
        matches!(self.storage.get(ACCESS_TOKEN_KEY).await, Ok(Some(_)))
    }

    async fn request_refresh(&self, refresh: &str) -> ApiResult<String> {
        let request =
            ApiRequest::post("/auth/refresh").with_body(json!({"refreshToken": refresh}));
        let refreshed: RefreshedToken = unwrap_envelope(self.transport.send(request).await?)?;
        Ok(refreshed.token)
    }

    async fn cache_profile(&self, user: &User) -> Result<(), StorageError> {
        let raw = serde_json::to_string(user)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(USER_PROFILE_KEY, &raw).await
    }

    /// Three independent writes, issued concurrently; the session is
    /// usable once all have settled, failed or not.
    async fn persist_session(&self, session: &AuthSession) {
        let (token, refresh, profile) = tokio::join!(
            self.storage.set(ACCESS_TOKEN_KEY, &session.token),
            self.storage.set(REFRESH_TOKEN_KEY, &session.refresh_token),
            self.cache_profile(&session.user),
        );
        for (key, result) in [
            (ACCESS_TOKEN_KEY, token),
            (REFRESH_TOKEN_KEY, refresh),
            (USER_PROFILE_KEY, profile),
        ] {
            if let Err(err) = result {
                warn!(key, error = %err, "session write failed");
            }
        }
    }

    async fn clear_session(&self) {
        let (token, refresh, profile) = tokio::join!(
            self.storage.remove(ACCESS_TOKEN_KEY),
            self.storage.remove(REFRESH_TOKEN_KEY),
            self.storage.remove(USER_PROFILE_KEY),
        );
        for (key, result) in [
            (ACCESS_TOKEN_KEY, token),
            (REFRESH_TOKEN_KEY, refresh),
            (USER_PROFILE_KEY, profile),
        ] {
            if let Err(err) = result {
                warn!(key, error = %err, "session delete failed");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{MemoryStore, StubTransport, user_fixture};
    use pretty_assertions::assert_eq;

    fn service(
        transport: Arc<StubTransport>,
        storage: Arc<MemoryStore>,
    ) -> AuthService<StubTransport, MemoryStore> {
        AuthService::new(transport, storage)
    }

    #[tokio::test]
    async fn test_is_authenticated_checks_token_presence_only() {
        let transport = Arc::new(StubTransport::new());
        let storage = Arc::new(MemoryStore::new());
        let auth = service(Arc::clone(&transport), Arc::clone(&storage));

        assert!(!auth.is_authenticated().await);

        storage.set(ACCESS_TOKEN_KEY, "tok-1").await.unwrap();
        assert!(auth.is_authenticated().await);
        // No network traffic either way.
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_current_user_prefers_cache() {
        let transport = Arc::new(StubTransport::new());
        let storage = Arc::new(MemoryStore::new());
        let user = user_fixture("u-1");
        storage
            .set(USER_PROFILE_KEY, &serde_json::to_string(&user).unwrap())
            .await
            .unwrap();

        let auth = service(Arc::clone(&transport), storage);
        let found = auth.current_user().await.unwrap();
        assert_eq!(found.id, "u-1");
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_current_user_falls_back_to_fetch_and_recaches() {
        let transport = Arc::new(StubTransport::new());
        let storage = Arc::new(MemoryStore::new());
        let user = user_fixture("u-2");
        transport.push_ok(serde_json::json!({
            "success": true,
            "data": serde_json::to_value(&user).unwrap(),
        }));

        let auth = service(Arc::clone(&transport), Arc::clone(&storage));
        let found = auth.current_user().await.unwrap();
        assert_eq!(found.id, "u-2");

        let cached = storage.get(USER_PROFILE_KEY).await.unwrap().unwrap();
        let cached: User = serde_json::from_str(&cached).unwrap();
        assert_eq!(cached, user);
    }

    #[tokio::test]
    async fn test_current_user_returns_none_when_both_routes_fail() {
        let transport = Arc::new(StubTransport::new());
        transport.push_err(ApiError::Network);
        let auth = service(transport, Arc::new(MemoryStore::new()));

        assert_eq!(auth.current_user().await, None);
    }
}
