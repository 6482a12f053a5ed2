//! Owned session store over client-persisted storage.
//!
//! The token and the user profile live under two independent keys. Only the
//! token decides authentication; a profile without a token is stale data.

use crate::auth::{AuthResponse, UserProfile};
use crate::error::StorageError;
use crate::routing::Route;
use crate::storage::KeyValueStore;

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "auth_user";
pub const ANONYMOUS_NAME: &str = "User";

#[derive(Clone)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!("token read failed, treating as signed out: {err}");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.token()?;
        let raw = self.store.get(USER_KEY).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::warn!("ignoring unreadable user profile: {err}");
                None
            }
        }
    }

    pub fn display_name(&self) -> String {
        self.user()
            .and_then(|u| u.name)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| ANONYMOUS_NAME.to_string())
    }

    /// Writes both keys or neither.
    pub fn establish(&self, auth: &AuthResponse) -> Result<(), StorageError> {
        let profile = serde_json::to_string(&auth.user)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        let prior_token = self.store.get(TOKEN_KEY)?;
        let prior_user = self.store.get(USER_KEY)?;

        let written = self
            .store
            .set(TOKEN_KEY, &auth.token)
            .and_then(|()| self.store.set(USER_KEY, &profile));
        if let Err(err) = written {
            self.restore(TOKEN_KEY, prior_token.as_deref());
            self.restore(USER_KEY, prior_user.as_deref());
            return Err(err);
        }

        tracing::info!("session established");
        Ok(())
    }

    /// Removes both keys, attempting each even if the other fails.
    pub fn teardown(&self) -> Result<(), StorageError> {
        let token = self.store.remove(TOKEN_KEY);
        let user = self.store.remove(USER_KEY);
        if let Err(err) = token.as_ref().and(user.as_ref()) {
            tracing::warn!("session teardown incomplete: {err}");
        } else {
            tracing::info!("session cleared");
        }
        token.and(user)
    }

    /// Clears the session and returns where to go next. Storage errors are
    /// logged; the user always ends up on the login page.
    pub fn logout(&self) -> Route {
        if let Err(err) = self.teardown() {
            tracing::warn!("logging out with storage error: {err}");
        }
        Route::Login
    }

    fn restore(&self, key: &str, prior: Option<&str>) {
        let restored = match prior {
            Some(value) => self.store.set(key, value),
            None => self.store.remove(key),
        };
        if let Err(err) = restored {
            tracing::warn!("failed to roll back '{key}': {err}");
        }
    }
}
