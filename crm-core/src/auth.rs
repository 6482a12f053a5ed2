use crate::error::{ApiError, Operation};
use crate::routing::Route;
use crate::session::SessionStore;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub user: UserProfile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    pub fn endpoint(self) -> &'static str {
        match self {
            AuthMode::Login => "/api/auth/login",
            AuthMode::Signup => "/api/auth/signup",
        }
    }

    pub fn operation(self) -> Operation {
        match self {
            AuthMode::Login => Operation::Login,
            AuthMode::Signup => Operation::Signup,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "Welcome back",
            AuthMode::Signup => "Create your account",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            AuthMode::Login => "Sign in to your CRM",
            AuthMode::Signup => "Start using the CRM in minutes",
        }
    }

    pub fn submit_label(self, submitting: bool) -> &'static str {
        match (self, submitting) {
            (AuthMode::Login, false) => "Sign In",
            (AuthMode::Login, true) => "Signing in...",
            (AuthMode::Signup, false) => "Create account",
            (AuthMode::Signup, true) => "Creating account...",
        }
    }

    /// The other form, as (prompt, link text, route).
    pub fn switch_link(self) -> (&'static str, &'static str, Route) {
        match self {
            AuthMode::Login => ("Don't have an account?", "Sign up", Route::Signup),
            AuthMode::Signup => ("Already have an account?", "Sign in", Route::Login),
        }
    }
}

pub const SESSION_SAVE_FAILED: &str = "Could not save session";

/// Submission state of a login or signup form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub submitting: bool,
    pub error: Option<String>,
}

impl AuthForm {
    /// Returns false while a previous submission is still in flight.
    pub fn begin(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        self.error = None;
        true
    }

    /// Settles the in-flight submission. Returns where to navigate, if anywhere.
    pub fn finish<S: KeyValueStore>(
        &mut self,
        mode: AuthMode,
        result: Result<AuthResponse, ApiError>,
        session: &SessionStore<S>,
    ) -> Option<Route> {
        self.submitting = false;
        match result {
            Ok(auth) => match session.establish(&auth) {
                Ok(()) => Some(Route::Root),
                Err(err) => {
                    tracing::warn!("failed to persist session: {err}");
                    self.error = Some(SESSION_SAVE_FAILED.into());
                    None
                }
            },
            Err(err) => {
                tracing::debug!("{mode:?} rejected: {err}");
                self.error = Some(err.user_message(mode.operation()));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn jane() -> AuthResponse {
        serde_json::from_value(serde_json::json!({
            "token": "t1",
            "user": {"name": "Jane", "id": 4, "role": "admin"}
        }))
        .expect("auth response")
    }

    #[test]
    fn successful_login_stores_session_and_navigates_home() {
        let session = SessionStore::new(MemoryStore::new());
        let mut form = AuthForm::default();
        assert!(form.begin());

        let next = form.finish(AuthMode::Login, Ok(jane()), &session);

        assert_eq!(next, Some(Route::Root));
        assert_eq!(session.token().as_deref(), Some("t1"));
        assert_eq!(session.display_name(), "Jane");
        assert!(!form.submitting);
        assert_eq!(form.error, None);
    }

    #[test]
    fn rejected_login_shows_detail_and_leaves_storage_alone() {
        let store = MemoryStore::new();
        let session = SessionStore::new(store.clone());
        let mut form = AuthForm::default();
        form.begin();

        let err = ApiError::Http {
            status: 401,
            detail: Some("Invalid credentials".into()),
        };
        let next = form.finish(AuthMode::Login, Err(err), &session);

        assert_eq!(next, None);
        assert_eq!(form.error.as_deref(), Some("Invalid credentials"));
        assert!(store.keys().is_empty());
    }

    #[test]
    fn resubmission_is_refused_while_in_flight() {
        let mut form = AuthForm::default();
        assert!(form.begin());
        assert!(!form.begin());
    }

    #[test]
    fn begin_clears_previous_error() {
        let mut form = AuthForm {
            submitting: false,
            error: Some("Login failed".into()),
        };
        form.begin();
        assert_eq!(form.error, None);
    }

    #[test]
    fn storage_failure_does_not_navigate() {
        let store = MemoryStore::new();
        store.fail_writes_to(crate::session::USER_KEY);
        let session = SessionStore::new(store.clone());
        let mut form = AuthForm::default();
        form.begin();

        let next = form.finish(AuthMode::Signup, Ok(jane()), &session);

        assert_eq!(next, None);
        assert_eq!(form.error.as_deref(), Some(SESSION_SAVE_FAILED));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn signup_without_detail_uses_fallback() {
        let session = SessionStore::new(MemoryStore::new());
        let mut form = AuthForm::default();
        form.begin();
        let err = ApiError::Http {
            status: 400,
            detail: None,
        };
        form.finish(AuthMode::Signup, Err(err), &session);
        assert_eq!(form.error.as_deref(), Some("Sign up failed"));
    }
}
