//! Typed calls from components to the CRM backend.

use crate::storage::BrowserSession;
use crm_core::api::CrmClient;
use crm_core::auth::{AuthMode, AuthResponse, LoginRequest, SignupRequest};
use crm_core::config::CrmConfig;
use crm_core::error::ApiError;
use crm_core::list::Draft;
use crm_core::overview::Overview;
use crm_core::{EntityKind, Record};

#[derive(Clone, Debug, Default)]
pub struct Credentials {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct Bridge {
    client: CrmClient,
    session: BrowserSession,
}

impl Bridge {
    pub fn new(config: &CrmConfig, session: BrowserSession) -> Self {
        Self {
            client: CrmClient::new(config),
            session,
        }
    }

    pub fn session(&self) -> &BrowserSession {
        &self.session
    }

    fn authorized(&self) -> CrmClient {
        self.client.clone().with_token(self.session.token())
    }

    pub async fn authenticate(
        &self,
        mode: AuthMode,
        creds: &Credentials,
    ) -> Result<AuthResponse, ApiError> {
        match mode {
            AuthMode::Login => {
                self.client
                    .login(&LoginRequest {
                        email: creds.email.clone(),
                        password: creds.password.clone(),
                    })
                    .await
            }
            AuthMode::Signup => {
                self.client
                    .signup(&SignupRequest {
                        name: creds.name.clone(),
                        email: creds.email.clone(),
                        password: creds.password.clone(),
                    })
                    .await
            }
        }
    }

    pub async fn fetch_records(
        &self,
        kind: EntityKind,
        search: &str,
    ) -> Result<Vec<Record>, ApiError> {
        self.authorized().list(kind.endpoint(), search).await
    }

    pub async fn create_record(&self, kind: EntityKind, draft: &Draft) -> Result<(), ApiError> {
        self.authorized().create(kind.endpoint(), draft).await
    }

    pub async fn fetch_overview(&self) -> Result<Overview, ApiError> {
        self.authorized().overview().await
    }
}
