use crate::auth::{AuthMode, AuthResponse, LoginRequest, SignupRequest};
use crate::config::CrmConfig;
use crate::error::ApiError;
use crate::list::Draft;
use crate::overview::Overview;
use entity_registry::Record;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const OVERVIEW_ENDPOINT: &str = "/api/analytics/overview";

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// REST client for the CRM backend. Cheap to clone.
#[derive(Clone)]
pub struct CrmClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl CrmClient {
    pub fn new(config: &CrmConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.backend_url.clone(),
            token: None,
        }
    }

    /// Sends `Authorization: Bearer <token>` on every request when set.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn endpoint_url(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// `search` is attached only when non-empty.
    pub fn list_url(&self, endpoint: &str, search: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint_url(endpoint)?;
        if !search.is_empty() {
            url.query_pairs_mut().append_pair("search", search);
        }
        Ok(url)
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let url = self.endpoint_url(AuthMode::Login.endpoint())?;
        let resp = send(self.request(Method::POST, url).json(req)).await?;
        decode(resp).await
    }

    pub async fn signup(&self, req: &SignupRequest) -> Result<AuthResponse, ApiError> {
        let url = self.endpoint_url(AuthMode::Signup.endpoint())?;
        let resp = send(self.request(Method::POST, url).json(req)).await?;
        decode(resp).await
    }

    pub async fn list(&self, endpoint: &str, search: &str) -> Result<Vec<Record>, ApiError> {
        let url = self.list_url(endpoint, search)?;
        tracing::debug!("GET {url}");
        let resp = send(self.request(Method::GET, url)).await?;
        decode(resp).await
    }

    /// The created record in the response is not read.
    pub async fn create(&self, endpoint: &str, draft: &Draft) -> Result<(), ApiError> {
        let url = self.endpoint_url(endpoint)?;
        tracing::debug!("POST {url}");
        send(self.request(Method::POST, url).json(draft)).await?;
        Ok(())
    }

    pub async fn overview(&self) -> Result<Overview, ApiError> {
        let url = self.endpoint_url(OVERVIEW_ENDPOINT)?;
        let resp = send(self.request(Method::GET, url)).await?;
        decode(resp).await
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

async fn send(req: RequestBuilder) -> Result<Response, ApiError> {
    let resp = req
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    // Best effort: a missing or non-string `detail` falls back later.
    let detail = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail)
        .and_then(|d| d.as_str().map(ToString::to_string));
    tracing::debug!("backend answered {status}");
    Err(ApiError::Http {
        status: status.as_u16(),
        detail,
    })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> CrmClient {
        CrmClient::new(&CrmConfig::resolve(Some(base)))
    }

    #[test]
    fn empty_search_adds_no_query() {
        let url = client("http://localhost:8000")
            .list_url("/api/leads", "")
            .expect("url");
        assert_eq!(url.as_str(), "http://localhost:8000/api/leads");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn search_term_is_attached_exactly() {
        let url = client("http://localhost:8000")
            .list_url("/api/customers", "acme")
            .expect("url");
        assert_eq!(url.query(), Some("search=acme"));
    }

    #[test]
    fn search_term_is_encoded() {
        let url = client("http://localhost:8000")
            .list_url("/api/tickets", "a&b c")
            .expect("url");
        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "search");
        assert_eq!(pairs[0].1, "a&b c");
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let url = client("https://crm.example.com/backend/")
            .endpoint_url("/api/leads")
            .expect("url");
        assert_eq!(url.as_str(), "https://crm.example.com/backend/api/leads");
    }

    #[test]
    fn unparsable_base_is_reported() {
        let err = client("not a url").endpoint_url("/api/leads").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }
}
