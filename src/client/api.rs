//! Authenticated access to the Conversation API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::{TokenProvider, basic_authorization};
use crate::client::error::ApiError;
use crate::client::http::{HttpRequest, HttpTransport, Method, RequestBody};
use crate::domain::{AuthMethod, Credentials, Region};
use crate::transport::decode_error_body;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One call against the Conversation API, relative to the region base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path starting with `/`, e.g. `/v1/projects/{id}/messages`.
    pub endpoint: String,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            endpoint: endpoint.into(),
            body: None,
            query: Vec::new(),
        }
    }

    pub fn post(endpoint: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            endpoint: endpoint.into(),
            body: Some(body),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }
}

/// Resolves region URLs, attaches auth headers and maps failures to [`ApiError`].
#[derive(Clone)]
pub struct ApiClient {
    http: Arc<dyn HttpTransport>,
    tokens: TokenProvider,
    base_url: Option<String>,
    timeout: Duration,
}

impl ApiClient {
    /// `base_url`, when set, replaces the region table (used against mocks and proxies).
    pub fn new(
        http: Arc<dyn HttpTransport>,
        tokens: TokenProvider,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            tokens,
            base_url: base_url.map(|url| url.trim_end_matches('/').to_owned()),
            timeout,
        }
    }

    pub fn tokens(&self) -> &TokenProvider {
        &self.tokens
    }

    pub fn base_url(&self, region: Region) -> &str {
        self.base_url.as_deref().unwrap_or(region.base_url())
    }

    /// Perform `request` and decode the JSON response into `T`.
    ///
    /// An empty 2xx body decodes as JSON `null`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        credentials: &Credentials,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        let authorization = self.authorization(credentials).await?;
        let url = format!("{}{}", self.base_url(credentials.region()), request.endpoint);

        let mut http_request = HttpRequest::new(request.method.clone(), url.as_str())
            .header(AUTHORIZATION.as_str(), authorization)
            .header(CONTENT_TYPE.as_str(), "application/json")
            .header(ACCEPT.as_str(), "application/json");
        http_request.query = request.query;
        http_request.body = request.body.map(RequestBody::Json);
        http_request.timeout = Some(self.timeout);

        debug!(method = %request.method, %url, "sending conversation api request");
        let response = self.http.execute(http_request).await.map_err(|err| {
            warn!(method = %request.method, %url, error = %err, "conversation api unreachable");
            ApiError::transport(&*err)
        })?;

        if !response.is_success() {
            let err = ApiError::from_response(response.status, decode_error_body(&response.body));
            warn!(
                method = %request.method,
                %url,
                status = response.status,
                error_code = err.error_code.as_deref().unwrap_or_default(),
                "conversation api returned an error"
            );
            return Err(err);
        }

        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(body).map_err(|err| {
            ApiError::decode(err, serde_json::from_str::<Value>(body).ok())
        })
    }

    async fn authorization(&self, credentials: &Credentials) -> Result<String, ApiError> {
        match credentials.auth_method() {
            AuthMethod::OAuth2 => {
                let token = self.tokens.access_token(credentials).await?;
                Ok(format!("Bearer {token}"))
            }
            AuthMethod::Basic => Ok(basic_authorization(
                credentials.key_id(),
                credentials.key_secret(),
            )),
        }
    }
}
