use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::basic_authorization;
use crate::auth::cache::{CacheKey, TokenCache};
use crate::client::ApiError;
use crate::client::http::{HttpRequest, HttpTransport, Method, RequestBody};
use crate::domain::Credentials;
use crate::transport::{TokenResponse, decode_error_body, decode_token_response, encode_token_form};

pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://auth.sinch.com/oauth2/token";

/// A cached token is only reused while it outlives this margin.
pub const REFRESH_MARGIN: Duration = Duration::from_secs(300);

/// Lower bound on how long a fetched token is cached.
pub const MIN_CACHE_LIFETIME: Duration = Duration::from_secs(3300);

/// Upper bound on how long a fetched token is cached.
pub const MAX_CACHE_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;

/// How long a token with the given `expires_in` stays in the cache:
/// `max(expires_in - 300s, 3300s)`, with a missing or zero value read as one hour.
/// Lifetimes are capped at [`MAX_CACHE_LIFETIME`].
pub fn cache_lifetime(expires_in: Option<u64>) -> Duration {
    let expires_in = expires_in
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_EXPIRES_IN_SECS);
    Duration::from_secs(expires_in)
        .saturating_sub(REFRESH_MARGIN)
        .clamp(MIN_CACHE_LIFETIME, MAX_CACHE_LIFETIME)
}

/// Client-credentials token source backed by a [`TokenCache`].
#[derive(Clone)]
pub struct TokenProvider {
    http: Arc<dyn HttpTransport>,
    cache: Arc<TokenCache>,
    endpoint: String,
    timeout: Duration,
}

impl TokenProvider {
    pub fn new(
        http: Arc<dyn HttpTransport>,
        cache: Arc<TokenCache>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            cache,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn cache(&self) -> &Arc<TokenCache> {
        &self.cache
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Return a bearer token for `credentials`, fetching one when the cached
    /// entry is missing or about to expire.
    ///
    /// Errors are always [`ApiErrorKind::AuthFailed`](crate::ApiErrorKind::AuthFailed).
    pub async fn access_token(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let key = CacheKey::from_credentials(credentials);
        if let Some(cached) = self.cache.get(&key) {
            if cached.is_fresh_at(Instant::now(), REFRESH_MARGIN) {
                debug!(key_id = credentials.key_id().as_str(), "using cached access token");
                return Ok(cached.token().to_owned());
            }
        }

        debug!(
            key_id = credentials.key_id().as_str(),
            endpoint = %self.endpoint,
            "requesting access token"
        );
        let token = self.fetch(credentials).await?;
        let expires_at = Instant::now()
            .checked_add(cache_lifetime(token.expires_in))
            .ok_or_else(|| ApiError::auth_failed("token lifetime out of range", None, None))?;
        self.cache.set(key, token.access_token.clone(), expires_at);
        Ok(token.access_token)
    }

    async fn fetch(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        let mut request = HttpRequest::new(Method::POST, self.endpoint.as_str())
            .header(
                AUTHORIZATION.as_str(),
                basic_authorization(credentials.key_id(), credentials.key_secret()),
            )
            .header(ACCEPT.as_str(), "application/json");
        request.body = Some(RequestBody::Form(encode_token_form()));
        request.timeout = Some(self.timeout);

        let response = self.http.execute(request).await.map_err(|err| {
            warn!(error = %err, "token request failed before a response");
            ApiError::auth_failed(&err.to_string(), None, None)
        })?;

        if !response.is_success() {
            let envelope = decode_error_body(&response.body);
            warn!(status = response.status, "token endpoint rejected the request");
            let reason = envelope
                .message
                .unwrap_or_else(|| format!("Request failed with status code {}", response.status));
            return Err(ApiError::auth_failed(
                &reason,
                Some(response.status),
                envelope.details,
            ));
        }

        decode_token_response(&response.body).map_err(|err| {
            ApiError::auth_failed(
                &err.to_string(),
                Some(response.status),
                serde_json::from_str::<Value>(&response.body).ok(),
            )
        })
    }
}
