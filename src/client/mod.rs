//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod api;
mod error;
pub mod http;
#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::auth::{DEFAULT_TOKEN_ENDPOINT, TokenCache, TokenProvider};
use crate::client::http::{HttpTransport, ReqwestTransport};
use crate::domain::{
    AppInfo, Channel, Credentials, ListMessages, ListMessagesResponse, SendSms, SendSmsResponse,
};
use crate::provider::{ConversationSmsProvider, SendStrategy};
use crate::transport::{
    app_endpoint, decode_app_response, decode_list_messages_response,
    encode_list_messages_query, list_endpoint,
};

pub use api::{ApiClient, ApiRequest, DEFAULT_TIMEOUT};
pub use error::{
    AUTH_FAILED, ApiError, ApiErrorKind, ConversationError, ProviderError, compose_api_message,
};

#[derive(Clone)]
/// Builder for [`ConversationClient`].
///
/// Use this when you need to customize endpoints, the timeout, the user-agent,
/// the token cache, the HTTP transport or the send strategy.
pub struct ConversationClientBuilder {
    credentials: Credentials,
    token_endpoint: String,
    base_url: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
    token_cache: Option<Arc<TokenCache>>,
    transport: Option<Arc<dyn HttpTransport>>,
    send_strategy: Option<Arc<dyn SendStrategy>>,
}

impl ConversationClientBuilder {
    /// Create a builder with the production endpoints and a 30 second timeout.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_owned(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            token_cache: None,
            transport: None,
            send_strategy: None,
        }
    }

    /// Override the OAuth2 token endpoint URL.
    pub fn token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.token_endpoint = endpoint.into();
        self
    }

    /// Send every Conversation API call to `base_url` instead of the region host.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Timeout applied to each request, token requests included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header (ignored with a custom transport).
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use `cache` instead of the process-wide [`TokenCache::shared`].
    pub fn token_cache(mut self, cache: Arc<TokenCache>) -> Self {
        self.token_cache = Some(cache);
        self
    }

    /// Perform HTTP through `transport` instead of `reqwest`.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the default SMS strategy.
    pub fn send_strategy(mut self, strategy: Arc<dyn SendStrategy>) -> Self {
        self.send_strategy = Some(strategy);
        self
    }

    /// Build a [`ConversationClient`].
    pub fn build(self) -> Result<ConversationClient, ConversationError> {
        validate_url("token endpoint", &self.token_endpoint)?;
        if let Some(base_url) = self.base_url.as_deref() {
            validate_url("base url", base_url)?;
        }

        let http: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| ConversationError::Config(err.to_string()))?;
                Arc::new(ReqwestTransport::new(client))
            }
        };

        let tokens = TokenProvider::new(
            Arc::clone(&http),
            self.token_cache.unwrap_or_else(TokenCache::shared),
            self.token_endpoint,
            self.timeout,
        );
        let api = ApiClient::new(http, tokens, self.base_url, self.timeout);
        let strategy = self
            .send_strategy
            .unwrap_or_else(|| Arc::new(ConversationSmsProvider::new(api.clone())));

        Ok(ConversationClient {
            credentials: self.credentials,
            api,
            strategy,
        })
    }
}

fn validate_url(what: &str, value: &str) -> Result<(), ConversationError> {
    url::Url::parse(value)
        .map(drop)
        .map_err(|err| ConversationError::Config(format!("{what} {value:?}: {err}")))
}

#[derive(Clone)]
/// High-level Conversation API client bound to one set of credentials.
///
/// By default it uses:
/// - `https://auth.sinch.com/oauth2/token` for tokens, cached in [`TokenCache::shared`],
/// - `https://{region}.conversation.api.sinch.com` for API calls,
/// - a 30 second timeout per request.
pub struct ConversationClient {
    credentials: Credentials,
    api: ApiClient,
    strategy: Arc<dyn SendStrategy>,
}

impl ConversationClient {
    /// Create a client with default settings.
    ///
    /// For more customization, use [`ConversationClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        let http: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(reqwest::Client::new()));
        let tokens = TokenProvider::new(
            Arc::clone(&http),
            TokenCache::shared(),
            DEFAULT_TOKEN_ENDPOINT,
            DEFAULT_TIMEOUT,
        );
        let api = ApiClient::new(http, tokens, None, DEFAULT_TIMEOUT);
        Self {
            credentials,
            strategy: Arc::new(ConversationSmsProvider::new(api.clone())),
            api,
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> ConversationClientBuilder {
        ConversationClientBuilder::new(credentials)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The authenticated API client, for endpoints without a typed wrapper.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Send one SMS through the configured [`SendStrategy`].
    ///
    /// Errors:
    /// - [`ConversationError::Provider`] when the token request or the send call fails.
    pub async fn send_sms(&self, request: SendSms) -> Result<SendSmsResponse, ConversationError> {
        let result = self.strategy.send(&self.credentials, &request).await?;
        debug!(message_id = %result.message_id, "sms accepted");
        Ok(SendSmsResponse {
            to: request.to().clone(),
            text: request.text().clone(),
            channel: Channel::Sms,
            result,
        })
    }

    /// List messages of the project, one page at a time.
    ///
    /// Errors:
    /// - [`ConversationError::Validation`] when a filter cannot be encoded,
    /// - [`ConversationError::Api`] for token, HTTP or decoding failures.
    pub async fn list_messages(
        &self,
        request: ListMessages,
    ) -> Result<ListMessagesResponse, ConversationError> {
        let query = encode_list_messages_query(&request, self.credentials.app_id())?;
        let endpoint = list_endpoint(self.credentials.project_id());
        let raw: Value = self
            .api
            .request(&self.credentials, ApiRequest::get(endpoint).with_query(query))
            .await?;

        let response = decode_list_messages_response(&raw)
            .map_err(|err| ApiError::decode(err, Some(raw.clone())))?;
        debug!(
            count = response.messages.len(),
            has_more = response.next_page_token.is_some(),
            "listed messages"
        );
        Ok(response)
    }

    /// Probe the credentials by fetching the configured app.
    ///
    /// Errors:
    /// - [`ConversationError::Api`] when the key pair, project or app is rejected.
    pub async fn check_credentials(&self) -> Result<AppInfo, ConversationError> {
        let endpoint = app_endpoint(self.credentials.project_id(), self.credentials.app_id());
        let raw: Value = self
            .api
            .request(&self.credentials, ApiRequest::get(endpoint))
            .await?;
        let app = decode_app_response(raw.clone()).map_err(|err| ApiError::decode(err, Some(raw)))?;
        Ok(app)
    }
}
