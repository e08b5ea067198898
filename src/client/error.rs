use std::error::Error as StdError;

use serde_json::Value;

use crate::domain::ValidationError;
use crate::transport::ErrorEnvelope;

/// Prefix of every Conversation API error message.
const API_ERROR_PREFIX: &str = "Sinch Build Conversations API error";
const AUTH_ERROR_PREFIX: &str = "Failed to obtain OAuth2 access token";

/// `error_code` carried by token endpoint failures.
pub const AUTH_FAILED: &str = "AUTH_FAILED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// The token endpoint was unreachable or rejected the key pair.
    AuthFailed,
    /// The Conversation API answered with a non-2xx status.
    Api,
    /// No HTTP response was received.
    Transport,
    /// A 2xx response body did not have the expected shape.
    Decode,
    /// The request payload could not be built; nothing was sent.
    Encode,
}

/// Uniform error for everything that goes over the wire.
///
/// `message` is ready for display; the other fields are kept for callers that
/// need to branch or log.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub status_code: Option<u16>,
    pub error_code: Option<String>,
    pub details: Option<Value>,
}

impl ApiError {
    pub(crate) fn auth_failed(
        reason: &str,
        status_code: Option<u16>,
        details: Option<Value>,
    ) -> Self {
        Self {
            kind: ApiErrorKind::AuthFailed,
            message: format!("{AUTH_ERROR_PREFIX}: {reason}"),
            status_code,
            error_code: Some(AUTH_FAILED.to_owned()),
            details,
        }
    }

    /// Build the error for a non-2xx Conversation API response.
    ///
    /// The envelope code wins over the HTTP status when both are present.
    pub(crate) fn from_response(http_status: u16, envelope: ErrorEnvelope) -> Self {
        let status_code = envelope.code.or(Some(http_status));
        let reason = envelope
            .message
            .unwrap_or_else(|| format!("Request failed with status code {http_status}"));
        Self {
            kind: ApiErrorKind::Api,
            message: compose_api_message(&reason, status_code, envelope.status.as_deref()),
            status_code,
            error_code: envelope.status,
            details: envelope.details,
        }
    }

    pub(crate) fn transport(err: &(dyn StdError + Send + Sync)) -> Self {
        Self {
            kind: ApiErrorKind::Transport,
            message: compose_api_message(&err.to_string(), None, None),
            status_code: None,
            error_code: None,
            details: None,
        }
    }

    pub(crate) fn decode(err: impl std::fmt::Display, body: Option<Value>) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            message: compose_api_message(&format!("unexpected response body: {err}"), None, None),
            status_code: None,
            error_code: None,
            details: body,
        }
    }

    pub(crate) fn encode(err: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Encode,
            message: compose_api_message(&format!("cannot encode request: {err}"), None, None),
            status_code: None,
            error_code: None,
            details: None,
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        self.kind == ApiErrorKind::AuthFailed
    }
}

/// `"<prefix>: <message> (Status: <code>) [<status>]"`, each marker only when known.
pub fn compose_api_message(message: &str, code: Option<u16>, status: Option<&str>) -> String {
    let mut composed = format!("{API_ERROR_PREFIX}: {message}");
    if let Some(code) = code {
        composed.push_str(&format!(" (Status: {code})"));
    }
    if let Some(status) = status.filter(|status| !status.is_empty()) {
        composed.push_str(&format!(" [{status}]"));
    }
    composed
}

/// Failure reported by a send strategy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
    pub status_code: Option<u16>,
    pub response: Option<Value>,
    #[source]
    pub source: Option<ApiError>,
}

impl From<ApiError> for ProviderError {
    fn from(err: ApiError) -> Self {
        Self {
            message: err.message.clone(),
            status_code: err.status_code,
            response: err.details.clone(),
            source: Some(err),
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`ConversationClient`](crate::ConversationClient).
pub enum ConversationError {
    /// Token, HTTP, transport or decoding failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The send strategy failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The client builder was given an unusable setting.
    #[error("invalid configuration: {0}")]
    Config(String),
}
