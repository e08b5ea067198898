use serde_json::Value;
use tracing::debug;

use crate::client::http::BoxFuture;
use crate::client::{ApiClient, ApiError, ApiRequest, ProviderError};
use crate::domain::{Credentials, MessageStatus, SendResult, SendSms};
use crate::provider::SendStrategy;
use crate::transport::{decode_send_message_response, encode_send_message, send_endpoint};

/// SMS through the Conversation API `messages:send` endpoint.
#[derive(Clone)]
pub struct ConversationSmsProvider {
    api: ApiClient,
}

impl ConversationSmsProvider {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn send_sms(
        &self,
        credentials: &Credentials,
        request: &SendSms,
    ) -> Result<SendResult, ProviderError> {
        let body =
            encode_send_message(credentials.app_id(), request).map_err(ApiError::encode)?;
        let endpoint = send_endpoint(credentials.project_id());

        debug!(to = request.to().e164(), "sending sms");
        let raw: Value = self
            .api
            .request(credentials, ApiRequest::post(endpoint, body.clone()))
            .await?;

        let accepted = decode_send_message_response(&raw)
            .map_err(|err| ApiError::decode(err, Some(raw.clone())))?;

        Ok(SendResult {
            status: MessageStatus::Queued,
            message_id: accepted.message_id,
            accepted_time: accepted.accepted_time,
            raw,
            request_body: body,
        })
    }
}

impl SendStrategy for ConversationSmsProvider {
    fn send<'a>(
        &'a self,
        credentials: &'a Credentials,
        request: &'a SendSms,
    ) -> BoxFuture<'a, Result<SendResult, ProviderError>> {
        Box::pin(self.send_sms(credentials, request))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::auth::{TokenCache, TokenProvider};
    use crate::client::http::{HttpTransport, RequestBody};
    use crate::client::testing::FakeTransport;
    use crate::client::{ApiErrorKind, DEFAULT_TIMEOUT};
    use crate::domain::{SendOptions, SenderId};

    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("key-id", "key-secret", "proj-1", "app-1").unwrap()
    }

    fn provider(transport: &FakeTransport) -> ConversationSmsProvider {
        let http: Arc<dyn HttpTransport> = Arc::new(transport.clone());
        let tokens = TokenProvider::new(
            Arc::clone(&http),
            Arc::new(TokenCache::new()),
            "https://auth.example.invalid/oauth2/token",
            DEFAULT_TIMEOUT,
        );
        ConversationSmsProvider::new(ApiClient::new(http, tokens, None, DEFAULT_TIMEOUT))
    }

    fn request(options: SendOptions) -> SendSms {
        SendSms::parse("0014155552671", None, "hello", options).unwrap()
    }

    #[tokio::test]
    async fn send_posts_payload_and_returns_queued_result() {
        let transport = FakeTransport::new().with_token("tok", 3600).respond(
            "/messages:send",
            200,
            r#"{"message_id":"01HXYZ","accepted_time":"2024-05-01T10:00:00Z"}"#,
        );
        let provider = provider(&transport);
        let options = SendOptions {
            sms_sender: Some(SenderId::new("Shop").unwrap()),
            callback_url: Some("https://example.invalid/cb".to_owned()),
            metadata: None,
        };

        let result = provider.send(&credentials(), &request(options)).await.unwrap();
        assert_eq!(result.status, MessageStatus::Queued);
        assert_eq!(result.message_id, "01HXYZ");
        assert_eq!(result.accepted_time, "2024-05-01T10:00:00Z");
        assert_eq!(result.raw["message_id"], "01HXYZ");
        assert_eq!(result.request_body["channel_properties"]["SMS_SENDER"], "Shop");

        let sent = transport.requests_to("/messages:send");
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].url,
            "https://us.conversation.api.sinch.com/v1/projects/proj-1/messages:send"
        );
        let Some(RequestBody::Json(body)) = &sent[0].body else {
            panic!("expected JSON body, got {:?}", sent[0].body);
        };
        assert_eq!(body["app_id"], "app-1");
        assert_eq!(
            body["recipient"]["identified_by"]["channel_identities"][0],
            json!({"channel": "SMS", "identity": "+14155552671"})
        );
        assert_eq!(body["callback_url"], "https://example.invalid/cb");
        assert!(body.get("message_metadata").is_none());
    }

    #[tokio::test]
    async fn api_failure_is_wrapped_with_status_and_body() {
        let transport = FakeTransport::new().with_token("tok", 3600).respond(
            "/messages:send",
            403,
            r#"{"error":{"code":403,"message":"Permission denied","status":"PERMISSION_DENIED"}}"#,
        );
        let provider = provider(&transport);

        let err = provider
            .send(&credentials(), &request(SendOptions::default()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code, Some(403));
        assert_eq!(
            err.message,
            "Sinch Build Conversations API error: Permission denied (Status: 403) [PERMISSION_DENIED]"
        );
        assert_eq!(err.response.unwrap()["error"]["status"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn auth_failure_is_wrapped() {
        let transport = FakeTransport::new().respond("/oauth2/token", 401, "Unauthorized");
        let provider = provider(&transport);

        let err = provider
            .send(&credentials(), &request(SendOptions::default()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code, Some(401));
        assert_eq!(
            err.message,
            "Failed to obtain OAuth2 access token: Unauthorized"
        );
        assert!(err.source.unwrap().is_auth_failure());
        assert!(transport.requests_to("/messages:send").is_empty());
    }

    #[tokio::test]
    async fn response_without_message_id_is_a_decode_failure() {
        let transport = FakeTransport::new()
            .with_token("tok", 3600)
            .respond("/messages:send", 200, r#"{"accepted_time":"now"}"#);
        let provider = provider(&transport);

        let err = provider
            .send(&credentials(), &request(SendOptions::default()))
            .await
            .unwrap_err();
        assert_eq!(err.source.unwrap().kind, ApiErrorKind::Decode);
        assert_eq!(err.response, Some(json!({"accepted_time": "now"})));
    }
}
