use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::domain::{
    AppId, Channel, ChannelIdentity, ConversationMessage, Direction, ListMessages,
    ListMessagesResponse, PageSize, ProjectId, ValidationError,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid list response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum TransportDirection {
    ToContact,
    ToApp,
    #[serde(other)]
    UndefinedDirection,
}

impl From<TransportDirection> for Direction {
    fn from(value: TransportDirection) -> Self {
        match value {
            TransportDirection::ToContact => Direction::ToContact,
            TransportDirection::ToApp => Direction::ToApp,
            TransportDirection::UndefinedDirection => Direction::Undefined,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListMessagesJsonResponse {
    #[serde(default)]
    messages: Vec<Value>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageJson {
    id: String,
    #[serde(default = "undefined_direction")]
    direction: TransportDirection,
    #[serde(default)]
    accept_time: String,
    channel_identity: ChannelIdentityJson,
    #[serde(default)]
    contact_id: Option<String>,
    #[serde(default)]
    conversation_id: Option<String>,
    #[serde(default)]
    app_message: Option<TextPayloadJson>,
    #[serde(default)]
    contact_message: Option<TextPayloadJson>,
    #[serde(default)]
    metadata: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChannelIdentityJson {
    channel: String,
    identity: String,
    #[serde(default)]
    app_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextPayloadJson {
    #[serde(default)]
    text_message: Option<TextMessageJson>,
}

#[derive(Debug, Deserialize)]
struct TextMessageJson {
    text: String,
}

fn undefined_direction() -> TransportDirection {
    TransportDirection::UndefinedDirection
}

pub fn list_endpoint(project_id: &ProjectId) -> String {
    format!("/v1/projects/{}/messages", project_id.as_str())
}

/// Encode list filters as query parameters, skipping empty values.
pub fn encode_list_messages_query(
    request: &ListMessages,
    default_app_id: &AppId,
) -> Result<Vec<(String, String)>, ValidationError> {
    let mut query = Vec::<(String, String)>::new();

    let app_id = request.app_id.as_ref().unwrap_or(default_app_id);
    query.push((AppId::FIELD.to_owned(), app_id.as_str().to_owned()));

    push_text(&mut query, "contact_id", request.contact_id.as_deref());
    push_text(&mut query, "conversation_id", request.conversation_id.as_deref());
    if let Some(start_time) = request.start_time {
        query.push(("start_time".to_owned(), format_time(start_time, "start_time")?));
    }
    if let Some(end_time) = request.end_time {
        query.push(("end_time".to_owned(), format_time(end_time, "end_time")?));
    }
    if let Some(page_size) = request.page_size {
        query.push((PageSize::FIELD.to_owned(), page_size.value().to_string()));
    }
    if let Some(channel) = request.channel {
        query.push(("channel".to_owned(), channel.as_str().to_owned()));
    }
    push_text(&mut query, "page_token", request.page_token.as_deref());

    Ok(query)
}

fn push_text(query: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
        query.push((key.to_owned(), value.to_owned()));
    }
}

fn format_time(value: OffsetDateTime, field: &'static str) -> Result<String, ValidationError> {
    value
        .format(&Rfc3339)
        .map_err(|_| ValidationError::InvalidTimestamp { field })
}

pub fn decode_list_messages_response(
    json: &Value,
) -> Result<ListMessagesResponse, TransportError> {
    let parsed = ListMessagesJsonResponse::deserialize(json)?;

    let messages = parsed
        .messages
        .into_iter()
        .map(decode_message)
        .collect::<Result<Vec<_>, TransportError>>()?;

    Ok(ListMessagesResponse {
        messages,
        next_page_token: parsed.next_page_token.filter(|token| !token.is_empty()),
    })
}

fn decode_message(raw: Value) -> Result<ConversationMessage, TransportError> {
    let message = MessageJson::deserialize(&raw)?;
    Ok(ConversationMessage {
        id: message.id,
        direction: message.direction.into(),
        accept_time: message.accept_time,
        channel_identity: ChannelIdentity {
            channel: Channel::from_wire(&message.channel_identity.channel),
            identity: message.channel_identity.identity,
            app_id: message.channel_identity.app_id,
        },
        contact_id: message.contact_id,
        conversation_id: message.conversation_id,
        app_text: message.app_message.and_then(TextPayloadJson::into_text),
        contact_text: message.contact_message.and_then(TextPayloadJson::into_text),
        metadata: message.metadata,
        raw,
    })
}

impl TextPayloadJson {
    fn into_text(self) -> Option<String> {
        self.text_message.map(|message| message.text)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::*;

    fn app_id() -> AppId {
        AppId::new("app-default").unwrap()
    }

    #[test]
    fn encode_defaults_app_id_only() {
        let query = encode_list_messages_query(&ListMessages::default(), &app_id()).unwrap();
        assert_eq!(
            query,
            vec![("app_id".to_owned(), "app-default".to_owned())]
        );
    }

    #[test]
    fn encode_all_filters_in_order() {
        let request = ListMessages {
            app_id: Some(AppId::new("app-other").unwrap()),
            contact_id: Some("contact-1".to_owned()),
            conversation_id: Some("conv-1".to_owned()),
            start_time: Some(datetime!(2024-01-02 03:04:05 UTC)),
            end_time: Some(datetime!(2024-01-03 00:00:00 UTC)),
            page_size: Some(PageSize::new(50).unwrap()),
            channel: Some(Channel::Whatsapp),
            page_token: Some("tok".to_owned()),
        };
        let query = encode_list_messages_query(&request, &app_id()).unwrap();
        assert_eq!(
            query,
            vec![
                ("app_id".to_owned(), "app-other".to_owned()),
                ("contact_id".to_owned(), "contact-1".to_owned()),
                ("conversation_id".to_owned(), "conv-1".to_owned()),
                ("start_time".to_owned(), "2024-01-02T03:04:05Z".to_owned()),
                ("end_time".to_owned(), "2024-01-03T00:00:00Z".to_owned()),
                ("page_size".to_owned(), "50".to_owned()),
                ("channel".to_owned(), "WHATSAPP".to_owned()),
                ("page_token".to_owned(), "tok".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_skips_blank_strings() {
        let request = ListMessages {
            contact_id: Some("   ".to_owned()),
            page_token: Some(String::new()),
            ..Default::default()
        };
        let query = encode_list_messages_query(&request, &app_id()).unwrap();
        assert_eq!(query.len(), 1);
    }

    #[test]
    fn decode_maps_messages_and_page_token() {
        let json = json!({
            "messages": [
                {
                    "id": "m1",
                    "direction": "TO_CONTACT",
                    "accept_time": "2024-01-01T00:00:00Z",
                    "channel_identity": {"channel": "SMS", "identity": "+14155552671", "app_id": "app-1"},
                    "contact_id": "c1",
                    "conversation_id": "conv1",
                    "app_message": {"text_message": {"text": "hi there"}},
                    "metadata": "meta"
                },
                {
                    "id": "m2",
                    "direction": "TO_APP",
                    "accept_time": "2024-01-01T00:01:00Z",
                    "channel_identity": {"channel": "SMS", "identity": "+14155552671"},
                    "contact_message": {"text_message": {"text": "reply"}}
                },
                {
                    "id": "m3",
                    "direction": "SIDEWAYS",
                    "channel_identity": {"channel": "FAX", "identity": "x"},
                    "contact_message": {"media_message": {"url": "https://example.invalid/a.png"}}
                }
            ],
            "next_page_token": "next"
        });

        let response = decode_list_messages_response(&json).unwrap();
        assert_eq!(response.next_page_token.as_deref(), Some("next"));
        assert_eq!(response.messages.len(), 3);

        let first = &response.messages[0];
        assert_eq!(first.direction, Direction::ToContact);
        assert_eq!(first.text(), "hi there");
        assert_eq!(first.channel_identity.app_id.as_deref(), Some("app-1"));
        assert_eq!(first.metadata.as_deref(), Some("meta"));
        assert_eq!(first.raw["id"], "m1");

        let second = &response.messages[1];
        assert_eq!(second.direction, Direction::ToApp);
        assert_eq!(second.text(), "reply");

        let third = &response.messages[2];
        assert_eq!(third.direction, Direction::Undefined);
        assert_eq!(third.channel_identity.channel, Channel::Unspecified);
        assert_eq!(third.text(), "");
    }

    #[test]
    fn decode_treats_empty_page_token_as_last_page() {
        let json = json!({"messages": [], "next_page_token": ""});
        let response = decode_list_messages_response(&json).unwrap();
        assert!(response.messages.is_empty());
        assert_eq!(response.next_page_token, None);

        let response = decode_list_messages_response(&json!({})).unwrap();
        assert!(response.messages.is_empty());
    }

    #[test]
    fn decode_rejects_message_without_id() {
        let json = json!({"messages": [{"channel_identity": {"channel": "SMS", "identity": "x"}}]});
        assert!(decode_list_messages_response(&json).is_err());
    }
}
