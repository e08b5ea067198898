use serde::{Deserialize, Serialize};

use crate::domain::{AppId, Channel, ProjectId, SendSms};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid send response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid send payload: {0}")]
    Payload(serde_json::Error),
}

#[derive(Debug, Serialize)]
struct SendMessageJsonRequest<'a> {
    app_id: &'a str,
    recipient: Recipient<'a>,
    message: Message<'a>,
    channel_priority_order: [&'static str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    channel_properties: Option<ChannelProperties<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_metadata: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Recipient<'a> {
    identified_by: IdentifiedBy<'a>,
}

#[derive(Debug, Serialize)]
struct IdentifiedBy<'a> {
    channel_identities: [ChannelIdentity<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChannelIdentity<'a> {
    channel: &'static str,
    identity: &'a str,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    text_message: TextMessage<'a>,
}

#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct ChannelProperties<'a> {
    #[serde(rename = "SMS_SENDER")]
    sms_sender: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageJsonResponse {
    pub message_id: String,
    pub accepted_time: String,
}

pub fn send_endpoint(project_id: &ProjectId) -> String {
    format!("/v1/projects/{}/messages:send", project_id.as_str())
}

/// Build the `messages:send` payload for one SMS.
pub fn encode_send_message(
    app_id: &AppId,
    request: &SendSms,
) -> Result<serde_json::Value, TransportError> {
    let options = request.options();
    let payload = SendMessageJsonRequest {
        app_id: app_id.as_str(),
        recipient: Recipient {
            identified_by: IdentifiedBy {
                channel_identities: [ChannelIdentity {
                    channel: Channel::Sms.as_str(),
                    identity: request.to().e164(),
                }],
            },
        },
        message: Message {
            text_message: TextMessage {
                text: request.text().as_str(),
            },
        },
        channel_priority_order: [Channel::Sms.as_str()],
        channel_properties: options.sms_sender.as_ref().map(|sender| ChannelProperties {
            sms_sender: sender.as_str(),
        }),
        callback_url: non_empty(options.callback_url.as_deref()),
        message_metadata: non_empty(options.metadata.as_deref()),
    };
    serde_json::to_value(payload).map_err(TransportError::Payload)
}

pub fn decode_send_message_response(
    json: &serde_json::Value,
) -> Result<SendMessageJsonResponse, TransportError> {
    Ok(SendMessageJsonResponse::deserialize(json)?)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::{SendOptions, SenderId};

    use super::*;

    fn request(options: SendOptions) -> SendSms {
        SendSms::parse("+14155552671", None, "hello", options).unwrap()
    }

    #[test]
    fn encode_minimal_payload() {
        let app_id = AppId::new("app-1").unwrap();
        let body = encode_send_message(&app_id, &request(SendOptions::default())).unwrap();

        assert_eq!(
            body,
            json!({
                "app_id": "app-1",
                "recipient": {
                    "identified_by": {
                        "channel_identities": [
                            {"channel": "SMS", "identity": "+14155552671"}
                        ]
                    }
                },
                "message": {"text_message": {"text": "hello"}},
                "channel_priority_order": ["SMS"]
            })
        );
    }

    #[test]
    fn encode_includes_optional_fields_when_present() {
        let app_id = AppId::new("app-1").unwrap();
        let options = SendOptions {
            sms_sender: Some(SenderId::new("+15005550006").unwrap()),
            callback_url: Some("https://example.invalid/hook".to_owned()),
            metadata: Some("order-42".to_owned()),
        };
        let body = encode_send_message(&app_id, &request(options)).unwrap();

        assert_eq!(body["channel_properties"], json!({"SMS_SENDER": "+15005550006"}));
        assert_eq!(body["callback_url"], "https://example.invalid/hook");
        assert_eq!(body["message_metadata"], "order-42");
    }

    #[test]
    fn encode_omits_empty_optional_strings() {
        let app_id = AppId::new("app-1").unwrap();
        let options = SendOptions {
            sms_sender: None,
            callback_url: Some(String::new()),
            metadata: Some("  ".to_owned()),
        };
        let body = encode_send_message(&app_id, &request(options)).unwrap();
        let object = body.as_object().unwrap();

        assert!(!object.contains_key("channel_properties"));
        assert!(!object.contains_key("callback_url"));
        assert!(!object.contains_key("message_metadata"));
    }

    #[test]
    fn payload_errors_are_not_reported_as_response_errors() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = TransportError::Payload(source);
        assert!(err.to_string().starts_with("invalid send payload"));
    }

    #[test]
    fn endpoint_is_per_project() {
        let project_id = ProjectId::new("proj-9").unwrap();
        assert_eq!(send_endpoint(&project_id), "/v1/projects/proj-9/messages:send");
    }

    #[test]
    fn decode_reads_id_and_time() {
        let json = json!({"message_id": "01H", "accepted_time": "2024-05-01T10:00:00.123Z"});
        let parsed = decode_send_message_response(&json).unwrap();
        assert_eq!(parsed.message_id, "01H");
        assert_eq!(parsed.accepted_time, "2024-05-01T10:00:00.123Z");

        assert!(decode_send_message_response(&json!({"accepted_time": "x"})).is_err());
    }
}
