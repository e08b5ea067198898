use crate::domain::phone::PhoneNumber;
use crate::domain::value::{Channel, MessageText};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageStatus {
    Queued,
    Sent,
    Failed,
}

impl MessageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

/// Outcome of a successful send as reported by a send strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct SendResult {
    pub status: MessageStatus,
    pub message_id: String,
    pub accepted_time: String,
    /// Provider response body, untouched.
    pub raw: serde_json::Value,
    /// Payload that was sent to the provider.
    pub request_body: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendSmsResponse {
    pub to: PhoneNumber,
    pub text: MessageText,
    pub channel: Channel,
    pub result: SendResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    ToContact,
    ToApp,
    Undefined,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelIdentity {
    pub channel: Channel,
    pub identity: String,
    pub app_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversationMessage {
    pub id: String,
    pub direction: Direction,
    pub accept_time: String,
    pub channel_identity: ChannelIdentity,
    pub contact_id: Option<String>,
    pub conversation_id: Option<String>,
    pub app_text: Option<String>,
    pub contact_text: Option<String>,
    pub metadata: Option<String>,
    pub raw: serde_json::Value,
}

impl ConversationMessage {
    /// Text of the message: the app's text for outbound messages, the contact's
    /// text otherwise. Empty when the message carries no text payload.
    pub fn text(&self) -> &str {
        let text = match self.direction {
            Direction::ToContact => self.app_text.as_deref(),
            Direction::ToApp | Direction::Undefined => self.contact_text.as_deref(),
        };
        text.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListMessagesResponse {
    pub messages: Vec<ConversationMessage>,
    pub next_page_token: Option<String>,
}

/// Conversation API app as returned by the credential probe.
#[derive(Debug, Clone, PartialEq)]
pub struct AppInfo {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub raw: serde_json::Value,
}
