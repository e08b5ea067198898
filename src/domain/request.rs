use time::OffsetDateTime;

use crate::domain::phone::PhoneNumber;
use crate::domain::validation::ValidationError;
use crate::domain::value::{AppId, Channel, MessageText, PageSize, SenderId};

/// Optional fields for [`SendSms`].
///
/// Empty `callback_url` / `metadata` strings are treated as absent.
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub sms_sender: Option<SenderId>,
    pub callback_url: Option<String>,
    pub metadata: Option<String>,
}

/// A single SMS to one recipient.
///
/// The recipient is a [`PhoneNumber`], so it is always E.164 by the time the
/// request exists.
#[derive(Debug, Clone)]
pub struct SendSms {
    to: PhoneNumber,
    text: MessageText,
    options: SendOptions,
}

impl SendSms {
    pub fn new(to: PhoneNumber, text: MessageText, options: SendOptions) -> Self {
        Self { to, text, options }
    }

    /// Build a request from raw user input.
    ///
    /// The message length is checked first, then the recipient is normalized
    /// with `default_country` as its numbering context.
    pub fn parse(
        to: &str,
        default_country: Option<&str>,
        text: impl Into<String>,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        let text = MessageText::new(text)?;
        let to = PhoneNumber::normalize(to, default_country).map_err(|err| {
            ValidationError::InvalidPhoneNumber {
                reason: err.to_string(),
            }
        })?;
        Ok(Self { to, text, options })
    }

    pub fn to(&self) -> &PhoneNumber {
        &self.to
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

/// Filters for listing messages.
///
/// `app_id` defaults to the app of the client's credentials. Empty strings are
/// treated as absent.
#[derive(Debug, Clone, Default)]
pub struct ListMessages {
    pub app_id: Option<AppId>,
    pub contact_id: Option<String>,
    pub conversation_id: Option<String>,
    pub start_time: Option<OffsetDateTime>,
    pub end_time: Option<OffsetDateTime>,
    pub page_size: Option<PageSize>,
    pub channel: Option<Channel>,
    pub page_token: Option<String>,
}

impl ListMessages {
    /// Continue a listing from the `next_page_token` of a previous page.
    pub fn next_page(&self, page_token: impl Into<String>) -> Self {
        Self {
            page_token: Some(page_token.into()),
            ..self.clone()
        }
    }
}
