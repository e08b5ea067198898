//! Typed Rust client for sending SMS through the Sinch Conversation API.
//!
//! The crate is layered: a domain layer of strong types (phone numbers are
//! normalized to E.164 before anything is sent), a transport layer for the
//! wire formats, and a client layer that authenticates with cached OAuth2
//! tokens and orchestrates requests.
//!
//! ```rust,no_run
//! use sinch_conversations::{ConversationClient, Credentials, Region, SendOptions, SendSms};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sinch_conversations::ConversationError> {
//!     let credentials = Credentials::new("key-id", "key-secret", "project-id", "app-id")?
//!         .with_region(Region::Eu);
//!     let client = ConversationClient::new(credentials);
//!     let request = SendSms::parse("020 7946 0018", Some("GB"), "hello", SendOptions::default())?;
//!     let response = client.send_sms(request).await?;
//!     println!("queued as {}", response.result.message_id);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod domain;
pub mod provider;
mod transport;

pub use auth::TokenCache;
pub use client::{
    ApiClient, ApiError, ApiErrorKind, ConversationClient, ConversationClientBuilder,
    ConversationError, ProviderError,
};
pub use domain::{
    AppId, AppInfo, AuthMethod, Channel, ConversationMessage, Credentials, Direction, KeyId,
    KeySecret, ListMessages, ListMessagesResponse, MessageStatus, MessageText, PageSize,
    PhoneError, PhoneNumber, ProjectId, Region, SendOptions, SendResult, SendSms,
    SendSmsResponse, SenderId, ValidationError, normalize_phone_number,
};
pub use provider::{ConversationSmsProvider, SendStrategy};

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct ReadmeDoctests;
