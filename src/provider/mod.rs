//! Send strategies: how a [`SendSms`] becomes a provider call.

mod sms;

use crate::client::ProviderError;
use crate::client::http::BoxFuture;
use crate::domain::{Credentials, SendResult, SendSms};

pub use sms::ConversationSmsProvider;

/// Delivers one message for a set of credentials.
///
/// The client plumbing only sees this trait, so other channels or providers
/// can be plugged in without touching it.
pub trait SendStrategy: Send + Sync {
    fn send<'a>(
        &'a self,
        credentials: &'a Credentials,
        request: &'a SendSms,
    ) -> BoxFuture<'a, Result<SendResult, ProviderError>>;
}
