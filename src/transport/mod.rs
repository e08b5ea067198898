//! Transport layer: wire-format details (serialization/deserialization).

mod app;
mod error;
mod list_messages;
mod send_message;
mod token;

pub use app::{app_endpoint, decode_app_response};
pub use error::{ErrorEnvelope, decode_error_body};
pub use list_messages::{
    decode_list_messages_response, encode_list_messages_query, list_endpoint,
};
pub use send_message::{decode_send_message_response, encode_send_message, send_endpoint};
pub use token::{TokenResponse, decode_token_response, encode_token_form};
