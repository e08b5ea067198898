//! Domain layer: strong types with validation and invariants (no I/O).

mod phone;
mod request;
mod response;
mod validation;
mod value;

pub use phone::{PhoneError, PhoneNumber, normalize_phone_number};
pub use request::{ListMessages, SendOptions, SendSms};
pub use response::{
    AppInfo, ChannelIdentity, ConversationMessage, Direction, ListMessagesResponse,
    MessageStatus, SendResult, SendSmsResponse,
};
pub use validation::ValidationError;
pub use value::{
    AppId, AuthMethod, Channel, Credentials, KeyId, KeySecret, MessageText, PageSize, ProjectId,
    Region, SenderId,
};
