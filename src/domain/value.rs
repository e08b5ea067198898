use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sinch access key id, used as the OAuth2 client id / Basic auth username.
///
/// Invariant: non-empty after trimming.
pub struct KeyId(String);

impl KeyId {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "key_id";

    /// Create a validated [`KeyId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Sinch access key secret.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
/// The value never appears in `Debug` output.
pub struct KeySecret(String);

impl KeySecret {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "key_secret";

    /// Create a validated [`KeySecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for KeySecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeySecret(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sinch project id (`/v1/projects/{project_id}`).
///
/// Invariant: non-empty after trimming.
pub struct ProjectId(String);

impl ProjectId {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "project_id";

    /// Create a validated [`ProjectId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated project id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Conversation API app id (`app_id`).
///
/// Invariant: non-empty after trimming.
pub struct AppId(String);

impl AppId {
    /// Wire field name (`app_id`).
    pub const FIELD: &'static str = "app_id";

    /// Create a validated [`AppId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated app id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Conversation API hosting region.
pub enum Region {
    #[default]
    Us,
    Eu,
    Br,
}

impl Region {
    /// Map a region code (`us`, `eu`, `br`) to a [`Region`].
    ///
    /// Matching ignores case and surrounding whitespace. Anything else falls back to
    /// [`Region::Us`].
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "us" => Self::Us,
            "eu" => Self::Eu,
            "br" => Self::Br,
            other => {
                tracing::warn!(region = other, "unrecognized region, falling back to us");
                Self::Us
            }
        }
    }

    /// Region code as used in hostnames.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Eu => "eu",
            Self::Br => "br",
        }
    }

    /// Base URL of the Conversation API for this region.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Us => "https://us.conversation.api.sinch.com",
            Self::Eu => "https://eu.conversation.api.sinch.com",
            Self::Br => "https://br.conversation.api.sinch.com",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// How requests to the Conversation API are authenticated.
pub enum AuthMethod {
    /// Exchange the key pair for a bearer token (client-credentials grant).
    #[default]
    OAuth2,
    /// Send the key pair directly as HTTP Basic credentials.
    Basic,
}

impl AuthMethod {
    /// Map `oauth2` / `basic` to an [`AuthMethod`]; anything else is OAuth2.
    pub fn from_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("basic") {
            Self::Basic
        } else {
            Self::OAuth2
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Resolved credentials for one Sinch project/app.
///
/// Use [`Credentials::new`] and optionally [`Credentials::with_region`] /
/// [`Credentials::with_auth_method`]. Defaults are region `us` and OAuth2.
pub struct Credentials {
    key_id: KeyId,
    key_secret: KeySecret,
    region: Region,
    project_id: ProjectId,
    app_id: AppId,
    auth_method: AuthMethod,
}

impl Credentials {
    /// Create credentials and validate every field.
    pub fn new(
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
        project_id: impl Into<String>,
        app_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            key_id: KeyId::new(key_id)?,
            key_secret: KeySecret::new(key_secret)?,
            region: Region::default(),
            project_id: ProjectId::new(project_id)?,
            app_id: AppId::new(app_id)?,
            auth_method: AuthMethod::default(),
        })
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn with_auth_method(mut self, auth_method: AuthMethod) -> Self {
        self.auth_method = auth_method;
        self
    }

    pub fn key_id(&self) -> &KeyId {
        &self.key_id
    }

    pub fn key_secret(&self) -> &KeySecret {
        &self.key_secret
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    pub fn auth_method(&self) -> AuthMethod {
        self.auth_method
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text.
///
/// Invariant: between [`MessageText::MIN_CHARS`] and [`MessageText::MAX_CHARS`]
/// characters. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "message";

    pub const MIN_CHARS: usize = 1;
    pub const MAX_CHARS: usize = 1600;

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let actual = value.chars().count();
        if !(Self::MIN_CHARS..=Self::MAX_CHARS).contains(&actual) {
            return Err(ValidationError::MessageLength {
                min: Self::MIN_CHARS,
                max: Self::MAX_CHARS,
                actual,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS sender address (`channel_properties.SMS_SENDER`).
///
/// Invariant: non-empty after trimming. The value must be provisioned for the app.
pub struct SenderId(String);

impl SenderId {
    /// Channel property name used by the Conversation API.
    pub const FIELD: &'static str = "SMS_SENDER";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Page size for `messages` listing (`page_size`).
///
/// Invariant: `1..=1000`.
pub struct PageSize(u32);

impl PageSize {
    /// Wire field name (`page_size`).
    pub const FIELD: &'static str = "page_size";

    pub const MIN: u32 = 1;
    pub const MAX: u32 = 1000;

    /// Create a validated page size.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::PageSizeOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Conversation API channel.
///
/// Channels this crate does not know are reported as [`Channel::Unspecified`].
pub enum Channel {
    Sms,
    Mms,
    Whatsapp,
    Rcs,
    Messenger,
    Instagram,
    Telegram,
    Viber,
    ViberBm,
    Line,
    Wechat,
    KakaoTalk,
    AppleBc,
    Unspecified,
}

impl Channel {
    /// Channel name as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sms => "SMS",
            Self::Mms => "MMS",
            Self::Whatsapp => "WHATSAPP",
            Self::Rcs => "RCS",
            Self::Messenger => "MESSENGER",
            Self::Instagram => "INSTAGRAM",
            Self::Telegram => "TELEGRAM",
            Self::Viber => "VIBER",
            Self::ViberBm => "VIBERBM",
            Self::Line => "LINE",
            Self::Wechat => "WECHAT",
            Self::KakaoTalk => "KAKAOTALK",
            Self::AppleBc => "APPLEBC",
            Self::Unspecified => "CHANNEL_UNSPECIFIED",
        }
    }

    /// Map a wire channel name to a [`Channel`].
    pub fn from_wire(value: &str) -> Self {
        match value {
            "SMS" => Self::Sms,
            "MMS" => Self::Mms,
            "WHATSAPP" => Self::Whatsapp,
            "RCS" => Self::Rcs,
            "MESSENGER" => Self::Messenger,
            "INSTAGRAM" => Self::Instagram,
            "TELEGRAM" => Self::Telegram,
            "VIBER" => Self::Viber,
            "VIBERBM" => Self::ViberBm,
            "LINE" => Self::Line,
            "WECHAT" => Self::Wechat,
            "KAKAOTALK" => Self::KakaoTalk,
            "APPLEBC" => Self::AppleBc,
            _ => Self::Unspecified,
        }
    }
}
