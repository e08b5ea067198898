use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    MessageLength { min: usize, max: usize, actual: usize },
    PageSizeOutOfRange { min: u32, max: u32, actual: u32 },
    InvalidPhoneNumber { reason: String },
    InvalidTimestamp { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::MessageLength { min, max, actual } => {
                write!(
                    f,
                    "Message must be between {min} and {max} characters (got {actual})"
                )
            }
            Self::PageSizeOutOfRange { min, max, actual } => {
                write!(f, "page size out of range: {actual} (expected {min}..={max})")
            }
            Self::InvalidPhoneNumber { reason } => write!(f, "Invalid phone number: {reason}"),
            Self::InvalidTimestamp { field } => {
                write!(f, "{field} cannot be represented as an RFC 3339 timestamp")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
