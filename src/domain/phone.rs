use std::fmt;
use std::str::FromStr;

use phonenumber::country;

/// Reasons a phone number could not be normalized to E.164.
///
/// These are ordinary results, not faults: callers are expected to surface
/// the message to whoever entered the number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    Empty,
    CountryRequired,
    Invalid { country: Option<String> },
}

impl fmt::Display for PhoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Phone number is empty"),
            Self::CountryRequired => f.write_str(
                "A country is required to be selected for numbers not in international format.",
            ),
            Self::Invalid {
                country: Some(country),
            } => write!(
                f,
                "Phone number cannot be formatted into valid international number for country {country}."
            ),
            Self::Invalid { country: None } => {
                f.write_str("Phone number cannot be formatted into valid international number.")
            }
        }
    }
}

impl std::error::Error for PhoneError {}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number validated against its country's numbering plan, held in E.164.
///
/// The only way to obtain one is [`PhoneNumber::normalize`].
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize free-form input into E.164.
    ///
    /// - a leading `00` is read as the international prefix (`+`),
    /// - numbers without `+` need `default_country` (ISO 3166 alpha-2, e.g. `"US"`),
    /// - the parsed number must be valid for its country, not just well-formed.
    pub fn normalize(input: &str, default_country: Option<&str>) -> Result<Self, PhoneError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let candidate = match trimmed.strip_prefix("00") {
            Some(rest) if !rest.is_empty() => format!("+{rest}"),
            _ => trimmed.to_owned(),
        };

        let default_country = default_country
            .map(str::trim)
            .filter(|code| !code.is_empty());

        let international = candidate.starts_with('+');
        if !international && default_country.is_none() {
            return Err(PhoneError::CountryRequired);
        }

        let invalid = || PhoneError::Invalid {
            country: default_country.map(str::to_owned),
        };

        let region = match default_country {
            Some(code) => {
                Some(country::Id::from_str(&code.to_ascii_uppercase()).map_err(|_| invalid())?)
            }
            None => None,
        };

        let parsed = phonenumber::parse(region, &candidate).map_err(|_| invalid())?;
        if !phonenumber::is_valid(&parsed) {
            return Err(invalid());
        }

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();
        Ok(Self(e164))
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-function form of [`PhoneNumber::normalize`] returning the E.164 string.
pub fn normalize_phone_number(
    input: &str,
    default_country: Option<&str>,
) -> Result<String, PhoneError> {
    PhoneNumber::normalize(input, default_country).map(|phone| phone.0)
}
