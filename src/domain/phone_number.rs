//! src/domain/phone_number.rs

use crate::domain::ValidationError;

/// A subscriber phone number in external `+`-prefixed form.
///
/// We do not try to validate numbering plans; the gateway is the authority on
/// what is routable. We only reject values that would corrupt the subscriber
/// list file or denote a missing sender.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(s: String) -> Result<PhoneNumber, ValidationError> {
        let trimmed = s.trim();
        let is_empty = trimmed.is_empty();
        let is_bare_plus = trimmed == "+";
        // A comma would split the row in two on the next load.
        let contains_forbidden_characters = trimmed.contains([',', '\n', '\r', ' ']);
        if is_empty || is_bare_plus || contains_forbidden_characters {
            Err(ValidationError::InvalidPhoneNumber(s))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    /// Normalize an MSISDN as relayed by the gateway, which omits the leading
    /// `+` on `receiver` and `originator` fields.
    pub fn from_msisdn(msisdn: &str) -> Result<PhoneNumber, ValidationError> {
        let msisdn = msisdn.trim();
        if msisdn.starts_with('+') {
            Self::parse(msisdn.to_owned())
        } else {
            Self::parse(format!("+{}", msisdn))
        }
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
