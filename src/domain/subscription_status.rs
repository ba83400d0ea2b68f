//! src/domain/subscription_status.rs

use crate::domain::ValidationError;

/// Subscription state of a phone number.
///
/// Serialized as `yes`/`no` in the subscriber list file; no other flag value
/// is accepted anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Subscribed,
    Unsubscribed,
}

impl SubscriptionStatus {
    pub fn parse(s: &str) -> Result<SubscriptionStatus, ValidationError> {
        match s.trim() {
            "yes" => Ok(Self::Subscribed),
            "no" => Ok(Self::Unsubscribed),
            other => Err(ValidationError::InvalidSubscriptionFlag(other.to_owned())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subscribed => "yes",
            Self::Unsubscribed => "no",
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
