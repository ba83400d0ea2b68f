//! src/domain/mod.rs

mod phone_number;
mod subscription_status;

pub use phone_number::PhoneNumber;
pub use subscription_status::SubscriptionStatus;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("`{0}` is not a valid phone number.")]
    InvalidPhoneNumber(String),
    #[error("`{0}` is not a valid subscription flag.")]
    InvalidSubscriptionFlag(String),
}
