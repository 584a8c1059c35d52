//! Built-in rules for the checkout fields

pub mod card;
pub mod custom;
pub mod email;
pub mod expiry;
pub mod required;

pub use card::{CardBrandValidator, CardNumberValidator, CvvValidator};
pub use custom::CustomValidator;
pub use email::EmailValidator;
pub use expiry::{ExpiryFormatValidator, NotExpiredValidator};
pub use required::RequiredValidator;
