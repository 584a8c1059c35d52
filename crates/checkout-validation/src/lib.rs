//! # checkout-validation
//!
//! Input normalization and validation core for a payment checkout form.
//!
//! Raw keystrokes for the email, card number, expiry and CVV fields pass
//! through a [`FormatterPipeline`] into a [`FieldModelStore`]. A
//! [`SyncController`] re-validates every new snapshot with the
//! [`ValidationEngine`], and the [`FormController`] gates submission on the
//! result.
//!
//! ```
//! use checkout_validation::prelude::*;
//!
//! let mut form = FormController::new(CheckoutConfig::default(), |_snapshot| {});
//! form.handle_change(FieldName::CardNumber, "4242424242424242");
//!
//! assert_eq!(form.value(FieldName::CardNumber).as_deref(), Some("4242 4242 4242 4242"));
//! assert!(!form.can_submit());
//! ```

pub mod card;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod form;
pub mod format;
pub mod logging;
pub mod payment;
pub mod rules;
pub mod store;
pub mod sync;
pub mod traits;
pub mod validators;

pub use card::{
    card_brand, format_card_number, format_expiry, is_valid_card_number, is_valid_cvv,
    is_valid_expiry, mask_card_number, BrandHints, CardBrand, YearMonth,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CheckoutConfig, ConfigError, ConfigSource};
pub use engine::{ValidationEngine, ValidationState};
pub use error::{ErrorKind, FieldErrors, SubmitError, ValidationError, ValidationResult};
pub use field::{FieldName, FieldValue, FormSnapshot};
pub use form::{FieldProps, FormController};
pub use format::FormatterPipeline;
pub use logging::{init_logging, LoggingConfig};
pub use payment::PaymentRequest;
pub use rules::{Rules, RulesBuilder};
pub use store::{FieldModelStore, SubscriptionId};
pub use sync::SyncController;
pub use traits::ValidationRule;

pub use validators::{
    CardBrandValidator, CardNumberValidator, CustomValidator, CvvValidator, EmailValidator,
    ExpiryFormatValidator, NotExpiredValidator, RequiredValidator,
};

pub mod prelude {
    pub use crate::{
        CheckoutConfig, FieldName, FormController, FormSnapshot, SubmitError, ValidationState,
    };
}
