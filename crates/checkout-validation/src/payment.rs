//! Payload handed to the external payment collaborator

use crate::card::{digits_only, mask_card_number};
use crate::error::SubmitError;
use crate::field::{FieldName, FormSnapshot};
use serde::Serialize;

/// Request body for a payment call, built from a validated snapshot
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    pub email: String,
    /// Digits only, display spacing removed
    pub card_number: String,
    pub card_expire: String,
    pub cvv: String,
}

impl PaymentRequest {
    pub fn from_snapshot(snapshot: &FormSnapshot) -> Result<Self, SubmitError> {
        let take = |field: FieldName| {
            snapshot
                .get(field)
                .map(str::to_string)
                .ok_or(SubmitError::Incomplete { field })
        };

        Ok(Self {
            email: take(FieldName::Email)?,
            card_number: digits_only(&take(FieldName::CardNumber)?),
            card_expire: take(FieldName::CardExpire)?,
            cvv: take(FieldName::Cvv)?,
        })
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self)
    }
}

impl std::fmt::Debug for PaymentRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentRequest")
            .field("email", &self.email)
            .field("card_number", &mask_card_number(&self.card_number))
            .field("card_expire", &self.card_expire)
            .field("cvv", &"***")
            .finish()
    }
}
