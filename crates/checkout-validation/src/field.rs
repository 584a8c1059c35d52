//! Checkout field names and immutable form snapshots

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed set of fields on the checkout form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Email,
    CardNumber,
    CardExpire,
    Cvv,
}

impl FieldName {
    /// Every field, in form order
    pub const ALL: [FieldName; 4] = [
        FieldName::Email,
        FieldName::CardNumber,
        FieldName::CardExpire,
        FieldName::Cvv,
    ];

    /// Wire name of the field (`card_number`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Email => "email",
            FieldName::CardNumber => "card_number",
            FieldName::CardExpire => "card_expire",
            FieldName::Cvv => "cvv",
        }
    }

    /// Human-readable label used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            FieldName::Email => "Email",
            FieldName::CardNumber => "Card number",
            FieldName::CardExpire => "Expiration date",
            FieldName::Cvv => "CVV",
        }
    }

    /// Whether keystrokes for this field are reformatted before storage
    pub fn is_formatted(&self) -> bool {
        matches!(self, FieldName::CardNumber | FieldName::CardExpire)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown checkout field: '{0}'")]
pub struct UnknownFieldError(pub String);

impl FromStr for FieldName {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

/// A field's stored value; `None` means the user has not touched it
pub type FieldValue = Option<String>;

/// Immutable view of every field at one point in time.
///
/// One slot per [`FieldName`] is guaranteed by construction. Edits go through
/// [`FormSnapshot::with`], which returns a new snapshot and leaves the
/// receiver untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    #[serde(skip)]
    revision: u64,
    pub email: FieldValue,
    pub card_number: FieldValue,
    pub card_expire: FieldValue,
    pub cvv: FieldValue,
}

impl FormSnapshot {
    /// All-absent snapshot at revision 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonic counter bumped by every edit
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Copy-on-write edit: returns the next snapshot with `field` replaced
    pub fn with(&self, field: FieldName, value: FieldValue) -> Self {
        let mut next = self.clone();
        *next.slot_mut(field) = value;
        next.revision = self.revision + 1;
        next
    }

    /// Next snapshot with every field absent, keeping the revision sequence
    pub fn cleared(&self) -> Self {
        Self {
            revision: self.revision + 1,
            ..Self::default()
        }
    }

    /// Compare field values, ignoring revisions
    pub fn same_values(&self, other: &FormSnapshot) -> bool {
        FieldName::ALL
            .into_iter()
            .all(|field| self.get(field) == other.get(field))
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, Option<&str>)> + '_ {
        FieldName::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    fn slot(&self, field: FieldName) -> &FieldValue {
        match field {
            FieldName::Email => &self.email,
            FieldName::CardNumber => &self.card_number,
            FieldName::CardExpire => &self.card_expire,
            FieldName::Cvv => &self.cvv,
        }
    }

    fn slot_mut(&mut self, field: FieldName) -> &mut FieldValue {
        match field {
            FieldName::Email => &mut self.email,
            FieldName::CardNumber => &mut self.card_number,
            FieldName::CardExpire => &mut self.card_expire,
            FieldName::Cvv => &mut self.cvv,
        }
    }
}
