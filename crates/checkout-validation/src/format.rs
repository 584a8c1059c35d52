//! Live formatting applied to every keystroke before it reaches the store

use crate::card::{digits_only, format_card_number, format_expiry, EXPIRY_SEPARATOR};
use crate::field::FieldName;

/// Maps raw input plus the previously stored value to the next stored value.
///
/// Stateless: the output depends only on the arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatterPipeline;

impl FormatterPipeline {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, field: FieldName, raw: &str, previous: &str) -> String {
        match field {
            FieldName::CardNumber => format_card_number(raw),
            FieldName::CardExpire => apply_expiry(raw, previous),
            FieldName::Email | FieldName::Cvv => raw.to_string(),
        }
    }
}

/// `format_expiry` appends `" / "` as soon as the month is complete, so a
/// backspace that only removed separator characters would be undone by
/// reformatting. Treat it as deleting the last month digit instead.
///
/// Only a shortened `"MM / "` with the same two digits qualifies; any other
/// input, such as `"12/29"` autofilled over `"12 / 29"`, is formatted as is.
fn apply_expiry(raw: &str, previous: &str) -> String {
    let digits = digits_only(raw);
    let erased_separator = raw.len() < previous.len()
        && previous.ends_with(EXPIRY_SEPARATOR)
        && digits.len() == 2
        && digits == digits_only(previous);

    if erased_separator {
        let mut digits = digits;
        digits.pop();
        return format_expiry(&digits);
    }
    format_expiry(raw)
}
