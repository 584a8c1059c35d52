//! Card brand detection from the number prefix

use super::card_digits;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardBrand {
    Visa,
    Mastercard,
    /// Well-formed digits that match neither supported network
    Other,
    /// Empty or malformed input
    Unknown,
}

impl CardBrand {
    pub fn name(&self) -> &'static str {
        match self {
            CardBrand::Visa => "Visa",
            CardBrand::Mastercard => "Mastercard",
            CardBrand::Other => "Other",
            CardBrand::Unknown => "Unknown",
        }
    }

    /// Brands the checkout accepts
    pub fn is_supported(&self) -> bool {
        matches!(self, CardBrand::Visa | CardBrand::Mastercard)
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a (possibly partial) card number by its IIN prefix.
///
/// Visa starts with 4. Mastercard is 51–55 or 2221–2720. Prefix-only, so it
/// already answers while the user is typing.
pub fn card_brand(s: &str) -> CardBrand {
    let digits = match card_digits(s) {
        Some(digits) if !digits.is_empty() => digits,
        _ => return CardBrand::Unknown,
    };

    if digits[0] == 4 {
        return CardBrand::Visa;
    }

    if let Some(two) = prefix(&digits, 2) {
        if (51..=55).contains(&two) {
            return CardBrand::Mastercard;
        }
    }

    if let Some(four) = prefix(&digits, 4) {
        if (2221..=2720).contains(&four) {
            return CardBrand::Mastercard;
        }
    }

    CardBrand::Other
}

fn prefix(digits: &[u32], len: usize) -> Option<u32> {
    digits
        .get(..len)
        .map(|head| head.iter().fold(0, |acc, d| acc * 10 + d))
}

/// Which brand icons should be emphasized for the current card number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BrandHints {
    pub visa: bool,
    pub mastercard: bool,
}

impl BrandHints {
    pub fn for_number(card_number: Option<&str>) -> Self {
        let brand = card_number.map(card_brand).unwrap_or(CardBrand::Unknown);
        Self {
            visa: brand == CardBrand::Visa,
            mastercard: brand == CardBrand::Mastercard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visa_prefix() {
        assert_eq!(card_brand("4242424242424242"), CardBrand::Visa);
        assert_eq!(card_brand("4"), CardBrand::Visa);
        assert_eq!(card_brand("4242 4242"), CardBrand::Visa);
    }

    #[test]
    fn test_mastercard_ranges() {
        assert_eq!(card_brand("5555 5555 5555 4444"), CardBrand::Mastercard);
        assert_eq!(card_brand("51"), CardBrand::Mastercard);
        assert_eq!(card_brand("2221000000000009"), CardBrand::Mastercard);
        assert_eq!(card_brand("2720990000000000"), CardBrand::Mastercard);
        assert_eq!(card_brand("2721000000000000"), CardBrand::Other);
        assert_eq!(card_brand("56"), CardBrand::Other);
    }

    #[test]
    fn test_other_and_unknown() {
        assert_eq!(card_brand("378282246310005"), CardBrand::Other);
        assert_eq!(card_brand("5"), CardBrand::Other);
        assert_eq!(card_brand(""), CardBrand::Unknown);
        assert_eq!(card_brand("  "), CardBrand::Unknown);
        assert_eq!(card_brand("4x"), CardBrand::Unknown);
    }

    #[test]
    fn test_brand_hints() {
        assert_eq!(
            BrandHints::for_number(Some("4242")),
            BrandHints { visa: true, mastercard: false }
        );
        assert_eq!(
            BrandHints::for_number(Some("5500")),
            BrandHints { visa: false, mastercard: true }
        );
        assert_eq!(BrandHints::for_number(None), BrandHints::default());
    }
}
