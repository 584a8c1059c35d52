//! Card-domain predicates and display formatters
//!
//! Everything here is a free function over primitive strings. None of them
//! panic on malformed or partial input; they report "not valid" instead.

pub mod brand;
pub mod cvv;
pub mod expiry;

pub use brand::{card_brand, BrandHints, CardBrand};
pub use cvv::{is_valid_cvv, CVV_LENGTH};
pub use expiry::{
    expiry_parts, format_expiry, is_valid_expiry, is_valid_expiry_in, parse_expiry, YearMonth,
    DEFAULT_CENTURY, EXPIRY_SEPARATOR,
};

/// Fewest digits accepted as a card number
pub const MIN_CARD_DIGITS: usize = 13;
/// Most digits accepted as a card number
pub const MAX_CARD_DIGITS: usize = 19;
/// Digits kept by the live formatter (4 groups of 4)
pub const FORMATTED_CARD_DIGITS: usize = 16;
const GROUP_SIZE: usize = 4;

/// Keep only ASCII digits
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Parse a card number that may contain spaces or hyphens.
///
/// Returns `None` when any other non-digit character is present.
pub(crate) fn card_digits(s: &str) -> Option<Vec<u32>> {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .map(|c| c.to_digit(10))
        .collect()
}

/// Luhn mod-10 check over already-parsed digits
pub fn luhn_valid(digits: &[u32]) -> bool {
    if digits.is_empty() {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Full card-number check: separators stripped, charset, length, Luhn
pub fn is_valid_card_number(s: &str) -> bool {
    match card_digits(s) {
        Some(digits) => {
            (MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&digits.len()) && luhn_valid(&digits)
        }
        None => false,
    }
}

/// Live display format: digits only, capped, a space every four digits
pub fn format_card_number(raw: &str) -> String {
    let digits: Vec<char> = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(FORMATTED_CARD_DIGITS)
        .collect();

    digits
        .chunks(GROUP_SIZE)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Log-safe rendering showing only the last four digits
pub fn mask_card_number(s: &str) -> String {
    let digits = digits_only(s);
    if digits.len() <= GROUP_SIZE {
        return "••••".to_string();
    }
    format!("•••• {}", &digits[digits.len() - GROUP_SIZE..])
}
