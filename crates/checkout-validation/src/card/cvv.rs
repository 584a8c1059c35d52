//! CVV shape check

/// Digits in an accepted CVV
pub const CVV_LENGTH: usize = 3;

/// Exactly three ASCII digits
pub fn is_valid_cvv(s: &str) -> bool {
    s.len() == CVV_LENGTH && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cvv() {
        assert!(is_valid_cvv("123"));
        assert!(!is_valid_cvv("12"));
        assert!(!is_valid_cvv("1234"));
        assert!(!is_valid_cvv("12a"));
        assert!(!is_valid_cvv(""));
        assert!(!is_valid_cvv(" 123"));
    }
}
