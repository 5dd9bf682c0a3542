//! ISBN validation, normalization and conversion.
//!
//! Implements the ISBN-10 (weighted sum mod 11) and ISBN-13 (alternating
//! 1,3 weights mod 10) check-digit rules, conversion between the two
//! forms, and the English registrant-group filter used by the catalog.

/// Strip every character that is not a digit or the literal 'X',
/// preserving order. Never fails; may return an empty string.
pub fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == 'X')
        .collect()
}

/// True if `isbn` is exactly 10 characters and satisfies the mod-11
/// checksum, treating 'X' as the value 10.
pub fn is_isbn10(isbn: &str) -> bool {
    if isbn.len() != 10 {
        return false;
    }
    let mut sum: u32 = 0;
    for (i, c) in isbn.chars().enumerate() {
        let value = if c == 'X' {
            10
        } else {
            match c.to_digit(10) {
                Some(v) => v,
                None => return false,
            }
        };
        sum += value * (10 - i as u32);
    }
    sum % 11 == 0
}

/// True if `isbn` is exactly 13 digits and satisfies the mod-10 checksum
/// with alternating 1,3 weights.
pub fn is_isbn13(isbn: &str) -> bool {
    if isbn.len() != 13 {
        return false;
    }
    let mut sum: u32 = 0;
    for (i, c) in isbn.chars().enumerate() {
        let value = match c.to_digit(10) {
            Some(v) => v,
            None => return false,
        };
        sum += value * if i % 2 == 0 { 1 } else { 3 };
    }
    sum % 10 == 0
}

/// Dispatch to the 10- or 13-digit validator based on cleaned length.
/// Any other length is invalid.
pub fn is_valid(isbn: &str) -> bool {
    let isbn = clean(isbn);
    match isbn.len() {
        10 => is_isbn10(&isbn),
        13 => is_isbn13(&isbn),
        _ => false,
    }
}

/// Compute the ISBN-13 check digit over the first 12 digits of `digits`.
/// A raw result of 10 maps to '0'.
pub fn isbn13_check_digit(digits: &str) -> Option<char> {
    if digits.len() < 12 {
        return None;
    }
    let mut sum: u32 = 0;
    for (i, c) in digits.chars().take(12).enumerate() {
        sum += c.to_digit(10)? * if i % 2 == 0 { 1 } else { 3 };
    }
    let check = (10 - sum % 10) % 10;
    char::from_digit(check, 10)
}

/// Compute the ISBN-10 check character over the first 9 digits of
/// `digits`. A raw remainder of 10 maps to 'X'.
pub fn isbn10_check_digit(digits: &str) -> Option<char> {
    if digits.len() < 9 {
        return None;
    }
    let mut sum: u32 = 0;
    for (i, c) in digits.chars().take(9).enumerate() {
        sum += c.to_digit(10)? * (10 - i as u32);
    }
    let check = (11 - sum % 11) % 11;
    if check == 10 {
        Some('X')
    } else {
        char::from_digit(check, 10)
    }
}

/// Convert to the canonical 13-digit form.
///
/// A valid 13-digit input is returned unchanged. A 10-character input is
/// converted by dropping its own check digit, prefixing "978", and
/// recomputing the ISBN-13 check digit. Other lengths yield `None`.
pub fn to_isbn13(isbn: &str) -> Option<String> {
    let isbn = clean(isbn);
    if isbn.len() == 13 && is_isbn13(&isbn) {
        return Some(isbn);
    }
    if isbn.len() != 10 {
        return None;
    }
    let prefixed = format!("978{}", &isbn[..9]);
    let check = isbn13_check_digit(&prefixed)?;
    Some(format!("{}{}", prefixed, check))
}

/// Convert to the 10-character form: strip the 3-digit prefix from a
/// 13-digit input and recompute the ISBN-10 check character.
pub fn to_isbn10(isbn: &str) -> Option<String> {
    let isbn = clean(isbn);
    if isbn.len() == 10 && is_isbn10(&isbn) {
        return Some(isbn);
    }
    if isbn.len() != 13 {
        return None;
    }
    let body = &isbn[3..12];
    let check = isbn10_check_digit(body)?;
    Some(format!("{}{}", body, check))
}

/// True if the registrant-group identifier corresponds to an
/// English-language publishing group (group '0' or '1'; for 13-digit
/// forms the prefix must be "978"). This is a catalog-policy filter,
/// not a correctness check: any other group or length is simply false.
pub fn has_english_identifier(isbn: &str) -> bool {
    let isbn = clean(isbn);
    match isbn.len() {
        10 => matches!(isbn.as_bytes()[0], b'0' | b'1'),
        13 => isbn.starts_with("978") && matches!(isbn.as_bytes()[3], b'0' | b'1'),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean() {
        assert_eq!(clean("978-0071809252 "), "9780071809252");
        assert_eq!(clean(" 0-306-40615-2 "), "0306406152");
        assert_eq!(clean("no digits here"), "");
        assert_eq!(clean("097522980X"), "097522980X");
    }

    #[test]
    fn test_is_isbn10() {
        assert!(is_isbn10("1593272812"));
        assert!(is_isbn10("097522980X"));

        assert!(!is_isbn10("9780071809252"));
        assert!(!is_isbn10("0975229802"));
        assert!(!is_isbn10("12345678a9"));
    }

    #[test]
    fn test_is_isbn13() {
        assert!(is_isbn13("9780306406157"));
        assert!(is_isbn13("9781593275990"));

        assert!(!is_isbn13("097522980X"));
        assert!(!is_isbn13("9781593275991"));
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid("9781593272814"));
        assert!(is_valid("1593272812"));

        assert!(!is_valid("123"));
        assert!(!is_valid(""));
    }

    #[test]
    fn test_is_valid_ignores_punctuation() {
        // Hyphens and spaces at arbitrary positions do not change validity
        assert!(is_valid("978-0-13-468599-1"));
        assert!(is_valid("978 0 13 468599 1"));
        assert!(is_valid("0-306-40615-2"));
        assert_eq!(is_valid("9780134685991"), is_valid("97-80 1346859-91"));
    }

    #[test]
    fn test_isbn13_check_digit() {
        assert_eq!(isbn13_check_digit("978030640615"), Some('7'));
        assert_eq!(isbn13_check_digit("978159327599"), Some('0'));
        assert_eq!(isbn13_check_digit("123"), None);
    }

    #[test]
    fn test_isbn10_check_digit() {
        assert_eq!(isbn10_check_digit("030640615"), Some('2'));
        assert_eq!(isbn10_check_digit("097522980"), Some('X'));
        assert_eq!(isbn10_check_digit("123"), None);
    }

    #[test]
    fn test_to_isbn13() {
        assert_eq!(to_isbn13("0071809252").as_deref(), Some("9780071809252"));
        assert_eq!(to_isbn13("9780071809252").as_deref(), Some("9780071809252"));
        assert_eq!(to_isbn13("0-306-40615-2").as_deref(), Some("9780306406157"));
        assert_eq!(to_isbn13("123"), None);
    }

    #[test]
    fn test_to_isbn10() {
        assert_eq!(to_isbn10("9780071809252").as_deref(), Some("0071809252"));
        assert_eq!(to_isbn10("0071809252").as_deref(), Some("0071809252"));
        assert_eq!(to_isbn10("123"), None);
    }

    #[test]
    fn test_roundtrip_10_to_13_to_10() {
        for isbn in ["0306406152", "0071809252", "1593272812", "097522980X"] {
            let isbn13 = to_isbn13(isbn).unwrap();
            assert!(is_isbn13(&isbn13));
            assert_eq!(to_isbn10(&isbn13).as_deref(), Some(isbn));
        }
    }

    #[test]
    fn test_roundtrip_13_to_10_to_13() {
        for isbn in ["9780071809252", "9780306406157", "9781593275990"] {
            let isbn10 = to_isbn10(isbn).unwrap();
            assert!(is_isbn10(&isbn10));
            assert_eq!(to_isbn13(&isbn10).as_deref(), Some(isbn));
        }
    }

    #[test]
    fn test_has_english_identifier_isbn10() {
        assert!(has_english_identifier("1-58182-008-9"));
        assert!(has_english_identifier("0-330-28498-3"));

        assert!(!has_english_identifier("2-226-05257-7"));
        assert!(!has_english_identifier("3-7965-1900-8"));
    }

    #[test]
    fn test_has_english_identifier_isbn13() {
        assert!(has_english_identifier("9781581820089"));
        assert!(has_english_identifier("9780330284981"));

        assert!(!has_english_identifier("9782226052575"));
        assert!(!has_english_identifier("9783796519000"));
        // 979 prefix is outside the filter even with group 0/1
        assert!(!has_english_identifier("9791090636071"));
    }

    #[test]
    fn test_has_english_identifier_invalid_length() {
        assert!(!has_english_identifier("123"));
        assert!(!has_english_identifier(""));
    }
}
