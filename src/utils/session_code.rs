use rand::Rng;

/// Session codes are five ASCII digits, matching the PIN scheme browser
/// clients generate (10000..=99999, so no leading zero).
const SESSION_CODE_LENGTH: usize = 5;

/// Generate a random 5-digit session code.
///
/// Not checked for uniqueness here; the registry refuses to overwrite a live
/// code, so a colliding caller simply has to pick again.
pub fn random_session_code() -> String {
    let mut rng = rand::thread_rng();
    rng.gen_range(10_000..100_000_u32).to_string()
}

/// Validate session code format
#[must_use]
pub fn is_valid_session_code(code: &str) -> bool {
    code.len() == SESSION_CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

/// Normalize session code (trimmed of surrounding whitespace)
#[must_use]
pub fn normalize_session_code(code: &str) -> &str {
    code.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_session_code_format() {
        for _ in 0..100 {
            let code = random_session_code();
            assert!(is_valid_session_code(&code), "bad code: {code}");
        }
    }

    #[test]
    fn test_session_code_spread() {
        let codes: std::collections::HashSet<String> =
            (0..1000).map(|_| random_session_code()).collect();
        // 90k possible codes; 1000 draws should mostly be distinct
        assert!(codes.len() > 950);
    }

    #[test]
    fn test_is_valid_session_code() {
        assert!(is_valid_session_code("12345"));
        assert!(is_valid_session_code("10000"));
        assert!(!is_valid_session_code("1234")); // too short
        assert!(!is_valid_session_code("123456")); // too long
        assert!(!is_valid_session_code("12a45")); // non-digit
        assert!(!is_valid_session_code("")); // empty
    }

    #[test]
    fn test_normalize_session_code() {
        assert_eq!(normalize_session_code("  12345  "), "12345");
        assert_eq!(normalize_session_code("12345"), "12345");
    }
}
