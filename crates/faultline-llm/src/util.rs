//! Common utilities for LLM providers

/// Minimum key length to display partial key
const MIN_KEY_LENGTH_FOR_PARTIAL_DISPLAY: usize = 8;

/// Number of characters to show at start/end of masked key
const KEY_MASK_VISIBLE_CHARS: usize = 4;

/// Mask API key for safe display in logs
///
/// Shows first 4 and last 4 characters for keys longer than 8 characters,
/// otherwise shows "****" to prevent exposure of short keys.
///
/// # Examples
/// ```
/// use faultline_llm::util::mask_api_key;
/// assert_eq!(mask_api_key("sk-1234567890abcdef"), "sk-1...cdef");
/// assert_eq!(mask_api_key("short"), "****");
/// ```
#[must_use]
pub fn mask_api_key(key: &str) -> String {
    if key.len() <= MIN_KEY_LENGTH_FOR_PARTIAL_DISPLAY || !key.is_ascii() {
        return "****".to_string();
    }
    format!(
        "{}...{}",
        &key[..KEY_MASK_VISIBLE_CHARS],
        &key[key.len() - KEY_MASK_VISIBLE_CHARS..]
    )
}

/// Truncate a string to at most `max_bytes` without splitting a UTF-8 character
#[must_use]
pub fn truncate_safe(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Validate API key is not empty and has minimum length
///
/// Returns an error message if validation fails, None if valid.
#[must_use]
pub fn validate_api_key(key: &str, provider_name: &str) -> Option<String> {
    if key.trim().is_empty() {
        return Some(format!("{} API key is required", provider_name));
    }
    if key.len() < MIN_KEY_LENGTH_FOR_PARTIAL_DISPLAY {
        return Some(format!(
            "{} API key appears to be invalid (too short)",
            provider_name
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_api_key_long() {
        let key = "sk-1234567890abcdefghij";
        let masked = mask_api_key(key);
        assert_eq!(masked, "sk-1...ghij");
        assert!(!masked.contains("567890"));
    }

    #[test]
    fn test_mask_api_key_short() {
        assert_eq!(mask_api_key("short"), "****");
        assert_eq!(mask_api_key("12345678"), "****");
        assert_eq!(mask_api_key(""), "****");
    }

    #[test]
    fn test_truncate_safe_respects_char_boundary() {
        assert_eq!(truncate_safe("hello", 10), "hello");
        assert_eq!(truncate_safe("hello", 3), "hel");
        // 'é' is two bytes; cutting inside it backs off
        assert_eq!(truncate_safe("aé", 2), "a");
    }

    #[test]
    fn test_validate_api_key() {
        assert!(validate_api_key("", "Test").is_some());
        assert!(validate_api_key("   ", "Test").is_some());
        assert!(validate_api_key("short", "Test").is_some());
        assert!(validate_api_key("valid-api-key-12345", "Test").is_none());
    }
}
