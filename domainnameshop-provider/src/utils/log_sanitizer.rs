//! Log sanitization utilities
//!
//! Record data (DKIM keys, SPF policies, ACME challenge tokens) and API
//! credentials must never be dumped verbatim into debug/error logs.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret left visible by [`mask_secret`].
const VISIBLE_SECRET_CHARS: usize = 4;

/// Truncate a string for safe logging.
///
/// Strings within the limit are returned unchanged; longer ones are cut at
/// the last char boundary before `TRUNCATE_LIMIT` and suffixed with the
/// total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = (0..=TRUNCATE_LIMIT)
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Mask a credential, keeping only its first few characters.
///
/// Secrets shorter than or equal to the visible prefix are masked entirely.
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= VISIBLE_SECRET_CHARS {
        return "****".to_string();
    }
    let visible: String = secret.chars().take(VISIBLE_SECRET_CHARS).collect();
    format!("{visible}****")
}
