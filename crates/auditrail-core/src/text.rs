//! Free-text sanitization
//!
//! Every caller-supplied string passes through [`sanitize`] before it is
//! stored. Control characters other than newline, carriage return and tab
//! are dropped and the result is capped at a byte ceiling.

/// Maximum length of the actor field in bytes
pub const ACTOR_MAX_LEN: usize = 160;
/// Maximum length of the action field in bytes
pub const ACTION_MAX_LEN: usize = 120;
/// Maximum length of the target reference in bytes
pub const TARGET_REF_MAX_LEN: usize = 200;
/// Maximum length of the request id in bytes
pub const REQUEST_ID_MAX_LEN: usize = 128;
/// Maximum length of the user agent in bytes
pub const USER_AGENT_MAX_LEN: usize = 256;
/// Maximum length of a metadata or diff key in bytes
pub const KEY_MAX_LEN: usize = 128;
/// Default ceiling for non-sensitive metadata text values
pub const METADATA_VALUE_MAX_LEN: usize = 512;

/// Trim, strip control characters and truncate `text` to `max_len` bytes.
///
/// Never fails. Truncation always lands on a character boundary, so the
/// output may be a few bytes shorter than `max_len` when the cut falls
/// inside a multi-byte character. A `max_len` of zero disables the ceiling.
pub fn sanitize(text: &str, max_len: usize) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(trimmed.len().min(max_len.max(1)));
    for ch in trimmed.chars().filter(|c| is_kept(*c)) {
        if max_len > 0 && out.len() + ch.len_utf8() > max_len {
            break;
        }
        out.push(ch);
    }
    out
}

fn is_kept(ch: char) -> bool {
    (ch as u32) >= 32 || matches!(ch, '\n' | '\r' | '\t')
}
