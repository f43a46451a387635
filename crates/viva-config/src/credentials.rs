//! API key screening.
//!
//! `.env` templates ship with placeholder values such as
//! `your_groq_api_key_here` or `<GEMINI_KEY>`. Those must count as "no key" so
//! provider selection falls through instead of sending a request that is
//! guaranteed to be rejected.

/// Known literal placeholder from the sample `.env`.
const GROQ_PLACEHOLDER: &str = "your_groq_api_key_here";

/// Return the trimmed key if it looks like a real credential.
#[must_use]
pub fn usable_key(raw: &str) -> Option<&str> {
    let key = raw.trim();
    if key.is_empty() || key == GROQ_PLACEHOLDER || key.contains('<') || key.contains("your_") {
        return None;
    }
    Some(key)
}
