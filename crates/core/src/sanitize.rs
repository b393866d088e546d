//! Text sanitization for user-submitted free text.
//!
//! Booking fields end up in stored rows and in plain-text/HTML notification
//! emails, so everything user-typed is entity-escaped and long-form fields
//! are capped before they leave the validation boundary. Escaping is a
//! one-way normalization; nothing in this crate ever unescapes.

/// Maximum length (in characters) for long-form free-text fields
/// (song requests, special requirements) after escaping.
pub const LONG_TEXT_MAX: usize = 2000;

/// Escape the five HTML-significant characters: `&`, `<`, `>`, `"`, `'`.
///
/// The ampersand is replaced first so later replacements do not get
/// re-escaped within a single pass.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Truncate a string to at most `max` characters, respecting char boundaries.
pub fn truncate_chars(input: &str, max: usize) -> String {
    match input.char_indices().nth(max) {
        Some((idx, _)) => input[..idx].to_string(),
        None => input.to_string(),
    }
}

/// Remove all Unicode control characters (including newlines and tabs).
///
/// Used to harden end-user text before it is interpolated into a
/// structured generation prompt.
pub fn strip_control_chars(input: &str) -> String {
    input.chars().filter(|c| !c.is_control()).collect()
}

/// Sanitize a long-form free-text field: trim, escape, cap at
/// [`LONG_TEXT_MAX`] characters.
pub fn clean_long_text(input: &str) -> String {
    truncate_chars(&escape_html(input.trim()), LONG_TEXT_MAX)
}

/// Sanitize a short free-text field: trim and escape, no length cap.
pub fn clean_short_text(input: &str) -> String {
    escape_html(input.trim())
}
