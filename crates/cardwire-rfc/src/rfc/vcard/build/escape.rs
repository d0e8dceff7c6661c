//! vCard text escaping.

use super::serializer::{EncodeError, EncodeResult};
use crate::rfc::vcard::core::VCardValue;

/// Escapes one sub-value for vCard serialization.
///
/// Escapes backslash, CR, LF, comma, and semicolon. Colons are left alone.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\r' => result.push_str("\\r"),
            '\n' => result.push_str("\\n"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            _ => result.push(c),
        }
    }

    result
}

/// Escapes a whole value: sub-values joined by `,`, components by `;`.
#[must_use]
pub fn escape_value(value: &VCardValue) -> String {
    value
        .components()
        .iter()
        .map(|component| {
            component
                .iter()
                .map(|s| escape_text(s))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// Escapes a parameter value for vCard serialization.
///
/// Uses RFC 6868 caret encoding for special characters.
/// Returns `(value, needs_quotes)`.
///
/// ## Errors
/// Returns [`EncodeError::UnencodableParameter`] for a value holding a
/// carriage return, which has no caret form and is discarded by decoders.
pub fn escape_param_value(s: &str) -> EncodeResult<(String, bool)> {
    let mut result = String::with_capacity(s.len());
    let mut needs_quotes = false;

    for c in s.chars() {
        match c {
            '^' => result.push_str("^^"),
            '\n' => result.push_str("^n"),
            '\r' => return Err(EncodeError::UnencodableParameter(s.to_string())),
            '"' => {
                result.push_str("^'");
                needs_quotes = true;
            }
            ':' | ';' | ',' => {
                result.push(c);
                needs_quotes = true;
            }
            _ => result.push(c),
        }
    }

    Ok((result, needs_quotes))
}

/// Escapes a parameter value and wraps it in DQUOTEs when required.
///
/// ## Errors
/// See [`escape_param_value`].
pub fn quote_param_value(s: &str) -> EncodeResult<String> {
    Ok(match escape_param_value(s)? {
        (escaped, true) => format!("\"{escaped}\""),
        (escaped, false) => escaped,
    })
}
