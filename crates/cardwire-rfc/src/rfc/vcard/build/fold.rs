//! vCard line folding.

use cardwire_core::constants::FOLD_SEPARATOR;

/// Maximum value characters on one physical line.
///
/// Only the value text counts; the name and parameters before the `:` do not.
pub const MAX_VALUE_CHARS: usize = 76;

/// Folds escaped value text.
///
/// A fold (CRLF plus a two-space indent) is inserted before any escape unit
/// that would push the current physical line past [`MAX_VALUE_CHARS`]. An
/// escape unit is either a single character or a backslash with the character
/// after it; units are never split. A space or tab that would open a
/// continuation line is emitted as an escaped character, since unfolding
/// strips every leading space and tab.
#[must_use]
pub fn fold_value(escaped: &str) -> String {
    let mut result =
        String::with_capacity(escaped.len() + escaped.len() / MAX_VALUE_CHARS * FOLD_SEPARATOR.len());
    let mut column = 0;
    let mut folded = false;
    let mut chars = escaped.chars();

    while let Some(c) = chars.next() {
        let escaped_char = if c == '\\' { chars.next() } else { None };
        let width = 1 + usize::from(escaped_char.is_some());

        if column > 0 && column + width > MAX_VALUE_CHARS {
            result.push_str(FOLD_SEPARATOR);
            column = 0;
            folded = true;
        }

        if folded && column == 0 && escaped_char.is_none() && matches!(c, ' ' | '\t') {
            result.push('\\');
            column += 1;
        }

        result.push(c);
        if let Some(e) = escaped_char {
            result.push(e);
        }
        column += width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(folded: &str) -> Vec<&str> {
        folded.split(FOLD_SEPARATOR).collect()
    }

    #[test]
    fn short_value_unchanged() {
        assert_eq!(fold_value("John Doe"), "John Doe");
        assert_eq!(fold_value(&"X".repeat(76)), "X".repeat(76));
    }

    #[test]
    fn fold_at_76_chars() {
        let folded = fold_value(&"X".repeat(80));
        let parts = lines(&folded);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].chars().count(), 76);
        assert_eq!(parts[1], "XXXX");
    }

    #[test]
    fn fold_counts_characters_not_octets() {
        let folded = fold_value(&"日".repeat(100));
        let parts = lines(&folded);
        assert_eq!(parts[0].chars().count(), 76);
        assert_eq!(parts[1].chars().count(), 24);
    }

    #[test]
    fn never_splits_escape_units() {
        let text = format!("{}\\n{}", "a".repeat(75), "b".repeat(10));
        let folded = fold_value(&text);
        let parts = lines(&folded);
        assert_eq!(parts[0], "a".repeat(75));
        assert!(parts[1].starts_with("\\n"));
    }

    #[test]
    fn escapes_leading_space_on_continuation() {
        let text = format!("{} tail", "a".repeat(76));
        let folded = fold_value(&text);
        let parts = lines(&folded);
        assert_eq!(parts[1], "\\ tail");
    }

    #[test]
    fn fold_multiple_times() {
        let folded = fold_value(&"X".repeat(200));
        assert_eq!(folded.matches(FOLD_SEPARATOR).count(), 2);
    }
}
