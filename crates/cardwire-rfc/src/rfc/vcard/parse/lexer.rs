//! Character-level scanner for vCard content lines.
//!
//! Folding is undone as characters are pulled: a LF followed by a space or
//! tab disappears together with all of the following spaces and tabs. The
//! three scans below then only ever see logical characters.

use std::iter::Peekable;
use std::mem;

use super::error::{ParseError, ParseResult};
use crate::rfc::vcard::core::{Parameters, VCardProperty, VCardValue};

/// Pulls unfolded characters from a character source and scans content lines.
#[derive(Debug)]
pub struct Scanner<I: Iterator<Item = char>> {
    chars: Peekable<I>,
    line: usize,
}

impl<I: Iterator<Item = char>> Scanner<I> {
    pub fn new(chars: I) -> Self {
        Self {
            chars: chars.peekable(),
            line: 1,
        }
    }

    /// Current 1-based physical line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the next logical character, removing folds.
    fn next_char(&mut self) -> Option<char> {
        loop {
            let c = self.chars.next()?;
            if c == '\n' {
                self.line += 1;
                if matches!(self.chars.peek(), Some(' ' | '\t')) {
                    while self.chars.next_if(|c| matches!(c, ' ' | '\t')).is_some() {}
                    continue;
                }
            }
            return Some(c);
        }
    }

    fn require_char(&mut self, context: &str) -> ParseResult<char> {
        self.next_char()
            .ok_or_else(|| ParseError::truncated(self.line, format!("input ended {context}")))
    }

    /// Scans one content line.
    ///
    /// Returns `Ok(None)` when the input is exhausted with nothing pending.
    ///
    /// ## Errors
    /// Fails on a truncated line, an empty property name or a malformed
    /// parameter segment.
    pub fn content_line(&mut self) -> ParseResult<Option<VCardProperty>> {
        let Some((group, name, terminator)) = self.scan_name()? else {
            return Ok(None);
        };

        let mut params = Parameters::new();
        if terminator == ';' {
            self.scan_params(&name, &mut params)?;
        }

        let value = self.scan_value();
        Ok(Some(VCardProperty {
            group,
            name,
            params,
            value,
        }))
    }

    /// Reads `[group "."] name` up to the first unescaped `;` or `:`.
    fn scan_name(&mut self) -> ParseResult<Option<(Option<String>, String, char)>> {
        let mut buf = String::new();
        let mut last_dot = None;
        let mut escaped = false;

        let terminator = loop {
            let Some(c) = self.next_char() else {
                if buf.is_empty() && !escaped {
                    return Ok(None);
                }
                return Err(ParseError::truncated(
                    self.line,
                    format!("property `{buf}` has no value"),
                ));
            };
            if escaped {
                escaped = false;
                buf.push(c);
                continue;
            }
            match c {
                '\\' => escaped = true,
                // Stray blank lines between properties
                '\r' | '\n' => {}
                ';' | ':' => break c,
                '.' => {
                    last_dot = Some(buf.len());
                    buf.push(c);
                }
                _ => buf.push(c),
            }
        };

        let (group, name) = match last_dot {
            Some(dot) => {
                let name = buf.split_off(dot + 1);
                buf.truncate(dot);
                ((!buf.is_empty()).then_some(buf), name)
            }
            None => (None, buf),
        };

        if name.is_empty() {
            return Err(ParseError::new(
                super::ParseErrorKind::InvalidPropertyName,
                self.line,
                "property line has no name",
            ));
        }

        Ok(Some((group, name, terminator)))
    }

    /// Reads `NAME ["=" VALUE *("," VALUE)]` segments until the `:` that opens
    /// the value.
    fn scan_params(&mut self, property: &str, params: &mut Parameters) -> ParseResult<()> {
        loop {
            let mut name = String::new();
            let terminator = loop {
                let c = self.require_char("inside parameters")?;
                match c {
                    '\r' | '\n' => {}
                    '=' | ';' | ':' => break c,
                    _ => name.push(c),
                }
            };

            if name.is_empty() {
                return Err(ParseError::invalid_parameter(
                    self.line,
                    format!("parameter without a name on {property}"),
                ));
            }

            let end = if terminator == '=' {
                let (values, end) = self.scan_param_values()?;
                params.extend(&name, values);
                end
            } else {
                // Bare flag parameter, e.g. `TEL;HOME:`
                params.extend(&name, Vec::new());
                terminator
            };

            if end == ':' {
                return Ok(());
            }
        }
    }

    /// Reads comma-separated parameter values, honouring DQUOTE quoting and
    /// RFC 6868 caret escapes. Returns the values and the `;`/`:` that ended them.
    fn scan_param_values(&mut self) -> ParseResult<(Vec<String>, char)> {
        let mut values = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut pending = None;

        loop {
            let c = match pending.take() {
                Some(c) => c,
                None => self.require_char("inside a parameter value")?,
            };
            match c {
                '\r' | '\n' => {}
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => values.push(mem::take(&mut current)),
                ';' | ':' if !in_quotes => {
                    values.push(current);
                    return Ok((values, c));
                }
                '^' => {
                    let next = self.require_char("inside a parameter value")?;
                    match next {
                        'n' => current.push('\n'),
                        '\'' => current.push('"'),
                        '^' => current.push('^'),
                        other => {
                            current.push('^');
                            pending = Some(other);
                        }
                    }
                }
                _ => current.push(c),
            }
        }
    }

    /// Reads the value text up to an unfolded LF or the end of input.
    fn scan_value(&mut self) -> VCardValue {
        let mut components = Vec::new();
        let mut component = Vec::new();
        let mut buf = String::new();
        let mut escaped = false;

        while let Some(c) = self.next_char() {
            match c {
                '\r' => continue,
                '\n' => break,
                _ => {}
            }
            if escaped {
                escaped = false;
                buf.push(match c {
                    'n' | 'N' => '\n',
                    'r' | 'R' => '\r',
                    other => other,
                });
                continue;
            }
            match c {
                '\\' => escaped = true,
                ',' => component.push(mem::take(&mut buf)),
                ';' => {
                    component.push(mem::take(&mut buf));
                    components.push(mem::take(&mut component));
                }
                _ => buf.push(c),
            }
        }

        if escaped {
            buf.push('\\');
        }
        component.push(buf);
        components.push(component);
        VCardValue::from_components(components)
    }
}

/// Decodes escaped value text (no folding, no line terminator) into a value.
#[must_use]
pub fn unescape_value(raw: &str) -> VCardValue {
    Scanner::new(raw.chars()).scan_value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::parse::ParseErrorKind;

    fn line(input: &str) -> VCardProperty {
        Scanner::new(input.chars())
            .content_line()
            .expect("line should scan")
            .expect("line should be present")
    }

    fn rows(value: &VCardValue) -> Vec<Vec<&str>> {
        value
            .components()
            .iter()
            .map(|c| c.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn simple_line() {
        let prop = line("FN:John Doe\r\n");
        assert!(prop.group.is_none());
        assert_eq!(prop.name, "FN");
        assert!(prop.params.is_empty());
        assert_eq!(rows(&prop.value), vec![vec!["John Doe"]]);
    }

    #[test]
    fn group_splits_on_last_dot() {
        let prop = line("item1.TEL:+1-555-555-5555");
        assert_eq!(prop.group.as_deref(), Some("item1"));
        assert_eq!(prop.name, "TEL");

        let nested = line("a.b.X-ABLABEL:Twitter");
        assert_eq!(nested.group.as_deref(), Some("a.b"));
        assert_eq!(nested.name, "X-ABLABEL");
    }

    #[test]
    fn parameters_merge_and_keep_case() {
        let prop = line("TEL;TYPE=home,voice;PREF=1;type=Cell:+1-555-555-5555");
        assert_eq!(
            prop.params.get("TYPE"),
            Some(&["home".to_string(), "voice".to_string(), "Cell".to_string()][..])
        );
        assert_eq!(prop.params.first("PREF"), Some("1"));
    }

    #[test]
    fn quoted_and_caret_parameters() {
        let prop = line("ADR;LABEL=\"Main St, Apt 1^nTown\";GEO=\"geo:1,2\":;;Main St");
        assert_eq!(prop.params.first("LABEL"), Some("Main St, Apt 1\nTown"));
        assert_eq!(prop.params.first("GEO"), Some("geo:1,2"));
        assert_eq!(rows(&prop.value), vec![vec![""], vec![""], vec!["Main St"]]);

        let unknown = line("X-P;X-A=a^b:v");
        assert_eq!(unknown.params.first("X-A"), Some("a^b"));
    }

    #[test]
    fn flag_parameter_has_no_values() {
        let prop = line("TEL;HOME;TYPE=cell:123");
        assert_eq!(prop.params.get("HOME"), Some(&[][..]));
        assert_eq!(prop.params.first("TYPE"), Some("cell"));
    }

    #[test]
    fn colon_in_value_is_literal() {
        let prop = line("URL:https://example.com:8080/path");
        assert_eq!(prop.value.first_text(), Some("https://example.com:8080/path"));
    }

    #[test]
    fn value_escapes() {
        let value = unescape_value(r"a\,b\;c\nd\Ne\\f\:g\rh");
        assert_eq!(rows(&value), vec![vec!["a,b;c\nd\ne\\f:g\rh"]]);
    }

    #[test]
    fn value_structure() {
        let value = unescape_value("Doe;J.;;;");
        assert_eq!(rows(&value), vec![vec!["Doe"], vec!["J."], vec![""], vec![""], vec![""]]);

        let list = unescape_value("tel,+44 20 1234 5678");
        assert_eq!(rows(&list), vec![vec!["tel", "+44 20 1234 5678"]]);

        assert_eq!(rows(&unescape_value("")), vec![vec![""]]);
    }

    #[test]
    fn unfolds_crlf_and_tabs() {
        let prop = line("NOTE:This is a long\r\n   note that\r\n\t continues\r\n");
        assert_eq!(prop.value.first_text(), Some("This is a longnote thatcontinues"));
    }

    #[test]
    fn fold_inside_escape_sequence() {
        let prop = line("NOTE:line1\\\r\n  nline2\r\n");
        assert_eq!(prop.value.first_text(), Some("line1\nline2"));
    }

    #[test]
    fn value_ends_at_line_break() {
        let mut scanner = Scanner::new("FN:A\r\nN:B;C\r\n".chars());
        assert_eq!(scanner.content_line().unwrap().unwrap().name, "FN");
        assert_eq!(scanner.content_line().unwrap().unwrap().name, "N");
        assert!(scanner.content_line().unwrap().is_none());
    }

    #[test]
    fn skips_blank_lines() {
        let mut scanner = Scanner::new("\r\n\r\nFN:A\r\n\r\n".chars());
        assert_eq!(scanner.content_line().unwrap().unwrap().name, "FN");
        assert!(scanner.content_line().unwrap().is_none());
    }

    #[test]
    fn truncated_name_fails() {
        let err = Scanner::new("FN".chars()).content_line().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn truncated_parameters_fail() {
        let err = Scanner::new("TEL;TYPE=home".chars()).content_line().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);

        let err = Scanner::new("TEL;TYPE".chars()).content_line().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn nameless_parameter_fails() {
        let err = Scanner::new("TEL;=home:1".chars()).content_line().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidParameter);

        let err = Scanner::new("TEL;;TYPE=home:1".chars()).content_line().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidParameter);
    }

    #[test]
    fn nameless_property_fails() {
        let err = Scanner::new(":value\r\n".chars()).content_line().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidPropertyName);
    }

    #[test]
    fn line_numbers_advance() {
        let mut scanner = Scanner::new("FN:A\r\nNOTE:b\r\n c\r\nX".chars());
        scanner.content_line().unwrap();
        scanner.content_line().unwrap();
        let err = scanner.content_line().unwrap_err();
        assert_eq!(err.line, 4);
    }
}
