//! vCard stream decoder.

use std::io::Read;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::Scanner;
use crate::rfc::vcard::core::{PropertyName, VCard, VCardProperty};

/// Incremental decoder over a character source.
///
/// Each call to [`Decoder::decode`] reads content lines until an `END` line or
/// the end of input and returns the accumulated record. `BEGIN`/`END` are
/// framing only and never stored; a stream without them yields one record.
///
/// The iterator form stops after the first error.
#[derive(Debug)]
pub struct Decoder<I: Iterator<Item = char>> {
    scanner: Scanner<I>,
    failed: bool,
}

impl<I: Iterator<Item = char>> Decoder<I> {
    pub fn new(chars: I) -> Self {
        Self {
            scanner: Scanner::new(chars),
            failed: false,
        }
    }

    /// Current 1-based physical line of the underlying input.
    #[must_use]
    pub fn line(&self) -> usize {
        self.scanner.line()
    }

    /// Reads one raw content line, framing lines included.
    ///
    /// ## Errors
    /// Returns an error on a truncated or malformed line.
    pub fn read_property(&mut self) -> ParseResult<Option<VCardProperty>> {
        self.scanner.content_line()
    }

    /// Decodes the next record.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    ///
    /// ## Errors
    /// Returns the first error from the underlying content lines.
    pub fn decode(&mut self) -> ParseResult<Option<VCard>> {
        let mut card = VCard::new();
        let mut started = false;

        while let Some(prop) = self.read_property()? {
            if PropertyName::Begin.matches(&prop.name) {
                if !card.is_empty() {
                    tracing::warn!(
                        line = self.line(),
                        "BEGIN inside an open vCard, closing previous record"
                    );
                    return Ok(Some(card));
                }
                started = true;
                continue;
            }
            if PropertyName::End.matches(&prop.name) {
                if !started {
                    tracing::warn!(line = self.line(), "END without an open vCard, skipping");
                    continue;
                }
                return Ok(Some(card));
            }
            started = true;
            card.add_property(prop);
        }

        Ok(started.then_some(card))
    }
}

impl<'a> From<&'a str> for Decoder<std::str::Chars<'a>> {
    fn from(input: &'a str) -> Self {
        Self::new(input.chars())
    }
}

impl<I: Iterator<Item = char>> Iterator for Decoder<I> {
    type Item = ParseResult<VCard>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.decode().transpose();
        if matches!(result, Some(Err(_))) {
            self.failed = true;
        }
        result
    }
}

/// Parses a vCard document into one or more vCards.
///
/// ## Summary
/// Decodes the whole input and returns all records found.
///
/// ## Errors
/// Returns a parse error if any content line is malformed.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<Vec<VCard>> {
    tracing::debug!("Parsing vCard document");

    let cards = Decoder::from(input).collect::<ParseResult<Vec<_>>>()?;

    tracing::debug!(count = cards.len(), "Parsed vCards");

    Ok(cards)
}

/// Parses a single vCard from input.
///
/// ## Summary
/// Convenience function returning the first record of a document.
///
/// ## Errors
/// Returns an error if the document contains no vCards or is malformed.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse_single(input: &str) -> ParseResult<VCard> {
    tracing::debug!("Parsing single vCard");

    Decoder::from(input).decode()?.ok_or_else(|| {
        tracing::warn!("No vCard found in document");
        ParseError::new(
            ParseErrorKind::UnexpectedEof,
            1,
            "no vCard found in document",
        )
    })
}

/// Reads a UTF-8 byte stream to the end and parses it.
///
/// ## Errors
/// Returns an `Io` error if reading fails or the bytes are not UTF-8, and a
/// parse error if the document is malformed.
pub fn parse_reader<R: Read>(mut reader: R) -> ParseResult<Vec<VCard>> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse(&input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_framed_records() {
        let input = "BEGIN:VCARD\r\nVERSION:4.0\r\nFN:A\r\nEND:VCARD\r\n\
                     BEGIN:VCARD\r\nVERSION:4.0\r\nFN:B\r\nEND:VCARD\r\n";
        let cards = parse(input).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].formatted_name(), Some("A"));
        assert_eq!(cards[1].formatted_name(), Some("B"));
        assert!(cards[0].get_all("BEGIN").is_empty());
        assert!(cards[0].get_all("END").is_empty());
    }

    #[test]
    fn unframed_stream_is_one_record() {
        let card = parse_single("VERSION:4.0\r\nFN;PID=1.1:J. Doe\r\nN:Doe;J.;;;\r\n").unwrap();
        assert_eq!(card.version(), Some("4.0"));

        let fns = card.get_all("FN");
        assert_eq!(fns.len(), 1);
        assert_eq!(fns[0].first_param("PID"), Some("1.1"));
        assert_eq!(fns[0].value.first_text(), Some("J. Doe"));

        let n = card.value("N").unwrap();
        assert_eq!(n.len(), 5);
        assert_eq!(n.component(0), Some(&["Doe".to_string()][..]));
        assert_eq!(n.component(1), Some(&["J.".to_string()][..]));
        assert_eq!(n.component(4), Some(&[String::new()][..]));
    }

    #[test]
    fn empty_input_has_no_records() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\r\n\r\n").unwrap().is_empty());
        let err = parse_single("").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn missing_end_still_yields_record() {
        let cards = parse("BEGIN:VCARD\r\nFN:A\r\n").unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].formatted_name(), Some("A"));
    }

    #[test]
    fn stray_end_is_skipped() {
        let cards = parse("BEGIN:VCARD\r\nVERSION:4.0\r\nEND:VCARD\r\nEND:VCARD\r\n").unwrap();
        assert_eq!(cards.len(), 1);

        let cards = parse("END:VCARD\r\nBEGIN:VCARD\r\nFN:A\r\nEND:VCARD\r\n").unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].formatted_name(), Some("A"));

        assert!(parse("END:VCARD\r\n").unwrap().is_empty());
    }

    #[test]
    fn empty_framed_record_is_kept() {
        let cards = parse("BEGIN:VCARD\r\nEND:VCARD\r\n").unwrap();
        assert_eq!(cards.len(), 1);
        assert!(cards[0].is_empty());
    }

    #[test]
    fn begin_without_end_closes_previous() {
        let cards = parse("BEGIN:VCARD\r\nFN:A\r\nBEGIN:VCARD\r\nFN:B\r\nEND:VCARD\r\n").unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].formatted_name(), Some("B"));
    }

    #[test]
    fn read_property_surfaces_framing() {
        let mut decoder = Decoder::from("BEGIN:VCARD\r\nFN:A\r\nEND:VCARD\r\n");
        let names: Vec<String> = std::iter::from_fn(|| decoder.read_property().unwrap())
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["BEGIN", "FN", "END"]);
    }

    #[test]
    fn iterator_stops_after_error() {
        let mut decoder = Decoder::from("BEGIN:VCARD\r\nFN:A\r\nEND:VCARD\r\nTEL;=x:1\r\nFN:B\r\n");
        assert!(decoder.next().unwrap().is_ok());
        assert!(decoder.next().unwrap().is_err());
        assert!(decoder.next().is_none());
    }

    #[test]
    fn truncated_line_aborts_parse() {
        let err = parse("BEGIN:VCARD\r\nFN:A\r\nNOTE").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn names_are_case_insensitive_keys() {
        let card = parse_single("fn:lower\r\nFn:mixed\r\n").unwrap();
        let fns = card.get_all("FN");
        assert_eq!(fns.len(), 2);
        assert_eq!(fns[0].name, "fn");
        assert_eq!(fns[1].name, "Fn");
    }

    #[test]
    fn reads_from_byte_stream() {
        let bytes: &[u8] = b"BEGIN:VCARD\r\nFN:Stream\r\nEND:VCARD\r\n";
        let cards = parse_reader(bytes).unwrap();
        assert_eq!(cards[0].formatted_name(), Some("Stream"));

        let invalid: &[u8] = &[0xff, 0xfe];
        let err = parse_reader(invalid).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Io);
    }
}
