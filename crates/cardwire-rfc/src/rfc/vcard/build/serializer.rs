//! vCard serialization.

use std::io::{self, Write};

use cardwire_core::constants::{CRLF, VCARD_BEGIN_LINE, VCARD_END_LINE};

use super::escape::{escape_value, quote_param_value};
use super::fold::fold_value;
use crate::rfc::vcard::core::{PropertyName, VCard, VCardProperty};

/// Errors raised while encoding.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("vCard has no VERSION property")]
    MissingVersion,

    #[error("parameter value {0:?} contains a carriage return")]
    UnencodableParameter(String),

    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

pub type EncodeResult<T> = std::result::Result<T, EncodeError>;

/// Streams vCards to a byte sink.
///
/// Output order per record: `BEGIN`, the first VERSION property, every other
/// property grouped by name in ascending name order, then `END`. Lines end in
/// CRLF and values are folded per [`fold_value`].
#[derive(Debug)]
pub struct Encoder<W: Write> {
    writer: W,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes one record.
    ///
    /// ## Errors
    /// Fails with [`EncodeError::MissingVersion`] after the begin line when
    /// the record has no VERSION property, with
    /// [`EncodeError::UnencodableParameter`] for a parameter value holding a
    /// carriage return, or on the first write error.
    pub fn encode(&mut self, card: &VCard) -> EncodeResult<()> {
        self.writer.write_all(VCARD_BEGIN_LINE.as_bytes())?;

        let version = card
            .get_all(PropertyName::Version)
            .first()
            .ok_or(EncodeError::MissingVersion)?;
        self.write_property(PropertyName::Version.as_str(), version)?;

        for (name, props) in card.iter() {
            if PropertyName::Version.matches(name)
                || PropertyName::Begin.matches(name)
                || PropertyName::End.matches(name)
            {
                continue;
            }
            for prop in props {
                self.write_property(name, prop)?;
            }
        }

        self.writer.write_all(VCARD_END_LINE.as_bytes())?;
        Ok(())
    }

    fn write_property(&mut self, key: &str, prop: &VCardProperty) -> EncodeResult<()> {
        let line = render_property(key, prop)?;
        tracing::trace!(name = key, len = line.len(), "Writing property");
        self.writer.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Renders one content line, CRLF included.
///
/// `key` is the record key the property is stored under; the property's own
/// spelling is kept when it names the same property.
fn render_property(key: &str, prop: &VCardProperty) -> EncodeResult<String> {
    let mut line = String::new();

    if let Some(group) = prop.group.as_deref().filter(|g| !g.is_empty()) {
        line.push_str(group);
        line.push('.');
    }

    line.push_str(if prop.is_named(key) { &prop.name } else { key });

    for (name, values) in prop.params.iter() {
        line.push(';');
        line.push_str(name);
        if !values.is_empty() {
            line.push('=');
            let quoted = values
                .iter()
                .map(|v| quote_param_value(v))
                .collect::<EncodeResult<Vec<_>>>()?;
            line.push_str(&quoted.join(","));
        }
    }

    line.push(':');
    line.push_str(&fold_value(&escape_value(&prop.value)));
    line.push_str(CRLF);
    Ok(line)
}

/// Serializes one or more vCards to a string.
///
/// ## Summary
/// Produces vCard output with CRLF line endings, line folding and escaping.
///
/// ## Errors
/// Returns [`EncodeError::MissingVersion`] if any card lacks a VERSION.
#[tracing::instrument(skip(cards), fields(count = cards.len()))]
pub fn serialize(cards: &[VCard]) -> EncodeResult<String> {
    let mut encoder = Encoder::new(Vec::new());
    for card in cards {
        encoder.encode(card)?;
    }
    into_string(encoder.into_inner())
}

/// Serializes a single vCard to a string.
///
/// ## Errors
/// Returns [`EncodeError::MissingVersion`] if the card lacks a VERSION.
pub fn serialize_single(card: &VCard) -> EncodeResult<String> {
    let mut encoder = Encoder::new(Vec::new());
    encoder.encode(card)?;
    into_string(encoder.into_inner())
}

fn into_string(bytes: Vec<u8>) -> EncodeResult<String> {
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::core::{StructuredName, VCardValue};

    fn card() -> VCard {
        VCard::with_version("4.0")
    }

    #[test]
    fn minimal_card() {
        let output = serialize_single(&card()).unwrap();
        assert_eq!(output, "BEGIN:VCARD\r\nVERSION:4.0\r\nEND:VCARD\r\n");
    }

    #[test]
    fn version_first_then_sorted() {
        let mut card = card();
        card.add_property(VCardProperty::text("UID", "urn:uuid:1"));
        card.add_property(VCardProperty::text("EMAIL", "a@example.com"));
        card.add_property(VCardProperty::text("FN", "A"));

        let output = serialize_single(&card).unwrap();
        assert_eq!(
            output,
            "BEGIN:VCARD\r\nVERSION:4.0\r\nEMAIL:a@example.com\r\nFN:A\r\nUID:urn:uuid:1\r\nEND:VCARD\r\n"
        );
    }

    #[test]
    fn missing_version_after_begin() {
        let mut encoder = Encoder::new(Vec::new());
        let err = encoder.encode(&VCard::new()).unwrap_err();
        assert!(matches!(err, EncodeError::MissingVersion));
        assert_eq!(encoder.into_inner(), b"BEGIN:VCARD\r\n");
    }

    #[test]
    fn group_and_parameters() {
        let prop = VCardProperty::grouped_text("item1", "TEL", "+1-555")
            .with_param("type", "work")
            .with_param("TYPE", "voice")
            .with_param("PREF", "1");
        assert_eq!(
            render_property("TEL", &prop).unwrap(),
            "item1.TEL;PREF=1;TYPE=work,voice:+1-555\r\n"
        );
    }

    #[test]
    fn flag_parameter_omits_equals() {
        let mut prop = VCardProperty::text("TEL", "123");
        prop.params.extend("HOME", Vec::new());
        assert_eq!(render_property("TEL", &prop).unwrap(), "TEL;HOME:123\r\n");
    }

    #[test]
    fn quoted_parameter() {
        let prop = VCardProperty::text("ADR", "").with_param("GEO", "geo:1,2");
        assert_eq!(render_property("ADR", &prop).unwrap(), "ADR;GEO=\"geo:1,2\":\r\n");
    }

    #[test]
    fn control_characters_in_parameters_are_kept() {
        let prop = VCardProperty::text("NOTE", "x").with_param("LABEL", "a\tb");
        assert_eq!(render_property("NOTE", &prop).unwrap(), "NOTE;LABEL=a\tb:x\r\n");
    }

    #[test]
    fn carriage_return_in_parameter_fails() {
        let mut card = card();
        card.add_property(VCardProperty::text("NOTE", "x").with_param("LABEL", "a\rb"));
        let err = serialize_single(&card).unwrap_err();
        assert!(matches!(err, EncodeError::UnencodableParameter(_)));
    }

    #[test]
    fn structured_value() {
        let mut card = card();
        card.add_name(&StructuredName::simple("Doe", "J."));
        let output = serialize_single(&card).unwrap();
        assert!(output.contains("\r\nN:Doe;J.;;;\r\n"));
    }

    #[test]
    fn escapes_text() {
        let prop = VCardProperty::new("NOTE", VCardValue::text("a;b,c\nd\\e"));
        assert_eq!(render_property("NOTE", &prop).unwrap(), "NOTE:a\\;b\\,c\\nd\\\\e\r\n");
    }

    #[test]
    fn long_value_is_folded() {
        let prop = VCardProperty::text("NOTE", "x".repeat(100));
        let line = render_property("NOTE", &prop).unwrap();
        assert_eq!(
            line,
            format!("NOTE:{}\r\n  {}\r\n", "x".repeat(76), "x".repeat(24))
        );
    }

    #[test]
    fn keeps_property_spelling() {
        let mut card = card();
        card.add_property(VCardProperty::text("x-Custom", "v"));
        let output = serialize_single(&card).unwrap();
        assert!(output.contains("\r\nx-Custom:v\r\n"));
    }

    #[test]
    fn serialize_multiple() {
        let output = serialize(&[card(), card()]).unwrap();
        assert_eq!(output.matches("BEGIN:VCARD").count(), 2);
        assert_eq!(output.matches("END:VCARD").count(), 2);
    }

    #[test]
    fn write_errors_propagate() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = Encoder::new(Broken).encode(&card()).unwrap_err();
        assert!(matches!(err, EncodeError::Io(_)));
    }
}
