use std::fmt;

use anyhow::Result;
use cardwire_rfc::rfc::vcard::{VCard, parse};

use crate::cmd::ShowArgs;
use crate::io::{read_input, write_output};

pub fn run(args: &ShowArgs) -> Result<()> {
    let input = read_input(&args.io.input)?;
    let cards = parse(&input)?;
    tracing::debug!(count = cards.len(), "Decoded cards");

    let output = if args.json {
        render_json(&cards)?
    } else {
        render_summary(&cards)
    };
    write_output(args.io.output.as_deref(), &output)
}

/// ## Errors
/// Returns an error if JSON serialization fails.
pub fn render_json(cards: &[VCard]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(cards)?;
    json.push('\n');
    Ok(json)
}

/// One block per card: the preferred formatted name, then key properties.
#[must_use]
pub fn render_summary(cards: &[VCard]) -> String {
    Summary(cards).to_string()
}

struct Summary<'a>(&'a [VCard]);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in self.0 {
            let name = card.formatted_name().filter(|n| !n.is_empty());
            writeln!(f, "{}", name.unwrap_or("(no name)"))?;
            writeln!(f, "  version: {}", card.version().unwrap_or("-"))?;
            writeln!(f, "  kind: {}", card.kind())?;

            if let Some(uid) = card.uid() {
                writeln!(f, "  uid: {uid}")?;
            }
            if let Some(email) = card.preferred_value("EMAIL").and_then(|v| v.first_text()) {
                writeln!(f, "  email: {email}")?;
            }
            if let Some(address) = card.address() {
                writeln!(f, "  address: {}", address.one_line())?;
            }
            match card.revision() {
                Ok(Some(revision)) => writeln!(f, "  revision: {revision}")?,
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "Ignoring malformed REV"),
            }
            writeln!(f, "  properties: {}", card.property_count())?;
        }
        Ok(())
    }
}
