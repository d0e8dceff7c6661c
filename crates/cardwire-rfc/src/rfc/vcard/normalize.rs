//! Decode-then-encode pass producing canonical vCard text.

use super::build::serialize;
use super::core::VCard;
use super::parse::parse;
use crate::error::RfcResult;

/// Options for [`normalize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Run [`VCard::upgrade_to_v4`] on every record before encoding.
    pub upgrade: bool,
}

/// Decodes every record in `input` and encodes them again.
///
/// The output is folded, escaped and ordered the way the encoder writes it,
/// so normalizing twice gives the same text.
///
/// ## Errors
/// Returns a parse error for malformed input, or an encode error when a
/// record has no VERSION.
#[tracing::instrument(skip(input), fields(input_len = input.len(), upgrade = options.upgrade))]
pub fn normalize(input: &str, options: NormalizeOptions) -> RfcResult<String> {
    let mut cards = parse(input)?;

    if options.upgrade {
        let upgraded = cards
            .iter_mut()
            .map(VCard::upgrade_to_v4)
            .filter(|changed| *changed)
            .count();
        tracing::debug!(upgraded, total = cards.len(), "Upgraded vCards");
    }

    Ok(serialize(&cards)?)
}
