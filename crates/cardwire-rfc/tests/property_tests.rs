//! Property-based tests for the codec's inverse guarantees.

use cardwire_rfc::rfc::vcard::build::{MAX_VALUE_CHARS, escape_value, fold_value};
use cardwire_rfc::rfc::vcard::parse::{parse_single, unescape_value};
use cardwire_rfc::rfc::vcard::{Parameters, VCard, VCardProperty, VCardValue, serialize_single};
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> {
    "(?s).{0,120}"
}

fn value() -> impl Strategy<Value = VCardValue> {
    prop::collection::vec(prop::collection::vec(text(), 1..4), 1..5)
        .prop_map(VCardValue::from_components)
}

fn params() -> impl Strategy<Value = Parameters> {
    prop::collection::vec(
        (
            "X-[A-Z]{1,6}",
            // Anything but CR, which parameter values cannot carry
            prop::collection::vec("[^\r]{0,12}", 0..3),
        ),
        0..4,
    )
    .prop_map(|entries| entries.into_iter().collect())
}

fn property() -> impl Strategy<Value = VCardProperty> {
    (
        proptest::option::of("[a-z][a-z0-9]{0,5}"),
        "X-[A-Z0-9]{1,8}",
        params(),
        value(),
    )
        .prop_map(|(group, name, params, value)| VCardProperty {
            group,
            name,
            params,
            value,
        })
}

fn card() -> impl Strategy<Value = VCard> {
    prop::collection::vec(property(), 0..6).prop_map(|props| {
        let mut card = VCard::with_version("4.0");
        card.extend(props);
        card
    })
}

proptest! {
    #[test]
    fn prop_record_round_trip(card in card()) {
        let encoded = serialize_single(&card).unwrap();
        let decoded = parse_single(&encoded).unwrap();
        prop_assert_eq!(decoded, card);
    }

    #[test]
    fn prop_encoding_is_stable(card in card()) {
        let encoded = serialize_single(&card).unwrap();
        let reencoded = serialize_single(&parse_single(&encoded).unwrap()).unwrap();
        prop_assert_eq!(encoded, reencoded);
    }

    #[test]
    fn prop_escape_inverse(value in value()) {
        prop_assert_eq!(unescape_value(&escape_value(&value)), value);
    }

    #[test]
    fn prop_fold_unfold_inverse(value in value()) {
        let folded = fold_value(&escape_value(&value));
        prop_assert_eq!(unescape_value(&folded), value);
    }

    #[test]
    fn prop_folded_lines_fit(value in value()) {
        let folded = fold_value(&escape_value(&value));
        for (i, line) in folded.split("\r\n").enumerate() {
            let text = if i == 0 { Some(line) } else { line.strip_prefix("  ") };
            prop_assert!(text.is_some(), "continuation {} lacks indent: {:?}", i, line);
            let width = text.map_or(0, |t| t.chars().count());
            prop_assert!(width <= MAX_VALUE_CHARS, "line {} too wide: {:?}", i, line);
        }
    }
}
