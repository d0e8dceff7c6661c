//! vCard implementation (RFC 6350).
//!
//! This module provides types, decoding, and encoding for vCard data.
//!
//! ## Overview
//!
//! vCard is a standard format for contact information. The codec accepts
//! vCard 2.1, 3.0 and 4.0 text and can migrate 3.0 cards to 4.0 with
//! [`VCard::upgrade_to_v4`].
//!
//! ## Usage
//!
//! ### Parsing
//!
//! ```rust
//! use cardwire_rfc::rfc::vcard::{parse, VCard};
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:4.0\r\n\
//! FN:John Doe\r\n\
//! EMAIL:john@example.com\r\n\
//! END:VCARD\r\n";
//!
//! let cards = parse(input).unwrap();
//! assert_eq!(cards[0].formatted_name(), Some("John Doe"));
//! ```
//!
//! ### Serializing
//!
//! ```rust
//! use cardwire_rfc::rfc::vcard::{VCard, VCardProperty, serialize};
//!
//! let mut card = VCard::with_version("4.0");
//! card.add_property(VCardProperty::text("FN", "Jane Doe"));
//! card.add_property(VCardProperty::text("EMAIL", "jane@example.com"));
//!
//! let output = serialize(&[card]).unwrap();
//! assert!(output.contains("FN:Jane Doe"));
//! ```
//!
//! ## Round-Trip Fidelity
//!
//! Decoding the output of the encoder yields a record equal to the one that
//! was encoded. Output ordering is deterministic: VERSION first, then
//! property names ascending.
//!
//! ## Submodules
//!
//! - [`core`] - Core types (`VCard`, `VCardProperty`, `VCardValue`, etc.)
//! - [`parse`] - Decoder, parsing functions and error types
//! - [`build`] - Encoder and serialization functions

pub mod build;
pub mod core;
pub mod parse;

mod normalize;


// Re-export commonly used types
pub use build::{EncodeError, Encoder, serialize, serialize_single};
pub use core::{
    Address, Gender, Parameters, PropertyName, Sex, StructuredName, Timestamp, VCard, VCardKind,
    VCardProperty, VCardValue,
};
pub use normalize::{NormalizeOptions, normalize};
pub use parse::{Decoder, ParseError, ParseResult, parse, parse_single};
