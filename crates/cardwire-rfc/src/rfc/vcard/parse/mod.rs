//! vCard parsing (RFC 6350).
//!
//! This module provides parsing functionality for vCard documents.
//!
//! ## Usage
//!
//! ```rust
//! use cardwire_rfc::rfc::vcard::parse;
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:4.0\r\n\
//! FN:John Doe\r\n\
//! EMAIL:john@example.com\r\n\
//! END:VCARD\r\n";
//!
//! let cards = parse::parse(input).unwrap();
//! assert_eq!(cards[0].formatted_name(), Some("John Doe"));
//! ```
//!
//! ## Features
//!
//! - Streaming, character-at-a-time decoding
//! - Handles line folding/unfolding anywhere in a line
//! - Parses property groups (item1.TEL)
//! - Two-level structured values (`;` components, `,` sub-values)
//! - RFC 6868 caret encoding for parameters

mod error;
mod lexer;
mod parser;
mod values;


pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::unescape_value;
pub use parser::{Decoder, parse, parse_reader, parse_single};
pub use values::parse_timestamp;
