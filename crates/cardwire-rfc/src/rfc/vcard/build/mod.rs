//! vCard serialization (RFC 6350).
//!
//! This module provides serialization functionality for vCard data.
//!
//! ## Usage
//!
//! ```rust
//! use cardwire_rfc::rfc::vcard::{VCard, VCardProperty, serialize};
//!
//! let mut card = VCard::with_version("4.0");
//! card.add_property(VCardProperty::text("FN", "John Doe"));
//! card.add_property(VCardProperty::text("EMAIL", "john@example.com"));
//!
//! let output = serialize(&[card]).unwrap();
//! assert!(output.starts_with("BEGIN:VCARD\r\nVERSION:4.0\r\n"));
//! ```
//!
//! ## Features
//!
//! - Line folding at 76 value characters with a two-space indent
//! - Text escaping per RFC 6350
//! - RFC 6868 caret encoding for parameters
//! - Deterministic ordering: VERSION first, then names ascending

mod escape;
mod fold;
mod serializer;

pub use escape::{escape_param_value, escape_text, escape_value, quote_param_value};
pub use fold::{MAX_VALUE_CHARS, fold_value};
pub use serializer::{EncodeError, EncodeResult, Encoder, serialize, serialize_single};
