//! vCard core types (RFC 6350).
//!
//! This module provides the foundational types for representing vCard data:
//!
//! - [`VCard`] - A complete contact record, properties grouped by name
//! - [`VCardProperty`] - Individual property with group, parameters and value
//! - [`Parameters`] - Case-insensitive parameter map
//! - [`VCardValue`] - Two-level structured value (components of sub-values)
//!
//! ## Structured Views
//!
//! - [`StructuredName`] - N property (family, given, etc.)
//! - [`Address`] - ADR property
//! - [`Gender`] - GENDER property
//! - [`VCardKind`] - KIND property
//!
//! Views are projections over a property value; see [`Structured`].
//!
//! ## Example
//!
//! ```rust
//! use cardwire_rfc::rfc::vcard::core::{PropertyName, StructuredName, VCard, VCardProperty};
//!
//! let mut card = VCard::with_version("4.0");
//! card.add_property(VCardProperty::text(PropertyName::Fn, "John Doe"));
//! card.add_name(&StructuredName::simple("Doe", "John"));
//!
//! assert_eq!(card.formatted_name(), Some("John Doe"));
//! assert_eq!(card.name().unwrap().family, vec!["Doe"]);
//! ```

mod datetime;
mod parameter;
mod property;
mod structured;
mod value;
mod vcard;

pub use datetime::{TIMESTAMP_FORMAT, TIMESTAMP_LEN, Timestamp};
pub use parameter::{ParameterName, Parameters, types};
pub use property::{PropertyName, VCardProperty};
pub use structured::{Address, Gender, Sex, Structured, StructuredName, VCardKind};
pub use value::VCardValue;
pub use vcard::{VCard, VERSION_4};
