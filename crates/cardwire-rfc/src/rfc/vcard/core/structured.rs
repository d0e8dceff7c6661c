//! Structured vCard types (RFC 6350).
//!
//! These are projections over a property's [`VCardValue`]: they are read from
//! the value on demand and written back into it, never stored on their own.

use std::fmt;

use serde::Serialize;

use super::property::PropertyName;
use super::value::VCardValue;

/// A typed view over the components of one property value.
pub trait Structured: Sized {
    /// The property this view projects.
    const PROPERTY: PropertyName;

    /// Builds the view from a value. Missing components read as empty.
    fn from_value(value: &VCardValue) -> Self;

    /// Writes the view into `value`, replacing the components it covers and
    /// keeping any trailing ones it does not know about.
    fn write_into(&self, value: &mut VCardValue);

    /// Builds a fresh value holding only this view's components.
    fn to_value(&self) -> VCardValue {
        let mut value = VCardValue::new();
        self.write_into(&mut value);
        value
    }
}

/// Reads one component as a list, treating the blank normal form `[""]` as empty.
fn read_list(value: &VCardValue, index: usize) -> Vec<String> {
    match value.component(index) {
        Some([single]) if single.is_empty() => Vec::new(),
        Some(values) => values.to_vec(),
        None => Vec::new(),
    }
}

fn write_lists(value: &mut VCardValue, lists: &[&Vec<String>]) {
    let components = value.components_mut();
    if components.len() < lists.len() {
        components.resize_with(lists.len(), Vec::new);
    }
    for (slot, list) in components.iter_mut().zip(lists) {
        *slot = if list.is_empty() {
            vec![String::new()]
        } else {
            (*list).clone()
        };
    }
}

/// Structured name (N property, RFC 6350 §6.2.2).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuredName {
    /// Family names (surnames).
    pub family: Vec<String>,
    /// Given names (first names).
    pub given: Vec<String>,
    /// Additional names (middle names).
    pub additional: Vec<String>,
    /// Honorific prefixes (e.g., "Mr.", "Dr.").
    pub prefixes: Vec<String>,
    /// Honorific suffixes (e.g., "Jr.", "M.D.").
    pub suffixes: Vec<String>,
}

impl StructuredName {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a structured name with family and given names.
    #[must_use]
    pub fn simple(family: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            family: vec![family.into()],
            given: vec![given.into()],
            ..Self::default()
        }
    }

    /// Returns whether every component is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.family.is_empty()
            && self.given.is_empty()
            && self.additional.is_empty()
            && self.prefixes.is_empty()
            && self.suffixes.is_empty()
    }

    /// Formats as a display name (given + family).
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut parts = Vec::new();
        if !self.given.is_empty() {
            parts.push(self.given.join(" "));
        }
        if !self.family.is_empty() {
            parts.push(self.family.join(" "));
        }
        parts.join(" ")
    }
}

impl Structured for StructuredName {
    const PROPERTY: PropertyName = PropertyName::N;

    fn from_value(value: &VCardValue) -> Self {
        Self {
            family: read_list(value, 0),
            given: read_list(value, 1),
            additional: read_list(value, 2),
            prefixes: read_list(value, 3),
            suffixes: read_list(value, 4),
        }
    }

    fn write_into(&self, value: &mut VCardValue) {
        write_lists(
            value,
            &[
                &self.family,
                &self.given,
                &self.additional,
                &self.prefixes,
                &self.suffixes,
            ],
        );
    }
}

/// Address (ADR property, RFC 6350 §6.3.1).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Address {
    /// Post office box.
    pub po_box: Vec<String>,
    /// Extended address (e.g., apartment or suite number).
    pub extended: Vec<String>,
    /// Street address.
    pub street: Vec<String>,
    /// Locality (city).
    pub locality: Vec<String>,
    /// Region (state or province).
    pub region: Vec<String>,
    /// Postal code.
    pub postal_code: Vec<String>,
    /// Country name.
    pub country: Vec<String>,
}

impl Address {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.po_box.is_empty()
            && self.extended.is_empty()
            && self.street.is_empty()
            && self.locality.is_empty()
            && self.region.is_empty()
            && self.postal_code.is_empty()
            && self.country.is_empty()
    }

    /// Formats as a single-line address.
    #[must_use]
    pub fn one_line(&self) -> String {
        [
            &self.street,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .flat_map(|v| v.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
    }
}

impl Structured for Address {
    const PROPERTY: PropertyName = PropertyName::Adr;

    fn from_value(value: &VCardValue) -> Self {
        Self {
            po_box: read_list(value, 0),
            extended: read_list(value, 1),
            street: read_list(value, 2),
            locality: read_list(value, 3),
            region: read_list(value, 4),
            postal_code: read_list(value, 5),
            country: read_list(value, 6),
        }
    }

    fn write_into(&self, value: &mut VCardValue) {
        write_lists(
            value,
            &[
                &self.po_box,
                &self.extended,
                &self.street,
                &self.locality,
                &self.region,
                &self.postal_code,
                &self.country,
            ],
        );
    }
}

/// Sex component of the GENDER property (RFC 6350 §6.2.7).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Sex {
    /// Empty sex component.
    #[default]
    Unspecified,
    Female,
    Male,
    Other,
    /// None or not applicable.
    None,
    Unknown,
}

impl Sex {
    /// Parses a sex code (case-insensitive). Empty input is `Unspecified`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "" => Some(Self::Unspecified),
            "F" | "f" => Some(Self::Female),
            "M" | "m" => Some(Self::Male),
            "O" | "o" => Some(Self::Other),
            "N" | "n" => Some(Self::None),
            "U" | "u" => Some(Self::Unknown),
            _ => Option::None,
        }
    }

    /// Returns the wire code.
    #[must_use]
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::Female => "F",
            Self::Male => "M",
            Self::Other => "O",
            Self::None => "N",
            Self::Unknown => "U",
        }
    }
}

/// Gender (GENDER property, RFC 6350 §6.2.7).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Gender {
    pub sex: Sex,
    /// Free-form gender identity text.
    pub identity: Option<String>,
}

impl Gender {
    #[must_use]
    pub fn new(sex: Sex, identity: Option<String>) -> Self {
        Self { sex, identity }
    }

    #[must_use]
    pub fn sex(sex: Sex) -> Self {
        Self {
            sex,
            identity: None,
        }
    }
}

impl Structured for Gender {
    const PROPERTY: PropertyName = PropertyName::Gender;

    fn from_value(value: &VCardValue) -> Self {
        let code = value.first_text().unwrap_or_default();
        let sex = Sex::from_code(code).unwrap_or_else(|| {
            tracing::warn!(code, "Unrecognised sex code, reading as unspecified");
            Sex::Unspecified
        });
        let identity = value
            .component(1)
            .and_then(<[String]>::first)
            .filter(|s| !s.is_empty())
            .cloned();
        Self { sex, identity }
    }

    fn write_into(&self, value: &mut VCardValue) {
        let components = value.components_mut();
        components.clear();
        components.push(vec![self.sex.as_code().to_string()]);
        if let Some(identity) = &self.identity {
            components.push(vec![identity.clone()]);
        }
    }
}

/// vCard KIND property values (RFC 6350 §6.1.4).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum VCardKind {
    /// An individual person.
    #[default]
    Individual,
    /// A group of people.
    Group,
    /// An organization.
    Organization,
    /// A named location.
    Location,
    /// Extension or unknown kind.
    Other(String),
}

impl VCardKind {
    /// Parses from a kind token (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "" | "individual" => Self::Individual,
            "group" => Self::Group,
            "org" | "organization" => Self::Organization,
            "location" => Self::Location,
            _ => Self::Other(s.trim().to_string()),
        }
    }

    /// Returns the kind token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Individual => "individual",
            Self::Group => "group",
            Self::Organization => "org",
            Self::Location => "location",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for VCardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for VCardKind {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}
