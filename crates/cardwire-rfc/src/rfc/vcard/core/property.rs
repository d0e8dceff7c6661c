//! vCard property types (RFC 6350 §6).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::parameter::{ParameterName, Parameters, types};
use super::value::VCardValue;

/// A vCard property: one logical content line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VCardProperty {
    /// Optional property group (e.g., "item1" in "item1.TEL"), case preserved.
    /// Never `Some("")` once stored in a [`VCard`](super::VCard).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Property name as it appeared on the wire.
    pub name: String,
    /// Parameters, keyed case-insensitively.
    #[serde(skip_serializing_if = "Parameters::is_empty")]
    pub params: Parameters,
    /// Structured value.
    pub value: VCardValue,
}

impl VCardProperty {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<VCardValue>) -> Self {
        Self {
            group: None,
            name: name.into(),
            params: Parameters::new(),
            value: value.into(),
        }
    }

    /// Creates a property with a scalar text value.
    #[must_use]
    pub fn text(name: impl AsRef<str>, value: impl Into<String>) -> Self {
        Self::new(name.as_ref(), VCardValue::text(value))
    }

    /// Creates a property with a text value and group. An empty group means none.
    #[must_use]
    pub fn grouped_text(
        group: impl Into<String>,
        name: impl AsRef<str>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            group: Some(group.into()).filter(|g: &String| !g.is_empty()),
            ..Self::text(name, value)
        }
    }

    /// Builder-style parameter append.
    #[must_use]
    pub fn with_param(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.params.add(name, value);
        self
    }

    /// Returns whether the property carries the given name (case-insensitive).
    #[must_use]
    pub fn is_named(&self, name: impl AsRef<str>) -> bool {
        self.name.eq_ignore_ascii_case(name.as_ref())
    }

    /// Returns the values of a parameter.
    #[must_use]
    pub fn param(&self, name: impl AsRef<str>) -> Option<&[String]> {
        self.params.get(name)
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn first_param(&self, name: impl AsRef<str>) -> Option<&str> {
        self.params.first(name)
    }

    /// Appends a parameter value.
    pub fn add_param(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.params.add(name, value);
    }

    /// Replaces a parameter with a single value.
    pub fn set_param(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.params.set(name, value);
    }

    /// Adds a TYPE parameter value.
    pub fn add_type(&mut self, type_value: impl Into<String>) {
        self.params.add(ParameterName::Type, type_value);
    }

    /// Returns whether this property has the specified TYPE value (case-insensitive).
    #[must_use]
    pub fn has_type(&self, type_value: &str) -> bool {
        self.params.contains_value(ParameterName::Type, type_value)
    }

    /// Returns the TYPE values lowercased.
    #[must_use]
    pub fn type_list(&self) -> Vec<String> {
        self.params
            .get(ParameterName::Type)
            .unwrap_or_default()
            .iter()
            .map(|t| t.to_lowercase())
            .collect()
    }

    /// Preference rank used to pick the preferred sibling.
    ///
    /// The PREF value when it is a non-negative integer, else 1 when TYPE
    /// carries the legacy `pref` token, else 0. Higher ranks win.
    #[must_use]
    pub fn pref_rank(&self) -> u64 {
        if let Some(rank) = self
            .first_param(ParameterName::Pref)
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            return rank;
        }
        u64::from(self.has_type(types::PREF))
    }
}

/// Well-known property identifiers (RFC 6350 §6).
///
/// Extension properties (`X-...`) are plain strings; every accessor that takes
/// a property name accepts both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyName {
    // General
    Begin,
    End,
    Source,
    Kind,
    Xml,
    // Identification
    Fn,
    N,
    Nickname,
    Photo,
    Bday,
    Anniversary,
    Gender,
    // Delivery addressing
    Adr,
    // Communications
    Tel,
    Email,
    Impp,
    Lang,
    // Geographical
    Tz,
    Geo,
    // Organizational
    Title,
    Role,
    Logo,
    Org,
    Member,
    Related,
    // Explanatory
    Categories,
    Note,
    ProdId,
    Rev,
    Sound,
    Uid,
    ClientPidMap,
    Url,
    Version,
    // Security
    Key,
    // Calendar
    FbUrl,
    CalAdrUri,
    CalUri,
}

impl PropertyName {
    pub const ALL: [Self; 38] = [
        Self::Begin,
        Self::End,
        Self::Source,
        Self::Kind,
        Self::Xml,
        Self::Fn,
        Self::N,
        Self::Nickname,
        Self::Photo,
        Self::Bday,
        Self::Anniversary,
        Self::Gender,
        Self::Adr,
        Self::Tel,
        Self::Email,
        Self::Impp,
        Self::Lang,
        Self::Tz,
        Self::Geo,
        Self::Title,
        Self::Role,
        Self::Logo,
        Self::Org,
        Self::Member,
        Self::Related,
        Self::Categories,
        Self::Note,
        Self::ProdId,
        Self::Rev,
        Self::Sound,
        Self::Uid,
        Self::ClientPidMap,
        Self::Url,
        Self::Version,
        Self::Key,
        Self::FbUrl,
        Self::CalAdrUri,
        Self::CalUri,
    ];

    /// Returns the wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Begin => "BEGIN",
            Self::End => "END",
            Self::Source => "SOURCE",
            Self::Kind => "KIND",
            Self::Xml => "XML",
            Self::Fn => "FN",
            Self::N => "N",
            Self::Nickname => "NICKNAME",
            Self::Photo => "PHOTO",
            Self::Bday => "BDAY",
            Self::Anniversary => "ANNIVERSARY",
            Self::Gender => "GENDER",
            Self::Adr => "ADR",
            Self::Tel => "TEL",
            Self::Email => "EMAIL",
            Self::Impp => "IMPP",
            Self::Lang => "LANG",
            Self::Tz => "TZ",
            Self::Geo => "GEO",
            Self::Title => "TITLE",
            Self::Role => "ROLE",
            Self::Logo => "LOGO",
            Self::Org => "ORG",
            Self::Member => "MEMBER",
            Self::Related => "RELATED",
            Self::Categories => "CATEGORIES",
            Self::Note => "NOTE",
            Self::ProdId => "PRODID",
            Self::Rev => "REV",
            Self::Sound => "SOUND",
            Self::Uid => "UID",
            Self::ClientPidMap => "CLIENTPIDMAP",
            Self::Url => "URL",
            Self::Version => "VERSION",
            Self::Key => "KEY",
            Self::FbUrl => "FBURL",
            Self::CalAdrUri => "CALADRURI",
            Self::CalUri => "CALURI",
        }
    }

    /// Case-insensitive comparison against a raw property name.
    #[must_use]
    pub fn matches(self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }

    /// Returns whether this is a record framing marker (BEGIN/END).
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(self, Self::Begin | Self::End)
    }
}

impl AsRef<str> for PropertyName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<PropertyName> for String {
    fn from(name: PropertyName) -> Self {
        name.as_str().to_string()
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|p| p.matches(s)).ok_or(())
    }
}
