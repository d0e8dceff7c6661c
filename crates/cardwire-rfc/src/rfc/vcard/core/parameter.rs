//! vCard parameter types (RFC 6350 §5).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Well-known parameter identifiers.
///
/// Extension parameters (`X-...`) are plain strings; every accessor that takes
/// a parameter name accepts both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterName {
    Language,
    Value,
    Pref,
    AltId,
    Pid,
    Type,
    MediaType,
    CalScale,
    SortAs,
    Geo,
    Tz,
    Label,
}

impl ParameterName {
    pub const ALL: [Self; 12] = [
        Self::Language,
        Self::Value,
        Self::Pref,
        Self::AltId,
        Self::Pid,
        Self::Type,
        Self::MediaType,
        Self::CalScale,
        Self::SortAs,
        Self::Geo,
        Self::Tz,
        Self::Label,
    ];

    /// Returns the wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Language => "LANGUAGE",
            Self::Value => "VALUE",
            Self::Pref => "PREF",
            Self::AltId => "ALTID",
            Self::Pid => "PID",
            Self::Type => "TYPE",
            Self::MediaType => "MEDIATYPE",
            Self::CalScale => "CALSCALE",
            Self::SortAs => "SORT-AS",
            Self::Geo => "GEO",
            Self::Tz => "TZ",
            Self::Label => "LABEL",
        }
    }

    /// Case-insensitive comparison against a raw parameter name.
    #[must_use]
    pub fn matches(self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }
}

impl AsRef<str> for ParameterName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|p| p.matches(s)).ok_or(())
    }
}

/// Parameters of a single property.
///
/// Names are case-insensitive: they are stored ASCII-uppercased and iterate in
/// ascending order. Values keep their original case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Parameters {
    entries: BTreeMap<String, Vec<String>>,
}

fn key(name: &str) -> String {
    name.to_ascii_uppercase()
}

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the values of a parameter, if present.
    #[must_use]
    pub fn get(&self, name: impl AsRef<str>) -> Option<&[String]> {
        self.entries.get(&key(name.as_ref())).map(Vec::as_slice)
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn first(&self, name: impl AsRef<str>) -> Option<&str> {
        self.get(name)?.first().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.entries.contains_key(&key(name.as_ref()))
    }

    /// Appends one value, creating the parameter if needed.
    pub fn add(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.entries
            .entry(key(name.as_ref()))
            .or_default()
            .push(value.into());
    }

    /// Concatenates values onto a parameter, creating it if needed.
    ///
    /// An empty `values` still registers the parameter (a value-less flag).
    pub fn extend<I>(&mut self, name: impl AsRef<str>, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.entries
            .entry(key(name.as_ref()))
            .or_default()
            .extend(values);
    }

    /// Replaces a parameter with a single value.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.entries.insert(key(name.as_ref()), vec![value.into()]);
    }

    /// Removes a parameter, returning its values.
    pub fn remove(&mut self, name: impl AsRef<str>) -> Option<Vec<String>> {
        self.entries.remove(&key(name.as_ref()))
    }

    /// Returns whether a parameter carries `value` (case-insensitive).
    #[must_use]
    pub fn contains_value(&self, name: impl AsRef<str>, value: &str) -> bool {
        self.get(name)
            .is_some_and(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
    }

    /// Removes every occurrence of `value` (case-insensitive) from a parameter.
    ///
    /// The parameter itself is dropped once no values remain. Returns whether
    /// anything was removed.
    pub fn remove_value(&mut self, name: impl AsRef<str>, value: &str) -> bool {
        let name = key(name.as_ref());
        let Some(values) = self.entries.get_mut(&name) else {
            return false;
        };
        let before = values.len();
        values.retain(|v| !v.eq_ignore_ascii_case(value));
        let removed = values.len() != before;
        if removed && values.is_empty() {
            self.entries.remove(&name);
        }
        removed
    }

    /// Iterates over `(NAME, values)` in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for Parameters
where
    N: AsRef<str>,
    V: IntoIterator<Item = String>,
{
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (name, values) in iter {
            params.extend(name, values);
        }
        params
    }
}

/// Common TYPE values as constants.
pub mod types {
    // Legacy (vCard 3.0) preference marker
    pub const PREF: &str = "pref";

    // Address types
    pub const HOME: &str = "home";
    pub const WORK: &str = "work";

    // Telephone types
    pub const TEXT: &str = "text";
    pub const VOICE: &str = "voice";
    pub const FAX: &str = "fax";
    pub const CELL: &str = "cell";
    pub const VIDEO: &str = "video";
    pub const PAGER: &str = "pager";
    pub const TEXTPHONE: &str = "textphone";

    // Legacy email type
    pub const INTERNET: &str = "internet";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        let mut params = Parameters::new();
        params.add("type", "home");
        params.add("TYPE", "Work");

        assert_eq!(params.get(ParameterName::Type).map(<[String]>::len), Some(2));
        assert_eq!(params.first("Type"), Some("home"));
        assert!(params.contains_value("type", "WORK"));
        // Stored value keeps its case.
        assert_eq!(params.get("TYPE").unwrap()[1], "Work");
    }

    #[test]
    fn iteration_is_sorted_by_name() {
        let mut params = Parameters::new();
        params.set("TYPE", "home");
        params.set("PREF", "1");
        params.set("ALTID", "1");

        let names: Vec<&str> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["ALTID", "PREF", "TYPE"]);
    }

    #[test]
    fn remove_value_drops_empty_parameter() {
        let mut params = Parameters::new();
        params.extend("TYPE", vec!["PREF".to_string()]);

        assert!(params.remove_value("type", types::PREF));
        assert!(!params.contains("TYPE"));
        assert!(!params.remove_value("TYPE", types::PREF));
    }

    #[test]
    fn extend_with_no_values_registers_flag() {
        let mut params = Parameters::new();
        params.extend("X-FLAG", Vec::new());
        assert_eq!(params.get("x-flag"), Some(&[][..]));
    }

    #[test]
    fn parameter_name_from_str() {
        assert_eq!("sort-as".parse::<ParameterName>(), Ok(ParameterName::SortAs));
        assert!("X-CUSTOM".parse::<ParameterName>().is_err());
    }
}
