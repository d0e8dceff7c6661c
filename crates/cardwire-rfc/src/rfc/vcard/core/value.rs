//! vCard property values.

use std::fmt;

use serde::Serialize;

/// A two-level structured property value.
///
/// The outer level holds components (separated by `;` on the wire), the inner
/// level the sub-values of each component (separated by `,`). Rows need not
/// have equal length. A scalar value is one component holding one sub-value.
///
/// Values are kept in the decoder's normal form: at least one component, and
/// an empty list stored as a single empty sub-value `[""]`, since both shapes
/// read back from the wire identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VCardValue {
    components: Vec<Vec<String>>,
}

impl VCardValue {
    /// Creates a blank value, `[[""]]`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scalar text value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            components: vec![vec![value.into()]],
        }
    }

    /// Creates a single component holding several sub-values (`a,b,c`).
    #[must_use]
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_components(vec![values.into_iter().map(Into::into).collect()])
    }

    /// Creates a structured value with one sub-value per component (`a;b;c`).
    #[must_use]
    pub fn structured<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: components.into_iter().map(|c| vec![c.into()]).collect(),
        }
    }

    /// Creates a value from raw rows, filling empty rows with `[""]`.
    #[must_use]
    pub fn from_components(mut components: Vec<Vec<String>>) -> Self {
        if components.is_empty() {
            components.push(Vec::new());
        }
        for component in &mut components {
            fill_blank(component);
        }
        Self { components }
    }

    #[must_use]
    pub fn components(&self) -> &[Vec<String>] {
        &self.components
    }

    /// Mutable access to the rows. Callers must leave them non-empty.
    pub fn components_mut(&mut self) -> &mut Vec<Vec<String>> {
        &mut self.components
    }

    #[must_use]
    pub fn into_components(self) -> Vec<Vec<String>> {
        self.components
    }

    /// Returns the sub-values of a component.
    #[must_use]
    pub fn component(&self, index: usize) -> Option<&[String]> {
        self.components.get(index).map(Vec::as_slice)
    }

    /// Returns the first sub-value of the first component.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.components.first()?.first().map(String::as_str)
    }

    /// Returns every sub-value of every component, flattened in order.
    #[must_use]
    pub fn text_list(&self) -> Vec<&str> {
        self.components
            .iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    pub fn push_component(&mut self, mut component: Vec<String>) {
        fill_blank(&mut component);
        self.components.push(component);
    }

    /// Returns whether the value has no text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.iter().flatten().all(String::is_empty)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }
}

fn fill_blank(component: &mut Vec<String>) {
    if component.is_empty() {
        component.push(String::new());
    }
}

impl Default for VCardValue {
    fn default() -> Self {
        Self::text("")
    }
}

impl From<&str> for VCardValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for VCardValue {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<Vec<Vec<String>>> for VCardValue {
    fn from(components: Vec<Vec<String>>) -> Self {
        Self::from_components(components)
    }
}

/// Renders the unescaped text, components joined by `;` and sub-values by `,`.
impl fmt::Display for VCardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            for (j, sub) in component.iter().enumerate() {
                if j > 0 {
                    f.write_str(",")?;
                }
                f.write_str(sub)?;
            }
        }
        Ok(())
    }
}
