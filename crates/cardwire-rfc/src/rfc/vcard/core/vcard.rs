//! vCard record type.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;

use super::datetime::Timestamp;
use super::parameter::{ParameterName, types};
use super::property::{PropertyName, VCardProperty};
use super::structured::{Address, Gender, Sex, Structured, StructuredName, VCardKind};
use super::value::VCardValue;
use crate::rfc::vcard::parse::{ParseResult, parse_timestamp};

/// Version written by [`VCard::upgrade_to_v4`].
pub const VERSION_4: &str = "4.0";

fn key(name: &str) -> String {
    name.to_ascii_uppercase()
}

/// A complete vCard: properties grouped by name.
///
/// Names are matched case-insensitively and iterate in ascending order. Within
/// one name, properties keep the order they were added in, which is what
/// [`VCard::get`] and [`VCard::preferred`] rely on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VCard {
    properties: BTreeMap<String, Vec<VCardProperty>>,
}

impl VCard {
    /// Creates an empty vCard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a vCard holding only a VERSION property.
    #[must_use]
    pub fn with_version(version: impl Into<String>) -> Self {
        let mut card = Self::new();
        card.set(
            PropertyName::Version,
            VCardProperty::text(PropertyName::Version, version),
        );
        card
    }

    // --- Generic access ---

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get(&self, name: impl AsRef<str>) -> Option<&VCardProperty> {
        self.get_all(name).first()
    }

    /// Returns the first property with the given name, mutably.
    pub fn get_mut(&mut self, name: impl AsRef<str>) -> Option<&mut VCardProperty> {
        self.properties.get_mut(&key(name.as_ref()))?.first_mut()
    }

    /// Returns every property with the given name, in insertion order.
    #[must_use]
    pub fn get_all(&self, name: impl AsRef<str>) -> &[VCardProperty] {
        self.properties
            .get(&key(name.as_ref()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Appends a property under `name`. Never replaces.
    pub fn add(&mut self, name: impl AsRef<str>, property: VCardProperty) {
        self.properties
            .entry(key(name.as_ref()))
            .or_default()
            .push(without_blank_group(property));
    }

    /// Appends a property under its own name.
    pub fn add_property(&mut self, property: VCardProperty) {
        let name = property.name.clone();
        self.add(name, property);
    }

    /// Replaces every property under `name` with `property`.
    pub fn set(&mut self, name: impl AsRef<str>, property: VCardProperty) {
        self.properties
            .insert(key(name.as_ref()), vec![without_blank_group(property)]);
    }

    /// Removes and returns every property under `name`.
    pub fn remove(&mut self, name: impl AsRef<str>) -> Vec<VCardProperty> {
        self.properties
            .remove(&key(name.as_ref()))
            .unwrap_or_default()
    }

    /// Returns the value of the first property with the given name.
    #[must_use]
    pub fn value(&self, name: impl AsRef<str>) -> Option<&VCardValue> {
        self.get(name).map(|p| &p.value)
    }

    /// Returns the values of every property with the given name.
    #[must_use]
    pub fn values(&self, name: impl AsRef<str>) -> Vec<&VCardValue> {
        self.get_all(name).iter().map(|p| &p.value).collect()
    }

    /// Appends a parameterless property holding `value`.
    pub fn add_value(&mut self, name: impl AsRef<str>, value: impl Into<VCardValue>) {
        let name = name.as_ref();
        self.add(name, VCardProperty::new(name, value));
    }

    /// Replaces every property under `name` with a parameterless one holding `value`.
    pub fn set_value(&mut self, name: impl AsRef<str>, value: impl Into<VCardValue>) {
        let name = name.as_ref();
        self.set(name, VCardProperty::new(name, value));
    }

    /// Returns the property with the highest preference rank.
    ///
    /// See [`VCardProperty::pref_rank`]. On ties the earliest property wins.
    #[must_use]
    pub fn preferred(&self, name: impl AsRef<str>) -> Option<&VCardProperty> {
        let mut props = self.get_all(name).iter();
        let mut best = props.next()?;
        let mut best_rank = best.pref_rank();
        for prop in props {
            let rank = prop.pref_rank();
            if rank > best_rank {
                best = prop;
                best_rank = rank;
            }
        }
        Some(best)
    }

    /// Returns the value of the preferred property.
    #[must_use]
    pub fn preferred_value(&self, name: impl AsRef<str>) -> Option<&VCardValue> {
        self.preferred(name).map(|p| &p.value)
    }

    /// Iterates over `(NAME, properties)` in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[VCardProperty])> {
        self.properties
            .iter()
            .map(|(name, props)| (name.as_str(), props.as_slice()))
    }

    /// Iterates over the (uppercased) property names present.
    pub fn names_iter(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Returns the total number of properties.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.values().all(Vec::is_empty)
    }

    // --- Typed views ---

    /// Reads the first property of a structured view's type.
    #[must_use]
    pub fn view<T: Structured>(&self) -> Option<T> {
        self.value(T::PROPERTY).map(T::from_value)
    }

    /// Reads every property of a structured view's type.
    #[must_use]
    pub fn views<T: Structured>(&self) -> Vec<T> {
        self.get_all(T::PROPERTY)
            .iter()
            .map(|p| T::from_value(&p.value))
            .collect()
    }

    /// Appends a property built from a structured view.
    pub fn add_view<T: Structured>(&mut self, view: &T) {
        self.add_value(T::PROPERTY, view.to_value());
    }

    /// Edits the first property of a view's type in place.
    ///
    /// The closure sees the current projection; whatever it leaves behind is
    /// written back into the same property, keeping its group and parameters.
    /// Returns `false` when no such property exists.
    pub fn edit_view<T: Structured>(&mut self, edit: impl FnOnce(&mut T)) -> bool {
        let Some(prop) = self.get_mut(T::PROPERTY) else {
            return false;
        };
        let mut view = T::from_value(&prop.value);
        edit(&mut view);
        view.write_into(&mut prop.value);
        true
    }

    /// Returns the structured name (N).
    #[must_use]
    pub fn name(&self) -> Option<StructuredName> {
        self.view()
    }

    /// Returns every structured name (N).
    #[must_use]
    pub fn names(&self) -> Vec<StructuredName> {
        self.views()
    }

    pub fn add_name(&mut self, name: &StructuredName) {
        self.add_view(name);
    }

    /// Edits the first structured name in place.
    pub fn edit_name(&mut self, edit: impl FnOnce(&mut StructuredName)) -> bool {
        self.edit_view(edit)
    }

    /// Returns the first address (ADR).
    #[must_use]
    pub fn address(&self) -> Option<Address> {
        self.view()
    }

    /// Returns every address (ADR).
    #[must_use]
    pub fn addresses(&self) -> Vec<Address> {
        self.views()
    }

    pub fn add_address(&mut self, address: &Address) {
        self.add_view(address);
    }

    /// Edits the first address in place.
    pub fn edit_address(&mut self, edit: impl FnOnce(&mut Address)) -> bool {
        self.edit_view(edit)
    }

    /// Returns the gender; unspecified when absent.
    #[must_use]
    pub fn gender(&self) -> Gender {
        self.view().unwrap_or_default()
    }

    /// Replaces the GENDER property.
    pub fn set_gender(&mut self, sex: Sex, identity: Option<&str>) {
        let gender = Gender::new(sex, identity.map(str::to_string));
        self.set_value(PropertyName::Gender, gender.to_value());
    }

    /// Returns the kind; `individual` when absent or empty.
    #[must_use]
    pub fn kind(&self) -> VCardKind {
        self.value(PropertyName::Kind)
            .and_then(VCardValue::first_text)
            .map(VCardKind::parse)
            .unwrap_or_default()
    }

    pub fn set_kind(&mut self, kind: &VCardKind) {
        self.set_value(PropertyName::Kind, kind.as_str());
    }

    /// Returns the FN properties, never empty.
    ///
    /// A card without FN yields a single FN property with a blank value.
    #[must_use]
    pub fn formatted_names(&self) -> Cow<'_, [VCardProperty]> {
        match self.get_all(PropertyName::Fn) {
            [] => Cow::Owned(vec![VCardProperty::text(PropertyName::Fn, "")]),
            props => Cow::Borrowed(props),
        }
    }

    /// Returns the preferred formatted name text.
    #[must_use]
    pub fn formatted_name(&self) -> Option<&str> {
        self.preferred_value(PropertyName::Fn)?.first_text()
    }

    /// Returns the UID text.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.value(PropertyName::Uid)?.first_text()
    }

    /// Returns every EMAIL text.
    #[must_use]
    pub fn emails(&self) -> Vec<&str> {
        self.get_all(PropertyName::Email)
            .iter()
            .filter_map(|p| p.value.first_text())
            .collect()
    }

    /// Returns the revision timestamp.
    ///
    /// ## Errors
    /// Returns a parse error if the stored REV does not match
    /// `YYYYMMDD"T"HHMMSS"Z"`. A missing REV is `Ok(None)`.
    pub fn revision(&self) -> ParseResult<Option<Timestamp>> {
        self.value(PropertyName::Rev)
            .and_then(VCardValue::first_text)
            .map(|raw| parse_timestamp(raw, 0))
            .transpose()
    }

    pub fn set_revision(&mut self, revision: impl Into<Timestamp>) {
        self.set_value(PropertyName::Rev, revision.into().to_wire());
    }

    /// Returns the categories of the preferred CATEGORIES property.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.preferred_value(PropertyName::Categories)
            .and_then(|v| v.component(0))
            .map(|tags| {
                tags.iter()
                    .map(String::as_str)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn set_categories<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_value(PropertyName::Categories, VCardValue::list(categories));
    }

    /// Returns the raw VERSION text.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.value(PropertyName::Version)?.first_text()
    }

    /// Migrates a vCard 3.0 card to 4.0 in place.
    ///
    /// Cards whose version already starts with `4.` are left untouched.
    /// Otherwise VERSION becomes `4.0` and every legacy `TYPE=pref` token is
    /// replaced with `PREF=1`. Returns whether the card changed.
    #[tracing::instrument(skip(self), fields(version = self.version()))]
    pub fn upgrade_to_v4(&mut self) -> bool {
        if self.version().is_some_and(|v| v.starts_with("4.")) {
            tracing::trace!("Already vCard 4, nothing to upgrade");
            return false;
        }

        match self.get_mut(PropertyName::Version) {
            Some(version) => version.value = VCardValue::text(VERSION_4),
            None => self.set_value(PropertyName::Version, VERSION_4),
        }

        let mut migrated = 0_usize;
        for (name, props) in &mut self.properties {
            if PropertyName::Version.matches(name) {
                continue;
            }
            for prop in props {
                if prop.params.remove_value(ParameterName::Type, types::PREF) {
                    prop.params.set(ParameterName::Pref, "1");
                    migrated += 1;
                }
            }
        }

        tracing::debug!(migrated, "Upgraded vCard to version 4.0");
        true
    }
}

/// An empty group has no wire form, so it is stored as no group.
fn without_blank_group(mut property: VCardProperty) -> VCardProperty {
    if property.group.as_deref() == Some("") {
        property.group = None;
    }
    property
}

impl Extend<VCardProperty> for VCard {
    fn extend<T: IntoIterator<Item = VCardProperty>>(&mut self, iter: T) {
        for property in iter {
            self.add_property(property);
        }
    }
}

impl FromIterator<VCardProperty> for VCard {
    fn from_iter<T: IntoIterator<Item = VCardProperty>>(iter: T) -> Self {
        let mut card = Self::new();
        card.extend(iter);
        card
    }
}
