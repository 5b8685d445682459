use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::tags::{
    DEFAULT_OCR_ENGINE, REDACTED_FALSE, TAG_DOC_TYPE, TAG_EXTRACT_VERSION, TAG_OCR_ENGINE,
    TAG_PROJECT_NAME, TAG_REDACTED, TAG_SET, TBA,
};
use crate::types::{TagName, TagValue};

/// Train/test membership label carried in the `Set` tag field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetLabel {
    /// Training split.
    Train,
    /// Test split.
    Test,
}

impl SetLabel {
    /// Canonical tag value for this label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SetLabel::Train => "Train",
            SetLabel::Test => "Test",
        }
    }

    /// Parse a tag value into a label, if it is one of the canonical values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Train" => Some(SetLabel::Train),
            "Test" => Some(SetLabel::Test),
            _ => None,
        }
    }
}

/// Ordered tag name → value mapping attached to a document.
///
/// Insertion order is preserved so tag sets round-trip through the store
/// without reordering. Unknown fields are carried through merges untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSet {
    entries: IndexMap<TagName, TagValue>,
}

impl TagSet {
    /// Create an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tag set from `(name, value)` pairs, preserving order.
    pub fn from_entries<N, V, I>(entries: I) -> Self
    where
        N: Into<TagName>,
        V: Into<TagValue>,
        I: IntoIterator<Item = (N, V)>,
    {
        let mut set = Self::new();
        for (name, value) in entries {
            set.entries.insert(name.into(), value.into());
        }
        set
    }

    /// Default tag set with the recognized fields, classification-derived
    /// fields left as the `TBA` sentinel.
    pub fn tba_defaults() -> Self {
        Self::from_entries([
            (TAG_DOC_TYPE, TBA),
            (TAG_EXTRACT_VERSION, TBA),
            (TAG_OCR_ENGINE, DEFAULT_OCR_ENGINE),
            (TAG_REDACTED, REDACTED_FALSE),
            (TAG_PROJECT_NAME, TBA),
            (TAG_SET, SetLabel::Train.as_str()),
        ])
    }

    /// Value of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Insert or overwrite a single field.
    pub fn set(&mut self, name: impl Into<TagName>, value: impl Into<TagValue>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no fields are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// True when `name` is present and holds the `TBA` sentinel.
    pub fn is_tba(&self, name: &str) -> bool {
        self.get(name) == Some(TBA)
    }

    /// Parsed `Set` membership, if the field holds a canonical value.
    pub fn set_label(&self) -> Option<SetLabel> {
        self.get(TAG_SET).and_then(SetLabel::parse)
    }

    /// Merge classification-derived values into caller-supplied defaults.
    ///
    /// Every field of `defaults` valued `TBA` is replaced by the matching
    /// field of `derived` when one exists; all other fields pass through
    /// byte-identical. Fields present only in `derived` are never added.
    pub fn merge_defaults(defaults: &TagSet, derived: &TagSet) -> TagSet {
        let mut merged = TagSet::new();
        for (name, value) in defaults.iter() {
            match derived.get(name) {
                Some(derived_value) if value == TBA => merged.set(name, derived_value),
                _ => merged.set(name, value),
            }
        }
        merged
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = (&'a TagName, &'a TagValue);
    type IntoIter = indexmap::map::Iter<'a, TagName, TagValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::tags::{REDACTED_TRUE, TAG_DOC_TYPE, TAG_PROJECT_NAME, TAG_SET};

    #[test]
    fn merge_replaces_only_tba_fields() {
        let defaults = TagSet::from_entries([
            (TAG_DOC_TYPE, "TBA"),
            (TAG_PROJECT_NAME, "FixedProject"),
            (TAG_SET, "Train"),
        ]);
        let derived = TagSet::from_entries([
            (TAG_DOC_TYPE, "Invoices"),
            (TAG_PROJECT_NAME, "DerivedProject"),
        ]);

        let merged = TagSet::merge_defaults(&defaults, &derived);
        assert_eq!(merged.get(TAG_DOC_TYPE), Some("Invoices"));
        assert_eq!(merged.get(TAG_PROJECT_NAME), Some("FixedProject"));
        assert_eq!(merged.get(TAG_SET), Some("Train"));
    }

    #[test]
    fn merge_never_adds_fields_absent_from_defaults() {
        let defaults = TagSet::from_entries([(TAG_DOC_TYPE, "TBA")]);
        let derived = TagSet::from_entries([
            (TAG_DOC_TYPE, "Letters"),
            (TAG_PROJECT_NAME, "ProjectX"),
        ]);

        let merged = TagSet::merge_defaults(&defaults, &derived);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get(TAG_PROJECT_NAME), None);
    }

    #[test]
    fn merge_preserves_unknown_fields() {
        let defaults = TagSet::from_entries([("Custom Field", "kept"), (TAG_DOC_TYPE, "TBA")]);
        let derived = TagSet::from_entries([(TAG_DOC_TYPE, "Invoices")]);

        let merged = TagSet::merge_defaults(&defaults, &derived);
        assert_eq!(merged.get("Custom Field"), Some("kept"));
    }

    #[test]
    fn merge_keeps_tba_when_no_derived_value_exists() {
        let defaults = TagSet::from_entries([(TAG_DOC_TYPE, "TBA")]);
        let merged = TagSet::merge_defaults(&defaults, &TagSet::new());
        assert_eq!(merged.get(TAG_DOC_TYPE), Some("TBA"));
    }

    #[test]
    fn tag_order_is_preserved() {
        let mut tags = TagSet::new();
        tags.set("b", "2");
        tags.set("a", "1");
        tags.set(TAG_REDACTED, REDACTED_TRUE);
        let names: Vec<&str> = tags.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a", TAG_REDACTED]);
    }

    #[test]
    fn set_label_parses_canonical_values_only() {
        let mut tags = TagSet::tba_defaults();
        assert_eq!(tags.set_label(), Some(SetLabel::Train));
        tags.set(TAG_SET, SetLabel::Test.as_str());
        assert_eq!(tags.set_label(), Some(SetLabel::Test));
        tags.set(TAG_SET, "validation");
        assert_eq!(tags.set_label(), None);
    }

    #[test]
    fn tba_defaults_cover_all_recognized_fields() {
        let defaults = TagSet::tba_defaults();
        assert_eq!(defaults.len(), 6);
        assert!(defaults.is_tba(TAG_DOC_TYPE));
        assert!(defaults.is_tba(TAG_PROJECT_NAME));
        assert!(!defaults.is_tba(TAG_SET));
    }
}
