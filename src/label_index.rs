//! Aggregation of labels per annotated string.

use std::collections::{BTreeMap, BTreeSet};

use crate::document::Annotation;

/// Distinct labels observed for every annotated string in a corpus.
///
/// Keys are trimmed annotation values and iterate in sorted order. A key
/// is only created together with its first label, so label sets are
/// never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelIndex {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl LabelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from annotations in any order.
    pub fn from_annotations<'a>(annotations: impl IntoIterator<Item = &'a Annotation>) -> Self {
        let mut index = Self::new();
        for annotation in annotations {
            index.insert(&annotation.value, &annotation.label);
        }
        index
    }

    /// Record `label` for `value`.
    ///
    /// Returns `false` when the trimmed value is empty and nothing was
    /// recorded.
    pub fn insert(&mut self, value: &str, label: &str) -> bool {
        let key = value.trim();
        if key.is_empty() {
            return false;
        }
        self.entries
            .entry(key.to_string())
            .or_default()
            .insert(label.to_string());
        true
    }

    /// Tokens in sorted order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn labels(&self, token: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(token)
    }

    /// Tokens paired with their labels, in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether `token` carries more than one distinct label.
    pub fn is_ambiguous(&self, token: &str) -> bool {
        self.labels(token).map_or(false, |labels| labels.len() > 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
