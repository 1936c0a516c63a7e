use std::collections::BTreeMap;

use crate::FieldName;

/// Committed answers from a survey.
///
/// Values are copied here from the live form inputs when a step is committed.
/// Keys are never removed: committing a field that is already present overwrites
/// its value. Ordered by field name so submitted records are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    values: BTreeMap<FieldName, String>,
}

impl Answers {
    /// Create a new empty answers collection.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Insert an answer, returning the value it replaced (if any).
    pub fn insert(&mut self, name: impl Into<FieldName>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    /// Get the answer for a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Check if an answer exists for a field.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Get an iterator over all name-value pairs, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &str)> {
        self.values.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn into_map(self) -> BTreeMap<FieldName, String> {
        self.values
    }
}

impl IntoIterator for Answers {
    type Item = (FieldName, String);
    type IntoIter = std::collections::btree_map::IntoIter<FieldName, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Answers {
    type Item = (&'a FieldName, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, FieldName, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
