use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Answers, FieldName};

/// The key under which the submission timestamp is sent.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// The flat record handed to a `ResponseSink` at the end of the wizard.
///
/// Serializes as a single JSON object of strings: every committed answer plus
/// `timestamp`. Built once per submission attempt and owned by that attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    #[serde(flatten)]
    fields: BTreeMap<FieldName, String>,

    timestamp: String,
}

impl SubmissionRecord {
    /// Build a record from a snapshot of the answers and a formatted timestamp.
    ///
    /// An answer named `timestamp` would collide with the stamp; the stamp wins.
    pub fn new(answers: Answers, timestamp: impl Into<String>) -> Self {
        let mut fields = answers.into_map();
        fields.remove(TIMESTAMP_FIELD);
        Self {
            fields,
            timestamp: timestamp.into(),
        }
    }

    /// Get a field value.
    pub fn get(&self, name: &str) -> Option<&str> {
        if name == TIMESTAMP_FIELD {
            return Some(&self.timestamp);
        }
        self.fields.get(name).map(String::as_str)
    }

    /// Get the timestamp.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Iterate over the answer fields (excluding the timestamp).
    pub fn fields(&self) -> impl Iterator<Item = (&FieldName, &str)> {
        self.fields.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Number of keys in the serialized record, timestamp included.
    pub fn len(&self) -> usize {
        self.fields.len() + 1
    }

    /// Always false; a record carries at least its timestamp.
    pub fn is_empty(&self) -> bool {
        false
    }
}
