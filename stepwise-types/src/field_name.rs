use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// The stable `name` of a form field, e.g. `"postcode"`.
///
/// Used as the key in `Answers` and in the submitted record. Names are flat;
/// the sink receives them verbatim as JSON object keys.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName {
    name: String,
}

impl FieldName {
    /// Create a new field name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Check if the name is empty.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Borrow<str> for FieldName {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl From<&str> for FieldName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FieldName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&String> for FieldName {
    fn from(s: &String) -> Self {
        Self::new(s.clone())
    }
}

impl From<&FieldName> for FieldName {
    fn from(name: &FieldName) -> Self {
        name.clone()
    }
}
