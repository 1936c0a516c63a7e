use std::collections::BTreeMap;

use crate::FieldName;

/// The live, uncommitted values of every form field.
///
/// This is what the rendering surface edits. Values survive navigation so a
/// user going back sees what they entered; they only reach `Answers` when the
/// owning step is committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    values: BTreeMap<FieldName, String>,
    checked: BTreeMap<FieldName, Vec<String>>,
}

impl FormInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current value of a field; empty if it was never touched.
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map_or("", String::as_str)
    }

    /// The checked options of a checkbox group, in option order.
    pub fn checked(&self, name: &str) -> &[String] {
        self.checked.get(name).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn set(&mut self, name: &FieldName, value: String) {
        self.values.insert(name.clone(), value);
    }

    pub(crate) fn set_checked(&mut self, name: &FieldName, options: Vec<String>) {
        self.values.insert(name.clone(), options.join(", "));
        self.checked.insert(name.clone(), options);
    }
}
