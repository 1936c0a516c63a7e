use crate::FieldName;

/// A single named input on a step.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// The field's stable name, used as the key in `Answers`.
    name: FieldName,

    /// The label shown next to the input.
    label: String,

    /// Whether an empty value blocks advancement.
    required: bool,

    /// The format constraint the value must satisfy.
    format: FieldFormat,
}

impl FieldDescriptor {
    /// Create a new required field.
    pub fn new(name: impl Into<FieldName>, label: impl Into<String>, format: FieldFormat) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required: true,
            format,
        }
    }

    /// Create a required single-line text field.
    pub fn text(name: impl Into<FieldName>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldFormat::Text)
    }

    /// Create a required email field.
    pub fn email(name: impl Into<FieldName>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldFormat::Email)
    }

    /// Create a required telephone field.
    pub fn telephone(name: impl Into<FieldName>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldFormat::Telephone)
    }

    /// Create a required UK postcode field.
    pub fn postcode(name: impl Into<FieldName>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldFormat::Postcode)
    }

    /// Create a required choice field (dropdown, radio group or checkbox group,
    /// depending on the step it belongs to).
    pub fn choice(
        name: impl Into<FieldName>,
        label: impl Into<String>,
        options: Vec<ChoiceOption>,
    ) -> Self {
        Self::new(name, label, FieldFormat::Choice { options })
    }

    /// Mark the field as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Get the field name.
    pub fn name(&self) -> &FieldName {
        &self.name
    }

    /// Get the label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the field must be filled in.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Get the format constraint.
    pub fn format(&self) -> &FieldFormat {
        &self.format
    }

    /// Get the options if this is a choice field.
    pub fn options(&self) -> &[ChoiceOption] {
        match &self.format {
            FieldFormat::Choice { options } => options,
            _ => &[],
        }
    }

    /// Check whether `value` is one of this field's option values.
    pub fn has_option(&self, value: &str) -> bool {
        self.options().iter().any(|o| o.value == value)
    }
}

/// The format constraint of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFormat {
    /// Free text; only the required check applies.
    Text,

    /// Syntactically valid email address.
    Email,

    /// Telephone number. Free text, like a browser `tel` input.
    Telephone,

    /// UK postcode. Upper-cased as it is typed and matched against the postcode pattern.
    Postcode,

    /// One of a fixed set of options.
    Choice { options: Vec<ChoiceOption> },
}

impl FieldFormat {
    /// Check if this is a choice format.
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Choice { .. })
    }
}

/// An option in a choice field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// The value committed to `Answers` when this option is selected.
    pub value: String,

    /// The text shown to the user.
    pub label: String,
}

impl ChoiceOption {
    /// Create an option with distinct value and label.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Create an option whose label is its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

impl From<&str> for ChoiceOption {
    fn from(s: &str) -> Self {
        Self::plain(s)
    }
}
