use crate::{FieldDescriptor, FieldName};

/// How a step is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// One or more dropdowns; each needs a selected value.
    SingleSelect,

    /// A checkbox group; the checked options are committed together.
    MultiSelect,

    /// An exclusive-choice radio group. Choosing an option auto-advances.
    SingleChoiceRadio,

    /// Free-text fields with per-field format constraints (contact details).
    FreeformFields,
}

impl InputKind {
    /// Whether fields on this step choose from fixed options.
    pub fn is_choice(self) -> bool {
        !matches!(self, Self::FreeformFields)
    }
}

/// One screen of the wizard.
///
/// Steps are defined once at startup and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDefinition {
    /// 1-based position of the step.
    number: usize,

    /// The question shown at the top of the step.
    ask: String,

    /// How the step is answered.
    kind: InputKind,

    /// The fields on this step, in display order.
    fields: Vec<FieldDescriptor>,
}

impl StepDefinition {
    /// Create a new step.
    pub fn new(
        number: usize,
        ask: impl Into<String>,
        kind: InputKind,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        Self {
            number,
            ask: ask.into(),
            kind,
            fields,
        }
    }

    /// A step with a single dropdown.
    pub fn dropdown(number: usize, ask: impl Into<String>, field: FieldDescriptor) -> Self {
        Self::new(number, ask, InputKind::SingleSelect, vec![field])
    }

    /// A step with a single radio group.
    pub fn radio(number: usize, ask: impl Into<String>, group: FieldDescriptor) -> Self {
        Self::new(number, ask, InputKind::SingleChoiceRadio, vec![group])
    }

    /// A step with a single checkbox group.
    pub fn checkboxes(number: usize, ask: impl Into<String>, group: FieldDescriptor) -> Self {
        Self::new(number, ask, InputKind::MultiSelect, vec![group])
    }

    /// A step with free-text fields.
    pub fn freeform(number: usize, ask: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self::new(number, ask, InputKind::FreeformFields, fields)
    }

    /// Get the 1-based step number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Get the question text.
    pub fn ask(&self) -> &str {
        &self.ask
    }

    /// Get the input kind.
    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// Get the fields.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Find a field on this step by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name().as_str() == name)
    }

    /// Iterate over the field names on this step.
    pub fn field_names(&self) -> impl Iterator<Item = &FieldName> {
        self.fields.iter().map(FieldDescriptor::name)
    }
}
