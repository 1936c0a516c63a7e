use std::collections::HashSet;

use crate::{DefinitionError, FieldDescriptor, InputKind, StepDefinition};

/// The top-level structure containing all steps and metadata for a survey.
///
/// Presentation-agnostic: the same definition drives the wizard state machine
/// and whatever surface renders it.
#[derive(Debug, Clone)]
pub struct SurveyDefinition {
    /// Title shown in the survey header.
    pub title: String,

    /// Optional message shown before the first step.
    pub prelude: Option<String>,

    /// The steps, numbered 1..=N in order.
    steps: Vec<StepDefinition>,

    /// Optional confirmation message shown after a successful submission.
    pub epilogue: Option<String>,
}

impl SurveyDefinition {
    /// Create a new survey definition, checking that its steps are well formed.
    ///
    /// Steps must be numbered consecutively from 1, every step needs at least one
    /// field, radio and checkbox steps hold exactly one choice group, choice
    /// fields need options, and field names are unique across the survey.
    pub fn new(
        title: impl Into<String>,
        steps: Vec<StepDefinition>,
    ) -> Result<Self, DefinitionError> {
        if steps.is_empty() {
            return Err(DefinitionError::Empty);
        }

        let mut seen = HashSet::new();
        for (index, step) in steps.iter().enumerate() {
            if step.number() != index + 1 {
                return Err(DefinitionError::StepOutOfOrder {
                    expected: index + 1,
                    found: step.number(),
                });
            }
            if step.fields().is_empty() {
                return Err(DefinitionError::EmptyStep(step.number()));
            }
            if matches!(
                step.kind(),
                InputKind::SingleChoiceRadio | InputKind::MultiSelect
            ) && step.fields().len() != 1
            {
                return Err(DefinitionError::GroupStep(step.number()));
            }
            for field in step.fields() {
                if step.kind().is_choice() && !has_options(field) {
                    return Err(DefinitionError::MissingOptions(field.name().clone()));
                }
                if !seen.insert(field.name().clone()) {
                    return Err(DefinitionError::DuplicateField(field.name().clone()));
                }
            }
        }

        Ok(Self {
            title: title.into(),
            prelude: None,
            steps,
            epilogue: None,
        })
    }

    /// Set the prelude message.
    pub fn with_prelude(mut self, prelude: impl Into<String>) -> Self {
        self.prelude = Some(prelude.into());
        self
    }

    /// Set the epilogue (confirmation) message.
    pub fn with_epilogue(mut self, epilogue: impl Into<String>) -> Self {
        self.epilogue = Some(epilogue.into());
        self
    }

    /// Get the steps.
    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// Get a step by its 1-based number.
    pub fn step(&self, number: usize) -> Option<&StepDefinition> {
        number.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    /// Get the number of steps. Never zero.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; a definition cannot be built without steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Find a field anywhere in the survey, with the number of the step that owns it.
    pub fn field(&self, name: &str) -> Option<(usize, &FieldDescriptor)> {
        self.steps
            .iter()
            .find_map(|step| step.field(name).map(|f| (step.number(), f)))
    }
}

fn has_options(field: &FieldDescriptor) -> bool {
    field.format().is_choice() && !field.options().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChoiceOption;

    fn solar() -> FieldDescriptor {
        FieldDescriptor::choice(
            "hasSolar",
            "Have you got solar?",
            vec![ChoiceOption::plain("Yes"), ChoiceOption::plain("No")],
        )
    }

    #[test]
    fn rejects_empty_survey() {
        assert!(matches!(
            SurveyDefinition::new("Empty", vec![]),
            Err(DefinitionError::Empty)
        ));
    }

    #[test]
    fn rejects_misnumbered_steps() {
        let steps = vec![StepDefinition::radio(2, "Solar?", solar())];
        assert!(matches!(
            SurveyDefinition::new("Survey", steps),
            Err(DefinitionError::StepOutOfOrder {
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn rejects_choice_step_without_options() {
        let steps = vec![StepDefinition::dropdown(
            1,
            "Brand?",
            FieldDescriptor::text("batteryBrand", "Brand"),
        )];
        assert!(matches!(
            SurveyDefinition::new("Survey", steps),
            Err(DefinitionError::MissingOptions(_))
        ));
    }

    #[test]
    fn rejects_duplicate_field_names() {
        let steps = vec![
            StepDefinition::radio(1, "Solar?", solar()),
            StepDefinition::radio(2, "Solar again?", solar()),
        ];
        assert!(matches!(
            SurveyDefinition::new("Survey", steps),
            Err(DefinitionError::DuplicateField(_))
        ));
    }

    #[test]
    fn step_lookup_is_one_based() {
        let survey = SurveyDefinition::new(
            "Survey",
            vec![
                StepDefinition::radio(1, "Solar?", solar()),
                StepDefinition::freeform(
                    2,
                    "Contact",
                    vec![FieldDescriptor::text("name", "Name")],
                ),
            ],
        )
        .unwrap();

        assert!(survey.step(0).is_none());
        assert_eq!(survey.step(1).unwrap().kind(), InputKind::SingleChoiceRadio);
        assert_eq!(survey.step(2).unwrap().kind(), InputKind::FreeformFields);
        assert!(survey.step(3).is_none());
        assert_eq!(survey.field("name").map(|(n, _)| n), Some(2));
    }
}
