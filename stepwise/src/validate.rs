//! Field and step validation rules.
//!
//! Everything here is pure: rules read a step definition and the live inputs
//! and report what is wrong. Nothing is committed or recorded.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    FieldDescriptor, FieldFormat, FieldViolation, FormInputs, InputKind, StepDefinition,
    ValidationError,
};

pub const REQUIRED_MESSAGE: &str = "Please fill out this field.";
pub const SELECT_MESSAGE: &str = "Please select an option.";
pub const SELECT_ANY_MESSAGE: &str = "Please select at least one option.";
pub const RADIO_MESSAGE: &str = "Please select an option before continuing.";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const POSTCODE_MESSAGE: &str = "Please enter a valid UK postcode (e.g., SW1A 1AA)";

static POSTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{1,2}[0-9]{1,2}[A-Z]?)\s?([0-9][A-Z]{2})$").expect("postcode pattern is valid")
});

// The address grammar browsers apply to `type=email` inputs.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

/// Check a postcode that has already been upper-cased.
pub fn is_valid_postcode(value: &str) -> bool {
    POSTCODE.is_match(value.trim())
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

/// Apply the input normalization of a field format to a raw value as typed.
///
/// Postcodes are upper-cased on every keystroke, valid or not.
pub fn normalize(format: &FieldFormat, raw: &str) -> String {
    match format {
        FieldFormat::Postcode => raw.to_uppercase(),
        _ => raw.to_string(),
    }
}

/// Check only the format of a value; blank values pass.
///
/// Used when a field loses focus, where an empty field is not yet an error.
pub fn check_format(field: &FieldDescriptor, value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    match field.format() {
        FieldFormat::Text | FieldFormat::Telephone => Ok(()),
        FieldFormat::Email if !is_valid_email(value) => Err(EMAIL_MESSAGE.into()),
        FieldFormat::Email => Ok(()),
        FieldFormat::Postcode if !is_valid_postcode(value) => Err(POSTCODE_MESSAGE.into()),
        FieldFormat::Postcode => Ok(()),
        FieldFormat::Choice { .. } if !field.has_option(value) => Err(SELECT_MESSAGE.into()),
        FieldFormat::Choice { .. } => Ok(()),
    }
}

/// Check a value against the field's required flag and format.
pub fn check_field(field: &FieldDescriptor, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return match (field.is_required(), field.format()) {
            (false, _) => Ok(()),
            (true, FieldFormat::Choice { .. }) => Err(SELECT_MESSAGE.into()),
            (true, _) => Err(REQUIRED_MESSAGE.into()),
        };
    }
    check_format(field, value)
}

/// Validate a step against the live inputs.
///
/// Dropdown, checkbox and freeform steps report inline violations for every
/// failing field. A radio step without a choice fails as a whole with a
/// blocking message.
pub fn validate_step(step: &StepDefinition, inputs: &FormInputs) -> Result<(), ValidationError> {
    match step.kind() {
        InputKind::SingleChoiceRadio => validate_radio(step, inputs),
        InputKind::MultiSelect => validate_checkboxes(step, inputs),
        InputKind::SingleSelect | InputKind::FreeformFields => {
            let violations: Vec<_> = step
                .fields()
                .iter()
                .filter_map(|field| {
                    check_field(field, inputs.value(field.name().as_str()))
                        .err()
                        .map(|message| FieldViolation::new(field.name(), message))
                })
                .collect();
            if violations.is_empty() {
                Ok(())
            } else {
                Err(ValidationError::Fields(violations))
            }
        }
    }
}

fn validate_radio(step: &StepDefinition, inputs: &FormInputs) -> Result<(), ValidationError> {
    let chosen = step
        .fields()
        .iter()
        .all(|group| group.has_option(inputs.value(group.name().as_str())));
    if chosen {
        Ok(())
    } else {
        Err(ValidationError::Blocking(RADIO_MESSAGE.into()))
    }
}

fn validate_checkboxes(step: &StepDefinition, inputs: &FormInputs) -> Result<(), ValidationError> {
    let violations: Vec<_> = step
        .fields()
        .iter()
        .filter_map(|group| {
            let checked = inputs.checked(group.name().as_str());
            if checked.is_empty() && group.is_required() {
                Some(FieldViolation::new(group.name(), SELECT_ANY_MESSAGE))
            } else if checked.iter().any(|c| !group.has_option(c)) {
                Some(FieldViolation::new(group.name(), SELECT_MESSAGE))
            } else {
                None
            }
        })
        .collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Fields(violations))
    }
}
