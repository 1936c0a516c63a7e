use std::fmt;

use crate::FieldName;

/// A single field that failed its constraint, with the inline message to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: FieldName,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<FieldName>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Why the active step cannot be committed.
///
/// Recovered locally by blocking advancement; never propagated past the wizard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more fields are missing or malformed; shown inline next to each field.
    #[error("{} field(s) need attention", .0.len())]
    Fields(Vec<FieldViolation>),

    /// The step as a whole is unanswered; shown as a blocking notification.
    #[error("{0}")]
    Blocking(String),
}

impl ValidationError {
    /// The inline message for a field, if this error carries one.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        match self {
            Self::Fields(violations) => violations
                .iter()
                .find(|v| v.field.as_str() == field)
                .map(|v| v.message.as_str()),
            Self::Blocking(_) => None,
        }
    }

    /// Check if this error must be shown as a blocking notification.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Blocking(_))
    }
}

/// A response sink failed to accept a submission.
///
/// Only transport-level failures exist: the sink contract does not expose
/// whether the remote side accepted the content.
#[derive(Debug, thiserror::Error)]
#[error("Submission transport error: {0}")]
pub struct SinkError(#[from] anyhow::Error);

impl SinkError {
    /// Create a sink error from any error type.
    pub fn transport(err: impl Into<anyhow::Error>) -> Self {
        Self(err.into())
    }
}

/// A survey definition is malformed.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("Survey has no steps")]
    Empty,

    #[error("Step numbered {found} found where step {expected} was expected")]
    StepOutOfOrder { expected: usize, found: usize },

    #[error("Step {0} has no fields")]
    EmptyStep(usize),

    #[error("Step {0} is a choice group step and must hold exactly one field")]
    GroupStep(usize),

    #[error("Choice field '{0}' has no options")]
    MissingOptions(FieldName),

    #[error("Field name '{0}' is used more than once")]
    DuplicateField(FieldName),
}
