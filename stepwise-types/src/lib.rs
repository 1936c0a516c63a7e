//! Core types for the stepwise crate.
//!
//! This crate provides the foundational types for defining step-by-step surveys:
//! - `SurveyDefinition` - The ordered list of steps plus title and messages
//! - `StepDefinition` and `InputKind` - One screen of the wizard and how it is answered
//! - `FieldDescriptor` and `FieldFormat` - The named inputs on a step and their constraints
//! - `Answers` and `FieldName` - Committed values keyed by field name
//! - `SubmissionRecord` and `ResponseSink` - What gets sent at the end, and to whom

mod field_name;
pub use field_name::FieldName;

mod answers;
pub use answers::Answers;

mod field;
pub use field::{ChoiceOption, FieldDescriptor, FieldFormat};

mod step;
pub use step::{InputKind, StepDefinition};

mod survey_definition;
pub use survey_definition::SurveyDefinition;

mod record;
pub use record::{SubmissionRecord, TIMESTAMP_FIELD};

mod error;
pub use error::{DefinitionError, FieldViolation, SinkError, ValidationError};

mod traits;
pub use traits::ResponseSink;
