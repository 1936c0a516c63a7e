//! # stepwise
//!
//! A step-by-step survey wizard. Presentation-agnostic.
//!
//! The crate owns the navigation and validation state machine of a multi-step
//! survey: which step is active, which answers have been committed, and where
//! the final submission stands. Rendering is left to a separate surface that
//! reads the wizard's accessors and feeds it input events.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stepwise::{SurveyController, TestSink, WizardEvent};
//!
//! let mut controller = SurveyController::new(Arc::new(survey), TestSink::new());
//!
//! controller.dispatch(WizardEvent::select("batteryBrand", "GivEnergy")).await?;
//! controller.dispatch(WizardEvent::Next).await?;
//! assert_eq!(controller.wizard().current_step(), 2);
//! ```
//!
//! ## Steps
//!
//! - `SingleSelect` - dropdowns; each must have a value
//! - `MultiSelect` - a checkbox group
//! - `SingleChoiceRadio` - an exclusive choice that advances on its own after a short delay
//! - `FreeformFields` - contact details with email and UK postcode checks
//!
//! ## Sinks
//!
//! The final record goes to a `ResponseSink`. `TestSink` keeps records in memory;
//! `stepwise-sink-http` posts them to a remote endpoint.

// Re-export all types from stepwise-types
pub use stepwise_types::*;

mod inputs;
pub use inputs::FormInputs;

pub mod validate;

mod auto_advance;
pub use auto_advance::{AutoAdvanceTicket, AutoAdvanceTimer};

mod config;
pub use config::{ConfigError, WizardConfig};

mod wizard;
pub use wizard::{
    Advance, Controls, InputError, NavigationError, Progress, SubmissionStatus, SubmitError, Wizard,
};

mod controller;
pub use controller::{ControllerError, SurveyController, WizardEvent};

// Test sink for running surveys without a network
mod test_sink;
pub use test_sink::{TestSink, TestSinkError};
