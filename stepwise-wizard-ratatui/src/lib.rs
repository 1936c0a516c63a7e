//! # stepwise-wizard-ratatui
//!
//! A terminal front end for `stepwise` built on ratatui and crossterm.
//!
//! Shows one step at a time with a progress bar, inline field messages and a
//! popup for blocking notices. Radio steps advance on their own shortly after
//! a choice is made.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stepwise::{SurveyController, TestSink};
//! use stepwise_wizard_ratatui::RatatuiWizard;
//!
//! let controller = SurveyController::new(Arc::new(survey), TestSink::new());
//! let wizard = RatatuiWizard::new().run_blocking(controller)?;
//! ```
//!
//! ## Keys
//!
//! - `↑`/`↓` highlight an option, `Space` selects or toggles it
//! - `Tab`/`Shift-Tab` move between fields
//! - `Enter` moves on, or submits on the last step
//! - `Backspace` on an empty field goes back
//! - `Esc` cancels

mod backend;
mod view;

pub use backend::{RatatuiError, RatatuiWizard, Theme};
pub use view::{Action, ViewState};
