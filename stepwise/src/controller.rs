//! Drives a `Wizard` from input events and owns its auto-advance timer.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    Advance, AutoAdvanceTicket, AutoAdvanceTimer, FieldName, InputError, NavigationError,
    ResponseSink, SubmitError, SurveyDefinition, Wizard, WizardConfig,
};

/// A user interaction, as reported by a rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// A text field changed.
    Input { field: FieldName, value: String },
    /// A dropdown or radio option was chosen.
    Select { field: FieldName, option: String },
    /// A checkbox was flipped.
    Toggle { field: FieldName, option: String },
    /// A field lost focus.
    Blur(FieldName),
    Next,
    Back,
    Submit,
    /// The blocking notification was acknowledged.
    DismissNotice,
}

impl WizardEvent {
    pub fn input(field: impl Into<FieldName>, value: impl Into<String>) -> Self {
        Self::Input {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn select(field: impl Into<FieldName>, option: impl Into<String>) -> Self {
        Self::Select {
            field: field.into(),
            option: option.into(),
        }
    }

    pub fn toggle(field: impl Into<FieldName>, option: impl Into<String>) -> Self {
        Self::Toggle {
            field: field.into(),
            option: option.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// A wizard wired to a response sink and a real auto-advance timer.
pub struct SurveyController<S> {
    wizard: Wizard,
    sink: S,
    timer: AutoAdvanceTimer,
}

impl<S: ResponseSink> SurveyController<S> {
    pub fn new(definition: Arc<SurveyDefinition>, sink: S) -> Self {
        Self::with_config(definition, WizardConfig::default(), sink)
    }

    pub fn with_config(definition: Arc<SurveyDefinition>, config: WizardConfig, sink: S) -> Self {
        let timer = AutoAdvanceTimer::new(config.auto_advance_delay());
        Self {
            wizard: Wizard::with_config(definition, config),
            sink,
            timer,
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_wizard(self) -> Wizard {
        self.wizard
    }

    /// Apply one event to the wizard.
    ///
    /// Validation failures are returned but also stay visible on the wizard as
    /// inline messages or a notice, so surfaces may ignore them. `Submit`
    /// waits for the sink.
    pub async fn dispatch(&mut self, event: WizardEvent) -> Result<(), ControllerError> {
        tracing::trace!(?event, "dispatch");
        let outcome = match event {
            WizardEvent::Input { field, value } => self
                .wizard
                .set_input(field.as_str(), &value)
                .map_err(ControllerError::from),
            WizardEvent::Select { field, option } => self
                .wizard
                .select(field.as_str(), &option)
                .map(|_| ())
                .map_err(ControllerError::from),
            WizardEvent::Toggle { field, option } => self
                .wizard
                .toggle(field.as_str(), &option)
                .map_err(ControllerError::from),
            WizardEvent::Blur(field) => {
                self.wizard.blur(field.as_str());
                Ok(())
            }
            WizardEvent::Next => self.wizard.advance().map(|_| ()).map_err(ControllerError::from),
            WizardEvent::Back => {
                self.wizard.retreat();
                Ok(())
            }
            WizardEvent::Submit => {
                // The timer cannot fire while the sink is awaited.
                self.timer.cancel();
                self.wizard
                    .submit(&self.sink)
                    .await
                    .map_err(ControllerError::from)
            }
            WizardEvent::DismissNotice => {
                self.wizard.dismiss_notice();
                Ok(())
            }
        };
        self.sync_timer();
        outcome
    }

    /// Wait until the pending auto-advance is due.
    ///
    /// Never resolves while nothing is scheduled. Cancel-safe, for use in
    /// `tokio::select!`.
    pub async fn next_auto_advance(&mut self) -> AutoAdvanceTicket {
        self.timer.fired().await
    }

    /// Apply a fired auto-advance. Stale tickets are ignored.
    pub fn auto_advance(
        &mut self,
        ticket: AutoAdvanceTicket,
    ) -> Option<Result<Advance, NavigationError>> {
        let outcome = self.wizard.fire_auto_advance(ticket);
        self.sync_timer();
        outcome
    }

    /// Process events until the channel closes or the survey is submitted.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<WizardEvent>) -> Wizard {
        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    if let Err(err) = self.dispatch(event).await {
                        tracing::debug!(error = %err, "event rejected");
                    }
                }
                ticket = self.timer.fired() => {
                    if let Some(Err(err)) = self.auto_advance(ticket) {
                        tracing::debug!(error = %err, "auto-advance rejected");
                    }
                }
            }
            if self.wizard.is_locked() {
                break;
            }
        }
        self.wizard
    }

    fn sync_timer(&mut self) {
        match self.wizard.pending_auto_advance() {
            Some(ticket) if self.timer.pending() != Some(ticket) => self.timer.arm(ticket),
            Some(_) => {}
            None => {
                self.timer.cancel();
            }
        }
    }
}
