//! The survey wizard state machine.
//!
//! States are `Step 1 ..= Step N`, then `Submitting`, `Succeeded` or `Failed`.
//! Moving forward validates and commits the active step; moving back is always
//! allowed. Submitting from the last step hands a record to a `ResponseSink`.
//! A successful submission locks the wizard for good.

use std::{collections::BTreeMap, fmt, sync::Arc};

use chrono::{Local, NaiveDateTime};

use crate::{
    Answers, AutoAdvanceTicket, FieldDescriptor, FieldName, FormInputs, InputKind, ResponseSink, SinkError,
    StepDefinition, SubmissionRecord, SurveyDefinition, ValidationError, WizardConfig, validate,
};

/// Where the final submission stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    /// Nothing has been sent yet.
    #[default]
    Idle,
    /// A record is with the sink; the submit control is disabled.
    Submitting,
    /// The sink accepted the record. Terminal.
    Succeeded,
    /// The sink could not be reached. The user may submit again.
    Failed,
}

/// Position indicator for the active step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub step: usize,
    pub total: usize,
}

impl Progress {
    /// Position as a percentage in `0.0..=100.0`.
    pub fn percent(&self) -> f64 {
        self.step as f64 / self.total as f64 * 100.0
    }

    /// Position as a ratio in `0.0..=1.0`, for gauges.
    pub fn ratio(&self) -> f64 {
        self.step as f64 / self.total as f64
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}", self.step, self.total)
    }
}

/// Result of a successful `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The step was committed and the wizard moved on.
    Moved(Progress),
    /// The last step was committed; only `submit` goes further.
    AtLastStep,
}

/// Which controls the surface should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub back: bool,
    pub next: bool,
    pub submit: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("The form has been submitted and no longer accepts input")]
    Locked,

    #[error("Unknown field: {0}")]
    UnknownField(FieldName),

    #[error("Field '{0}' is not a choice field")]
    NotAChoice(FieldName),

    #[error("Field '{0}' is a choice field and takes no typed input")]
    NotText(FieldName),

    #[error("'{option}' is not an option of field '{field}'")]
    UnknownOption { field: FieldName, option: String },
}

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("The form has been submitted")]
    Locked,

    #[error("A submission is in flight")]
    Busy,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("The form has already been submitted")]
    Locked,

    #[error("A submission is already in flight")]
    InFlight,

    #[error("Submit is only available on the last step (on step {current} of {total})")]
    NotOnFinalStep { current: usize, total: usize },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: SinkError,
    },
}

/// A survey in progress.
///
/// Owns the active step, the live form inputs, the committed answers and the
/// submission status. The definition is shared and never changes.
#[derive(Debug, Clone)]
pub struct Wizard {
    definition: Arc<SurveyDefinition>,
    config: WizardConfig,
    current_step: usize,
    inputs: FormInputs,
    answers: Answers,
    status: SubmissionStatus,
    /// Inline messages, keyed by field.
    inline: BTreeMap<FieldName, String>,
    /// A blocking notification awaiting acknowledgement.
    notice: Option<String>,
    auto_advance: Option<AutoAdvanceTicket>,
    generation: u64,
}

impl Wizard {
    /// Start a wizard on step 1 with default settings.
    pub fn new(definition: Arc<SurveyDefinition>) -> Self {
        Self::with_config(definition, WizardConfig::default())
    }

    /// Start a wizard on step 1.
    pub fn with_config(definition: Arc<SurveyDefinition>, config: WizardConfig) -> Self {
        tracing::debug!(
            survey = %definition.title,
            steps = definition.len(),
            "wizard started"
        );
        Self {
            definition,
            config,
            current_step: 1,
            inputs: FormInputs::new(),
            answers: Answers::new(),
            status: SubmissionStatus::Idle,
            inline: BTreeMap::new(),
            notice: None,
            auto_advance: None,
            generation: 0,
        }
    }

    // === Accessors ===

    pub fn definition(&self) -> &SurveyDefinition {
        &self.definition
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// The active step number, always in `1..=total_steps()`.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.definition.len()
    }

    /// The active step's definition.
    pub fn step(&self) -> &StepDefinition {
        &self.definition.steps()[self.current_step - 1]
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == self.total_steps()
    }

    pub fn inputs(&self) -> &FormInputs {
        &self.inputs
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Whether a successful submission has locked the form.
    pub fn is_locked(&self) -> bool {
        self.status == SubmissionStatus::Succeeded
    }

    pub fn progress(&self) -> Progress {
        Progress {
            step: self.current_step,
            total: self.total_steps(),
        }
    }

    pub fn controls(&self) -> Controls {
        if self.is_locked() {
            return Controls {
                back: false,
                next: false,
                submit: false,
                submit_enabled: false,
                submit_label: "Submit",
            };
        }
        let submitting = self.status == SubmissionStatus::Submitting;
        Controls {
            back: self.current_step > 1,
            next: !self.is_last_step(),
            submit: self.is_last_step(),
            submit_enabled: !submitting,
            submit_label: if submitting { "Submitting..." } else { "Submit" },
        }
    }

    /// The inline message currently shown for a field.
    pub fn inline_message(&self, field: &str) -> Option<&str> {
        self.inline.get(field).map(String::as_str)
    }

    /// The blocking notification awaiting acknowledgement.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// The auto-advance waiting to fire, if any.
    pub fn pending_auto_advance(&self) -> Option<AutoAdvanceTicket> {
        self.auto_advance
    }

    // === Input events ===

    /// Set a field's value as typed, applying the field's input normalization.
    pub fn set_input(&mut self, field: &str, value: &str) -> Result<(), InputError> {
        let (_, descriptor) = self.editable_field(field)?;
        if descriptor.format().is_choice() {
            return Err(InputError::NotText(descriptor.name().clone()));
        }
        let name = descriptor.name().clone();
        let normalized = validate::normalize(descriptor.format(), value);
        self.inputs.set(&name, normalized);
        self.inline.remove(field);
        Ok(())
    }

    /// Choose an option of a dropdown or radio group. An empty option clears the choice.
    ///
    /// Choosing on the active radio step schedules an auto-advance; the returned
    /// ticket replaces any earlier one. Clearing it there drops the pending one.
    pub fn select(
        &mut self,
        field: &str,
        option: &str,
    ) -> Result<Option<AutoAdvanceTicket>, InputError> {
        let (step_number, descriptor) = self.choice_field(field)?;
        if !option.is_empty() && !descriptor.has_option(option) {
            return Err(InputError::UnknownOption {
                field: descriptor.name().clone(),
                option: option.to_string(),
            });
        }
        let name = descriptor.name().clone();
        self.inputs.set(&name, option.to_string());
        self.inline.remove(field);

        let on_active_radio = step_number == self.current_step
            && self.step().kind() == InputKind::SingleChoiceRadio;
        if on_active_radio && !option.is_empty() {
            self.generation += 1;
            let ticket = AutoAdvanceTicket::new(self.current_step, self.generation);
            self.auto_advance = Some(ticket);
            tracing::debug!(step = self.current_step, %name, option, "auto-advance scheduled");
            Ok(Some(ticket))
        } else {
            if on_active_radio {
                self.cancel_auto_advance();
            }
            Ok(None)
        }
    }

    /// Check or uncheck an option of a checkbox group.
    pub fn toggle(&mut self, field: &str, option: &str) -> Result<(), InputError> {
        let (_, descriptor) = self.choice_field(field)?;
        if !descriptor.has_option(option) {
            return Err(InputError::UnknownOption {
                field: descriptor.name().clone(),
                option: option.to_string(),
            });
        }
        let currently = self.inputs.checked(field);
        let was_checked = currently.iter().any(|c| c == option);
        let checked: Vec<String> = descriptor
            .options()
            .iter()
            .filter(|o| {
                if o.value == option {
                    !was_checked
                } else {
                    currently.contains(&o.value)
                }
            })
            .map(|o| o.value.clone())
            .collect();
        let name = descriptor.name().clone();
        self.inputs.set_checked(&name, checked);
        self.inline.remove(field);
        Ok(())
    }

    /// Check a single field when it loses focus.
    ///
    /// Only the format is checked; a blank field is not flagged until the step
    /// is validated. Returns the inline message now shown, if any.
    pub fn blur(&mut self, field: &str) -> Option<&str> {
        let (_, descriptor) = self.definition.field(field)?;
        match validate::check_format(descriptor, self.inputs.value(field)) {
            Ok(()) => {
                self.inline.remove(field);
                None
            }
            Err(message) => {
                tracing::debug!(field, %message, "field rejected on blur");
                self.inline.insert(descriptor.name().clone(), message);
                self.inline_message(field)
            }
        }
    }

    // === Transitions ===

    /// Validate a step against the live inputs. Never changes any state.
    pub fn validate_step(&self, number: usize) -> Result<(), ValidationError> {
        match self.definition.step(number) {
            Some(step) => validate::validate_step(step, &self.inputs),
            None => Ok(()),
        }
    }

    /// Copy a step's live values into the answers, overwriting earlier values.
    ///
    /// Choice steps only commit made choices; freeform steps commit every field
    /// trimmed, blank optional ones included. Callers validate first.
    pub fn commit_step(&mut self, number: usize) {
        let Some(step) = self.definition.step(number) else {
            return;
        };
        for field in step.fields() {
            let value = self.inputs.value(field.name().as_str());
            if step.kind().is_choice() && value.is_empty() {
                continue;
            }
            let value = if step.kind().is_choice() { value } else { value.trim() };
            self.answers.insert(field.name(), value);
        }
        tracing::debug!(step = number, answers = self.answers.len(), "step committed");
    }

    /// Validate and commit the active step, then move to the next one.
    ///
    /// On the last step the commit happens but the position stays put. On
    /// failure nothing moves and nothing is committed; the failure is kept for
    /// the surface as inline messages or a blocking notice.
    pub fn advance(&mut self) -> Result<Advance, NavigationError> {
        self.ensure_navigable()?;
        self.cancel_auto_advance();
        self.validate_and_commit()?;

        if self.is_last_step() {
            return Ok(Advance::AtLastStep);
        }
        self.current_step += 1;
        let progress = self.progress();
        tracing::debug!(
            step = progress.step,
            total = progress.total,
            percent = progress.percent(),
            "advanced"
        );
        Ok(Advance::Moved(progress))
    }

    /// Move back one step without validation. Returns `None` when nothing moved.
    pub fn retreat(&mut self) -> Option<Progress> {
        if self.ensure_navigable().is_err() || self.current_step == 1 {
            return None;
        }
        self.cancel_auto_advance();
        self.current_step -= 1;
        tracing::debug!(step = self.current_step, "retreated");
        Some(self.progress())
    }

    /// Advance on behalf of a fired auto-advance ticket.
    ///
    /// Returns `None` without touching anything if the ticket is stale: a
    /// newer choice was made or the user navigated since it was issued.
    pub fn fire_auto_advance(
        &mut self,
        ticket: AutoAdvanceTicket,
    ) -> Option<Result<Advance, NavigationError>> {
        if self.auto_advance != Some(ticket) || ticket.step() != self.current_step {
            tracing::trace!(step = ticket.step(), "stale auto-advance ignored");
            return None;
        }
        Some(self.advance())
    }

    /// Drop any pending auto-advance.
    pub fn cancel_auto_advance(&mut self) {
        if self.auto_advance.take().is_some() {
            self.generation += 1;
        }
    }

    // === Submission ===

    /// Validate and commit the last step and build the record to send.
    ///
    /// Moves the status to `Submitting`; the caller must report the sink's
    /// outcome through `finish_submit`.
    pub fn begin_submit(&mut self) -> Result<SubmissionRecord, SubmitError> {
        self.begin_submit_at(Local::now().naive_local())
    }

    /// `begin_submit` with an explicit local time for the timestamp.
    pub fn begin_submit_at(&mut self, now: NaiveDateTime) -> Result<SubmissionRecord, SubmitError> {
        match self.status {
            SubmissionStatus::Succeeded => return Err(SubmitError::Locked),
            SubmissionStatus::Submitting => return Err(SubmitError::InFlight),
            SubmissionStatus::Idle | SubmissionStatus::Failed => {}
        }
        if !self.is_last_step() {
            return Err(SubmitError::NotOnFinalStep {
                current: self.current_step,
                total: self.total_steps(),
            });
        }
        self.cancel_auto_advance();
        self.validate_and_commit()?;

        let timestamp = self.config.timestamp(now);
        let record = SubmissionRecord::new(self.answers.clone(), timestamp);
        self.status = SubmissionStatus::Submitting;
        self.notice = None;
        tracing::info!(fields = record.len(), timestamp = record.timestamp(), "submitting");
        Ok(record)
    }

    /// Record the sink's outcome for the in-flight submission.
    ///
    /// Success locks the wizard. Failure re-enables submission, leaves the
    /// answers and position alone and raises the retry notice.
    pub fn finish_submit(&mut self, outcome: Result<(), SinkError>) -> Result<(), SubmitError> {
        if self.status != SubmissionStatus::Submitting {
            tracing::warn!(status = ?self.status, "sink outcome without a submission in flight");
            return Ok(());
        }
        match outcome {
            Ok(()) => {
                self.status = SubmissionStatus::Succeeded;
                self.inline.clear();
                tracing::info!("submission accepted");
                Ok(())
            }
            Err(source) => {
                self.status = SubmissionStatus::Failed;
                let message = self.config.failure_message();
                self.notice = Some(message.clone());
                tracing::warn!(error = %source, "submission failed");
                Err(SubmitError::Transport { message, source })
            }
        }
    }

    /// Submit the last step to `sink` and wait for the outcome.
    ///
    /// Holding `&mut self` across the delivery keeps a second submission from
    /// starting while this one is in flight.
    pub async fn submit<S: ResponseSink>(&mut self, sink: &S) -> Result<(), SubmitError> {
        let record = self.begin_submit()?;
        let outcome = sink.deliver(&record).await.map_err(SinkError::transport);
        self.finish_submit(outcome)
    }

    // === Helpers ===

    fn ensure_navigable(&self) -> Result<(), NavigationError> {
        match self.status {
            SubmissionStatus::Succeeded => Err(NavigationError::Locked),
            SubmissionStatus::Submitting => Err(NavigationError::Busy),
            SubmissionStatus::Idle | SubmissionStatus::Failed => Ok(()),
        }
    }

    fn validate_and_commit(&mut self) -> Result<(), ValidationError> {
        let step = self.current_step;
        let field_names: Vec<FieldName> = self.step().field_names().cloned().collect();
        for name in &field_names {
            self.inline.remove(name.as_str());
        }

        if let Err(err) = self.validate_step(step) {
            tracing::warn!(step, error = %err, "step rejected");
            match &err {
                ValidationError::Fields(violations) => {
                    for v in violations {
                        self.inline.insert(v.field.clone(), v.message.clone());
                    }
                }
                ValidationError::Blocking(message) => self.notice = Some(message.clone()),
            }
            return Err(err);
        }

        self.commit_step(step);
        Ok(())
    }

    fn editable_field(&self, field: &str) -> Result<(usize, &FieldDescriptor), InputError> {
        if self.is_locked() {
            return Err(InputError::Locked);
        }
        self.definition
            .field(field)
            .ok_or_else(|| InputError::UnknownField(field.into()))
    }

    fn choice_field(&self, field: &str) -> Result<(usize, &FieldDescriptor), InputError> {
        let (step, descriptor) = self.editable_field(field)?;
        if !descriptor.format().is_choice() {
            return Err(InputError::NotAChoice(descriptor.name().clone()));
        }
        Ok((step, descriptor))
    }
}
