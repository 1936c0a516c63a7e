//! Cursor state of the terminal view and the key bindings.
//!
//! The view never changes the wizard itself. It keeps track of the highlighted
//! option and the focused field and turns key presses into `WizardEvent`s.

use crossterm::event::KeyCode;
use stepwise::{FieldName, InputKind, StepDefinition, Wizard, WizardEvent};

/// What the event loop should do with a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    /// Dispatch these events, in order.
    Dispatch(Vec<WizardEvent>),
    /// Leave after a completed submission.
    Quit,
    /// Abandon the survey.
    Cancel,
}

impl Action {
    fn one(event: WizardEvent) -> Self {
        Self::Dispatch(vec![event])
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    step: usize,
    focus: usize,
    option: usize,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the focused field on the active step.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Index of the highlighted option of the focused choice field.
    pub fn option(&self) -> usize {
        self.option
    }

    /// Reset focus and highlight when the wizard moved to another step.
    pub fn sync(&mut self, wizard: &Wizard) {
        if self.step == wizard.current_step() {
            return;
        }
        self.step = wizard.current_step();
        self.focus = 0;
        self.highlight_current(wizard);
    }

    pub fn handle_key(&mut self, wizard: &Wizard, key: KeyCode) -> Action {
        self.sync(wizard);

        if wizard.is_locked() {
            return match key {
                KeyCode::Enter | KeyCode::Esc => Action::Quit,
                _ => Action::None,
            };
        }
        if wizard.notice().is_some() {
            return match key {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                    Action::one(WizardEvent::DismissNotice)
                }
                _ => Action::None,
            };
        }
        if key == KeyCode::Esc {
            return Action::Cancel;
        }

        let step = wizard.step();
        match step.kind() {
            InputKind::FreeformFields => self.text_key(wizard, step, key),
            InputKind::SingleSelect | InputKind::SingleChoiceRadio | InputKind::MultiSelect => {
                self.choice_key(wizard, step, key)
            }
        }
    }

    fn choice_key(&mut self, wizard: &Wizard, step: &StepDefinition, key: KeyCode) -> Action {
        let Some(field) = step.fields().get(self.focus) else {
            return Action::None;
        };
        let options = field.options();

        match key {
            KeyCode::Up => {
                self.option = self.option.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                if self.option + 1 < options.len() {
                    self.option += 1;
                }
                Action::None
            }
            KeyCode::Tab => {
                self.focus = (self.focus + 1) % step.fields().len();
                self.highlight_current(wizard);
                Action::None
            }
            KeyCode::BackTab => {
                self.focus = (self.focus + step.fields().len() - 1) % step.fields().len();
                self.highlight_current(wizard);
                Action::None
            }
            KeyCode::Char(' ') => match self.choose(step.kind(), field.name(), options) {
                Some(event) => Action::one(event),
                None => Action::None,
            },
            KeyCode::Enter => {
                let mut events = Vec::new();
                // Enter confirms the highlight; checkboxes are only flipped with Space.
                if step.kind() != InputKind::MultiSelect
                    && let Some(event) = self.choose(step.kind(), field.name(), options)
                {
                    events.push(event);
                }
                events.push(forward(wizard));
                Action::Dispatch(events)
            }
            KeyCode::Backspace | KeyCode::Left if wizard.controls().back => {
                Action::one(WizardEvent::Back)
            }
            _ => Action::None,
        }
    }

    fn text_key(&mut self, wizard: &Wizard, step: &StepDefinition, key: KeyCode) -> Action {
        let fields = step.fields();
        let Some(field) = fields.get(self.focus) else {
            return Action::None;
        };
        let name = field.name().clone();
        let value = wizard.inputs().value(name.as_str());

        match key {
            KeyCode::Char(c) => Action::one(WizardEvent::input(name, format!("{value}{c}"))),
            KeyCode::Backspace if value.is_empty() => {
                if wizard.controls().back {
                    Action::one(WizardEvent::Back)
                } else {
                    Action::None
                }
            }
            KeyCode::Backspace => {
                let mut shorter = value.to_string();
                shorter.pop();
                Action::one(WizardEvent::input(name, shorter))
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % fields.len();
                Action::one(WizardEvent::Blur(name))
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + fields.len() - 1) % fields.len();
                Action::one(WizardEvent::Blur(name))
            }
            KeyCode::Enter => Action::Dispatch(vec![WizardEvent::Blur(name), forward(wizard)]),
            _ => Action::None,
        }
    }

    fn choose(
        &self,
        kind: InputKind,
        field: &FieldName,
        options: &[stepwise::ChoiceOption],
    ) -> Option<WizardEvent> {
        let option = options.get(self.option)?;
        Some(if kind == InputKind::MultiSelect {
            WizardEvent::toggle(field, option.value.as_str())
        } else {
            WizardEvent::select(field, option.value.as_str())
        })
    }

    /// Highlight the chosen option of the focused field, or the first one.
    fn highlight_current(&mut self, wizard: &Wizard) {
        self.option = wizard
            .step()
            .fields()
            .get(self.focus)
            .and_then(|field| {
                let chosen = wizard.inputs().value(field.name().as_str());
                field.options().iter().position(|o| o.value == chosen)
            })
            .unwrap_or(0);
    }
}

fn forward(wizard: &Wizard) -> WizardEvent {
    if wizard.controls().submit {
        WizardEvent::Submit
    } else {
        WizardEvent::Next
    }
}
