//! Ratatui front end for a `SurveyController`.
//!
//! Draws the active step of the wizard in a styled terminal UI and feeds key
//! presses back as wizard events. All state lives in the wizard; this module
//! only reads it.

use std::{
    io::{self, Stdout},
    time::Duration,
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use stepwise::{InputKind, ResponseSink, StepDefinition, SurveyController, Wizard, WizardEvent};
use thiserror::Error;

use crate::view::{Action, ViewState};

/// Error type for the Ratatui front end.
#[derive(Debug, Error)]
pub enum RatatuiError {
    /// User cancelled the survey (e.g., pressed Esc).
    #[error("Survey cancelled by user")]
    Cancelled,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub highlight: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Blue,
            text: Color::White,
            highlight: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            border: Color::Gray,
        }
    }
}

/// Terminal front end that runs one survey to completion.
#[derive(Debug, Clone)]
pub struct RatatuiWizard {
    theme: Theme,
    /// How often the loop wakes up to check for input and timers.
    tick: Duration,
}

impl Default for RatatuiWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl RatatuiWizard {
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            tick: Duration::from_millis(50),
        }
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the input polling interval.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Run the survey on a fresh current-thread Tokio runtime.
    pub fn run_blocking<S: ResponseSink>(
        &self,
        controller: SurveyController<S>,
    ) -> Result<Wizard, RatatuiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.run(controller))
    }

    /// Run the survey until it is submitted or cancelled.
    ///
    /// Returns the wizard after a successful submission.
    pub async fn run<S: ResponseSink>(
        &self,
        mut controller: SurveyController<S>,
    ) -> Result<Wizard, RatatuiError> {
        let mut terminal = self.setup_terminal()?;
        let outcome = self.event_loop(&mut terminal, &mut controller).await;
        self.restore_terminal(&mut terminal)?;
        outcome?;
        Ok(controller.into_wizard())
    }

    async fn event_loop<S: ResponseSink>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        controller: &mut SurveyController<S>,
    ) -> Result<(), RatatuiError> {
        let mut view = ViewState::new();

        loop {
            view.sync(controller.wizard());
            terminal.draw(|frame| draw(frame, controller.wizard(), &view, &self.theme, false))?;

            tokio::select! {
                ticket = controller.next_auto_advance() => {
                    if let Some(Err(err)) = controller.auto_advance(ticket) {
                        tracing::debug!(error = %err, "auto-advance blocked");
                    }
                    continue;
                }
                _ = tokio::time::sleep(self.tick) => {}
            }

            while event::poll(Duration::ZERO)? {
                let Event::Key(key) = event::read()? else {
                    continue;
                };
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match view.handle_key(controller.wizard(), key.code) {
                    Action::None => {}
                    Action::Quit => return Ok(()),
                    Action::Cancel => {
                        tracing::info!(step = controller.wizard().current_step(), "survey cancelled");
                        return Err(RatatuiError::Cancelled);
                    }
                    Action::Dispatch(events) => {
                        for event in events {
                            if event == WizardEvent::Submit {
                                // The sink is awaited inside dispatch; show the busy state first.
                                terminal.draw(|frame| {
                                    draw(frame, controller.wizard(), &view, &self.theme, true)
                                })?;
                            }
                            if let Err(err) = controller.dispatch(event).await {
                                // Already visible as inline messages or a notice.
                                tracing::debug!(error = %err, "event rejected");
                                break;
                            }
                        }
                    }
                }
            }
        }
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>, RatatuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), RatatuiError> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}

/// Draw the whole screen for the wizard's current state.
///
/// `submitting` forces the busy label while a submission is being handed off.
pub(crate) fn draw(frame: &mut Frame, wizard: &Wizard, view: &ViewState, theme: &Theme, submitting: bool) {
    if wizard.is_locked() {
        draw_completion(frame, wizard, theme);
        return;
    }
    draw_ui(frame, wizard, view, theme, submitting);
    if let Some(notice) = wizard.notice() {
        draw_notice(frame, notice, theme);
    }
}

fn draw_ui(frame: &mut Frame, wizard: &Wizard, view: &ViewState, theme: &Theme, submitting: bool) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(2), // Progress bar
            Constraint::Min(10),   // Content
            Constraint::Length(3), // Help
        ])
        .split(area);

    let definition = wizard.definition();
    let mut header_lines = vec![Line::from(definition.title.clone()).bold()];
    if wizard.current_step() == 1
        && let Some(prelude) = &definition.prelude
    {
        header_lines.push(Line::from(prelude.clone()).fg(theme.text));
    }
    let header = Paragraph::new(header_lines)
        .style(Style::default().fg(theme.primary))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(header, chunks[0]);

    draw_progress(frame, wizard, theme, chunks[1]);

    let content = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(chunks[2]);

    let step = wizard.step();
    let prompt = Paragraph::new(step.ask().to_string())
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary))
                .title(" Question ")
                .title_style(Style::default().fg(theme.highlight)),
        );
    frame.render_widget(prompt, content[0]);

    match step.kind() {
        InputKind::FreeformFields => draw_text_fields(frame, wizard, step, view, theme, content[1]),
        InputKind::SingleSelect | InputKind::SingleChoiceRadio | InputKind::MultiSelect => {
            draw_choices(frame, wizard, step, view, theme, content[1])
        }
    }

    let help = Paragraph::new(help_text(wizard, submitting))
        .style(Style::default().fg(theme.border))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(help, chunks[3]);
}

/// Thin bar with the "Step X of N" label centered below it.
fn draw_progress(frame: &mut Frame, wizard: &Wizard, theme: &Theme, area: Rect) {
    let progress = wizard.progress();
    let label = format!(" {progress} ");

    let bar_width = area.width.saturating_sub(2);
    let filled_width = (progress.ratio() * f64::from(bar_width)) as u16;
    let bar_x = area.x + 1;

    let track = Paragraph::new("─".repeat(bar_width as usize)).style(Style::default().fg(theme.border));
    frame.render_widget(track, Rect::new(bar_x, area.y, bar_width, 1));

    if filled_width > 0 {
        let filled =
            Paragraph::new("━".repeat(filled_width as usize)).style(Style::default().fg(theme.primary));
        frame.render_widget(filled, Rect::new(bar_x, area.y, filled_width, 1));
    }

    let label_width = (label.chars().count() as u16).min(bar_width);
    let label_x = bar_x + (bar_width.saturating_sub(label_width)) / 2;
    let label_widget = Paragraph::new(label).style(Style::default().fg(theme.secondary));
    frame.render_widget(label_widget, Rect::new(label_x, area.y + 1, label_width, 1));
}

fn draw_choices(
    frame: &mut Frame,
    wizard: &Wizard,
    step: &StepDefinition,
    view: &ViewState,
    theme: &Theme,
    area: Rect,
) {
    let fields = step.fields();
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|f| Constraint::Length(f.options().len() as u16 + 3))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (index, (field, row)) in fields.iter().zip(rows.iter()).enumerate() {
        let name = field.name().as_str();
        let focused = index == view.focus();
        let chosen = wizard.inputs().value(name);
        let checked = wizard.inputs().checked(name);

        let items: Vec<ListItem> = field
            .options()
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let marker = match step.kind() {
                    InputKind::MultiSelect if checked.contains(&option.value) => "[✓]",
                    InputKind::MultiSelect => "[ ]",
                    _ if option.value == chosen => "(•)",
                    _ => "( )",
                };
                let style = if focused && i == view.option() {
                    Style::default().fg(theme.highlight).bold()
                } else if option.value == chosen || checked.contains(&option.value) {
                    Style::default().fg(theme.secondary)
                } else {
                    Style::default().fg(theme.text)
                };
                ListItem::new(format!("  {marker} {}", option.label)).style(style)
            })
            .collect();

        let title = match step.kind() {
            InputKind::MultiSelect => format!(" {} ({} selected) ", field.label(), checked.len()),
            _ => format!(" {} ", field.label()),
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused { theme.primary } else { theme.border }))
            .title(title)
            .title_style(Style::default().fg(theme.secondary));
        if let Some(message) = wizard.inline_message(name) {
            block = block.title_bottom(format!(" {message} ").fg(theme.error).bold());
        }

        let list = List::new(items).block(block).highlight_symbol("► ");
        let mut list_state = ListState::default();
        list_state.select(focused.then_some(view.option()));
        frame.render_stateful_widget(list, *row, &mut list_state);
    }
}

fn draw_text_fields(
    frame: &mut Frame,
    wizard: &Wizard,
    step: &StepDefinition,
    view: &ViewState,
    theme: &Theme,
    area: Rect,
) {
    let fields = step.fields();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); fields.len()])
        .split(area);

    for (index, (field, row)) in fields.iter().zip(rows.iter()).enumerate() {
        let name = field.name().as_str();
        let value = wizard.inputs().value(name);
        let focused = index == view.focus();

        let required = if field.is_required() { " *" } else { "" };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused { theme.primary } else { theme.border }))
            .title(format!(" {}{required} ", field.label()))
            .title_style(Style::default().fg(theme.secondary));
        if let Some(message) = wizard.inline_message(name) {
            block = block.title_bottom(format!(" {message} ").fg(theme.error).bold());
        }

        let input = Paragraph::new(value.to_string())
            .style(Style::default().fg(theme.text))
            .block(block);
        frame.render_widget(input, *row);

        if focused {
            let cursor_x = row.x + 1 + value.chars().count() as u16;
            frame.set_cursor_position((cursor_x, row.y + 1));
        }
    }
}

fn help_text(wizard: &Wizard, submitting: bool) -> String {
    let controls = wizard.controls();
    let mut parts = Vec::new();

    match wizard.step().kind() {
        InputKind::FreeformFields => parts.push("Tab: Next field"),
        InputKind::MultiSelect => parts.push("↑/↓: Navigate  Space: Toggle"),
        InputKind::SingleSelect | InputKind::SingleChoiceRadio => {
            parts.push("↑/↓: Choose  Space: Select")
        }
    }
    if submitting || !controls.submit_enabled {
        parts.push("Submitting...");
    } else if controls.submit {
        parts.push("Enter: Submit");
    } else if controls.next {
        parts.push("Enter: Next");
    }
    if controls.back {
        parts.push("Backspace: Back");
    }
    parts.push("Esc: Cancel");
    parts.join("  ")
}

/// Blocking notification as a centered popup.
fn draw_notice(frame: &mut Frame, notice: &str, theme: &Theme) {
    let area = centered(frame.area(), 60, 7);
    frame.render_widget(Clear, area);

    let popup = Paragraph::new(format!("{notice}\n\nPress Enter to continue."))
        .style(Style::default().fg(theme.text))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error))
                .title(" Notice ")
                .title_style(Style::default().fg(theme.error).bold()),
        );
    frame.render_widget(popup, area);
}

fn draw_completion(frame: &mut Frame, wizard: &Wizard, theme: &Theme) {
    let area = frame.area();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.success))
        .title(" Complete ")
        .title_style(Style::default().fg(theme.success).bold());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = match &wizard.definition().epilogue {
        Some(epilogue) => format!("{epilogue}\n\nPress Enter to finish."),
        None => "Thank you! Your information has been submitted.\n\nPress Enter to finish.".to_string(),
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(theme.text))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    let centered = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Min(3),
            Constraint::Percentage(40),
        ])
        .split(inner);

    frame.render_widget(paragraph, centered[1]);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::backend::TestBackend;
    use stepwise::{FieldDescriptor, SinkError, SurveyDefinition};

    use super::*;

    fn wizard() -> Wizard {
        let definition = SurveyDefinition::new(
            "Heat Pump Survey",
            vec![
                StepDefinition::dropdown(
                    1,
                    "How do you heat your home?",
                    FieldDescriptor::choice("fuelType", "Fuel type", vec!["Gas".into(), "Oil".into()]),
                ),
                StepDefinition::freeform(2, "Details", vec![FieldDescriptor::postcode("postcode", "Post code")]),
            ],
        )
        .unwrap()
        .with_prelude("A few questions about your home.")
        .with_epilogue("Thanks for your enquiry.");
        Wizard::new(Arc::new(definition))
    }

    fn render(wizard: &Wizard, submitting: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut view = ViewState::new();
        view.sync(wizard);
        terminal
            .draw(|frame| draw(frame, wizard, &view, &Theme::default(), submitting))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn wizard_creation() {
        let _wizard = RatatuiWizard::new();
        let _with_theme = RatatuiWizard::new().with_theme(Theme::default());
        let _with_tick = RatatuiWizard::new().with_tick(Duration::from_millis(10));
    }

    #[test]
    fn error_types() {
        let err = RatatuiError::Cancelled;
        assert_eq!(err.to_string(), "Survey cancelled by user");
    }

    #[test]
    fn theme_default() {
        let theme = Theme::default();
        assert_eq!(theme.primary, Color::Cyan);
        assert_eq!(theme.error, Color::Red);
        assert_eq!(theme.success, Color::Green);
    }

    #[test]
    fn first_step_shows_progress_and_options() {
        let screen = render(&wizard(), false);
        assert!(screen.contains("Step 1 of 2"));
        assert!(screen.contains("Heat Pump Survey"));
        assert!(screen.contains("A few questions about your home."));
        assert!(screen.contains("Gas"));
        assert!(screen.contains("Enter: Next"));
        assert!(!screen.contains("Backspace: Back"));
    }

    #[test]
    fn inline_message_is_drawn() {
        let mut wizard = wizard();
        wizard.advance().unwrap_err();
        assert!(render(&wizard, false).contains("Please select an option."));
    }

    #[test]
    fn last_step_offers_submit() {
        let mut wizard = wizard();
        wizard.select("fuelType", "Oil").unwrap();
        wizard.advance().unwrap();

        let screen = render(&wizard, false);
        assert!(screen.contains("Enter: Submit"));
        assert!(screen.contains("Backspace: Back"));
        assert!(render(&wizard, true).contains("Submitting..."));
    }

    #[test]
    fn failure_notice_is_a_popup() {
        let mut wizard = wizard();
        wizard.select("fuelType", "Oil").unwrap();
        wizard.advance().unwrap();
        wizard.set_input("postcode", "SW1A 1AA").unwrap();
        wizard.begin_submit().unwrap();
        wizard
            .finish_submit(Err(SinkError::transport(std::io::Error::other("offline"))))
            .unwrap_err();

        assert!(render(&wizard, false).contains("Notice"));
    }

    #[test]
    fn completion_shows_epilogue() {
        let mut wizard = wizard();
        wizard.select("fuelType", "Gas").unwrap();
        wizard.advance().unwrap();
        wizard.set_input("postcode", "SW1A 1AA").unwrap();
        wizard.begin_submit().unwrap();
        wizard.finish_submit(Ok(())).unwrap();

        let screen = render(&wizard, false);
        assert!(screen.contains("Thanks for your enquiry."));
        assert!(!screen.contains("Step 2 of 2"));
    }
}
