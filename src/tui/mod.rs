// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive terminal front end.
//!
//! One screen per workflow state, a key-hint footer and a status line. All decisions live in
//! [`Workflow`]; this module only maps keys to [`Action`]s and carries out the requests the
//! workflow hands back (asking for a note name, opening a note in an editor).

use std::{
    error::Error,
    io,
    path::{Path, PathBuf},
    process::Command,
    time::Duration,
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::model::{DocumentName, PersonGroup, TaggedItem};
use crate::relocate::MoveSummary;
use crate::scan::strip_tags;
use crate::store::DocumentStore;
use crate::text::{CLOSED_CHECKBOX, OPEN_CHECKBOX};
use crate::workflow::{
    Action, ItemPick, Outcome, Request, SearchMode, State, TargetChoice, TargetSearch, Workflow,
};

mod theme;

use theme::TuiTheme;

const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "tasklift";

/// Runs the interactive UI until the operator quits.
pub fn run<S: DocumentStore>(workflow: Workflow<S>, editor: String) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::default();
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(workflow, editor, theme);

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                    if let Some(action) = app.take_external_action() {
                        let result =
                            terminal.run_external_action(|| app.execute_external_action(&action));
                        match result {
                            Ok(()) => app.set_status(Status::Info(format!(
                                "Closed editor for {}",
                                action.document()
                            ))),
                            Err(err) => {
                                tracing::warn!(%err, "external action failed");
                                app.set_status(Status::Error(format!("Editor failed: {err}")));
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw<S: DocumentStore>(frame: &mut Frame<'_>, app: &App<S>) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let theme = &app.theme;
    match app.workflow.state() {
        State::PersonSelection { groups, cursor } => {
            render_people(frame, rows[0], theme, groups, *cursor, app.workflow.undo_stack().len());
        }
        State::ItemSelection(pick) => render_items(frame, rows[0], theme, pick),
        State::TargetSelection { pick, choice } => {
            render_target_menu(frame, rows[0], theme, pick, *choice);
        }
        State::TargetSearch(search) => render_search(frame, rows[0], theme, search),
        State::Confirmation { pick, target } => {
            render_confirmation(frame, rows[0], theme, pick, target);
        }
        State::Success(summary) => {
            render_success(frame, rows[0], theme, summary, app.workflow.undo_stack().len());
        }
    }

    frame.render_widget(Paragraph::new(status_line(app.status.as_ref(), theme)), rows[1]);
    let compact = area.width < 80;
    let footer = footer_line(app.workflow.state(), app.prompt.is_some(), compact);
    frame.render_widget(Paragraph::new(footer), rows[2]);

    if let Some(prompt) = &app.prompt {
        render_name_prompt(frame, area, theme, prompt);
    }
}

include!("chrome.rs");

#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Info(String),
    Error(String),
}

/// Text being typed for a new note name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct NamePrompt {
    input: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ExternalAction {
    OpenDocument { name: DocumentName, path: PathBuf },
}

impl ExternalAction {
    fn document(&self) -> &DocumentName {
        match self {
            Self::OpenDocument { name, .. } => name,
        }
    }
}

struct App<S> {
    workflow: Workflow<S>,
    editor: String,
    theme: TuiTheme,
    prompt: Option<NamePrompt>,
    status: Option<Status>,
    pending_external_action: Option<ExternalAction>,
    should_quit: bool,
}

impl<S: DocumentStore> App<S> {
    fn new(workflow: Workflow<S>, editor: String, theme: TuiTheme) -> Self {
        Self {
            workflow,
            editor,
            theme,
            prompt: None,
            status: None,
            pending_external_action: None,
            should_quit: false,
        }
    }

    fn set_status(&mut self, status: Status) {
        self.status = Some(status);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.prompt.is_some() {
            self.handle_prompt_key(key.code);
            return;
        }

        if let Some(action) = action_for_key(self.workflow.state(), key.code) {
            self.status = None;
            self.apply(action);
        }
    }

    fn handle_prompt_key(&mut self, code: KeyCode) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.prompt = None;
                self.set_status(Status::Info("Cancelled".to_owned()));
            }
            KeyCode::Enter => {
                let input = std::mem::take(&mut prompt.input);
                self.prompt = None;
                self.apply(Action::NewDocumentName(input));
            }
            KeyCode::Backspace => {
                prompt.input.pop();
            }
            KeyCode::Char(ch) => prompt.input.push(ch),
            _ => {}
        }
    }

    fn apply(&mut self, action: Action) {
        let outcome = self.workflow.handle(action);
        self.apply_outcome(outcome);
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        if outcome.should_exit {
            self.should_quit = true;
        }
        if let Some(error) = outcome.error {
            self.set_status(Status::Error(error.to_string()));
        } else if let Some(message) = outcome.message {
            self.set_status(Status::Info(message));
        }

        match outcome.request {
            Some(Request::PromptDocumentName) => self.prompt = Some(NamePrompt::default()),
            Some(Request::OpenDocument(name)) => {
                let path = self.workflow.store().document_path(&name);
                match path {
                    Some(path) => {
                        self.pending_external_action =
                            Some(ExternalAction::OpenDocument { name, path });
                    }
                    None => self.set_status(Status::Error(format!("{name} has no file on disk"))),
                }
            }
            None => {}
        }
    }

    fn take_external_action(&mut self) -> Option<ExternalAction> {
        self.pending_external_action.take()
    }

    fn execute_external_action(&self, action: &ExternalAction) -> Result<(), String> {
        match action {
            ExternalAction::OpenDocument { path, .. } => launch_editor_command(&self.editor, path),
        }
    }
}

/// The workflow action a key stands for in `state`, if any.
fn action_for_key(state: &State, code: KeyCode) -> Option<Action> {
    let action = match state {
        State::PersonSelection { .. } => match code {
            KeyCode::Down | KeyCode::Char('j') => Action::Next,
            KeyCode::Up | KeyCode::Char('k') => Action::Previous,
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => Action::Confirm,
            KeyCode::Char('u') => Action::Undo,
            KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
            _ => return None,
        },
        State::ItemSelection(_) => match code {
            KeyCode::Down | KeyCode::Char('j') => Action::Next,
            KeyCode::Up | KeyCode::Char('k') => Action::Previous,
            KeyCode::Char(' ') | KeyCode::Char('x') => Action::Toggle,
            KeyCode::Char('a') => Action::SelectAll,
            KeyCode::Char('n') => Action::SelectNone,
            KeyCode::Enter => Action::Confirm,
            KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => Action::Back,
            KeyCode::Char('q') => Action::Quit,
            _ => return None,
        },
        State::TargetSelection { .. } => match code {
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => Action::Next,
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => Action::Previous,
            KeyCode::Char('f') | KeyCode::Char('/') => Action::FindExisting,
            KeyCode::Char('n') | KeyCode::Char('c') => Action::CreateNew,
            KeyCode::Enter => Action::Confirm,
            KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => Action::Back,
            KeyCode::Char('q') => Action::Quit,
            _ => return None,
        },
        State::TargetSearch(search) => match (search.mode, code) {
            (_, KeyCode::Down) => Action::Next,
            (_, KeyCode::Up) => Action::Previous,
            (_, KeyCode::Enter) => Action::Confirm,
            (SearchMode::Insert, KeyCode::Esc) => Action::EnterNormal,
            (SearchMode::Insert, KeyCode::Backspace) => Action::SearchBackspace,
            (SearchMode::Insert, KeyCode::Char(ch)) => Action::SearchInput(ch),
            (SearchMode::Normal, KeyCode::Char('j')) => Action::Next,
            (SearchMode::Normal, KeyCode::Char('k')) => Action::Previous,
            (SearchMode::Normal, KeyCode::Char('i') | KeyCode::Char('/')) => Action::EnterInsert,
            (SearchMode::Normal, KeyCode::Esc | KeyCode::Char('q')) => Action::Back,
            _ => return None,
        },
        State::Confirmation { .. } => match code {
            KeyCode::Enter | KeyCode::Char('y') => Action::Confirm,
            KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('n') => Action::Back,
            KeyCode::Char('q') => Action::Quit,
            _ => return None,
        },
        State::Success(_) => match code {
            KeyCode::Char('u') => Action::Undo,
            KeyCode::Char('o') | KeyCode::Char('e') => Action::OpenNote,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('b') => Action::ReturnToPersonSelection,
            KeyCode::Char('q') => Action::Quit,
            _ => return None,
        },
    };
    Some(action)
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }

    fn run_external_action(
        &mut self,
        action: impl FnOnce() -> Result<(), String>,
    ) -> Result<(), String> {
        let _suspend = TerminalSuspendGuard::new(&mut self.terminal)
            .map_err(|err| format!("terminal suspend failed: {err}"))?;
        action()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

/// Hands the terminal back to the shell for the guard's lifetime.
struct TerminalSuspendGuard<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>,
}

impl<'a> TerminalSuspendGuard<'a> {
    fn new(terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<Self> {
        terminal.show_cursor()?;
        disable_raw_mode()?;

        if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
            let _ = enable_raw_mode();
            let _ = execute!(terminal.backend_mut(), EnterAlternateScreen);
            let _ = terminal.hide_cursor();
            let _ = ratatui::backend::Backend::flush(terminal.backend_mut());
            return Err(err);
        }

        ratatui::backend::Backend::flush(terminal.backend_mut())?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSuspendGuard<'_> {
    fn drop(&mut self) {
        let _ = enable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), EnterAlternateScreen);
        let _ = self.terminal.clear();
        let _ = self.terminal.hide_cursor();
        let _ = ratatui::backend::Backend::flush(self.terminal.backend_mut());
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

fn launch_editor_command(command: &str, path: &Path) -> Result<(), String> {
    let path_text = path.to_string_lossy();
    if path_text.starts_with('-') {
        return Err("invalid note path".to_owned());
    }

    tracing::info!(editor = command, path = %path.display(), "launching editor");
    let status = Command::new("sh")
        .arg("-c")
        .arg(format!("{command} {}", shell_single_quote(path_text.as_ref())))
        .status()
        .map_err(|err| format!("failed to run editor command `{command}`: {err}"))?;
    if !status.success() {
        return Err(format!("editor command failed with status {status}"));
    }
    Ok(())
}

fn shell_single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests;
