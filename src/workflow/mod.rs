// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Operator workflow: person, items, target, confirmation, result.
//!
//! [`Workflow`] owns the document store, the undo stack and the current [`State`]. Front ends
//! render [`Workflow::state`] and feed parsed [`Action`]s to [`Workflow::handle`]; every
//! transition either completes or leaves the state untouched and reports why.

use std::fmt;

use chrono::Local;

use crate::model::{Document, DocumentName, Header, IdError, PersonGroup, PersonKey, TaggedItem, UndoStack};
use crate::relocate::{relocate, undo_last, MoveSummary, RelocateError, UndoError};
use crate::scan::person_groups;
use crate::store::{DocumentStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Next,
    Previous,
    Confirm,
    Back,
    Quit,
    Toggle,
    SelectAll,
    SelectNone,
    FindExisting,
    CreateNew,
    /// Answer to [`Request::PromptDocumentName`].
    NewDocumentName(String),
    SearchInput(char),
    SearchBackspace,
    EnterInsert,
    EnterNormal,
    Undo,
    ReturnToPersonSelection,
    OpenNote,
}

/// Something only the front end can do, asked for by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    PromptDocumentName,
    OpenDocument(DocumentName),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Insert,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetChoice {
    FindExisting,
    CreateNew,
}

impl TargetChoice {
    pub const ALL: [Self; 2] = [Self::FindExisting, Self::CreateNew];

    pub fn label(self) -> &'static str {
        match self {
            Self::FindExisting => "Find existing note",
            Self::CreateNew => "Create new note",
        }
    }

    fn toggled(self) -> Self {
        match self {
            Self::FindExisting => Self::CreateNew,
            Self::CreateNew => Self::FindExisting,
        }
    }
}

/// One person's items and which of them are checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPick {
    pub person: PersonKey,
    pub items: Vec<TaggedItem>,
    pub selected: Vec<bool>,
    pub cursor: usize,
}

impl ItemPick {
    fn new(group: &PersonGroup) -> Self {
        Self {
            person: group.key.clone(),
            items: group.items.clone(),
            selected: vec![true; group.items.len()],
            cursor: 0,
        }
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|checked| **checked).count()
    }

    pub fn selected_items(&self) -> Vec<TaggedItem> {
        self.items
            .iter()
            .zip(&self.selected)
            .filter(|(_, checked)| **checked)
            .map(|(item, _)| item.clone())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSearch {
    pub pick: ItemPick,
    pub mode: SearchMode,
    pub query: String,
    pub results: Vec<Document>,
    pub cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    PersonSelection { groups: Vec<PersonGroup>, cursor: usize },
    ItemSelection(ItemPick),
    TargetSelection { pick: ItemPick, choice: TargetChoice },
    TargetSearch(TargetSearch),
    Confirmation { pick: ItemPick, target: DocumentName },
    Success(MoveSummary),
}

impl State {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PersonSelection { .. } => "person-selection",
            Self::ItemSelection(_) => "item-selection",
            Self::TargetSelection { .. } => "target-selection",
            Self::TargetSearch(_) => "target-search",
            Self::Confirmation { .. } => "confirmation",
            Self::Success(_) => "success",
        }
    }
}

#[derive(Debug)]
pub enum WorkflowError {
    NoSelection,
    InvalidPersonIndex { index: usize, len: usize },
    NoTargetSelected,
    InvalidDocumentName { value: String, source: IdError },
    Relocate(RelocateError),
    Undo(UndoError),
    Store(StoreError),
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSelection => f.write_str("no items selected"),
            Self::InvalidPersonIndex { index, len } => {
                write!(f, "no person at position {index} (have {len})")
            }
            Self::NoTargetSelected => f.write_str("no matching note to move into"),
            Self::InvalidDocumentName { value, source } => {
                write!(f, "invalid note name {value:?}: {source}")
            }
            Self::Relocate(source) => write!(f, "{source}"),
            Self::Undo(source) => write!(f, "{source}"),
            Self::Store(source) => write!(f, "{source}"),
        }
    }
}

impl std::error::Error for WorkflowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidDocumentName { source, .. } => Some(source),
            Self::Relocate(source) => Some(source),
            Self::Undo(source) => Some(source),
            Self::Store(source) => Some(source),
            Self::NoSelection | Self::InvalidPersonIndex { .. } | Self::NoTargetSelected => None,
        }
    }
}

impl From<StoreError> for WorkflowError {
    fn from(source: StoreError) -> Self {
        Self::Store(source)
    }
}

/// Result of one [`Workflow::handle`] call.
#[derive(Debug, Default)]
pub struct Outcome {
    pub should_exit: bool,
    pub message: Option<String>,
    pub error: Option<WorkflowError>,
    pub request: Option<Request>,
}

impl Outcome {
    fn exit() -> Self {
        Self {
            should_exit: true,
            ..Self::default()
        }
    }

    fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    fn request(request: Request) -> Self {
        Self {
            request: Some(request),
            ..Self::default()
        }
    }

    fn failed(error: WorkflowError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}

pub struct Workflow<S> {
    store: S,
    state: State,
    undo: UndoStack,
}

impl<S: DocumentStore> Workflow<S> {
    /// Scans `store` and starts at person selection.
    pub fn new(store: S) -> Result<Self, WorkflowError> {
        let groups = scan_groups(&store)?;
        Ok(Self {
            store,
            state: State::PersonSelection { groups, cursor: 0 },
            undo: UndoStack::new(),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }

    /// Applies `action` to the current state.
    ///
    /// Actions that mean nothing in the current state are ignored. On error the state is left
    /// as it was, except for undo, which always rescans because a failed reversal may already
    /// have changed documents.
    pub fn handle(&mut self, action: Action) -> Outcome {
        let from = self.state.name();
        let outcome = match self.dispatch(action) {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::debug!(state = from, %error, "action rejected");
                Outcome::failed(error)
            }
        };
        if self.state.name() != from {
            tracing::debug!(from, to = self.state.name(), "state transition");
        }
        outcome
    }

    fn dispatch(&mut self, action: Action) -> Result<Outcome, WorkflowError> {
        if action == Action::Quit {
            return Ok(Outcome::exit());
        }

        match &mut self.state {
            State::PersonSelection { groups, cursor } => match action {
                Action::Next => *cursor = wrap_next(*cursor, groups.len()),
                Action::Previous => *cursor = wrap_previous(*cursor, groups.len()),
                Action::Confirm => {
                    let Some(group) = groups.get(*cursor) else {
                        return Err(WorkflowError::InvalidPersonIndex {
                            index: *cursor,
                            len: groups.len(),
                        });
                    };
                    self.state = State::ItemSelection(ItemPick::new(group));
                }
                Action::Undo => return self.undo(None),
                _ => {}
            },
            State::ItemSelection(pick) => match action {
                Action::Next => pick.cursor = wrap_next(pick.cursor, pick.items.len()),
                Action::Previous => pick.cursor = wrap_previous(pick.cursor, pick.items.len()),
                Action::Toggle => {
                    if let Some(checked) = pick.selected.get_mut(pick.cursor) {
                        *checked = !*checked;
                    }
                }
                Action::SelectAll => pick.selected.fill(true),
                Action::SelectNone => pick.selected.fill(false),
                Action::Confirm => {
                    if pick.selected_count() == 0 {
                        return Err(WorkflowError::NoSelection);
                    }
                    let pick = pick.clone();
                    self.state = State::TargetSelection {
                        pick,
                        choice: TargetChoice::FindExisting,
                    };
                }
                Action::Back => {
                    let focus = pick.person.clone();
                    self.state = self.person_selection(Some(&focus))?;
                }
                _ => {}
            },
            State::TargetSelection { pick, choice } => match action {
                Action::Next | Action::Previous => *choice = choice.toggled(),
                Action::Confirm if *choice == TargetChoice::FindExisting => {
                    return self.open_search();
                }
                Action::FindExisting => return self.open_search(),
                Action::Confirm | Action::CreateNew => {
                    *choice = TargetChoice::CreateNew;
                    return Ok(Outcome::request(Request::PromptDocumentName));
                }
                Action::NewDocumentName(value) => {
                    let target = self.create_target(&value)?;
                    let pick = self.take_pick()?;
                    let message = format!("Created {target}");
                    self.state = State::Confirmation { pick, target };
                    return Ok(Outcome::message(message));
                }
                Action::Back => self.state = State::ItemSelection(pick.clone()),
                _ => {}
            },
            State::TargetSearch(search) => match action {
                Action::Next => search.cursor = wrap_next(search.cursor, search.results.len()),
                Action::Previous => {
                    search.cursor = wrap_previous(search.cursor, search.results.len());
                }
                Action::EnterInsert => search.mode = SearchMode::Insert,
                Action::EnterNormal => search.mode = SearchMode::Normal,
                Action::SearchInput(ch) if search.mode == SearchMode::Insert => {
                    let mut query = search.query.clone();
                    query.push(ch);
                    self.refresh_search(query)?;
                }
                Action::SearchBackspace if search.mode == SearchMode::Insert => {
                    let mut query = search.query.clone();
                    if query.pop().is_some() {
                        self.refresh_search(query)?;
                    }
                }
                Action::Confirm => {
                    let Some(document) = search.results.get(search.cursor) else {
                        return Err(WorkflowError::NoTargetSelected);
                    };
                    self.state = State::Confirmation {
                        pick: search.pick.clone(),
                        target: document.name().clone(),
                    };
                }
                Action::Back => {
                    self.state = State::TargetSelection {
                        pick: search.pick.clone(),
                        choice: TargetChoice::FindExisting,
                    };
                }
                _ => {}
            },
            State::Confirmation { pick, target } => match action {
                Action::Confirm => {
                    let items = pick.selected_items();
                    let summary = relocate(&self.store, &mut self.undo, &pick.person, target, &items)
                        .map_err(WorkflowError::Relocate)?;
                    let message = format!(
                        "Moved {} item(s) for {} to {}",
                        summary.items_moved, summary.person, summary.target
                    );
                    self.state = State::Success(summary);
                    return Ok(Outcome::message(message));
                }
                Action::Back => self.state = State::ItemSelection(pick.clone()),
                _ => {}
            },
            State::Success(summary) => match action {
                Action::Undo => {
                    let focus = summary.person.clone();
                    return self.undo(Some(&focus));
                }
                Action::ReturnToPersonSelection => {
                    let focus = summary.person.clone();
                    self.state = self.person_selection(Some(&focus))?;
                }
                Action::OpenNote => {
                    return Ok(Outcome::request(Request::OpenDocument(summary.target.clone())));
                }
                _ => {}
            },
        }
        Ok(Outcome::default())
    }

    fn person_selection(&self, focus: Option<&PersonKey>) -> Result<State, WorkflowError> {
        let groups = scan_groups(&self.store)?;
        let cursor = focus
            .and_then(|key| groups.iter().position(|group| &group.key == key))
            .unwrap_or(0);
        Ok(State::PersonSelection { groups, cursor })
    }

    fn undo(&mut self, focus: Option<&PersonKey>) -> Result<Outcome, WorkflowError> {
        let result = undo_last(&self.store, &mut self.undo);
        if matches!(result, Err(UndoError::NothingToUndo)) {
            return Err(WorkflowError::Undo(UndoError::NothingToUndo));
        }

        let focus = match &result {
            Ok(transaction) => Some(transaction.person.clone()),
            Err(_) => focus.cloned(),
        };
        self.state = self.person_selection(focus.as_ref())?;

        match result {
            Ok(transaction) => Ok(Outcome::message(format!(
                "Undid move of {} item(s) for {} from {}",
                transaction.items.len(),
                transaction.person,
                transaction.target_document
            ))),
            Err(err) => Err(WorkflowError::Undo(err)),
        }
    }

    fn open_search(&mut self) -> Result<Outcome, WorkflowError> {
        let results = self.store.search_documents("")?;
        let pick = self.take_pick()?;
        self.state = State::TargetSearch(TargetSearch {
            pick,
            mode: SearchMode::Insert,
            query: String::new(),
            results,
            cursor: 0,
        });
        Ok(Outcome::default())
    }

    fn refresh_search(&mut self, query: String) -> Result<(), WorkflowError> {
        let results = self.store.search_documents(&query)?;
        if let State::TargetSearch(search) = &mut self.state {
            search.query = query;
            search.results = results;
            search.cursor = 0;
        }
        Ok(())
    }

    /// Creates the note named by the operator, adding the store's extension when missing.
    fn create_target(&self, value: &str) -> Result<DocumentName, WorkflowError> {
        let value = value.trim();
        let extension = self.store.document_extension();
        let file_name = if has_extension(value, extension) || value.is_empty() {
            value.to_owned()
        } else {
            format!("{value}.{extension}")
        };
        let name = DocumentName::new(file_name).map_err(|source| {
            WorkflowError::InvalidDocumentName {
                value: value.to_owned(),
                source,
            }
        })?;

        let stem = name
            .as_str()
            .strip_suffix(&format!(".{extension}"))
            .unwrap_or(name.as_str())
            .to_owned();
        let date = Local::now().format("%Y-%m-%d").to_string();
        self.store.create_document(&name, &Header::render_new(&stem, &date))?;
        tracing::info!(document = %name, "created note");
        Ok(name)
    }

    fn take_pick(&self) -> Result<ItemPick, WorkflowError> {
        match &self.state {
            State::ItemSelection(pick)
            | State::TargetSelection { pick, .. }
            | State::Confirmation { pick, .. } => Ok(pick.clone()),
            State::TargetSearch(search) => Ok(search.pick.clone()),
            State::PersonSelection { .. } | State::Success(_) => Err(WorkflowError::NoSelection),
        }
    }
}

fn scan_groups<S: DocumentStore + ?Sized>(store: &S) -> Result<Vec<PersonGroup>, WorkflowError> {
    let documents = store.list_incomplete_documents()?;
    Ok(person_groups(&documents))
}

fn has_extension(value: &str, extension: &str) -> bool {
    value
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case(extension))
}

fn wrap_next(cursor: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (cursor + 1) % len
    }
}

fn wrap_previous(cursor: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (cursor + len - 1) % len
    }
}
