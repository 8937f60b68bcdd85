// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

use super::{
    action_for_key, draw, footer_entries, footer_line, item_label, shell_single_quote, App,
    Status, TuiTheme,
};
use crate::model::{DocumentName, PersonKey, TaggedItem};
use crate::store::MemoryStore;
use crate::workflow::{Action, ItemPick, SearchMode, State, TargetSearch, Workflow};

const A_MD: &str = "# A\n- [ ] Fix bug to-talk-alice\n  - [ ] repro first\n";

fn app() -> App<MemoryStore> {
    let store = MemoryStore::with_documents([("a.md", A_MD), ("b.md", "- [ ] Budget to-talk-bob\n")]);
    App::new(Workflow::new(store).expect("workflow"), "true".to_owned(), TuiTheme::default())
}

fn press(app: &mut App<MemoryStore>, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App<MemoryStore>, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

fn render(app: &App<MemoryStore>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 16)).expect("terminal");
    terminal.draw(|frame| draw(frame, app)).expect("draw");
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn line_to_string(line: &ratatui::text::Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect::<String>()
}

fn search_state(mode: SearchMode) -> State {
    State::TargetSearch(TargetSearch {
        pick: ItemPick {
            person: PersonKey::new("alice").expect("person"),
            items: Vec::new(),
            selected: Vec::new(),
            cursor: 0,
        },
        mode,
        query: String::new(),
        results: Vec::new(),
        cursor: 0,
    })
}

#[test]
fn person_keys_map_to_navigation_and_undo() {
    let state = State::PersonSelection {
        groups: Vec::new(),
        cursor: 0,
    };
    assert_eq!(action_for_key(&state, KeyCode::Char('j')), Some(Action::Next));
    assert_eq!(action_for_key(&state, KeyCode::Up), Some(Action::Previous));
    assert_eq!(action_for_key(&state, KeyCode::Enter), Some(Action::Confirm));
    assert_eq!(action_for_key(&state, KeyCode::Char('u')), Some(Action::Undo));
    assert_eq!(action_for_key(&state, KeyCode::Char('q')), Some(Action::Quit));
    assert_eq!(action_for_key(&state, KeyCode::Char('z')), None);
}

#[test]
fn search_keys_depend_on_mode() {
    let insert = search_state(SearchMode::Insert);
    assert_eq!(action_for_key(&insert, KeyCode::Char('q')), Some(Action::SearchInput('q')));
    assert_eq!(action_for_key(&insert, KeyCode::Char('j')), Some(Action::SearchInput('j')));
    assert_eq!(action_for_key(&insert, KeyCode::Backspace), Some(Action::SearchBackspace));
    assert_eq!(action_for_key(&insert, KeyCode::Esc), Some(Action::EnterNormal));
    assert_eq!(action_for_key(&insert, KeyCode::Enter), Some(Action::Confirm));

    let normal = search_state(SearchMode::Normal);
    assert_eq!(action_for_key(&normal, KeyCode::Char('q')), Some(Action::Back));
    assert_eq!(action_for_key(&normal, KeyCode::Char('i')), Some(Action::EnterInsert));
    assert_eq!(action_for_key(&normal, KeyCode::Char('j')), Some(Action::Next));
    assert_eq!(action_for_key(&normal, KeyCode::Backspace), None);
}

#[test]
fn ctrl_c_quits_even_while_typing() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('/'));
    assert!(matches!(app.workflow.state(), State::TargetSearch(_)));

    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

    assert!(app.should_quit);
}

#[test]
fn renders_people_with_counts_and_hints() {
    let app = app();

    let screen = render(&app);

    assert!(screen.contains("People to talk to"), "{screen}");
    assert!(screen.contains("alice  1 item"), "{screen}");
    assert!(screen.contains("bob  1 item"), "{screen}");
    assert!(screen.contains("Undo:u"), "{screen}");
}

#[test]
fn rejected_action_shows_an_error_status() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('n'));
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.status, Some(Status::Error("no items selected".to_owned())));
    assert!(matches!(app.workflow.state(), State::ItemSelection(_)));
    assert!(render(&app).contains("Error: no items selected"));
}

#[test]
fn create_prompt_collects_a_name_and_moves_on() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('n'));
    assert!(app.prompt.is_some());
    assert!(render(&app).contains("New note name"));

    type_text(&mut app, "notez");
    press(&mut app, KeyCode::Backspace);
    type_text(&mut app, "s");
    press(&mut app, KeyCode::Enter);

    assert!(app.prompt.is_none());
    assert_eq!(app.status, Some(Status::Info("Created notes.md".to_owned())));
    let State::Confirmation { target, .. } = app.workflow.state() else {
        panic!("expected confirmation, got {}", app.workflow.state().name());
    };
    assert_eq!(target.as_str(), "notes.md");
    assert!(render(&app).contains("Move 1 item for alice into notes.md?"));
}

#[test]
fn escape_cancels_the_name_prompt() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('n'));
    type_text(&mut app, "draft");

    press(&mut app, KeyCode::Esc);

    assert!(app.prompt.is_none());
    assert!(matches!(app.workflow.state(), State::TargetSelection { .. }));
    assert_eq!(app.workflow.store().text("draft.md"), None);
}

#[test]
fn move_open_and_undo_through_keys() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('f'));
    type_text(&mut app, "b.md");
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('y'));

    assert!(matches!(app.workflow.state(), State::Success(_)));
    let screen = render(&app);
    assert!(screen.contains("Moved 1 item for alice to b.md"), "{screen}");
    assert!(screen.contains("Checked off in: a.md"), "{screen}");

    press(&mut app, KeyCode::Char('o'));
    assert!(app.take_external_action().is_none());
    assert_eq!(app.status, Some(Status::Error("b.md has no file on disk".to_owned())));

    press(&mut app, KeyCode::Char('u'));
    assert!(matches!(app.workflow.state(), State::PersonSelection { .. }));
    assert_eq!(app.workflow.store().text("a.md").as_deref(), Some(A_MD));
    assert_eq!(
        app.workflow.store().text("b.md").as_deref(),
        Some("- [ ] Budget to-talk-bob\n")
    );
}

#[test]
fn footer_drops_navigation_hints_when_compact() {
    let state = State::PersonSelection {
        groups: Vec::new(),
        cursor: 0,
    };
    let full = footer_entries(&state, false, false);
    let compact = footer_entries(&state, false, true);

    assert_eq!(full.len(), 4);
    assert_eq!(compact, [("OPEN", "Enter"), ("UNDO", "u"), ("QUIT", "q")]);
    assert_eq!(footer_entries(&state, true, false), [("CREATE", "Enter"), ("CANCEL", "Esc")]);
    assert_eq!(
        line_to_string(&footer_line(&state, false, true)),
        "tasklift | Open:Enter | Undo:u | Quit:q"
    );
}

#[test]
fn search_footer_names_the_quit_chord() {
    for mode in [SearchMode::Insert, SearchMode::Normal] {
        let state = search_state(mode);
        assert!(footer_entries(&state, false, true).contains(&("QUIT", "Ctrl-C")), "{mode:?}");
        assert_ne!(action_for_key(&state, KeyCode::Char('q')), Some(Action::Quit));
    }
    assert_eq!(
        line_to_string(&footer_line(&search_state(SearchMode::Insert), false, true)),
        "tasklift | Pick:Enter | Normal:Esc | Quit:Ctrl-C"
    );
}

#[test]
fn item_labels_hide_markers_and_tags() {
    let item = TaggedItem {
        source_document: DocumentName::new("a.md").expect("name"),
        line_number: 2,
        raw_text: "  - [ ] Call to-talk-alice vendor to-talk-bob".to_owned(),
        subtasks: Vec::new(),
    };
    assert_eq!(item_label(&item), "Call vendor");
}

#[test]
fn shell_single_quote_escapes_quotes() {
    assert_eq!(shell_single_quote("it's here"), "'it'\\''s here'");
}
