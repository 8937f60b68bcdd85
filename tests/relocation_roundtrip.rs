// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Move and undo against real files.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use tasklift::model::{DocumentName, PersonKey, UndoStack};
use tasklift::relocate::{relocate, undo_last, RelocateError};
use tasklift::scan::scan_documents;
use tasklift::store::{DocumentStore, NotesFolder, WriteDurability};
use tasklift::workflow::{Action, State, Workflow};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("tasklift-it-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, name: &str, content: &str) {
        fs::write(self.path.join(name), content).expect("write note");
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path.join(name)).expect("read note")
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

const INBOX: &str = "# Inbox\r\n\r\n- [ ] Renew lease to-talk-alice\r\n    - [ ] find the contract\r\n- [ ] Order chairs\r\n";
const STANDUP: &str = "---\ntitle: Standup\n---\n- [ ] Demo the importer to-talk-ALICE to-talk-bob";
const ALICE: &str = "---\ntitle: 1:1 Alice\n---\n\nNotes from last week.\n";

fn seeded(prefix: &str) -> TempDir {
    let tmp = TempDir::new(prefix);
    tmp.write("inbox.md", INBOX);
    tmp.write("standup.md", STANDUP);
    tmp.write("alice.md", ALICE);
    tmp
}

#[test]
fn move_then_undo_restores_files_byte_for_byte() {
    let tmp = seeded("roundtrip");
    let folder = NotesFolder::new(tmp.path()).with_durability(WriteDurability::Durable);
    let documents = folder.list_incomplete_documents().expect("list");
    let alice = PersonKey::new("alice").expect("person");
    let items = scan_documents(&documents).remove(&alice).expect("alice items");
    let target = DocumentName::new("alice.md").expect("name");
    let mut undo = UndoStack::new();

    let summary = relocate(&folder, &mut undo, &alice, &target, &items).expect("move");

    assert_eq!(summary.items_moved, 2);
    assert_eq!(
        tmp.read("alice.md"),
        "---\ntitle: 1:1 Alice\n---\n\n\n- [ ] Renew lease\n    - [ ] find the contract\n- [ ] Demo the importer\n\nNotes from last week.\n"
    );
    assert_eq!(
        tmp.read("inbox.md"),
        "# Inbox\r\n\r\n- [x] Renew lease to-talk-alice\r\n    - [x] find the contract\r\n- [ ] Order chairs\r\n"
    );
    assert_eq!(tmp.read("standup.md"), "---\ntitle: Standup\n---\n- [x] Demo the importer to-talk-ALICE to-talk-bob");

    undo_last(&folder, &mut undo).expect("undo");

    assert_eq!(tmp.read("inbox.md"), INBOX);
    assert_eq!(tmp.read("standup.md"), STANDUP);
    assert_eq!(tmp.read("alice.md"), ALICE);
    let leftovers = fs::read_dir(tmp.path()).expect("read dir").count();
    assert_eq!(leftovers, 3);
}

#[test]
fn missing_source_rolls_the_target_back() {
    let tmp = seeded("rollback");
    let folder = NotesFolder::new(tmp.path());
    let documents = folder.list_incomplete_documents().expect("list");
    let alice = PersonKey::new("alice").expect("person");
    let items = scan_documents(&documents).remove(&alice).expect("alice items");
    fs::remove_file(tmp.path().join("standup.md")).expect("remove standup");
    let mut undo = UndoStack::new();

    let err = relocate(&folder, &mut undo, &alice, &DocumentName::new("alice.md").expect("name"), &items)
        .unwrap_err();

    assert!(matches!(err, RelocateError::Mutate(_)), "{err}");
    assert_eq!(tmp.read("alice.md"), ALICE);
    assert_eq!(tmp.read("inbox.md"), INBOX);
    assert!(undo.is_empty());
}

#[test]
fn workflow_creates_a_note_and_moves_into_it() {
    let tmp = seeded("workflow");
    let folder = NotesFolder::new(tmp.path());
    let mut workflow = Workflow::new(folder).expect("workflow");

    for action in [
        Action::Next,
        Action::Confirm,
        Action::Confirm,
        Action::CreateNew,
        Action::NewDocumentName("bob-sync".to_owned()),
        Action::Confirm,
    ] {
        let outcome = workflow.handle(action);
        assert!(outcome.error.is_none(), "{:?}", outcome.error);
    }

    assert!(matches!(workflow.state(), State::Success(_)));
    let created = tmp.read("bob-sync.md");
    assert!(created.starts_with("---\ntitle: bob-sync\ndate: "), "{created:?}");
    assert!(created.ends_with("---\n- [ ] Demo the importer\n\n"), "{created:?}");
    assert!(tmp.read("standup.md").contains("- [x] Demo the importer"));

    let outcome = workflow.handle(Action::Undo);
    assert!(outcome.error.is_none(), "{:?}", outcome.error);
    assert_eq!(tmp.read("standup.md"), STANDUP);
    assert!(tmp.read("bob-sync.md").ends_with("---\n"));
}
