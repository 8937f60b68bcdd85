// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Document, DocumentName};
use crate::store::{DocumentStore, StoreError};

/// In-memory document store.
///
/// Backs `--demo` sessions and tests. Writes to individual documents can be rejected on demand
/// to exercise failure paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RefCell<BTreeMap<DocumentName, String>>,
    rejected_writes: RefCell<BTreeSet<DocumentName>>,
    write_count: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents<'a>(documents: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        for (name, content) in documents {
            match DocumentName::new(name) {
                Ok(name) => {
                    store.documents.borrow_mut().insert(name, content.to_owned());
                }
                Err(err) => tracing::warn!(name, %err, "skipping invalid document name"),
            }
        }
        store
    }

    /// A small set of notes for `--demo` sessions.
    pub fn demo() -> Self {
        Self::with_documents([
            (
                "standup.md",
                "---\ntitle: Standup notes\n---\n\n- [ ] Ask about the release date to-talk-alice\n  - [ ] check the changelog first\n  - staging is frozen\n- [ ] Pair on flaky test to-talk-bob to-talk-alice\n- [x] Send slides to-talk-bob\n",
            ),
            (
                "planning.md",
                "# Planning\n\n- [ ] Budget for Q3 to-talk-Carol\n- [ ] Offsite venue to-talk-alice\n",
            ),
            ("one-on-one-alice.md", "---\ntitle: 1:1 Alice\n---\n"),
            ("archive.md", "---\ntitle: Archive\nstatus: archived\n---\n- [ ] Old thing to-talk-alice\n"),
        ])
    }

    pub fn insert(&self, name: DocumentName, content: impl Into<String>) {
        self.documents.borrow_mut().insert(name, content.into());
    }

    /// Current text of a document, if present.
    pub fn text(&self, name: &str) -> Option<String> {
        self.documents.borrow().get(name).cloned()
    }

    pub fn reject_writes_to(&self, name: &DocumentName) {
        self.rejected_writes.borrow_mut().insert(name.clone());
    }

    pub fn allow_writes_to(&self, name: &DocumentName) {
        self.rejected_writes.borrow_mut().remove(name);
    }

    /// Number of successful writes (including creations) so far.
    pub fn write_count(&self) -> usize {
        self.write_count.get()
    }

    fn bump_writes(&self) {
        self.write_count.set(self.write_count.get() + 1);
    }
}

impl DocumentStore for MemoryStore {
    fn list_incomplete_documents(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .documents
            .borrow()
            .iter()
            .map(|(name, content)| Document::new(name.clone(), content.clone()))
            .filter(|document| !document.is_completed())
            .collect())
    }

    fn load_document(&self, name: &DocumentName) -> Result<Document, StoreError> {
        let content = self.read_raw_text(name)?;
        Ok(Document::new(name.clone(), content))
    }

    fn read_raw_text(&self, name: &DocumentName) -> Result<String, StoreError> {
        self.documents
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { name: name.clone() })
    }

    fn write_raw_text(&self, name: &DocumentName, text: &str) -> Result<(), StoreError> {
        if self.rejected_writes.borrow().contains(name) {
            return Err(StoreError::WriteRejected { name: name.clone() });
        }
        let mut documents = self.documents.borrow_mut();
        let Some(content) = documents.get_mut(name) else {
            return Err(StoreError::NotFound { name: name.clone() });
        };
        text.clone_into(content);
        drop(documents);
        self.bump_writes();
        Ok(())
    }

    fn create_document(
        &self,
        name: &DocumentName,
        initial_content: &str,
    ) -> Result<Document, StoreError> {
        let mut documents = self.documents.borrow_mut();
        if documents.contains_key(name) {
            return Err(StoreError::AlreadyExists { name: name.clone() });
        }
        documents.insert(name.clone(), initial_content.to_owned());
        drop(documents);
        self.bump_writes();
        Ok(Document::new(name.clone(), initial_content))
    }
}
