// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use tasklift::model::{Document, DocumentName};
use tasklift::store::MemoryStore;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

const PEOPLE: [&str; 6] = ["alice", "Bob", "carol", "dave", "erin", "frank"];

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("tasklift_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    fn shape(self) -> (usize, usize) {
        match self {
            Self::Small => (8, 40),
            Self::Medium => (64, 200),
            Self::Large => (256, 800),
        }
    }
}

/// `(file name, text)` pairs: a header, a heading, then task lines where every third carries
/// a recipient tag and every fifth tagged task has two nested lines.
pub fn notes(case: Case) -> Vec<(String, String)> {
    let (documents, lines) = case.shape();
    (0..documents)
        .map(|doc| {
            let mut text = format!("---\ntitle: Note {doc}\n---\n# Note {doc}\n\n");
            let mut tagged = 0usize;
            for line in 0..lines {
                if line % 3 == 0 {
                    let person = PEOPLE[(doc + line) % PEOPLE.len()];
                    text.push_str(&format!("- [ ] follow up {doc}.{line} to-talk-{person}\n"));
                    if tagged % 5 == 0 {
                        text.push_str("  - [ ] nested check\n  - context\n");
                    }
                    tagged += 1;
                } else if line % 7 == 0 {
                    text.push('\n');
                } else {
                    text.push_str(&format!("- [ ] plain task {doc}.{line}\n"));
                }
            }
            (format!("note-{doc:04}.md"), text)
        })
        .collect()
}

pub fn documents(case: Case) -> Vec<Document> {
    notes(case)
        .into_iter()
        .map(|(name, text)| Document::new(DocumentName::new(name).expect("document name"), text))
        .collect()
}

pub fn memory_store(case: Case) -> MemoryStore {
    let notes = notes(case);
    MemoryStore::with_documents(notes.iter().map(|(name, text)| (name.as_str(), text.as_str())))
}

pub fn write_folder(case: Case, dir: &Path) {
    for (name, text) in notes(case) {
        std::fs::write(dir.join(name), text).expect("write fixture note");
    }
}
