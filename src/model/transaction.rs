// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::model::{DocumentName, PersonKey, TaggedItem};

/// One verified single-line edit: the exact line text before and after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineModification {
    pub line_number: usize,
    pub old_text: String,
    pub new_text: String,
}

/// A fully applied relocation, kept so it can be reversed exactly.
///
/// Only built once every recorded edit has been written; a transaction never describes a
/// partially applied move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationTransaction {
    pub timestamp: DateTime<Local>,
    pub person: PersonKey,
    pub items: Vec<TaggedItem>,
    pub target_document: DocumentName,
    /// 0-based index of the first inserted line in the target.
    pub target_insertion_line: usize,
    pub inserted_line_count: usize,
    /// Exact text of the inserted block, checked before the block is removed again.
    pub inserted_lines: Vec<String>,
    pub source_line_modifications: BTreeMap<DocumentName, Vec<LineModification>>,
}

impl RelocationTransaction {
    pub fn modification_count(&self) -> usize {
        self.source_line_modifications.values().map(Vec::len).sum()
    }
}

/// Completed relocations of the current run, most recent last.
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    transactions: Vec<RelocationTransaction>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transaction: RelocationTransaction) {
        self.transactions.push(transaction);
    }

    pub fn pop(&mut self) -> Option<RelocationTransaction> {
        self.transactions.pop()
    }

    pub fn peek(&self) -> Option<&RelocationTransaction> {
        self.transactions.last()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
