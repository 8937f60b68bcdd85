// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use crate::model::{DocumentName, PersonKey};

/// A line nested under a tagged task (deeper indentation, no blank line in between).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub line_number: usize,
    pub indent: usize,
    pub text: String,
}

/// One open task line carrying at least one recipient tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedItem {
    pub source_document: DocumentName,
    /// 1-based line number at scan time.
    pub line_number: usize,
    pub raw_text: String,
    pub subtasks: Vec<Subtask>,
}

impl TaggedItem {
    /// Number of lines this item occupies when relocated (the task plus its subtasks).
    pub fn line_count(&self) -> usize {
        1 + self.subtasks.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonGroup {
    pub key: PersonKey,
    pub items: Vec<TaggedItem>,
}

impl PersonGroup {
    pub fn count(&self) -> usize {
        self.items.len()
    }
}
