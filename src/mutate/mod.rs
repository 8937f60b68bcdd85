// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Verified edits against a single document.
//!
//! Every operation reads the whole document, checks its preconditions against the current
//! text, and rewrites the whole document. Nothing is written when a check fails.

use std::fmt;

use crate::model::{DocumentName, LineModification, TaggedItem};
use crate::scan::strip_tags;
use crate::store::{DocumentStore, StoreError};
use crate::text::{frontmatter_end, is_blank, join_lines, split_lines};

#[derive(Debug)]
pub enum MutateError {
    LineOutOfRange {
        document: DocumentName,
        line_number: usize,
        total_lines: usize,
    },
    PatternNotFound {
        document: DocumentName,
        line_number: usize,
        pattern: String,
        line: String,
    },
    ReplacementNoOp {
        document: DocumentName,
        line_number: usize,
        line: String,
    },
    VerificationFailed {
        document: DocumentName,
        line_number: usize,
        pattern: String,
        line: String,
    },
    Store(StoreError),
}

impl MutateError {
    /// Document the failing step targeted, when the error is tied to one.
    pub fn document(&self) -> Option<&DocumentName> {
        match self {
            Self::LineOutOfRange { document, .. }
            | Self::PatternNotFound { document, .. }
            | Self::ReplacementNoOp { document, .. }
            | Self::VerificationFailed { document, .. } => Some(document),
            Self::Store(_) => None,
        }
    }
}

impl fmt::Display for MutateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LineOutOfRange {
                document,
                line_number,
                total_lines,
            } => write!(
                f,
                "line {line_number} is out of range in {document} (document has {total_lines} lines)"
            ),
            Self::PatternNotFound {
                document,
                line_number,
                pattern,
                line,
            } => write!(
                f,
                "pattern {pattern:?} not found at {document}:{line_number} (line is {line:?})"
            ),
            Self::ReplacementNoOp {
                document,
                line_number,
                line,
            } => write!(f, "replacement left {document}:{line_number} unchanged ({line:?})"),
            Self::VerificationFailed {
                document,
                line_number,
                pattern,
                line,
            } => write!(
                f,
                "verification failed at {document}:{line_number}: {pattern:?} missing from {line:?}"
            ),
            Self::Store(source) => write!(f, "{source}"),
        }
    }
}

impl std::error::Error for MutateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(source) => Some(source),
            _ => None,
        }
    }
}

impl From<StoreError> for MutateError {
    fn from(source: StoreError) -> Self {
        Self::Store(source)
    }
}

/// Location of a block spliced into a document by [`insert_items`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedBlock {
    /// 0-based index of the first inserted line.
    pub index: usize,
    pub line_count: usize,
    pub lines: Vec<String>,
}

/// Replaces the first occurrence of `old_pattern` with `new_pattern` on one line (1-based).
///
/// The rest of the document is preserved byte for byte. Returns the full line text before and
/// after the edit.
pub fn replace_line<S: DocumentStore + ?Sized>(
    store: &S,
    document: &DocumentName,
    line_number: usize,
    old_pattern: &str,
    new_pattern: &str,
) -> Result<LineModification, MutateError> {
    let text = store.read_raw_text(document)?;
    let (lines, trailing_newline) = split_lines(&text);

    let total_lines = lines.len();
    if line_number == 0 || line_number > total_lines {
        return Err(MutateError::LineOutOfRange {
            document: document.clone(),
            line_number,
            total_lines,
        });
    }

    let idx = line_number - 1;
    let current = lines[idx];
    if old_pattern.is_empty() || !current.contains(old_pattern) {
        return Err(MutateError::PatternNotFound {
            document: document.clone(),
            line_number,
            pattern: old_pattern.to_owned(),
            line: current.to_owned(),
        });
    }

    let replaced = current.replacen(old_pattern, new_pattern, 1);
    if replaced == current {
        return Err(MutateError::ReplacementNoOp {
            document: document.clone(),
            line_number,
            line: current.to_owned(),
        });
    }
    if !replaced.contains(new_pattern) {
        return Err(MutateError::VerificationFailed {
            document: document.clone(),
            line_number,
            pattern: new_pattern.to_owned(),
            line: replaced,
        });
    }

    let updated = lines
        .iter()
        .enumerate()
        .map(|(i, line)| if i == idx { replaced.as_str() } else { *line })
        .collect::<Vec<_>>();
    store.write_raw_text(document, &join_lines(&updated, trailing_newline))?;
    tracing::debug!(%document, line_number, "replaced line");

    Ok(LineModification {
        line_number,
        old_text: current.to_owned(),
        new_text: replaced,
    })
}

/// Where relocated content goes: after a leading metadata block (and any blank lines after
/// it), else after the first top-level heading, else at the top.
pub fn insertion_point<S: AsRef<str>>(lines: &[S]) -> usize {
    if let Some(end) = frontmatter_end(lines) {
        let mut idx = end + 1;
        while lines.get(idx).is_some_and(|line| is_blank(line.as_ref())) {
            idx += 1;
        }
        return idx;
    }

    lines
        .iter()
        .position(|line| line.as_ref().starts_with("# "))
        .map_or(0, |idx| idx + 1)
}

/// The lines spliced in at `index`: an optional leading blank (only when the line currently at
/// `index` has content), each item tag-stripped followed by its subtasks verbatim (minus any
/// carriage return), and a trailing blank.
pub fn relocation_block<S: AsRef<str>>(
    lines: &[S],
    index: usize,
    items: &[TaggedItem],
) -> Vec<String> {
    if items.is_empty() {
        return Vec::new();
    }

    let mut block = Vec::new();
    if lines.get(index).is_some_and(|line| !is_blank(line.as_ref())) {
        block.push(String::new());
    }
    for item in items {
        block.push(strip_tags(&item.raw_text));
        block.extend(
            item.subtasks
                .iter()
                .map(|subtask| subtask.text.trim_end_matches('\r').to_owned()),
        );
    }
    block.push(String::new());
    block
}

/// Splices `items` (and their subtasks) into `document` at its [`insertion_point`].
///
/// A document whose first line ends in CRLF gets CRLF on every inserted line.
pub fn insert_items<S: DocumentStore + ?Sized>(
    store: &S,
    document: &DocumentName,
    items: &[TaggedItem],
) -> Result<InsertedBlock, MutateError> {
    let text = store.read_raw_text(document)?;
    let (lines, trailing_newline) = split_lines(&text);

    let index = insertion_point(&lines);
    let block = relocation_block(&lines, index, items);
    if block.is_empty() {
        return Ok(InsertedBlock {
            index,
            line_count: 0,
            lines: Vec::new(),
        });
    }

    let block = if lines.first().is_some_and(|line| line.ends_with('\r')) {
        block.into_iter().map(|line| line + "\r").collect()
    } else {
        block
    };

    let mut updated = lines.iter().map(|line| (*line).to_owned()).collect::<Vec<_>>();
    let line_count = block.len();
    updated.splice(index..index, block.iter().cloned());
    store.write_raw_text(document, &join_lines(&updated, trailing_newline))?;
    tracing::debug!(%document, index, line_count, "inserted relocation block");

    Ok(InsertedBlock {
        index,
        line_count,
        lines: block,
    })
}

/// Checks that `expected` still sits verbatim at the 0-based `start` of `document`.
pub fn verify_block<S: DocumentStore + ?Sized>(
    store: &S,
    document: &DocumentName,
    start: usize,
    expected: &[String],
) -> Result<(), MutateError> {
    let text = store.read_raw_text(document)?;
    let (lines, _) = split_lines(&text);

    for (offset, want) in expected.iter().enumerate() {
        let line_number = start + offset + 1;
        let Some(found) = lines.get(start + offset) else {
            return Err(MutateError::LineOutOfRange {
                document: document.clone(),
                line_number,
                total_lines: lines.len(),
            });
        };
        if *found != want.as_str() {
            return Err(MutateError::PatternNotFound {
                document: document.clone(),
                line_number,
                pattern: want.clone(),
                line: (*found).to_owned(),
            });
        }
    }
    Ok(())
}

/// Deletes `line_count` lines starting at the 0-based `start`, clamped to the document.
/// Returns how many lines were removed.
pub fn remove_lines<S: DocumentStore + ?Sized>(
    store: &S,
    document: &DocumentName,
    start: usize,
    line_count: usize,
) -> Result<usize, MutateError> {
    let text = store.read_raw_text(document)?;
    let (mut lines, trailing_newline) = split_lines(&text);

    let start = start.min(lines.len());
    let end = start.saturating_add(line_count).min(lines.len());
    if start == end {
        return Ok(0);
    }

    lines.drain(start..end);
    store.write_raw_text(document, &join_lines(&lines, trailing_newline))?;
    tracing::debug!(%document, start, removed = end - start, "removed lines");

    Ok(end - start)
}
