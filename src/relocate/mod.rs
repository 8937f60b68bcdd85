// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cross-document relocation transactions and their undo.
//!
//! A move first splices the selected items into the target, then closes each item's checkbox
//! at its origin. Every edit records the exact line text before and after, so a failed move is
//! rolled back and a finished one undone by replaying those edits in reverse against the same
//! lines, independent of unrelated edits elsewhere in the documents.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use chrono::Local;

use crate::model::{
    DocumentName, LineModification, PersonKey, RelocationTransaction, TaggedItem, UndoStack,
};
use crate::mutate::{insert_items, remove_lines, replace_line, verify_block, InsertedBlock, MutateError};
use crate::store::DocumentStore;
use crate::text::{is_open_task, CLOSED_CHECKBOX, OPEN_CHECKBOX};

#[derive(Debug)]
pub enum RelocateError {
    NoItems,
    /// A step failed; everything already applied was rolled back.
    Mutate(MutateError),
}

impl fmt::Display for RelocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoItems => f.write_str("no items to move"),
            Self::Mutate(source) => write!(f, "move rolled back: {source}"),
        }
    }
}

impl std::error::Error for RelocateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NoItems => None,
            Self::Mutate(source) => Some(source),
        }
    }
}

#[derive(Debug)]
pub enum UndoError {
    NothingToUndo,
    /// Reversal stopped at `document` (and `line_number`, for checkbox edits). Steps before
    /// it stay reverted.
    StepFailed {
        document: DocumentName,
        line_number: Option<usize>,
        source: MutateError,
    },
}

impl fmt::Display for UndoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToUndo => f.write_str("nothing to undo"),
            Self::StepFailed {
                document,
                line_number: Some(line_number),
                source,
            } => write!(f, "undo failed at {document}:{line_number}: {source}"),
            Self::StepFailed {
                document,
                line_number: None,
                source,
            } => write!(f, "undo failed removing moved lines from {document}: {source}"),
        }
    }
}

impl std::error::Error for UndoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NothingToUndo => None,
            Self::StepFailed { source, .. } => Some(source),
        }
    }
}

/// What a finished move did, for status display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSummary {
    pub person: PersonKey,
    pub target: DocumentName,
    pub items_moved: usize,
    pub lines_inserted: usize,
    pub insertion_line: usize,
    pub source_documents: Vec<DocumentName>,
}

impl MoveSummary {
    fn from_transaction(transaction: &RelocationTransaction) -> Self {
        Self {
            person: transaction.person.clone(),
            target: transaction.target_document.clone(),
            items_moved: transaction.items.len(),
            lines_inserted: transaction.inserted_line_count,
            insertion_line: transaction.target_insertion_line,
            source_documents: transaction.source_line_modifications.keys().cloned().collect(),
        }
    }
}

/// Moves `items` into `target` and closes them at their origin, recording the transaction on
/// `undo`.
///
/// Either every edit lands or none does: when a checkbox edit fails, the inserted block is
/// removed and earlier edits are reverted before the error is returned.
pub fn relocate<S: DocumentStore + ?Sized>(
    store: &S,
    undo: &mut UndoStack,
    person: &PersonKey,
    target: &DocumentName,
    items: &[TaggedItem],
) -> Result<MoveSummary, RelocateError> {
    if items.is_empty() {
        return Err(RelocateError::NoItems);
    }

    let block = insert_items(store, target, items).map_err(RelocateError::Mutate)?;

    let mut modifications = Vec::<(DocumentName, LineModification)>::new();
    if let Err(source) = close_items(store, target, &block, items, &mut modifications) {
        tracing::warn!(%target, error = %source, "move failed; rolling back");
        rollback(store, target, &block, &modifications);
        return Err(RelocateError::Mutate(source));
    }

    let mut source_line_modifications = BTreeMap::<DocumentName, Vec<LineModification>>::new();
    for (document, modification) in modifications {
        source_line_modifications.entry(document).or_default().push(modification);
    }

    let transaction = RelocationTransaction {
        timestamp: Local::now(),
        person: person.clone(),
        items: items.to_vec(),
        target_document: target.clone(),
        target_insertion_line: block.index,
        inserted_line_count: block.line_count,
        inserted_lines: block.lines,
        source_line_modifications,
    };
    tracing::info!(
        %person,
        %target,
        items = transaction.items.len(),
        lines = transaction.inserted_line_count,
        edits = transaction.modification_count(),
        "moved items"
    );
    if tracing::enabled!(tracing::Level::DEBUG) {
        match serde_json::to_string(&transaction) {
            Ok(json) => tracing::debug!(transaction = %json, "recorded transaction"),
            Err(err) => tracing::debug!(%err, "cannot serialize transaction"),
        }
    }

    let summary = MoveSummary::from_transaction(&transaction);
    undo.push(transaction);
    Ok(summary)
}

/// Reverses the most recent move: removes the inserted block from the target, then reopens
/// every checkbox the move closed.
pub fn undo_last<S: DocumentStore + ?Sized>(
    store: &S,
    undo: &mut UndoStack,
) -> Result<RelocationTransaction, UndoError> {
    let transaction = undo.pop().ok_or(UndoError::NothingToUndo)?;
    let target = &transaction.target_document;
    let block_failed = |source| UndoError::StepFailed {
        document: target.clone(),
        line_number: None,
        source,
    };

    verify_block(store, target, transaction.target_insertion_line, &transaction.inserted_lines)
        .map_err(block_failed)?;
    remove_lines(
        store,
        target,
        transaction.target_insertion_line,
        transaction.inserted_line_count,
    )
    .map_err(block_failed)?;

    for (document, modifications) in &transaction.source_line_modifications {
        for modification in modifications.iter().rev() {
            let line_number = line_after_block_removed(
                document,
                modification.line_number,
                target,
                transaction.target_insertion_line,
                transaction.inserted_line_count,
            );
            replace_line(
                store,
                document,
                line_number,
                &modification.new_text,
                &modification.old_text,
            )
            .map_err(|source| UndoError::StepFailed {
                document: document.clone(),
                line_number: Some(line_number),
                source,
            })?;
        }
    }

    tracing::info!(
        person = %transaction.person,
        %target,
        items = transaction.items.len(),
        "undid move"
    );
    Ok(transaction)
}

fn close_items<S: DocumentStore + ?Sized>(
    store: &S,
    target: &DocumentName,
    block: &InsertedBlock,
    items: &[TaggedItem],
    modifications: &mut Vec<(DocumentName, LineModification)>,
) -> Result<(), MutateError> {
    let mut closed = HashSet::<(DocumentName, usize)>::new();
    for item in items {
        let document = &item.source_document;
        let lines = std::iter::once((item.line_number, item.raw_text.as_str())).chain(
            item.subtasks
                .iter()
                .filter(|subtask| is_open_task(&subtask.text))
                .map(|subtask| (subtask.line_number, subtask.text.as_str())),
        );

        for (line_number, text) in lines {
            let line_number = line_after_block_inserted(document, line_number, target, block);
            if !closed.insert((document.clone(), line_number)) {
                continue;
            }
            let closed_text = text.replacen(OPEN_CHECKBOX, CLOSED_CHECKBOX, 1);
            let modification = replace_line(store, document, line_number, text, &closed_text)?;
            modifications.push((document.clone(), modification));
        }
    }
    Ok(())
}

fn rollback<S: DocumentStore + ?Sized>(
    store: &S,
    target: &DocumentName,
    block: &InsertedBlock,
    modifications: &[(DocumentName, LineModification)],
) {
    if let Err(err) = remove_lines(store, target, block.index, block.line_count) {
        tracing::error!(%target, %err, "rollback could not remove inserted lines");
    }

    for (document, modification) in modifications.iter().rev() {
        let line_number = line_after_block_removed(
            document,
            modification.line_number,
            target,
            block.index,
            block.line_count,
        );
        if let Err(err) =
            replace_line(store, document, line_number, &modification.new_text, &modification.old_text)
        {
            tracing::error!(%document, line_number, %err, "rollback could not reopen line");
        }
    }
}

/// Line numbers in the target shift down by the block size below the insertion point.
fn line_after_block_inserted(
    document: &DocumentName,
    line_number: usize,
    target: &DocumentName,
    block: &InsertedBlock,
) -> usize {
    if document == target && line_number > block.index {
        line_number + block.line_count
    } else {
        line_number
    }
}

fn line_after_block_removed(
    document: &DocumentName,
    line_number: usize,
    target: &DocumentName,
    index: usize,
    line_count: usize,
) -> usize {
    if document == target && line_number > index + line_count {
        line_number - line_count
    } else {
        line_number
    }
}
