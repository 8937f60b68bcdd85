// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Documents as handed out by the store, tagged task lines found by the scanner, and the
//! relocation transactions recorded for undo.

pub mod document;
pub mod ids;
pub mod item;
pub mod transaction;

pub use document::{Document, Header};
pub use ids::{DocumentName, Id, IdError, PersonKey};
pub use item::{PersonGroup, Subtask, TaggedItem};
pub use transaction::{LineModification, RelocationTransaction, UndoStack};
