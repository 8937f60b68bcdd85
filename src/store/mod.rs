// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Document persistence.
//!
//! The relocation engine only talks to documents through [`DocumentStore`]. [`NotesFolder`]
//! backs it with a directory of plain-text files; [`MemoryStore`] keeps everything in memory
//! (demo mode and tests).

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::model::{Document, DocumentName, IdError};

pub mod memory;
pub mod notes_folder;
pub mod search;

pub use memory::MemoryStore;
pub use notes_folder::{NotesFolder, WriteDurability};

pub trait DocumentStore {
    /// Every document whose metadata header does not mark it as completed, sorted by name.
    fn list_incomplete_documents(&self) -> Result<Vec<Document>, StoreError>;

    fn load_document(&self, name: &DocumentName) -> Result<Document, StoreError>;

    fn read_raw_text(&self, name: &DocumentName) -> Result<String, StoreError>;

    /// Replaces the whole document text.
    fn write_raw_text(&self, name: &DocumentName, text: &str) -> Result<(), StoreError>;

    fn create_document(
        &self,
        name: &DocumentName,
        initial_content: &str,
    ) -> Result<Document, StoreError>;

    /// Case-insensitive substring match over incomplete documents' names and titles.
    fn search_documents(&self, query: &str) -> Result<Vec<Document>, StoreError> {
        let documents = self.list_incomplete_documents()?;
        Ok(search::rank_documents(documents, query))
    }

    /// Extension (without the dot) new document names get when they carry none.
    fn document_extension(&self) -> &str {
        "md"
    }

    /// On-disk location of a document, for handing it to an external editor.
    fn document_path(&self, _name: &DocumentName) -> Option<PathBuf> {
        None
    }
}

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    InvalidName {
        value: String,
        source: IdError,
    },
    NotFound {
        name: DocumentName,
    },
    AlreadyExists {
        name: DocumentName,
    },
    SymlinkRefused {
        path: PathBuf,
    },
    WriteRejected {
        name: DocumentName,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::InvalidName { value, source } => {
                write!(f, "invalid document name {value:?}: {source}")
            }
            Self::NotFound { name } => write!(f, "document not found: {name}"),
            Self::AlreadyExists { name } => write!(f, "document already exists: {name}"),
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
            Self::WriteRejected { name } => write!(f, "write rejected for document {name}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidName { source, .. } => Some(source),
            Self::NotFound { .. } => None,
            Self::AlreadyExists { .. } => None,
            Self::SymlinkRefused { .. } => None,
            Self::WriteRejected { .. } => None,
        }
    }
}
