// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::{Document, DocumentName};
use crate::store::{DocumentStore, StoreError};

const DEFAULT_EXTENSION: &str = "md";

/// A flat directory of plain-text documents.
#[derive(Debug, Clone)]
pub struct NotesFolder {
    root: PathBuf,
    extension: String,
    durability: WriteDurability,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to stable storage where
    /// possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

impl NotesFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_owned(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_owned();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn path_for(&self, name: &DocumentName) -> PathBuf {
        self.root.join(name.as_str())
    }

    /// Every document in the folder, completed or not, sorted by name.
    pub fn list_documents(&self) -> Result<Vec<Document>, StoreError> {
        let entries = fs::read_dir(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut documents = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: self.root.clone(),
                source,
            })?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            if !file_type.is_file() || !self.has_document_extension(&path) {
                continue;
            }
            let Some(name) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| DocumentName::new(name).ok())
            else {
                continue;
            };

            let content = read_text(&path)?;
            documents.push(Document::new(name, content));
        }

        documents.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(documents)
    }

    fn has_document_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    fn existing_path(&self, name: &DocumentName) -> Result<PathBuf, StoreError> {
        let path = self.path_for(name);
        match fs::symlink_metadata(&path) {
            Ok(md) if md.is_file() => Ok(path),
            Ok(md) if md.file_type().is_symlink() => Err(StoreError::SymlinkRefused { path }),
            Ok(_) => Err(StoreError::NotFound { name: name.clone() }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::NotFound { name: name.clone() })
            }
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

impl DocumentStore for NotesFolder {
    fn list_incomplete_documents(&self) -> Result<Vec<Document>, StoreError> {
        let mut documents = self.list_documents()?;
        documents.retain(|document| !document.is_completed());
        Ok(documents)
    }

    fn load_document(&self, name: &DocumentName) -> Result<Document, StoreError> {
        let content = self.read_raw_text(name)?;
        Ok(Document::new(name.clone(), content))
    }

    fn read_raw_text(&self, name: &DocumentName) -> Result<String, StoreError> {
        let path = self.existing_path(name)?;
        read_text(&path)
    }

    fn write_raw_text(&self, name: &DocumentName, text: &str) -> Result<(), StoreError> {
        let path = self.existing_path(name)?;
        write_atomic_in_folder(&self.root, &path, text.as_bytes(), self.durability)
    }

    fn create_document(
        &self,
        name: &DocumentName,
        initial_content: &str,
    ) -> Result<Document, StoreError> {
        let path = self.path_for(name);
        match fs::symlink_metadata(&path) {
            Ok(_) => return Err(StoreError::AlreadyExists { name: name.clone() }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(StoreError::Io { path, source }),
        }

        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;
        write_atomic_in_folder(&self.root, &path, initial_content.as_bytes(), self.durability)?;
        Ok(Document::new(name.clone(), initial_content))
    }

    fn document_extension(&self) -> &str {
        &self.extension
    }

    fn document_path(&self, name: &DocumentName) -> Option<PathBuf> {
        Some(self.path_for(name))
    }
}

fn read_text(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// Extracted atomic write helpers.
include!("notes_folder/helpers.rs");
