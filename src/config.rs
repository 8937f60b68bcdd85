// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Optional per-folder settings read from `tasklift.json`.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "tasklift.json";
pub const DEFAULT_EDITOR: &str = "vi";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Shell command used to open notes; the path is appended.
    pub editor: Option<String>,
    pub document_extension: Option<String>,
    pub durable_writes: bool,
    pub log_file: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl Config {
    /// Reads `tasklift.json` from `dir`. A missing file yields the defaults.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Io { path, source }),
        };
        let config = Self::parse(&text, &path)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(extension) = config.document_extension.take() {
            let extension = extension.trim().trim_start_matches('.').to_owned();
            if extension.is_empty() || extension.contains(['/', '\\', '.']) {
                return Err(ConfigError::InvalidExtension {
                    path: path.to_path_buf(),
                    value: extension,
                });
            }
            config.document_extension = Some(extension);
        }
        Ok(config)
    }

    pub fn document_extension(&self) -> &str {
        self.document_extension.as_deref().unwrap_or("md")
    }

    /// Editor command: the configured one, else `$VISUAL`, else `$EDITOR`, else `vi`.
    pub fn editor_command(&self) -> String {
        resolve_editor(
            self.editor.as_deref(),
            std::env::var("VISUAL").ok().as_deref(),
            std::env::var("EDITOR").ok().as_deref(),
        )
    }
}

fn resolve_editor(configured: Option<&str>, visual: Option<&str>, editor: Option<&str>) -> String {
    [configured, visual, editor]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_EDITOR)
        .to_owned()
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    InvalidExtension { path: PathBuf, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Parse { path, source } => write!(f, "invalid config {}: {source}", path.display()),
            Self::InvalidExtension { path, value } => {
                write!(f, "invalid document_extension {value:?} in {}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidExtension { .. } => None,
        }
    }
}
