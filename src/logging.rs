// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Diagnostic logging to a file.
//!
//! The terminal belongs to the UI, so events go to a log file and nowhere else. Without a log
//! file no subscriber is installed and events are dropped.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV: &str = "TASKLIFT_LOG";
pub const DEFAULT_FILTER: &str = "info";

/// Picks the first directive string that parses: the environment, then the configured one,
/// then [`DEFAULT_FILTER`].
pub fn filter_from(env_value: Option<&str>, configured: Option<&str>) -> EnvFilter {
    [env_value, configured]
        .into_iter()
        .flatten()
        .filter(|value| !value.trim().is_empty())
        .find_map(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber, appending plain-text events to `path`.
pub fn init_file_logging(path: &Path, configured_filter: Option<&str>) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let env_value = std::env::var(LOG_ENV).ok();
    let filter = filter_from(env_value.as_deref(), configured_filter);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    tracing::info!(path = %path.display(), version = env!("CARGO_PKG_VERSION"), "logging started");
    Ok(())
}
