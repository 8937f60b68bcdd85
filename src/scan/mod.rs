// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Recipient-tag scanning.
//!
//! Finds open task lines carrying `to-talk-<name>` tags, together with the lines nested under
//! them, and groups them by normalized recipient.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Document, PersonGroup, PersonKey, Subtask, TaggedItem};
use crate::text::{indentation, is_blank, is_open_task, split_lines, CLOSED_CHECKBOX, OPEN_CHECKBOX};

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"(?i)\bto-talk-(\w+)").expect("valid tag pattern"))
}

fn strip_regex() -> &'static Regex {
    static STRIP: OnceLock<Regex> = OnceLock::new();
    STRIP.get_or_init(|| Regex::new(r"(?i)[ \t]*\bto-talk-\w+").expect("valid strip pattern"))
}

/// Distinct normalized recipients tagged on `line`, in order of first appearance.
pub fn recipients(line: &str) -> Vec<PersonKey> {
    let mut keys = Vec::<PersonKey>::new();
    for caps in tag_regex().captures_iter(line) {
        let Some(raw) = caps.get(1) else {
            continue;
        };
        let Ok(key) = PersonKey::normalize(raw.as_str()) else {
            continue;
        };
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// Removes every recipient tag from `line` and trims it, keeping a leading checkbox marker.
pub fn strip_tags(line: &str) -> String {
    let trimmed = line.trim();
    let (marker, rest) = if let Some(rest) = trimmed.strip_prefix(OPEN_CHECKBOX) {
        (OPEN_CHECKBOX, rest)
    } else if let Some(rest) = trimmed.strip_prefix(CLOSED_CHECKBOX) {
        (CLOSED_CHECKBOX, rest)
    } else {
        ("", trimmed)
    };

    let rest = strip_regex().replace_all(rest, "");
    let rest = rest.trim();
    if rest.is_empty() {
        return marker.trim_end().to_owned();
    }
    format!("{marker}{rest}")
}

/// Lines nested under the line at `parent_idx` (0-based): strictly deeper indentation, stopping
/// at the first blank line or the first line at or above the parent's depth.
pub fn extract_subtasks(lines: &[&str], parent_idx: usize) -> Vec<Subtask> {
    let Some(parent) = lines.get(parent_idx) else {
        return Vec::new();
    };
    let parent_indent = indentation(parent);

    let mut subtasks = Vec::new();
    for (idx, line) in lines.iter().enumerate().skip(parent_idx + 1) {
        if is_blank(line) {
            break;
        }
        let indent = indentation(line);
        if indent <= parent_indent {
            break;
        }
        subtasks.push(Subtask {
            line_number: idx + 1,
            indent,
            text: (*line).to_owned(),
        });
    }
    subtasks
}

/// Tagged open items of a single document, each paired with the recipients it is tagged for.
pub fn scan_document(document: &Document) -> Vec<(Vec<PersonKey>, TaggedItem)> {
    let (lines, _) = split_lines(document.content());
    let mut out = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if !is_open_task(line) {
            continue;
        }
        let keys = recipients(line);
        if keys.is_empty() {
            continue;
        }
        let item = TaggedItem {
            source_document: document.name().clone(),
            line_number: idx + 1,
            raw_text: (*line).to_owned(),
            subtasks: extract_subtasks(&lines, idx),
        };
        out.push((keys, item));
    }
    out
}

/// Maps every recipient to the open items tagged for them, across `documents`.
pub fn scan_documents(documents: &[Document]) -> BTreeMap<PersonKey, Vec<TaggedItem>> {
    let mut by_person = BTreeMap::<PersonKey, Vec<TaggedItem>>::new();
    for document in documents {
        for (keys, item) in scan_document(document) {
            for key in keys {
                by_person.entry(key).or_default().push(item.clone());
            }
        }
    }
    tracing::debug!(
        documents = documents.len(),
        people = by_person.len(),
        "scanned documents for recipient tags"
    );
    by_person
}

/// Person groups sorted alphabetically by key.
pub fn person_groups(documents: &[Document]) -> Vec<PersonGroup> {
    scan_documents(documents)
        .into_iter()
        .map(|(key, items)| PersonGroup { key, items })
        .collect()
}
