// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::model::DocumentName;
use crate::text::{frontmatter_end, split_lines, HEADER_DELIMITER};

/// Parsed metadata header: the `key: value` lines of a leading `---` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    fields: BTreeMap<String, String>,
}

impl Header {
    /// Parses the header of `content`, if the document starts with a closed delimiter block.
    pub fn parse(content: &str) -> Option<Self> {
        let (lines, _) = split_lines(content);
        let end = frontmatter_end(&lines)?;

        let mut fields = BTreeMap::new();
        for line in &lines[1..end] {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            if key.is_empty() {
                continue;
            }
            let value = value.trim().trim_matches('"').trim_matches('\'').to_owned();
            fields.insert(key, value);
        }
        Some(Self { fields })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn is_completed(&self) -> bool {
        let done = self
            .get("done")
            .is_some_and(|value| value.eq_ignore_ascii_case("true") || value == "yes");
        let status = self.get("status").is_some_and(|value| {
            matches!(value.to_ascii_lowercase().as_str(), "done" | "completed" | "archived")
        });
        done || status
    }

    /// Renders a minimal header for a freshly created document.
    pub fn render_new(title: &str, date: &str) -> String {
        format!("{HEADER_DELIMITER}\ntitle: {title}\ndate: {date}\n{HEADER_DELIMITER}\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: DocumentName,
    title: String,
    content: String,
    header: Option<Header>,
}

impl Document {
    pub fn new(name: DocumentName, content: impl Into<String>) -> Self {
        let content = content.into();
        let header = Header::parse(&content);
        let title = derive_title(&name, header.as_ref(), &content);
        Self {
            name,
            title,
            content,
            header,
        }
    }

    pub fn name(&self) -> &DocumentName {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.header.as_ref().is_some_and(Header::is_completed)
    }
}

fn derive_title(name: &DocumentName, header: Option<&Header>, content: &str) -> String {
    if let Some(title) = header.and_then(|header| header.get("title")) {
        if !title.is_empty() {
            return title.to_owned();
        }
    }

    if let Some(heading) = content
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .filter(|heading| !heading.is_empty())
    {
        return heading.to_owned();
    }

    let name = name.as_str();
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_owned(),
        _ => name.to_owned(),
    }
}
