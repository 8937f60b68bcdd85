// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Line-level text helpers shared by the scanner, the mutator, and the store.
//!
//! Documents are handled as a list of lines plus a flag recording whether the text ended with a
//! newline, so that splitting and re-joining an untouched document is byte-identical.

pub const OPEN_CHECKBOX: &str = "- [ ] ";
pub const CLOSED_CHECKBOX: &str = "- [x] ";
pub const HEADER_DELIMITER: &str = "---";
pub const TAB_WIDTH: usize = 4;

pub fn split_lines(text: &str) -> (Vec<&str>, bool) {
    if text.is_empty() {
        return (Vec::new(), false);
    }
    let trailing_newline = text.ends_with('\n');
    let body = if trailing_newline {
        &text[..text.len() - 1]
    } else {
        text
    };
    (body.split('\n').collect(), trailing_newline)
}

pub fn join_lines<S: AsRef<str>>(lines: &[S], trailing_newline: bool) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(line.as_ref());
    }
    if trailing_newline && !lines.is_empty() {
        out.push('\n');
    }
    out
}

/// Leading whitespace width, counting a tab as [`TAB_WIDTH`] spaces.
pub fn indentation(line: &str) -> usize {
    line.chars()
        .take_while(|ch| matches!(ch, ' ' | '\t'))
        .map(|ch| if ch == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

pub fn is_open_task(line: &str) -> bool {
    line.trim_start().starts_with(OPEN_CHECKBOX)
}

/// Index of the closing delimiter of a metadata block that opens the document.
pub fn frontmatter_end<S: AsRef<str>>(lines: &[S]) -> Option<usize> {
    let first = lines.first()?;
    if first.as_ref().trim_end() != HEADER_DELIMITER {
        return None;
    }
    lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| line.as_ref().trim_end() == HEADER_DELIMITER)
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::{frontmatter_end, indentation, is_open_task, join_lines, split_lines};

    #[test]
    fn split_and_join_preserve_bytes() {
        for text in ["", "\n", "a", "a\n", "a\n\nb", "a\r\nb\r\n", "\n\n"] {
            let (lines, trailing) = split_lines(text);
            assert_eq!(join_lines(&lines, trailing), text, "text={text:?}");
        }
    }

    #[test]
    fn tabs_count_as_four_spaces() {
        assert_eq!(indentation("\t- x"), 4);
        assert_eq!(indentation("  \t- x"), 6);
        assert_eq!(indentation("- x"), 0);
    }

    #[test]
    fn open_task_requires_space_after_checkbox() {
        assert!(is_open_task("  - [ ] call"));
        assert!(!is_open_task("- [ ]call"));
        assert!(!is_open_task("- [x] done"));
    }

    #[test]
    fn frontmatter_end_needs_leading_and_closing_delimiters() {
        assert_eq!(frontmatter_end(&["---", "title: x", "---", "body"]), Some(2));
        assert_eq!(frontmatter_end(&["body", "---", "---"]), None);
        assert_eq!(frontmatter_end(&["---", "title: x"]), None);
        assert_eq!(frontmatter_end::<&str>(&[]), None);
    }
}
