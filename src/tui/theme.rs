// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.


use ratatui::style::{Color, Modifier, Style};

/// Colors for the roles the screens draw: the focused panel, checked items, search modes and
/// the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TuiTheme {
    accent: Color,
    checked: Color,
    muted: Color,
    info: Color,
    error: Color,
    insert_mode: Color,
    normal_mode: Color,
}

impl Default for TuiTheme {
    fn default() -> Self {
        Self {
            accent: Color::LightGreen,
            checked: Color::Cyan,
            muted: Color::DarkGray,
            info: Color::Green,
            error: Color::Red,
            insert_mode: Color::Yellow,
            normal_mode: Color::Blue,
        }
    }
}

impl TuiTheme {
    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default()
        }
    }

    pub(crate) fn selection_style(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub(crate) fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }

    pub(crate) fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Checked boxes, the move target and input cursors.
    pub(crate) fn checked_style(&self) -> Style {
        Style::default().fg(self.checked).add_modifier(Modifier::BOLD)
    }

    /// Badge for the search box: INSERT while typing, NORMAL while browsing results.
    pub(crate) fn mode_style(&self, insert: bool) -> Style {
        let bg = if insert { self.insert_mode } else { self.normal_mode };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }
}
