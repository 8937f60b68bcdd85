// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tasklift-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tasklift and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Bordered panel for the main area of every screen.
fn panel(title: String, theme: &TuiTheme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme.panel_border_style(true))
        .title_style(theme.panel_border_style(true).add_modifier(Modifier::BOLD))
}

fn view_title(label: &str, tail: Option<&str>) -> String {
    let mut title = format!("─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push(' ');
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Item text without checkbox marker or recipient tags.
fn item_label(item: &TaggedItem) -> String {
    let stripped = strip_tags(&item.raw_text);
    stripped
        .strip_prefix(OPEN_CHECKBOX)
        .or_else(|| stripped.strip_prefix(CLOSED_CHECKBOX))
        .unwrap_or(&stripped)
        .to_owned()
}

fn item_location(item: &TaggedItem) -> String {
    format!("{}:{}", item.source_document, item.line_number)
}

fn render_placeholder(frame: &mut Frame<'_>, area: Rect, block: Block<'static>, message: &str, theme: &TuiTheme) {
    let paragraph = Paragraph::new(Line::styled(message.to_owned(), theme.muted_style()))
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_list(
    frame: &mut Frame<'_>,
    area: Rect,
    block: Block<'static>,
    items: Vec<ListItem<'static>>,
    cursor: usize,
    theme: &TuiTheme,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selection_style())
        .highlight_symbol("▸ ");
    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_people(
    frame: &mut Frame<'_>,
    area: Rect,
    theme: &TuiTheme,
    groups: &[PersonGroup],
    cursor: usize,
    undo_depth: usize,
) {
    let tail = (undo_depth > 0).then(|| format!("[{} to undo]", count_label(undo_depth, "move")));
    let block = panel(view_title("People to talk to", tail.as_deref()), theme);
    if groups.is_empty() {
        render_placeholder(frame, area, block, "No open to-talk items", theme);
        return;
    }

    let items = groups
        .iter()
        .map(|group| {
            ListItem::new(Line::from(vec![
                Span::raw(group.key.to_string()),
                Span::styled(format!("  {}", count_label(group.count(), "item")), theme.muted_style()),
            ]))
        })
        .collect::<Vec<_>>();
    render_list(frame, area, block, items, cursor, theme);
}

fn render_items(frame: &mut Frame<'_>, area: Rect, theme: &TuiTheme, pick: &ItemPick) {
    let tail = format!("[{}/{} selected]", pick.selected_count(), pick.items.len());
    let block = panel(view_title(&format!("Items for {}", pick.person), Some(&tail)), theme);

    let items = pick
        .items
        .iter()
        .zip(&pick.selected)
        .map(|(item, checked)| {
            let (mark, mark_style) =
                if *checked { ("[x] ", theme.checked_style()) } else { ("[ ] ", theme.muted_style()) };
            let mut lines = vec![Line::from(vec![
                Span::styled(mark, mark_style),
                Span::raw(item_label(item)),
                Span::styled(format!("  {}", item_location(item)), theme.muted_style()),
            ])];
            lines.extend(item.subtasks.iter().map(|subtask| {
                Line::styled(format!("    {}", subtask.text.trim_end()), theme.muted_style())
            }));
            ListItem::new(lines)
        })
        .collect::<Vec<_>>();
    render_list(frame, area, block, items, pick.cursor, theme);
}

fn render_target_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    theme: &TuiTheme,
    pick: &ItemPick,
    choice: TargetChoice,
) {
    let label = format!(
        "Move {} for {} to",
        count_label(pick.selected_count(), "item"),
        pick.person
    );
    let block = panel(view_title(&label, None), theme);
    let items = TargetChoice::ALL
        .iter()
        .map(|option| {
            let key = match option {
                TargetChoice::FindExisting => "f",
                TargetChoice::CreateNew => "n",
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{key}] "), theme.checked_style()),
                Span::raw(option.label()),
            ]))
        })
        .collect::<Vec<_>>();
    let cursor = TargetChoice::ALL.iter().position(|option| *option == choice).unwrap_or(0);
    render_list(frame, area, block, items, cursor, theme);
}

fn render_search(frame: &mut Frame<'_>, area: Rect, theme: &TuiTheme, search: &TargetSearch) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let insert = search.mode == SearchMode::Insert;
    let mode = if insert { " INSERT " } else { " NORMAL " };
    let mut input = vec![
        Span::styled(mode, theme.mode_style(insert)),
        Span::raw(" "),
        Span::raw(search.query.clone()),
    ];
    if insert {
        input.push(Span::styled("▏", theme.checked_style()));
    }
    let input_block = panel(view_title("Find note", None), theme);
    frame.render_widget(Paragraph::new(Line::from(input)).block(input_block), rows[0]);

    let tail = format!("[{} found]", search.results.len());
    let block = panel(view_title("Open notes", Some(&tail)), theme);
    if search.results.is_empty() {
        render_placeholder(frame, rows[1], block, "No matching notes", theme);
        return;
    }

    let items = search
        .results
        .iter()
        .map(|document| {
            ListItem::new(Line::from(vec![
                Span::raw(document.name().to_string()),
                Span::styled(format!("  {}", document.title()), theme.muted_style()),
            ]))
        })
        .collect::<Vec<_>>();
    render_list(frame, rows[1], block, items, search.cursor, theme);
}

fn render_confirmation(
    frame: &mut Frame<'_>,
    area: Rect,
    theme: &TuiTheme,
    pick: &ItemPick,
    target: &DocumentName,
) {
    let selected = pick.selected_items();
    let mut lines = vec![
        Line::from(vec![
            Span::raw("Move "),
            Span::styled(count_label(selected.len(), "item"), theme.checked_style()),
            Span::raw(format!(" for {} into ", pick.person)),
            Span::styled(target.to_string(), theme.checked_style()),
            Span::raw("?"),
        ]),
        Line::default(),
    ];
    for item in &selected {
        lines.push(Line::from(vec![
            Span::raw(format!("  • {}", item_label(item))),
            Span::styled(format!("  {}", item_location(item)), theme.muted_style()),
        ]));
        if !item.subtasks.is_empty() {
            lines.push(Line::styled(
                format!("    + {}", count_label(item.subtasks.len(), "nested line")),
                theme.muted_style(),
            ));
        }
    }
    lines.push(Line::default());
    lines.push(Line::styled(
        "Moved items are checked off where they came from.",
        theme.muted_style(),
    ));

    let paragraph = Paragraph::new(lines)
        .block(panel(view_title("Confirm move", None), theme))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_success(
    frame: &mut Frame<'_>,
    area: Rect,
    theme: &TuiTheme,
    summary: &MoveSummary,
    undo_depth: usize,
) {
    let sources = summary
        .source_documents
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let lines = vec![
        Line::styled(
            format!(
                "Moved {} for {} to {}",
                count_label(summary.items_moved, "item"),
                summary.person,
                summary.target
            ),
            theme.info_style().add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::raw(format!(
            "Inserted {} at line {}",
            count_label(summary.lines_inserted, "line"),
            summary.insertion_line + 1
        )),
        Line::raw(format!("Checked off in: {sources}")),
        Line::styled(
            format!("{} can be undone", count_label(undo_depth, "move")),
            theme.muted_style(),
        ),
    ];
    let paragraph = Paragraph::new(lines)
        .block(panel(view_title("Done", None), theme))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_name_prompt(frame: &mut Frame<'_>, area: Rect, theme: &TuiTheme, prompt: &NamePrompt) {
    let area = centered_rect(60, 3, area);
    frame.render_widget(Clear, area);

    let line = Line::from(vec![
        Span::raw(prompt.input.clone()),
        Span::styled("▏", theme.checked_style()),
    ]);
    let paragraph = Paragraph::new(line).block(panel(view_title("New note name", None), theme));
    frame.render_widget(paragraph, area);
}

/// `width_percent` of `area` wide, `height` rows tall, centered.
fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn status_line(status: Option<&Status>, theme: &TuiTheme) -> Line<'static> {
    match status {
        Some(Status::Info(message)) => Line::styled(message.clone(), theme.info_style()),
        Some(Status::Error(message)) => Line::styled(format!("Error: {message}"), theme.error_style()),
        None => Line::default(),
    }
}

/// Key hints for the footer, as `(label, keys)`.
fn footer_entries(state: &State, prompt_active: bool, compact: bool) -> Vec<(&'static str, &'static str)> {
    if prompt_active {
        return vec![("CREATE", "Enter"), ("CANCEL", "Esc")];
    }

    let entries = match state {
        State::PersonSelection { .. } => {
            vec![("MOVE", "j/k"), ("OPEN", "Enter"), ("UNDO", "u"), ("QUIT", "q")]
        }
        State::ItemSelection(_) => vec![
            ("MOVE", "j/k"),
            ("TOGGLE", "Space"),
            ("ALL", "a"),
            ("NONE", "n"),
            ("NEXT", "Enter"),
            ("BACK", "Esc"),
            ("QUIT", "q"),
        ],
        State::TargetSelection { .. } => vec![
            ("MOVE", "j/k"),
            ("FIND", "f"),
            ("NEW", "n"),
            ("PICK", "Enter"),
            ("BACK", "Esc"),
            ("QUIT", "q"),
        ],
        State::TargetSearch(search) => match search.mode {
            SearchMode::Insert => vec![
                ("TYPE", "a-z"),
                ("PICK", "Enter"),
                ("NORMAL", "Esc"),
                ("QUIT", "Ctrl-C"),
            ],
            SearchMode::Normal => vec![
                ("MOVE", "j/k"),
                ("INSERT", "i"),
                ("PICK", "Enter"),
                ("CANCEL", "q/Esc"),
                ("QUIT", "Ctrl-C"),
            ],
        },
        State::Confirmation { .. } => {
            vec![("CONFIRM", "Enter/y"), ("BACK", "Esc/n"), ("QUIT", "q")]
        }
        State::Success(_) => {
            vec![("UNDO", "u"), ("OPEN", "o"), ("PEOPLE", "Enter"), ("QUIT", "q")]
        }
    };

    if compact {
        entries
            .into_iter()
            .filter(|(label, _)| !matches!(*label, "MOVE" | "TYPE" | "ALL" | "NONE"))
            .collect()
    } else {
        entries
    }
}

fn footer_line(state: &State, prompt_active: bool, compact: bool) -> Line<'static> {
    let mut spans = vec![Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR).add_modifier(Modifier::BOLD),
    )];
    for (label, keys) in footer_entries(state, prompt_active, compact) {
        push_footer_entry(&mut spans, label, keys);
    }
    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        value.to_owned(),
        Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD),
    ));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}
