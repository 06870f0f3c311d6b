//! Source code pane rendering with syntax highlighting
//!
//! Every character is colored by its role in the tape language. Characters
//! that failed validation are painted on a red background, which is how
//! positional parser errors are located in the source.

use crate::parser::lexer::DEBUG_MARKERS;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::HashSet;

fn char_style(c: char) -> Style {
    match c {
        '[' | ']' => Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
        '+' | '-' => Style::default().fg(DEFAULT_THEME.number),
        '<' | '>' => Style::default().fg(DEFAULT_THEME.keyword),
        '.' | ',' => Style::default().fg(DEFAULT_THEME.string),
        c if DEBUG_MARKERS.contains(&c) => Style::default().fg(DEFAULT_THEME.marker),
        _ => Style::default().fg(DEFAULT_THEME.comment),
    }
}

fn error_style() -> Style {
    Style::default()
        .bg(DEFAULT_THEME.error)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Split `source` into highlighted lines.
///
/// `error_positions` are character indices into the whole source, matching
/// the positions reported by the validator. Newlines occupy an index too.
pub(crate) fn highlight_source(
    source: &str,
    error_positions: &HashSet<usize>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut position = 0;

    for line in source.split('\n') {
        let spans: Vec<Span> = line
            .chars()
            .map(|c| {
                let style = if error_positions.contains(&position) {
                    error_style()
                } else {
                    char_style(c)
                };
                position += 1;
                Span::styled(c.to_string(), style)
            })
            .collect();
        // account for the '\n' consumed by split
        position += 1;
        lines.push(Line::from(spans));
    }

    lines
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    error_positions: &HashSet<usize>,
    is_editing: bool,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_editing {
        Style::default()
            .fg(DEFAULT_THEME.secondary)
            .add_modifier(Modifier::BOLD)
    } else if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let title = format!(
        " Code{} · {} chars ",
        if is_editing { " (editing)" } else { "" },
        source_code.chars().count()
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines = highlight_source(source_code, error_positions);
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_lines > visible_height {
        *scroll_offset = (*scroll_offset).min(total_lines - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .into_iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let mut spans = vec![Span::styled(
                format!("{:4} ", idx + 1),
                Style::default().fg(DEFAULT_THEME.comment),
            )];
            spans.extend(line.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
