//! Debug pane: snapshots recorded by `#` and `$` markers

use crate::runner::ProgramResult;
use crate::snapshot::SnapshotRecord;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

/// Printable form of a snapshot's character column
pub(crate) fn display_char(record: &SnapshotRecord) -> String {
    let c = record.character;
    if c.is_ascii_graphic() || c == ' ' {
        format!("'{}'", c)
    } else {
        format!("\\x{:02x}", record.value)
    }
}

/// Pane title; mentions snapshots dropped from a full log
pub(crate) fn debug_title(result: &ProgramResult) -> String {
    if result.snapshots_evicted > 0 {
        format!(
            " Debug · {} steps · {} older dropped ",
            result.stats.steps, result.snapshots_evicted
        )
    } else {
        format!(" Debug · {} steps ", result.stats.steps)
    }
}

/// Render the debug snapshot table
pub fn render_debug_pane(
    frame: &mut Frame,
    area: Rect,
    result: &ProgramResult,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(debug_title(result))
        .borders(Borders::ALL)
        .border_style(border_style);

    let header = Row::new(vec!["Index", "Value", "Character"]).style(
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    );

    let total = result.snapshots.len();
    // borders and header row
    let visible_height = area.height.saturating_sub(3).max(1) as usize;
    if total > visible_height {
        *scroll_offset = (*scroll_offset).min(total - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let rows: Vec<Row> = result
        .snapshots
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|record| {
            Row::new(vec![
                Cell::from(record.address.to_string()),
                Cell::from(record.value.to_string())
                    .style(Style::default().fg(DEFAULT_THEME.number)),
                Cell::from(display_char(record))
                    .style(Style::default().fg(DEFAULT_THEME.string)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Min(9),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_char_escapes_control_values() {
        assert_eq!(display_char(&SnapshotRecord::new(0, b'A')), "'A'");
        assert_eq!(display_char(&SnapshotRecord::new(0, 10)), "\\x0a");
    }

    #[test]
    fn test_title_reports_dropped_snapshots() {
        let mut result = ProgramResult::default();
        result.stats.steps = 1026;
        assert_eq!(debug_title(&result), " Debug · 1026 steps ");
        result.snapshots_evicted = 1;
        assert_eq!(debug_title(&result), " Debug · 1026 steps · 1 older dropped ");
    }
}
