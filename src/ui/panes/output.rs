//! Program output pane rendering
//!
//! Shows the text printed by the last run, or its error list when the run
//! produced errors.

use crate::runner::ProgramResult;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Lines displayed for `result`, with a flag telling whether they are errors
pub(crate) fn output_lines(result: &ProgramResult) -> (Vec<String>, bool) {
    if result.errors.is_empty() {
        let lines = result.output.lines().map(|s| s.to_string()).collect();
        (lines, false)
    } else {
        let mut lines = vec!["Errors:".to_string()];
        lines.extend(result.error_lines());
        (lines, true)
    }
}

/// Render the output pane
pub fn render_output_pane(
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
        .title(format!(
            " Output · {}ms ",
            result.stats.elapsed.as_millis()
        ))
        .borders(Borders::ALL)
        .border_style(border_style);

    let (lines, is_error) = output_lines(result);

    if lines.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let color = if is_error {
        DEFAULT_THEME.error
    } else {
        DEFAULT_THEME.fg
    };
    let all_items: Vec<ListItem> = lines
        .into_iter()
        .map(|line| ListItem::new(line).style(Style::default().fg(color)))
        .collect();

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Clamp scroll offset only if content exceeds visible area
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParserError;
    use crate::runner::ProgramError;

    #[test]
    fn test_errors_replace_output() {
        let mut result =
            ProgramResult::from_errors(vec![ProgramError::from(ParserError::missing_bracket(
                1, ']',
            ))]);
        result.output = "ignored".to_string();
        let (lines, is_error) = output_lines(&result);
        assert!(is_error);
        assert_eq!(lines, vec!["Errors:", "--> 1 x ']' missing"]);
    }

    #[test]
    fn test_plain_output_split_into_lines() {
        let result = ProgramResult {
            output: "Hello\nWorld\n".to_string(),
            ..ProgramResult::default()
        };
        let (lines, is_error) = output_lines(&result);
        assert!(!is_error);
        assert_eq!(lines, vec!["Hello", "World"]);
    }
}
