//! Single-line pane showing the text fed to `,` instructions

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_input_pane(frame: &mut Frame, area: Rect, input: &str, is_editing: bool) {
    let border_style = if is_editing {
        Style::default()
            .fg(DEFAULT_THEME.secondary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(if is_editing { " Input (editing) " } else { " Input " })
        .borders(Borders::ALL)
        .border_style(border_style);

    let paragraph = if input.is_empty() {
        Paragraph::new("(none)").style(Style::default().fg(DEFAULT_THEME.comment))
    } else {
        Paragraph::new(input.to_string()).style(Style::default().fg(DEFAULT_THEME.string))
    };

    frame.render_widget(paragraph.block(block), area);
}
