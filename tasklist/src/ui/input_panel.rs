//! New-todo and search input boxes.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the new-todo input box.
pub fn render_new_todo(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::NewTodo && !app.is_editing();
    render_input(
        frame,
        area,
        "New",
        app.controller.draft_text(),
        "Add new todo",
        is_focused,
    );
}

/// Render the search input box.
pub fn render_search(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Search && !app.is_editing();
    render_input(
        frame,
        area,
        "Search",
        app.controller.search_query(),
        "Search todos",
        is_focused,
    );
}

/// Render a bordered single-line input with a trailing block cursor.
fn render_input(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    text: &str,
    placeholder: &str,
    is_focused: bool,
) {
    let line = if text.is_empty() && !is_focused {
        Line::from(Span::styled(placeholder.to_string(), theme::dimmed()))
    } else {
        let mut display = text.to_string();
        if is_focused {
            display.push('█');
        }
        Line::from(Span::styled(display, theme::normal()))
    };

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));

    frame.render_widget(Paragraph::new(line).block(block), area);
}
