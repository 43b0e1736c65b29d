//! Task panel rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the task list, including the inline editor for the task under edit.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::List || app.is_editing();

    let block = Block::default()
        .title(Span::styled("Todos", theme::panel_title(theme::TASKS_TITLE)))
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));

    if app.controller.is_empty_view() {
        let empty = Paragraph::new(Line::from(Span::styled("No todos found", theme::dimmed())))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let editing_id = app.controller.editing_id();

    let items: Vec<ListItem> = app
        .controller
        .items()
        .iter()
        .map(|task| {
            let checkbox = if task.completed { "[x]" } else { "[ ]" };

            let line = if editing_id == Some(&task.id) {
                Line::from(vec![
                    Span::raw(checkbox),
                    Span::raw(" "),
                    Span::styled(
                        format!("{}█", app.controller.edit_draft_text()),
                        theme::highlighted(),
                    ),
                    Span::styled("  Enter: save | Esc: cancel", theme::dimmed()),
                ])
            } else {
                let text_style = if task.completed {
                    theme::completed()
                } else {
                    theme::normal()
                };
                Line::from(vec![
                    Span::styled(checkbox, text_style),
                    Span::raw(" "),
                    Span::styled(task.text.as_str(), text_style),
                ])
            };

            ListItem::new(line)
        })
        .collect();

    // The selection always drives scrolling; it is only highlighted when focused.
    let mut list = List::new(items).block(block);
    if is_focused {
        list = list.highlight_style(theme::selected());
    }
    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}
