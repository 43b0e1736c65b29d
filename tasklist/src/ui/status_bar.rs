//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = if app.is_editing() {
        "Enter: save | Esc: cancel"
    } else {
        match app.focus {
            PanelFocus::NewTodo => "Enter: add | Tab: switch panel | Esc: quit",
            PanelFocus::Search => "Type to search | Tab: switch panel | Esc: quit",
            PanelFocus::List => {
                "↑↓/jk: navigate | Space: toggle | e: edit | d: delete | r: refresh | Esc: quit"
            }
        }
    };

    let count = app.controller.items().len();
    let done = app
        .controller
        .items()
        .iter()
        .filter(|task| task.completed)
        .count();

    let status_line = Line::from(vec![
        Span::styled(concat!("Tasklist v", env!("CARGO_PKG_VERSION")), theme::bold()),
        Span::raw(format!(" | {done}/{count} done | ")),
        Span::styled(help_text, theme::dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
