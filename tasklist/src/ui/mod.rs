//! Terminal UI rendering.

pub mod input_panel;
pub mod status_bar;
pub mod task_panel;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let error_height = u16::from(!app.controller.last_error().is_empty());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Header
            Constraint::Length(error_height), // Error line
            Constraint::Length(3),            // New todo
            Constraint::Length(3),            // Search
            Constraint::Min(3),               // Tasks
            Constraint::Length(1),            // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    if error_height > 0 {
        render_error(frame, chunks[1], app);
    }
    input_panel::render_new_todo(frame, chunks[2], app);
    input_panel::render_search(frame, chunks[3], app);
    task_panel::render(frame, chunks[4], app);
    status_bar::render(frame, chunks[5], app);
}

/// Render the title line, with the loading indicator when a request is out.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled("Todo List", theme::bold())];
    if app.controller.is_loading() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("Loading...", theme::loading()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the last failure message.
fn render_error(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(Span::styled(app.controller.last_error(), theme::error()));
    frame.render_widget(Paragraph::new(line), area);
}
