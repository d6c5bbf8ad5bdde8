//! Status bar widget for status messages and contextual hints.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Theme};

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with the current message and key hints.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let mut lines: Vec<Line> = Vec::with_capacity(2);

        // First line: status message, or a hint for the selected field
        if let Some(ref message) = state.status_message {
            lines.push(Line::from(Span::styled(
                message.clone(),
                Style::default().fg(theme.success),
            )));
        } else if state.active_popup.is_none() {
            let field = state.form.selected_field(&state.bay);
            lines.push(Line::from(vec![
                Span::styled("Field: ", Style::default().fg(theme.primary)),
                Span::styled(field.hint(), Style::default().fg(theme.text_secondary)),
            ]));
        } else {
            lines.push(Line::from(""));
        }

        // Second line: key hints
        let hints: &[(&str, &str)] = &[
            ("↑↓", "Navigate"),
            ("Enter", "Edit"),
            ("Ctrl+S", "Save"),
            ("e", "Export"),
            ("?", "Help"),
            ("q", "Quit"),
        ];
        let mut spans: Vec<Span> = Vec::new();
        for (i, (keys, action)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(
                *keys,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(": "));
            spans.push(Span::styled(*action, Style::default().fg(theme.text_muted)));
        }
        lines.push(Line::from(spans));

        let status = Paragraph::new(lines)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );
        f.render_widget(status, area);
    }
}
