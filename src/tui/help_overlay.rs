//! Help overlay listing all key bindings.

use crate::tui::component::{centered_rect, Component};
use crate::tui::theme::Theme;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Events emitted by the help overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpOverlayEvent {
    /// Overlay was dismissed
    Closed,
}

/// Help overlay component
#[derive(Debug, Clone, Copy, Default)]
pub struct HelpOverlay;

/// Key bindings shown in the overlay, grouped by section.
const BINDINGS: [(&str, &[(&str, &str)]); 3] = [
    (
        "Navigation",
        &[
            ("↑/k  ↓/j", "Move between fields"),
            ("Tab / Shift+Tab", "Next / previous field"),
            ("Enter", "Edit field / open picker"),
            ("Esc", "Cancel edit / quit"),
        ],
    ),
    (
        "Editing",
        &[
            ("Space", "Toggle the top cap"),
            ("Enter", "Commit the typed value"),
            ("Backspace", "Delete a character"),
        ],
    ),
    (
        "Actions",
        &[
            ("Ctrl+S", "Save bay file"),
            ("e / Ctrl+E", "Export diagram (SVG, PNG, PPTX)"),
            ("?", "Toggle this help"),
            ("q", "Quit"),
        ],
    ),
];

impl HelpOverlay {
    /// Creates a help overlay.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Component for HelpOverlay {
    type Event = HelpOverlayEvent;

    fn handle_input(&mut self, _key: KeyEvent) -> Option<Self::Event> {
        // Any key dismisses the overlay
        Some(HelpOverlayEvent::Closed)
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = centered_rect(55, 70, area);
        f.render_widget(Clear, popup_area);

        let mut lines: Vec<Line> = vec![Line::from("")];
        for (section, bindings) in BINDINGS {
            lines.push(Line::from(Span::styled(
                format!("  {section}"),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )));
            for (keys, action) in bindings {
                lines.push(Line::from(vec![
                    Span::styled(format!("    {keys:<16}"), Style::default().fg(theme.accent)),
                    Span::styled(*action, Style::default().fg(theme.text)),
                ]));
            }
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "  Press any key to close",
            Style::default().fg(theme.text_muted),
        )));

        let popup = Paragraph::new(lines)
            .style(Style::default().bg(theme.surface).fg(theme.text))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .border_style(Style::default().fg(theme.primary)),
            );
        f.render_widget(popup, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_any_key_closes() {
        let mut overlay = HelpOverlay::new();
        let event =
            overlay.handle_input(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(event, Some(HelpOverlayEvent::Closed));
    }
}
