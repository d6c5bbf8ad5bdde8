//! Export dialog popup.
//!
//! Two-row form: the output format (cycled with left/right) and the output
//! path (free text). Confirming hands both back to the parent, which runs
//! the actual render.

use crate::export::ExportFormat;
use crate::tui::component::{centered_rect, Component};
use crate::tui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::path::{Path, PathBuf};

/// Events emitted by the export dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDialogEvent {
    /// User confirmed the export
    Confirm {
        /// Chosen output format
        format: ExportFormat,
        /// Chosen output path
        path: PathBuf,
    },
    /// User cancelled
    Cancel,
}

/// Dialog row selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogRow {
    Format,
    Path,
}

impl DialogRow {
    const fn other(self) -> Self {
        match self {
            Self::Format => Self::Path,
            Self::Path => Self::Format,
        }
    }
}

/// Export dialog component state
#[derive(Debug, Clone)]
pub struct ExportDialog {
    format: ExportFormat,
    path_input: String,
    selected_row: DialogRow,
    error: Option<String>,
}

impl ExportDialog {
    /// Creates a dialog prefilled with a format and suggested path.
    #[must_use]
    pub fn new(format: ExportFormat, suggested_path: &Path) -> Self {
        Self {
            format,
            path_input: suggested_path.display().to_string(),
            selected_row: DialogRow::Format,
            error: None,
        }
    }

    /// Cycles the format and rewrites a matching path extension along with it.
    fn cycle_format(&mut self, forward: bool) {
        let order = [ExportFormat::Svg, ExportFormat::Png, ExportFormat::Pptx];
        let index = order.iter().position(|f| *f == self.format).unwrap_or(0);
        let next = if forward {
            (index + 1) % order.len()
        } else {
            (index + order.len() - 1) % order.len()
        };
        let old_extension = self.format.extension();
        self.format = order[next];

        let suffix = format!(".{old_extension}");
        if self.path_input.ends_with(&suffix) {
            let stem_len = self.path_input.len() - suffix.len();
            self.path_input.truncate(stem_len);
            self.path_input.push('.');
            self.path_input.push_str(self.format.extension());
        }
    }

    fn confirm(&mut self) -> Option<ExportDialogEvent> {
        let trimmed = self.path_input.trim();
        if trimmed.is_empty() {
            self.error = Some("Output path must not be empty".to_string());
            return None;
        }
        Some(ExportDialogEvent::Confirm {
            format: self.format,
            path: PathBuf::from(trimmed),
        })
    }
}

impl Component for ExportDialog {
    type Event = ExportDialogEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('s') {
                return self.confirm();
            }
            return None;
        }

        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::BackTab => {
                self.selected_row = self.selected_row.other();
                None
            }
            KeyCode::Left if self.selected_row == DialogRow::Format => {
                self.cycle_format(false);
                None
            }
            KeyCode::Right if self.selected_row == DialogRow::Format => {
                self.cycle_format(true);
                None
            }
            KeyCode::Char(c) if self.selected_row == DialogRow::Path => {
                self.path_input.push(c);
                self.error = None;
                None
            }
            KeyCode::Backspace if self.selected_row == DialogRow::Path => {
                self.path_input.pop();
                None
            }
            KeyCode::Enter => self.confirm(),
            KeyCode::Esc => Some(ExportDialogEvent::Cancel),
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = centered_rect(60, 35, area);
        f.render_widget(Clear, popup_area);

        let row_style = |row: DialogRow| {
            if row == self.selected_row {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_secondary)
            }
        };

        let format_marker = if self.selected_row == DialogRow::Format {
            "▶ "
        } else {
            "  "
        };
        let path_marker = if self.selected_row == DialogRow::Path {
            "▶ "
        } else {
            "  "
        };

        let path_value = if self.selected_row == DialogRow::Path {
            format!("{}█", self.path_input)
        } else {
            self.path_input.clone()
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::raw(format_marker),
                Span::styled("Format  ", row_style(DialogRow::Format)),
                Span::styled(
                    format!("◀ {} ▶", self.format),
                    Style::default().fg(theme.text),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::raw(path_marker),
                Span::styled("Output  ", row_style(DialogRow::Path)),
                Span::styled(path_value, Style::default().fg(theme.text)),
            ]),
        ];

        if let Some(ref error) = self.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  ✗ {error}"),
                Style::default().fg(theme.error),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Tab Switch row | ←→ Format | Enter Export | Esc Cancel",
            Style::default().fg(theme.text_muted),
        )));

        let popup = Paragraph::new(lines)
            .style(Style::default().bg(theme.surface).fg(theme.text))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Export Diagram ")
                    .border_style(Style::default().fg(theme.primary)),
            );
        f.render_widget(popup, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn dialog() -> ExportDialog {
        ExportDialog::new(ExportFormat::Svg, &PathBuf::from("group_a_2026-08-24.svg"))
    }

    #[test]
    fn test_cycle_format_rewrites_extension() {
        let mut dialog = dialog();
        dialog.handle_input(key(KeyCode::Right));
        assert_eq!(dialog.format, ExportFormat::Png);
        assert_eq!(dialog.path_input, "group_a_2026-08-24.png");

        dialog.handle_input(key(KeyCode::Left));
        assert_eq!(dialog.format, ExportFormat::Svg);
        assert_eq!(dialog.path_input, "group_a_2026-08-24.svg");
    }

    #[test]
    fn test_cycle_keeps_custom_extension() {
        let mut dialog = ExportDialog::new(ExportFormat::Svg, &PathBuf::from("diagram.out"));
        dialog.handle_input(key(KeyCode::Right));
        assert_eq!(dialog.format, ExportFormat::Png);
        assert_eq!(dialog.path_input, "diagram.out");
    }

    #[test]
    fn test_confirm_returns_format_and_path() {
        let mut dialog = dialog();
        let event = dialog.handle_input(key(KeyCode::Enter));
        assert_eq!(
            event,
            Some(ExportDialogEvent::Confirm {
                format: ExportFormat::Svg,
                path: PathBuf::from("group_a_2026-08-24.svg"),
            })
        );
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let mut dialog = dialog();
        dialog.handle_input(key(KeyCode::Tab));
        for _ in 0..30 {
            dialog.handle_input(key(KeyCode::Backspace));
        }
        assert_eq!(dialog.handle_input(key(KeyCode::Enter)), None);
        assert!(dialog.error.is_some());
    }

    #[test]
    fn test_escape_cancels() {
        let mut dialog = dialog();
        assert_eq!(
            dialog.handle_input(key(KeyCode::Esc)),
            Some(ExportDialogEvent::Cancel)
        );
    }

    #[test]
    fn test_path_editing() {
        let mut dialog = ExportDialog::new(ExportFormat::Svg, &PathBuf::from("a.svg"));
        dialog.handle_input(key(KeyCode::Tab));
        dialog.handle_input(key(KeyCode::Backspace));
        dialog.handle_input(key(KeyCode::Char('g')));
        assert_eq!(dialog.path_input, "a.svg");
    }
}
