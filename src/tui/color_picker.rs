//! Color picker popup.
//!
//! A small palette grid of common shelving colors plus a free hex entry
//! mode for anything else.

use crate::models::RgbColor;
use crate::tui::component::{centered_rect, Component};
use crate::tui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Events emitted by the color picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorPickerEvent {
    /// User picked a color
    Selected(RgbColor),
    /// User cancelled
    Cancelled,
}

/// Swatches per palette row
const GRID_COLS: usize = 4;

/// Palette of colors that show up on real shelving
const PALETTE: [(&str, &str); 16] = [
    ("#4A90E2", "Steel blue"),
    ("#2E5C9E", "Navy"),
    ("#1ABC9C", "Teal"),
    ("#27AE60", "Green"),
    ("#F39C12", "Amber"),
    ("#E67E22", "Orange"),
    ("#E74C3C", "Red"),
    ("#C0392B", "Brick"),
    ("#9B59B6", "Violet"),
    ("#34495E", "Slate"),
    ("#7F8C8D", "Grey"),
    ("#95A5A6", "Light grey"),
    ("#D35400", "Rust"),
    ("#16A085", "Sea green"),
    ("#2C3E50", "Charcoal"),
    ("#F1C40F", "Yellow"),
];

/// Color picker component state
#[derive(Debug, Clone)]
pub struct ColorPicker {
    /// Selected palette index
    selected: usize,
    /// Hex input buffer, present while typing a custom value
    hex_input: Option<String>,
    /// Error from the last rejected hex value
    error: Option<String>,
}

impl ColorPicker {
    /// Creates a picker with the swatch nearest to `current` preselected.
    #[must_use]
    pub fn new(current: RgbColor) -> Self {
        let selected = PALETTE
            .iter()
            .position(|(hex, _)| {
                RgbColor::from_hex(hex).is_ok_and(|c| c == current)
            })
            .unwrap_or(0);
        Self {
            selected,
            hex_input: None,
            error: None,
        }
    }

    fn commit_hex(&mut self) -> Option<ColorPickerEvent> {
        let input = self.hex_input.as_deref().unwrap_or("");
        match RgbColor::from_hex(input) {
            Ok(color) => Some(ColorPickerEvent::Selected(color)),
            Err(error) => {
                self.error = Some(error.to_string());
                None
            }
        }
    }

    fn palette_color(index: usize) -> RgbColor {
        RgbColor::from_hex(PALETTE[index].0).unwrap_or_default()
    }
}

impl Component for ColorPicker {
    type Event = ColorPickerEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        if self.hex_input.is_some() {
            return match key.code {
                KeyCode::Char(c) if c.is_ascii_hexdigit() || c == '#' => {
                    if let Some(input) = self.hex_input.as_mut() {
                        if input.len() < 7 {
                            input.push(c.to_ascii_uppercase());
                        }
                    }
                    None
                }
                KeyCode::Backspace => {
                    if let Some(input) = self.hex_input.as_mut() {
                        input.pop();
                    }
                    None
                }
                KeyCode::Enter => self.commit_hex(),
                KeyCode::Esc => {
                    self.hex_input = None;
                    self.error = None;
                    None
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected = (self.selected + 1).min(PALETTE.len() - 1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(GRID_COLS);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + GRID_COLS).min(PALETTE.len() - 1);
                None
            }
            KeyCode::Char('#' | 'x') => {
                self.hex_input = Some("#".to_string());
                self.error = None;
                None
            }
            KeyCode::Enter => Some(ColorPickerEvent::Selected(Self::palette_color(
                self.selected,
            ))),
            KeyCode::Esc | KeyCode::Char('q') => Some(ColorPickerEvent::Cancelled),
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = centered_rect(50, 60, area);
        f.render_widget(Clear, popup_area);

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(""));

        for row in PALETTE.chunks(GRID_COLS).enumerate() {
            let (row_index, chunk) = row;
            let mut spans: Vec<Span> = vec![Span::raw("  ")];
            for (col_index, (_, name)) in chunk.iter().enumerate() {
                let index = row_index * GRID_COLS + col_index;
                let color = Self::palette_color(index).to_ratatui_color();
                let marker = if index == self.selected { "▶" } else { " " };
                spans.push(Span::styled(
                    marker,
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled("██ ", Style::default().fg(color)));
                let name_style = if index == self.selected {
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text_secondary)
                };
                spans.push(Span::styled(format!("{name:<11}"), name_style));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }

        if let Some(ref input) = self.hex_input {
            lines.push(Line::from(vec![
                Span::styled("  Hex: ", Style::default().fg(theme.text_secondary)),
                Span::styled(
                    format!("{input}█"),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::styled("  Selected: ", Style::default().fg(theme.text_secondary)),
                Span::styled(
                    PALETTE[self.selected].0,
                    Style::default().fg(Self::palette_color(self.selected).to_ratatui_color()),
                ),
            ]));
        }

        if let Some(ref error) = self.error {
            lines.push(Line::from(Span::styled(
                format!("  ✗ {error}"),
                Style::default().fg(theme.error),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  ↑↓←→ Select | # Hex entry | Enter Apply | Esc Cancel",
            Style::default().fg(theme.text_muted),
        )));

        let popup = Paragraph::new(lines)
            .style(Style::default().bg(theme.surface).fg(theme.text))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Bay Color ")
                    .border_style(Style::default().fg(theme.primary)),
            );
        f.render_widget(popup, popup_area);
    }
}
