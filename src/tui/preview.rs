//! Live bay preview.
//!
//! Renders the computed drawing as colored terminal cells, scaled to fit
//! the panel. Terminal cells are roughly twice as tall as they are wide,
//! so the vertical scale is halved to keep proportions believable.

use crate::geometry::{self, BayDrawing, RectKind};
use crate::models::BayConfig;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Bay preview widget
pub struct BayPreview;

impl BayPreview {
    /// Render the preview panel for the current configuration.
    pub fn render(f: &mut Frame, area: Rect, config: &BayConfig, theme: &Theme) {
        let drawing = match geometry::compute_drawing(config) {
            Ok(drawing) => drawing,
            Err(error) => {
                Self::render_error(f, area, &error.to_string(), theme);
                return;
            }
        };

        let title = format!(
            " Preview  {:.0} × {:.0} mm ",
            drawing.width_mm(),
            drawing.height_mm()
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        if inner.width < 4 || inner.height < 4 {
            return;
        }

        Self::render_drawing(f, inner, config, &drawing);
    }

    /// Paints the drawing rectangles into `inner` as background-colored cells.
    fn render_drawing(f: &mut Frame, inner: Rect, config: &BayConfig, drawing: &BayDrawing) {
        // Cells are ~1:2, so millimetres map to half as many rows as columns
        let scale = geometry::fit_scale(
            drawing,
            f64::from(inner.width),
            f64::from(inner.height) * 2.0,
        );

        let drawn_w = (drawing.width_mm() * scale) as u16;
        let drawn_h = (drawing.height_mm() * scale / 2.0) as u16;
        let offset_x = inner.x + (inner.width.saturating_sub(drawn_w)) / 2;
        let offset_y = inner.y + (inner.height.saturating_sub(drawn_h)) / 2;

        let panel_color = config.color.to_ratatui_color();
        // Shelf boards are dimmed slightly so rows read as separate at
        // terminal resolution
        let shelf_color = config.color.dim(25).to_ratatui_color();
        let bin_color = Color::Rgb(250, 250, 250);

        for rect in &drawing.rects {
            let x = offset_x + (rect.x * scale) as u16;
            let y = offset_y + (rect.y * scale / 2.0) as u16;
            let w = ((rect.width * scale) as u16).max(1);
            let h = ((rect.height * scale / 2.0) as u16).max(1);

            // Clamp to the panel so rounding never paints over the border
            let w = w.min(inner.right().saturating_sub(x));
            let h = h.min(inner.bottom().saturating_sub(y));
            if w == 0 || h == 0 {
                continue;
            }

            let color = match rect.kind {
                RectKind::SidePanel => panel_color,
                RectKind::Shelf => shelf_color,
                RectKind::Bin => bin_color,
            };
            let cell_rect = Rect::new(x, y, w, h);
            f.render_widget(Block::default().style(Style::default().bg(color)), cell_rect);
        }
    }

    fn render_error(f: &mut Frame, area: Rect, message: &str, theme: &Theme) {
        let paragraph = Paragraph::new(format!("Cannot draw bay:\n{message}"))
            .style(Style::default().fg(theme.error))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Preview ")
                    .border_style(Style::default().fg(theme.error)),
            );
        f.render_widget(paragraph, area);
    }
}
