//! SVG renderer.
//!
//! One millimetre maps to one SVG user unit; the `viewBox` covers the
//! drawing plus a fixed margin, so the file scales losslessly in any viewer.
//! Structure rectangles are filled with the bay color, bins are white with a
//! bay-colored stroke.

use crate::geometry::{BayDrawing, RectKind};
use crate::models::BayConfig;
use anyhow::{Context, Result};
use std::path::Path;
use svg::node::element::{Rectangle, Text};
use svg::Document;

/// Margin around the drawing (mm).
const MARGIN_MM: f64 = 50.0;

/// Stroke width for bin outlines (mm).
const STROKE_MM: f64 = 1.0;

/// Builds the SVG document for a bay drawing.
#[must_use]
pub fn render_document(config: &BayConfig, drawing: &BayDrawing) -> Document {
    let fill = config.color.to_hex();
    let width = drawing.width_mm() + 2.0 * MARGIN_MM;
    let height = drawing.height_mm() + 2.0 * MARGIN_MM;

    let mut document = Document::new()
        .set("viewBox", (0.0, 0.0, width, height))
        .set("width", format!("{width}mm"))
        .set("height", format!("{height}mm"));

    document = document.add(
        Text::new(&config.metadata.name)
            .set("x", MARGIN_MM)
            .set("y", MARGIN_MM * 0.6)
            .set("font-size", 24)
            .set("font-family", "sans-serif")
            .set("fill", fill.clone()),
    );

    for rect in &drawing.rects {
        let mut node = Rectangle::new()
            .set("x", MARGIN_MM + rect.x)
            .set("y", MARGIN_MM + rect.y)
            .set("width", rect.width)
            .set("height", rect.height);

        node = match rect.kind {
            RectKind::SidePanel | RectKind::Shelf => {
                node.set("fill", fill.clone()).set("stroke", "none")
            }
            RectKind::Bin => node
                .set("fill", "#FFFFFF")
                .set("stroke", fill.clone())
                .set("stroke-width", STROKE_MM),
        };
        document = document.add(node);
    }

    document
}

/// Renders the drawing and writes it to `path`.
pub fn write_svg(config: &BayConfig, drawing: &BayDrawing, path: &Path) -> Result<()> {
    let document = render_document(config, drawing);
    svg::save(path, &document)
        .with_context(|| format!("Failed to write SVG to {}", path.display()))
}
