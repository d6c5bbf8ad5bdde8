//! PNG renderer.
//!
//! Rasterizes the rectangle list directly into an RGBA buffer: white
//! background, solid fills, one-pixel outlines. Drawing rectangles directly
//! keeps the export free of any font or vector dependency.

use crate::geometry::{BayDrawing, RectKind};
use crate::models::{BayConfig, RgbColor};
use anyhow::{Context, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::Path;

/// Margin around the drawing (px).
const MARGIN_PX: u32 = 40;

/// Default target size of the longer image edge (px), used to pick a
/// pixels-per-millimetre scale when none is given.
const TARGET_LONG_EDGE_PX: f64 = 1600.0;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn to_pixel(color: RgbColor) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

/// Renders the drawing into an image buffer.
///
/// `scale` is pixels per millimetre; when `None` the longer drawing edge is
/// fitted to roughly 1600 px.
///
/// # Errors
///
/// Returns an error if the scale is not positive.
pub fn render_image(
    config: &BayConfig,
    drawing: &BayDrawing,
    scale: Option<f64>,
) -> Result<RgbaImage> {
    let scale = match scale {
        Some(value) => value,
        None => TARGET_LONG_EDGE_PX / drawing.width_mm().max(drawing.height_mm()),
    };
    if scale <= 0.0 || !scale.is_finite() {
        anyhow::bail!("PNG scale must be a positive number of pixels per millimetre");
    }

    let width = (drawing.width_mm() * scale).ceil() as u32 + 2 * MARGIN_PX;
    let height = (drawing.height_mm() * scale).ceil() as u32 + 2 * MARGIN_PX;
    let mut image = RgbaImage::from_pixel(width, height, WHITE);

    let structure = to_pixel(config.color);
    let outline = to_pixel(config.color);

    for rect in &drawing.rects {
        let x0 = MARGIN_PX + (rect.x * scale).round() as u32;
        let y0 = MARGIN_PX + (rect.y * scale).round() as u32;
        let x1 = (x0 + (rect.width * scale).round().max(1.0) as u32).min(width);
        let y1 = (y0 + (rect.height * scale).round().max(1.0) as u32).min(height);

        let fill = match rect.kind {
            RectKind::SidePanel | RectKind::Shelf => structure,
            RectKind::Bin => WHITE,
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let on_edge = x == x0 || x + 1 == x1 || y == y0 || y + 1 == y1;
                let pixel = if on_edge { outline } else { fill };
                image.put_pixel(x, y, pixel);
            }
        }
    }

    Ok(image)
}

/// Renders the drawing and writes a PNG file to `path`.
pub fn write_png(
    config: &BayConfig,
    drawing: &BayDrawing,
    path: &Path,
    scale: Option<f64>,
) -> Result<()> {
    let image = render_image(config, drawing, scale)?;
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write PNG to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::compute_drawing;
    use crate::models::BayConfig;

    #[test]
    fn test_default_scale_caps_long_edge() {
        let config = BayConfig::new("Group A").unwrap();
        let drawing = compute_drawing(&config).unwrap();
        let image = render_image(&config, &drawing, None).unwrap();
        let long_edge = image.width().max(image.height());
        assert!(long_edge >= 1600);
        assert!(long_edge <= 1600 + 2 * MARGIN_PX + 1);
    }

    #[test]
    fn test_margin_stays_white_and_panel_is_colored() {
        let config = BayConfig::new("Group A").unwrap();
        let drawing = compute_drawing(&config).unwrap();
        let image = render_image(&config, &drawing, Some(0.2)).unwrap();

        // Top-left margin pixel untouched
        assert_eq!(*image.get_pixel(0, 0), WHITE);

        // A pixel well inside the left panel carries the bay color
        let x = MARGIN_PX + 1;
        let y = MARGIN_PX + 10;
        assert_eq!(*image.get_pixel(x, y), Rgba([74, 144, 226, 255]));
    }

    #[test]
    fn test_rejects_nonpositive_scale() {
        let config = BayConfig::new("Group A").unwrap();
        let drawing = compute_drawing(&config).unwrap();
        assert!(render_image(&config, &drawing, Some(0.0)).is_err());
        assert!(render_image(&config, &drawing, Some(-1.0)).is_err());
    }
}
