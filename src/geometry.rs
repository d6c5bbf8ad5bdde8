//! Bay drawing geometry.
//!
//! This module turns a [`BayConfig`] into a flat list of rectangles in
//! millimetre coordinates that every renderer (terminal preview, SVG, PNG,
//! PPTX) consumes. The coordinate system is Y-down with the origin at the
//! top-left corner of the left side panel.
//!
//! Within one bay, bin row `r` starts at
//! `ground_clearance + sum(bin_heights[..r]) + r * shelf_thickness`, with a
//! shelf board below each row and an extra cap board when `has_top_cap` is
//! set, so the rectangles exactly fill `total_height`.

use crate::models::BayConfig;
use anyhow::Result;

/// What a drawing rectangle represents, so renderers can style structure
/// and bin interiors differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectKind {
    /// Vertical panel at either end of the bay run
    SidePanel,
    /// Horizontal shelf board (including the optional top cap)
    Shelf,
    /// A bin opening
    Bin,
}

/// An axis-aligned rectangle in millimetre coordinates, Y-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    /// What the rectangle represents
    pub kind: RectKind,
    /// Left edge (mm)
    pub x: f64,
    /// Top edge (mm)
    pub y: f64,
    /// Width (mm)
    pub width: f64,
    /// Height (mm)
    pub height: f64,
}

/// The complete drawing for a bay group.
#[derive(Debug, Clone, PartialEq)]
pub struct BayDrawing {
    /// Rectangles in paint order: panels, then shelves, then bins
    pub rects: Vec<DrawRect>,
    width_mm: f64,
    height_mm: f64,
}

impl BayDrawing {
    /// Overall drawing width including both side panels (mm).
    #[must_use]
    pub const fn width_mm(&self) -> f64 {
        self.width_mm
    }

    /// Overall drawing height (mm).
    #[must_use]
    pub const fn height_mm(&self) -> f64 {
        self.height_mm
    }

    /// Rectangles of one kind, in paint order.
    pub fn rects_of(&self, kind: RectKind) -> impl Iterator<Item = &DrawRect> {
        self.rects.iter().filter(move |rect| rect.kind == kind)
    }
}

/// Uniform scale factor that fits `drawing` into a `max_width` x `max_height`
/// box (same units on both axes).
#[must_use]
pub fn fit_scale(drawing: &BayDrawing, max_width: f64, max_height: f64) -> f64 {
    let sx = max_width / drawing.width_mm();
    let sy = max_height / drawing.height_mm();
    sx.min(sy)
}

/// Computes the drawing for a validated bay configuration.
///
/// # Errors
///
/// Returns an error if the configuration fails validation; the drawing
/// arithmetic itself cannot fail on valid input.
pub fn compute_drawing(config: &BayConfig) -> Result<BayDrawing> {
    config.ensure_valid()?;

    let panel = config.side_panel_thickness;
    let run_width = f64::from(config.num_bays) * config.bay_width;
    let width_mm = run_width + 2.0 * panel;
    let height_mm = config.total_height;

    let mut rects = Vec::new();

    // Side panels flank the whole run, not each bay.
    for x in [0.0, panel + run_width] {
        rects.push(DrawRect {
            kind: RectKind::SidePanel,
            x,
            y: 0.0,
            width: panel,
            height: height_mm,
        });
    }

    // Shelf boards span the full run between the panels. One board sits
    // below each bin row; the top cap fills the remaining slot.
    let mut cursor = config.ground_clearance;
    for height in &config.bin_heights {
        rects.push(DrawRect {
            kind: RectKind::Shelf,
            x: panel,
            y: cursor + height,
            width: run_width,
            height: config.shelf_thickness,
        });
        cursor += height + config.shelf_thickness;
    }
    if config.has_top_cap {
        rects.push(DrawRect {
            kind: RectKind::Shelf,
            x: panel,
            y: cursor,
            width: run_width,
            height: config.shelf_thickness,
        });
    }

    // Bins: each bay insets its own panel thickness on both sides, and
    // columns are separated by the split thickness.
    let bin_width = config.bin_width();
    for bay in 0..config.num_bays {
        let bay_x = panel + f64::from(bay) * config.bay_width;
        let mut row_y = config.ground_clearance;
        for height in &config.bin_heights {
            for col in 0..config.num_cols {
                let x = bay_x
                    + config.side_panel_thickness
                    + f64::from(col) * (bin_width + config.bin_split_thickness);
                rects.push(DrawRect {
                    kind: RectKind::Bin,
                    x,
                    y: row_y,
                    width: bin_width,
                    height: *height,
                });
            }
            row_y += height + config.shelf_thickness;
        }
    }

    Ok(BayDrawing {
        rects,
        width_mm,
        height_mm,
    })
}
