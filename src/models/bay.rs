//! Bay configuration data structures and validation.
//!
//! A bay configuration describes one group of identical warehouse storage
//! bays: outer dimensions, panel and shelf board thicknesses, the bin grid,
//! and per-row bin heights. All dimensions are millimetres.
//!
//! The total height of a bay is derived state. There is exactly one
//! authoritative formula ([`BayConfig::derived_total_height`]); every mutation
//! path goes through [`BayConfig::reconcile_total_height`] so the stored value
//! can never drift from the bin heights it is derived from. Hand-edited files
//! that violate the formula are reported by [`BayConfig::validation_report`].

use crate::models::RgbColor;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tolerance for comparing stored against derived total height (mm).
pub const HEIGHT_EPSILON_MM: f64 = 0.01;

/// Upper bound on bay counts and grid dimensions. Anything larger than this
/// is almost certainly a typo in a hand-edited file.
const MAX_COUNT: u8 = 64;

/// File metadata for a bay configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BayMetadata {
    /// Bay group name (e.g., "Group A")
    pub name: String,
    /// Long description
    #[serde(default)]
    pub description: String,
    /// Creator name
    #[serde(default)]
    pub author: String,
    /// Creation timestamp (ISO 8601)
    pub created: DateTime<Utc>,
    /// Last modification timestamp (ISO 8601)
    pub modified: DateTime<Utc>,
    /// Schema version (currently "1.0")
    pub version: String,
}

impl BayMetadata {
    /// Creates new metadata with the given name and current timestamps.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::validate_name(&name)?;

        let now = Utc::now();
        Ok(Self {
            name,
            description: String::new(),
            author: String::new(),
            created: now,
            modified: now,
            version: "1.0".to_string(),
        })
    }

    /// Validates a bay group name.
    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Bay name cannot be empty");
        }
        if name.len() > 100 {
            anyhow::bail!(
                "Bay name '{}' exceeds maximum length of 100 characters (got {})",
                name,
                name.len()
            );
        }
        Ok(())
    }

    /// Updates the modification timestamp to now.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}

/// A warehouse bay group configuration.
///
/// Scalar dimension fields come first so the TOML serializer emits them
/// before the `metadata` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BayConfig {
    /// Number of identical bays standing side by side
    pub num_bays: u8,
    /// Width of a single bay (mm)
    pub bay_width: f64,
    /// Total height of the structure (mm); derived, see module docs
    pub total_height: f64,
    /// Gap between the floor and the first shelf (mm)
    pub ground_clearance: f64,
    /// Shelf board thickness (mm)
    pub shelf_thickness: f64,
    /// Side panel thickness (mm)
    pub side_panel_thickness: f64,
    /// Vertical divider thickness between bin columns (mm)
    pub bin_split_thickness: f64,
    /// Number of bin columns per bay
    pub num_cols: u8,
    /// Number of bin rows per bay
    pub num_rows: u8,
    /// Whether the structure has a top cap board
    pub has_top_cap: bool,
    /// Display color for structural parts
    pub color: RgbColor,
    /// Height of each bin row (mm), ordered from the first drawn row;
    /// length must equal `num_rows`
    pub bin_heights: Vec<f64>,
    /// File metadata
    pub metadata: BayMetadata,
}

impl BayConfig {
    /// Creates a new bay configuration with the default dimensions.
    ///
    /// Defaults mirror a common single-depth shelving bay: 1050 mm wide,
    /// five 350 mm rows of four bins, 18 mm boards, 50 mm ground clearance.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let mut config = Self {
            num_bays: 2,
            bay_width: 1050.0,
            total_height: 0.0,
            ground_clearance: 50.0,
            shelf_thickness: 18.0,
            side_panel_thickness: 18.0,
            bin_split_thickness: 18.0,
            num_cols: 4,
            num_rows: 5,
            has_top_cap: true,
            color: RgbColor::new(74, 144, 226),
            bin_heights: vec![350.0; 5],
            metadata: BayMetadata::new(name)?,
        };
        config.reconcile_total_height();
        Ok(config)
    }

    /// Number of shelf boards, including the optional top cap.
    #[must_use]
    pub fn shelf_board_count(&self) -> u32 {
        u32::from(self.num_rows) + u32::from(self.has_top_cap)
    }

    /// The single authoritative derivation of the total height:
    ///
    /// `sum(bin_heights) + shelf_board_count * shelf_thickness + ground_clearance`
    #[must_use]
    pub fn derived_total_height(&self) -> f64 {
        let bins: f64 = self.bin_heights.iter().sum();
        bins + f64::from(self.shelf_board_count()) * self.shelf_thickness + self.ground_clearance
    }

    /// Recomputes `total_height` from the authoritative derivation.
    ///
    /// Returns `true` if the stored value changed.
    pub fn reconcile_total_height(&mut self) -> bool {
        let derived = self.derived_total_height();
        if (self.total_height - derived).abs() > HEIGHT_EPSILON_MM {
            self.total_height = derived;
            return true;
        }
        self.total_height = derived;
        false
    }

    /// Resizes `bin_heights` to match a new row count and reconciles.
    ///
    /// New rows take the height of the current last row (or 350 mm when
    /// there are none).
    pub fn set_num_rows(&mut self, num_rows: u8) {
        let fill = self.bin_heights.last().copied().unwrap_or(350.0);
        self.num_rows = num_rows;
        self.bin_heights.resize(usize::from(num_rows), fill);
        self.reconcile_total_height();
    }

    /// Sets the height of one bin row and reconciles.
    pub fn set_bin_height(&mut self, row: usize, height: f64) -> Result<()> {
        let slot = self
            .bin_heights
            .get_mut(row)
            .ok_or_else(|| anyhow::anyhow!("Bin row {row} out of range"))?;
        *slot = height;
        self.reconcile_total_height();
        Ok(())
    }

    /// Interior width of one bay after subtracting both side panels.
    #[must_use]
    pub fn net_width(&self) -> f64 {
        self.bay_width - 2.0 * self.side_panel_thickness
    }

    /// Width of a single bin opening.
    #[must_use]
    pub fn bin_width(&self) -> f64 {
        let cols = f64::from(self.num_cols.max(1));
        (self.net_width() - (cols - 1.0) * self.bin_split_thickness) / cols
    }

    /// Runs all validation checks and collects errors and warnings.
    #[must_use]
    pub fn validation_report(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        if self.num_bays == 0 {
            report.error(ValidationIssueKind::Dimensions, "num_bays must be at least 1");
        }
        if self.num_cols == 0 {
            report.error(ValidationIssueKind::Dimensions, "num_cols must be at least 1");
        }
        if self.num_rows == 0 {
            report.error(ValidationIssueKind::Dimensions, "num_rows must be at least 1");
        }
        for (label, count) in [
            ("num_bays", self.num_bays),
            ("num_cols", self.num_cols),
            ("num_rows", self.num_rows),
        ] {
            if count > MAX_COUNT {
                report.error(
                    ValidationIssueKind::Dimensions,
                    format!("{label} is {count}, maximum supported is {MAX_COUNT}"),
                );
            }
        }

        if self.bay_width <= 0.0 {
            report.error(ValidationIssueKind::Dimensions, "bay_width must be positive");
        }
        for (label, value) in [
            ("ground_clearance", self.ground_clearance),
            ("shelf_thickness", self.shelf_thickness),
            ("side_panel_thickness", self.side_panel_thickness),
            ("bin_split_thickness", self.bin_split_thickness),
        ] {
            if value < 0.0 {
                report.error(
                    ValidationIssueKind::Dimensions,
                    format!("{label} cannot be negative (got {value})"),
                );
            }
        }

        if self.num_cols > 0 && self.bay_width > 0.0 {
            let bin_width = self.bin_width();
            if bin_width <= 0.0 {
                report.error(
                    ValidationIssueKind::Dimensions,
                    format!(
                        "Bin width works out to {bin_width:.1} mm; reduce columns, \
                         splits or panel thickness"
                    ),
                );
            } else if bin_width < 50.0 {
                report.warning(
                    ValidationIssueKind::Dimensions,
                    format!("Bin width is only {bin_width:.1} mm"),
                );
            }
        }

        if self.bin_heights.len() != usize::from(self.num_rows) {
            report.error(
                ValidationIssueKind::Heights,
                format!(
                    "bin_heights has {} entries but num_rows is {}",
                    self.bin_heights.len(),
                    self.num_rows
                ),
            );
        }
        for (row, height) in self.bin_heights.iter().enumerate() {
            if *height <= 0.0 {
                report.error(
                    ValidationIssueKind::Heights,
                    format!("Bin row {row} height must be positive (got {height})"),
                );
            }
        }

        let derived = self.derived_total_height();
        if (self.total_height - derived).abs() > HEIGHT_EPSILON_MM {
            report.error(
                ValidationIssueKind::Heights,
                format!(
                    "total_height is {:.2} mm but bin heights, shelves and clearance \
                     derive {:.2} mm",
                    self.total_height, derived
                ),
            );
        }

        if derived > 6000.0 {
            report.warning(
                ValidationIssueKind::Heights,
                format!("Total height {derived:.0} mm is unusually tall"),
            );
        }

        report
    }

    /// Validates the configuration, failing on the first error.
    ///
    /// # Errors
    ///
    /// Returns an error describing every failed check, one per line.
    pub fn ensure_valid(&self) -> Result<()> {
        let report = self.validation_report();
        if report.is_valid() {
            return Ok(());
        }
        let messages: Vec<String> = report
            .errors
            .iter()
            .map(|issue| issue.message.clone())
            .collect();
        anyhow::bail!("Invalid bay configuration:\n  {}", messages.join("\n  "))
    }
}

/// Which validation check an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationIssueKind {
    /// Widths, counts, thicknesses and the derived bin width
    Dimensions,
    /// Bin heights and the total height invariant
    Heights,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Check the issue belongs to
    pub kind: ValidationIssueKind,
    /// Human-readable message
    pub message: String,
}

/// Collected validation errors and warnings for a bay configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Findings that make the configuration unusable
    pub errors: Vec<ValidationIssue>,
    /// Findings worth flagging but not fatal
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// True when there are no errors (warnings are allowed).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, kind: ValidationIssueKind, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            kind,
            message: message.into(),
        });
    }

    fn warning(&mut self, kind: ValidationIssueKind, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            kind,
            message: message.into(),
        });
    }
}
