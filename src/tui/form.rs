//! Bay configuration form.
//!
//! The left-hand panel of the editor: a vertical list of editable fields
//! covering counts, dimensions, the top cap flag, the color and one height
//! per bin row. Values are committed on Enter and validated before they
//! reach the configuration, so the preview always renders a valid bay.

use crate::models::BayConfig;
use crate::tui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Events emitted by the form for the parent to act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// A field value was committed; the preview and dirty flag need updating
    Changed,
    /// User wants the color picker for the bay color
    PickColor,
    /// User pressed Ctrl+S
    Save,
    /// User wants the export dialog
    Export,
    /// User pressed ?
    ShowHelp,
    /// User wants to quit
    Quit,
}

/// Identifies one editable field of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    /// Group name (metadata)
    Name,
    /// Number of bays in the run
    NumBays,
    /// Width of a single bay in mm
    BayWidth,
    /// Gap under the lowest shelf board in mm
    GroundClearance,
    /// Shelf board thickness in mm
    ShelfThickness,
    /// Side panel thickness in mm
    SidePanelThickness,
    /// Vertical split thickness between bin columns in mm
    BinSplitThickness,
    /// Number of bin columns per bay
    NumCols,
    /// Number of bin rows per bay
    NumRows,
    /// Whether a top cap board closes the bay
    TopCap,
    /// Bay color
    Color,
    /// Height of one bin row in mm (0 = bottom row)
    BinHeight(usize),
}

impl FieldId {
    /// Label shown in the form.
    fn label(self) -> String {
        match self {
            Self::Name => "Name".to_string(),
            Self::NumBays => "Bays".to_string(),
            Self::BayWidth => "Bay width (mm)".to_string(),
            Self::GroundClearance => "Ground clearance (mm)".to_string(),
            Self::ShelfThickness => "Shelf thickness (mm)".to_string(),
            Self::SidePanelThickness => "Side panel (mm)".to_string(),
            Self::BinSplitThickness => "Bin split (mm)".to_string(),
            Self::NumCols => "Bin columns".to_string(),
            Self::NumRows => "Bin rows".to_string(),
            Self::TopCap => "Top cap".to_string(),
            Self::Color => "Color".to_string(),
            Self::BinHeight(row) => format!("Row {} height (mm)", row + 1),
        }
    }

    /// One-line description for the status bar.
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Name => "Display name for this bay group",
            Self::NumBays => "Number of bays standing side by side",
            Self::BayWidth => "Outer width of a single bay",
            Self::GroundClearance => "Gap between the floor and the lowest shelf board",
            Self::ShelfThickness => "Thickness of each horizontal shelf board",
            Self::SidePanelThickness => "Thickness of the vertical side panels",
            Self::BinSplitThickness => "Thickness of the splits between bin columns",
            Self::NumCols => "Bin columns per bay",
            Self::NumRows => "Bin rows per bay (each row has its own height)",
            Self::TopCap => "Space or Enter toggles the top cap board",
            Self::Color => "Enter opens the color picker",
            Self::BinHeight(_) => "Clear height of this bin row",
        }
    }

    const fn is_toggle(self) -> bool {
        matches!(self, Self::TopCap)
    }

    const fn is_picker(self) -> bool {
        matches!(self, Self::Color)
    }

    /// Current value of this field, formatted for display and editing.
    fn current_value(self, config: &BayConfig) -> String {
        match self {
            Self::Name => config.metadata.name.clone(),
            Self::NumBays => config.num_bays.to_string(),
            Self::BayWidth => fmt_mm(config.bay_width),
            Self::GroundClearance => fmt_mm(config.ground_clearance),
            Self::ShelfThickness => fmt_mm(config.shelf_thickness),
            Self::SidePanelThickness => fmt_mm(config.side_panel_thickness),
            Self::BinSplitThickness => fmt_mm(config.bin_split_thickness),
            Self::NumCols => config.num_cols.to_string(),
            Self::NumRows => config.num_rows.to_string(),
            Self::TopCap => if config.has_top_cap { "yes" } else { "no" }.to_string(),
            Self::Color => config.color.to_hex(),
            Self::BinHeight(row) => {
                fmt_mm(config.bin_heights.get(row).copied().unwrap_or_default())
            }
        }
    }
}

/// Formats a millimetre value without trailing noise.
fn fmt_mm(value: f64) -> String {
    if (value - value.round()).abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Form state: selection, edit buffer and last validation error.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// Index into `fields()`
    selected: usize,
    /// Edit buffer, present while a field is being edited
    input: Option<String>,
    /// Validation error from the last rejected commit
    error: Option<String>,
}

impl FormState {
    /// Creates a form with the first field selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The full field list for the current configuration. The tail grows
    /// and shrinks with the number of bin rows.
    fn fields(config: &BayConfig) -> Vec<FieldId> {
        let mut fields = vec![
            FieldId::Name,
            FieldId::NumBays,
            FieldId::BayWidth,
            FieldId::GroundClearance,
            FieldId::ShelfThickness,
            FieldId::SidePanelThickness,
            FieldId::BinSplitThickness,
            FieldId::NumCols,
            FieldId::NumRows,
            FieldId::TopCap,
            FieldId::Color,
        ];
        for row in 0..config.bin_heights.len() {
            fields.push(FieldId::BinHeight(row));
        }
        fields
    }

    /// The currently selected field.
    #[must_use]
    pub fn selected_field(&self, config: &BayConfig) -> FieldId {
        let fields = Self::fields(config);
        fields[self.selected.min(fields.len() - 1)]
    }

    /// True while a field is in edit mode.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.input.is_some()
    }

    fn select_next(&mut self, config: &BayConfig) {
        let count = Self::fields(config).len();
        self.selected = (self.selected + 1) % count;
    }

    fn select_previous(&mut self, config: &BayConfig) {
        let count = Self::fields(config).len();
        self.selected = (self.selected + count - 1) % count;
    }

    fn begin_edit(&mut self, config: &BayConfig) {
        let field = self.selected_field(config);
        self.input = Some(field.current_value(config));
        self.error = None;
    }

    fn cancel_edit(&mut self) {
        self.input = None;
        self.error = None;
    }

    /// Applies the edit buffer to the configuration. Returns false and
    /// keeps edit mode when the value is rejected.
    fn commit(&mut self, config: &mut BayConfig) -> bool {
        let Some(input) = self.input.clone() else {
            return false;
        };
        let field = self.selected_field(config);
        // Edits land on a draft so a rejected value never reaches the preview
        let mut draft = config.clone();
        match apply_field(&mut draft, field, input.trim()) {
            Ok(()) => {
                draft.metadata.touch();
                *config = draft;
                self.input = None;
                self.error = None;
                true
            }
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }

    /// Handle a key event. Mutates the configuration when a value commits.
    pub fn handle_input(&mut self, key: KeyEvent, config: &mut BayConfig) -> Option<FormEvent> {
        if self.is_editing() {
            return self.handle_edit_input(key, config);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => Some(FormEvent::Save),
                KeyCode::Char('e') => Some(FormEvent::Export),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                self.select_previous(config);
                None
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.select_next(config);
                None
            }
            KeyCode::Char(' ') if self.selected_field(config).is_toggle() => {
                config.has_top_cap = !config.has_top_cap;
                config.reconcile_total_height();
                config.metadata.touch();
                Some(FormEvent::Changed)
            }
            KeyCode::Enter => {
                let field = self.selected_field(config);
                if field.is_toggle() {
                    config.has_top_cap = !config.has_top_cap;
                    config.reconcile_total_height();
                    config.metadata.touch();
                    Some(FormEvent::Changed)
                } else if field.is_picker() {
                    Some(FormEvent::PickColor)
                } else {
                    self.begin_edit(config);
                    None
                }
            }
            KeyCode::Char('e') => Some(FormEvent::Export),
            KeyCode::Char('c') => Some(FormEvent::PickColor),
            KeyCode::Char('?') => Some(FormEvent::ShowHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(FormEvent::Quit),
            _ => None,
        }
    }

    fn handle_edit_input(&mut self, key: KeyEvent, config: &mut BayConfig) -> Option<FormEvent> {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let accept = match self.selected_field(config) {
                    FieldId::Name => true,
                    _ => c.is_ascii_digit() || c == '.',
                };
                if accept {
                    if let Some(input) = self.input.as_mut() {
                        input.push(c);
                    }
                }
                None
            }
            KeyCode::Backspace => {
                if let Some(input) = self.input.as_mut() {
                    input.pop();
                }
                None
            }
            KeyCode::Enter => {
                if self.commit(config) {
                    Some(FormEvent::Changed)
                } else {
                    None
                }
            }
            KeyCode::Esc => {
                self.cancel_edit();
                None
            }
            _ => None,
        }
    }

    /// Render the form panel.
    pub fn render(&self, f: &mut Frame, area: Rect, config: &BayConfig, theme: &Theme) {
        let fields = Self::fields(config);
        let selected = self.selected.min(fields.len() - 1);

        let mut lines: Vec<Line> = Vec::with_capacity(fields.len() + 3);
        for (i, field) in fields.iter().enumerate() {
            let is_selected = i == selected;
            let marker = if is_selected { "▶ " } else { "  " };

            let value_span = if is_selected && self.is_editing() {
                let buffer = self.input.as_deref().unwrap_or("");
                Span::styled(
                    format!("{buffer}█"),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else if *field == FieldId::Color {
                // Hex text on a swatch of the color itself
                Span::styled(
                    format!(" {} ", field.current_value(config)),
                    Style::default()
                        .fg(config.color.contrast_color().to_ratatui_color())
                        .bg(config.color.to_ratatui_color()),
                )
            } else {
                Span::styled(field.current_value(config), Style::default().fg(theme.text))
            };

            let label_style = if is_selected {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_secondary)
            };

            let mut line = Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.accent)),
                Span::styled(format!("{:<22}", field.label()), label_style),
                value_span,
            ]);
            if is_selected {
                line = line.style(Style::default().bg(theme.highlight_bg));
            }
            lines.push(line);
        }

        // Derived total, read only
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  Total height        ", Style::default().fg(theme.text_muted)),
            Span::styled(
                format!("{} mm (derived)", fmt_mm(config.derived_total_height())),
                Style::default().fg(theme.text_muted),
            ),
        ]));

        if let Some(ref error) = self.error {
            lines.push(Line::from(Span::styled(
                format!("  ✗ {error}"),
                Style::default().fg(theme.error),
            )));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Bay Configuration ")
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));

        let scroll = scroll_offset(selected, fields.len(), area.height.saturating_sub(2));
        let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
        f.render_widget(paragraph, area);
    }
}

/// Keeps the selected row visible when the field list outgrows the panel.
fn scroll_offset(selected: usize, total: usize, visible: u16) -> u16 {
    let visible = visible.max(1) as usize;
    if total <= visible || selected < visible {
        0
    } else {
        (selected + 1 - visible) as u16
    }
}

/// Parses and applies one field value, reconciling the derived total height
/// for any change that affects the stack.
fn apply_field(config: &mut BayConfig, field: FieldId, value: &str) -> Result<(), String> {
    match field {
        FieldId::Name => {
            if value.is_empty() {
                return Err("Name must not be empty".to_string());
            }
            if value.len() > 100 {
                return Err("Name must be 100 characters or less".to_string());
            }
            config.metadata.name = value.to_string();
        }
        FieldId::NumBays => config.num_bays = parse_count(value, "Bays")?,
        FieldId::NumCols => config.num_cols = parse_count(value, "Bin columns")?,
        FieldId::NumRows => {
            let rows = parse_count(value, "Bin rows")?;
            config.set_num_rows(rows);
        }
        FieldId::BayWidth => config.bay_width = parse_mm(value, "Bay width")?,
        FieldId::GroundClearance => {
            config.ground_clearance = parse_mm_zero_ok(value, "Ground clearance")?;
        }
        FieldId::ShelfThickness => config.shelf_thickness = parse_mm(value, "Shelf thickness")?,
        FieldId::SidePanelThickness => {
            config.side_panel_thickness = parse_mm(value, "Side panel")?;
        }
        FieldId::BinSplitThickness => {
            config.bin_split_thickness = parse_mm(value, "Bin split")?;
        }
        FieldId::BinHeight(row) => {
            let height = parse_mm(value, "Row height")?;
            config
                .set_bin_height(row, height)
                .map_err(|e| e.to_string())?;
        }
        FieldId::TopCap | FieldId::Color => {}
    }

    config.reconcile_total_height();

    // Reject a commit that would leave the geometry unbuildable, e.g. a bay
    // too narrow for its panels and splits.
    let report = config.validation_report();
    if let Some(issue) = report.errors.first() {
        return Err(issue.message.clone());
    }
    Ok(())
}

fn parse_count(value: &str, label: &str) -> Result<u8, String> {
    let count: u8 = value
        .parse()
        .map_err(|_| format!("{label} must be a whole number"))?;
    if count == 0 {
        return Err(format!("{label} must be at least 1"));
    }
    Ok(count)
}

fn parse_mm(value: &str, label: &str) -> Result<f64, String> {
    let mm = parse_mm_zero_ok(value, label)?;
    if mm <= 0.0 {
        return Err(format!("{label} must be greater than zero"));
    }
    Ok(mm)
}

fn parse_mm_zero_ok(value: &str, label: &str) -> Result<f64, String> {
    let mm: f64 = value
        .parse()
        .map_err(|_| format!("{label} must be a number"))?;
    if !mm.is_finite() || mm < 0.0 {
        return Err(format!("{label} must be zero or more"));
    }
    Ok(mm)
}
