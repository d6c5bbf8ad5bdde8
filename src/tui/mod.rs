//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui.

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod color_picker;
pub mod component;
pub mod export_dialog;
pub mod form;
pub mod help_overlay;
pub mod preview;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::export::{self, ExportFormat};
use crate::geometry;
use crate::models::BayConfig;
use crate::services::{self, BayFileService};

pub use color_picker::{ColorPicker, ColorPickerEvent};
pub use component::{centered_rect, Component};
pub use export_dialog::{ExportDialog, ExportDialogEvent};
pub use form::{FormEvent, FormState};
pub use help_overlay::{HelpOverlay, HelpOverlayEvent};
pub use preview::BayPreview;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Identifies which popup is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupType {
    /// Bay color palette
    ColorPicker,
    /// Format and path selection before rendering
    ExportDialog,
    /// Key binding reference
    HelpOverlay,
    /// Unsaved changes confirmation on quit
    QuitPrompt,
}

/// Holds the state of whichever popup component is active.
pub enum ActiveComponent {
    /// Color picker state
    ColorPicker(ColorPicker),
    /// Export dialog state
    ExportDialog(ExportDialog),
    /// Help overlay state
    HelpOverlay(HelpOverlay),
}

/// Central application state for the editor.
pub struct AppState {
    /// The bay configuration being edited
    pub bay: BayConfig,
    /// Where the configuration was loaded from, None for an unsaved bay
    pub file_path: Option<PathBuf>,
    /// User configuration
    pub config: Config,
    /// Main form state
    pub form: FormState,
    /// Active theme
    pub theme: Theme,
    /// Unsaved changes flag
    pub dirty: bool,
    /// Set when the event loop should exit
    pub should_quit: bool,
    /// Which popup is open, if any
    pub active_popup: Option<PopupType>,
    /// State of the open popup component
    pub active_component: Option<ActiveComponent>,
    /// Transient success/info message for the status bar
    pub status_message: Option<String>,
    /// Error shown in the blocking overlay
    pub error_message: Option<String>,
}

impl AppState {
    /// Creates the editor state for a bay configuration.
    #[must_use]
    pub fn new(bay: BayConfig, file_path: Option<PathBuf>, config: Config) -> Self {
        let theme = Theme::from_mode(config.ui.theme_mode);
        let mut state = Self {
            bay,
            file_path,
            config,
            form: FormState::new(),
            theme,
            dirty: false,
            should_quit: false,
            active_popup: None,
            active_component: None,
            status_message: None,
            error_message: None,
        };
        if state.config.ui.show_help_on_startup {
            state.open_help();
        }
        state
    }

    /// Saves the bay to its file, deriving a path for unsaved bays from the
    /// configured bays directory (or the working directory) and the name.
    pub fn save(&mut self) -> Result<()> {
        let path = match &self.file_path {
            Some(path) => path.clone(),
            None => {
                let dir = self
                    .config
                    .paths
                    .bays_dir
                    .clone()
                    .unwrap_or_else(|| PathBuf::from("."));
                services::bay_files::bay_file_path(&dir, &self.bay)
            }
        };
        BayFileService::save(&self.bay, &path)?;
        self.file_path = Some(path.clone());
        self.dirty = false;
        self.status_message = Some(format!("✓ Saved to {}", path.display()));
        Ok(())
    }

    /// Renders the bay diagram to `path` in the given format.
    pub fn export(&mut self, format: ExportFormat, path: &Path) -> Result<()> {
        let drawing = geometry::compute_drawing(&self.bay)?;
        let scale = self.config.export.png_scale;
        export::render_to_file(&self.bay, &drawing, format, path, scale)?;
        self.status_message = Some(format!("✓ Exported {} to {}", format, path.display()));
        Ok(())
    }

    /// Opens the color picker preloaded with the current bay color.
    pub fn open_color_picker(&mut self) {
        self.active_component = Some(ActiveComponent::ColorPicker(ColorPicker::new(
            self.bay.color,
        )));
        self.active_popup = Some(PopupType::ColorPicker);
    }

    /// Opens the export dialog with the configured default format.
    pub fn open_export_dialog(&mut self) {
        let format = self.config.default_export_format();
        let suggested = export::default_output_path(&self.bay, format);
        self.active_component = Some(ActiveComponent::ExportDialog(ExportDialog::new(
            format, &suggested,
        )));
        self.active_popup = Some(PopupType::ExportDialog);
    }

    /// Opens the help overlay.
    pub fn open_help(&mut self) {
        self.active_component = Some(ActiveComponent::HelpOverlay(HelpOverlay::new()));
        self.active_popup = Some(PopupType::HelpOverlay);
    }

    /// Close the currently active popup component.
    pub fn close_component(&mut self) {
        self.active_component = None;
        self.active_popup = None;
    }

    /// Quit, prompting first when there are unsaved changes.
    fn request_quit(&mut self) {
        if self.dirty {
            self.active_popup = Some(PopupType::QuitPrompt);
        } else {
            self.should_quit = true;
        }
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        // Apply theme based on user preference (Auto detects OS, Dark/Light are explicit)
        state.theme = Theme::from_mode(state.config.ui.theme_mode);

        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key_event(state, key)? {
                        break;
                    }
                }
                Event::Resize(_, _) => {
                    // Terminal resized, will re-render on next loop
                }
                _ => {}
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill the whole screen with the theme background first so the editor
    // looks the same regardless of terminal settings
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(4), // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);
    render_main_content(f, chunks[1], state);
    StatusBar::render(f, chunks[2], state, &state.theme);

    if let Some(popup_type) = state.active_popup {
        render_popup(f, popup_type, state);
    }

    // Error overlay goes on top of everything
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

/// Render title bar with bay name and dirty indicator
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let dirty_indicator = if state.dirty { " *" } else { "" };
    let title = format!(
        " {} - {} bays, {} rows × {} cols{}",
        state.bay.metadata.name,
        state.bay.num_bays,
        state.bay.num_rows,
        state.bay.num_cols,
        dirty_indicator
    );

    let title_widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(state.theme.primary))
                .style(Style::default().bg(state.theme.background)),
        );
    f.render_widget(title_widget, area);
}

/// Render the form and preview side by side
fn render_main_content(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(48), Constraint::Min(20)])
        .split(area);

    state.form.render(f, chunks[0], &state.bay, &state.theme);
    BayPreview::render(f, chunks[1], &state.bay, &state.theme);
}

/// Render the active popup
fn render_popup(f: &mut Frame, popup_type: PopupType, state: &AppState) {
    match popup_type {
        PopupType::ColorPicker | PopupType::ExportDialog | PopupType::HelpOverlay => {
            match &state.active_component {
                Some(ActiveComponent::ColorPicker(picker)) => {
                    picker.render(f, f.area(), &state.theme);
                }
                Some(ActiveComponent::ExportDialog(dialog)) => {
                    dialog.render(f, f.area(), &state.theme);
                }
                Some(ActiveComponent::HelpOverlay(overlay)) => {
                    overlay.render(f, f.area(), &state.theme);
                }
                None => {}
            }
        }
        PopupType::QuitPrompt => render_quit_prompt(f, state),
    }
}

/// Render the unsaved changes prompt
fn render_quit_prompt(f: &mut Frame, state: &AppState) {
    let theme = &state.theme;
    let popup_area = centered_rect(45, 25, f.area());
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Unsaved changes",
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Save before quitting?",
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y", Style::default().fg(theme.accent)),
            Span::styled(" Save and quit | ", Style::default().fg(theme.text_muted)),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::styled(" Discard and quit | ", Style::default().fg(theme.text_muted)),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::styled(" Cancel", Style::default().fg(theme.text_muted)),
        ]),
    ];

    let popup = Paragraph::new(lines)
        .style(Style::default().bg(theme.surface).fg(theme.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Quit ")
                .border_style(Style::default().fg(theme.warning)),
        );
    f.render_widget(popup, popup_area);
}

/// Render a blocking error overlay
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let popup_area = centered_rect(60, 30, f.area());
    f.render_widget(Clear, popup_area);

    let text = format!("\n  {error}\n\n  Press any key to dismiss");
    let popup = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(theme.surface).fg(theme.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Error ")
                .border_style(Style::default().fg(theme.error)),
        );
    f.render_widget(popup, popup_area);
}

/// Handle a key event. Returns true when the editor should exit.
fn handle_key_event(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    // A visible error blocks everything until dismissed
    if state.error_message.is_some() {
        state.error_message = None;
        return Ok(false);
    }

    if state.active_popup == Some(PopupType::QuitPrompt) {
        return handle_quit_prompt(state, key);
    }

    if state.active_component.is_some() {
        handle_component_input(state, key);
        return Ok(false);
    }

    state.status_message = None;
    if let Some(event) = state.form.handle_input(key, &mut state.bay) {
        match event {
            FormEvent::Changed => state.dirty = true,
            FormEvent::PickColor => state.open_color_picker(),
            FormEvent::Save => {
                if let Err(error) = state.save() {
                    state.error_message = Some(format!("Save failed: {error}"));
                }
            }
            FormEvent::Export => state.open_export_dialog(),
            FormEvent::ShowHelp => state.open_help(),
            FormEvent::Quit => state.request_quit(),
        }
    }
    Ok(false)
}

/// Route input to the active popup component and apply its events.
///
/// The component is taken out of the state while it handles input so its
/// events can freely mutate the rest of the state.
fn handle_component_input(state: &mut AppState, key: KeyEvent) {
    let Some(mut component) = state.active_component.take() else {
        return;
    };
    let mut still_open = true;

    match &mut component {
        ActiveComponent::ColorPicker(picker) => {
            if let Some(event) = picker.handle_input(key) {
                still_open = false;
                if let ColorPickerEvent::Selected(color) = event {
                    state.bay.color = color;
                    state.bay.metadata.touch();
                    state.dirty = true;
                }
            }
        }
        ActiveComponent::ExportDialog(dialog) => {
            if let Some(event) = dialog.handle_input(key) {
                still_open = false;
                if let ExportDialogEvent::Confirm { format, path } = event {
                    if let Err(error) = state.export(format, &path) {
                        state.error_message = Some(format!("Export failed: {error}"));
                    }
                }
            }
        }
        ActiveComponent::HelpOverlay(overlay) => {
            if overlay.handle_input(key).is_some() {
                still_open = false;
            }
        }
    }

    if still_open {
        state.active_component = Some(component);
    } else {
        state.close_component();
    }
}

/// Handle input while the quit prompt is open.
fn handle_quit_prompt(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    use crossterm::event::KeyCode;
    match key.code {
        KeyCode::Char('y') => {
            state.active_popup = None;
            match state.save() {
                Ok(()) => Ok(true),
                Err(error) => {
                    state.error_message = Some(format!("Save failed: {error}"));
                    Ok(false)
                }
            }
        }
        KeyCode::Char('n') => Ok(true),
        KeyCode::Esc | KeyCode::Char('q') => {
            state.active_popup = None;
            Ok(false)
        }
        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> AppState {
        let mut config = Config::default();
        config.ui.show_help_on_startup = false;
        AppState::new(BayConfig::new("Test Group").unwrap(), None, config)
    }

    #[test]
    fn test_new_state_is_clean() {
        let state = state();
        assert!(!state.dirty);
        assert!(state.active_popup.is_none());
        assert!(state.file_path.is_none());
    }

    #[test]
    fn test_help_opens_on_startup_when_configured() {
        let mut config = Config::default();
        config.ui.show_help_on_startup = true;
        let state = AppState::new(BayConfig::new("Test").unwrap(), None, config);
        assert_eq!(state.active_popup, Some(PopupType::HelpOverlay));
    }

    #[test]
    fn test_quit_without_changes_exits_directly() {
        let mut state = state();
        let quit = handle_key_event(&mut state, key(KeyCode::Char('q'))).unwrap();
        assert!(!quit);
        assert!(state.should_quit);
    }

    #[test]
    fn test_quit_with_changes_prompts() {
        let mut state = state();
        state.dirty = true;
        handle_key_event(&mut state, key(KeyCode::Char('q'))).unwrap();
        assert!(!state.should_quit);
        assert_eq!(state.active_popup, Some(PopupType::QuitPrompt));

        // Esc keeps editing, n discards
        handle_key_event(&mut state, key(KeyCode::Esc)).unwrap();
        assert!(state.active_popup.is_none());

        handle_key_event(&mut state, key(KeyCode::Char('q'))).unwrap();
        let quit = handle_key_event(&mut state, key(KeyCode::Char('n'))).unwrap();
        assert!(quit);
    }

    #[test]
    fn test_error_overlay_blocks_and_dismisses() {
        let mut state = state();
        state.error_message = Some("boom".to_string());
        let quit = handle_key_event(&mut state, key(KeyCode::Char('q'))).unwrap();
        assert!(!quit);
        assert!(state.error_message.is_none());
        assert!(!state.should_quit);
    }

    #[test]
    fn test_color_picker_flow() {
        let mut state = state();
        // Navigate to the color field and open the picker
        for _ in 0..10 {
            handle_key_event(&mut state, key(KeyCode::Down)).unwrap();
        }
        handle_key_event(&mut state, key(KeyCode::Enter)).unwrap();
        assert_eq!(state.active_popup, Some(PopupType::ColorPicker));

        // Pick the second swatch
        handle_key_event(&mut state, key(KeyCode::Right)).unwrap();
        handle_key_event(&mut state, key(KeyCode::Enter)).unwrap();
        assert!(state.active_popup.is_none());
        assert!(state.dirty);
        assert_eq!(state.bay.color.to_hex(), "#2E5C9E");
    }

    #[test]
    fn test_export_dialog_opens_with_default_format() {
        let mut state = state();
        handle_key_event(&mut state, key(KeyCode::Char('e'))).unwrap();
        assert_eq!(state.active_popup, Some(PopupType::ExportDialog));

        // Cancel closes without touching the bay
        handle_key_event(&mut state, key(KeyCode::Esc)).unwrap();
        assert!(state.active_popup.is_none());
        assert!(!state.dirty);
    }

    #[test]
    fn test_save_derives_path_from_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state();
        state.config.paths.bays_dir = Some(dir.path().to_path_buf());
        state.dirty = true;

        state.save().unwrap();
        assert!(!state.dirty);
        let expected = dir.path().join("test_group.toml");
        assert_eq!(state.file_path.as_deref(), Some(expected.as_path()));
        assert!(expected.exists());
    }
}
