//! TUI rendering and terminal management (impure shell).

pub mod layout;

pub use layout::{render_layout, LayoutAreas};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::gui::{ColorConfig, Theme};
use crate::model::{AppError, KeyAction, Project};
use crate::state::{search_input, Workspace};
use crate::view::ViewFactory;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Position, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Rows scrolled per mouse wheel notch.
const WHEEL_ROWS: i32 = 3;

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    workspace: Workspace,
    key_bindings: KeyBindings,
    theme: Theme,
    screenshot_dir: PathBuf,
    /// Areas of the last frame (for mouse click detection)
    last_areas: Option<LayoutAreas>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Set up the terminal in raw mode with alternate screen and open
    /// `workspace`.
    pub fn new(
        workspace: Workspace,
        config: &ResolvedConfig,
        key_bindings: KeyBindings,
    ) -> Result<Self, AppError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, workspace, config, key_bindings))
    }

    /// Run the main event loop until the user quits.
    ///
    /// Event-driven: the screen is redrawn after each input or resize event only.
    pub fn run(&mut self) -> Result<(), AppError> {
        self.draw()?;
        loop {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                }
                _ => continue,
            }
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Build the app over an already set up terminal.
    pub fn with_terminal(
        terminal: Terminal<B>,
        workspace: Workspace,
        config: &ResolvedConfig,
        key_bindings: KeyBindings,
    ) -> Self {
        Self {
            terminal,
            workspace,
            key_bindings,
            theme: Theme::with_color_config(ColorConfig::from_env_and_args(config.no_color)),
            screenshot_dir: config.screenshot_dir.clone(),
            last_areas: None,
        }
    }

    /// The host state.
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// The terminal being drawn to.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.workspace.search().is_typing() {
            match key.code {
                KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.workspace
                        .update_search(|state| search_input::handle_char_input(state, ch));
                }
                KeyCode::Backspace => self.workspace.update_search(search_input::handle_backspace),
                KeyCode::Left => self.workspace.update_search(search_input::handle_cursor_left),
                KeyCode::Right => self.workspace.update_search(search_input::handle_cursor_right),
                KeyCode::Enter => self.workspace.submit_search(),
                KeyCode::Esc => self.workspace.cancel_search(),
                _ => {}
            }
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            // Unbound keys belong to the focused page view
            if self.workspace.control_key(key.code) {
                debug!(?key, "key handled by page view");
            }
            return false;
        };

        match action {
            KeyAction::ScrollUp => self.workspace.scroll_by(0, -1),
            KeyAction::ScrollDown => self.workspace.scroll_by(0, 1),
            KeyAction::ScrollLeft => self.workspace.scroll_by(-1, 0),
            KeyAction::ScrollRight => self.workspace.scroll_by(1, 0),
            KeyAction::PageUp => self.workspace.scroll_pages(-1),
            KeyAction::PageDown => self.workspace.scroll_pages(1),
            KeyAction::ScrollToTop => self.workspace.scroll_to_top(),
            KeyAction::ScrollToBottom => self.workspace.scroll_to_bottom(),
            KeyAction::NextPage => self.workspace.next_page(),
            KeyAction::PrevPage => self.workspace.prev_page(),
            KeyAction::TogglePreview => {
                self.workspace.preview_visible = !self.workspace.preview_visible;
            }
            KeyAction::ToggleSecondaryView => self.workspace.toggle_secondary(),
            KeyAction::ToggleModelDropdown => {
                self.workspace.dropdown_visible = !self.workspace.dropdown_visible;
            }
            KeyAction::CycleFocus => self.workspace.cycle_focus(),
            KeyAction::DismissError => self.workspace.dismiss_error(),
            KeyAction::ExportScreenshot => self.export(),
            KeyAction::StartSearch => self.workspace.update_search(search_input::start),
            KeyAction::SubmitSearch => self.workspace.submit_search(),
            KeyAction::CancelSearch => {
                if self.workspace.preview_visible || self.workspace.dropdown_visible {
                    self.workspace.preview_visible = false;
                    self.workspace.dropdown_visible = false;
                } else {
                    self.workspace.cancel_search();
                }
            }
            KeyAction::Quit => return true,
        }
        false
    }

    fn export(&mut self) {
        match self.workspace.export_screenshot(&self.screenshot_dir) {
            Ok(path) => self
                .workspace
                .set_status(format!("Saved {}", path.display())),
            Err(error) => {
                warn!(%error, "screenshot export failed");
                self.workspace.set_status(format!("Export failed: {error}"));
            }
        }
    }

    /// Handle a single mouse event
    ///
    /// The wheel scrolls the focused view; a left click in the page list opens
    /// the clicked page.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.workspace.scroll_by(0, WHEEL_ROWS),
            MouseEventKind::ScrollUp => self.workspace.scroll_by(0, -WHEEL_ROWS),
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(areas) = self.last_areas else {
                    return;
                };
                let position = Position::new(mouse.column, mouse.row);
                if areas.page_list.contains(position) {
                    let index = usize::from(mouse.row - areas.page_list.y);
                    self.workspace.open_page(index);
                }
            }
            _ => {}
        }
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), AppError> {
        let workspace = &mut self.workspace;
        let theme = &self.theme;
        let mut areas = LayoutAreas::default();
        self.terminal.draw(|frame| {
            areas = render_layout(frame, workspace, theme);
        })?;
        self.last_areas = Some(areas);
        Ok(())
    }
}

/// Initialize and run the TUI over the built-in sample project.
///
/// Handles terminal setup, runs the event loop, and restores the terminal on
/// exit. Logging must be initialized by the caller.
pub fn run(config: &ResolvedConfig, start_page: Option<&str>) -> Result<(), AppError> {
    let key_bindings = KeyBindings::default().with_overrides(&config.keybindings)?;
    let theme = Theme::with_color_config(ColorConfig::from_env_and_args(config.no_color));
    let mut workspace = Workspace::new(
        Project::sample(),
        &ViewFactory::with_builtin_views(),
        theme,
        config.page_view_options(),
    );
    if let Some(name) = start_page {
        workspace.open_page_named(name);
    }
    info!(pages = workspace.project().len(), "starting TUI");

    let mut app = TuiApp::new(workspace, config, key_bindings)?;

    // Restore the terminal even if the loop failed
    let result = app.run();
    restore_terminal()?;
    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), AppError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

impl<B> std::fmt::Debug for TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TuiApp")
            .field("workspace", &self.workspace)
            .field("screenshot_dir", &self.screenshot_dir)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
