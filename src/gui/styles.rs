//! Theme palette for page views.
//!
//! Provides the background used to clear panes and exported screenshots, plus the
//! styles region builders use for text, column headers and error banners.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Explicit configuration, ignoring the environment.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Theme =====

/// Styles shared by every region of a page view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Pane and screenshot background.
    pub background: Color,
    /// Regular text.
    pub text: Style,
    /// Column titles and section headings.
    pub heading: Style,
    /// Secondary text (units, hints).
    pub muted: Style,
    /// Rows matching the active search query.
    pub highlight: Style,
    /// Error banner body.
    pub error_banner: Style,
    /// Error banner dismiss button.
    pub error_dismiss: Style,
    /// Scrollbar track.
    pub scrollbar_track: Style,
    /// Scrollbar thumb.
    pub scrollbar_thumb: Style,
}

impl Theme {
    /// Default palette honoring `NO_COLOR`.
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }

    /// Palette for the given color configuration.
    ///
    /// With colors disabled every style is the terminal default, except that
    /// headings and banners keep text modifiers so they remain distinguishable.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                background: Color::Black,
                text: Style::default().fg(Color::White),
                heading: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                muted: Style::default().fg(Color::DarkGray),
                highlight: Style::default().fg(Color::Yellow),
                error_banner: Style::default().fg(Color::White).bg(Color::Red),
                error_dismiss: Style::default()
                    .fg(Color::Yellow)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
                scrollbar_track: Style::default().fg(Color::DarkGray),
                scrollbar_thumb: Style::default().fg(Color::Gray),
            }
        } else {
            Self {
                background: Color::Reset,
                text: Style::default(),
                heading: Style::default().add_modifier(Modifier::BOLD),
                muted: Style::default(),
                highlight: Style::default().add_modifier(Modifier::UNDERLINED),
                error_banner: Style::default().add_modifier(Modifier::REVERSED),
                error_dismiss: Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
                scrollbar_track: Style::default(),
                scrollbar_thumb: Style::default(),
            }
        }
    }

    /// Style used to clear a pane or surface.
    pub fn base(&self) -> Style {
        Style::default().bg(self.background)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

// ===== Tests =====
