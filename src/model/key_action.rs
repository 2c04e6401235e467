//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Keys without a binding are offered to the focused page view first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll the page body up by one row. Default: k/↑
    ScrollUp,
    /// Scroll the page body down by one row. Default: j/↓
    ScrollDown,
    /// Scroll the page horizontally left. Default: h/←
    ScrollLeft,
    /// Scroll the page horizontally right. Default: l/→
    ScrollRight,
    /// Scroll up by one viewport height. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one viewport height. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the top of the page via a scroll request. Default: g/Home
    ScrollToTop,
    /// Jump to the end of the page via a scroll request. Default: G/End
    ScrollToBottom,

    // Pages
    /// Open the next page. Default: ]/Tab
    NextPage,
    /// Open the previous page. Default: [/Shift+Tab
    PrevPage,
    /// Toggle the preview tooltip of the active page. Default: p
    TogglePreview,
    /// Open or close a secondary view of the active page. Default: v
    ToggleSecondaryView,
    /// Show the pages the active view can switch to. Default: m
    ToggleModelDropdown,
    /// Move keyboard focus between the primary and secondary view. Default: o
    CycleFocus,

    // Page content
    /// Dismiss the error banner of the active page. Default: x
    DismissError,
    /// Export the full active page to a text file. Default: e/Ctrl+s
    ExportScreenshot,

    // Search
    /// Start typing a search query. Default: //Ctrl+f
    StartSearch,
    /// Apply the typed query to the active page. Default: Enter
    SubmitSearch,
    /// Stop typing and clear the query. Default: Esc
    CancelSearch,

    // Application
    /// Quit. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Every action, in declaration order.
    pub const ALL: [KeyAction; 20] = [
        KeyAction::ScrollUp,
        KeyAction::ScrollDown,
        KeyAction::ScrollLeft,
        KeyAction::ScrollRight,
        KeyAction::PageUp,
        KeyAction::PageDown,
        KeyAction::ScrollToTop,
        KeyAction::ScrollToBottom,
        KeyAction::NextPage,
        KeyAction::PrevPage,
        KeyAction::TogglePreview,
        KeyAction::ToggleSecondaryView,
        KeyAction::ToggleModelDropdown,
        KeyAction::CycleFocus,
        KeyAction::DismissError,
        KeyAction::ExportScreenshot,
        KeyAction::StartSearch,
        KeyAction::SubmitSearch,
        KeyAction::CancelSearch,
        KeyAction::Quit,
    ];

    /// Name used for this action in the `[keybindings]` config table.
    pub fn name(self) -> &'static str {
        match self {
            KeyAction::ScrollUp => "scroll_up",
            KeyAction::ScrollDown => "scroll_down",
            KeyAction::ScrollLeft => "scroll_left",
            KeyAction::ScrollRight => "scroll_right",
            KeyAction::PageUp => "page_up",
            KeyAction::PageDown => "page_down",
            KeyAction::ScrollToTop => "scroll_to_top",
            KeyAction::ScrollToBottom => "scroll_to_bottom",
            KeyAction::NextPage => "next_page",
            KeyAction::PrevPage => "prev_page",
            KeyAction::TogglePreview => "toggle_preview",
            KeyAction::ToggleSecondaryView => "toggle_secondary_view",
            KeyAction::ToggleModelDropdown => "toggle_model_dropdown",
            KeyAction::CycleFocus => "cycle_focus",
            KeyAction::DismissError => "dismiss_error",
            KeyAction::ExportScreenshot => "export_screenshot",
            KeyAction::StartSearch => "start_search",
            KeyAction::SubmitSearch => "submit_search",
            KeyAction::CancelSearch => "cancel_search",
            KeyAction::Quit => "quit",
        }
    }

    /// Look an action up by its config name.
    pub fn from_name(name: &str) -> Option<KeyAction> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_for_every_action() {
        for action in KeyAction::ALL {
            assert_eq!(KeyAction::from_name(action.name()), Some(action));
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(KeyAction::from_name("toggle_wrap"), None);
    }
}
