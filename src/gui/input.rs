//! Keyboard focus tracking.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for generating unique view IDs.
static VIEW_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a view instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(u64);

impl ViewId {
    /// Create a new unique view ID. Each call returns a different ID.
    pub fn next() -> Self {
        Self(VIEW_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Routes keyboard input to the view that holds focus.
#[derive(Debug, Default)]
pub struct InputSystem {
    keyboard_focus: Option<ViewId>,
}

impl InputSystem {
    /// No view focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Give keyboard focus to `view`.
    pub fn set_keyboard_focus(&mut self, view: ViewId) {
        if self.keyboard_focus != Some(view) {
            tracing::trace!(view = view.get(), "keyboard focus moved");
        }
        self.keyboard_focus = Some(view);
    }

    /// The focused view, if any.
    pub fn keyboard_focus(&self) -> Option<ViewId> {
        self.keyboard_focus
    }

    /// Whether `view` has keyboard focus.
    pub fn has_focus(&self, view: ViewId) -> bool {
        self.keyboard_focus == Some(view)
    }

    /// Drop focus if `view` holds it.
    pub fn release(&mut self, view: ViewId) {
        if self.has_focus(view) {
            self.keyboard_focus = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_ids_are_unique() {
        assert_ne!(ViewId::next(), ViewId::next());
    }

    #[test]
    fn focus_moves_to_last_view() {
        let a = ViewId::next();
        let b = ViewId::next();
        let mut input = InputSystem::new();

        input.set_keyboard_focus(a);
        input.set_keyboard_focus(b);

        assert!(input.has_focus(b));
        assert!(!input.has_focus(a));
    }

    #[test]
    fn release_only_affects_the_focused_view() {
        let a = ViewId::next();
        let b = ViewId::next();
        let mut input = InputSystem::new();
        input.set_keyboard_focus(a);

        input.release(b);
        assert_eq!(input.keyboard_focus(), Some(a));

        input.release(a);
        assert_eq!(input.keyboard_focus(), None);
    }
}
