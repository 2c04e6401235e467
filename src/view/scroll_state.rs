//! Deferred scroll requests.
//!
//! A scroll request can arrive at any time (a [`SetScrollPositionMessage`] or a
//! page being attached), but it can only be applied once the frame's layout has
//! bounded the scroll range. [`PendingScroll`] carries the request from where it
//! is received to where the view applies it.

use crate::gui::{Gui, HandlerId, SetScrollPositionMessage};
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

/// A scroll request waiting for the next layout pass.
#[derive(Debug, Default)]
pub struct PendingScroll {
    target: Cell<Option<u16>>,
    requested: Cell<bool>,
}

impl PendingScroll {
    /// Request an explicit vertical offset.
    pub fn request(&self, top: u16) {
        self.target.set(Some(top));
        self.requested.set(true);
    }

    /// Request that the offset be restored from the bound page.
    pub fn request_restore(&self) {
        self.requested.set(true);
    }

    /// Whether a request waits to be applied.
    pub fn is_requested(&self) -> bool {
        self.requested.get()
    }

    /// Explicit target of the waiting request, if any.
    pub fn target(&self) -> Option<u16> {
        self.target.get()
    }

    /// Clear the request flag, returning whether it was set.
    pub fn clear_request(&self) -> bool {
        self.requested.replace(false)
    }

    /// Take the explicit target, resetting it.
    pub fn take_target(&self) -> Option<u16> {
        self.target.take()
    }
}

/// Scroll request plumbing of one page view.
///
/// The message handler is registered once per mount and captures only the shared
/// [`PendingScroll`], so it never borrows the view itself.
#[derive(Debug, Default)]
pub struct ScrollState {
    pending: Rc<PendingScroll>,
    handler: Option<HandlerId>,
}

impl ScrollState {
    /// No pending request, not mounted.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared request cell.
    pub fn pending(&self) -> &PendingScroll {
        &self.pending
    }

    /// Second handle to the shared request cell, for requests issued outside
    /// the message bus.
    pub fn shared_pending(&self) -> Rc<PendingScroll> {
        Rc::clone(&self.pending)
    }

    /// Whether a message handler is registered.
    pub fn is_mounted(&self) -> bool {
        self.handler.is_some()
    }

    /// Register the [`SetScrollPositionMessage`] handler with `gui`.
    ///
    /// Returns `false` if a handler is already registered.
    pub fn mount(&mut self, gui: &mut Gui) -> bool {
        if self.handler.is_some() {
            return false;
        }
        let pending = Rc::clone(&self.pending);
        let id = gui.add_message_handler(move |message: &SetScrollPositionMessage| {
            debug!(top = message.top, "scroll position requested");
            pending.request(message.top);
            true
        });
        self.handler = Some(id);
        true
    }

    /// Remove the message handler from `gui`.
    pub fn unmount(&mut self, gui: &mut Gui) -> bool {
        match self.handler.take() {
            Some(id) => gui.remove_message_handler(id),
            None => false,
        }
    }

    /// Resolve the offset to apply: the explicit target if one was requested,
    /// otherwise `fallback`, otherwise the top. Resets the target.
    pub fn resolve(&self, fallback: Option<u16>) -> u16 {
        self.pending.take_target().or(fallback).unwrap_or(0)
    }
}
