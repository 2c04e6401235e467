//! Content-change notification with drop-paired subscriptions.
//!
//! A [`ChangeNotifier`] keeps the listeners of one page. Subscribing returns a
//! [`Subscription`] guard; dropping the guard removes the listener. The guard only
//! holds a weak reference to the notifier, and listeners are expected to capture
//! weak references to whatever they update, so neither side keeps the other alive.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::trace;

type Listener = Rc<dyn Fn(bool)>;

#[derive(Default)]
struct Listeners {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Listener)>>,
}

/// Broadcasts "content changed" events to subscribed views.
///
/// The event argument is `visual_only`: `true` when only presentation changed and
/// the content layout is still valid.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    listeners: Rc<Listeners>,
}

impl ChangeNotifier {
    /// Create a notifier with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. The listener stays registered while the returned
    /// guard is alive.
    pub fn subscribe(&self, listener: impl Fn(bool) + 'static) -> Subscription {
        let id = self.listeners.next_id.get();
        self.listeners.next_id.set(id + 1);
        self.listeners
            .entries
            .borrow_mut()
            .push((id, Rc::new(listener)));
        trace!(id, "change listener subscribed");
        Subscription {
            listeners: Rc::downgrade(&self.listeners),
            id,
        }
    }

    /// Invoke every listener with `visual_only`.
    ///
    /// Listeners are snapshotted first, so a listener may drop its own
    /// subscription (or subscribe another) while being notified.
    pub fn notify(&self, visual_only: bool) {
        let snapshot: Vec<Listener> = self
            .listeners
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(visual_only);
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.entries.borrow().len()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Guard for one listener registration. Unsubscribes on drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    listeners: Weak<Listeners>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .entries
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
            trace!(id = self.id, "change listener unsubscribed");
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
