//! Typed message channel.
//!
//! Messages are queued with [`MessageBus::send`] and delivered by
//! [`MessageBus::dispatch`] at the start of the next frame. Handlers run in
//! registration order; the first handler that returns `true` consumes the message.

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use tracing::debug;

/// Request to scroll a page view so that `top` is the first visible body row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetScrollPositionMessage {
    /// Target vertical offset in rows.
    pub top: u16,
}

/// Identifies a registered message handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type ErasedHandler = Box<dyn FnMut(&dyn Any) -> Option<bool>>;

struct Queued {
    type_name: &'static str,
    payload: Box<dyn Any>,
}

/// Handler registry plus pending message queue.
#[derive(Default)]
pub struct MessageBus {
    next_id: u64,
    handlers: Vec<(HandlerId, ErasedHandler)>,
    queue: VecDeque<Queued>,
}

impl MessageBus {
    /// Empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for messages of type `M`.
    ///
    /// The handler returns `true` to consume the message.
    pub fn add_handler<M: 'static>(
        &mut self,
        mut handler: impl FnMut(&M) -> bool + 'static,
    ) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        let erased: ErasedHandler =
            Box::new(move |message: &dyn Any| message.downcast_ref::<M>().map(&mut handler));
        self.handlers.push((id, erased));
        id
    }

    /// Remove a handler. Returns whether it was registered.
    pub fn remove_handler(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Queue a message for the next dispatch.
    pub fn send<M: 'static>(&mut self, message: M) {
        self.queue.push_back(Queued {
            type_name: std::any::type_name::<M>(),
            payload: Box::new(message),
        });
    }

    /// Number of queued messages.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Deliver all queued messages. Returns how many were consumed.
    pub fn dispatch(&mut self) -> usize {
        let mut consumed = 0;
        while let Some(message) = self.queue.pop_front() {
            let handled = self
                .handlers
                .iter_mut()
                .any(|(_, handler)| handler(message.payload.as_ref()) == Some(true));
            if handled {
                consumed += 1;
            } else {
                debug!(message = message.type_name, "message not handled");
            }
        }
        consumed
    }
}

impl fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBus")
            .field("handlers", &self.handlers.len())
            .field("queued", &self.queue.len())
            .finish()
    }
}
