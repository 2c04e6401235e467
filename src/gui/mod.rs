//! Immediate-mode drawing context.
//!
//! A [`Gui`] is rebuilt every frame by calling widget builders against it. Each
//! frame runs in one of two phases:
//!
//! - [`BuildPhase::Measuring`]: widgets measure their content, allocate rectangles
//!   and record draw commands. The command list is replaced.
//! - [`BuildPhase::Drawing`]: widgets allocate the same rectangles from their
//!   recorded sizes without re-measuring. Recorded commands are kept and drawn
//!   with the live region offsets, so scroll-only frames stay cheap.
//!
//! Messages sent between frames are delivered when the next frame begins.

pub mod input;
pub mod messages;
pub mod region;
pub mod scroll;
pub mod styles;

pub use input::{InputSystem, ViewId};
pub use messages::{HandlerId, MessageBus, SetScrollPositionMessage};
pub use region::{LayoutRegion, RegionHandle, RegionUi};
pub use scroll::{ScrollArea, ScrollOffset, Scrollable, ScrollbarThumb};
pub use styles::{ColorConfig, Theme};

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use std::cell::Cell;
use std::rc::Rc;
use tracing::trace;

/// Scrollbar track symbol.
const TRACK_SYMBOL: &str = "│";
/// Scrollbar thumb symbol.
const THUMB_SYMBOL: &str = "█";

/// Which pass of the two-phase layout protocol a frame runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    /// Sizes are being discovered and draw commands recorded.
    Measuring,
    /// Sizes are committed; allocations reuse them.
    Drawing,
}

/// Allocation state to return to with [`Gui::rewind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutCheckpoint {
    cursor: u16,
    commands: usize,
}

enum DrawCommand {
    Panel {
        rect: Rect,
        region: LayoutRegion,
    },
    Scrollbar {
        track: Rect,
        thumb: Rc<Cell<Option<ScrollbarThumb>>>,
    },
}

/// The immediate-mode context of one pane.
pub struct Gui {
    phase: BuildPhase,
    area: Rect,
    cursor: u16,
    spacing: u16,
    commands: Vec<DrawCommand>,
    messages: MessageBus,
    theme: Theme,
}

impl Gui {
    /// Create a context drawing with `theme`.
    pub fn new(theme: Theme) -> Self {
        Self {
            phase: BuildPhase::Measuring,
            area: Rect::ZERO,
            cursor: 0,
            spacing: 0,
            commands: Vec::new(),
            messages: MessageBus::new(),
            theme,
        }
    }

    /// Start a frame over `area`. Delivers queued messages and returns how many
    /// were consumed.
    pub fn begin_frame(&mut self, area: Rect, phase: BuildPhase) -> usize {
        self.area = area;
        self.phase = phase;
        self.cursor = 0;
        if phase == BuildPhase::Measuring {
            self.commands.clear();
        }
        let consumed = self.messages.dispatch();
        trace!(?phase, ?area, consumed, "frame started");
        consumed
    }

    /// Current phase.
    pub fn phase(&self) -> BuildPhase {
        self.phase
    }

    /// Whether this frame measures and records (the Measuring phase).
    pub fn is_building(&self) -> bool {
        self.phase == BuildPhase::Measuring
    }

    /// Frame area.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Frame width.
    pub fn width(&self) -> u16 {
        self.area.width
    }

    /// Theme of this context.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace the theme. Regions built with the old theme keep it until rebuilt.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Rows inserted after every allocation.
    pub fn spacing(&self) -> u16 {
        self.spacing
    }

    /// Set the rows inserted after every allocation.
    pub fn set_spacing(&mut self, spacing: u16) {
        self.spacing = spacing;
    }

    /// Allocate the next `width` x `height` rectangle below the previous one.
    ///
    /// A zero-size allocation returns the current position without advancing.
    pub fn allocate_rect(&mut self, width: u16, height: u16) -> Rect {
        let rect = Rect::new(
            self.area.x,
            self.area.y.saturating_add(self.cursor),
            width,
            height,
        );
        if height > 0 {
            self.cursor = self
                .cursor
                .saturating_add(height)
                .saturating_add(self.spacing);
        }
        rect
    }

    /// Record a panel presenting `region` inside `rect`. Ignored while drawing.
    pub fn draw_panel(&mut self, rect: Rect, region: &LayoutRegion) {
        if self.is_building() {
            self.commands.push(DrawCommand::Panel {
                rect,
                region: region.share(),
            });
        }
    }

    /// Record a vertical scrollbar in `track`. Ignored while drawing.
    pub fn draw_scrollbar(&mut self, track: Rect, thumb: Rc<Cell<Option<ScrollbarThumb>>>) {
        if self.is_building() {
            self.commands.push(DrawCommand::Scrollbar { track, thumb });
        }
    }

    /// Number of recorded draw commands.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Register a handler for messages of type `M` sent to this context.
    pub fn add_message_handler<M: 'static>(
        &mut self,
        handler: impl FnMut(&M) -> bool + 'static,
    ) -> HandlerId {
        self.messages.add_handler(handler)
    }

    /// Unregister a message handler.
    pub fn remove_message_handler(&mut self, id: HandlerId) -> bool {
        self.messages.remove_handler(id)
    }

    /// Queue a message; it is delivered when the next frame begins.
    pub fn send_message<M: 'static>(&mut self, message: M) {
        self.messages.send(message);
    }

    /// The message bus of this context.
    pub fn messages(&self) -> &MessageBus {
        &self.messages
    }

    /// Remember the allocation position and recorded commands.
    pub fn checkpoint(&self) -> LayoutCheckpoint {
        LayoutCheckpoint {
            cursor: self.cursor,
            commands: self.commands.len(),
        }
    }

    /// Return to `checkpoint`, dropping commands recorded after it.
    pub fn rewind(&mut self, checkpoint: LayoutCheckpoint) {
        self.cursor = checkpoint.cursor;
        if self.is_building() {
            self.commands.truncate(checkpoint.commands);
        }
    }

    /// Clear the frame area and draw the recorded commands into `target`.
    pub fn present(&self, target: &mut Buffer) {
        let area = self.area.intersection(target.area);
        target.set_style(area, self.theme.base());
        for command in &self.commands {
            match command {
                DrawCommand::Panel { rect, region } => region.present(target, *rect),
                DrawCommand::Scrollbar { track, thumb } => {
                    self.present_scrollbar(target, track.intersection(area), thumb.get());
                }
            }
        }
    }

    fn present_scrollbar(&self, target: &mut Buffer, track: Rect, thumb: Option<ScrollbarThumb>) {
        let Some(thumb) = thumb else {
            return;
        };
        for (row, y) in (track.top()..track.bottom()).enumerate() {
            let on_thumb = (usize::from(thumb.start)..usize::from(thumb.start + thumb.len))
                .contains(&row);
            let (symbol, style) = if on_thumb {
                (THUMB_SYMBOL, self.theme.scrollbar_thumb)
            } else {
                (TRACK_SYMBOL, self.theme.scrollbar_track)
            };
            for x in track.left()..track.right() {
                if let Some(cell) = target.cell_mut((x, y)) {
                    cell.set_symbol(symbol).set_style(style);
                }
            }
        }
    }
}

impl std::fmt::Debug for Gui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gui")
            .field("phase", &self.phase)
            .field("area", &self.area)
            .field("cursor", &self.cursor)
            .field("commands", &self.commands.len())
            .field("messages", &self.messages)
            .finish()
    }
}
