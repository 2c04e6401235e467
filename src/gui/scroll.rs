//! Base scrollable container.
//!
//! [`ScrollArea`] keeps the scroll offset of a container and bounds it to the
//! measured content. Widgets implement [`Scrollable`] to supply their content
//! size and to place their content for the current offset; the provided
//! [`Scrollable::build_scroll_area`] drives both during a frame.

use super::Gui;
use ratatui::layout::{Rect, Size};
use std::cell::Cell;
use std::rc::Rc;

/// A 2D scroll offset in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOffset {
    /// Columns scrolled from the left.
    pub x: u16,
    /// Rows scrolled from the top.
    pub y: u16,
}

impl ScrollOffset {
    /// No scroll.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create an offset.
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Position and length of the scrollbar thumb within its track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbarThumb {
    /// First track row covered by the thumb.
    pub start: u16,
    /// Rows covered by the thumb (at least 1).
    pub len: u16,
}

/// Scroll state and bounds of a scrollable container.
#[derive(Debug)]
pub struct ScrollArea {
    offset: ScrollOffset,
    max: ScrollOffset,
    content: Size,
    viewport: Rect,
    overscroll: u16,
    scrollbar_width: u16,
    thumb: Rc<Cell<Option<ScrollbarThumb>>>,
}

impl ScrollArea {
    /// A container with a vertical scrollbar `scrollbar_width` columns wide.
    pub fn new(scrollbar_width: u16) -> Self {
        Self {
            offset: ScrollOffset::ZERO,
            max: ScrollOffset::ZERO,
            content: Size::ZERO,
            viewport: Rect::ZERO,
            overscroll: 0,
            scrollbar_width,
            thumb: Rc::new(Cell::new(None)),
        }
    }

    /// Current 2D offset.
    pub fn offset(&self) -> ScrollOffset {
        self.offset
    }

    /// Current horizontal offset.
    pub fn scroll_x(&self) -> u16 {
        self.offset.x
    }

    /// Current vertical offset.
    pub fn scroll_y(&self) -> u16 {
        self.offset.y
    }

    /// Largest offset allowed by the last layout.
    pub fn max_scroll(&self) -> ScrollOffset {
        self.max
    }

    /// Content size reported by the last layout.
    pub fn content_size(&self) -> Size {
        self.content
    }

    /// Viewport of the last layout (excluding the scrollbar).
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Extra scroll range below the content from the last layout.
    pub fn overscroll(&self) -> u16 {
        self.overscroll
    }

    /// Scrollbar width in columns.
    pub fn scrollbar_width(&self) -> u16 {
        self.scrollbar_width
    }

    /// Change the scrollbar width. Takes effect on the next layout.
    pub fn set_scrollbar_width(&mut self, width: u16) {
        self.scrollbar_width = width;
    }

    /// Set the vertical offset, clamped to the bounds of the last layout.
    pub fn set_scroll_y(&mut self, y: u16) {
        self.offset.y = y.min(self.max.y);
        self.update_thumb();
    }

    /// Set the horizontal offset, clamped to the bounds of the last layout.
    pub fn set_scroll_x(&mut self, x: u16) {
        self.offset.x = x.min(self.max.x);
        self.update_thumb();
    }

    /// Move the offset by a signed delta, clamped to the bounds.
    pub fn scroll_by(&mut self, dx: i32, dy: i32) {
        let x = shift(self.offset.x, dx);
        let y = shift(self.offset.y, dy);
        self.set_scroll_x(x);
        self.set_scroll_y(y);
    }

    /// Record the layout of this frame and clamp the offset to it.
    ///
    /// With `overscroll`, half a viewport of extra range is allowed below the
    /// content so its last row can be scrolled up from the bottom edge.
    pub fn update_bounds(&mut self, content: Size, viewport: Rect, overscroll: bool) {
        self.content = content;
        self.viewport = viewport;
        self.overscroll = if overscroll { viewport.height / 2 } else { 0 };
        self.max = ScrollOffset::new(
            content.width.saturating_sub(viewport.width),
            content
                .height
                .saturating_add(self.overscroll)
                .saturating_sub(viewport.height),
        );
        self.offset.x = self.offset.x.min(self.max.x);
        self.offset.y = self.offset.y.min(self.max.y);
        self.update_thumb();
    }

    /// Shared thumb geometry, read when the scrollbar is presented.
    pub(crate) fn thumb_cell(&self) -> Rc<Cell<Option<ScrollbarThumb>>> {
        Rc::clone(&self.thumb)
    }

    /// Thumb geometry for the current offset, `None` when nothing scrolls.
    pub fn thumb(&self) -> Option<ScrollbarThumb> {
        self.thumb.get()
    }

    fn update_thumb(&self) {
        let track = u32::from(self.viewport.height);
        let total = u32::from(self.content.height) + u32::from(self.overscroll);
        if self.max.y == 0 || track == 0 || total <= track {
            self.thumb.set(None);
            return;
        }
        let len = (track * track / total).clamp(1, track);
        let start = (track - len) * u32::from(self.offset.y) / u32::from(self.max.y);
        // Both values are bounded by the u16 track height.
        self.thumb.set(Some(ScrollbarThumb {
            start: start as u16,
            len: len as u16,
        }));
    }
}

fn shift(value: u16, delta: i32) -> u16 {
    (i32::from(value) + delta).clamp(0, i32::from(u16::MAX)) as u16
}

/// The base scrollable-container contract.
///
/// Implementors own a [`ScrollArea`] and report and place their content; the
/// container bounds the offset.
pub trait Scrollable {
    /// The container's scroll state.
    fn scroll_area(&self) -> &ScrollArea;

    /// Mutable access to the container's scroll state.
    fn scroll_area_mut(&mut self) -> &mut ScrollArea;

    /// Total content extent, used to compute the scroll bounds.
    fn measure_content(&self, rect: Rect, gui: &Gui) -> Size;

    /// Place content for the current offset inside `viewport`.
    fn position_content(&mut self, gui: &mut Gui, viewport: Rect);

    /// Allocate the container (full gui width by `height`), update the scroll
    /// bounds, position the content and record the scrollbar.
    fn build_scroll_area(&mut self, gui: &mut Gui, height: u16, overscroll: bool) {
        let rect = gui.allocate_rect(gui.width(), height);
        let bar = self.scroll_area().scrollbar_width().min(rect.width);
        let viewport = Rect::new(rect.x, rect.y, rect.width - bar, rect.height);

        let content = self.measure_content(rect, gui);
        self.scroll_area_mut()
            .update_bounds(content, viewport, overscroll);
        self.position_content(gui, viewport);

        if bar > 0 {
            let track = Rect::new(viewport.right(), rect.y, bar, rect.height);
            let thumb = self.scroll_area().thumb_cell();
            gui.draw_scrollbar(track, thumb);
        }
    }
}
