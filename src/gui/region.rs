//! Independently measured and drawn sub-widgets.
//!
//! A [`LayoutRegion`] runs a builder closure into a [`RegionUi`] when it is
//! measured, renders the produced rows into its own buffer, and later copies a
//! window of that buffer onto a target at its current offset. The buffer keeps the
//! full, unclipped content, so it can be presented outside a frame (for export).

use super::scroll::ScrollOffset;
use super::styles::Theme;
use crate::model::ModelError;
use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};
use ratatui::text::{Line, Span};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::trace;
use unicode_width::UnicodeWidthStr;

/// Label of the error banner's dismiss button.
const DISMISS_LABEL: &str = " [x] ";

struct RegionCore {
    name: &'static str,
    surface: RefCell<Buffer>,
    content_size: Cell<Size>,
    layout_width: Cell<u16>,
    offset: Cell<ScrollOffset>,
    dirty: Cell<bool>,
    dismiss_requested: Cell<bool>,
    rebuild_requests: Cell<u64>,
    builds: Cell<u64>,
}

/// A measurable, drawable unit of a page view (its header or its body).
pub struct LayoutRegion {
    core: Rc<RegionCore>,
}

impl LayoutRegion {
    /// Create an empty region that needs a build.
    pub fn new(name: &'static str) -> Self {
        Self {
            core: Rc::new(RegionCore {
                name,
                surface: RefCell::new(Buffer::empty(Rect::ZERO)),
                content_size: Cell::new(Size::ZERO),
                layout_width: Cell::new(0),
                offset: Cell::new(ScrollOffset::ZERO),
                dirty: Cell::new(true),
                dismiss_requested: Cell::new(false),
                rebuild_requests: Cell::new(0),
                builds: Cell::new(0),
            }),
        }
    }

    /// Second handle to the same region, used by recorded draw commands.
    pub(crate) fn share(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
        }
    }

    /// Weak handle that can request rebuilds without keeping the region alive.
    pub fn handle(&self) -> RegionHandle {
        RegionHandle(Rc::downgrade(&self.core))
    }

    /// Region name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.core.name
    }

    /// Mark the region for a rebuild on its next measurement.
    pub fn rebuild(&self) {
        self.core.mark_dirty();
    }

    /// Whether the next measurement will run the builder.
    pub fn is_dirty(&self) -> bool {
        self.core.dirty.get()
    }

    /// Number of rebuild requests received so far.
    pub fn rebuild_requests(&self) -> u64 {
        self.core.rebuild_requests.get()
    }

    /// Number of times the builder actually ran.
    pub fn build_count(&self) -> u64 {
        self.core.builds.get()
    }

    /// Ask the next build to dismiss the error row, if it shows one.
    pub fn request_dismiss(&self) {
        self.core.dismiss_requested.set(true);
        self.core.mark_dirty();
    }

    /// Measure the region at `width`, running `build` if the region is dirty or
    /// was last laid out at another width. Returns the content size.
    pub fn calculate_state(
        &self,
        width: u16,
        theme: &Theme,
        build: impl FnOnce(&mut RegionUi<'_>),
    ) -> Size {
        let core = &self.core;
        if core.dirty.get() || core.layout_width.get() != width {
            let mut ui = RegionUi::new(width, theme);
            ui.dismiss_requested = core.dismiss_requested.replace(false);
            build(&mut ui);
            let size = ui.size();
            *core.surface.borrow_mut() = ui.render(size);
            core.content_size.set(size);
            core.layout_width.set(width);
            core.dirty.set(false);
            core.builds.set(core.builds.get() + 1);
            trace!(
                region = core.name,
                width,
                content_width = size.width,
                content_height = size.height,
                "region built"
            );
        }
        core.content_size.get()
    }

    /// Content rendered at `width` into a standalone buffer, leaving the region
    /// untouched.
    ///
    /// A clean region already laid out at `width` hands back a copy of its
    /// surface. Otherwise `build` runs into a throwaway buffer: the region stays
    /// dirty, its counters and size are unchanged and a pending dismiss is kept
    /// for the next real build.
    pub fn render_detached(
        &self,
        width: u16,
        theme: &Theme,
        build: impl FnOnce(&mut RegionUi<'_>),
    ) -> Buffer {
        let core = &self.core;
        if !core.dirty.get() && core.layout_width.get() == width {
            return core.surface.borrow().clone();
        }
        let mut ui = RegionUi::new(width, theme);
        build(&mut ui);
        let size = ui.size();
        trace!(
            region = core.name,
            width,
            content_width = size.width,
            content_height = size.height,
            "region rendered detached"
        );
        ui.render(size)
    }

    /// Total unclipped content size from the last build.
    pub fn content_size(&self) -> Size {
        self.core.content_size.get()
    }

    /// Width the region was last laid out at.
    pub fn layout_width(&self) -> u16 {
        self.core.layout_width.get()
    }

    /// Current draw offset into the content.
    pub fn offset(&self) -> ScrollOffset {
        self.core.offset.get()
    }

    /// Set the draw offset into the content.
    pub fn set_offset(&self, offset: ScrollOffset) {
        self.core.offset.set(offset);
    }

    /// Copy the content window starting at the current offset into `rect` of
    /// `target`, clipped to both `rect` and the target area.
    pub fn present(&self, target: &mut Buffer, rect: Rect) {
        let surface = self.core.surface.borrow();
        let offset = self.core.offset.get();
        let source = surface.area;
        let clip = rect.intersection(target.area);

        for y in clip.top()..clip.bottom() {
            let sy = u32::from(y - rect.y) + u32::from(offset.y);
            if sy >= u32::from(source.height) {
                break;
            }
            for x in clip.left()..clip.right() {
                let sx = u32::from(x - rect.x) + u32::from(offset.x);
                if sx >= u32::from(source.width) {
                    break;
                }
                // Bounds checked above, both fit in u16.
                if let (Some(src), Some(dst)) = (
                    surface.cell((sx as u16, sy as u16)),
                    target.cell_mut((x, y)),
                ) {
                    *dst = src.clone();
                }
            }
        }
    }
}

impl std::fmt::Debug for LayoutRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutRegion")
            .field("name", &self.core.name)
            .field("content_size", &self.core.content_size.get())
            .field("offset", &self.core.offset.get())
            .field("dirty", &self.core.dirty.get())
            .finish()
    }
}

impl RegionCore {
    fn mark_dirty(&self) {
        self.dirty.set(true);
        self.rebuild_requests.set(self.rebuild_requests.get() + 1);
    }
}

/// Weak reference to a region, held by change listeners.
#[derive(Clone)]
pub struct RegionHandle(Weak<RegionCore>);

impl RegionHandle {
    /// Request a rebuild. Returns `false` if the region no longer exists.
    pub fn rebuild(&self) -> bool {
        match self.0.upgrade() {
            Some(core) => {
                core.mark_dirty();
                true
            }
            None => false,
        }
    }
}

// ===== RegionUi =====

/// Row builder handed to region builder closures.
///
/// Rows are stacked top to bottom; the content width is the widest row.
pub struct RegionUi<'t> {
    width: u16,
    theme: &'t Theme,
    rows: Vec<Line<'static>>,
    dismiss_requested: bool,
}

impl<'t> RegionUi<'t> {
    /// Standalone builder, e.g. for tooltips.
    pub fn new(width: u16, theme: &'t Theme) -> Self {
        Self {
            width,
            theme,
            rows: Vec::new(),
            dismiss_requested: false,
        }
    }

    /// Width offered by the parent layout.
    pub fn available_width(&self) -> u16 {
        self.width
    }

    /// Theme to style rows with.
    pub fn theme(&self) -> &'t Theme {
        self.theme
    }

    /// Append a row.
    pub fn line(&mut self, line: impl Into<Line<'static>>) {
        self.rows.push(line.into());
    }

    /// Append a row of plain text in the theme's text style.
    pub fn text(&mut self, text: impl Into<String>) {
        let style = self.theme.text;
        self.rows.push(Line::styled(text.into(), style));
    }

    /// Append an empty row.
    pub fn blank(&mut self) {
        self.rows.push(Line::default());
    }

    /// Show `error` as a banner spanning the available width.
    ///
    /// Returns `true` instead of drawing when the user asked to dismiss it; the
    /// caller is expected to clear the error then.
    pub fn error_row(&mut self, error: &ModelError) -> bool {
        if std::mem::take(&mut self.dismiss_requested) {
            return true;
        }
        let message = format!(" ! {error} ");
        let used = message.width() + DISMISS_LABEL.width();
        let padding = usize::from(self.width).saturating_sub(used);
        self.rows.push(Line::from(vec![
            Span::styled(message, self.theme.error_banner),
            Span::styled(" ".repeat(padding), self.theme.error_banner),
            Span::styled(DISMISS_LABEL, self.theme.error_dismiss),
        ]));
        false
    }

    /// Rows added so far.
    pub fn lines(&self) -> &[Line<'static>] {
        &self.rows
    }

    /// Consume the builder, returning its rows.
    pub fn into_lines(self) -> Vec<Line<'static>> {
        self.rows
    }

    /// Content size: widest row by row count.
    pub fn size(&self) -> Size {
        let width = self.rows.iter().map(Line::width).max().unwrap_or(0);
        Size::new(saturate(width), saturate(self.rows.len()))
    }

    fn render(self, size: Size) -> Buffer {
        let mut buffer = Buffer::empty(Rect::new(0, 0, size.width, size.height));
        for (y, line) in self.rows.iter().enumerate().take(usize::from(size.height)) {
            buffer.set_line(0, y as u16, line, size.width);
        }
        buffer
    }
}

fn saturate(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
