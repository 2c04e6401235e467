//! The page view: pinned header over a scrollable body.
//!
//! [`PageView`] owns two [`LayoutRegion`]s. On a measuring frame both regions are
//! measured at the visible width minus the scrollbar, the header is allocated at
//! the top and the remaining height goes to the scroll container that hosts the
//! body. On drawing frames the previous sizes are reused.
//!
//! The header is offset horizontally only, so it stays pinned while the body
//! scrolls vertically and follows the body when it scrolls sideways.

use super::binding::ModelBinding;
use super::constants::{DEFAULT_SCROLLBAR_WIDTH, FALLBACK_LAYOUT_WIDTH, MAX_REENTRY_DEPTH};
use super::screenshot;
use super::scroll_state::ScrollState;
use super::ProjectPageView;
use crate::gui::{
    Gui, InputSystem, LayoutRegion, RegionUi, ScrollArea, ScrollOffset, Scrollable, Theme, ViewId,
};
use crate::model::{ContentKind, ContentModel, PageContents, PageHandle, Project, SearchQuery};
use crossterm::event::KeyCode;
use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};
use ratatui::text::Line;
use std::fmt;
use tracing::{debug, trace, warn};

// ===== Content contract =====

/// What a concrete page view draws.
///
/// The page view calls these builders when its regions are measured; they only
/// add rows and must not assume they run on every frame.
pub trait PageViewContent: Sized + 'static {
    /// Content model this view binds to.
    type Model: ContentModel;

    /// Fresh instance with no per-view state.
    fn create() -> Self;

    /// Rows of the pinned header, below the error banner.
    fn build_header(&self, ui: &mut RegionUi<'_>, cx: &PageContext<'_, Self::Model>);

    /// Rows of the scrollable body.
    fn build_content(&self, ui: &mut RegionUi<'_>, cx: &PageContext<'_, Self::Model>);

    /// Short preview of `model`, shown when hovering a page in a page list.
    fn build_page_tooltip(&self, ui: &mut RegionUi<'_>, model: &Self::Model);

    /// Handle a key. Returning `true` consumes it and rebuilds the view.
    fn control_key(&mut self, _key: KeyCode) -> bool {
        false
    }
}

/// Everything a builder needs to draw a bound model.
#[derive(Debug)]
pub struct PageContext<'a, M> {
    /// The bound model.
    pub model: &'a M,
    /// The page holding the model.
    pub page: &'a PageHandle,
    /// Active search query.
    pub query: &'a SearchQuery,
}

// ===== Options =====

/// Layout options shared by all page views of a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageViewOptions {
    /// Scrollbar width in columns.
    pub scrollbar_width: u16,
    /// Allow scrolling half a viewport past the last row.
    pub overscroll: bool,
}

impl Default for PageViewOptions {
    fn default() -> Self {
        Self {
            scrollbar_width: DEFAULT_SCROLLBAR_WIDTH,
            overscroll: true,
        }
    }
}

// ===== PageView =====

/// A page view over content model `V::Model`.
pub struct PageView<V: PageViewContent> {
    id: ViewId,
    content: V,
    theme: Theme,
    options: PageViewOptions,
    header: LayoutRegion,
    body: LayoutRegion,
    scroll: ScrollArea,
    state: ScrollState,
    page: Option<PageHandle>,
    binding: Option<ModelBinding<V::Model>>,
    query: SearchQuery,
    content_width: u16,
    content_height: u16,
    header_height: u16,
    reentry: u8,
}

impl<V: PageViewContent> PageView<V> {
    /// Create an unbound view with default options.
    pub fn new(theme: Theme) -> Self {
        Self::with_options(theme, PageViewOptions::default())
    }

    /// Create an unbound view.
    pub fn with_options(theme: Theme, options: PageViewOptions) -> Self {
        Self {
            id: ViewId::next(),
            content: V::create(),
            theme,
            options,
            header: LayoutRegion::new("header"),
            body: LayoutRegion::new("body"),
            scroll: ScrollArea::new(options.scrollbar_width),
            state: ScrollState::new(),
            page: None,
            binding: None,
            query: SearchQuery::empty(),
            content_width: 0,
            content_height: 0,
            header_height: 0,
            reentry: 0,
        }
    }

    /// The concrete content.
    pub fn content(&self) -> &V {
        &self.content
    }

    /// The pinned header region.
    pub fn header(&self) -> &LayoutRegion {
        &self.header
    }

    /// The scrollable body region.
    pub fn body(&self) -> &LayoutRegion {
        &self.body
    }

    /// Scroll request state.
    pub fn scroll_state(&self) -> &ScrollState {
        &self.state
    }

    /// Whether a model of type `V::Model` is bound.
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Widest measured width of header and body, from the last measuring pass.
    pub fn content_width(&self) -> u16 {
        self.content_width
    }

    /// Header height from the last measuring pass.
    pub fn header_height(&self) -> u16 {
        self.header_height
    }

    /// Lay out and record the view for one frame.
    ///
    /// A scroll request pending after layout is applied and the frame is laid out
    /// once more, so the new offset is visible in the same frame.
    pub fn build(&mut self, gui: &mut Gui, visible: Size) {
        let checkpoint = gui.checkpoint();
        self.layout(gui, visible);

        if !self.state.pending().is_requested() {
            return;
        }
        if self.reentry >= MAX_REENTRY_DEPTH {
            warn!(
                view = self.id.get(),
                "scroll request during re-entrant build, deferred to next frame"
            );
            return;
        }
        self.state.pending().clear_request();
        self.set_scroll();
        gui.rewind(checkpoint);
        self.reentry += 1;
        self.build(gui, visible);
        self.reentry -= 1;
    }

    fn layout(&mut self, gui: &mut Gui, visible: Size) {
        if gui.is_building() {
            gui.set_spacing(0);
            let anchor = gui.allocate_rect(0, 0);
            let measure_width = visible.width.saturating_sub(self.options.scrollbar_width);

            let header = self.measure_header(measure_width);
            let header_rect = gui.allocate_rect(visible.width, header.height);
            let body = self.measure_body(measure_width);

            self.header_height = header.height;
            self.content_width = header.width.max(body.width);
            self.content_height = body.height;
            gui.draw_panel(header_rect, &self.header);
            trace!(
                x = anchor.x,
                y = anchor.y,
                content_width = self.content_width,
                content_height = self.content_height,
                header_height = self.header_height,
                "page measured"
            );
        } else {
            gui.allocate_rect(self.content_width, self.header_height);
        }

        let height = visible.height.saturating_sub(self.header_height);
        let overscroll = self.options.overscroll;
        self.build_scroll_area(gui, height, overscroll);
    }

    fn measure_header(&self, width: u16) -> Size {
        self.header
            .calculate_state(width, &self.theme, |ui| self.build_header_rows(ui))
    }

    fn measure_body(&self, width: u16) -> Size {
        self.body
            .calculate_state(width, &self.theme, |ui| self.build_body_rows(ui))
    }

    fn build_header_rows(&self, ui: &mut RegionUi<'_>) {
        let Some(page) = &self.page else {
            return;
        };
        if let Some(error) = page.model_error() {
            if ui.error_row(&error) {
                debug!(page = %page.name(), %error, "model error dismissed");
                page.take_model_error();
            }
        }
        self.with_context(|cx| self.content.build_header(ui, cx));
    }

    fn build_body_rows(&self, ui: &mut RegionUi<'_>) {
        self.with_context(|cx| self.content.build_content(ui, cx));
    }

    fn with_context(&self, f: impl FnOnce(&PageContext<'_, V::Model>)) {
        let Some(binding) = &self.binding else {
            return;
        };
        let Some(model) = binding.model() else {
            debug!(page = %binding.page().name(), "bound page no longer holds the model");
            return;
        };
        f(&PageContext {
            model: &*model,
            page: binding.page(),
            query: &self.query,
        });
    }
}

/// Width to render a region at outside a frame: its last layout width, or a
/// fallback if it was never laid out.
fn export_width(region: &LayoutRegion) -> u16 {
    if region.build_count() == 0 {
        FALLBACK_LAYOUT_WIDTH
    } else {
        region.layout_width()
    }
}

impl<V: PageViewContent> Scrollable for PageView<V> {
    fn scroll_area(&self) -> &ScrollArea {
        &self.scroll
    }

    fn scroll_area_mut(&mut self) -> &mut ScrollArea {
        &mut self.scroll
    }

    fn measure_content(&self, _rect: Rect, _gui: &Gui) -> Size {
        Size::new(self.content_width, self.content_height)
    }

    fn position_content(&mut self, gui: &mut Gui, viewport: Rect) {
        let offset = self.scroll.offset();
        self.header.set_offset(ScrollOffset::new(offset.x, 0));
        self.body.set_offset(offset);
        gui.draw_panel(viewport, &self.body);
    }
}

impl<V: PageViewContent> ProjectPageView for PageView<V> {
    fn id(&self) -> ViewId {
        self.id
    }

    fn kind(&self) -> ContentKind {
        <V::Model as ContentModel>::KIND
    }

    fn mount(&mut self, gui: &mut Gui) -> bool {
        self.state.mount(gui)
    }

    fn unmount(&mut self, gui: &mut Gui) -> bool {
        self.state.unmount(gui)
    }

    fn build(&mut self, gui: &mut Gui, visible: Size) {
        PageView::build(self, gui, visible);
    }

    fn rebuild(&self, visual_only: bool) {
        trace!(view = self.id.get(), visual_only, "rebuild requested");
        self.header.rebuild();
        self.body.rebuild();
    }

    fn needs_rebuild(&self) -> bool {
        self.header.is_dirty() || self.body.is_dirty()
    }

    fn set_search_query(&mut self, query: SearchQuery) {
        self.query = query;
        self.rebuild(false);
    }

    fn search_query(&self) -> &SearchQuery {
        &self.query
    }

    fn calculate_width(&self) -> u16 {
        self.header
            .layout_width()
            .max(self.header.content_size().width)
            .max(self.body.content_size().width)
    }

    fn create_secondary_view(&self) -> Box<dyn ProjectPageView> {
        Box::new(PageView::<V>::with_options(self.theme, self.options))
    }

    fn build_page_tooltip(&self, ui: &mut RegionUi<'_>, contents: &PageContents) {
        match <V::Model as ContentModel>::extract(contents) {
            Some(model) => self.content.build_page_tooltip(ui, model),
            None => debug!(
                expected = %self.kind(),
                found = %contents.kind(),
                "tooltip for another content kind"
            ),
        }
    }

    fn build_model_dropdown(&self, ui: &mut RegionUi<'_>, project: &Project) {
        let theme = *ui.theme();
        for page in project.pages().iter().filter(|page| page.kind() == self.kind()) {
            let current = self.page.as_ref().is_some_and(|held| held.same_page(page));
            let (marker, style) = if current {
                ("> ", theme.highlight)
            } else {
                ("  ", theme.text)
            };
            ui.line(Line::styled(format!("{marker}{}", page.name()), style));
        }
    }

    fn generate_full_page_screenshot(&self) -> Buffer {
        let layout_width = export_width(&self.header);
        let header = self.header.render_detached(layout_width, &self.theme, |ui| {
            self.build_header_rows(ui)
        });
        let body = self.body.render_detached(export_width(&self.body), &self.theme, |ui| {
            self.build_body_rows(ui)
        });
        let width = layout_width.max(header.area.width).max(body.area.width);
        debug!(
            width,
            header = header.area.height,
            body = body.area.height,
            "rendering full page"
        );
        screenshot::render_full_page(&header, &body, width, &self.theme)
    }

    fn control_key(&mut self, key: KeyCode) -> bool {
        let handled = self.content.control_key(key);
        if handled {
            self.rebuild(false);
        }
        handled
    }

    fn set_model(&mut self, page: Option<PageHandle>, input: &mut InputSystem) {
        match (&self.page, &page) {
            (Some(old), None) => {
                debug!(page = %old.name(), scroll = self.scroll.scroll_y(), "saving scroll");
                old.set_saved_scroll(self.scroll.scroll_y());
            }
            (None, Some(_)) => self.state.pending().request_restore(),
            _ => {}
        }

        // Unsubscribe from the old page before subscribing to the new one.
        self.binding = None;
        input.set_keyboard_focus(self.id);

        self.binding = page.as_ref().and_then(|page| {
            let binding = ModelBinding::bind(page, self.header.handle(), self.body.handle());
            if binding.is_none() {
                debug!(
                    page = %page.name(),
                    expected = %self.kind(),
                    found = %page.kind(),
                    "page holds another content kind"
                );
            }
            binding
        });
        self.page = page;
        self.rebuild(false);
    }

    fn page(&self) -> Option<&PageHandle> {
        self.page.as_ref()
    }

    fn set_scroll(&mut self) {
        let saved = self.binding.as_ref().map(|binding| binding.page().saved_scroll());
        let top = self.state.resolve(saved);
        self.scroll.set_scroll_y(top);
        debug!(
            view = self.id.get(),
            requested = top,
            applied = self.scroll.scroll_y(),
            "scroll applied"
        );
    }

    fn scroll(&self) -> &ScrollArea {
        &self.scroll
    }

    fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.scroll.scroll_by(dx, dy);
        let offset = self.scroll.offset();
        self.header.set_offset(ScrollOffset::new(offset.x, 0));
        self.body.set_offset(offset);
    }

    fn dismiss_error(&mut self) {
        self.header.request_dismiss();
    }
}

impl<V: PageViewContent> fmt::Debug for PageView<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageView")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("page", &self.page)
            .field("bound", &self.binding.is_some())
            .field("scroll", &self.scroll.offset())
            .field("content_width", &self.content_width)
            .field("header_height", &self.header_height)
            .finish()
    }
}

#[cfg(test)]
#[path = "page_view_tests.rs"]
mod tests;
