//! Page views: a pinned header over a scrollable body bound to one page.
//!
//! [`PageView`] is generic over its content model. Hosts that show pages of
//! different kinds drive views through the object-safe [`ProjectPageView`] trait
//! and create them from a [`ViewFactory`].

pub mod binding;
pub mod constants;
pub mod factory;
pub mod page_view;
pub mod screenshot;
pub mod scroll_state;

pub use binding::ModelBinding;
pub use factory::{ViewConstructor, ViewFactory};
pub use page_view::{PageContext, PageView, PageViewContent, PageViewOptions};
pub use screenshot::{buffer_to_text, export_screenshot, render_full_page};
pub use scroll_state::{PendingScroll, ScrollState};

use crate::gui::{Gui, InputSystem, RegionUi, ScrollArea, ViewId};
use crate::model::{ContentKind, PageContents, PageHandle, Project, SearchQuery};
use crossterm::event::KeyCode;
use ratatui::buffer::Buffer;
use ratatui::layout::Size;
use std::fmt;

/// Operations every page view supports, independent of its content model.
pub trait ProjectPageView: fmt::Debug {
    /// Identity used for keyboard focus.
    fn id(&self) -> ViewId;

    /// Content kind this view binds to.
    fn kind(&self) -> ContentKind;

    /// Register the view's message handlers with `gui`. Returns `false` if they
    /// were already registered.
    fn mount(&mut self, gui: &mut Gui) -> bool;

    /// Remove the view's message handlers from `gui`.
    fn unmount(&mut self, gui: &mut Gui) -> bool;

    /// Lay out and record the view for one frame over `visible`.
    fn build(&mut self, gui: &mut Gui, visible: Size);

    /// Mark header and body for rebuild on the next measuring frame.
    fn rebuild(&self, visual_only: bool);

    /// Whether the next frame must measure.
    fn needs_rebuild(&self) -> bool;

    /// Set the filter and rebuild, even if the query did not change.
    fn set_search_query(&mut self, query: SearchQuery);

    /// Active filter.
    fn search_query(&self) -> &SearchQuery;

    /// Width of the full page.
    fn calculate_width(&self) -> u16;

    /// A fresh, unbound view of the same concrete type.
    fn create_secondary_view(&self) -> Box<dyn ProjectPageView>;

    /// Preview of `contents`. Draws nothing for another content kind.
    fn build_page_tooltip(&self, ui: &mut RegionUi<'_>, contents: &PageContents);

    /// List the pages of `project` this view can show, marking the bound one.
    fn build_model_dropdown(&self, ui: &mut RegionUi<'_>, project: &Project);

    /// Render header and complete body into one new buffer, leaving the live
    /// layout and any pending dismiss untouched.
    fn generate_full_page_screenshot(&self) -> Buffer;

    /// Offer a key to the view. Returns `true` if consumed.
    fn control_key(&mut self, key: KeyCode) -> bool;

    /// Attach `page` (or detach with `None`) and take keyboard focus.
    ///
    /// Detaching saves the scroll offset on the page; attaching after being
    /// detached restores it on the next frame.
    fn set_model(&mut self, page: Option<PageHandle>, input: &mut InputSystem);

    /// The attached page.
    fn page(&self) -> Option<&PageHandle>;

    /// Apply the pending scroll target, falling back to the page's saved offset.
    fn set_scroll(&mut self);

    /// Scroll container state.
    fn scroll(&self) -> &ScrollArea;

    /// Scroll by a signed delta, clamped to the last layout.
    fn scroll_by(&mut self, dx: i32, dy: i32);

    /// Dismiss the error banner on the next header build.
    fn dismiss_error(&mut self);
}
