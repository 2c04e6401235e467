//! The open project: page panes, page switching and overlays.

use super::pane::PagePane;
use super::search_input::{self, SearchState};
use crate::gui::{InputSystem, Theme};
use crate::model::{ContentKind, ExportError, PageHandle, Project, SearchQuery};
use crate::view::{export_screenshot, PageViewOptions, ViewFactory};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Which pane receives scroll and content keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    /// The pane of the active page's kind.
    Primary,
    /// The secondary view, while open.
    Secondary,
}

/// Host state: one pane per content kind, the active page and what is overlaid.
///
/// Switching pages detaches the current pane's view before attaching the new
/// page, so each page keeps its own scroll offset.
#[derive(Debug)]
pub struct Workspace {
    project: Project,
    panes: BTreeMap<ContentKind, PagePane>,
    secondary: Option<PagePane>,
    focus: FocusPane,
    active: usize,
    input: InputSystem,
    theme: Theme,
    search: SearchState,
    query: SearchQuery,
    /// Page list tooltip is shown.
    pub preview_visible: bool,
    /// Model dropdown of the focused view is shown.
    pub dropdown_visible: bool,
    status: Option<String>,
}

impl Workspace {
    /// Create panes for every kind `factory` knows and open the first page.
    pub fn new(
        project: Project,
        factory: &ViewFactory,
        theme: Theme,
        options: PageViewOptions,
    ) -> Self {
        let panes = factory
            .kinds()
            .filter_map(|kind| {
                factory
                    .create(kind, theme, options)
                    .map(|view| (kind, PagePane::new(view, theme)))
            })
            .collect();
        let mut workspace = Self {
            project,
            panes,
            secondary: None,
            focus: FocusPane::Primary,
            active: 0,
            input: InputSystem::new(),
            theme,
            search: SearchState::Inactive,
            query: SearchQuery::empty(),
            preview_visible: false,
            dropdown_visible: false,
            status: None,
        };
        workspace.attach(0);
        workspace
    }

    // ===== Accessors =====

    /// The open project.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Index of the active page.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active page.
    pub fn active_page(&self) -> Option<&PageHandle> {
        self.project.page(self.active)
    }

    /// Pane showing the active page.
    pub fn active_pane(&self) -> Option<&PagePane> {
        let kind = self.active_page()?.kind();
        self.panes.get(&kind)
    }

    /// Pane showing the active page, mutably.
    pub fn active_pane_mut(&mut self) -> Option<&mut PagePane> {
        let kind = self.active_page()?.kind();
        self.panes.get_mut(&kind)
    }

    /// The secondary pane, if open.
    pub fn secondary_pane(&self) -> Option<&PagePane> {
        self.secondary.as_ref()
    }

    /// Both visible panes, for rendering.
    pub fn visible_panes_mut(&mut self) -> (Option<&mut PagePane>, Option<&mut PagePane>) {
        let kind = self.active_page().map(PageHandle::kind);
        let primary = match kind {
            Some(kind) => self.panes.get_mut(&kind),
            None => None,
        };
        (primary, self.secondary.as_mut())
    }

    /// Which pane has focus.
    pub fn focus(&self) -> FocusPane {
        self.focus
    }

    /// The pane receiving keys.
    pub fn focused_pane(&self) -> Option<&PagePane> {
        match self.focus {
            FocusPane::Secondary => self.secondary.as_ref(),
            FocusPane::Primary => self.active_pane(),
        }
    }

    /// The pane receiving keys, mutably.
    pub fn focused_pane_mut(&mut self) -> Option<&mut PagePane> {
        match self.focus {
            FocusPane::Secondary => self.secondary.as_mut(),
            FocusPane::Primary => self.active_pane_mut(),
        }
    }

    /// Keyboard focus tracking shared by all views.
    pub fn input(&self) -> &InputSystem {
        &self.input
    }

    /// Search input state.
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// Last status bar message.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Replace the status bar message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    // ===== Pages =====

    fn attach(&mut self, index: usize) {
        let Some(page) = self.project.page(index).cloned() else {
            warn!(index, pages = self.project.len(), "no page to open");
            return;
        };
        self.active = index;
        self.focus = FocusPane::Primary;
        let query = self.query.clone();
        let Some(pane) = self.panes.get_mut(&page.kind()) else {
            warn!(page = %page.name(), kind = %page.kind(), "no view for page kind");
            return;
        };
        debug!(page = %page.name(), index, "opening page");
        pane.view_mut().set_search_query(query);
        pane.set_page(Some(page), &mut self.input);
    }

    fn detach(&mut self) {
        self.close_secondary();
        let Some(kind) = self.active_page().map(PageHandle::kind) else {
            return;
        };
        if let Some(pane) = self.panes.get_mut(&kind) {
            pane.set_page(None, &mut self.input);
        }
    }

    /// Open the page at `index`. Returns `false` for an unknown index.
    pub fn open_page(&mut self, index: usize) -> bool {
        if index >= self.project.len() {
            return false;
        }
        self.detach();
        self.attach(index);
        self.dropdown_visible = false;
        true
    }

    /// Open the first page called `name`, ignoring case.
    pub fn open_page_named(&mut self, name: &str) -> bool {
        let index = self
            .project
            .pages()
            .iter()
            .position(|page| page.name().eq_ignore_ascii_case(name));
        match index {
            Some(index) => self.open_page(index),
            None => {
                warn!(name, "no page with that name");
                false
            }
        }
    }

    /// Open the next page, wrapping around.
    pub fn next_page(&mut self) {
        if !self.project.is_empty() {
            self.open_page((self.active + 1) % self.project.len());
        }
    }

    /// Open the previous page, wrapping around.
    pub fn prev_page(&mut self) {
        if !self.project.is_empty() {
            let len = self.project.len();
            self.open_page((self.active + len - 1) % len);
        }
    }

    // ===== Secondary view =====

    /// Open a second view of the active page next to the first, or close it.
    pub fn toggle_secondary(&mut self) {
        if self.secondary.is_some() {
            self.close_secondary();
            return;
        }
        let Some(page) = self.active_page().cloned() else {
            return;
        };
        let Some(primary) = self.active_pane() else {
            return;
        };
        let mut view = primary.view().create_secondary_view();
        view.set_search_query(self.query.clone());
        let mut pane = PagePane::new(view, self.theme);
        pane.set_page(Some(page), &mut self.input);
        self.secondary = Some(pane);
        self.focus = FocusPane::Secondary;
    }

    fn close_secondary(&mut self) {
        let Some(pane) = self.secondary.take() else {
            return;
        };
        let view = pane.into_view();
        self.input.release(view.id());
        self.focus = FocusPane::Primary;
        if let Some(id) = self.active_pane().map(|pane| pane.view().id()) {
            self.input.set_keyboard_focus(id);
        }
    }

    /// Move focus between the primary and secondary pane.
    pub fn cycle_focus(&mut self) {
        let (focus, pane) = match self.focus {
            FocusPane::Primary if self.secondary.is_some() => {
                (FocusPane::Secondary, self.secondary.as_ref())
            }
            _ => (FocusPane::Primary, self.active_pane()),
        };
        if let Some(id) = pane.map(|pane| pane.view().id()) {
            self.focus = focus;
            self.input.set_keyboard_focus(id);
        }
    }

    // ===== Search =====

    /// Query the views filter with.
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Edit the search input. The views keep their filter until the input is
    /// submitted or cancelled.
    pub fn update_search(&mut self, update: impl FnOnce(SearchState) -> SearchState) {
        self.search = update(std::mem::take(&mut self.search));
    }

    /// Submit the typed query. Re-submitting the same query rebuilds again.
    pub fn submit_search(&mut self) {
        self.search = search_input::submit(std::mem::take(&mut self.search));
        self.query = self.search.applied_query();
        self.apply_query();
    }

    /// Drop the query and clear the filter.
    pub fn cancel_search(&mut self) {
        self.search = search_input::cancel(std::mem::take(&mut self.search));
        if !self.query.is_empty() {
            self.query = SearchQuery::empty();
            self.apply_query();
        }
    }

    fn apply_query(&mut self) {
        let query = self.query.clone();
        debug!(query = %query, "applying search query");
        let (primary, secondary) = self.visible_panes_mut();
        for pane in [primary, secondary].into_iter().flatten() {
            pane.view_mut().set_search_query(query.clone());
        }
    }

    // ===== Focused view =====

    /// Dismiss the error banner of the focused view.
    pub fn dismiss_error(&mut self) {
        if let Some(pane) = self.focused_pane_mut() {
            pane.view_mut().dismiss_error();
        }
    }

    /// Scroll the focused view by a delta.
    pub fn scroll_by(&mut self, dx: i32, dy: i32) {
        if let Some(pane) = self.focused_pane_mut() {
            pane.view_mut().scroll_by(dx, dy);
        }
    }

    /// Scroll the focused view by whole viewports.
    pub fn scroll_pages(&mut self, pages: i32) {
        if let Some(pane) = self.focused_pane_mut() {
            let rows = i32::from(pane.viewport_height().max(1));
            pane.view_mut().scroll_by(0, rows * pages);
        }
    }

    /// Request the focused view to scroll to the top.
    pub fn scroll_to_top(&mut self) {
        if let Some(pane) = self.focused_pane_mut() {
            pane.scroll_to(0);
        }
    }

    /// Request the focused view to scroll to the last row.
    pub fn scroll_to_bottom(&mut self) {
        if let Some(pane) = self.focused_pane_mut() {
            let bottom = pane.view().scroll().max_scroll().y;
            pane.scroll_to(bottom);
        }
    }

    /// Offer an unbound key to the focused view.
    pub fn control_key(&mut self, key: crossterm::event::KeyCode) -> bool {
        self.focused_pane_mut()
            .is_some_and(|pane| pane.view_mut().control_key(key))
    }

    /// Write the focused page as a text screenshot into `dir`.
    ///
    /// # Errors
    ///
    /// Fails if nothing is rendered or the file cannot be written.
    pub fn export_screenshot(&mut self, dir: &Path) -> Result<PathBuf, ExportError> {
        let Some(pane) = self.focused_pane() else {
            return Err(ExportError::EmptyPage);
        };
        let name = pane
            .view()
            .page()
            .map_or_else(|| "page".to_string(), PageHandle::name);
        let buffer = pane.view().generate_full_page_screenshot();
        let path = export_screenshot(&buffer, dir, &name)?;
        info!(page = %name, path = %path.display(), "page exported");
        Ok(path)
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
