//! A page view mounted into its own gui context.

use crate::gui::{BuildPhase, Gui, InputSystem, SetScrollPositionMessage, Theme};
use crate::model::PageHandle;
use crate::view::ProjectPageView;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use tracing::trace;

/// One on-screen page view and the gui it draws with.
///
/// The pane decides the build phase of each frame: it measures when the view
/// asks for a rebuild or the pane area changed, and only draws otherwise.
#[derive(Debug)]
pub struct PagePane {
    gui: Gui,
    view: Box<dyn ProjectPageView>,
    last_area: Option<Rect>,
}

impl PagePane {
    /// Mount `view` into a fresh gui.
    pub fn new(mut view: Box<dyn ProjectPageView>, theme: Theme) -> Self {
        let mut gui = Gui::new(theme);
        view.mount(&mut gui);
        Self {
            gui,
            view,
            last_area: None,
        }
    }

    /// The mounted view.
    pub fn view(&self) -> &dyn ProjectPageView {
        self.view.as_ref()
    }

    /// The mounted view, mutably.
    pub fn view_mut(&mut self) -> &mut dyn ProjectPageView {
        self.view.as_mut()
    }

    /// The pane's gui context.
    pub fn gui(&self) -> &Gui {
        &self.gui
    }

    /// Attach `page` (or detach) and give the view keyboard focus.
    pub fn set_page(&mut self, page: Option<PageHandle>, input: &mut InputSystem) {
        self.view.set_model(page, input);
    }

    /// Ask the view to scroll so `top` is the first body row, on the next frame.
    pub fn scroll_to(&mut self, top: u16) {
        self.gui.send_message(SetScrollPositionMessage { top });
    }

    /// Phase the next frame over `area` will run in.
    pub fn next_phase(&self, area: Rect) -> BuildPhase {
        if self.last_area != Some(area) || self.view.needs_rebuild() {
            BuildPhase::Measuring
        } else {
            BuildPhase::Drawing
        }
    }

    /// Build the view over `area` and draw it into `target`.
    pub fn render(&mut self, area: Rect, target: &mut Buffer) {
        let phase = self.next_phase(area);
        let delivered = self.gui.begin_frame(area, phase);
        self.view.build(&mut self.gui, area.as_size());
        self.gui.present(target);
        self.last_area = Some(area);
        trace!(
            view = self.view.id().get(),
            ?phase,
            delivered,
            "pane rendered"
        );
    }

    /// Body rows visible in the last frame.
    pub fn viewport_height(&self) -> u16 {
        self.view.scroll().viewport().height
    }

    /// Unregister the view's handlers and hand it back.
    pub fn into_view(mut self) -> Box<dyn ProjectPageView> {
        self.view.unmount(&mut self.gui);
        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::ColorConfig;
    use crate::model::{PageContents, PageHandle, ProductionTable, Project, RecipeRow};
    use crate::pages::ProductionTableView;
    use crate::view::PageView;

    fn pane() -> PagePane {
        let theme = Theme::with_color_config(ColorConfig::new(false));
        PagePane::new(Box::new(PageView::<ProductionTableView>::new(theme)), theme)
    }

    fn area() -> Rect {
        Rect::new(0, 0, 60, 12)
    }

    #[test]
    fn first_frame_measures_then_draws() {
        let mut pane = pane();
        let mut buffer = Buffer::empty(area());

        assert_eq!(pane.next_phase(area()), BuildPhase::Measuring);
        pane.render(area(), &mut buffer);
        assert_eq!(pane.next_phase(area()), BuildPhase::Drawing);
    }

    #[test]
    fn resize_and_rebind_force_measuring() {
        let mut pane = pane();
        let mut input = InputSystem::new();
        let mut buffer = Buffer::empty(area());
        pane.render(area(), &mut buffer);

        assert_eq!(
            pane.next_phase(Rect::new(0, 0, 50, 12)),
            BuildPhase::Measuring
        );

        let project = Project::sample();
        pane.set_page(project.page(0).cloned(), &mut input);
        assert_eq!(pane.next_phase(area()), BuildPhase::Measuring);
        assert!(input.has_focus(pane.view().id()));
    }

    #[test]
    fn scroll_to_applies_in_next_drawing_frame() {
        let mut pane = pane();
        let mut input = InputSystem::new();
        let project = Project::sample();
        pane.set_page(project.page(0).cloned(), &mut input);
        let mut buffer = Buffer::empty(area());
        pane.render(area(), &mut buffer);

        pane.scroll_to(5);
        assert_eq!(pane.next_phase(area()), BuildPhase::Drawing);
        pane.render(area(), &mut buffer);

        assert_eq!(pane.view().scroll().scroll_y(), 5);
    }

    #[test]
    fn screenshot_between_frames_keeps_next_frame_measuring() {
        let mut pane = pane();
        let mut input = InputSystem::new();
        let recipe =
            |i: usize| RecipeRow::new(format!("recipe-{i}"), "assembler", 1.0, "gear", 60.0);
        let table = ProductionTable::new((0..10).map(recipe).collect());
        let page = PageHandle::new("P", PageContents::ProductionTable(table));
        pane.set_page(Some(page.clone()), &mut input);
        let mut buffer = Buffer::empty(area());
        pane.render(area(), &mut buffer);

        page.update(|table: &mut ProductionTable| table.rows = (0..200).map(recipe).collect());
        let shot = pane.view().generate_full_page_screenshot();
        assert_eq!(shot.area.height, 201);

        pane.scroll_to(100);
        assert_eq!(pane.next_phase(area()), BuildPhase::Measuring);
        pane.render(area(), &mut buffer);

        assert_eq!(pane.view().scroll().scroll_y(), 100);
    }

    #[test]
    fn into_view_unmounts() {
        let pane = pane();
        let mut gui = Gui::new(Theme::default());
        let mut view = pane.into_view();
        assert!(view.mount(&mut gui), "handlers were released by the pane");
    }
}
