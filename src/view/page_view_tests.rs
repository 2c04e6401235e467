//! Tests for the page view layout, scroll and binding lifecycle.

use super::*;
use crate::gui::{BuildPhase, ColorConfig, RegionHandle, SetScrollPositionMessage};
use crate::model::{ModelError, ProductionTable, RecipeRow, Summary};
use crate::pages::ProductionTableView;
use crate::view::scroll_state::PendingScroll;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// ===== Test Helpers =====

const VISIBLE: Size = Size {
    width: 40,
    height: 20,
};

/// Header "Recipe", one body line per recipe name matching the query.
#[derive(Debug)]
struct RowsView;

impl PageViewContent for RowsView {
    type Model = ProductionTable;

    fn create() -> Self {
        RowsView
    }

    fn build_header(&self, ui: &mut RegionUi<'_>, _cx: &PageContext<'_, ProductionTable>) {
        ui.text("Recipe");
    }

    fn build_content(&self, ui: &mut RegionUi<'_>, cx: &PageContext<'_, ProductionTable>) {
        for row in cx.model.rows.iter().filter(|row| cx.query.matches(&row.recipe)) {
            ui.text(row.recipe.clone());
        }
    }

    fn build_page_tooltip(&self, ui: &mut RegionUi<'_>, model: &ProductionTable) {
        ui.text(format!("{} rows", model.rows.len()));
    }
}

thread_local! {
    /// Scroll cell and header handle reached from inside `RestlessView` builds.
    static RESTLESS: RefCell<Option<(Rc<PendingScroll>, RegionHandle, Cell<u16>)>> =
        const { RefCell::new(None) };
}

/// Requests a scroll from every header build and marks the header dirty from
/// every body build, so a re-entrant layout issues a request of its own.
#[derive(Debug)]
struct RestlessView;

impl PageViewContent for RestlessView {
    type Model = ProductionTable;

    fn create() -> Self {
        RestlessView
    }

    fn build_header(&self, ui: &mut RegionUi<'_>, _cx: &PageContext<'_, ProductionTable>) {
        ui.text("Recipe");
        RESTLESS.with(|slot| {
            if let Some((pending, _, next)) = &*slot.borrow() {
                pending.request(next.get());
                next.set(next.get() + 10);
            }
        });
    }

    fn build_content(&self, ui: &mut RegionUi<'_>, cx: &PageContext<'_, ProductionTable>) {
        RowsView.build_content(ui, cx);
        RESTLESS.with(|slot| {
            if let Some((_, header, _)) = &*slot.borrow() {
                header.rebuild();
            }
        });
    }

    fn build_page_tooltip(&self, _ui: &mut RegionUi<'_>, _model: &ProductionTable) {}
}

fn theme() -> Theme {
    Theme::with_color_config(ColorConfig::new(false))
}

fn named_rows(names: &[&str]) -> PageHandle {
    let rows = names
        .iter()
        .map(|name| RecipeRow::new(*name, "assembler", 1.0, *name, 60.0))
        .collect();
    PageHandle::new("Named", PageContents::ProductionTable(ProductionTable::new(rows)))
}

fn long_page(name: &str, rows: usize) -> PageHandle {
    let rows = (0..rows)
        .map(|i| RecipeRow::new(format!("recipe-{i}"), "assembler", 1.0, "gear", 60.0))
        .collect();
    PageHandle::new(name, PageContents::ProductionTable(ProductionTable::new(rows)))
}

fn summary_page() -> PageHandle {
    PageHandle::new("Summary", PageContents::Summary(Summary::default()))
}

fn mounted() -> (Gui, PageView<RowsView>, InputSystem) {
    let mut gui = Gui::new(theme());
    let mut view = PageView::<RowsView>::new(theme());
    assert!(view.mount(&mut gui));
    (gui, view, InputSystem::new())
}

fn frame<V: PageViewContent>(gui: &mut Gui, view: &mut PageView<V>, phase: BuildPhase) {
    gui.begin_frame(Rect::new(0, 0, VISIBLE.width, VISIBLE.height), phase);
    view.build(gui, VISIBLE);
}

// ===== Binding =====

#[test]
fn set_model_subscribes_once_and_takes_focus() {
    let (_gui, mut view, mut input) = mounted();
    let page = long_page("P", 10);

    view.set_model(Some(page.clone()), &mut input);

    assert!(view.is_bound());
    assert_eq!(page.content_changed().subscriber_count(), 1);
    assert_eq!(input.keyboard_focus(), Some(view.id()));
}

#[test]
fn switching_pages_moves_the_subscription() {
    let (_gui, mut view, mut input) = mounted();
    let p = long_page("P", 10);
    let q = long_page("Q", 10);

    view.set_model(Some(p.clone()), &mut input);
    view.set_model(Some(q.clone()), &mut input);

    assert_eq!(p.content_changed().subscriber_count(), 0);
    assert_eq!(q.content_changed().subscriber_count(), 1);
}

#[test]
fn detaching_leaves_no_subscription() {
    let (_gui, mut view, mut input) = mounted();
    let page = long_page("P", 10);

    view.set_model(Some(page.clone()), &mut input);
    view.set_model(None, &mut input);

    assert!(!view.is_bound());
    assert!(view.page().is_none());
    assert_eq!(page.content_changed().subscriber_count(), 0);
}

#[test]
fn content_change_marks_view_for_rebuild() {
    let (mut gui, mut view, mut input) = mounted();
    let page = long_page("P", 10);
    view.set_model(Some(page.clone()), &mut input);
    frame(&mut gui, &mut view, BuildPhase::Measuring);
    assert!(!view.needs_rebuild());

    page.update(|table: &mut ProductionTable| {
        table
            .rows
            .push(RecipeRow::new("extra", "assembler", 1.0, "gear", 1.0))
    });

    assert!(view.needs_rebuild());
    frame(&mut gui, &mut view, BuildPhase::Measuring);
    assert_eq!(view.body().content_size().height, 11);
}

#[test]
fn mismatched_page_renders_empty_body() {
    let (mut gui, mut view, mut input) = mounted();
    let page = summary_page();

    view.set_model(Some(page.clone()), &mut input);
    frame(&mut gui, &mut view, BuildPhase::Measuring);

    assert!(!view.is_bound());
    assert!(view.page().is_some());
    assert_eq!(page.content_changed().subscriber_count(), 0);
    assert_eq!(view.body().content_size(), Size::ZERO);
    assert_eq!(view.header_height(), 0);
}

#[test]
fn mismatched_page_still_shows_its_error() {
    let (mut gui, mut view, mut input) = mounted();
    let page = summary_page();
    page.set_model_error(ModelError::Message("stale".into()));

    view.set_model(Some(page), &mut input);
    frame(&mut gui, &mut view, BuildPhase::Measuring);

    assert_eq!(view.header_height(), 1);
}

// ===== Layout =====

#[test]
fn content_width_is_widest_of_header_and_body() {
    let (mut gui, mut view, mut input) = mounted();

    view.set_model(Some(named_rows(&["ab"])), &mut input);
    frame(&mut gui, &mut view, BuildPhase::Measuring);
    assert_eq!(view.content_width(), 6, "header \"Recipe\" is wider");

    view.set_model(Some(named_rows(&["a-very-long-recipe-name"])), &mut input);
    frame(&mut gui, &mut view, BuildPhase::Measuring);
    assert_eq!(view.content_width(), 23, "body is wider");
}

#[test]
fn regions_are_measured_without_the_scrollbar() {
    let (mut gui, mut view, mut input) = mounted();
    view.set_model(Some(long_page("P", 5)), &mut input);

    frame(&mut gui, &mut view, BuildPhase::Measuring);

    assert_eq!(view.header().layout_width(), VISIBLE.width - 1);
    assert_eq!(view.body().layout_width(), VISIBLE.width - 1);
}

#[test]
fn drawing_frame_reuses_measurements() {
    let (mut gui, mut view, mut input) = mounted();
    view.set_model(Some(long_page("P", 100)), &mut input);
    frame(&mut gui, &mut view, BuildPhase::Measuring);
    let builds = (view.header().build_count(), view.body().build_count());
    let commands = gui.command_count();

    frame(&mut gui, &mut view, BuildPhase::Drawing);

    assert_eq!(
        (view.header().build_count(), view.body().build_count()),
        builds
    );
    assert_eq!(gui.command_count(), commands);
}

#[test]
fn header_is_pinned_while_body_scrolls() {
    let (mut gui, mut view, mut input) = mounted();
    view.set_model(Some(long_page("P", 100)), &mut input);
    frame(&mut gui, &mut view, BuildPhase::Measuring);

    view.scroll_by(0, 30);
    frame(&mut gui, &mut view, BuildPhase::Drawing);
    let mut screen = Buffer::empty(Rect::new(0, 0, VISIBLE.width, VISIBLE.height));
    gui.present(&mut screen);

    assert_eq!(view.header().offset().y, 0);
    assert_eq!(view.body().offset().y, 30);
    assert_eq!(screen[(0, 0)].symbol(), "R");
    let second_row: String = (0..9).map(|x| screen[(x, 1)].symbol().to_string()).collect();
    assert_eq!(second_row, "recipe-30");
}

// ===== Scroll requests =====

#[test]
fn scroll_message_is_applied_in_the_same_frame() {
    let (mut gui, mut view, mut input) = mounted();
    view.set_model(Some(long_page("P", 400)), &mut input);
    frame(&mut gui, &mut view, BuildPhase::Measuring);

    gui.send_message(SetScrollPositionMessage { top: 100 });
    frame(&mut gui, &mut view, BuildPhase::Drawing);

    assert_eq!(view.scroll().scroll_y(), 100);
    assert_eq!(view.body().offset().y, 100);
    assert!(!view.scroll_state().pending().is_requested());
}

#[test]
fn scroll_request_before_first_layout_is_applied_after_it() {
    let (mut gui, mut view, mut input) = mounted();
    view.set_model(Some(long_page("P", 400)), &mut input);

    gui.send_message(SetScrollPositionMessage { top: 100 });
    frame(&mut gui, &mut view, BuildPhase::Measuring);

    assert_eq!(view.scroll().scroll_y(), 100);
    assert_eq!(view.header().build_count(), 1, "re-entry does not re-measure");
}

#[test]
fn scroll_request_is_clamped_to_content() {
    let (mut gui, mut view, mut input) = mounted();
    view.set_model(Some(long_page("P", 30)), &mut input);
    frame(&mut gui, &mut view, BuildPhase::Measuring);

    gui.send_message(SetScrollPositionMessage { top: 1000 });
    frame(&mut gui, &mut view, BuildPhase::Drawing);

    // 30 rows + 9 rows overscroll - 19 visible rows.
    assert_eq!(view.scroll().scroll_y(), 20);
}

#[test]
fn detach_and_reattach_restores_scroll() {
    let (mut gui, mut view, mut input) = mounted();
    let p = long_page("P", 400);
    let q = long_page("Q", 400);

    view.set_model(Some(p.clone()), &mut input);
    gui.send_message(SetScrollPositionMessage { top: 250 });
    frame(&mut gui, &mut view, BuildPhase::Measuring);
    assert_eq!(view.scroll().scroll_y(), 250);

    view.set_model(None, &mut input);
    assert_eq!(p.saved_scroll(), 250);

    view.set_model(Some(q.clone()), &mut input);
    frame(&mut gui, &mut view, BuildPhase::Measuring);
    assert_eq!(view.scroll().scroll_y(), 0);

    view.set_model(None, &mut input);
    view.set_model(Some(p), &mut input);
    frame(&mut gui, &mut view, BuildPhase::Measuring);
    assert_eq!(view.scroll().scroll_y(), 250);
}

#[test]
fn explicit_zero_request_wins_over_saved_scroll() {
    let (mut gui, mut view, mut input) = mounted();
    let page = long_page("P", 400);
    page.set_saved_scroll(250);

    view.set_model(Some(page), &mut input);
    gui.send_message(SetScrollPositionMessage { top: 0 });
    frame(&mut gui, &mut view, BuildPhase::Measuring);

    assert_eq!(view.scroll().scroll_y(), 0);
}

#[test]
fn request_from_reentrant_build_waits_for_next_frame() {
    let mut gui = Gui::new(theme());
    let mut view = PageView::<RestlessView>::new(theme());
    assert!(view.mount(&mut gui));
    view.set_model(Some(long_page("P", 400)), &mut InputSystem::new());
    RESTLESS.with(|slot| {
        *slot.borrow_mut() = Some((
            view.scroll_state().shared_pending(),
            view.header().handle(),
            Cell::new(50),
        ));
    });

    frame(&mut gui, &mut view, BuildPhase::Measuring);

    assert_eq!(view.header().build_count(), 2, "one re-entrant build, no more");
    assert_eq!(view.body().build_count(), 1);
    assert_eq!(view.scroll().scroll_y(), 50);
    assert!(view.scroll_state().pending().is_requested());
    assert_eq!(view.scroll_state().pending().target(), Some(60));

    RESTLESS.with(|slot| *slot.borrow_mut() = None);
    frame(&mut gui, &mut view, BuildPhase::Drawing);

    assert_eq!(view.scroll().scroll_y(), 60);
    assert!(!view.scroll_state().pending().is_requested());
    assert_eq!(view.header().build_count(), 2);
}

#[test]
fn unmounted_view_ignores_scroll_messages() {
    let (mut gui, mut view, mut input) = mounted();
    view.set_model(Some(long_page("P", 400)), &mut input);
    frame(&mut gui, &mut view, BuildPhase::Measuring);
    assert!(view.unmount(&mut gui));

    gui.send_message(SetScrollPositionMessage { top: 100 });
    frame(&mut gui, &mut view, BuildPhase::Drawing);

    assert_eq!(view.scroll().scroll_y(), 0);
}

// ===== Search =====

#[test]
fn setting_the_same_query_twice_rebuilds_twice() {
    let (mut gui, mut view, mut input) = mounted();
    view.set_model(Some(long_page("P", 20)), &mut input);
    frame(&mut gui, &mut view, BuildPhase::Measuring);
    let header_before = view.header().rebuild_requests();
    let body_before = view.body().rebuild_requests();

    view.set_search_query(SearchQuery::new("recipe-1"));
    view.set_search_query(SearchQuery::new("recipe-1"));

    assert_eq!(view.header().rebuild_requests(), header_before + 2);
    assert_eq!(view.body().rebuild_requests(), body_before + 2);
}

#[test]
fn query_filters_body_rows() {
    let (mut gui, mut view, mut input) = mounted();
    view.set_model(Some(long_page("P", 20)), &mut input);

    view.set_search_query(SearchQuery::new("recipe-1"));
    frame(&mut gui, &mut view, BuildPhase::Measuring);

    // recipe-1 and recipe-10 through recipe-19.
    assert_eq!(view.body().content_size().height, 11);
}

// ===== Errors =====

#[test]
fn dismissing_the_error_clears_it_on_the_page() {
    let (mut gui, mut view, mut input) = mounted();
    let page = long_page("P", 5);
    page.set_model_error(ModelError::Calculation("no solution".into()));
    view.set_model(Some(page.clone()), &mut input);
    frame(&mut gui, &mut view, BuildPhase::Measuring);
    assert_eq!(view.header_height(), 2);

    view.dismiss_error();
    assert!(view.needs_rebuild());
    frame(&mut gui, &mut view, BuildPhase::Measuring);

    assert_eq!(view.header_height(), 1);
    assert_eq!(page.model_error(), None);
}

// ===== Screenshot =====

#[test]
fn screenshot_covers_header_and_whole_body() {
    let (mut gui, mut view, mut input) = mounted();
    view.set_model(Some(long_page("P", 400)), &mut input);
    gui.send_message(SetScrollPositionMessage { top: 100 });
    frame(&mut gui, &mut view, BuildPhase::Measuring);

    let shot = view.generate_full_page_screenshot();

    assert_eq!(shot.area.height, 401);
    assert_eq!(shot.area.width, view.calculate_width());
    assert_eq!(shot[(0, 1)].symbol(), "r");
    assert_eq!(shot[(7, 1)].symbol(), "0", "body starts at its first row");
    assert_eq!(view.body().offset().y, 100, "offset restored");
}

#[test]
fn screenshot_before_first_frame_uses_fallback_width() {
    let (_gui, mut view, mut input) = mounted();
    view.set_model(Some(long_page("P", 3)), &mut input);

    let shot = view.generate_full_page_screenshot();

    assert_eq!(shot.area.height, 4);
    assert_eq!(shot.area.width, crate::view::constants::FALLBACK_LAYOUT_WIDTH);
}

#[test]
fn screenshot_leaves_stale_layout_for_next_frame() {
    let (mut gui, mut view, mut input) = mounted();
    let page = long_page("P", 10);
    view.set_model(Some(page.clone()), &mut input);
    frame(&mut gui, &mut view, BuildPhase::Measuring);
    page.update(|table: &mut ProductionTable| {
        table.rows = (0..200)
            .map(|i| RecipeRow::new(format!("recipe-{i}"), "assembler", 1.0, "gear", 60.0))
            .collect();
    });
    let builds = view.body().build_count();

    let shot = view.generate_full_page_screenshot();

    assert_eq!(shot.area.height, 201, "export sees the new rows");
    assert!(view.needs_rebuild(), "live layout still waits for a measuring frame");
    assert_eq!(view.body().build_count(), builds);
    assert_eq!(view.body().content_size().height, 10);

    gui.send_message(SetScrollPositionMessage { top: 100 });
    frame(&mut gui, &mut view, BuildPhase::Measuring);
    assert_eq!(view.body().content_size().height, 200);
    assert_eq!(view.scroll().scroll_y(), 100);
}

#[test]
fn screenshot_keeps_pending_dismiss_and_error() {
    let (mut gui, mut view, mut input) = mounted();
    let page = long_page("P", 5);
    page.set_model_error(ModelError::Calculation("no solution".into()));
    view.set_model(Some(page.clone()), &mut input);
    frame(&mut gui, &mut view, BuildPhase::Measuring);
    view.dismiss_error();

    let shot = view.generate_full_page_screenshot();

    assert_eq!(shot.area.height, 7, "error row, header row and five rows");
    assert!(page.model_error().is_some());
    assert!(view.needs_rebuild());

    frame(&mut gui, &mut view, BuildPhase::Measuring);
    assert_eq!(view.header_height(), 1);
    assert_eq!(page.model_error(), None);
}

// ===== Other operations =====

#[test]
fn secondary_view_is_unbound_and_same_kind() {
    let (_gui, mut view, mut input) = mounted();
    view.set_model(Some(long_page("P", 3)), &mut input);

    let secondary = view.create_secondary_view();

    assert_eq!(secondary.kind(), view.kind());
    assert_ne!(secondary.id(), view.id());
    assert!(secondary.page().is_none());
}

#[test]
fn tooltip_ignores_other_content_kinds() {
    let view = PageView::<RowsView>::new(theme());
    let theme = theme();

    let mut ui = RegionUi::new(40, &theme);
    view.build_page_tooltip(&mut ui, &PageContents::Summary(Summary::default()));
    assert!(ui.lines().is_empty());

    let page = long_page("P", 7);
    view.build_page_tooltip(&mut ui, page.borrow().contents());
    assert_eq!(ui.lines()[0].to_string(), "7 rows");
}

#[test]
fn model_dropdown_lists_pages_of_the_same_kind() {
    let (_gui, mut view, mut input) = mounted();
    let project = Project::sample();
    let first = project.page(0).cloned();
    view.set_model(first, &mut input);
    let theme = theme();
    let mut ui = RegionUi::new(40, &theme);

    view.build_model_dropdown(&mut ui, &project);

    let lines: Vec<String> = ui.lines().iter().map(|line| line.to_string()).collect();
    assert_eq!(lines, vec!["> Smelting".to_string(), "  Circuits".to_string()]);
}

#[test]
fn control_key_defaults_to_unhandled() {
    let (_gui, mut view, _input) = mounted();
    assert!(!view.control_key(KeyCode::Char('b')));
}

#[test]
fn handled_control_key_rebuilds() {
    let mut view = PageView::<ProductionTableView>::new(theme());
    let before = view.body().rebuild_requests();

    assert!(view.control_key(KeyCode::Char('b')));

    assert_eq!(view.body().rebuild_requests(), before + 1);
    assert!(!view.content().shows_buildings());
}
