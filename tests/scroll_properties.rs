//! Property-based tests for scrolling and full-page export.
//!
//! Properties under test:
//! - Offsets are always clamped to the range of the last layout.
//! - A scroll request lands on `min(target, max)` in the frame it is delivered.
//! - A full-page screenshot is exactly header plus body tall, whatever the
//!   viewport or scroll offset, and leaves the live offset alone.
//! - The page width is the widest of header layout, header content and body.

use pageview::gui::{ColorConfig, InputSystem, ScrollArea, Theme};
use pageview::model::{PageContents, PageHandle, ProductionTable, RecipeRow};
use pageview::pages::ProductionTableView;
use pageview::state::PagePane;
use pageview::view::{PageView, ProjectPageView};
use proptest::prelude::*;
use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};

// ===== Helpers =====

fn theme() -> Theme {
    Theme::with_color_config(ColorConfig::new(false))
}

fn table_page(rows: usize, recipe_len: usize) -> PageHandle {
    let rows = (0..rows)
        .map(|i| {
            RecipeRow::new(
                format!("{}{i}", "r".repeat(recipe_len)),
                "assembler",
                1.0,
                "gear",
                60.0,
            )
        })
        .collect();
    PageHandle::new(
        "Gears",
        PageContents::ProductionTable(ProductionTable::new(rows)),
    )
}

fn bound_pane(page: &PageHandle) -> PagePane {
    let mut pane = PagePane::new(
        Box::new(PageView::<ProductionTableView>::new(theme())),
        theme(),
    );
    pane.set_page(Some(page.clone()), &mut InputSystem::new());
    pane
}

fn render(pane: &mut PagePane, area: Rect) {
    let mut buffer = Buffer::empty(area);
    pane.render(area, &mut buffer);
}

// ===== Properties =====

proptest! {
    #[test]
    fn offsets_stay_within_layout_bounds(
        content_w in 0u16..300,
        content_h in 0u16..2000,
        view_w in 1u16..200,
        view_h in 1u16..100,
        overscroll in any::<bool>(),
        target_x in any::<u16>(),
        target_y in any::<u16>(),
    ) {
        let mut area = ScrollArea::new(1);
        area.update_bounds(
            Size::new(content_w, content_h),
            Rect::new(0, 0, view_w, view_h),
            overscroll,
        );
        area.set_scroll_x(target_x);
        area.set_scroll_y(target_y);

        let extra = if overscroll { view_h / 2 } else { 0 };
        let max_y = (content_h + extra).saturating_sub(view_h);
        prop_assert_eq!(area.max_scroll().y, max_y);
        prop_assert_eq!(area.max_scroll().x, content_w.saturating_sub(view_w));
        prop_assert_eq!(area.scroll_y(), target_y.min(max_y));
        prop_assert_eq!(area.scroll_x(), target_x.min(area.max_scroll().x));
        if let Some(thumb) = area.thumb() {
            prop_assert!(thumb.len >= 1);
            prop_assert!(thumb.start + thumb.len <= view_h);
        }
    }

    #[test]
    fn scroll_request_applies_in_the_same_frame(
        rows in 1usize..200,
        height in 3u16..40,
        target in 0u16..400,
    ) {
        let page = table_page(rows, 3);
        let area = Rect::new(0, 0, 100, height);
        let mut pane = bound_pane(&page);
        render(&mut pane, area);

        pane.scroll_to(target);
        render(&mut pane, area);

        let scroll = pane.view().scroll();
        prop_assert_eq!(scroll.scroll_y(), target.min(scroll.max_scroll().y));
    }

    #[test]
    fn screenshot_is_header_plus_body_tall(
        rows in 0usize..120,
        height in 3u16..40,
        width in 20u16..120,
        scroll in 0u16..200,
    ) {
        let page = table_page(rows, 4);
        let area = Rect::new(0, 0, width, height);
        let mut gui = pageview::gui::Gui::new(theme());
        let mut view = PageView::<ProductionTableView>::new(theme());
        view.mount(&mut gui);
        view.set_model(Some(page), &mut InputSystem::new());
        gui.begin_frame(area, pageview::gui::BuildPhase::Measuring);
        view.build(&mut gui, area.as_size());
        view.scroll_by(0, i32::from(scroll));
        let before = view.scroll().offset();

        let shot = view.generate_full_page_screenshot();

        let expected = view.header().content_size().height + view.body().content_size().height;
        prop_assert_eq!(shot.area.height, expected);
        prop_assert_eq!(shot.area.width, view.calculate_width());
        prop_assert_eq!(view.scroll().offset(), before);
        prop_assert_eq!(view.body().offset(), before);
    }

    #[test]
    fn page_width_is_widest_measurement(
        rows in 1usize..30,
        recipe_len in 1usize..60,
        width in 10u16..150,
    ) {
        let page = table_page(rows, recipe_len);
        let area = Rect::new(0, 0, width, 20);
        let mut gui = pageview::gui::Gui::new(theme());
        let mut view = PageView::<ProductionTableView>::new(theme());
        view.mount(&mut gui);
        view.set_model(Some(page), &mut InputSystem::new());
        gui.begin_frame(area, pageview::gui::BuildPhase::Measuring);
        view.build(&mut gui, area.as_size());

        let expected = view
            .header()
            .layout_width()
            .max(view.header().content_size().width)
            .max(view.body().content_size().width);
        prop_assert_eq!(view.calculate_width(), expected);
        prop_assert!(view.calculate_width() >= width.saturating_sub(1));
    }
}
