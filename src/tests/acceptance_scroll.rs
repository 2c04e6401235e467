//! Acceptance: scroll offsets survive detaching and re-attaching pages.
//!
//! A view bound to page P is scrolled, switched to page Q of the same kind and
//! back. P's offset is saved on detach and restored on the first frame after
//! re-attaching.

use crate::gui::{ColorConfig, Theme};
use crate::model::{PageContents, PageHandle, ProductionTable, Project, RecipeRow};
use crate::state::Workspace;
use crate::view::{PageViewOptions, ViewFactory};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

const AREA: Rect = Rect {
    x: 0,
    y: 0,
    width: 80,
    height: 24,
};

fn table_page(name: &str, rows: usize) -> PageHandle {
    let rows = (0..rows)
        .map(|i| {
            RecipeRow::new(
                format!("{name}-recipe-{i}"),
                "assembler",
                1.0,
                format!("{name}-item-{i}"),
                30.0,
            )
        })
        .collect();
    PageHandle::new(name, PageContents::ProductionTable(ProductionTable::new(rows)))
}

fn workspace() -> Workspace {
    let project = Project::new(vec![table_page("P", 400), table_page("Q", 400)]);
    Workspace::new(
        project,
        &ViewFactory::with_builtin_views(),
        Theme::with_color_config(ColorConfig::new(false)),
        PageViewOptions::default(),
    )
}

fn render(workspace: &mut Workspace) {
    let mut buffer = Buffer::empty(AREA);
    if let (Some(pane), _) = workspace.visible_panes_mut() {
        pane.render(AREA, &mut buffer);
    }
}

fn scroll_y(workspace: &Workspace) -> u16 {
    workspace
        .active_pane()
        .expect("active pane")
        .view()
        .scroll()
        .scroll_y()
}

#[test]
fn scroll_offset_is_restored_after_switching_away_and_back() {
    let mut workspace = workspace();
    let p = workspace.project().page(0).cloned().expect("page P");
    let q = workspace.project().page(1).cloned().expect("page Q");
    render(&mut workspace);
    assert_eq!(scroll_y(&workspace), 0);

    workspace.active_pane_mut().expect("pane").scroll_to(250);
    render(&mut workspace);
    assert_eq!(scroll_y(&workspace), 250, "request applied in the same frame");

    assert!(workspace.open_page(1));
    assert_eq!(p.saved_scroll(), 250);
    assert_eq!(p.content_changed().subscriber_count(), 0);
    render(&mut workspace);
    assert_eq!(scroll_y(&workspace), 0, "Q starts at its own saved offset");

    assert!(workspace.open_page(0));
    assert_eq!(q.content_changed().subscriber_count(), 0);
    assert_eq!(p.content_changed().subscriber_count(), 1);
    render(&mut workspace);
    assert_eq!(scroll_y(&workspace), 250);
}

#[test]
fn explicit_scroll_to_zero_beats_saved_offset() {
    let mut workspace = workspace();
    render(&mut workspace);
    workspace.scroll_by(0, 120);
    render(&mut workspace);

    workspace.open_page(1);
    render(&mut workspace);
    workspace.open_page(0);
    workspace.active_pane_mut().expect("pane").scroll_to(0);
    render(&mut workspace);

    assert_eq!(scroll_y(&workspace), 0);
}

#[test]
fn request_past_the_end_is_clamped_to_the_last_page() {
    let mut workspace = workspace();
    render(&mut workspace);

    workspace.active_pane_mut().expect("pane").scroll_to(u16::MAX);
    render(&mut workspace);

    let scroll = workspace.active_pane().expect("pane").view().scroll();
    assert_eq!(scroll.scroll_y(), scroll.max_scroll().y);
    assert!(scroll.max_scroll().y > 250);
}
