//! Screen layout: title bar, page list, page panes, overlays and status bar.

use crate::gui::{RegionUi, Theme};
use crate::state::{FocusPane, SearchState, Workspace};
use crate::view::constants::{
    PAGE_LIST_WIDTH, SEARCH_INPUT_HEIGHT, STATUS_BAR_HEIGHT, TOOLTIP_WIDTH,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Key hints shown when there is no status message.
const HINTS: &str = "q quit  / search  ]/[ page  p preview  v split  m pages  e export";

/// Areas of the last rendered frame, for mouse hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutAreas {
    /// Page list sidebar; row `n` is page `n`.
    pub page_list: Rect,
    /// Primary page pane.
    pub primary: Rect,
    /// Secondary page pane, when open.
    pub secondary: Option<Rect>,
}

/// Render the whole screen and return where things went.
pub fn render_layout(frame: &mut Frame, workspace: &mut Workspace, theme: &Theme) -> LayoutAreas {
    let search_height = match workspace.search() {
        SearchState::Inactive => 0,
        _ => SEARCH_INPUT_HEIGHT,
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(search_height),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(PAGE_LIST_WIDTH), Constraint::Min(0)])
        .split(rows[1]);

    render_title(frame, rows[0], workspace, theme);
    let page_list = render_page_list(frame, columns[0], workspace, theme);
    let (primary, secondary) = render_panes(frame, columns[1], workspace);
    if search_height > 0 {
        render_search(frame, rows[2], workspace.search(), theme);
    }
    render_status(frame, rows[3], workspace, theme);

    if workspace.preview_visible {
        render_tooltip(frame, page_list, workspace, theme);
    }
    if workspace.dropdown_visible {
        let anchor = match (workspace.focus(), secondary) {
            (FocusPane::Secondary, Some(area)) => area,
            _ => primary,
        };
        render_dropdown(frame, anchor, workspace, theme);
    }

    LayoutAreas {
        page_list,
        primary,
        secondary,
    }
}

fn render_title(frame: &mut Frame, area: Rect, workspace: &Workspace, theme: &Theme) {
    let mut spans = vec![Span::styled(" pageview ", theme.heading)];
    if let Some(page) = workspace.active_page() {
        spans.push(Span::styled(
            format!(
                "│ {} ({}) │ {}/{}",
                page.name(),
                page.kind(),
                workspace.active_index() + 1,
                workspace.project().len()
            ),
            theme.text,
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.base()), area);
}

fn render_page_list(frame: &mut Frame, area: Rect, workspace: &Workspace, theme: &Theme) -> Rect {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(theme.muted);
    let inner = block.inner(area);
    let lines: Vec<Line> = workspace
        .project()
        .pages()
        .iter()
        .enumerate()
        .map(|(index, page)| {
            if index == workspace.active_index() {
                Line::styled(
                    format!("> {}", page.name()),
                    theme.highlight.add_modifier(Modifier::BOLD),
                )
            } else {
                Line::styled(format!("  {}", page.name()), theme.text)
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block).style(theme.base()), area);
    inner
}

fn render_panes(frame: &mut Frame, area: Rect, workspace: &mut Workspace) -> (Rect, Option<Rect>) {
    let (primary, secondary) = workspace.visible_panes_mut();
    let buffer = frame.buffer_mut();
    match (primary, secondary) {
        (primary, Some(secondary)) => {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(area);
            if let Some(pane) = primary {
                pane.render(halves[0], buffer);
            }
            secondary.render(halves[1], buffer);
            (halves[0], Some(halves[1]))
        }
        (Some(pane), None) => {
            pane.render(area, buffer);
            (area, None)
        }
        (None, None) => (area, None),
    }
}

/// Bordered popup of `lines` at `origin`, clipped to the frame.
fn render_popup(frame: &mut Frame, origin: Position, title: &str, lines: Vec<Line<'static>>, theme: &Theme) {
    let screen = frame.area();
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = Rect::new(origin.x, origin.y, TOOLTIP_WIDTH, height).intersection(screen);
    if area.is_empty() {
        return;
    }
    let block = Block::bordered()
        .title(Span::styled(title.to_string(), theme.heading))
        .border_style(theme.muted);
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block).style(theme.base()), area);
}

fn render_tooltip(frame: &mut Frame, page_list: Rect, workspace: &Workspace, theme: &Theme) {
    let (Some(page), Some(pane)) = (workspace.active_page(), workspace.active_pane()) else {
        return;
    };
    let mut ui = RegionUi::new(TOOLTIP_WIDTH.saturating_sub(2), theme);
    pane.view().build_page_tooltip(&mut ui, page.borrow().contents());
    let row = u16::try_from(workspace.active_index()).unwrap_or(u16::MAX);
    let origin = Position::new(page_list.right(), page_list.y.saturating_add(row));
    render_popup(frame, origin, &page.name(), ui.into_lines(), theme);
}

fn render_dropdown(frame: &mut Frame, anchor: Rect, workspace: &Workspace, theme: &Theme) {
    let Some(pane) = workspace.focused_pane() else {
        return;
    };
    let mut ui = RegionUi::new(TOOLTIP_WIDTH.saturating_sub(2), theme);
    pane.view().build_model_dropdown(&mut ui, workspace.project());
    let title = pane.view().kind().label();
    render_popup(frame, anchor.as_position(), title, ui.into_lines(), theme);
}

fn render_search(frame: &mut Frame, area: Rect, search: &SearchState, theme: &Theme) {
    match search {
        SearchState::Typing { query, cursor } => {
            let line = Line::from(vec![
                Span::styled("/", theme.heading),
                Span::styled(query.clone(), theme.text),
            ]);
            frame.render_widget(Paragraph::new(line).style(theme.base()), area);
            let column = query.chars().take(*cursor).collect::<String>();
            let x = area.x + 1 + unicode_width::UnicodeWidthStr::width(column.as_str()) as u16;
            frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), area.y));
        }
        SearchState::Active(query) => {
            let line = Line::from(vec![
                Span::styled("Filter: ", theme.muted),
                Span::styled(query.to_string(), theme.highlight),
            ]);
            frame.render_widget(Paragraph::new(line).style(theme.base()), area);
        }
        SearchState::Inactive => {}
    }
}

fn render_status(frame: &mut Frame, area: Rect, workspace: &Workspace, theme: &Theme) {
    let line = match workspace.status() {
        Some(message) => Line::styled(message.to_string(), theme.text),
        None => Line::styled(HINTS, theme.muted),
    };
    frame.render_widget(Paragraph::new(line).style(theme.base()), area);
}
