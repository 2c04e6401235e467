//! Production table page: one row per recipe.

use super::{fit, fit_right, join};
use crate::gui::RegionUi;
use crate::model::{ProductionTable, RecipeRow, SearchQuery};
use crate::view::{PageContext, PageViewContent};
use crossterm::event::KeyCode;
use ratatui::text::Line;

const RECIPE_WIDTH: usize = 20;
const BUILDING_WIDTH: usize = 18;
const COUNT_WIDTH: usize = 6;
const PRODUCT_WIDTH: usize = 16;
const RATE_WIDTH: usize = 9;

/// Recipes shown in a page tooltip.
const TOOLTIP_RECIPES: usize = 3;

/// Table of recipe rows with a pinned column header.
///
/// `b` toggles the building columns.
#[derive(Debug)]
pub struct ProductionTableView {
    show_buildings: bool,
}

impl ProductionTableView {
    /// Whether building columns are shown.
    pub fn shows_buildings(&self) -> bool {
        self.show_buildings
    }

    fn header_cells(&self) -> Vec<String> {
        let mut cells = vec![fit("Recipe", RECIPE_WIDTH)];
        if self.show_buildings {
            cells.push(fit("Building", BUILDING_WIDTH));
            cells.push(fit_right("Count", COUNT_WIDTH));
        }
        cells.push(fit("Product", PRODUCT_WIDTH));
        cells.push(fit_right("Rate/min", RATE_WIDTH));
        cells
    }

    fn row_cells(&self, row: &RecipeRow) -> Vec<String> {
        let mut cells = vec![fit(&row.recipe, RECIPE_WIDTH)];
        if self.show_buildings {
            cells.push(fit(&row.building, BUILDING_WIDTH));
            cells.push(fit_right(&format!("{:.1}", row.buildings), COUNT_WIDTH));
        }
        cells.push(fit(&row.product, PRODUCT_WIDTH));
        cells.push(fit_right(&format!("{:.1}", row.rate), RATE_WIDTH));
        cells
    }
}

fn row_matches(query: &SearchQuery, row: &RecipeRow) -> bool {
    query.matches_any([
        row.recipe.as_str(),
        row.building.as_str(),
        row.product.as_str(),
    ])
}

impl PageViewContent for ProductionTableView {
    type Model = ProductionTable;

    fn create() -> Self {
        Self {
            show_buildings: true,
        }
    }

    fn build_header(&self, ui: &mut RegionUi<'_>, cx: &PageContext<'_, ProductionTable>) {
        let theme = *ui.theme();
        ui.line(Line::styled(join(&self.header_cells()), theme.heading));
        if !cx.query.is_empty() {
            let shown = cx
                .model
                .rows
                .iter()
                .filter(|row| row_matches(cx.query, row))
                .count();
            ui.line(Line::styled(
                format!(
                    "Filter \"{}\": {shown} of {} recipes",
                    cx.query,
                    cx.model.rows.len()
                ),
                theme.muted,
            ));
        }
    }

    fn build_content(&self, ui: &mut RegionUi<'_>, cx: &PageContext<'_, ProductionTable>) {
        let theme = *ui.theme();
        if cx.model.rows.is_empty() {
            ui.line(Line::styled("No recipes on this page", theme.muted));
            return;
        }
        let mut shown = 0;
        for row in cx.model.rows.iter().filter(|row| row_matches(cx.query, row)) {
            let style = if cx.query.is_empty() {
                theme.text
            } else {
                theme.highlight
            };
            ui.line(Line::styled(join(&self.row_cells(row)), style));
            shown += 1;
        }
        if shown == 0 {
            ui.line(Line::styled("No matching recipes", theme.muted));
        }
    }

    fn build_page_tooltip(&self, ui: &mut RegionUi<'_>, model: &ProductionTable) {
        let theme = *ui.theme();
        ui.line(Line::styled(
            format!("{} recipes", model.rows.len()),
            theme.heading,
        ));
        for row in model.rows.iter().take(TOOLTIP_RECIPES) {
            ui.text(format!("  {} ({})", row.recipe, row.building));
        }
        if model.rows.len() > TOOLTIP_RECIPES {
            ui.line(Line::styled(
                format!("  and {} more", model.rows.len() - TOOLTIP_RECIPES),
                theme.muted,
            ));
        }
    }

    fn control_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('b') => {
                self.show_buildings = !self.show_buildings;
                true
            }
            _ => false,
        }
    }
}
