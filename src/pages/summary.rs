//! Summary page: production and consumption balance per goods item.

use super::{fit, fit_right, join};
use crate::gui::RegionUi;
use crate::model::{GoodsBalance, Summary};
use crate::view::{PageContext, PageViewContent};
use ratatui::text::Line;

const GOODS_WIDTH: usize = 20;
const AMOUNT_WIDTH: usize = 10;

/// Goods balances with deficits highlighted.
#[derive(Debug)]
pub struct SummaryView;

fn balance_cells(balance: &GoodsBalance) -> Vec<String> {
    vec![
        fit(&balance.goods, GOODS_WIDTH),
        fit_right(&format!("{:.1}", balance.produced), AMOUNT_WIDTH),
        fit_right(&format!("{:.1}", balance.consumed), AMOUNT_WIDTH),
        fit_right(&format!("{:+.1}", balance.net()), AMOUNT_WIDTH),
    ]
}

impl PageViewContent for SummaryView {
    type Model = Summary;

    fn create() -> Self {
        SummaryView
    }

    fn build_header(&self, ui: &mut RegionUi<'_>, _cx: &PageContext<'_, Summary>) {
        let theme = *ui.theme();
        let titles = [
            fit("Goods", GOODS_WIDTH),
            fit_right("Produced", AMOUNT_WIDTH),
            fit_right("Consumed", AMOUNT_WIDTH),
            fit_right("Net", AMOUNT_WIDTH),
        ];
        ui.line(Line::styled(join(&titles), theme.heading));
    }

    fn build_content(&self, ui: &mut RegionUi<'_>, cx: &PageContext<'_, Summary>) {
        let theme = *ui.theme();
        let matching = cx
            .model
            .balances
            .iter()
            .filter(|balance| cx.query.matches(&balance.goods));
        for balance in matching {
            let style = if balance.net() < 0.0 {
                theme.highlight
            } else {
                theme.text
            };
            ui.line(Line::styled(join(&balance_cells(balance)), style));
        }
        if ui.lines().is_empty() {
            ui.line(Line::styled("No goods to show", theme.muted));
        }
    }

    fn build_page_tooltip(&self, ui: &mut RegionUi<'_>, model: &Summary) {
        let theme = *ui.theme();
        let deficits = model
            .balances
            .iter()
            .filter(|balance| balance.net() < 0.0)
            .count();
        ui.line(Line::styled(
            format!("{} goods", model.balances.len()),
            theme.heading,
        ));
        ui.text(format!("  {deficits} in deficit"));
    }
}
