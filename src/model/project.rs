//! Built-in sample project.
//!
//! The viewer ships with a small factory plan so it can be explored without any
//! project files. Each page gets its own content kind; the "Circuits" page
//! starts with a model error so the dismissible banner is visible.

use super::contents::{
    GoodsBalance, PageContents, ProductionTable, RecipeRow, Summary,
};
use super::error::ModelError;
use super::page::PageHandle;

/// An ordered list of pages.
#[derive(Debug, Clone, Default)]
pub struct Project {
    pages: Vec<PageHandle>,
}

impl Project {
    /// Create a project from pages.
    pub fn new(pages: Vec<PageHandle>) -> Self {
        Self { pages }
    }

    /// All pages in display order.
    pub fn pages(&self) -> &[PageHandle] {
        &self.pages
    }

    /// Page at `index`.
    pub fn page(&self, index: usize) -> Option<&PageHandle> {
        self.pages.get(index)
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the project has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// The built-in sample project.
    pub fn sample() -> Self {
        let smelting = PageHandle::new(
            "Smelting",
            PageContents::ProductionTable(ProductionTable::new(smelting_rows())),
        );
        let circuits = PageHandle::new(
            "Circuits",
            PageContents::ProductionTable(ProductionTable::new(circuit_rows())),
        );
        circuits.set_model_error(ModelError::Calculation(
            "copper-cable demand exceeds supply".to_string(),
        ));
        let summary = PageHandle::new("Summary", PageContents::Summary(sample_summary()));

        Self::new(vec![smelting, circuits, summary])
    }
}

fn smelting_rows() -> Vec<RecipeRow> {
    let ores = ["iron", "copper", "stone", "steel"];
    (0..48)
        .map(|i| {
            let ore = ores[i % ores.len()];
            let tier = i / ores.len() + 1;
            RecipeRow::new(
                format!("{ore}-plate-{tier}"),
                if tier > 6 { "electric-furnace" } else { "steel-furnace" },
                (tier as f64) * 1.5,
                format!("{ore}-plate"),
                37.5 * tier as f64,
            )
        })
        .collect()
}

fn circuit_rows() -> Vec<RecipeRow> {
    vec![
        RecipeRow::new("copper-cable", "assembling-machine-2", 6.0, "copper-cable", 240.0),
        RecipeRow::new(
            "electronic-circuit",
            "assembling-machine-2",
            8.0,
            "electronic-circuit",
            120.0,
        ),
        RecipeRow::new(
            "advanced-circuit",
            "assembling-machine-3",
            12.0,
            "advanced-circuit",
            20.0,
        ),
        RecipeRow::new("plastic-bar", "chemical-plant", 2.0, "plastic-bar", 40.0),
    ]
}

fn sample_summary() -> Summary {
    Summary::new(vec![
        GoodsBalance::new("iron-plate", 450.0, 420.0),
        GoodsBalance::new("copper-plate", 300.0, 360.0),
        GoodsBalance::new("steel-plate", 22.5, 20.0),
        GoodsBalance::new("electronic-circuit", 120.0, 120.0),
        GoodsBalance::new("advanced-circuit", 20.0, 15.0),
    ])
}
