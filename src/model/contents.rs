//! Page contents and typed model extraction.
//!
//! A page holds exactly one [`PageContents`] variant. Views are generic over a
//! [`ContentModel`] and pull their model out of a page with
//! [`ContentModel::extract`], which returns `None` when the page holds a different
//! kind of content.

use std::fmt;

/// Tag identifying a kind of page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentKind {
    /// A production table: recipe rows.
    ProductionTable,
    /// A summary of goods balances.
    Summary,
}

impl ContentKind {
    /// All kinds, in display order.
    pub const ALL: [ContentKind; 2] = [ContentKind::ProductionTable, ContentKind::Summary];

    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ContentKind::ProductionTable => "Production table",
            ContentKind::Summary => "Summary",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The contents of one project page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageContents {
    /// Recipe rows.
    ProductionTable(ProductionTable),
    /// Goods balances.
    Summary(Summary),
}

impl PageContents {
    /// Kind tag of these contents.
    pub fn kind(&self) -> ContentKind {
        match self {
            PageContents::ProductionTable(_) => ContentKind::ProductionTable,
            PageContents::Summary(_) => ContentKind::Summary,
        }
    }
}

/// A strongly typed content model a view can bind to.
pub trait ContentModel: fmt::Debug + 'static {
    /// Kind tag this model corresponds to.
    const KIND: ContentKind;

    /// Borrow the model out of `contents`, or `None` if the contents hold another kind.
    fn extract(contents: &PageContents) -> Option<&Self>;

    /// Mutable variant of [`ContentModel::extract`].
    fn extract_mut(contents: &mut PageContents) -> Option<&mut Self>;
}

// ===== ProductionTable =====

/// One recipe row of a production table.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeRow {
    /// Recipe name.
    pub recipe: String,
    /// Building that runs the recipe.
    pub building: String,
    /// Number of buildings required.
    pub buildings: f64,
    /// Main product of the recipe.
    pub product: String,
    /// Product rate per minute.
    pub rate: f64,
}

impl RecipeRow {
    /// Create a row.
    pub fn new(
        recipe: impl Into<String>,
        building: impl Into<String>,
        buildings: f64,
        product: impl Into<String>,
        rate: f64,
    ) -> Self {
        Self {
            recipe: recipe.into(),
            building: building.into(),
            buildings,
            product: product.into(),
            rate,
        }
    }
}

/// Recipe rows of a production page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductionTable {
    /// Rows in display order.
    pub rows: Vec<RecipeRow>,
}

impl ProductionTable {
    /// Create a table from rows.
    pub fn new(rows: Vec<RecipeRow>) -> Self {
        Self { rows }
    }
}

impl ContentModel for ProductionTable {
    const KIND: ContentKind = ContentKind::ProductionTable;

    fn extract(contents: &PageContents) -> Option<&Self> {
        match contents {
            PageContents::ProductionTable(table) => Some(table),
            _ => None,
        }
    }

    fn extract_mut(contents: &mut PageContents) -> Option<&mut Self> {
        match contents {
            PageContents::ProductionTable(table) => Some(table),
            _ => None,
        }
    }
}

// ===== Summary =====

/// Balance of one goods item.
#[derive(Debug, Clone, PartialEq)]
pub struct GoodsBalance {
    /// Goods name.
    pub goods: String,
    /// Produced per minute.
    pub produced: f64,
    /// Consumed per minute.
    pub consumed: f64,
}

impl GoodsBalance {
    /// Create a balance entry.
    pub fn new(goods: impl Into<String>, produced: f64, consumed: f64) -> Self {
        Self {
            goods: goods.into(),
            produced,
            consumed,
        }
    }

    /// Produced minus consumed.
    pub fn net(&self) -> f64 {
        self.produced - self.consumed
    }
}

/// Goods balances across the project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// Balances in display order.
    pub balances: Vec<GoodsBalance>,
}

impl Summary {
    /// Create a summary.
    pub fn new(balances: Vec<GoodsBalance>) -> Self {
        Self { balances }
    }
}

impl ContentModel for Summary {
    const KIND: ContentKind = ContentKind::Summary;

    fn extract(contents: &PageContents) -> Option<&Self> {
        match contents {
            PageContents::Summary(summary) => Some(summary),
            _ => None,
        }
    }

    fn extract_mut(contents: &mut PageContents) -> Option<&mut Self> {
        match contents {
            PageContents::Summary(summary) => Some(summary),
            _ => None,
        }
    }
}
