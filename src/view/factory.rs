//! Page view constructors keyed by content kind.

use super::page_view::{PageView, PageViewContent, PageViewOptions};
use super::ProjectPageView;
use crate::gui::Theme;
use crate::model::{ContentKind, ContentModel};
use crate::pages::{ProductionTableView, SummaryView};
use std::collections::BTreeMap;

/// Creates a boxed page view.
pub type ViewConstructor = fn(Theme, PageViewOptions) -> Box<dyn ProjectPageView>;

fn construct<V: PageViewContent>(theme: Theme, options: PageViewOptions) -> Box<dyn ProjectPageView> {
    Box::new(PageView::<V>::with_options(theme, options))
}

/// Lookup table from content kind to page view constructor.
#[derive(Debug, Clone, Default)]
pub struct ViewFactory {
    constructors: BTreeMap<ContentKind, ViewConstructor>,
}

impl ViewFactory {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with a view for every built-in content kind.
    pub fn with_builtin_views() -> Self {
        let mut factory = Self::new();
        factory.register_view::<ProductionTableView>();
        factory.register_view::<SummaryView>();
        factory
    }

    /// Register `constructor` for `kind`, replacing any previous one.
    pub fn register(&mut self, kind: ContentKind, constructor: ViewConstructor) {
        self.constructors.insert(kind, constructor);
    }

    /// Register the page view for `V`'s model kind.
    pub fn register_view<V: PageViewContent>(&mut self) {
        self.register(<V::Model as ContentModel>::KIND, construct::<V>);
    }

    /// Kinds with a registered view.
    pub fn kinds(&self) -> impl Iterator<Item = ContentKind> + '_ {
        self.constructors.keys().copied()
    }

    /// Create a view for `kind`.
    pub fn create(
        &self,
        kind: ContentKind,
        theme: Theme,
        options: PageViewOptions,
    ) -> Option<Box<dyn ProjectPageView>> {
        self.constructors
            .get(&kind)
            .map(|constructor| constructor(theme, options))
    }
}
