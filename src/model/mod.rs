//! Domain model types.
//!
//! Pages, their typed contents and the change notification that connects a page
//! to the views showing it.

pub mod contents;
pub mod error;
pub mod key_action;
pub mod notifier;
pub mod page;
pub mod project;
pub mod search;

// Re-export for convenience
pub use contents::{
    ContentKind, ContentModel, GoodsBalance, PageContents, ProductionTable, RecipeRow, Summary,
};
pub use error::{AppError, ExportError, ModelError};
pub use key_action::KeyAction;
pub use notifier::{ChangeNotifier, Subscription};
pub use page::{PageHandle, ProjectPage};
pub use project::Project;
pub use search::SearchQuery;
