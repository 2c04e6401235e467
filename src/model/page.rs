//! Project pages and shared page handles.

use super::contents::{ContentKind, ContentModel, PageContents};
use super::error::ModelError;
use super::notifier::ChangeNotifier;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// One page of a project.
///
/// Besides its contents, a page remembers the vertical scroll offset its view had
/// when the page was last detached, so reopening the page restores it.
#[derive(Debug)]
pub struct ProjectPage {
    name: String,
    contents: PageContents,
    model_error: Option<ModelError>,
    saved_scroll: u16,
    content_changed: ChangeNotifier,
}

impl ProjectPage {
    /// Page name shown in the page list.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Page contents.
    pub fn contents(&self) -> &PageContents {
        &self.contents
    }

    /// Error currently reported by the page model, if any.
    pub fn model_error(&self) -> Option<&ModelError> {
        self.model_error.as_ref()
    }

    /// Vertical scroll offset saved when the page was last detached.
    pub fn saved_scroll(&self) -> u16 {
        self.saved_scroll
    }
}

/// Shared handle to a [`ProjectPage`].
///
/// Cloning the handle shares the page. Two handles refer to the same page when
/// [`PageHandle::same_page`] returns true.
#[derive(Clone)]
pub struct PageHandle(Rc<RefCell<ProjectPage>>);

impl PageHandle {
    /// Create a page.
    pub fn new(name: impl Into<String>, contents: PageContents) -> Self {
        Self(Rc::new(RefCell::new(ProjectPage {
            name: name.into(),
            contents,
            model_error: None,
            saved_scroll: 0,
            content_changed: ChangeNotifier::new(),
        })))
    }

    /// Borrow the page.
    ///
    /// # Panics
    /// Panics if the page is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, ProjectPage> {
        self.0.borrow()
    }

    /// Page name.
    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    /// Kind of the page contents.
    pub fn kind(&self) -> ContentKind {
        self.0.borrow().contents.kind()
    }

    /// Whether the page contents are of model type `M`.
    pub fn holds<M: ContentModel>(&self) -> bool {
        M::extract(&self.0.borrow().contents).is_some()
    }

    /// Borrow the typed model, or `None` on kind mismatch.
    pub fn model<M: ContentModel>(&self) -> Option<Ref<'_, M>> {
        Ref::filter_map(self.0.borrow(), |page| M::extract(&page.contents)).ok()
    }

    /// Edit the typed model in place and notify subscribers of a content change.
    ///
    /// Returns `None` without notifying when the page holds another kind.
    pub fn update<M: ContentModel, R>(&self, edit: impl FnOnce(&mut M) -> R) -> Option<R> {
        let (result, notifier) = {
            let mut page = self.0.borrow_mut();
            let model = M::extract_mut(&mut page.contents)?;
            (edit(model), page.content_changed.clone())
        };
        notifier.notify(false);
        Some(result)
    }

    /// Replace the page contents entirely and notify subscribers.
    pub fn replace_contents(&self, contents: PageContents) {
        let notifier = {
            let mut page = self.0.borrow_mut();
            page.contents = contents;
            page.content_changed.clone()
        };
        notifier.notify(false);
    }

    /// Error reported by the page model.
    pub fn model_error(&self) -> Option<ModelError> {
        self.0.borrow().model_error.clone()
    }

    /// Report a model error. Subscribers get a visual-only change notification.
    pub fn set_model_error(&self, error: ModelError) {
        let notifier = {
            let mut page = self.0.borrow_mut();
            page.model_error = Some(error);
            page.content_changed.clone()
        };
        notifier.notify(true);
    }

    /// Clear the model error without notifying. Used by the view that displays it.
    pub fn take_model_error(&self) -> Option<ModelError> {
        self.0.borrow_mut().model_error.take()
    }

    /// Saved vertical scroll offset.
    pub fn saved_scroll(&self) -> u16 {
        self.0.borrow().saved_scroll
    }

    /// Persist a vertical scroll offset on the page.
    pub fn set_saved_scroll(&self, offset: u16) {
        self.0.borrow_mut().saved_scroll = offset;
    }

    /// The page's content-change notifier.
    pub fn content_changed(&self) -> ChangeNotifier {
        self.0.borrow().content_changed.clone()
    }

    /// Whether both handles refer to the same page.
    pub fn same_page(&self, other: &PageHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for PageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(page) => f
                .debug_struct("PageHandle")
                .field("name", &page.name)
                .field("kind", &page.contents.kind())
                .field("saved_scroll", &page.saved_scroll)
                .finish(),
            Err(_) => f.write_str("PageHandle(<borrowed>)"),
        }
    }
}
