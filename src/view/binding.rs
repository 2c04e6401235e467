//! Typed binding between a page view and the page it shows.

use crate::gui::RegionHandle;
use crate::model::{ContentModel, PageHandle, Subscription};
use std::cell::Ref;
use std::fmt;
use std::marker::PhantomData;
use tracing::trace;

/// A page whose contents hold a model of type `M`, plus the change subscription
/// that keeps the view's regions current.
///
/// Dropping the binding unsubscribes.
pub struct ModelBinding<M: ContentModel> {
    page: PageHandle,
    _subscription: Subscription,
    _model: PhantomData<fn() -> M>,
}

impl<M: ContentModel> ModelBinding<M> {
    /// Bind to `page` if it holds an `M`.
    ///
    /// On success the regions behind `header` and `body` are rebuilt whenever the
    /// page reports a content change. Returns `None` on kind mismatch.
    pub fn bind(page: &PageHandle, header: RegionHandle, body: RegionHandle) -> Option<Self> {
        if !page.holds::<M>() {
            return None;
        }
        let subscription = page.content_changed().subscribe(move |visual_only| {
            trace!(visual_only, "page contents changed");
            header.rebuild();
            body.rebuild();
        });
        Some(Self {
            page: page.clone(),
            _subscription: subscription,
            _model: PhantomData,
        })
    }

    /// The bound page.
    pub fn page(&self) -> &PageHandle {
        &self.page
    }

    /// Borrow the typed model.
    ///
    /// `None` only if the page contents were replaced with another kind since
    /// binding.
    pub fn model(&self) -> Option<Ref<'_, M>> {
        self.page.model::<M>()
    }
}

impl<M: ContentModel> fmt::Debug for ModelBinding<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelBinding")
            .field("page", &self.page)
            .field("kind", &M::KIND)
            .finish()
    }
}
