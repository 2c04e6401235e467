//! pageview
//!
//! Scrollable page views for terminal UIs: a header pinned above a scrollable
//! body, bound to one page of a project, with deferred scroll requests and a
//! full-page text export.
//!
//! The library is layered the way it is drawn:
//! - [`model`]: pages, typed contents and change notification.
//! - [`gui`]: immediate-mode drawing context, regions and scroll containers.
//! - [`view`]: the generic page view and its object-safe interface.
//! - [`pages`]: concrete views for the built-in content kinds.
//! - [`state`] and [`app`]: the terminal host (pure state, impure shell).

pub mod app;
pub mod config;
pub mod gui;
pub mod logging;
pub mod model;
pub mod pages;
pub mod state;
pub mod view;

#[cfg(test)]
mod tests;
