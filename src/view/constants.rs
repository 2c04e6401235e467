//! Layout dimension constants for page views.
//!
//! Centralized location for the numeric values shared by the page view, the
//! screenshot export and the host layout.

/// Default width of the vertical scrollbar in columns.
///
/// Header and body are measured at the visible width minus this value, so their
/// content never runs under the scrollbar.
pub const DEFAULT_SCROLLBAR_WIDTH: u16 = 1;

/// Width used to lay out a region that was never laid out before.
///
/// Only reached when a screenshot is exported before the first frame.
pub const FALLBACK_LAYOUT_WIDTH: u16 = 80;

/// Maximum nesting of same-frame rebuilds triggered by a scroll request.
pub const MAX_REENTRY_DEPTH: u8 = 1;

/// Width of page tooltips and model dropdowns.
pub const TOOLTIP_WIDTH: u16 = 40;

/// Width of the page list sidebar.
pub const PAGE_LIST_WIDTH: u16 = 24;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the search input line.
pub const SEARCH_INPUT_HEIGHT: u16 = 1;
