//! Internal test modules - whitebox tests with crate access
//!
//! These tests drive page views, panes and the workspace together through
//! crate-internal types.

// Scenario tests across attach, detach and re-attach
mod acceptance_scroll;
