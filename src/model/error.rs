//! Error types for pageview.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all domain-specific failures
//!   - [`crate::config::ConfigError`] - Config file read/parse failures
//!   - [`crate::logging::LoggingError`] - Tracing subscriber setup failures
//!   - [`ExportError`] - Writing a full-page screenshot to disk failed
//!   - `std::io::Error` - Terminal/TUI rendering failures
//!
//! [`ModelError`] is not part of the hierarchy: it is passive UI state attached to a
//! page and shown as a dismissible banner in the page header. It never propagates.
//!
//! # Recovery Strategy
//!
//! - A page whose contents do not match the view's model type is tolerated: the
//!   body stays empty. No error value is produced for it.
//! - A page-reported [`ModelError`] stays visible until the user dismisses it.
//! - Config, logging and terminal errors are fatal at startup.
//! - Export errors are reported in the status bar and the application continues.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// All domain-specific error types convert to `AppError` via `From`
/// implementations, enabling clean error propagation with the `?` operator.
///
/// # Examples
///
/// ```
/// use pageview::model::error::{AppError, ExportError};
///
/// fn export() -> Result<(), AppError> {
///     let outcome: Result<(), ExportError> = Err(ExportError::EmptyPage);
///     outcome?;
///     Ok(())
/// }
/// assert!(matches!(export(), Err(AppError::Export(_))));
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// A screenshot could not be exported.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Terminal or TUI rendering error.
    ///
    /// Failures in the crossterm/ratatui layer such as resize failures or broken
    /// pipes. Fatal: without a working terminal, the TUI cannot function.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered while writing a full-page screenshot to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The page has no rendered content to export.
    ///
    /// Occurs when the full page measures zero cells in either dimension, for
    /// example when no page is bound and the header carries no error row.
    #[error("Nothing to export: the page has no rendered content")]
    EmptyPage,

    /// The screenshot directory could not be created.
    #[error("Failed to create screenshot directory {path:?}: {source}")]
    DirectoryCreation {
        /// Directory that failed to be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the screenshot file failed.
    #[error("Failed to write screenshot {path:?}: {source}")]
    Write {
        /// Target file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// An error reported by a page's content model.
///
/// Shown as a banner at the top of the page header until the user dismisses it.
/// Dismissing clears the error on the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The model could not be solved or recalculated.
    #[error("Calculation failed: {0}")]
    Calculation(String),

    /// The model references something that no longer exists.
    #[error("Missing reference: {0}")]
    MissingReference(String),

    /// A free-form error message.
    #[error("{0}")]
    Message(String),
}
