//! # Error Types — Shared Error Hierarchy
//!
//! Top-level error type for the Formwork engine. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Structural/configuration failures (no renderer found, a broken
//!   `$ref` chain) abort the operation that hit them and carry enough
//!   context to diagnose it — the offending element is serialized into
//!   the message.
//! - Data-level conditions (a schema path that resolves to nothing, a
//!   missing validation result) are NOT errors; they degrade to `None`
//!   at their call sites and never appear here.
//!
//! The downstream crates define their own precise error enums
//! (`DerefError`, `LoadError`, `RenderError`) and provide `From`
//! conversions into this aggregate for callers that want a single error
//! type across the whole engine.

use thiserror::Error;

/// Top-level error type for the Formwork engine.
#[derive(Error, Debug)]
pub enum FormworkError {
    /// No registered renderer claimed a UI element. The message carries
    /// the JSON-serialized element.
    #[error("no applicable renderer found for element: {element}")]
    NoApplicableRenderer {
        /// JSON serialization of the offending UI element.
        element: String,
    },

    /// Schema `$ref` dereferencing failed.
    #[error("schema dereference error: {0}")]
    Dereference(String),

    /// A renderer failed while building its description.
    #[error("render error: {0}")]
    Render(String),

    /// A schema or UI schema document could not be loaded from disk.
    #[error("document load error: {0}")]
    DocumentLoad(String),
}
