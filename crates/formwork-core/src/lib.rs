//! # formwork-core — Foundational Types for the Formwork Engine
//!
//! This crate is the leaf of the Formwork workspace. It defines the pure
//! building blocks the render engine is assembled from; it depends on
//! nothing internal.
//!
//! ## Modules
//!
//! - **Path algebra** (`path`): pure functions over slash-delimited schema
//!   paths — normalization, array-index filtering, parent paths, and
//!   human-readable fragment beautification.
//!
//! - **Label derivation** (`label`): turns the four label-specification
//!   shapes a UI schema may carry (absent, boolean, string, object) into a
//!   concrete `LabelObject`.
//!
//! - **UI schema model** (`uischema`): the serde data model for UI schema
//!   trees — controls bound to schema paths, nested layouts, and the
//!   visibility/enablement rules attached to either.
//!
//! - **Errors** (`error`): the top-level `FormworkError` hierarchy.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `formwork-*` crates (this is the leaf of
//!   the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public model types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod label;
pub mod path;
pub mod uischema;

pub use error::FormworkError;
pub use label::{LabelDef, LabelObject, LabelSpec};
pub use uischema::{
    Condition, ControlElement, LayoutElement, Rule, RuleEffect, ScopeRef, UiElement,
};
