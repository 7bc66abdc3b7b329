//! # formwork-schema — Schema Services for the Formwork Engine
//!
//! Everything the render engine needs from the schema side, behind small
//! synchronous contracts:
//!
//! - **Dereferencing** (`deref`): resolves every internal `#/...` `$ref`
//!   in a schema into a concrete tree, eagerly and synchronously, with
//!   cycle detection. Path lookups are only meaningful against the
//!   dereferenced tree, so this runs once before any dispatch.
//!
//! - **Path resolution** (`resolve`): walks a (dereferenced) schema tree
//!   or a data instance along a slash-delimited path. A miss is `None`,
//!   never an error — dependents consume it defensively.
//!
//! - **Validation** (`validate`): the [`ValidationEngine`] contract the
//!   render engine consumes, plus [`JsonSchemaEngine`], a default
//!   implementation backed by the `jsonschema` crate (Draft 2020-12).
//!
//! - **Loading** (`load`): reads schema / UI schema documents from
//!   `.json`, `.yaml`, or `.yml` files.
//!
//! ## Crate Policy
//!
//! - Depends only on `formwork-core` internally.
//! - The validation engine is a trust boundary: results are keyed by
//!   instance path and absence of a result means "no error", never
//!   "not checked".

pub mod deref;
pub mod load;
pub mod resolve;
pub mod validate;

pub use deref::{dereference, DerefError};
pub use load::{load_value, LoadError};
pub use resolve::{resolve_instance, resolve_schema};
pub use validate::{JsonSchemaEngine, ValidationEngine};
