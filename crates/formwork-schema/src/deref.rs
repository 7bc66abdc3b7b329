//! # Schema `$ref` Dereferencing
//!
//! Resolves every internal `#/...` `$ref` in a schema into a concrete
//! tree. The engine's path resolution walks plain object trees, so
//! references must be expanded before any dispatch happens.
//!
//! ## Synchrony
//!
//! Dereferencing is synchronous and eager by contract: the service
//! bundle calls [`dereference`] once at construction, before the first
//! render. There is no callback and no window in which dispatch could
//! observe an unresolved schema.
//!
//! ## Resolution Policy
//!
//! Only local references (`#/...` JSON pointers into the same document)
//! are resolved. Anything else — remote URIs, relative file references —
//! is rejected with [`DerefError::UnsupportedReference`] rather than
//! fetched; the engine never performs network or filesystem access during
//! dereferencing.

use serde_json::{Map, Value};
use thiserror::Error;

use formwork_core::FormworkError;

/// Error during schema dereferencing. Fatal at service construction.
#[derive(Error, Debug)]
pub enum DerefError {
    /// A `$ref` chain loops back onto itself.
    #[error("circular $ref chain through '#{pointer}'")]
    CircularReference {
        /// JSON pointer at which the cycle was detected.
        pointer: String,
    },

    /// A `$ref` points outside the document.
    #[error("unsupported non-local $ref '{reference}'; only '#/...' references are resolved")]
    UnsupportedReference {
        /// The reference string as written in the schema.
        reference: String,
    },

    /// A `$ref` points at a location that does not exist.
    #[error("dangling $ref '#{pointer}': no such location in the schema")]
    DanglingReference {
        /// JSON pointer that failed to resolve.
        pointer: String,
    },
}

impl From<DerefError> for FormworkError {
    fn from(err: DerefError) -> Self {
        FormworkError::Dereference(err.to_string())
    }
}

/// Resolve every internal `$ref` in `schema`, returning a fully concrete
/// tree. The input is not modified.
///
/// # Errors
///
/// Returns [`DerefError::CircularReference`] for reference cycles,
/// [`DerefError::UnsupportedReference`] for non-local references, and
/// [`DerefError::DanglingReference`] for pointers with no target.
pub fn dereference(schema: &Value) -> Result<Value, DerefError> {
    let mut in_flight = Vec::new();
    resolve_node(schema, schema, &mut in_flight)
}

fn resolve_node(
    root: &Value,
    node: &Value,
    in_flight: &mut Vec<String>,
) -> Result<Value, DerefError> {
    match node {
        Value::Object(map) => {
            if let Some(reference) = map.get("$ref").and_then(Value::as_str) {
                return resolve_reference(root, reference, in_flight);
            }
            let mut out = Map::with_capacity(map.len());
            for (key, value) in map {
                out.insert(key.clone(), resolve_node(root, value, in_flight)?);
            }
            Ok(Value::Object(out))
        }
        Value::Array(items) => {
            let resolved: Result<Vec<_>, _> = items
                .iter()
                .map(|item| resolve_node(root, item, in_flight))
                .collect();
            Ok(Value::Array(resolved?))
        }
        other => Ok(other.clone()),
    }
}

fn resolve_reference(
    root: &Value,
    reference: &str,
    in_flight: &mut Vec<String>,
) -> Result<Value, DerefError> {
    let Some(pointer) = reference.strip_prefix('#') else {
        return Err(DerefError::UnsupportedReference {
            reference: reference.to_string(),
        });
    };
    if in_flight.iter().any(|seen| seen == pointer) {
        return Err(DerefError::CircularReference {
            pointer: pointer.to_string(),
        });
    }
    let target = root
        .pointer(pointer)
        .ok_or_else(|| DerefError::DanglingReference {
            pointer: pointer.to_string(),
        })?;
    in_flight.push(pointer.to_string());
    let resolved = resolve_node(root, target, in_flight);
    in_flight.pop();
    resolved
}
