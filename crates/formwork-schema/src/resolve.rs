//! # Path Resolution
//!
//! Walks slash-delimited paths against two different trees:
//!
//! - [`resolve_schema`] walks a *dereferenced schema* along an
//!   index-filtered path. A fragment resolves by direct key, through the
//!   `properties` map, or through `items` for array element paths.
//! - [`resolve_instance`] walks a *data instance* along a normalized
//!   instance path; numeric fragments index into arrays.
//!
//! A miss is `None`, never an error: a schema path that resolves to
//! nothing is a data-level condition that dependents handle defensively
//! (e.g. required-field lookup treats it as "not required").

use serde_json::Value;

/// Resolve a sub-schema by walking `schema` along `path`.
///
/// `path` is expected in index-filtered form (see
/// `formwork_core::path::filter_indexes`); the `#` marker and empty
/// fragments are skipped. Returns `None` when any fragment fails to
/// resolve.
pub fn resolve_schema<'a>(schema: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = schema;
    for fragment in fragments(path) {
        current = step(current, fragment)?;
    }
    Some(current)
}

/// Resolve a value inside a data instance by walking `data` along a
/// normalized instance path. Numeric fragments index arrays.
pub fn resolve_instance<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = data;
    for fragment in fragments(path) {
        current = match current {
            Value::Array(items) => items.get(fragment.parse::<usize>().ok()?)?,
            other => other.get(fragment)?,
        };
    }
    Some(current)
}

fn fragments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/')
        .filter(|fragment| !fragment.is_empty() && *fragment != "#")
}

/// Resolve one fragment against a schema node: direct key first, then
/// through `properties`, then through `items` (array element paths have
/// their indexes filtered away, so the fragment addresses the item
/// schema).
fn step<'a>(node: &'a Value, fragment: &str) -> Option<&'a Value> {
    if let Some(child) = node.get(fragment) {
        return Some(child);
    }
    if let Some(child) = node.get("properties").and_then(|props| props.get(fragment)) {
        return Some(child);
    }
    node.get("items").and_then(|items| step(items, fragment))
}
