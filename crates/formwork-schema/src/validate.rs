//! # Validation Contract & Default Engine
//!
//! The render engine never checks constraints itself; it consumes the
//! [`ValidationEngine`] contract: `validate` re-checks the whole instance
//! against the schema, `result_for` reads back the message for one
//! instance path. Absence of a result means "no error for this field".
//!
//! [`JsonSchemaEngine`] is the default implementation, backed by the
//! `jsonschema` crate (Draft 2020-12). It compiles the schema into a
//! `Validator` and caches the compilation until the schema value changes,
//! because the engine re-validates the entire instance after every single
//! edit.
//!
//! A schema that fails to compile degrades rather than aborts: the result
//! map is cleared and a warning is logged. Edit cycles keep running; they
//! simply see no validation results.

use std::cell::RefCell;
use std::collections::HashMap;

use jsonschema::Validator;
use serde_json::Value;
use tracing::{debug, warn};

/// Contract between the render engine and a validation collaborator.
///
/// Implementations use interior mutability: `validate` is called from
/// every live control's change handler, through shared `Rc` handles.
pub trait ValidationEngine {
    /// Re-check the whole `instance` against `schema`, replacing all
    /// stored per-path results.
    fn validate(&self, instance: &Value, schema: &Value);

    /// The stored message for `path` (a `/`-prefixed instance path, e.g.
    /// `/age`), or `None` when the last `validate` pass found no
    /// violation there.
    fn result_for(&self, instance: &Value, path: &str) -> Option<String>;
}

/// Default [`ValidationEngine`] backed by the `jsonschema` crate.
#[derive(Default)]
pub struct JsonSchemaEngine {
    /// Compiled validator, cached together with the schema it was built
    /// from; rebuilt only when the schema value changes.
    compiled: RefCell<Option<(Value, Validator)>>,
    /// First violation message per instance path from the last pass.
    results: RefCell<HashMap<String, String>>,
}

impl JsonSchemaEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of paths with violations after the last `validate` pass.
    pub fn violation_count(&self) -> usize {
        self.results.borrow().len()
    }
}

impl ValidationEngine for JsonSchemaEngine {
    fn validate(&self, instance: &Value, schema: &Value) {
        let mut compiled = self.compiled.borrow_mut();
        let needs_build = match compiled.as_ref() {
            Some((cached_schema, _)) => cached_schema != schema,
            None => true,
        };
        if needs_build {
            match jsonschema::options()
                .with_draft(jsonschema::Draft::Draft202012)
                .build(schema)
            {
                Ok(validator) => *compiled = Some((schema.clone(), validator)),
                Err(err) => {
                    warn!(error = %err, "schema failed to compile; clearing validation results");
                    *compiled = None;
                    self.results.borrow_mut().clear();
                    return;
                }
            }
        }
        let Some((_, validator)) = compiled.as_ref() else {
            return;
        };

        let mut results: HashMap<String, String> = HashMap::new();
        for error in validator.iter_errors(instance) {
            let path = error.instance_path.to_string();
            // Keep the first message per path; a field reports at most
            // one alert.
            results.entry(path).or_insert_with(|| error.to_string());
        }
        debug!(violations = results.len(), "validation pass complete");
        *self.results.borrow_mut() = results;
    }

    fn result_for(&self, _instance: &Value, path: &str) -> Option<String> {
        self.results.borrow().get(path).cloned()
    }
}
