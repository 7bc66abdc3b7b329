//! # Service Bundle
//!
//! The typed bundle of collaborators every dispatch and every description
//! construction receives: the dereferenced schema, the shared data
//! instance, the validation engine, the rule tracker, and the change bus.
//! An explicit bundle instead of a keyed service locator — the
//! collaborators are visible in every signature that uses them.
//!
//! Construction dereferences the schema eagerly (synchronously), so no
//! dispatch can ever observe an unresolved `$ref`.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use formwork_schema::{dereference, DerefError, ValidationEngine};

use crate::notify::ChangeBus;
use crate::rule::RuleTracker;

/// Shared collaborator handles for one rendered form.
///
/// Cloning clones the `Rc` handles; all clones observe the same data
/// instance, validation results, rule tracks, and subscriptions.
#[derive(Clone)]
pub struct FormServices {
    schema: Rc<Value>,
    data: Rc<RefCell<Value>>,
    validation: Rc<dyn ValidationEngine>,
    rules: Rc<RuleTracker>,
    bus: Rc<ChangeBus>,
}

impl FormServices {
    /// Build the bundle for one form: dereference `schema`, take
    /// ownership of the initial `data` instance, and wire up a fresh
    /// rule tracker and change bus.
    ///
    /// # Errors
    ///
    /// Returns the [`DerefError`] when the schema's `$ref`s cannot be
    /// resolved; nothing is constructed in that case.
    pub fn new(
        schema: &Value,
        data: Value,
        validation: Rc<dyn ValidationEngine>,
    ) -> Result<Self, DerefError> {
        let schema = Rc::new(dereference(schema)?);
        let data = Rc::new(RefCell::new(data));
        let rules = Rc::new(RuleTracker::new(Rc::clone(&data)));
        Ok(Self {
            schema,
            data,
            validation,
            rules,
            bus: Rc::new(ChangeBus::new()),
        })
    }

    /// The fully dereferenced schema.
    pub fn schema(&self) -> &Rc<Value> {
        &self.schema
    }

    /// The live data instance, shared by every description of this form.
    pub fn data(&self) -> &Rc<RefCell<Value>> {
        &self.data
    }

    /// The validation collaborator.
    pub fn validation(&self) -> &Rc<dyn ValidationEngine> {
        &self.validation
    }

    /// The rule tracker for this form.
    pub fn rules(&self) -> &Rc<RuleTracker> {
        &self.rules
    }

    /// The "model changed" bus for this form.
    pub fn bus(&self) -> &Rc<ChangeBus> {
        &self.bus
    }
}
