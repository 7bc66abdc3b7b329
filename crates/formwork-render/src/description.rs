//! # Render Descriptions
//!
//! The output of a dispatch: an immutable-after-construction snapshot of
//! everything a concrete widget needs to draw itself. Two variants —
//! controls (one widget, one schema path) and containers (pre-rendered
//! children plus a template identifier).
//!
//! ## Construction Protocol
//!
//! Construction has side effects by contract. A control description
//! captures the shared data instance, the dereferenced schema, and the
//! collaborator handles; registers itself with the rule tracker; and
//! subscribes to "model changed" notifications. From then on every
//! broadcast drives the cycle
//!
//! ```text
//! on_model_changed() → validate() → reevaluate_rules(own path)
//! ```
//!
//! `validate()` never re-broadcasts — only an explicit `model_changed()`
//! call (an actual user edit) does, so the cycle cannot recurse.
//!
//! Containers register with the rule tracker like controls but hold no
//! validation subscription; they are not directly validated.

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use tracing::debug;

use formwork_core::label::{LabelObject, LabelSpec};
use formwork_core::path;
use formwork_core::uischema::{ControlElement, Rule, UiElement};
use formwork_schema::{resolve_schema, ValidationEngine};

use crate::notify::{ChangeBus, ModelObserver};
use crate::rule::{RuleState, RuleTarget, RuleTracker};
use crate::services::FormServices;

/// Default column span of a control in the 100-based grid of the UI
/// schema dialect.
const DEFAULT_CONTROL_SIZE: u32 = 100;

/// Severity of a validation alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    /// A constraint violation; the only severity current validation
    /// produces.
    Danger,
}

/// One validation message attached to a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub message: String,
}

/// The result of one dispatch call.
#[derive(Clone)]
pub enum RenderDescription {
    Control(Rc<ControlDescription>),
    Container(Rc<ContainerDescription>),
}

impl fmt::Debug for RenderDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderDescription::Control(control) => f
                .debug_struct("Control")
                .field("path", &control.path())
                .field("label", &control.label())
                .finish_non_exhaustive(),
            RenderDescription::Container(container) => f
                .debug_struct("Container")
                .field("path", &container.path())
                .field("template", &container.template())
                .finish_non_exhaustive(),
        }
    }
}

impl RenderDescription {
    /// Normalized instance path of the described element.
    pub fn path(&self) -> &str {
        match self {
            RenderDescription::Control(control) => control.path(),
            RenderDescription::Container(container) => container.path(),
        }
    }

    pub fn as_control(&self) -> Option<&Rc<ControlDescription>> {
        match self {
            RenderDescription::Control(control) => Some(control),
            RenderDescription::Container(_) => None,
        }
    }

    pub fn as_container(&self) -> Option<&Rc<ContainerDescription>> {
        match self {
            RenderDescription::Container(container) => Some(container),
            RenderDescription::Control(_) => None,
        }
    }
}

/// Whether the field addressed by `schema_path` is listed in the
/// `required` array of its enclosing object schema.
///
/// The parent of `#/properties/age` is the `properties` map, but the
/// `required` array lives on the *object* schema one level above it, so
/// a trailing `properties` fragment is skipped before the lookup. A path
/// that resolves to nothing, or to anything but an array, means "not
/// required".
pub fn is_required(schema: &Value, schema_path: &str) -> bool {
    let mut parent = path::inits(schema_path);
    if path::last_fragment(&parent) == "properties" {
        parent = path::inits(&parent);
    }
    let required_path = format!("{parent}/required");
    match resolve_schema(schema, &required_path) {
        Some(Value::Array(names)) => {
            let field = path::last_fragment(schema_path);
            names.iter().any(|name| name.as_str() == Some(field))
        }
        _ => false,
    }
}

/// Snapshot a control widget consumes: data reference, normalized path,
/// label, read-only flag, rule, and the alerts of the last validation
/// pass.
pub struct ControlDescription {
    path: String,
    label: String,
    read_only: bool,
    size: u32,
    rule: Option<Rule>,
    instance: Rc<RefCell<Value>>,
    schema: Rc<Value>,
    validation: Rc<dyn ValidationEngine>,
    rules: Rc<RuleTracker>,
    bus: Rc<ChangeBus>,
    alerts: RefCell<Vec<Alert>>,
    state: Cell<RuleState>,
}

impl ControlDescription {
    /// Build the description for one control and wire it into the form:
    /// registers with the rule tracker and subscribes to "model changed".
    ///
    /// `scope` is the control's raw scope pointer. Array indexes stay in
    /// the instance path (they address the data tree); they are stripped
    /// only for the schema-side lookups behind the label.
    pub fn create(scope: &str, services: &FormServices, element: &ControlElement) -> Rc<Self> {
        let normalized = path::normalize(scope);
        let schema_path = path::filter_indexes(scope);
        let label = build_label(&schema_path, element.label.as_ref(), services.schema());
        debug!(path = %normalized, %label, "control description created");

        let description = Rc::new(Self {
            path: normalized,
            label,
            read_only: element.read_only,
            size: DEFAULT_CONTROL_SIZE,
            rule: element.rule.clone(),
            instance: Rc::clone(services.data()),
            schema: Rc::clone(services.schema()),
            validation: Rc::clone(services.validation()),
            rules: Rc::clone(services.rules()),
            bus: Rc::clone(services.bus()),
            alerts: RefCell::new(Vec::new()),
            state: Cell::new(RuleState::default()),
        });

        let target = Rc::downgrade(&description);
        services.rules().add_rule_track(target, description.rule.as_ref());
        let observer = Rc::downgrade(&description);
        services.bus().subscribe(observer);

        description
    }

    /// Normalized instance path this control is bound to.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Display label, with a `"*"` suffix when the field is required.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn rule(&self) -> Option<&Rule> {
        self.rule.as_ref()
    }

    /// The shared data instance this control reads and writes.
    pub fn instance(&self) -> &Rc<RefCell<Value>> {
        &self.instance
    }

    /// Alerts from the last validation pass; at most one entry.
    pub fn alerts(&self) -> Ref<'_, Vec<Alert>> {
        self.alerts.borrow()
    }

    pub fn is_visible(&self) -> bool {
        self.state.get().visible
    }

    pub fn is_enabled(&self) -> bool {
        self.state.get().enabled
    }

    /// Announce an edit. A concrete widget calls this after it mutated
    /// the data instance; the broadcast fans out to every live control
    /// of the form, this one included.
    pub fn model_changed(&self) {
        self.bus.broadcast();
    }

    /// Re-check the whole instance and replace this control's alerts
    /// wholesale: one danger alert when the engine reports a message for
    /// this control's path, none otherwise.
    pub fn validate(&self) {
        let result = {
            let instance = self.instance.borrow();
            self.validation.validate(&instance, &self.schema);
            self.validation
                .result_for(&instance, &format!("/{}", self.path))
        };
        let mut alerts = self.alerts.borrow_mut();
        alerts.clear();
        if let Some(message) = result {
            alerts.push(Alert {
                severity: AlertSeverity::Danger,
                message,
            });
        }
    }
}

impl ModelObserver for ControlDescription {
    fn on_model_changed(&self) {
        self.validate();
        self.rules.reevaluate_rules(&self.path);
    }
}

impl RuleTarget for ControlDescription {
    fn rule_state(&self) -> RuleState {
        self.state.get()
    }
    fn apply_rule_state(&self, state: RuleState) {
        self.state.set(state);
    }
}

fn build_label(schema_path: &str, spec: Option<&LabelSpec>, schema: &Value) -> String {
    let label_object = LabelObject::derive(spec, schema_path);
    let mut label = String::new();
    if label_object.show {
        if let Some(text) = label_object.text {
            label.push_str(&text);
        }
    }
    if is_required(schema, schema_path) {
        label.push('*');
    }
    label
}

/// Snapshot a container widget consumes: size, pre-rendered children in
/// element order, a template identifier, and the normalized path of the
/// container's own scope (empty when it has none).
pub struct ContainerDescription {
    path: String,
    size: u32,
    template: String,
    elements: Vec<RenderDescription>,
    instance: Rc<RefCell<Value>>,
    rule: Option<Rule>,
    state: Cell<RuleState>,
}

impl ContainerDescription {
    /// Build the description for one container and register it with the
    /// rule tracker. No validation subscription — containers are not
    /// directly validated.
    pub fn create(
        size: u32,
        elements: Vec<RenderDescription>,
        template: impl Into<String>,
        services: &FormServices,
        element: &UiElement,
    ) -> Rc<Self> {
        let scope = element.scope().map(|s| s.pointer.as_str()).unwrap_or("");
        let description = Rc::new(Self {
            path: path::normalize(scope),
            size,
            template: template.into(),
            elements,
            instance: Rc::clone(services.data()),
            rule: element.rule().cloned(),
            state: Cell::new(RuleState::default()),
        });

        let target = Rc::downgrade(&description);
        services.rules().add_rule_track(target, description.rule.as_ref());

        description
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Identifier of the template the widget layer renders this
    /// container with.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Child descriptions, in element order.
    pub fn elements(&self) -> &[RenderDescription] {
        &self.elements
    }

    pub fn rule(&self) -> Option<&Rule> {
        self.rule.as_ref()
    }

    /// The shared data instance of the form.
    pub fn instance(&self) -> &Rc<RefCell<Value>> {
        &self.instance
    }

    pub fn is_visible(&self) -> bool {
        self.state.get().visible
    }

    pub fn is_enabled(&self) -> bool {
        self.state.get().enabled
    }
}

impl RuleTarget for ContainerDescription {
    fn rule_state(&self) -> RuleState {
        self.state.get()
    }
    fn apply_rule_state(&self, state: RuleState) {
        self.state.set(state);
    }
}
