//! # UI Schema Data Model
//!
//! The serde data model for UI schema trees. A UI schema is a declarative
//! description of which widgets to show, in what layout, for which schema
//! paths. It is immutable input owned by the caller; the engine only ever
//! reads it.
//!
//! ## Element Kinds
//!
//! - **Control**: bound to exactly one schema path through its `scope`
//!   reference; may carry a label specification, a read-only flag, and a
//!   rule.
//! - **VerticalLayout / HorizontalLayout / Group**: containers holding
//!   child elements; a group additionally carries a label. Containers may
//!   carry a scope and a rule of their own.
//!
//! ## Rules
//!
//! A rule attaches conditional visibility or enablement to any element:
//! `{ "effect": "HIDE", "condition": { "scope": ..., "expectedValue": ... } }`.
//! The effect fires when the data instance value at the condition's scope
//! equals the expected value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::label::LabelSpec;

/// A reference into the schema tree, e.g. `{ "$ref": "#/properties/age" }`.
///
/// The pointer may contain numeric array indexes; those address the data
/// tree and are filtered out for schema lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeRef {
    #[serde(rename = "$ref")]
    pub pointer: String,
}

impl ScopeRef {
    /// Construct a scope reference from a pointer string.
    pub fn new(pointer: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
        }
    }
}

/// What a satisfied rule condition does to its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleEffect {
    /// Hide the element when the condition holds.
    Hide,
    /// Show the element only when the condition holds.
    Show,
    /// Enable the element only when the condition holds.
    Enable,
    /// Disable the element when the condition holds.
    Disable,
}

/// Rule condition: satisfied when the instance value at `scope` equals
/// `expected_value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub scope: ScopeRef,
    #[serde(rename = "expectedValue")]
    pub expected_value: Value,
}

/// Conditional visibility/enablement attached to a UI element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub effect: RuleEffect,
    pub condition: Condition,
}

/// A control element: one widget bound to one schema path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlElement {
    pub scope: ScopeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<LabelSpec>,
    #[serde(default, rename = "readOnly")]
    pub read_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<Rule>,
}

/// A container element: an ordered list of child elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutElement {
    #[serde(default)]
    pub elements: Vec<UiElement>,
    /// Group caption; unused by the plain layouts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<Rule>,
}

/// A node in the UI schema tree, tagged by its `"type"` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiElement {
    Control(ControlElement),
    VerticalLayout(LayoutElement),
    HorizontalLayout(LayoutElement),
    Group(LayoutElement),
}

impl UiElement {
    /// The element's `"type"` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            UiElement::Control(_) => "Control",
            UiElement::VerticalLayout(_) => "VerticalLayout",
            UiElement::HorizontalLayout(_) => "HorizontalLayout",
            UiElement::Group(_) => "Group",
        }
    }

    /// The element's scope reference, if it carries one. Controls always
    /// do; containers may.
    pub fn scope(&self) -> Option<&ScopeRef> {
        match self {
            UiElement::Control(control) => Some(&control.scope),
            UiElement::VerticalLayout(layout)
            | UiElement::HorizontalLayout(layout)
            | UiElement::Group(layout) => layout.scope.as_ref(),
        }
    }

    /// The element's rule, if any.
    pub fn rule(&self) -> Option<&Rule> {
        match self {
            UiElement::Control(control) => control.rule.as_ref(),
            UiElement::VerticalLayout(layout)
            | UiElement::HorizontalLayout(layout)
            | UiElement::Group(layout) => layout.rule.as_ref(),
        }
    }

    /// Child elements; empty for controls.
    pub fn children(&self) -> &[UiElement] {
        match self {
            UiElement::Control(_) => &[],
            UiElement::VerticalLayout(layout)
            | UiElement::HorizontalLayout(layout)
            | UiElement::Group(layout) => &layout.elements,
        }
    }
}
