//! # Label Derivation
//!
//! A UI schema element may specify its label in four shapes: not at all,
//! as a boolean (show/hide the default label), as a plain string, or as a
//! structured object with optional `text` and `show` keys. This module
//! collapses all four into a single [`LabelObject`], falling back to the
//! beautified last fragment of the element's schema path for the text.
//!
//! The required-field `"*"` suffix is appended by the control description,
//! not here — this module is a pure derivation with no schema access.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::path;

/// Label specification as it appears in a UI schema document.
///
/// Deserializes untagged; a JSON shape matching none of the first three
/// variants (a number, an array, `null`) lands in `Other` and is treated
/// like an absent label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelSpec {
    /// `"label": false` hides the label; `true` shows the default.
    Show(bool),
    /// `"label": "Age"` shows the given text.
    Text(String),
    /// `"label": { "text": ..., "show": ... }`, both keys optional.
    Object(LabelDef),
    /// Any other JSON shape; treated as absent.
    Other(Value),
}

/// The structured object form of a label specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
}

/// Derived display label: the text to render and whether to render it.
///
/// A pure value with no identity beyond its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelObject {
    /// Label text; `None` when the label is suppressed.
    pub text: Option<String>,
    /// Whether the label should be shown at all.
    pub show: bool,
}

impl LabelObject {
    /// Derive the label for an element from its (optional) specification
    /// and its schema path.
    ///
    /// | spec | show | text |
    /// |---|---|---|
    /// | absent / other shape | true | beautified last fragment |
    /// | `true` | true | beautified last fragment |
    /// | `false` | false | none |
    /// | string `s` | true | `s` |
    /// | object | `show` if present else true | `text` if present else beautified |
    pub fn derive(spec: Option<&LabelSpec>, schema_path: &str) -> Self {
        let default_text = || path::beautified_last_fragment(schema_path);
        match spec {
            None | Some(LabelSpec::Show(true)) | Some(LabelSpec::Other(_)) => Self {
                text: Some(default_text()),
                show: true,
            },
            Some(LabelSpec::Show(false)) => Self {
                text: None,
                show: false,
            },
            Some(LabelSpec::Text(text)) => Self {
                text: Some(text.clone()),
                show: true,
            },
            Some(LabelSpec::Object(def)) => Self {
                text: Some(def.text.clone().unwrap_or_else(default_text)),
                show: def.show.unwrap_or(true),
            },
        }
    }
}
