//! # Renderer Dispatch
//!
//! Holds the registered renderer set and selects, for each UI element,
//! the single best-matching renderer.
//!
//! ## Selection Rule
//!
//! A renderer is a candidate iff its `is_applicable` claims the element
//! (given the element's resolved sub-schema and filtered schema path).
//! Among candidates the strictly greatest priority wins; on equal
//! priority the first-registered candidate is kept. Registration order
//! is therefore part of the contract and the set is never re-sorted.
//!
//! Zero candidates is a hard failure: the element is serialized into the
//! error for diagnosis, and no partial result escapes.
//!
//! ## Post-Render Broadcast
//!
//! Every successful dispatch broadcasts "model changed" so that already
//! constructed controls re-validate. This fires on the very first render
//! too — that is the initial validation pass.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use formwork_core::path;
use formwork_core::uischema::UiElement;
use formwork_core::FormworkError;
use formwork_schema::resolve_schema;

use crate::description::RenderDescription;
use crate::services::FormServices;

/// Error raised by a dispatch call. Fatal to that call, never retried.
#[derive(Error, Debug)]
pub enum RenderError {
    /// No registered renderer claimed the element.
    #[error("no applicable renderer found for element: {element}")]
    NoApplicableRenderer {
        /// JSON serialization of the offending UI element.
        element: String,
    },

    /// The selected renderer failed while building its description.
    #[error("renderer failed for '{kind}' element: {reason}")]
    RendererFailed {
        /// The element's `"type"` tag.
        kind: String,
        /// Renderer diagnostic.
        reason: String,
    },
}

impl From<RenderError> for FormworkError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::NoApplicableRenderer { element } => {
                FormworkError::NoApplicableRenderer { element }
            }
            other => FormworkError::Render(other.to_string()),
        }
    }
}

/// A registered rendering capability.
///
/// Concrete renderers live outside the engine; the engine only needs
/// applicability, priority, and a way to ask for the description.
pub trait Renderer {
    /// Whether this renderer can describe `element`. `sub_schema` and
    /// `schema_path` are present for scoped elements whose path
    /// resolved.
    fn is_applicable(
        &self,
        element: &UiElement,
        sub_schema: Option<&Value>,
        schema_path: Option<&str>,
    ) -> bool;

    /// Selection priority; greater wins.
    fn priority(&self) -> i32;

    /// Build the description. `scope` is the element's raw scope
    /// pointer with array indexes retained — that is the form
    /// descriptions bind their instance path to. Layout renderers
    /// recurse through `dispatcher` for their children.
    fn render(
        &self,
        element: &UiElement,
        scope: Option<&str>,
        dispatcher: &RenderDispatcher,
        services: &FormServices,
    ) -> Result<RenderDescription, RenderError>;
}

/// The registered renderer set plus the selection algorithm.
#[derive(Default)]
pub struct RenderDispatcher {
    renderers: Vec<Box<dyn Renderer>>,
}

impl RenderDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a renderer to the candidate set. No de-duplication and no
    /// removal — registration happens once at setup time and the set
    /// lives as long as the dispatcher.
    pub fn register(&mut self, renderer: Box<dyn Renderer>) {
        self.renderers.push(renderer);
    }

    /// Number of registered renderers.
    pub fn renderer_count(&self) -> usize {
        self.renderers.len()
    }

    /// Dispatch one UI element: resolve its scope against the schema,
    /// select the highest-priority applicable renderer, build the
    /// description, and broadcast "model changed".
    ///
    /// # Errors
    ///
    /// [`RenderError::NoApplicableRenderer`] when no candidate claims
    /// the element; whatever the selected renderer raises otherwise.
    pub fn render(
        &self,
        element: &UiElement,
        services: &FormServices,
    ) -> Result<RenderDescription, RenderError> {
        // Two forms of the same scope: the raw pointer (indexes kept)
        // addresses the data tree, the filtered one the schema tree.
        let scope = element.scope().map(|s| s.pointer.as_str());
        let schema_path = scope.map(path::filter_indexes);
        let sub_schema = schema_path
            .as_deref()
            .and_then(|p| resolve_schema(services.schema(), p));

        let mut selected: Option<&dyn Renderer> = None;
        for renderer in &self.renderers {
            if renderer.is_applicable(element, sub_schema, schema_path.as_deref())
                && selected.map_or(true, |kept| renderer.priority() > kept.priority())
            {
                selected = Some(renderer.as_ref());
            }
        }

        let Some(renderer) = selected else {
            let element_json =
                serde_json::to_string(element).unwrap_or_else(|_| format!("{element:?}"));
            warn!(kind = element.kind(), "no applicable renderer");
            return Err(RenderError::NoApplicableRenderer {
                element: element_json,
            });
        };
        debug!(
            kind = element.kind(),
            priority = renderer.priority(),
            "renderer selected"
        );

        let rendered = renderer.render(element, scope, self, services)?;
        // Intentional on the very first render too: this broadcast is
        // the initial validation pass for every control built so far.
        services.bus().broadcast();
        Ok(rendered)
    }

    /// Dispatch a sibling group, preserving order. All-or-nothing: the
    /// first failing element aborts the group and no descriptions are
    /// returned.
    pub fn render_elements(
        &self,
        elements: &[UiElement],
        services: &FormServices,
    ) -> Result<Vec<RenderDescription>, RenderError> {
        elements
            .iter()
            .map(|element| self.render(element, services))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::ControlDescription;
    use formwork_core::uischema::{ControlElement, ScopeRef};
    use formwork_schema::JsonSchemaEngine;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Control renderer that records its selection into a shared log.
    struct TaggedRenderer {
        tag: &'static str,
        priority: i32,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Renderer for TaggedRenderer {
        fn is_applicable(
            &self,
            element: &UiElement,
            _sub_schema: Option<&Value>,
            _schema_path: Option<&str>,
        ) -> bool {
            matches!(element, UiElement::Control(_))
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn render(
            &self,
            element: &UiElement,
            scope: Option<&str>,
            _dispatcher: &RenderDispatcher,
            services: &FormServices,
        ) -> Result<RenderDescription, RenderError> {
            self.log.borrow_mut().push(self.tag);
            let UiElement::Control(control) = element else {
                return Err(RenderError::RendererFailed {
                    kind: element.kind().to_string(),
                    reason: "tagged renderer only renders controls".to_string(),
                });
            };
            Ok(RenderDescription::Control(ControlDescription::create(
                scope.unwrap_or(""),
                services,
                control,
            )))
        }
    }

    fn services() -> FormServices {
        FormServices::new(
            &json!({ "type": "object", "properties": { "age": { "type": "number" } } }),
            json!({ "age": 30 }),
            Rc::new(JsonSchemaEngine::new()),
        )
        .unwrap()
    }

    fn age_control() -> UiElement {
        UiElement::Control(ControlElement {
            scope: ScopeRef::new("#/properties/age"),
            label: None,
            read_only: false,
            rule: None,
        })
    }

    #[test]
    fn test_highest_priority_candidate_wins() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = RenderDispatcher::new();
        dispatcher.register(Box::new(TaggedRenderer {
            tag: "low",
            priority: 1,
            log: Rc::clone(&log),
        }));
        dispatcher.register(Box::new(TaggedRenderer {
            tag: "high",
            priority: 5,
            log: Rc::clone(&log),
        }));

        dispatcher.render(&age_control(), &services()).unwrap();
        assert_eq!(*log.borrow(), ["high"]);
    }

    #[test]
    fn test_priority_wins_regardless_of_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = RenderDispatcher::new();
        dispatcher.register(Box::new(TaggedRenderer {
            tag: "high",
            priority: 5,
            log: Rc::clone(&log),
        }));
        dispatcher.register(Box::new(TaggedRenderer {
            tag: "low",
            priority: 1,
            log: Rc::clone(&log),
        }));

        dispatcher.render(&age_control(), &services()).unwrap();
        assert_eq!(*log.borrow(), ["high"]);
    }

    #[test]
    fn test_equal_priority_keeps_first_registered() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = RenderDispatcher::new();
        dispatcher.register(Box::new(TaggedRenderer {
            tag: "first",
            priority: 3,
            log: Rc::clone(&log),
        }));
        dispatcher.register(Box::new(TaggedRenderer {
            tag: "second",
            priority: 3,
            log: Rc::clone(&log),
        }));

        dispatcher.render(&age_control(), &services()).unwrap();
        assert_eq!(*log.borrow(), ["first"]);
    }

    #[test]
    fn test_zero_candidates_is_a_hard_failure_with_the_element() {
        let dispatcher = RenderDispatcher::new();
        let err = dispatcher.render(&age_control(), &services()).unwrap_err();
        let RenderError::NoApplicableRenderer { element } = &err else {
            panic!("expected NoApplicableRenderer, got: {err}");
        };
        assert!(
            element.contains("#/properties/age"),
            "serialized element should identify the control: {element}"
        );

        let aggregated = FormworkError::from(err);
        assert!(matches!(aggregated, FormworkError::NoApplicableRenderer { .. }));
    }
}
