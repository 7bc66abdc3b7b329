//! # formwork-render — The Formwork Render Engine
//!
//! Turns a dereferenced data schema and a UI schema element into render
//! descriptions, and keeps every live description synchronized with the
//! data instance through the "model changed" protocol.
//!
//! ## Components
//!
//! - **Dispatch** (`dispatch`): the registered renderer set and the
//!   selection algorithm — highest priority wins, first registration
//!   breaks ties, zero candidates is a hard error carrying the
//!   serialized element.
//!
//! - **Descriptions** (`description`): the dispatch output. Control
//!   descriptions subscribe to "model changed" at construction and
//!   re-validate on every broadcast; container descriptions hold their
//!   pre-rendered children. Both register their rule with the tracker.
//!
//! - **Rule tracking** (`rule`): re-evaluates visibility/enablement
//!   rules for the paths an edit touched, on every edit cycle.
//!
//! - **Change propagation** (`notify`): the synchronous, registration-
//!   ordered observer registry behind `model_changed()`.
//!
//! - **Services** (`services`): the typed collaborator bundle handed to
//!   every dispatch — dereferenced schema, shared data instance,
//!   validation engine, rule tracker, change bus.
//!
//! ## The Edit Cycle
//!
//! ```text
//! widget mutates data → control.model_changed() → bus broadcast
//!   → every live control: validate() → reevaluate_rules(own path)
//! ```
//!
//! Single-threaded and cooperative throughout: `Rc`/`RefCell` sharing,
//! no locks, handlers run to completion in registration order.

pub mod description;
pub mod dispatch;
pub mod notify;
pub mod rule;
pub mod services;

pub use description::{
    is_required, Alert, AlertSeverity, ContainerDescription, ControlDescription,
    RenderDescription,
};
pub use dispatch::{RenderDispatcher, RenderError, Renderer};
pub use notify::{ChangeBus, ModelObserver};
pub use rule::{RuleState, RuleTarget, RuleTracker};
pub use services::FormServices;
