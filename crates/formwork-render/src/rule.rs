//! # Rule Tracking
//!
//! Registers render descriptions against the schema path their visibility
//! rule depends on, and re-evaluates them when that path's data changes.
//!
//! A rule's dependency path is `normalize(condition.scope)` — array
//! indexes are kept, the condition reads the data tree. Evaluation
//! compares the instance value at that path with the condition's
//! expected value and applies the rule's effect to the target's
//! [`RuleState`].
//!
//! Every successful edit cycle calls [`RuleTracker::reevaluate_rules`]
//! before returning — that trigger point is the guarantee this module
//! provides. Tracks are evaluated once at registration too, so a freshly
//! rendered description starts with the correct state.
//!
//! Targets are held as `Weak` references; dropping the rendered tree
//! releases its tracks (pruned on the next pass).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde_json::Value;
use tracing::debug;

use formwork_core::path;
use formwork_core::uischema::{Rule, RuleEffect};
use formwork_schema::resolve_instance;

/// Visibility and enablement of a render description, as decided by its
/// rule. Both default to true for rule-less descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleState {
    pub visible: bool,
    pub enabled: bool,
}

impl Default for RuleState {
    fn default() -> Self {
        Self {
            visible: true,
            enabled: true,
        }
    }
}

/// A render description whose visibility/enablement a rule controls.
pub trait RuleTarget {
    /// Current state.
    fn rule_state(&self) -> RuleState;
    /// Overwrite the state after an evaluation pass.
    fn apply_rule_state(&self, state: RuleState);
}

struct RuleTrack {
    target: Weak<dyn RuleTarget>,
    rule: Rule,
    /// Normalized instance path the rule's condition reads.
    depends_on: String,
}

/// Registry of rule-bearing render descriptions, keyed by the schema
/// path their condition depends on.
pub struct RuleTracker {
    data: Rc<RefCell<Value>>,
    tracks: RefCell<Vec<RuleTrack>>,
}

impl RuleTracker {
    /// A tracker evaluating conditions against the given shared data
    /// instance.
    pub fn new(data: Rc<RefCell<Value>>) -> Self {
        Self {
            data,
            tracks: RefCell::new(Vec::new()),
        }
    }

    /// Record a description's rule and evaluate it immediately so the
    /// initial state is correct. Descriptions without a rule are not
    /// tracked.
    pub fn add_rule_track(&self, target: Weak<dyn RuleTarget>, rule: Option<&Rule>) {
        let Some(rule) = rule else {
            return;
        };
        let depends_on = path::normalize(&rule.condition.scope.pointer);
        let track = RuleTrack {
            target,
            rule: rule.clone(),
            depends_on,
        };
        evaluate(&self.data.borrow(), &track);
        self.tracks.borrow_mut().push(track);
    }

    /// Re-evaluate every live track whose condition depends on
    /// `schema_path` (compared in normalized form).
    pub fn reevaluate_rules(&self, schema_path: &str) {
        let wanted = path::normalize(schema_path);
        self.reevaluate_where(|track| track.depends_on == wanted);
    }

    /// Conservative variant: re-evaluate every live track.
    pub fn reevaluate_all(&self) {
        self.reevaluate_where(|_| true);
    }

    /// Number of live tracks.
    pub fn track_count(&self) -> usize {
        self.tracks
            .borrow()
            .iter()
            .filter(|track| track.target.strong_count() > 0)
            .count()
    }

    fn reevaluate_where(&self, matches: impl Fn(&RuleTrack) -> bool) {
        let data = self.data.borrow();
        let mut tracks = self.tracks.borrow_mut();
        tracks.retain(|track| track.target.strong_count() > 0);
        for track in tracks.iter().filter(|track| matches(track)) {
            evaluate(&data, track);
        }
    }
}

fn evaluate(data: &Value, track: &RuleTrack) {
    let Some(target) = track.target.upgrade() else {
        return;
    };
    let actual = resolve_instance(data, &track.depends_on);
    let satisfied = actual == Some(&track.rule.condition.expected_value);

    let mut state = target.rule_state();
    match track.rule.effect {
        RuleEffect::Show => state.visible = satisfied,
        RuleEffect::Hide => state.visible = !satisfied,
        RuleEffect::Enable => state.enabled = satisfied,
        RuleEffect::Disable => state.enabled = !satisfied,
    }
    target.apply_rule_state(state);
    debug!(
        depends_on = %track.depends_on,
        satisfied,
        visible = state.visible,
        enabled = state.enabled,
        "rule evaluated"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_core::uischema::{Condition, ScopeRef};
    use serde_json::json;
    use std::cell::Cell;

    struct FakeTarget {
        state: Cell<RuleState>,
    }

    impl FakeTarget {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                state: Cell::new(RuleState::default()),
            })
        }
    }

    impl RuleTarget for FakeTarget {
        fn rule_state(&self) -> RuleState {
            self.state.get()
        }
        fn apply_rule_state(&self, state: RuleState) {
            self.state.set(state);
        }
    }

    fn rule(effect: RuleEffect, scope: &str, expected: Value) -> Rule {
        Rule {
            effect,
            condition: Condition {
                scope: ScopeRef::new(scope),
                expected_value: expected,
            },
        }
    }

    fn tracker_with(data: Value) -> (RuleTracker, Rc<RefCell<Value>>) {
        let data = Rc::new(RefCell::new(data));
        (RuleTracker::new(Rc::clone(&data)), data)
    }

    #[test]
    fn test_show_effect_follows_condition() {
        let (tracker, data) = tracker_with(json!({ "age": 30 }));
        let target = FakeTarget::new();
        let weak = Rc::downgrade(&target);
        tracker.add_rule_track(weak, Some(&rule(RuleEffect::Show, "#/properties/age", json!(36))));

        // Initial evaluation: condition unmet, SHOW hides.
        assert!(!target.rule_state().visible);

        *data.borrow_mut() = json!({ "age": 36 });
        tracker.reevaluate_rules("age");
        assert!(target.rule_state().visible);
    }

    #[test]
    fn test_hide_effect_inverts_condition() {
        let (tracker, data) = tracker_with(json!({ "age": 36 }));
        let target = FakeTarget::new();
        let weak = Rc::downgrade(&target);
        tracker.add_rule_track(weak, Some(&rule(RuleEffect::Hide, "#/properties/age", json!(36))));

        assert!(!target.rule_state().visible);

        *data.borrow_mut() = json!({ "age": 37 });
        tracker.reevaluate_rules("age");
        assert!(target.rule_state().visible);
    }

    #[test]
    fn test_enable_and_disable_touch_only_enablement() {
        let (tracker, _data) = tracker_with(json!({ "locked": true }));

        let enable = FakeTarget::new();
        let weak = Rc::downgrade(&enable);
        tracker.add_rule_track(
            weak,
            Some(&rule(RuleEffect::Enable, "#/properties/locked", json!(false))),
        );
        assert!(!enable.rule_state().enabled);
        assert!(enable.rule_state().visible, "ENABLE must not touch visibility");

        let disable = FakeTarget::new();
        let weak = Rc::downgrade(&disable);
        tracker.add_rule_track(
            weak,
            Some(&rule(RuleEffect::Disable, "#/properties/locked", json!(true))),
        );
        assert!(!disable.rule_state().enabled);
        assert!(disable.rule_state().visible);
    }

    #[test]
    fn test_reevaluation_is_scoped_to_the_dependency_path() {
        let (tracker, data) = tracker_with(json!({ "a": 1, "b": 1 }));
        let target = FakeTarget::new();
        let weak = Rc::downgrade(&target);
        tracker.add_rule_track(weak, Some(&rule(RuleEffect::Show, "#/properties/a", json!(2))));
        assert!(!target.rule_state().visible);

        *data.borrow_mut() = json!({ "a": 2, "b": 1 });
        tracker.reevaluate_rules("b");
        assert!(
            !target.rule_state().visible,
            "a track depending on 'a' must not re-evaluate for 'b'"
        );

        tracker.reevaluate_rules("a");
        assert!(target.rule_state().visible);

        *data.borrow_mut() = json!({ "a": 1, "b": 1 });
        tracker.reevaluate_all();
        assert!(!target.rule_state().visible);
    }

    #[test]
    fn test_indexed_condition_scope_reads_the_array_element() {
        let (tracker, data) = tracker_with(json!({ "comments": [{ "done": false }] }));
        let target = FakeTarget::new();
        let weak = Rc::downgrade(&target);
        tracker.add_rule_track(
            weak,
            Some(&rule(
                RuleEffect::Show,
                "#/properties/comments/0/done",
                json!(true),
            )),
        );
        assert!(!target.rule_state().visible);

        data.borrow_mut()["comments"][0]["done"] = json!(true);
        tracker.reevaluate_rules("comments/0/done");
        assert!(
            target.rule_state().visible,
            "the condition must read the indexed array element"
        );
    }

    #[test]
    fn test_rule_less_target_is_not_tracked() {
        let (tracker, _data) = tracker_with(json!({}));
        let target = FakeTarget::new();
        let weak = Rc::downgrade(&target);
        tracker.add_rule_track(weak, None);
        assert_eq!(tracker.track_count(), 0);
    }

    #[test]
    fn test_dropped_target_is_pruned() {
        let (tracker, _data) = tracker_with(json!({ "age": 1 }));
        let target = FakeTarget::new();
        let weak = Rc::downgrade(&target);
        tracker.add_rule_track(weak, Some(&rule(RuleEffect::Show, "#/properties/age", json!(1))));
        assert_eq!(tracker.track_count(), 1);

        drop(target);
        tracker.reevaluate_all();
        assert_eq!(tracker.track_count(), 0);
    }

    #[test]
    fn test_missing_instance_value_means_condition_unmet() {
        let (tracker, _data) = tracker_with(json!({}));
        let target = FakeTarget::new();
        let weak = Rc::downgrade(&target);
        tracker.add_rule_track(
            weak,
            Some(&rule(RuleEffect::Show, "#/properties/missing", json!(1))),
        );
        assert!(!target.rule_state().visible);
    }
}
