//! Unit tests for phase-transition planning.

use tlc_core::{ActionId, ActionTable, Junction, Topology};

use crate::PhaseController;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn two_junction_table() -> ActionTable {
    let topo = Topology::new(
        vec![
            Junction { id: "gneJ6".into(), phase_count: 3 },
            Junction { id: "gneJ7".into(), phase_count: 3 },
        ],
        vec![],
        vec![],
    )
    .unwrap();
    ActionTable::build(&topo).unwrap()
}

#[test]
fn yellow_must_be_shorter_than_green() {
    assert!(PhaseController::new(10, 10).is_err());
    assert!(PhaseController::new(10, 11).is_err());
    assert!(PhaseController::new(10, 4).is_ok());
}

#[test]
fn first_decision_skips_yellow() {
    let table = two_junction_table();
    let ctl = PhaseController::new(10, 4).unwrap();

    let plan = ctl.plan(&table, None, ActionId(4)).unwrap();
    assert_eq!(plan.segments.len(), 1);
    assert_eq!(plan.segments[0].steps, 10);
    // ActionId(4) decodes to [2, 2].
    assert_eq!(plan.segments[0].commands, vec![(0, 2), (1, 2)]);
    assert_eq!(plan.total_steps(), 10);
}

#[test]
fn unchanged_action_skips_yellow() {
    let table = two_junction_table();
    let ctl = PhaseController::new(10, 4).unwrap();

    let plan = ctl.plan(&table, Some(ActionId(4)), ActionId(4)).unwrap();
    assert_eq!(plan.segments.len(), 1);
    assert_eq!(plan.segments[0].steps, 10);
    assert_eq!(plan.total_steps(), 10);
}

#[test]
fn changed_action_inserts_yellow_for_changed_junctions_only() {
    let table = two_junction_table();
    let ctl = PhaseController::new(10, 4).unwrap();

    // [0,0] → [0,2]: junction 1 changes, junction 0 does not.
    let plan = ctl.plan(&table, Some(ActionId(0)), ActionId(1)).unwrap();
    assert_eq!(plan.segments.len(), 2);

    // Yellow segment: junction 0 goes straight to its (unchanged) green 0,
    // junction 1 shows the yellow of its departing green 0 → code 1.
    let yellow = &plan.segments[0];
    assert_eq!(yellow.steps, 4);
    assert_eq!(yellow.commands, vec![(0, 0), (1, 1)]);

    // Green segment: both junctions on the new greens, remaining time.
    let green = &plan.segments[1];
    assert_eq!(green.steps, 6);
    assert_eq!(green.commands, vec![(0, 0), (1, 2)]);

    assert_eq!(plan.total_steps(), 10);
}

#[test]
fn both_junctions_changed_both_get_yellow() {
    let table = two_junction_table();
    let ctl = PhaseController::new(10, 4).unwrap();

    // [2,4] (ActionId 5) → [4,0] (ActionId 6): both change.
    let plan = ctl.plan(&table, Some(ActionId(5)), ActionId(6)).unwrap();
    let yellow = &plan.segments[0];
    // Yellows derive from the *departing* greens: 2+1 and 4+1.
    assert_eq!(yellow.commands, vec![(0, 3), (1, 5)]);
    assert_eq!(plan.segments[1].commands, vec![(0, 4), (1, 0)]);
    assert_eq!(plan.total_steps(), 10);
}

#[test]
fn total_steps_is_green_duration_for_every_pair() {
    let table = two_junction_table();
    let ctl = PhaseController::new(12, 3).unwrap();

    for old in table.action_ids() {
        for new in table.action_ids() {
            let plan = ctl.plan(&table, Some(old), new).unwrap();
            assert_eq!(plan.total_steps(), 12, "pair {old} → {new}");
        }
    }
}

#[test]
fn out_of_range_action_is_an_error() {
    let table = two_junction_table();
    let ctl = PhaseController::new(10, 4).unwrap();
    assert!(ctl.plan(&table, None, ActionId(9)).is_err());
}
