//! Unit tests for the episode runner, waiting-time tracking, and sessions.
//!
//! Everything runs against an in-memory mock simulator: a scripted queue
//! profile plus a fixed car population, with every phase command logged.

use std::collections::HashMap;

use tlc_core::{ActionId, ActionTable, Junction, RunConfig, SimRng, Topology};
use tlc_rl::{ActionPolicy, ReplayMemory, ValueFunction};
use tlc_signal::PhaseController;
use tlc_state::AggregateEncoder;

use crate::{
    EpisodeError, EpisodeRunner, NoopObserver, RewardKind, SimError, SimResult, TrafficSim,
    WaitingTimeTracker,
};

// ── Mock simulator ────────────────────────────────────────────────────────────

#[derive(Clone)]
struct MockCar {
    id:   String,
    road: String,
    dist: f64,
    wait: f64,
}

/// Scripted in-memory simulator.  `queue_script[t]` is the halting count on
/// the first incoming road at time `t` (the last entry repeats forever);
/// the second road always reports zero.
#[derive(Default)]
struct MockSim {
    time:         u32,
    queue_script: Vec<u32>,
    cars:         Vec<MockCar>,
    phase_log:    Vec<(String, u32)>,
    fail_at:      Option<u32>,
    closed:       bool,
}

impl MockSim {
    fn with_queue_script(script: Vec<u32>) -> MockSim {
        MockSim {
            queue_script: script,
            ..MockSim::default()
        }
    }

    fn queue_now(&self) -> u32 {
        let i = (self.time as usize).min(self.queue_script.len().saturating_sub(1));
        self.queue_script.get(i).copied().unwrap_or(0)
    }
}

impl TrafficSim for MockSim {
    fn step(&mut self) -> SimResult<()> {
        if self.fail_at == Some(self.time) {
            return Err(SimError::Connection("connection dropped".into()));
        }
        self.time += 1;
        Ok(())
    }

    fn set_phase(&mut self, junction: &str, phase_code: u32) -> SimResult<()> {
        self.phase_log.push((junction.to_string(), phase_code));
        Ok(())
    }

    fn close(&mut self) -> SimResult<()> {
        self.closed = true;
        Ok(())
    }

    fn vehicle_ids(&self) -> SimResult<Vec<String>> {
        Ok(self.cars.iter().map(|c| c.id.clone()).collect())
    }

    fn accumulated_waiting_time(&self, vehicle: &str) -> SimResult<f64> {
        self.car(vehicle).map(|c| c.wait)
    }

    fn vehicle_road(&self, vehicle: &str) -> SimResult<String> {
        self.car(vehicle).map(|c| c.road.clone())
    }

    fn vehicle_position(&self, vehicle: &str) -> SimResult<(String, f64)> {
        self.car(vehicle).map(|c| (c.road.clone(), c.dist))
    }

    fn lane_halting_count(&self, _lane: &str) -> SimResult<u32> {
        Ok(0)
    }

    fn edge_halting_count(&self, edge: &str) -> SimResult<u32> {
        if edge == "EW_in" { Ok(self.queue_now()) } else { Ok(0) }
    }

    fn edge_co2(&self, _edge: &str) -> SimResult<f64> {
        Ok(1.5)
    }

    fn edge_fuel(&self, _edge: &str) -> SimResult<f64> {
        Ok(0.5)
    }
}

impl MockSim {
    fn car(&self, id: &str) -> SimResult<&MockCar> {
        self.cars
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| SimError::UnknownId(id.to_string()))
    }
}

// ── Shared fixtures ───────────────────────────────────────────────────────────

fn two_junction_topology() -> Topology {
    Topology::new(
        vec![
            Junction { id: "J0".into(), phase_count: 3 },
            Junction { id: "J1".into(), phase_count: 3 },
        ],
        vec!["EW_in".into(), "NS_in".into()],
        vec![vec!["EW_in_0".into()], vec!["NS_in_0".into()]],
    )
    .expect("valid topology")
}

/// Q(s)[a] = base[a].  State-independent, which keeps greedy choices fixed.
struct StubModel {
    base: Vec<f64>,
}

impl ValueFunction for StubModel {
    fn state_dim(&self) -> usize {
        2
    }

    fn num_actions(&self) -> usize {
        self.base.len()
    }

    fn batch_size(&self) -> usize {
        4
    }

    fn predict(&self, _state: &[f64]) -> Vec<f64> {
        self.base.clone()
    }

    fn train_batch(&mut self, _states: &[&[f64]], _targets: &[Vec<f64>]) {}
}

/// Replays a fixed action sequence; the last entry repeats.
struct Scripted {
    seq:  Vec<u16>,
    next: usize,
}

impl Scripted {
    fn new(seq: Vec<u16>) -> Scripted {
        Scripted { seq, next: 0 }
    }
}

impl ActionPolicy for Scripted {
    fn choose<V: ValueFunction>(
        &mut self,
        _state: &[f64],
        _model: &V,
        _rng:   &mut SimRng,
    ) -> ActionId {
        let i = self.next.min(self.seq.len() - 1);
        self.next += 1;
        ActionId(self.seq[i])
    }
}

struct Fixture {
    topology: Topology,
    table:    ActionTable,
}

fn fixture() -> Fixture {
    let topology = two_junction_topology();
    let table = ActionTable::build(&topology).expect("action table");
    Fixture { topology, table }
}

fn run_scripted(
    sim:       &mut MockSim,
    seq:       Vec<u16>,
    max_steps: u32,
    memory:    Option<&mut ReplayMemory>,
) -> Result<crate::EpisodeStats, EpisodeError> {
    let fx = fixture();
    let controller = PhaseController::new(10, 3).expect("controller");
    let runner = EpisodeRunner::new(&fx.topology, &fx.table, &controller, RewardKind::QueueDelta, max_steps);
    let encoder = AggregateEncoder::new(&fx.topology, 2).expect("encoder");
    let model = StubModel { base: vec![0.0; fx.table.len()] };
    let mut policy = Scripted::new(seq);
    let mut rng = SimRng::new(42);

    runner.run(
        sim,
        &encoder,
        &model,
        &mut policy,
        memory,
        &mut rng,
        0,
        &mut NoopObserver,
    )
}

// ── EpisodeRunner ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod runner {
    use super::*;

    #[test]
    fn first_decision_goes_straight_to_green() {
        let mut sim = MockSim::default();
        let stats = run_scripted(&mut sim, vec![4], 10, None).expect("episode");

        // Action 4 of the 9-row table is green codes [2, 2]; no yellow
        // precedes the first decision.
        assert_eq!(sim.phase_log, vec![("J0".to_string(), 2), ("J1".to_string(), 2)]);
        assert_eq!(stats.steps, 10);
        assert_eq!(stats.decisions, 1);
        assert!(sim.closed);
    }

    #[test]
    fn phase_change_inserts_yellow_for_changed_junctions_only() {
        let mut sim = MockSim::default();
        run_scripted(&mut sim, vec![0, 2], 20, None).expect("episode");

        // Decision 1: [0, 0].  Decision 2: [0, 4] — only J1 changes, so the
        // yellow segment holds J0 at its new green and gives J1 yellow 0+1.
        assert_eq!(
            sim.phase_log,
            vec![
                ("J0".to_string(), 0),
                ("J1".to_string(), 0),
                ("J0".to_string(), 0),
                ("J1".to_string(), 1),
                ("J0".to_string(), 0),
                ("J1".to_string(), 4),
            ]
        );
        // Yellow is carved out of green: still exactly 20 steps.
        assert_eq!(sim.time, 20);
    }

    #[test]
    fn unchanged_action_skips_yellow() {
        let mut sim = MockSim::default();
        run_scripted(&mut sim, vec![3], 20, None).expect("episode");

        // Same action both decisions: two single green segments.
        assert_eq!(
            sim.phase_log,
            vec![
                ("J0".to_string(), 2),
                ("J1".to_string(), 0),
                ("J0".to_string(), 2),
                ("J1".to_string(), 0),
            ]
        );
    }

    #[test]
    fn no_transition_recorded_at_first_decision() {
        let mut memory = ReplayMemory::new(0, 100);
        let mut sim = MockSim::default();
        let stats = run_scripted(&mut sim, vec![0], 10, Some(&mut memory)).expect("episode");

        assert_eq!(stats.decisions, 1);
        assert_eq!(memory.len(), 0);
        assert!(stats.reward_series.is_empty());
    }

    #[test]
    fn reward_is_old_metric_minus_new() {
        // Queue 6 for the first green interval, 2 afterwards: the second
        // decision point sees 6 → 2, reward +4.
        let script: Vec<u32> = (0..20).map(|t| if t < 10 { 6 } else { 2 }).collect();
        let mut memory = ReplayMemory::new(0, 100);
        let mut sim = MockSim::with_queue_script(script);
        let stats = run_scripted(&mut sim, vec![0], 20, Some(&mut memory)).expect("episode");

        assert_eq!(stats.reward_series, vec![4.0]);
        assert_eq!(stats.sum_neg_reward, 0.0);

        assert_eq!(memory.len(), 1);
        let t = memory.iter().next().expect("one transition");
        assert_eq!(t.action, ActionId(0));
        assert_eq!(t.reward, 4.0);
        assert_eq!(t.state.len(), 2);
        assert_eq!(t.next_state.len(), 2);
    }

    #[test]
    fn worsening_queue_accumulates_negative_reward() {
        let script: Vec<u32> = (0..30).map(|t| t / 10).collect();
        let mut sim = MockSim::with_queue_script(script);
        let stats = run_scripted(&mut sim, vec![0], 30, None).expect("episode");

        // Metrics 0, 1, 2 at the three decision points: rewards -1, -1.
        assert_eq!(stats.reward_series, vec![-1.0, -1.0]);
        assert_eq!(stats.sum_neg_reward, -2.0);
    }

    #[test]
    fn per_step_series_cover_every_step() {
        let mut sim = MockSim::with_queue_script(vec![3]);
        let stats = run_scripted(&mut sim, vec![0], 20, None).expect("episode");

        assert_eq!(stats.queue_series.len(), 20);
        assert_eq!(stats.co2_series.len(), 20);
        assert_eq!(stats.fuel_series.len(), 20);
        assert_eq!(stats.sum_queue_length, 3 * 20);
        assert_eq!(stats.sum_waiting_time, 3 * 20);
        assert!((stats.avg_queue_length() - 3.0).abs() < 1e-12);
        // Two roads, 1.5 mg CO2 each per step.
        assert!((stats.co2_series[0] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn simulator_failure_aborts_with_step_index() {
        let mut sim = MockSim {
            fail_at: Some(5),
            ..MockSim::default()
        };
        let err = run_scripted(&mut sim, vec![0], 20, None).expect_err("must abort");

        match err {
            EpisodeError::Aborted { step, source } => {
                assert_eq!(step, 5);
                assert!(matches!(source, SimError::Connection(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn aborted_episode_still_closes_the_connection() {
        let mut sim = MockSim {
            fail_at: Some(5),
            ..MockSim::default()
        };
        run_scripted(&mut sim, vec![0], 20, None).expect_err("must abort");
        assert!(sim.closed);
    }
}

// ── WaitingTimeTracker ────────────────────────────────────────────────────────

#[cfg(test)]
mod waiting {
    use super::*;

    fn car(id: &str, road: &str, wait: f64) -> MockCar {
        MockCar {
            id: id.into(),
            road: road.into(),
            dist: 50.0,
            wait,
        }
    }

    #[test]
    fn sums_cars_on_incoming_roads_only() {
        let topology = two_junction_topology();
        let mut sim = MockSim::default();
        sim.cars = vec![
            car("a", "EW_in", 10.0),
            car("b", "NS_in", 5.0),
            car("c", "EW_out", 99.0),
        ];

        let mut tracker = WaitingTimeTracker::new();
        let total = tracker.collect(&sim, &topology).expect("collect");
        assert_eq!(total, 15.0);
        assert_eq!(tracker.tracked_count(), 2);
    }

    #[test]
    fn cleared_cars_leave_the_tracked_sum_but_stay_in_history() {
        let topology = two_junction_topology();
        let mut sim = MockSim::default();
        sim.cars = vec![car("a", "EW_in", 10.0), car("b", "NS_in", 5.0)];

        let mut tracker = WaitingTimeTracker::new();
        tracker.collect(&sim, &topology).expect("collect");

        // Car "a" crosses the intersection onto an outgoing edge.
        sim.cars[0].road = "EW_out".into();
        let total = tracker.collect(&sim, &topology).expect("collect");
        assert_eq!(total, 5.0);
        assert_eq!(tracker.tracked_count(), 1);

        // History still remembers its last waiting time.
        let mut waits = tracker.all_waiting_times();
        waits.sort_by(f64::total_cmp);
        assert_eq!(waits, vec![5.0, 10.0]);
    }

    #[test]
    fn clear_resets_both_maps() {
        let topology = two_junction_topology();
        let mut sim = MockSim::default();
        sim.cars = vec![car("a", "EW_in", 10.0)];

        let mut tracker = WaitingTimeTracker::new();
        tracker.collect(&sim, &topology).expect("collect");
        tracker.clear();
        assert_eq!(tracker.tracked_count(), 0);
        assert!(tracker.all_waiting_times().is_empty());
    }

    #[test]
    fn waiting_delta_metric_uses_the_tracker() {
        let topology = two_junction_topology();
        let mut sim = MockSim::default();
        sim.cars = vec![car("a", "EW_in", 7.0)];

        let mut tracker = WaitingTimeTracker::new();
        let metric = RewardKind::WaitingDelta
            .metric(&sim, &topology, &mut tracker)
            .expect("metric");
        assert_eq!(metric, 7.0);
    }
}

// ── TrainingSession ───────────────────────────────────────────────────────────

#[cfg(test)]
mod session {
    use tempfile::TempDir;

    use tlc_demand::{Branch, DemandGraph, TrafficGenerator};
    use tlc_rl::{FixedCycle, Greedy};

    use crate::{SimLauncher, TrainingSession};

    use super::*;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    struct MockLauncher {
        launched: u32,
    }

    impl SimLauncher for MockLauncher {
        type Sim = MockSim;

        fn launch(&mut self, _episode: u32) -> Result<MockSim, SimError> {
            self.launched += 1;
            Ok(MockSim::with_queue_script(vec![4, 3, 2, 1, 0]))
        }
    }

    fn config() -> RunConfig {
        RunConfig {
            max_steps:        20,
            green_duration:   10,
            yellow_duration:  3,
            gamma:            0.75,
            memory_size_min:  0,
            memory_size_max:  100,
            training_epochs:  2,
            total_episodes:   3,
            n_cars_generated: 10,
            horizon_secs:     20,
            seed:             7,
        }
    }

    fn generator() -> TrafficGenerator {
        let graph = DemandGraph::new(
            vec![Branch { edge: "EW_in".into(), probability: 1.0 }],
            HashMap::new(),
        )
        .expect("graph");
        TrafficGenerator::new(graph, 10, 20).expect("generator")
    }

    fn session(route_dir: &std::path::Path) -> TrainingSession {
        let fx = fixture();
        TrainingSession::new(
            fx.topology,
            fx.table,
            config(),
            RewardKind::QueueDelta,
            generator(),
            route_dir.to_path_buf(),
        )
    }

    #[test]
    fn epsilon_decays_linearly() {
        let dir = tmp();
        let s = session(dir.path());
        assert_eq!(s.epsilon(0), 1.0);
        assert!((s.epsilon(1) - 2.0 / 3.0).abs() < 1e-12);
        assert!((s.epsilon(2) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn train_runs_every_episode_and_writes_route_files() {
        let dir = tmp();
        let s = session(dir.path());
        let mut launcher = MockLauncher { launched: 0 };
        let encoder = AggregateEncoder::new(&two_junction_topology(), 2).expect("encoder");
        let mut model = StubModel { base: vec![0.0; 9] };

        let stats = s
            .train(&mut launcher, &encoder, &mut model, &mut NoopObserver)
            .expect("training session");

        assert_eq!(stats.len(), 3);
        assert_eq!(launcher.launched, 3);
        for (episode, st) in stats.iter().enumerate() {
            assert_eq!(st.steps, 20, "episode {episode}");
            assert_eq!(st.decisions, 2, "episode {episode}");
            assert!(s.route_file(episode as u32).exists(), "episode {episode}");
        }
    }

    #[test]
    fn evaluate_runs_one_episode_without_learning() {
        let dir = tmp();
        let s = session(dir.path());
        let mut launcher = MockLauncher { launched: 0 };
        let encoder = AggregateEncoder::new(&two_junction_topology(), 2).expect("encoder");
        let model = StubModel { base: vec![0.0; 9] };

        let stats = s
            .evaluate(&mut launcher, &encoder, &model, &mut Greedy, 0, &mut NoopObserver)
            .expect("evaluation episode");
        assert_eq!(stats.steps, 20);
        assert_eq!(launcher.launched, 1);
    }

    #[test]
    fn fixed_cycle_baseline_walks_the_table() {
        let dir = tmp();
        let s = session(dir.path());
        let mut launcher = MockLauncher { launched: 0 };
        let encoder = AggregateEncoder::new(&two_junction_topology(), 2).expect("encoder");
        let model = StubModel { base: vec![0.0; 9] };

        let mut policy = FixedCycle::new(9);
        let stats = s
            .evaluate(&mut launcher, &encoder, &model, &mut policy, 0, &mut NoopObserver)
            .expect("baseline episode");
        assert_eq!(stats.decisions, 2);
    }
}
