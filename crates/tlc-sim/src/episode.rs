//! The episode runner — one simulated episode from first decision to
//! `max_steps`.

use tlc_core::{ActionId, ActionTable, SimRng, Topology};
use tlc_rl::{ActionPolicy, ReplayMemory, Transition, ValueFunction};
use tlc_signal::PhaseController;
use tlc_state::{IntersectionSnapshot, StateEncoder, VehicleObs};

use crate::reward::queue_length;
use crate::{
    EpisodeError, EpisodeObserver, EpisodeResult, EpisodeStats, RewardKind, SimError, TrafficSim,
    WaitingTimeTracker,
};

/// Drives the decision-point loop against a simulator.
///
/// The runner is policy-agnostic: plug in an epsilon-greedy policy plus a
/// replay memory for a training run, a greedy policy without memory for
/// evaluation, or a fixed-cycle policy for the traditional-signal
/// baseline.
pub struct EpisodeRunner<'a> {
    topology:   &'a Topology,
    table:      &'a ActionTable,
    controller: &'a PhaseController,
    reward:     RewardKind,
    max_steps:  u32,
}

impl<'a> EpisodeRunner<'a> {
    pub fn new(
        topology:   &'a Topology,
        table:      &'a ActionTable,
        controller: &'a PhaseController,
        reward:     RewardKind,
        max_steps:  u32,
    ) -> EpisodeRunner<'a> {
        EpisodeRunner {
            topology,
            table,
            controller,
            reward,
            max_steps,
        }
    }

    /// Run one episode to `max_steps` and return its statistics.
    ///
    /// `memory = Some(..)` records transitions for training; `None` runs
    /// pure evaluation.  Simulator failures abort the episode and surface
    /// the step index at which they occurred; the connection is torn down
    /// either way.
    #[allow(clippy::too_many_arguments)]
    pub fn run<S, E, V, P, O>(
        &self,
        sim:      &mut S,
        encoder:  &E,
        model:    &V,
        policy:   &mut P,
        memory:   Option<&mut ReplayMemory>,
        rng:      &mut SimRng,
        episode:  u32,
        observer: &mut O,
    ) -> EpisodeResult<EpisodeStats>
    where
        S: TrafficSim,
        E: StateEncoder,
        V: ValueFunction,
        P: ActionPolicy,
        O: EpisodeObserver,
    {
        match self.drive(sim, encoder, model, policy, memory, rng, observer) {
            Ok((stats, step)) => {
                sim.close().map_err(at(step))?;
                observer.on_episode_end(episode, &stats);
                Ok(stats)
            }
            Err(err) => {
                // Best-effort teardown; the abort error is what surfaces.
                let _ = sim.close();
                Err(err)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn drive<S, E, V, P, O>(
        &self,
        sim:        &mut S,
        encoder:    &E,
        model:      &V,
        policy:     &mut P,
        mut memory: Option<&mut ReplayMemory>,
        rng:        &mut SimRng,
        observer:   &mut O,
    ) -> EpisodeResult<(EpisodeStats, u32)>
    where
        S: TrafficSim,
        E: StateEncoder,
        V: ValueFunction,
        P: ActionPolicy,
        O: EpisodeObserver,
    {
        let mut stats = EpisodeStats::new();
        let mut tracker = WaitingTimeTracker::new();
        let mut step: u32 = 0;

        let mut old_state: Vec<f64> = vec![];
        let mut old_action: Option<ActionId> = None;
        let mut old_metric = 0.0;

        while step < self.max_steps {
            // ── State and reward of the previous action ───────────────────
            let snapshot = self.collect_snapshot(sim).map_err(at(step))?;
            let state = encoder.encode(&snapshot);

            let metric = self
                .reward
                .metric(sim, self.topology, &mut tracker)
                .map_err(at(step))?;
            let reward = old_metric - metric;

            // The first decision point has no previous action to reward.
            if let Some(prev) = old_action {
                stats.record_reward(reward);
                if let Some(mem) = memory.as_deref_mut() {
                    mem.add_sample(Transition {
                        state:      std::mem::take(&mut old_state),
                        action:     prev,
                        reward,
                        next_state: state.clone(),
                    });
                }
            }

            // ── Choose and realize the next action ────────────────────────
            let action = policy.choose(&state, model, rng);
            stats.decisions += 1;
            observer.on_decision(step, action, if old_action.is_some() { reward } else { 0.0 });

            let plan = self.controller.plan(self.table, old_action, action)?;
            for segment in &plan.segments {
                for &(junction, code) in &segment.commands {
                    sim.set_phase(&self.topology.junctions[junction].id, code)
                        .map_err(at(step))?;
                }
                // Never step past the episode end, even mid-plan.
                let remaining = segment.steps.min(self.max_steps - step);
                for _ in 0..remaining {
                    sim.step().map_err(at(step))?;
                    step += 1;

                    let queue = queue_length(sim, self.topology).map_err(at(step))?;
                    let (co2, fuel) = self.edge_emissions(sim).map_err(at(step))?;
                    stats.record_step(queue, co2, fuel);
                    observer.on_step(step, queue);
                }
            }

            old_state = state;
            old_action = Some(action);
            old_metric = metric;
        }

        Ok((stats, step))
    }

    /// Query everything the encoders can consume.  Vehicles whose queries
    /// fail mid-scan abort the episode — a vanished id at this level is a
    /// connection fault, unlike the unrecognized-edge drops the encoders
    /// perform themselves.
    fn collect_snapshot<S: TrafficSim>(&self, sim: &S) -> Result<IntersectionSnapshot, SimError> {
        let mut snapshot = IntersectionSnapshot::default();

        for group in &self.topology.lane_groups {
            for lane in group {
                snapshot
                    .halting_by_lane
                    .insert(lane.clone(), sim.lane_halting_count(lane)?);
            }
        }

        for vehicle in sim.vehicle_ids()? {
            let (edge, dist_to_stop) = sim.vehicle_position(&vehicle)?;
            snapshot.vehicles.push(VehicleObs { edge, dist_to_stop });
        }

        Ok(snapshot)
    }

    fn edge_emissions<S: TrafficSim>(&self, sim: &S) -> Result<(f64, f64), SimError> {
        let mut co2 = 0.0;
        let mut fuel = 0.0;
        for road in &self.topology.roads {
            co2 += sim.edge_co2(road)?;
            fuel += sim.edge_fuel(road)?;
        }
        Ok((co2, fuel))
    }
}

/// Attach the step index to a boundary failure.
fn at(step: u32) -> impl FnOnce(SimError) -> EpisodeError {
    move |source| EpisodeError::Aborted { step, source }
}
