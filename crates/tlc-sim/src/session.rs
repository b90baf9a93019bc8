//! Multi-episode training and evaluation sessions.

use std::path::PathBuf;

use tlc_core::{ActionTable, RunConfig, SimRng, Topology};
use tlc_demand::{TrafficGenerator, write_route_file};
use tlc_rl::{ActionPolicy, EpsilonGreedy, Learner, ReplayMemory, ValueFunction};
use tlc_signal::PhaseController;
use tlc_state::StateEncoder;

use crate::{
    EpisodeError, EpisodeObserver, EpisodeResult, EpisodeRunner, EpisodeStats, RewardKind,
    SimError, TrafficSim,
};

/// Starts a fresh simulator instance for each episode.
///
/// The production launcher spawns the external simulator process pointed at
/// the route file the session just wrote and opens a remote-control
/// connection to it; tests return in-memory simulators.
pub trait SimLauncher {
    type Sim: TrafficSim;

    /// Launch the simulator for `episode`.  The session has already written
    /// this episode's route file before calling.
    fn launch(&mut self, episode: u32) -> Result<Self::Sim, SimError>;
}

/// One full training run: generate demand, simulate, learn, repeat.
///
/// Epsilon decays linearly from 1.0 to 0 across the configured episode
/// count, and each episode's replay training happens strictly after its
/// simulation has closed.
pub struct TrainingSession {
    topology:  Topology,
    table:     ActionTable,
    config:    RunConfig,
    reward:    RewardKind,
    generator: TrafficGenerator,
    route_dir: PathBuf,
}

impl TrainingSession {
    pub fn new(
        topology:  Topology,
        table:     ActionTable,
        config:    RunConfig,
        reward:    RewardKind,
        generator: TrafficGenerator,
        route_dir: PathBuf,
    ) -> TrainingSession {
        TrainingSession {
            topology,
            table,
            config,
            reward,
            generator,
            route_dir,
        }
    }

    /// Path of the route file written for `episode`.
    pub fn route_file(&self, episode: u32) -> PathBuf {
        self.route_dir.join(format!("episode_{episode:04}.rou.xml"))
    }

    /// Exploration rate for `episode`: linear decay from 1.0 to near 0.
    pub fn epsilon(&self, episode: u32) -> f64 {
        1.0 - f64::from(episode) / f64::from(self.config.total_episodes)
    }

    /// Run the full training schedule and return per-episode statistics.
    pub fn train<L, E, V, O>(
        &self,
        launcher: &mut L,
        encoder:  &E,
        model:    &mut V,
        observer: &mut O,
    ) -> EpisodeResult<Vec<EpisodeStats>>
    where
        L: SimLauncher,
        E: StateEncoder,
        V: ValueFunction,
        O: EpisodeObserver,
    {
        let controller = PhaseController::new(self.config.green_duration, self.config.yellow_duration)?;
        let runner = EpisodeRunner::new(
            &self.topology,
            &self.table,
            &controller,
            self.reward,
            self.config.max_steps,
        );

        let mut memory = ReplayMemory::new(self.config.memory_size_min, self.config.memory_size_max);
        let learner = Learner::new(self.config.gamma);
        let mut rng = SimRng::new(self.config.seed);

        let mut all_stats = Vec::with_capacity(self.config.total_episodes as usize);
        for episode in 0..self.config.total_episodes {
            self.write_demand(episode)?;
            let mut sim = launcher.launch(episode).map_err(launch_failed)?;

            let mut policy = EpsilonGreedy::new(self.epsilon(episode));
            let mut episode_rng = rng.child(u64::from(episode));
            let stats = runner.run(
                &mut sim,
                encoder,
                model,
                &mut policy,
                Some(&mut memory),
                &mut episode_rng,
                episode,
                observer,
            )?;
            all_stats.push(stats);

            for _ in 0..self.config.training_epochs {
                learner.replay(&memory, model, &mut rng);
            }
        }
        Ok(all_stats)
    }

    /// Run a single evaluation episode with the given policy and no
    /// learning.  Pass `Greedy` to measure the trained model, or
    /// `FixedCycle` for the traditional-signal baseline.
    pub fn evaluate<L, E, V, P, O>(
        &self,
        launcher: &mut L,
        encoder:  &E,
        model:    &V,
        policy:   &mut P,
        episode:  u32,
        observer: &mut O,
    ) -> EpisodeResult<EpisodeStats>
    where
        L: SimLauncher,
        E: StateEncoder,
        V: ValueFunction,
        P: ActionPolicy,
        O: EpisodeObserver,
    {
        let controller = PhaseController::new(self.config.green_duration, self.config.yellow_duration)?;
        let runner = EpisodeRunner::new(
            &self.topology,
            &self.table,
            &controller,
            self.reward,
            self.config.max_steps,
        );

        self.write_demand(episode)?;
        let mut sim = launcher.launch(episode).map_err(launch_failed)?;

        let mut rng = SimRng::new(self.config.seed).child(u64::from(episode));
        runner.run(
            &mut sim,
            encoder,
            model,
            policy,
            None,
            &mut rng,
            episode,
            observer,
        )
    }

    /// Generate this episode's traffic and write its route file.  The
    /// episode index seeds the generator, so every run of the same
    /// configuration sees the same demand sequence.
    fn write_demand(&self, episode: u32) -> EpisodeResult<()> {
        let events = self
            .generator
            .generate(self.config.seed.wrapping_add(u64::from(episode)));
        write_route_file(&self.route_file(episode), &events)?;
        Ok(())
    }
}

fn launch_failed(source: SimError) -> EpisodeError {
    EpisodeError::Aborted { step: 0, source }
}
