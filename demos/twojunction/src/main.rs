//! twojunction — adaptive signal control demo for the rust_tlc framework.
//!
//! Trains a Q-learning controller over two coordinated junctions on a
//! synthetic queue model, then compares the trained greedy policy against
//! a traditional fixed-cycle signal program on identical demand.  Swap
//! [`QueueSim`] for a remote-control connection to a microscopic simulator
//! to run against real network geometry.

mod linear_q;
mod queue_sim;

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use tlc_core::{ActionTable, Junction, RunConfig, Topology};
use tlc_demand::{Branch, DemandGraph, TrafficGenerator};
use tlc_output::{CsvStatsWriter, StatsObserver};
use tlc_rl::{FixedCycle, Greedy};
use tlc_sim::{
    EpisodeStats, NoopObserver, RewardKind, SimError, SimLauncher, TrainingSession,
};
use tlc_state::AggregateEncoder;

use linear_q::LinearQ;
use queue_sim::QueueSim;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64 = 42;
const MAX_STEPS:       u32 = 600;  // 10 simulated minutes per episode
const TOTAL_EPISODES:  u32 = 24;
const EW_ARRIVAL_PROB: f64 = 0.9;  // the east-west approach carries the bulk
const NS_ARRIVAL_PROB: f64 = 0.4;

// ── Simulator launcher ────────────────────────────────────────────────────────

struct QueueSimLauncher {
    base_seed: u64,
}

impl SimLauncher for QueueSimLauncher {
    type Sim = QueueSim;

    fn launch(&mut self, episode: u32) -> Result<QueueSim, SimError> {
        Ok(QueueSim::new(
            self.base_seed.wrapping_add(u64::from(episode)),
            EW_ARRIVAL_PROB,
            NS_ARRIVAL_PROB,
        ))
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== twojunction — rust_tlc adaptive signal control ===");
    println!("Episodes: {TOTAL_EPISODES}  |  Steps/episode: {MAX_STEPS}  |  Seed: {SEED}");
    println!();

    // 1. Topology: two junctions, one approach each.
    let topology = Topology::new(
        vec![
            Junction { id: "J0".into(), phase_count: 2 },
            Junction { id: "J1".into(), phase_count: 2 },
        ],
        vec!["EW_in".into(), "NS_in".into()],
        vec![vec!["EW_in_0".into()], vec!["NS_in_0".into()]],
    )?;
    let table = ActionTable::build(&topology)?;
    println!(
        "Topology: {} junctions, {} actions",
        topology.junctions.len(),
        table.len()
    );

    // 2. Run configuration.
    let config = RunConfig {
        max_steps:        MAX_STEPS,
        green_duration:   10,
        yellow_duration:  3,
        gamma:            0.75,
        memory_size_min:  64,
        memory_size_max:  5_000,
        training_epochs:  40,
        total_episodes:   TOTAL_EPISODES,
        n_cars_generated: 400,
        horizon_secs:     MAX_STEPS,
        seed:             SEED,
    };
    config.validate()?;

    // 3. Demand: a minimal route-choice graph; each episode's stream lands
    //    in output/twojunction/routes as a standard .rou.xml artifact.
    let graph = DemandGraph::new(
        vec![
            Branch { edge: "EW_in".into(), probability: 0.70 },
            Branch { edge: "NS_in".into(), probability: 1.00 },
        ],
        HashMap::from([
            ("EW_in".into(), vec![Branch { edge: "EW_out".into(), probability: 1.0 }]),
            ("NS_in".into(), vec![Branch { edge: "NS_out".into(), probability: 1.0 }]),
        ]),
    )?;
    let generator = TrafficGenerator::new(graph, config.n_cars_generated, config.horizon_secs)?;

    let route_dir = Path::new("output/twojunction/routes");
    std::fs::create_dir_all(route_dir)?;

    // 4. Model and encoder: aggregate state, one slot per lane group.
    let encoder = AggregateEncoder::new(&topology, topology.group_count())?;
    let mut model = LinearQ::new(topology.group_count(), table.len(), 32, 0.01);

    let num_actions = table.len();
    let session = TrainingSession::new(
        topology,
        table,
        config,
        RewardKind::QueueDelta,
        generator,
        route_dir.to_path_buf(),
    );

    // 5. Train, streaming per-episode stats to CSV.
    let out_dir = Path::new("output/twojunction");
    let writer = CsvStatsWriter::new(out_dir)?;
    let mut obs = StatsObserver::new(writer);
    let mut launcher = QueueSimLauncher { base_seed: SEED };

    let t0 = Instant::now();
    let training = session.train(&mut launcher, &encoder, &mut model, &mut obs)?;
    let elapsed = t0.elapsed();

    obs.finish();
    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Training complete in {:.3} s", elapsed.as_secs_f64());
    let first = &training[0];
    let last = &training[training.len() - 1];
    println!(
        "  avg queue: episode 0 = {:.2}, episode {} = {:.2}",
        first.avg_queue_length(),
        training.len() - 1,
        last.avg_queue_length()
    );
    println!("  episode_summaries.csv / step_metrics.csv written to {}", out_dir.display());
    println!();

    // 6. Head-to-head: trained greedy policy vs fixed-cycle baseline, on
    //    the same evaluation seed.
    let eval_episode = TOTAL_EPISODES;
    let mut fresh_launcher = QueueSimLauncher { base_seed: SEED };
    let greedy = session.evaluate(
        &mut fresh_launcher,
        &encoder,
        &model,
        &mut Greedy,
        eval_episode,
        &mut NoopObserver,
    )?;

    let mut fresh_launcher = QueueSimLauncher { base_seed: SEED };
    let baseline = session.evaluate(
        &mut fresh_launcher,
        &encoder,
        &model,
        &mut FixedCycle::new(num_actions),
        eval_episode,
        &mut NoopObserver,
    )?;

    print_comparison(&greedy, &baseline);
    Ok(())
}

fn print_comparison(greedy: &EpisodeStats, baseline: &EpisodeStats) {
    println!("{:<22} {:>12} {:>12}", "Metric", "Trained", "FixedCycle");
    println!("{}", "-".repeat(48));
    println!(
        "{:<22} {:>12.2} {:>12.2}",
        "avg queue length",
        greedy.avg_queue_length(),
        baseline.avg_queue_length()
    );
    println!(
        "{:<22} {:>12} {:>12}",
        "total waiting (s)", greedy.sum_waiting_time, baseline.sum_waiting_time
    );
    println!(
        "{:<22} {:>12.1} {:>12.1}",
        "sum negative reward", greedy.sum_neg_reward, baseline.sum_neg_reward
    );
}
