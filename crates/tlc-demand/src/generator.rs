//! Poisson arrival stream and per-vehicle route sampling.

use rand::Rng;
use rand_distr::{Distribution, Poisson};

use tlc_core::SimRng;

use crate::{DemandError, DemandGraph, DemandResult};

/// Cosmetic vehicle class; does not affect routing or signal priority.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VehicleClass {
    Passenger,
    Emergency,
}

/// One generated vehicle, immutable once produced.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleSpawnEvent {
    /// Sequential id: `veh0`, `veh1`, …
    pub id: String,
    /// Departure time in simulated seconds, rounded to the whole second.
    pub depart_secs: f64,
    /// Ordered edge ids from entry to exit.
    pub route: Vec<String>,
    pub class: VehicleClass,
}

/// Synthesizes the arrival stream for one episode.
pub struct TrafficGenerator {
    graph:                 DemandGraph,
    n_cars:                u32,
    horizon_secs:          u32,
    emergency_probability: f64,
    poisson:               Poisson<f64>,
}

impl TrafficGenerator {
    /// Default probability that a vehicle is flagged emergency-class.
    pub const EMERGENCY_PROBABILITY: f64 = 0.005;

    pub fn new(graph: DemandGraph, n_cars: u32, horizon_secs: u32) -> DemandResult<Self> {
        Self::with_emergency_probability(graph, n_cars, horizon_secs, Self::EMERGENCY_PROBABILITY)
    }

    pub fn with_emergency_probability(
        graph:                 DemandGraph,
        n_cars:                u32,
        horizon_secs:          u32,
        emergency_probability: f64,
    ) -> DemandResult<Self> {
        if n_cars == 0 || horizon_secs == 0 {
            return Err(DemandError::NonPositiveRate {
                cars:         n_cars,
                horizon_secs,
            });
        }
        let rate = f64::from(n_cars) / f64::from(horizon_secs);
        let poisson = Poisson::new(rate).map_err(|_| DemandError::NonPositiveRate {
            cars:         n_cars,
            horizon_secs,
        })?;
        Ok(TrafficGenerator {
            graph,
            n_cars,
            horizon_secs,
            emergency_probability,
            poisson,
        })
    }

    /// Mean arrivals per second.
    #[inline]
    pub fn arrival_rate(&self) -> f64 {
        f64::from(self.n_cars) / f64::from(self.horizon_secs)
    }

    /// Generate the full arrival stream for one episode.
    ///
    /// Identical seeds produce bit-identical vehicle ids, depart times, and
    /// routes.  The total vehicle count is itself stochastic (a sum of
    /// Poisson draws whose mean is `n_cars`), matching the calibration
    /// intent rather than an exact quota.
    pub fn generate(&self, seed: u64) -> Vec<VehicleSpawnEvent> {
        let mut rng = SimRng::new(seed);
        let mut events = Vec::with_capacity(self.n_cars as usize);
        let mut next_id: u64 = 0;

        for second in 0..self.horizon_secs {
            let arrivals = self.poisson.sample(rng.inner()) as usize;
            if arrivals == 0 {
                continue;
            }

            // Fractional offsets within this second, rounded to whole
            // seconds and sorted so ids stay in depart order.
            let mut departs: Vec<f64> = (0..arrivals)
                .map(|_| (f64::from(second) + rng.inner().r#gen::<f64>()).round())
                .collect();
            departs.sort_by(f64::total_cmp);

            for depart_secs in departs {
                let route = self.graph.generate_path(&mut rng);
                let class = if rng.random::<f64>() < self.emergency_probability {
                    VehicleClass::Emergency
                } else {
                    VehicleClass::Passenger
                };
                events.push(VehicleSpawnEvent {
                    id: format!("veh{next_id}"),
                    depart_secs,
                    route,
                    class,
                });
                next_id += 1;
            }
        }

        events
    }
}
