//! A synthetic queue-based simulator for the demo.
//!
//! Two one-lane approaches, one per junction.  Each step a Bernoulli draw
//! may add a car to each approach; a junction showing green code 0 serves
//! up to two queued cars per step, yellow serves one, red serves none.
//! Crude, but it queues and clears the way a real intersection does, which
//! is all the control loop needs to learn against.

use std::collections::VecDeque;

use tlc_core::SimRng;
use tlc_sim::{SimError, SimResult, TrafficSim};

const GREEN_SERVICE_RATE:  u32 = 2;
const YELLOW_SERVICE_RATE: u32 = 1;
/// Metres from the stop line at which new cars join the back of the queue.
const APPROACH_LENGTH_M: f64 = 740.0;
const CAR_GAP_M:         f64 = 7.5;

struct Car {
    id:   String,
    wait: f64,
}

struct Approach {
    road:         String,
    lane:         String,
    arrival_prob: f64,
    queue:        VecDeque<Car>,
    phase_code:   u32,
    spawned:      u64,
}

impl Approach {
    fn new(road: &str, arrival_prob: f64) -> Approach {
        Approach {
            road:         road.to_string(),
            lane:         format!("{road}_0"),
            arrival_prob,
            queue:        VecDeque::new(),
            phase_code:   0,
            spawned:      0,
        }
    }

    fn service_rate(&self) -> u32 {
        match self.phase_code {
            0 => GREEN_SERVICE_RATE,
            c if c % 2 == 1 => YELLOW_SERVICE_RATE,
            _ => 0,
        }
    }
}

/// In-memory two-approach intersection model.  Junction `i` of the
/// topology controls approach `i`.
pub struct QueueSim {
    approaches: Vec<Approach>,
    rng:        SimRng,
    time:       u32,
}

impl QueueSim {
    pub fn new(seed: u64, ew_arrival_prob: f64, ns_arrival_prob: f64) -> QueueSim {
        QueueSim {
            approaches: vec![
                Approach::new("EW_in", ew_arrival_prob),
                Approach::new("NS_in", ns_arrival_prob),
            ],
            rng:  SimRng::new(seed),
            time: 0,
        }
    }

    fn approach_for_road(&self, road: &str) -> Option<&Approach> {
        self.approaches.iter().find(|a| a.road == road)
    }

    fn car(&self, id: &str) -> SimResult<(&Approach, &Car)> {
        for approach in &self.approaches {
            if let Some(car) = approach.queue.iter().find(|c| c.id == id) {
                return Ok((approach, car));
            }
        }
        Err(SimError::UnknownId(id.to_string()))
    }
}

impl TrafficSim for QueueSim {
    fn step(&mut self) -> SimResult<()> {
        self.time += 1;
        for approach in &mut self.approaches {
            for _ in 0..approach.service_rate() {
                approach.queue.pop_front();
            }
            for car in &mut approach.queue {
                car.wait += 1.0;
            }
            if self.rng.gen_bool(approach.arrival_prob) {
                approach.spawned += 1;
                approach.queue.push_back(Car {
                    id:   format!("{}_{}", approach.road, approach.spawned),
                    wait: 0.0,
                });
            }
        }
        Ok(())
    }

    fn set_phase(&mut self, junction: &str, phase_code: u32) -> SimResult<()> {
        let index = match junction {
            "J0" => 0,
            "J1" => 1,
            _ => return Err(SimError::UnknownId(junction.to_string())),
        };
        self.approaches[index].phase_code = phase_code;
        Ok(())
    }

    fn close(&mut self) -> SimResult<()> {
        Ok(())
    }

    fn vehicle_ids(&self) -> SimResult<Vec<String>> {
        Ok(self
            .approaches
            .iter()
            .flat_map(|a| a.queue.iter().map(|c| c.id.clone()))
            .collect())
    }

    fn accumulated_waiting_time(&self, vehicle: &str) -> SimResult<f64> {
        self.car(vehicle).map(|(_, c)| c.wait)
    }

    fn vehicle_road(&self, vehicle: &str) -> SimResult<String> {
        self.car(vehicle).map(|(a, _)| a.road.clone())
    }

    fn vehicle_position(&self, vehicle: &str) -> SimResult<(String, f64)> {
        for approach in &self.approaches {
            if let Some(slot) = approach.queue.iter().position(|c| c.id == vehicle) {
                let dist = (slot as f64 * CAR_GAP_M).min(APPROACH_LENGTH_M);
                return Ok((approach.road.clone(), dist));
            }
        }
        Err(SimError::UnknownId(vehicle.to_string()))
    }

    fn lane_halting_count(&self, lane: &str) -> SimResult<u32> {
        Ok(self
            .approaches
            .iter()
            .find(|a| a.lane == lane)
            .map_or(0, |a| a.queue.len() as u32))
    }

    fn edge_halting_count(&self, edge: &str) -> SimResult<u32> {
        Ok(self.approach_for_road(edge).map_or(0, |a| a.queue.len() as u32))
    }

    fn edge_co2(&self, edge: &str) -> SimResult<f64> {
        // Rough idle figure: ~3 mg CO2 per queued car per second.
        Ok(self.approach_for_road(edge).map_or(0.0, |a| a.queue.len() as f64 * 3.0))
    }

    fn edge_fuel(&self, edge: &str) -> SimResult<f64> {
        Ok(self.approach_for_road(edge).map_or(0.0, |a| a.queue.len() as f64 * 0.4))
    }
}
