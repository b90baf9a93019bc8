//! The `PhaseController` and its plan types.

use tlc_core::action::yellow_code;
use tlc_core::{ActionId, ActionTable};

use crate::{SignalError, SignalResult};

/// One set-phases-then-step segment of a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseSegment {
    /// `(junction index, phase code)` pairs, aligned with the topology's
    /// junction declaration order.  Applied before stepping.
    pub commands: Vec<(usize, u32)>,
    /// Simulator steps to advance after applying the commands.
    pub steps: u32,
}

/// An ordered list of segments realizing one decision point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhasePlan {
    pub segments: Vec<PhaseSegment>,
}

impl PhasePlan {
    /// Total simulator steps the plan advances.  Always equals the
    /// controller's `green_duration`.
    pub fn total_steps(&self) -> u32 {
        self.segments.iter().map(|s| s.steps).sum()
    }
}

/// Plans the signal-phase sequence for each chosen action.
///
/// The controller is a two-state machine: it is either steady in a green
/// configuration or transitioning through yellow into a new one.  Which
/// branch a decision point takes depends only on `(prev, next)`:
/// `prev == None` marks the first decision of an episode and never inserts
/// a yellow.
#[derive(Clone, Debug)]
pub struct PhaseController {
    green_duration:  u32,
    yellow_duration: u32,
}

impl PhaseController {
    /// The duration invariant is validated here as well as in `RunConfig`;
    /// a controller constructed directly with bad durations must not
    /// silently clamp.
    pub fn new(green_duration: u32, yellow_duration: u32) -> SignalResult<PhaseController> {
        if yellow_duration >= green_duration {
            return Err(SignalError::YellowNotShorterThanGreen {
                yellow: yellow_duration,
                green:  green_duration,
            });
        }
        Ok(PhaseController {
            green_duration,
            yellow_duration,
        })
    }

    #[inline]
    pub fn green_duration(&self) -> u32 {
        self.green_duration
    }

    #[inline]
    pub fn yellow_duration(&self) -> u32 {
        self.yellow_duration
    }

    /// Plan the transition from `prev` to `next`.
    ///
    /// `prev = None` is the first decision point of an episode: the chosen
    /// greens are applied directly for the full green interval.
    pub fn plan(
        &self,
        table: &ActionTable,
        prev:  Option<ActionId>,
        next:  ActionId,
    ) -> SignalResult<PhasePlan> {
        let new_codes = table.decode(next)?;
        let all_green: Vec<(usize, u32)> =
            new_codes.iter().copied().enumerate().collect();

        let prev = match prev {
            Some(p) if p != next => p,
            // First decision or unchanged action: full green, no yellow.
            _ => {
                return Ok(PhasePlan {
                    segments: vec![PhaseSegment {
                        commands: all_green,
                        steps:    self.green_duration,
                    }],
                });
            }
        };

        // Yellow segment: the junctions whose phase changes get the yellow
        // of their departing green; the others go straight to their new
        // green (it is the same code they already show).
        let old_codes = table.decode(prev)?;
        let changed = table.changed_junctions(prev, next)?;
        let yellow_commands: Vec<(usize, u32)> = new_codes
            .iter()
            .enumerate()
            .map(|(i, &new_green)| {
                if changed.contains(&i) {
                    (i, yellow_code(old_codes[i]))
                } else {
                    (i, new_green)
                }
            })
            .collect();

        Ok(PhasePlan {
            segments: vec![
                PhaseSegment {
                    commands: yellow_commands,
                    steps:    self.yellow_duration,
                },
                PhaseSegment {
                    commands: all_green,
                    steps:    self.green_duration - self.yellow_duration,
                },
            ],
        })
    }
}
