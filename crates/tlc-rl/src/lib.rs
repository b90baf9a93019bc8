//! `tlc-rl` — Q-learning machinery for the rust_tlc framework.
//!
//! The function approximator itself stays external behind the
//! [`ValueFunction`] trait (a neural network in production; anything with a
//! predict/train surface in tests).  This crate owns everything around it:
//!
//! - [`ReplayMemory`] — bounded FIFO store of experience tuples with
//!   uniform sampling,
//! - [`Learner`] — one-step TD target computation and the batched train
//!   call,
//! - [`ActionPolicy`] implementations — epsilon-greedy exploration for
//!   training, greedy for evaluation, and a fixed round-robin cycle as the
//!   traditional-signal baseline.

pub mod learner;
pub mod memory;
pub mod policy;
pub mod value;


pub use learner::Learner;
pub use memory::{ReplayMemory, Transition};
pub use policy::{ActionPolicy, EpsilonGreedy, FixedCycle, Greedy};
pub use value::ValueFunction;
