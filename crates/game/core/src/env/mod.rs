//! Deterministic primitives the simulation draws on.
//!
//! The random stream and the probability table engine are leaves: they know
//! nothing about players, counts or bases. Everything in [`crate::play`] is
//! built on top of them.
mod rng;
mod tables;

pub use rng::{RngState, next_random, shuffle};
pub use tables::{CLOSURE_EPSILON, MAX_OUTCOMES, ProbTable, weighted_roll};
