//! Pitch-level resolution.
//!
//! Everything here reads ratings and threads the league's random stream; the
//! only state writes happen in [`call_pitch`], which records the pitch and
//! updates the open at-bat.

pub mod advance;
pub mod auto_call;
pub mod contact;
pub mod defense;
mod error;
pub mod pitch;
pub mod ratings;
mod resolve;

pub use advance::{Advance, Advanced, Settlement, advance, settle};
pub use auto_call::auto_call;
pub use defense::{FieldingSituation, resolve_defense};
pub use error::PlayError;
pub use resolve::{PitchOutcome, call_pitch, describe_result, pitchable_at_bat};

pub(crate) use resolve::pitching_profile;
