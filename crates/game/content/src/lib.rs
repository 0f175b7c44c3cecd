//! League content: roster files, tunables and a built-in demo league.
//!
//! This crate provides loaders for RON/TOML data files:
//! - League rosters, lineups and rotations (data-driven via RON)
//! - Simulation tunables (data-driven via TOML)
//!
//! Content is handed to the engine once through a `NewLeague` action and
//! never read again during play.

pub mod demo;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use demo::demo_league;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, LeagueLoader, LeagueSpec, PitchingSpec, PlayerSpec, TeamSpec,
};
