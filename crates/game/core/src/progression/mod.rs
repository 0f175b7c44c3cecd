//! Game and season progression.
//!
//! Crossing at-bat, half-inning, game and season boundaries is handled here
//! on top of the pitch resolution in [`crate::play`].

mod at_bat;
mod box_score;
mod game;
mod half_inning;
mod season;

pub use at_bat::{AtBatAdvance, advance_at_bat};
pub use box_score::build_box_score;
pub use game::{GameRun, finalize_game, game_is_decided, run_game, start_game};
pub use half_inning::{HalfInningAdvance, advance_half_inning, sim_half_inning};
pub use season::{
    DayReport, SeasonReport, ensure_schedule, games_per_day, round_robin, sim_day, sim_season,
    start_next_scheduled,
};
