mod bitmask;
mod changes;

use crate::action::Action;
use crate::state::{LeagueState, Tick};

pub use bitmask::LeagueFields;
pub use changes::RecordCounts;

/// Minimal description of a dispatch's impact on the league state.
///
/// The delta records which top-level fields changed and how many records each
/// append-only collection gained. It does not store the values themselves;
/// they live in the before/after states.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDelta {
    /// The action that caused this transition.
    pub action: Action,

    /// Logical clock after the dispatch.
    pub clock: Tick,

    /// Fields whose contents differ between the two states.
    pub fields: LeagueFields,

    /// Records appended to the growing collections.
    pub added: RecordCounts,
}

impl StateDelta {
    /// Creates a delta by comparing two league states field by field.
    pub fn from_states(action: Action, before: &LeagueState, after: &LeagueState) -> Self {
        let mut fields = LeagueFields::empty();
        fields.set(LeagueFields::RNG, before.rng != after.rng);
        fields.set(LeagueFields::PHASE, before.phase != after.phase);
        fields.set(LeagueFields::USER_TEAM, before.user_team_id != after.user_team_id);
        fields.set(LeagueFields::PLAYERS, before.players != after.players);
        fields.set(LeagueFields::TEAMS, before.teams != after.teams);
        fields.set(LeagueFields::SEASONS, before.seasons != after.seasons);
        fields.set(LeagueFields::GAMES, before.games != after.games);
        fields.set(
            LeagueFields::HALF_INNINGS,
            before.half_innings != after.half_innings,
        );
        fields.set(LeagueFields::AT_BATS, before.at_bats != after.at_bats);
        fields.set(LeagueFields::PITCHES, before.pitches != after.pitches);
        fields.set(LeagueFields::BOX_SCORES, before.box_scores != after.box_scores);
        fields.set(LeagueFields::TRADES, before.trades != after.trades);
        fields.set(LeagueFields::LOG, before.log.len() != after.log.len());
        fields.set(LeagueFields::POINTERS, before.pointers != after.pointers);

        Self {
            action,
            clock: after.clock,
            fields,
            added: RecordCounts::between(before, after),
        }
    }

    /// Returns true if nothing changed (a no-op dispatch).
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
