use crate::state::LeagueState;

/// Number of records appended to each growing collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordCounts {
    pub seasons: usize,
    pub games: usize,
    pub half_innings: usize,
    pub at_bats: usize,
    pub pitches: usize,
    pub box_scores: usize,
    pub log_events: usize,
}

impl RecordCounts {
    pub(crate) fn between(before: &LeagueState, after: &LeagueState) -> Self {
        Self {
            seasons: grew(before.seasons.len(), after.seasons.len()),
            games: grew(before.games.len(), after.games.len()),
            half_innings: grew(before.half_innings.len(), after.half_innings.len()),
            at_bats: grew(before.at_bats.len(), after.at_bats.len()),
            pitches: grew(before.pitches.len(), after.pitches.len()),
            box_scores: grew(before.box_scores.len(), after.box_scores.len()),
            log_events: grew(before.log.len(), after.log.len()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[inline]
fn grew(before: usize, after: usize) -> usize {
    after.saturating_sub(before)
}
